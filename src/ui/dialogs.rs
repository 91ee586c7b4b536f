//! Modal overlays: the unsaved-changes guard, delete confirmation, the
//! export dialog and the help screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget},
};

use crate::app::{App, ExportDialog, ExportField, Prompt};
use crate::collab::export::EXPORT_THEMES;
use crate::ui::colors::Monokai;

pub fn render(frame: &mut Frame, app: &App) {
    match &app.prompt {
        Some(Prompt::UnsavedChanges { .. }) => render_unsaved_changes(frame),
        Some(Prompt::ConfirmDelete) => render_confirm_delete(frame, app),
        Some(Prompt::Export(dialog)) => render_export(frame, dialog),
        Some(Prompt::Help) => render_help(frame),
        None => {}
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area)[1];
    Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .split(vertical)[1]
}

fn popup_block(title: &str, accent: ratatui::style::Color) -> Block<'_> {
    Block::bordered()
        .title(format!(" {} ", title))
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(accent).bg(Monokai::SURFACE))
}

fn render_unsaved_changes(frame: &mut Frame) {
    let area = centered_rect(52, 7, frame.area());
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "You have unsaved changes.",
            Style::default().fg(Monokai::FG),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[s]", Style::default().fg(Monokai::GREEN).bold()),
            Span::styled(" Save   ", Style::default().fg(Monokai::FG)),
            Span::styled("[d]", Style::default().fg(Monokai::ORANGE).bold()),
            Span::styled(" Discard   ", Style::default().fg(Monokai::FG)),
            Span::styled("[Esc]", Style::default().fg(Monokai::COMMENT).bold()),
            Span::styled(" Cancel", Style::default().fg(Monokai::FG)),
        ]),
    ];
    let dialog = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(popup_block("Unsaved Changes", Monokai::YELLOW));
    Clear.render(area, frame.buffer_mut());
    dialog.render(area, frame.buffer_mut());
}

fn render_confirm_delete(frame: &mut Frame, app: &App) {
    let area = centered_rect(52, 7, frame.area());
    let title = app.session.title.trim().to_string();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Delete snippet '{}'?", title),
            Style::default().fg(Monokai::FG),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y]", Style::default().fg(Monokai::PINK).bold()),
            Span::styled(" Delete   ", Style::default().fg(Monokai::FG)),
            Span::styled("[n]", Style::default().fg(Monokai::COMMENT).bold()),
            Span::styled(" Keep", Style::default().fg(Monokai::FG)),
        ]),
    ];
    let dialog = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(popup_block("Confirm Delete", Monokai::PINK));
    Clear.render(area, frame.buffer_mut());
    dialog.render(area, frame.buffer_mut());
}

fn export_row(label: &str, value: String, active: bool) -> Line<'static> {
    let value_style = if active {
        Style::default().fg(Monokai::BG).bg(Monokai::CYAN)
    } else {
        Style::default().fg(Monokai::FG)
    };
    Line::from(vec![
        Span::styled(format!(" {:<13}", label), Style::default().fg(Monokai::COMMENT)),
        Span::styled(format!(" {} ", value), value_style),
    ])
}

fn render_export(frame: &mut Frame, dialog: &ExportDialog) {
    let area = centered_rect(56, 11, frame.area());
    let lines = vec![
        Line::from(""),
        export_row(
            "Theme",
            format!("◂ {} ▸", EXPORT_THEMES[dialog.theme_index]),
            dialog.field == ExportField::Theme,
        ),
        export_row(
            "Font size",
            format!("◂ {} ▸", dialog.font_size),
            dialog.field == ExportField::FontSize,
        ),
        export_row(
            "Line numbers",
            if dialog.line_numbers { "on" } else { "off" }.to_string(),
            dialog.field == ExportField::LineNumbers,
        ),
        export_row(
            "Save to",
            dialog.path.clone(),
            dialog.field == ExportField::Path,
        ),
        Line::from(""),
        Line::from(Span::styled(
            " [↹] Field   [←→] Adjust   [⏎] Export   [Esc] Close",
            Style::default().fg(Monokai::COMMENT),
        )),
    ];
    let popup = Paragraph::new(lines).block(popup_block("Export as Image", Monokai::CYAN));
    Clear.render(area, frame.buffer_mut());
    popup.render(area, frame.buffer_mut());
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(58, 20, frame.area());
    let bindings = [
        ("Ctrl+S", "Save snippet"),
        ("Ctrl+N", "New snippet"),
        ("Ctrl+D", "Delete snippet"),
        ("Ctrl+F", "Toggle favorite"),
        ("Ctrl+O", "Show only favorites"),
        ("/", "Search (title, tags, language)"),
        ("Ctrl+P", "Prettify code"),
        ("Ctrl+Y", "Copy code to clipboard"),
        ("Ctrl+E", "Export as image"),
        ("Tab / Shift+Tab", "Move between fields"),
        ("Ctrl+Q", "Quit"),
    ];
    let mut lines = vec![Line::from("")];
    for (key, what) in bindings {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<16}", key),
                Style::default().fg(Monokai::CYAN).bold(),
            ),
            Span::styled(what.to_string(), Style::default().fg(Monokai::FG)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press Esc to close",
        Style::default().fg(Monokai::COMMENT),
    )));
    let popup = Paragraph::new(lines).block(popup_block("Help", Monokai::PURPLE));
    Clear.render(area, frame.buffer_mut());
    popup.render(area, frame.buffer_mut());
}
