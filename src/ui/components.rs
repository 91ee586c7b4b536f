//! Bottom bar: status messages on the left, context shortcuts on the right.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};

use crate::app::{App, Focus, Prompt};
use crate::ui::colors::Monokai;

pub fn render_bottom_bar(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let status = status_line(app);
    let left = Paragraph::new(status)
        .alignment(Alignment::Left)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Monokai::COMMENT)),
        );

    let shortcuts = context_shortcuts(app);
    let right = Paragraph::new(shortcuts)
        .alignment(Alignment::Right)
        .style(Style::default().fg(Monokai::COMMENT))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Monokai::COMMENT)),
        );

    left.render(chunks[0], frame.buffer_mut());
    right.render(chunks[1], frame.buffer_mut());
}

fn status_line(app: &App) -> Line<'static> {
    if let Some(message) = &app.error_message {
        return Line::from(Span::styled(
            format!(" {} ", message),
            Style::default().fg(Monokai::PINK).bold(),
        ));
    }
    if let Some(message) = &app.success_message {
        return Line::from(Span::styled(
            format!(" {} ", message),
            Style::default().fg(Monokai::GREEN),
        ));
    }
    Line::from(Span::styled(
        " Ready ",
        Style::default().fg(Monokai::COMMENT),
    ))
}

fn context_shortcuts(app: &App) -> String {
    match &app.prompt {
        Some(Prompt::UnsavedChanges { .. }) => {
            return " [s] Save │ [d] Discard │ [Esc] Cancel ".to_string();
        }
        Some(Prompt::ConfirmDelete) => {
            return " [y] Delete │ [n] Keep ".to_string();
        }
        Some(Prompt::Export(_)) => {
            return " [↹] Field │ [←→] Adjust │ [⏎] Export │ [Esc] Close ".to_string();
        }
        Some(Prompt::Help) => {
            return " [Esc] Close ".to_string();
        }
        None => {}
    }

    if app.search_active {
        return " [⏎] Keep filter │ [Esc] Clear ".to_string();
    }

    match app.focus {
        Focus::List => {
            " [↑↓] Navigate │ [⏎] Open │ [/] Search │ [^O] Favorites │ [^N] New │ [?] Help │ [^Q] Quit "
                .to_string()
        }
        Focus::Language => " [←→] Language │ [↹] Next field │ [^S] Save ".to_string(),
        Focus::Code => {
            " [^S] Save │ [^P] Prettify │ [^Y] Copy │ [^E] Export │ [↹] Next field ".to_string()
        }
        Focus::Title | Focus::Tags => " [↹] Next field │ [^S] Save │ [^D] Delete │ [^F] Favorite "
            .to_string(),
    }
}
