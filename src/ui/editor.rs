//! Right panel: the snippet editor with live syntax highlighting.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::{App, Focus};
use crate::collab::highlight::highlight_code;
use crate::ui::colors::Monokai;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let [title_area, meta_area, code_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .areas(area);

    render_title(frame, title_area, app);
    render_meta(frame, meta_area, app);
    render_code(frame, code_area, app);
}

fn field_border(app: &App, focus: Focus) -> Style {
    if app.focus == focus {
        Style::default().fg(Monokai::ORANGE)
    } else {
        Style::default().fg(Monokai::COMMENT)
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    // The asterisk marks unsaved changes, the star the favorite flag.
    let mut block_title = String::from(" Title ");
    if app.session.is_dirty() {
        block_title = String::from(" Title * ");
    }

    let mut spans = vec![Span::styled(
        app.session.title.clone(),
        Style::default().fg(Monokai::FG),
    )];
    if app.focus == Focus::Title {
        spans.push(Span::styled("▏", Style::default().fg(Monokai::CYAN)));
    }
    if app.is_loaded_favorite() {
        spans.push(Span::styled("  ★", Style::default().fg(Monokai::YELLOW)));
    }

    let title = Paragraph::new(Line::from(spans)).block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(field_border(app, Focus::Title))
            .title(block_title),
    );
    frame.render_widget(title, area);
}

fn render_meta(frame: &mut Frame, area: Rect, app: &App) {
    let [language_area, tags_area] =
        Layout::horizontal([Constraint::Length(24), Constraint::Fill(1)]).areas(area);

    let language = Paragraph::new(Line::from(Span::styled(
        format!("◂ {} ▸", app.session.language),
        Style::default().fg(Monokai::PURPLE),
    )))
    .block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(field_border(app, Focus::Language))
            .title(" Language "),
    );
    frame.render_widget(language, language_area);

    let mut spans = vec![Span::styled(
        app.session.tags.clone(),
        Style::default().fg(Monokai::FG),
    )];
    if app.focus == Focus::Tags {
        spans.push(Span::styled("▏", Style::default().fg(Monokai::CYAN)));
    }
    let tags = Paragraph::new(Line::from(spans)).block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(field_border(app, Focus::Tags))
            .title(" Tags (comma-separated) "),
    );
    frame.render_widget(tags, tags_area);
}

fn render_code(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = highlight_code(&app.session.code, app.session.language);

    // Reverse-video cell at the cursor position while the code pane has
    // focus.
    if app.focus == Focus::Code {
        if let Some(line) = lines.get_mut(app.cursor_line) {
            mark_cursor(line, app.cursor_col);
        }
    }

    let visible = area.height.saturating_sub(2) as usize;
    let scroll = if visible > 0 && app.cursor_line >= visible {
        (app.cursor_line + 1 - visible) as u16
    } else {
        0
    };

    let code = Paragraph::new(lines)
        .style(Style::default().bg(Monokai::BG))
        .scroll((scroll, 0))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(field_border(app, Focus::Code))
                .title(" Code "),
        );
    frame.render_widget(code, area);
}

fn mark_cursor(line: &mut Line<'static>, col: usize) {
    let mut remaining = col;
    let mut rebuilt: Vec<Span<'static>> = Vec::with_capacity(line.spans.len() + 2);
    let mut placed = false;

    for span in line.spans.drain(..) {
        let chars: Vec<char> = span.content.chars().collect();
        if placed || remaining >= chars.len() {
            if !placed {
                remaining -= chars.len();
            }
            rebuilt.push(span);
            continue;
        }
        let before: String = chars[..remaining].iter().collect();
        let at: String = chars[remaining].to_string();
        let after: String = chars[remaining + 1..].iter().collect();
        if !before.is_empty() {
            rebuilt.push(Span::styled(before, span.style));
        }
        rebuilt.push(Span::styled(
            at,
            span.style.add_modifier(Modifier::REVERSED),
        ));
        if !after.is_empty() {
            rebuilt.push(Span::styled(after, span.style));
        }
        placed = true;
    }
    if !placed {
        rebuilt.push(Span::styled(
            " ",
            Style::default().add_modifier(Modifier::REVERSED),
        ));
    }
    line.spans = rebuilt;
}
