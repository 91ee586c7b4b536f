//! Left panel: search box and the snippet listing.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, List, ListItem, ListState, Paragraph},
};

use crate::app::{App, Focus};
use crate::ui::colors::Monokai;

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let [search_area, list_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(area);

    render_search_box(frame, search_area, app);
    render_listing(frame, list_area, app);
}

fn render_search_box(frame: &mut Frame, area: Rect, app: &App) {
    let border = if app.search_active {
        Style::default().fg(Monokai::CYAN)
    } else {
        Style::default().fg(Monokai::COMMENT)
    };
    let content = if app.filter.query.is_empty() && !app.search_active {
        Line::from(Span::styled(
            "Search snippets...",
            Style::default().fg(Monokai::COMMENT),
        ))
    } else {
        let cursor = if app.search_active { "▏" } else { "" };
        Line::from(vec![
            Span::styled(app.filter.query.clone(), Style::default().fg(Monokai::FG)),
            Span::styled(cursor, Style::default().fg(Monokai::CYAN)),
        ])
    };

    let search = Paragraph::new(content).block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(" Search "),
    );
    frame.render_widget(search, area);
}

fn render_listing(frame: &mut Frame, area: Rect, app: &mut App) {
    let title = if app.filter.favorites_only {
        " ★ Favorites "
    } else {
        " Snippets "
    };
    let border = if app.focus == Focus::List {
        Style::default().fg(Monokai::ORANGE)
    } else {
        Style::default().fg(Monokai::COMMENT)
    };

    let items: Vec<ListItem> = app
        .listing
        .iter()
        .map(|summary| {
            let marker = if summary.is_favorite { "★ " } else { "  " };
            let loaded = app.session.loaded_id == Some(summary.id);
            let style = if loaded {
                Style::default().fg(Monokai::GREEN)
            } else {
                Style::default().fg(Monokai::FG)
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(Monokai::YELLOW)),
                Span::styled(summary.title.clone(), style),
                Span::styled(
                    format!("  {}", summary.language),
                    Style::default().fg(Monokai::COMMENT),
                ),
            ]))
        })
        .collect();

    let empty = items.is_empty();
    let list = List::new(items)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(border)
                .title(title),
        )
        .highlight_style(Style::default().bg(Monokai::SURFACE).bold());

    let mut state = ListState::default();
    if !empty {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
