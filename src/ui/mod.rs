//! User interface: rendering only, no business logic.

pub mod colors;
pub mod components;
pub mod dialogs;
pub mod editor;
pub mod snippet_list;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::app::App;

pub fn render(frame: &mut Frame, app: &mut App) {
    let [content, bottom] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]).areas(frame.area());
    let [list_area, editor_area] =
        Layout::horizontal([Constraint::Percentage(30), Constraint::Percentage(70)])
            .areas(content);

    snippet_list::render(frame, list_area, app);
    editor::render(frame, editor_area, app);
    components::render_bottom_bar(frame, bottom, app);
    dialogs::render(frame, app);
}
