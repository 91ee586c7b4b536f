//! Monokai palette used for the application chrome.

use ratatui::style::Color;

pub struct Monokai;

impl Monokai {
    pub const BG: Color = Color::Rgb(39, 40, 34);
    pub const SURFACE: Color = Color::Rgb(49, 50, 43);
    pub const FG: Color = Color::Rgb(248, 248, 242);
    pub const COMMENT: Color = Color::Rgb(117, 113, 94);
    pub const YELLOW: Color = Color::Rgb(230, 219, 116);
    pub const ORANGE: Color = Color::Rgb(253, 151, 31);
    pub const PINK: Color = Color::Rgb(249, 38, 114);
    pub const GREEN: Color = Color::Rgb(166, 226, 46);
    pub const CYAN: Color = Color::Rgb(102, 217, 239);
    pub const PURPLE: Color = Color::Rgb(174, 129, 255);
}
