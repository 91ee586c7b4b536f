//! syntect-backed highlighting for the editor pane.
//!
//! Maps syntect's styled ranges onto ratatui spans. An unknown language
//! falls back to the plain-text syntax; that is an expected fallback and is
//! never surfaced as an error.

use once_cell::sync::Lazy;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style as SyntectStyle, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::models::Language;

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

const EDITOR_THEME: &str = "base16-eighties.dark";

fn editor_theme() -> &'static Theme {
    // Fall back to any bundled theme if the preferred one ever disappears.
    THEME_SET
        .themes
        .get(EDITOR_THEME)
        .or_else(|| THEME_SET.themes.values().next())
        .expect("syntect ships bundled themes")
}

/// Highlight `code` into owned ratatui lines, covering the entire input in
/// order. Lines that fail to tokenize are rendered unstyled.
pub fn highlight_code(code: &str, language: Language) -> Vec<Line<'static>> {
    let syntax = SYNTAX_SET
        .find_syntax_by_extension(language.extension())
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());
    let mut highlighter = HighlightLines::new(syntax, editor_theme());

    let mut lines = Vec::new();
    for line in LinesWithEndings::from(code) {
        let ranges = highlighter
            .highlight_line(line, &SYNTAX_SET)
            .unwrap_or_else(|_| vec![(SyntectStyle::default(), line)]);
        let spans: Vec<Span<'static>> = ranges
            .into_iter()
            .map(|(style, text)| {
                Span::styled(text.trim_end_matches('\n').to_string(), convert_style(style))
            })
            .collect();
        lines.push(Line::from(spans));
    }
    if lines.is_empty() {
        lines.push(Line::default());
    }
    lines
}

fn convert_style(style: SyntectStyle) -> Style {
    let fg = style.foreground;
    let mut converted = Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b));
    if style.font_style.contains(FontStyle::BOLD) {
        converted = converted.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        converted = converted.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        converted = converted.add_modifier(Modifier::UNDERLINED);
    }
    converted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_every_line_of_input() {
        let code = "def greet():\n    print('hi')\n\nreturn None\n";
        let lines = highlight_code(code, Language::Python);
        assert_eq!(lines.len(), code.lines().count());
    }

    #[test]
    fn unknown_syntax_still_produces_output() {
        let lines = highlight_code("anything at all", Language::Text);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn empty_input_renders_one_blank_line() {
        assert_eq!(highlight_code("", Language::Python).len(), 1);
    }
}
