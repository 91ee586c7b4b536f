use chrono::{DateTime, Utc};

/// A persisted code sample with metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Snippet {
    pub id: i64,
    pub title: String,
    pub language: Language,
    pub tags: String,
    pub code: String,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
}

/// The slice of a snippet shown in the list panel. The code body is only
/// fetched when a snippet is loaded into the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct SnippetSummary {
    pub id: i64,
    pub title: String,
    pub language: Language,
    pub tags: String,
    pub is_favorite: bool,
}

/// Supported highlighting/formatting profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Python,
    Javascript,
    Sql,
    Html,
    Css,
    Bash,
    Text,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::Python,
        Language::Javascript,
        Language::Sql,
        Language::Html,
        Language::Css,
        Language::Bash,
        Language::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Javascript => "javascript",
            Language::Sql => "sql",
            Language::Html => "html",
            Language::Css => "css",
            Language::Bash => "bash",
            Language::Text => "text",
        }
    }

    /// File extension used for syntax lookup and external renderers.
    pub fn extension(&self) -> &'static str {
        match self {
            Language::Python => "py",
            Language::Javascript => "js",
            Language::Sql => "sql",
            Language::Html => "html",
            Language::Css => "css",
            Language::Bash => "sh",
            Language::Text => "txt",
        }
    }

    /// Parse a stored language name. Unknown names fall back to plain text;
    /// this is an expected fallback, not an error.
    pub fn from_name(name: &str) -> Language {
        match name.trim().to_lowercase().as_str() {
            "python" => Language::Python,
            "javascript" => Language::Javascript,
            "sql" => Language::Sql,
            "html" => Language::Html,
            "css" => Language::Css,
            "bash" => Language::Bash,
            _ => Language::Text,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
