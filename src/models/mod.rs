pub mod snippet;
pub mod store;

pub use snippet::{Language, Snippet, SnippetSummary};
pub use store::SnippetStore;
