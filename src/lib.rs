//! codesnap - snippet manager for the terminal.
//!
//! Snippets live in a single SQLite table; the editor holds one snippet at
//! a time in an [`session::EditorSession`] whose dirty flag guards every
//! navigation. Highlighting, prettifying, image export and the clipboard
//! are pluggable collaborators in [`collab`].

pub mod app;
pub mod collab;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod projection;
pub mod session;
pub mod ui;
