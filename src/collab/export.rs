//! Export a snippet as a rendered PNG image.
//!
//! The core only supplies the parameters and the destination path; the
//! actual rasterization is a collaborator behind a trait so the renderer
//! can be swapped without touching the rest of the application.

use std::path::Path;
use std::process::Command;

use crate::collab::run_with_stdin;
use crate::error::{Error, Result};
use crate::models::Language;

/// Themes offered in the export dialog. These are names the external
/// renderer understands, not the editor's syntect theme.
pub const EXPORT_THEMES: &[&str] = &[
    "Monokai Extended",
    "Dracula",
    "Nord",
    "OneHalfDark",
    "Solarized (dark)",
];

pub const MIN_FONT_SIZE: u32 = 12;
pub const MAX_FONT_SIZE: u32 = 36;

#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub code: String,
    pub language: Language,
    pub theme: String,
    pub font: String,
    pub font_size: u32,
    pub line_numbers: bool,
}

pub trait ImageExporter {
    /// Render the highlighted code and write the image to `destination`.
    fn export(&self, request: &ExportRequest, destination: &Path) -> Result<()>;
}

/// Drives the external `silicon` renderer over stdin.
#[derive(Debug, Default)]
pub struct SiliconExporter;

impl ImageExporter for SiliconExporter {
    fn export(&self, request: &ExportRequest, destination: &Path) -> Result<()> {
        if request.code.trim().is_empty() {
            return Err(Error::Validation("there is no code to export".into()));
        }

        let font = format!("{}={}", request.font, request.font_size);
        let mut command = Command::new("silicon");
        command
            .args(["--language", request.language.extension()])
            .args(["--theme", &request.theme])
            .args(["--font", &font])
            .arg("--output")
            .arg(destination);
        if !request.line_numbers {
            command.arg("--no-line-number");
        }

        run_with_stdin(command, &request.code)?;

        // silicon reports success even when it could not write the file to
        // an unwritable path on some platforms; verify the artifact exists.
        if !destination.exists() {
            return Err(Error::collaborator(
                "silicon",
                format!("no image was written to {}", destination.display()),
            ));
        }
        Ok(())
    }
}
