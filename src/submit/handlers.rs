//! Built-in submit handlers

use super::SubmitHandler;
use crate::config::OutputTarget;
use crate::state::FormValues;
use anyhow::{bail, Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Build the handler for a configured output target
pub fn handler_for(target: OutputTarget, path: Option<&Path>) -> Result<Box<dyn SubmitHandler>> {
    match target {
        OutputTarget::Stdout => Ok(Box::new(StdoutHandler::new())),
        OutputTarget::Clipboard => Ok(Box::new(ClipboardHandler)),
        OutputTarget::File => match path {
            Some(path) => Ok(Box::new(JsonFileHandler::new(path))),
            None => bail!("output target 'file' needs an output path"),
        },
    }
}

fn to_pretty_json(values: &FormValues) -> Result<String> {
    serde_json::to_string_pretty(values).context("failed to serialize form values")
}

/// Buffers submissions and prints them once the terminal is restored.
///
/// Writing to stdout while the alternate screen is active would be lost.
pub struct StdoutHandler<W: Write = io::Stdout> {
    out: W,
    pending: Vec<String>,
}

impl StdoutHandler {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for StdoutHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> StdoutHandler<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            pending: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SubmitHandler for StdoutHandler<W> {
    fn on_submit(&mut self, values: &FormValues) -> Result<()> {
        self.pending.push(to_pretty_json(values)?);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        for json in self.pending.drain(..) {
            writeln!(self.out, "{json}")?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn describe(&self) -> String {
        "stdout".to_string()
    }
}

/// Writes each submission to a JSON file, replacing the previous one
pub struct JsonFileHandler {
    path: PathBuf,
}

impl JsonFileHandler {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl SubmitHandler for JsonFileHandler {
    fn on_submit(&mut self, values: &FormValues) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = to_pretty_json(values)?;
        fs::write(&self.path, content)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        tracing::info!("Wrote form values to {}", self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Copies each submission to the system clipboard
pub struct ClipboardHandler;

impl SubmitHandler for ClipboardHandler {
    fn on_submit(&mut self, values: &FormValues) -> Result<()> {
        use arboard::Clipboard;
        let content = to_pretty_json(values)?;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(content)?;
        Ok(())
    }

    fn describe(&self) -> String {
        "clipboard".to_string()
    }
}
