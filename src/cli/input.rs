// Readline input handler with in-memory history and editing support
//
// History is never written to disk: conversations may contain sensitive
// disclosures.

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub struct InputHandler {
    editor: DefaultEditor,
}

impl InputHandler {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().context("Failed to initialize readline editor")?;
        Ok(Self { editor })
    }

    /// Next trimmed line, or `None` once the user hits Ctrl+C or Ctrl+D
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(raw) => {
                let message = raw.trim();
                if !message.is_empty() {
                    self.editor
                        .add_history_entry(message)
                        .context("Failed to remember input line")?;
                }
                Ok(Some(message.to_string()))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err).context("Failed to read from terminal"),
        }
    }

    /// Forget everything typed so far (used by /new)
    pub fn clear_history(&mut self) -> Result<()> {
        self.editor
            .clear_history()
            .context("Failed to clear input history")
    }
}
