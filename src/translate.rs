//! Translation capability.
//!
//! Heading text can optionally be machine-translated before it enters the
//! outline. The capability is injected as a [`Translate`] implementation;
//! the classifier always falls back to the untranslated text when a call
//! fails, so no translator error ever aborts a document.

use std::io::Write;
use std::process::{Command, Stdio};
use std::time::Duration;

use crate::error::{Error, Result};

/// A pure text-to-text translation capability.
pub trait Translate: Send + Sync {
    /// Translate `text`. Implementations report failures as errors; callers
    /// in the outline pipeline recover by keeping the input text.
    fn translate(&self, text: &str) -> Result<String>;
}

/// Identity translator. The default, and the test double.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTranslator;

impl Translate for NoopTranslator {
    fn translate(&self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

/// Translator backed by an external command (e.g. `apertium ja-en`).
///
/// The text is written to the command's stdin and the translation read from
/// its stdout, with a bounded timeout. On timeout the child process is
/// abandoned; the worker thread reaps it once it exits.
#[derive(Debug, Clone)]
pub struct CommandTranslator {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandTranslator {
    /// Default timeout for one translation call.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a translator that pipes text through `program args...`.
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = String>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().collect(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Apertium translator for a language pair such as "ja-en".
    pub fn apertium(langpair: &str) -> Self {
        Self::new("apertium", [langpair.to_string()])
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Translate for CommandTranslator {
    fn translate(&self, text: &str) -> Result<String> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let program = self.program.clone();
        let args = self.args.clone();
        let input = text.to_string();

        std::thread::spawn(move || {
            let _ = tx.send(run_pipe(&program, &args, &input));
        });

        match rx.recv_timeout(self.timeout) {
            Ok(Ok(output)) => {
                let output = output.trim();
                if output.is_empty() {
                    Err(Error::Translation("empty output".to_string()))
                } else {
                    Ok(output.to_string())
                }
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(Error::Translation(format!(
                "timed out after {:?}",
                self.timeout
            ))),
        }
    }
}

/// Run a command, feeding `input` on stdin and collecting stdout.
fn run_pipe(program: &str, args: &[String], input: &str) -> Result<String> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| Error::Translation(format!("failed to spawn {}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(input.as_bytes())
            .map_err(|e| Error::Translation(format!("failed to write stdin: {}", e)))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| Error::Translation(format!("failed to read output: {}", e)))?;

    if !output.status.success() {
        return Err(Error::Translation(format!(
            "{} exited with {}",
            program, output.status
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_translator_identity() {
        let t = NoopTranslator;
        assert_eq!(t.translate("1. Introduction").unwrap(), "1. Introduction");
    }

    #[test]
    fn test_command_translator_pipes_text() {
        let t = CommandTranslator::new("cat", []);
        assert_eq!(t.translate("Hello world").unwrap(), "Hello world");
    }

    #[test]
    fn test_command_translator_missing_program() {
        let t = CommandTranslator::new("definitely-not-a-real-program-xyz", []);
        let err = t.translate("Hello").unwrap_err();
        assert!(matches!(err, Error::Translation(_)));
    }

    #[test]
    fn test_command_translator_empty_output() {
        let t = CommandTranslator::new("true", []);
        let err = t.translate("Hello").unwrap_err();
        assert!(matches!(err, Error::Translation(_)));
    }

    #[test]
    fn test_command_translator_timeout() {
        let t = CommandTranslator::new("sleep", ["5".to_string()])
            .with_timeout(Duration::from_millis(50));
        let err = t.translate("Hello").unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }
}
