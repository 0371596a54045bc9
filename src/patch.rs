//! Patch module.
//! Read-modify-write of one script entry: read and close the file, patch in memory,
//! then truncate and rewrite it.
//! No lock is taken between the read and the write; a concurrent edit in that window is lost.
//! The rewrite is not crash-safe either (no temp file + rename).

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::{BuildCommand, SCRIPT_NAME, TARGET_PATH};
use crate::document::ConfigDocument;
use crate::error::{PatchError, Result};

/// What a patch did, or would do for a dry run.
#[derive(Clone, Debug, PartialEq)]
pub struct PatchOutcome {
    /// Value of the entry before patching, `None` if it did not exist.
    pub previous: Option<Value>,
    /// False when the entry already held the command.
    pub changed: bool,
}

impl PatchOutcome {
    fn new(previous: Option<Value>, command: &BuildCommand) -> Self {
        let changed = previous.as_ref().and_then(Value::as_str) != Some(command.as_str());
        Self { previous, changed }
    }
}

/// Overwrites `scripts["build:cf"]` in a package.json.
#[derive(Clone, Debug)]
pub struct ConfigPatcher {
    path: PathBuf,
    command: BuildCommand,
}

impl Default for ConfigPatcher {
    fn default() -> Self {
        Self::new(TARGET_PATH, BuildCommand::default())
    }
}

impl ConfigPatcher {
    pub fn new<P: AsRef<Path>>(path: P, command: BuildCommand) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            command,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the target file. The handle is closed before this returns.
    pub fn load(&self) -> Result<ConfigDocument> {
        let span = tracing::debug_span!("patch::load", path = ?self.path);
        let _enter = span.enter();

        let text = fs::read_to_string(&self.path).map_err(|source| PatchError::Read {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(bytes = text.len(), "read target file");

        let value: Value = serde_json::from_str(&text).map_err(|source| PatchError::Parse {
            path: self.path.clone(),
            source,
        })?;

        ConfigDocument::from_value(value)
    }

    /// Loads the file and patches the document in memory.
    fn apply(&self) -> Result<(ConfigDocument, PatchOutcome)> {
        let mut document = self.load()?;
        let previous = document.set_script(SCRIPT_NAME, &self.command)?;
        let outcome = PatchOutcome::new(previous, &self.command);

        Ok((document, outcome))
    }

    /// Applies the patch in memory only and reports the result. Nothing is written.
    #[tracing::instrument(level = "debug", skip(self), fields(path = ?self.path))]
    pub fn plan(&self) -> Result<PatchOutcome> {
        self.apply().map(|(_, outcome)| outcome)
    }

    /// Patches the file on disk.
    ///
    /// The file is rewritten even when the entry already matches, so repeated runs
    /// settle on the same bytes. Any error before the write leaves the file as it was.
    #[tracing::instrument(level = "debug", skip(self), fields(path = ?self.path))]
    pub fn run(&self) -> Result<PatchOutcome> {
        let (document, outcome) = self.apply()?;

        match &outcome.previous {
            Some(previous) if outcome.changed => {
                tracing::info!(script = SCRIPT_NAME, %previous, "replacing script")
            }
            Some(_) => tracing::info!(script = SCRIPT_NAME, "script already up to date"),
            None => tracing::info!(script = SCRIPT_NAME, "adding script"),
        }

        let text = document.to_pretty_string()?;
        fs::write(&self.path, &text).map_err(|source| PatchError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(bytes = text.len(), "wrote target file");

        Ok(outcome)
    }
}
