use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::OptionsError;
use crate::text::LOG_WRAP_LIMIT;

static DEFAULT_IGNORE_DUPLICATES: AtomicBool = AtomicBool::new(false);

/// Sets the process-wide default for [`ParseOptions::ignore_duplicates`].
///
/// Only options created afterwards (through `Default` or deserialization
/// without the key) pick up the new value.
pub fn set_default_ignore_duplicates(enabled: bool) {
    DEFAULT_IGNORE_DUPLICATES.store(enabled, Ordering::Relaxed);
}

pub fn default_ignore_duplicates() -> bool {
    DEFAULT_IGNORE_DUPLICATES.load(Ordering::Relaxed)
}

/// Default bound on the forward search for an error's `l.<N>` marker.
pub const DEFAULT_CONTEXT_LINES: usize = 12;
/// Default cap on continuation lines absorbed into one message.
pub const DEFAULT_CONTINUATION_LIMIT: usize = 10;

/// Knobs for a single parse call.
///
/// Deserializes from a JSON options document; missing keys take their
/// defaults and unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Collapse diagnostics with identical `(file, line, message)`.
    #[serde(alias = "ignoreDuplicates")]
    pub ignore_duplicates: bool,
    /// Column at which the engine hard-wrapped the log. `None` leaves lines as is.
    #[serde(alias = "wrapWidth")]
    pub wrap_width: Option<usize>,
    #[serde(alias = "contextLines")]
    pub context_lines: usize,
    #[serde(alias = "continuationLimit")]
    pub continuation_limit: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            ignore_duplicates: default_ignore_duplicates(),
            wrap_width: Some(LOG_WRAP_LIMIT),
            context_lines: DEFAULT_CONTEXT_LINES,
            continuation_limit: DEFAULT_CONTINUATION_LIMIT,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore_duplicates(mut self, enabled: bool) -> Self {
        self.ignore_duplicates = enabled;
        self
    }

    pub fn wrap_width(mut self, width: Option<usize>) -> Self {
        self.wrap_width = width;
        self
    }

    /// Loads options from a JSON document such as `{"ignoreDuplicates": true}`.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        match self.wrap_width {
            Some(width) if width < 2 => Err(OptionsError::InvalidWrapWidth(width)),
            _ => Ok(()),
        }
    }
}
