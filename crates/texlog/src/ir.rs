use serde::{Deserialize, Serialize};

/// Which bucket of the [`ParseResult`] a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warning,
    /// Overfull/underfull box notices.
    Typesetting,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Typesetting => "typesetting",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic recovered from the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Line in the source file, when the log gives one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    pub message: String,
    /// File that was open when the diagnostic was printed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub level: Level,
}

/// A file the engine opened, with the files it opened in turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludedFile {
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<IncludedFile>,
}

/// Everything recovered from one log.
///
/// `all` keeps discovery order; the three buckets partition it by [`Level`]
/// and keep the same relative order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub typesetting: Vec<Diagnostic>,
    pub all: Vec<Diagnostic>,
    /// Files opened during the run, outermost first.
    #[serde(default)]
    pub files: Vec<IncludedFile>,
}

impl ParseResult {
    /// Buckets an ordered stream of diagnostics by level.
    pub fn assemble<I>(diagnostics: I, files: Vec<IncludedFile>) -> Self
    where
        I: IntoIterator<Item = Diagnostic>,
    {
        let mut result = Self {
            files,
            ..Self::default()
        };
        for diagnostic in diagnostics {
            let bucket = match diagnostic.level {
                Level::Error => &mut result.errors,
                Level::Warning => &mut result.warnings,
                Level::Typesetting => &mut result.typesetting,
            };
            bucket.push(diagnostic.clone());
            result.all.push(diagnostic);
        }
        result
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn by_level(&self, level: Level) -> &[Diagnostic] {
        match level {
            Level::Error => &self.errors,
            Level::Warning => &self.warnings,
            Level::Typesetting => &self.typesetting,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
