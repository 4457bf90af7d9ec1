use crate::classify::{self, Limits};
use crate::dedup;
use crate::ir::{Diagnostic, Level, ParseResult};
use crate::options::ParseOptions;
use crate::stack::FileStack;
use crate::text::LogText;

/// A single-pass scanner for LaTeX logs.
///
/// `LogParser` walks the log line by line with an explicit cursor. Lines
/// that open a diagnostic are classified and stepped over as a unit; every
/// other line is fed to the [`FileStack`] so that diagnostics can be
/// attributed to the file the engine was reading at the time.
///
/// The parser holds only its options. All scan state is local to
/// [`LogParser::parse`], so one parser can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct LogParser {
    options: ParseOptions,
}

impl LogParser {
    /// Creates a parser with [`ParseOptions::default`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses a complete log.
    ///
    /// # Arguments
    ///
    /// * `input` - The full log text, with any line-ending convention.
    ///
    /// # Returns
    ///
    /// The diagnostics found, bucketed by level, and the tree of files the
    /// engine opened.
    pub fn parse(&self, input: &str) -> ParseResult {
        let text = LogText::new(input, self.options.wrap_width);
        let limits = Limits {
            context_lines: self.options.context_lines,
            continuation_limit: self.options.continuation_limit,
        };

        let mut stack = FileStack::new();
        let mut found = Vec::new();
        let mut cursor = 0;

        while cursor < text.len() {
            match classify::classify(&text, cursor, limits) {
                Some(matched) => {
                    found.push(Diagnostic {
                        line: matched.line,
                        message: matched.message,
                        file: stack.current().map(str::to_string),
                        level: matched.shape.level(),
                    });
                    cursor += matched.consumed.max(1);
                }
                None => {
                    if let Some(line) = text.line(cursor) {
                        stack.observe(line);
                    }
                    cursor += 1;
                }
            }
        }

        if stack.depth() > 0 {
            log::debug!("{} file group(s) still open at end of log", stack.depth());
        }

        let found = if self.options.ignore_duplicates {
            dedup::retain_first(found)
        } else {
            found
        };
        let result = ParseResult::assemble(found, stack.finish());

        log::debug!(
            "parsed {} lines: {} errors, {} warnings, {} typesetting",
            text.len(),
            result.by_level(Level::Error).len(),
            result.by_level(Level::Warning).len(),
            result.by_level(Level::Typesetting).len(),
        );
        result
    }
}

/// Parses `input` with the given options.
pub fn parse(input: &str, options: &ParseOptions) -> ParseResult {
    LogParser::with_options(options.clone()).parse(input)
}
