//! Line classification.
//!
//! Each matcher looks at the line under the cursor (plus a bounded window
//! after it) and either declines or returns a [`Matched`] describing the
//! diagnostic and how many lines it spans. Matchers are tried in a fixed
//! priority order and the first hit wins.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::Level;
use crate::text::LogText;

static FATAL_ABORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^!\s*==> Fatal error occurred").unwrap());
static LATEX_ERROR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^!\s*((?:LaTeX3?|(?:Package|Class|Module) (?P<name>\S+)) Error:.*)$").unwrap()
});
static TEX_ERROR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^!\s*(\S.*)$").unwrap());
static RUNAWAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Runaway (?:argument|definition|preamble|text)\?").unwrap());
static BAD_BOX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:Over|Under)full \\[hv]box\b").unwrap());
static BAD_BOX_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bat lines? (\d+)").unwrap());
static LATEX_WARNING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^LaTeX Warning: (.*)$").unwrap());
static NAMED_WARNING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:Package|Class) (?P<pkg>\S+)|LaTeX (?P<sub>\S+)) Warning:").unwrap()
});
static INPUT_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"on input line (\d+)").unwrap());
static LINE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^l\.(\d+)").unwrap());

/// The diagnostic shapes the classifier recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `!  ==> Fatal error occurred, no output PDF file produced!`
    FatalAbort,
    /// `! LaTeX Error: ...`, `! Package foo Error: ...`
    LatexError,
    /// Any other `! ...` line.
    TexError,
    RunawayArgument,
    /// Overfull/underfull `\hbox`/`\vbox`.
    BadBox,
    Warning,
}

impl Shape {
    pub fn level(self) -> Level {
        match self {
            Shape::FatalAbort | Shape::LatexError | Shape::TexError | Shape::RunawayArgument => {
                Level::Error
            }
            Shape::BadBox => Level::Typesetting,
            Shape::Warning => Level::Warning,
        }
    }
}

/// A recognized diagnostic starting at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matched {
    pub shape: Shape,
    pub message: String,
    pub line: Option<u32>,
    /// Lines the scanner must step over, at least 1.
    pub consumed: usize,
}

/// Lookahead bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub context_lines: usize,
    pub continuation_limit: usize,
}

type Matcher = fn(&LogText<'_>, usize, Limits) -> Option<Matched>;

const MATCHERS: [Matcher; 6] = [
    fatal_abort,
    latex_error,
    tex_error,
    runaway_argument,
    bad_box,
    warning,
];

/// Classifies the line at `at`. Returns `None` for ordinary log chatter.
pub fn classify(text: &LogText<'_>, at: usize, limits: Limits) -> Option<Matched> {
    MATCHERS.iter().find_map(|matcher| matcher(text, at, limits))
}

/// Whether `line` opens a diagnostic of any shape.
pub fn starts_diagnostic(line: &str) -> bool {
    line.starts_with('!') || RUNAWAY.is_match(line) || BAD_BOX.is_match(line) || is_warning(line)
}

fn is_warning(line: &str) -> bool {
    LATEX_WARNING.is_match(line) || NAMED_WARNING.is_match(line)
}

fn fatal_abort(text: &LogText<'_>, at: usize, _limits: Limits) -> Option<Matched> {
    let line = text.line(at)?;
    if !FATAL_ABORT.is_match(line) {
        return None;
    }
    Some(Matched {
        shape: Shape::FatalAbort,
        // Only the `! ` marker goes; TeX's own indent stays in the message.
        message: line.strip_prefix("! ").unwrap_or(line).to_string(),
        line: None,
        consumed: 1,
    })
}

fn latex_error(text: &LogText<'_>, at: usize, limits: Limits) -> Option<Matched> {
    let caps = LATEX_ERROR.captures(text.line(at)?)?;
    let message = caps[1].trim().to_string();
    let prefix = caps.name("name").map(|m| m.as_str());
    Some(with_error_context(text, at, limits, Shape::LatexError, message, prefix))
}

fn tex_error(text: &LogText<'_>, at: usize, limits: Limits) -> Option<Matched> {
    let caps = TEX_ERROR.captures(text.line(at)?)?;
    let message = caps[1].trim().to_string();
    Some(with_error_context(text, at, limits, Shape::TexError, message, None))
}

/// Absorbs the rest of a multi-line error message, then looks for the
/// `l.<N>` marker TeX prints under the error context. Everything up to the
/// marker belongs to this error.
fn with_error_context(
    text: &LogText<'_>,
    at: usize,
    limits: Limits,
    shape: Shape,
    mut message: String,
    prefix: Option<&str>,
) -> Matched {
    let absorbed = absorb_continuation(text, at + 1, &mut message, prefix, limits.continuation_limit);
    let after = at + 1 + absorbed;

    match find_line_marker(text, after, limits.context_lines) {
        Some((line, marker_at)) => Matched {
            shape,
            message,
            line: Some(line),
            consumed: marker_at + 1 - at,
        },
        None => Matched {
            shape,
            line: input_line(&message),
            message,
            consumed: after - at,
        },
    }
}

fn runaway_argument(text: &LogText<'_>, at: usize, limits: Limits) -> Option<Matched> {
    let header = text.line(at)?;
    if !RUNAWAY.is_match(header) {
        return None;
    }
    let mut message = header.trim().to_string();
    let mut consumed = 1;
    if let Some(preview) = text.line(at + 1) {
        if !preview.trim().is_empty() && !starts_diagnostic(preview) && !LINE_MARKER.is_match(preview) {
            push_joined(&mut message, preview);
            consumed += 1;
        }
    }
    // The TeX error that follows reports the same marker; leave it in place.
    let line = find_line_marker(text, at + consumed, limits.context_lines).map(|(line, _)| line);
    Some(Matched {
        shape: Shape::RunawayArgument,
        message,
        line,
        consumed,
    })
}

fn bad_box(text: &LogText<'_>, at: usize, _limits: Limits) -> Option<Matched> {
    let line = text.line(at)?;
    if !BAD_BOX.is_match(line) {
        return None;
    }
    Some(Matched {
        shape: Shape::BadBox,
        message: line.trim().to_string(),
        line: BAD_BOX_LINE
            .captures(line)
            .and_then(|caps| caps[1].parse().ok()),
        consumed: 1,
    })
}

fn warning(text: &LogText<'_>, at: usize, limits: Limits) -> Option<Matched> {
    let line = text.line(at)?;
    let (mut message, prefix) = if let Some(caps) = LATEX_WARNING.captures(line) {
        (caps[1].trim().to_string(), None)
    } else {
        let caps = NAMED_WARNING.captures(line)?;
        let name = caps.name("pkg").or_else(|| caps.name("sub")).map(|m| m.as_str());
        (line.trim().to_string(), name)
    };
    let absorbed = absorb_continuation(text, at + 1, &mut message, prefix, limits.continuation_limit);
    Some(Matched {
        shape: Shape::Warning,
        line: input_line(&message),
        message,
        consumed: 1 + absorbed,
    })
}

/// Appends the lines that continue `message`, returning how many were taken.
///
/// A line continues the message when it carries the `(<prefix>)` tag TeX
/// puts in front of multi-line package messages, or when the message so
/// far has no closing punctuation. Blank lines, diagnostic starts, `l.<N>`
/// markers and `<...>` context lines always end the message.
fn absorb_continuation(
    text: &LogText<'_>,
    start: usize,
    message: &mut String,
    prefix: Option<&str>,
    limit: usize,
) -> usize {
    let tag = prefix.map(|name| format!("({name})"));
    let mut absorbed = 0;

    while absorbed < limit {
        let Some(line) = text.line(start + absorbed) else {
            break;
        };
        if line.trim().is_empty()
            || starts_diagnostic(line)
            || LINE_MARKER.is_match(line)
            || line.starts_with('<')
        {
            break;
        }
        let piece = match tag.as_deref().and_then(|tag| line.strip_prefix(tag)) {
            Some(rest) => rest,
            None if !ends_complete(message) => line,
            None => break,
        };
        push_joined(message, piece);
        absorbed += 1;
    }

    absorbed
}

fn push_joined(message: &mut String, piece: &str) {
    let piece = piece.trim();
    if piece.is_empty() {
        return;
    }
    if !message.is_empty() {
        message.push(' ');
    }
    message.push_str(piece);
}

fn ends_complete(message: &str) -> bool {
    message.trim_end().ends_with(['.', '!', '?'])
}

/// Searches `window` lines from `from` for an `l.<N>` marker. Gives up at
/// the start of anything that is clearly a different diagnostic.
fn find_line_marker(text: &LogText<'_>, from: usize, window: usize) -> Option<(u32, usize)> {
    for idx in from..from.saturating_add(window) {
        let line = text.line(idx)?;
        if let Some(caps) = LINE_MARKER.captures(line) {
            return caps[1].parse().ok().map(|n| (n, idx));
        }
        if FATAL_ABORT.is_match(line)
            || RUNAWAY.is_match(line)
            || BAD_BOX.is_match(line)
            || is_warning(line)
        {
            return None;
        }
    }
    None
}

/// The last `on input line N` in `message`.
fn input_line(message: &str) -> Option<u32> {
    INPUT_LINE
        .captures_iter(message)
        .last()
        .and_then(|caps| caps[1].parse().ok())
}
