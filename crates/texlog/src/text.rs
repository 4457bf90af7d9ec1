use std::borrow::Cow;

/// Column at which TeX engines hard-wrap their terminal and log output
/// (`max_print_line`).
pub const LOG_WRAP_LIMIT: usize = 79;

/// The log split into logical lines.
///
/// Line endings are normalized (`\r\n`, `\r` and `\n` are all accepted) and,
/// when a wrap width is given, physical lines that TeX broke at exactly that
/// column are glued back onto their continuation. Lines that were not joined
/// borrow from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogText<'a> {
    lines: Vec<Cow<'a, str>>,
}

impl<'a> LogText<'a> {
    /// Splits `input` into logical lines, undoing hard wraps at `wrap_width`.
    pub fn new(input: &'a str, wrap_width: Option<usize>) -> Self {
        let mut lines: Vec<Cow<'a, str>> = Vec::new();
        let mut joining = false;

        for physical in split_physical(input) {
            if joining {
                if let Some(last) = lines.last_mut() {
                    last.to_mut().push_str(physical);
                }
            } else {
                lines.push(Cow::Borrowed(physical));
            }
            joining = wrap_width.is_some_and(|width| is_hard_wrapped(physical, width));
        }

        Self { lines }
    }

    /// Returns the logical line at `index`, if any.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|l| l.as_ref())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.as_ref())
    }
}

/// A physical line was cut by the engine when it fills the wrap column
/// exactly. TeX's own `...` elisions happen to land on the column too and
/// are not continued.
fn is_hard_wrapped(physical: &str, width: usize) -> bool {
    physical.chars().count() == width && !physical.ends_with("...")
}

fn split_physical(input: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(input);
    std::iter::from_fn(move || {
        let text = rest?;
        match text.find(['\r', '\n']) {
            Some(pos) => {
                let skip = if text[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&text[pos + skip..]);
                Some(&text[..pos])
            }
            None => {
                rest = None;
                Some(text)
            }
        }
    })
}
