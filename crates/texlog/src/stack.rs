use crate::ir::IncludedFile;

/// One open `(file ...` group.
#[derive(Debug)]
struct Frame {
    path: String,
    /// Files opened (and already closed) while this one was on top.
    files: Vec<IncludedFile>,
    /// Non-file `(` seen inside this group that are still waiting for their `)`.
    prose_parens: usize,
}

impl Frame {
    fn into_node(self) -> IncludedFile {
        IncludedFile {
            path: self.path,
            files: self.files,
        }
    }
}

/// Tracks which input file the engine is reading.
///
/// TeX prints `(path` when it opens a file and `)` when it closes it. The
/// tracker keeps those groups as an explicit stack and records every file
/// that was opened as a tree, in opening order.
#[derive(Debug, Default)]
pub struct FileStack {
    frames: Vec<Frame>,
    roots: Vec<IncludedFile>,
    /// Prose parentheses opened while no file was open.
    root_parens: usize,
}

impl FileStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// The file diagnostics should be attributed to right now.
    pub fn current(&self) -> Option<&str> {
        self.frames.last().map(|f| f.path.as_str())
    }

    /// Number of open file groups.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Applies every parenthesis transition in `line`, left to right.
    pub fn observe(&mut self, line: &str) {
        let mut rest = line;
        while let Some(pos) = rest.find(['(', ')']) {
            let after = &rest[pos + 1..];
            if rest[pos..].starts_with('(') {
                let token = path_token(after);
                if is_path_like(token) {
                    self.enter(token);
                    rest = &after[token.len()..];
                } else {
                    *self.prose_parens_mut() += 1;
                    rest = after;
                }
            } else {
                self.close();
                rest = after;
            }
        }
    }

    fn enter(&mut self, path: &str) {
        log::trace!("file enter: {path}");
        self.frames.push(Frame {
            path: path.to_string(),
            files: Vec::new(),
            prose_parens: 0,
        });
    }

    fn close(&mut self) {
        let prose = self.prose_parens_mut();
        if *prose > 0 {
            *prose -= 1;
            return;
        }
        match self.frames.pop() {
            Some(frame) => {
                log::trace!("file exit: {}", frame.path);
                let node = frame.into_node();
                match self.frames.last_mut() {
                    Some(parent) => parent.files.push(node),
                    None => self.roots.push(node),
                }
            }
            None => log::debug!("ignoring unmatched closing parenthesis"),
        }
    }

    fn prose_parens_mut(&mut self) -> &mut usize {
        match self.frames.last_mut() {
            Some(frame) => &mut frame.prose_parens,
            None => &mut self.root_parens,
        }
    }

    /// Closes whatever is still open and returns the tree of included files.
    pub fn finish(mut self) -> Vec<IncludedFile> {
        while let Some(frame) = self.frames.pop() {
            let node = frame.into_node();
            match self.frames.last_mut() {
                Some(parent) => parent.files.push(node),
                None => self.roots.push(node),
            }
        }
        self.roots
    }
}

/// The run of characters after `(` that could name a file.
fn path_token(after_paren: &str) -> &str {
    let end = after_paren
        .find(|c: char| c.is_whitespace() || c == '(' || c == ')')
        .unwrap_or(after_paren.len());
    &after_paren[..end]
}

/// Distinguishes `(./chapter.tex` from prose such as `(see the` or
/// `(29.11179pt too wide)`.
fn is_path_like(token: &str) -> bool {
    if token.is_empty() || token.starts_with('\\') {
        // `\OT1/cmr/m/n/10` is a font selector inside box dumps.
        return false;
    }
    if token.contains('/') {
        return true;
    }
    match token.rsplit_once('.') {
        Some((stem, ext)) => {
            !stem.is_empty()
                && ext.starts_with(|c: char| c.is_ascii_alphabetic())
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        }
        None => false,
    }
}
