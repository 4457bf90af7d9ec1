use std::collections::HashSet;

use crate::ir::Diagnostic;

/// Drops every diagnostic whose `(file, line, message)` was already seen,
/// keeping the first occurrence and the order of the survivors.
pub fn retain_first(diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    let mut seen: HashSet<(Option<String>, Option<u32>, String)> = HashSet::new();
    diagnostics
        .into_iter()
        .filter(|d| {
            let fresh = seen.insert((d.file.clone(), d.line, d.message.clone()));
            if !fresh {
                log::debug!("dropping duplicate diagnostic: {}", d.message);
            }
            fresh
        })
        .collect()
}
