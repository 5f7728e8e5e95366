//! Keeps user-supplied text (entity names, alias arguments) on a single log
//! line.

/// Longest preview of user text kept in a log record.
pub const MAX_PREVIEW: usize = 64;

/// Escape a name for single-line logging.
///
/// Control characters use their Rust escape form (`\n`, `\t`, `\u{7}`) and
/// a literal backslash is doubled, so an escaped record cannot be confused
/// with a raw one. Names longer than [`MAX_PREVIEW`] characters are cut
/// with an ellipsis.
pub fn escape_log(name: &str) -> String {
    let mut out = String::with_capacity(name.len().min(MAX_PREVIEW) + 2);
    let mut chars = name.chars();
    for c in chars.by_ref().take(MAX_PREVIEW) {
        if c == '\\' || c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    if chars.next().is_some() {
        out.push('…');
    }
    out
}
