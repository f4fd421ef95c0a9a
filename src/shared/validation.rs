use lazy_static::lazy_static;
use regex::Regex;

use crate::shared::constants::ALLOWED_EXTENSIONS;

lazy_static! {
    /// Characters that never survive into a stored file name
    /// - Kept: ASCII letters, digits, "_", ".", "-"
    pub static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_.-]").unwrap();
}

/// Last path component of a client supplied file name.
///
/// Both `/` and `\` count as separators since browsers on Windows may send
/// the full local path.
pub fn base_name(filename: &str) -> &str {
    filename.rsplit(['/', '\\']).next().unwrap_or(filename)
}

/// Extension after the last `.`, if any
pub fn file_extension(filename: &str) -> Option<&str> {
    filename.rsplit_once('.').map(|(_, ext)| ext)
}

/// Check the extension of `filename` against the upload allow-list
pub fn is_extension_allowed(filename: &str) -> bool {
    file_extension(filename)
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Reduce a file name to a form that is safe to use on disk.
///
/// Path components are dropped, non-ASCII characters removed, whitespace runs
/// joined with `_`, anything outside `[A-Za-z0-9_.-]` stripped and leading or
/// trailing `.`/`_` trimmed. The result may be empty.
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = base_name(filename)
        .chars()
        .filter(|c| c.is_ascii())
        .collect();
    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = UNSAFE_FILENAME_CHARS.replace_all(&joined, "");

    cleaned.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Whether a path parameter names a single entry directly inside a store
pub fn is_safe_path_segment(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}
