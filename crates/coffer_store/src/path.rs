//! Splitting of delimiter-joined property paths.

/// Path segment delimiter.
pub(crate) const DELIMITER: char = ':';

/// Splits a path into its first segment and the remaining path.
///
/// The remainder is empty when the path holds a single segment.
pub(crate) fn split_first(path: &str) -> (&str, &str) {
    match path.split_once(DELIMITER) {
        Some((first, rest)) => (first, rest),
        None => (path, ""),
    }
}
