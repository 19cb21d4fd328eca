//! Path segment helpers
//!
//! Paths are treated as plain strings split on `/`. No normalization is done:
//! empty segments (`//`) and trailing slashes are kept as they are, because the
//! hosting layer matches rules as literal string prefixes.

/// Marker that identifies a full URL (`http://` and `https://`).
pub const SCHEME_MARKER: &str = "http";

/// True if `value` is a full URL rather than a site path.
#[inline]
pub fn is_absolute(value: &str) -> bool {
    value.starts_with(SCHEME_MARKER)
}

/// Iterate the segments of a path, ignoring the empty component before a
/// leading `/`.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.strip_prefix('/').unwrap_or(path).split('/')
}

/// Number of segments in a path. `"/"` has a single empty segment.
pub fn segment_count(path: &str) -> usize {
    segments(path).count()
}

/// Keep the first `n` segments of `path`, re-rooted at `/`.
///
/// Paths with fewer than `n` segments are returned whole.
pub fn truncate_to_segments(path: &str, n: usize) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    for segment in segments(path).take(n) {
        out.push('/');
        out.push_str(segment);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Destination of a prefix rule `prefix -> target` applied to `path`, or
/// `None` if the rule does not match.
pub fn rewrite(prefix: &str, target: &str, path: &str) -> Option<String> {
    let rest = path.strip_prefix(prefix)?;
    let mut out = String::with_capacity(target.len() + rest.len());
    out.push_str(target);
    out.push_str(rest);
    Some(out)
}

/// True if applying `prefix -> target` to `path` yields exactly `expected`.
///
/// Paths the rule does not match count as preserved.
pub fn rewrite_preserves(prefix: &str, target: &str, path: &str, expected: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => expected.strip_prefix(target) == Some(rest),
        None => true,
    }
}
