//! Operations over `/`-separated path components.
//!
//! Virtual paths are plain UTF-8 text. These functions carry the exact
//! string contracts the canonicaliser depends on; none of them touch the
//! filesystem, and all of them are total over arbitrary input. Prefix and
//! suffix arguments may end in a separator but should otherwise be
//! normalised (no consecutive separators).

/// Separator between path components.
pub const SEPARATOR: char = '/';

/// Returns true when `path` is absolute, i.e. begins with a separator.
#[must_use]
pub fn is_absolute(path: &str) -> bool {
    path.starts_with(SEPARATOR)
}

/// Returns true when `path` begins with `prefix` on a component boundary.
///
/// `"/foo/bar"` starts with `"/foo"` or `"/foo/"`, but not with `"/f"` or
/// `"/foo/bar/"`: the match must cover whole components, so it holds when
/// the paths are equal, `prefix` ends in a separator, or the character in
/// `path` immediately after the match is a separator.
#[must_use]
pub fn starts_with_path(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix).is_some_and(|rest| {
        rest.is_empty()
            || prefix.is_empty()
            || prefix.ends_with(SEPARATOR)
            || rest.starts_with(SEPARATOR)
    })
}

/// Appends `tail` to `path` in place, with exactly one separator between
/// the two contributions.
///
/// An empty `tail` leaves `path` untouched; appending to an empty `path`
/// adopts `tail` unchanged.
pub fn append_component(path: &mut String, tail: &str) {
    if tail.is_empty() {
        return;
    }
    if path.is_empty() {
        path.push_str(tail);
        return;
    }
    if !path.ends_with(SEPARATOR) {
        path.push(SEPARATOR);
    }
    path.push_str(tail.strip_prefix(SEPARATOR).unwrap_or(tail));
}

/// Returns `head` joined with `tail` with a single separator between them.
///
/// Existing leading and trailing separators at the join point are not
/// duplicated, and an empty side degenerates to the other side unchanged:
/// joining `""` with `"abc"` is `"abc"`, and joining `"/"` with `""` is
/// `"/"`.
#[must_use]
pub fn join_components(head: &str, tail: &str) -> String {
    let mut joined = String::with_capacity(head.len() + tail.len() + 1);
    joined.push_str(head);
    append_component(&mut joined, tail);
    joined
}

/// Splits off the part of `path` before the first separator.
///
/// Exactly one separator is consumed: `"abc//def"` splits into `"abc"` and
/// `"/def"`, not `"def"`. Without a separator the whole string is the head
/// and the remainder is empty.
#[must_use]
pub fn split_first_component(path: &str) -> (&str, &str) {
    path.split_once(SEPARATOR).unwrap_or((path, ""))
}

/// Splits off the part of `path` after the last separator.
///
/// Exactly one separator is consumed: `"abc//def"` splits into `"abc/"`
/// and `"def"`. Without a separator the remainder is empty and the whole
/// string is the tail.
#[must_use]
pub fn split_last_component(path: &str) -> (&str, &str) {
    path.rsplit_once(SEPARATOR).unwrap_or(("", path))
}

/// Replaces `prefix` with `replacement` when `path` starts with `prefix`
/// on a component boundary, returning `None` otherwise.
///
/// `"/foo/bar"` becomes `"/FOO/bar"` when replacing `"/foo"` or `"/foo/"`
/// with `"/FOO"` or `"/FOO/"`; prefixes `"/f"` and `"/foo/bar/"` are no
/// match and leave the caller's path to stand.
#[must_use]
pub fn replace_path_prefix(path: &str, prefix: &str, replacement: &str) -> Option<String> {
    if !starts_with_path(path, prefix) {
        return None;
    }
    path.strip_prefix(prefix)
        .map(|rest| join_components(replacement, rest))
}
