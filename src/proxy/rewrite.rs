//! Prefix stripping for relayed requests.

/// Strip `prefix` from a request path, preserving the query string.
///
/// Returns `None` when the path is not under `prefix` (a path segment
/// boundary is required, so `/apix` is not under `/api`). The result always
/// starts with `/`.
pub fn strip_prefix(path: &str, query: Option<&str>, prefix: &str) -> Option<String> {
    let rest = path.strip_prefix(prefix)?;
    if !(rest.is_empty() || rest.starts_with('/')) {
        return None;
    }

    let new_path = if rest.is_empty() { "/" } else { rest };
    Some(match query {
        Some(query) => format!("{new_path}?{query}"),
        None => new_path.to_string(),
    })
}
