//! Request-to-path resolution.
//!
//! Pure URL-to-path mapping: no I/O, no state. The view resolver turns a
//! request URL's path component into a filesystem-relative path (extension
//! added by the caller); the asset resolver composes an absolute path under
//! a configured root, using the URL's host segment as an optional
//! subdirectory namespace.
//!
//! # Partial percent-decoding
//!
//! Only percent-encoded spaces (`%20`) are decoded; every other percent
//! sequence passes through unresolved. This is a known limitation kept for
//! compatibility with the URLs the navigation layer produces — template
//! paths with other reserved characters will not resolve. Do not upgrade to
//! full decoding without flagging the behavior change to embedders.

use std::path::{Path, PathBuf};

use url::Url;

/// Reserved query key carrying the original navigation id, used to
/// correlate a request back to its view-data entry.
pub const VIEW_ID_PARAM: &str = "_view";

/// Resolves a request URL string to a filesystem-relative template path.
///
/// Scheme, host and query are ignored; the single leading separator the
/// URL parser guarantees on the path component is stripped so the result
/// joins cleanly under a view root. The result carries no extension.
///
/// # Errors
///
/// Propagates the URL parser's error on malformed input; nothing else
/// fails.
pub fn resolve(url_str: &str) -> Result<PathBuf, url::ParseError> {
    Ok(view_path(&Url::parse(url_str)?))
}

/// Resolves a parsed request URL to a filesystem-relative template path.
pub fn view_path(url: &Url) -> PathBuf {
    relative_path(url.path())
}

/// Composes the absolute on-disk path for an asset request.
///
/// The URL's host segment, when present, namespaces the asset under a
/// subdirectory: `asset://css/main.css` resolves to
/// `assets_root/css/main.css`, while `asset:///main.css` (empty host)
/// resolves directly under `assets_root`.
pub fn asset_path(url: &Url, assets_root: &Path) -> PathBuf {
    let mut path = assets_root.to_path_buf();
    if let Some(host) = url.host_str() {
        if !host.is_empty() {
            path.push(host);
        }
    }
    path.push(relative_path(url.path()));
    path
}

/// Extracts the reserved [`VIEW_ID_PARAM`] query value, if present.
pub fn view_id(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == VIEW_ID_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// Collects the query string into a JSON object of string values.
///
/// Returns `None` when the query is empty. Later duplicates of a key win,
/// mirroring the store's last-write-wins upsert.
pub fn query_data(url: &Url) -> Option<serde_json::Value> {
    let mut object = serde_json::Map::new();
    for (key, value) in url.query_pairs() {
        object.insert(
            key.into_owned(),
            serde_json::Value::String(value.into_owned()),
        );
    }
    if object.is_empty() {
        None
    } else {
        Some(serde_json::Value::Object(object))
    }
}

/// Decodes percent-encoded spaces to literal spaces. Nothing else is
/// decoded; see the module docs.
pub fn decode_spaces(input: &str) -> String {
    input.replace("%20", " ")
}

fn relative_path(path: &str) -> PathBuf {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    decode_spaces(trimmed)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_strips_leading_separator() {
        let path = resolve("view:///home").unwrap();
        assert_eq!(path, PathBuf::from("home"));
    }

    #[test]
    fn test_resolve_nested_path() {
        let path = resolve("view:///todos/list").unwrap();
        assert_eq!(path, PathBuf::from("todos").join("list"));
    }

    #[test]
    fn test_resolve_ignores_query() {
        let path = resolve("view:///home?_view=home&tab=2").unwrap();
        assert_eq!(path, PathBuf::from("home"));
    }

    #[test]
    fn test_resolve_decodes_spaces_only() {
        let path = resolve("view:///my%20page").unwrap();
        assert_eq!(path, PathBuf::from("my page"));

        // Other percent sequences pass through unresolved.
        let path = resolve("view:///a%2Fb").unwrap();
        assert_eq!(path, PathBuf::from("a%2Fb"));
    }

    #[test]
    fn test_resolve_literal_space_round_trips() {
        // The parser encodes a literal space on the way in; resolution
        // restores it.
        let url = Url::parse("view:///my page").unwrap();
        assert_eq!(url.path(), "/my%20page");
        assert_eq!(view_path(&url), PathBuf::from("my page"));
    }

    #[test]
    fn test_resolve_idempotent_on_plain_paths() {
        for path in ["home", "todos/list", "deep/nested/view"] {
            let resolved = resolve(&format!("view:///{}", path)).unwrap();
            assert_eq!(resolved, path.split('/').collect::<PathBuf>());
        }
    }

    #[test]
    fn test_resolve_malformed_url_propagates_parser_error() {
        assert!(resolve("not a url").is_err());
    }

    #[test]
    fn test_view_id_extraction() {
        let url = Url::parse("view:///home?_view=home&tab=2").unwrap();
        assert_eq!(view_id(&url), Some("home".to_string()));

        let url = Url::parse("view:///home?tab=2").unwrap();
        assert_eq!(view_id(&url), None);
    }

    #[test]
    fn test_query_data_collects_pairs() {
        let url = Url::parse("view:///home?a=1&b=two").unwrap();
        let data = query_data(&url).unwrap();
        assert_eq!(data["a"], "1");
        assert_eq!(data["b"], "two");
    }

    #[test]
    fn test_query_data_empty_is_none() {
        let url = Url::parse("view:///home").unwrap();
        assert_eq!(query_data(&url), None);
    }

    #[test]
    fn test_query_data_later_duplicate_wins() {
        let url = Url::parse("view:///home?a=1&a=2").unwrap();
        let data = query_data(&url).unwrap();
        assert_eq!(data["a"], "2");
    }

    #[test]
    fn test_asset_path_with_host_namespace() {
        let url = Url::parse("asset://css/main.css").unwrap();
        let path = asset_path(&url, Path::new("/app/assets"));
        assert_eq!(path, Path::new("/app/assets").join("css").join("main.css"));
    }

    #[test]
    fn test_asset_path_with_empty_host() {
        let url = Url::parse("asset:///main.css").unwrap();
        let path = asset_path(&url, Path::new("/app/assets"));
        assert_eq!(path, Path::new("/app/assets").join("main.css"));
    }

    #[test]
    fn test_asset_path_decodes_spaces() {
        let url = Url::parse("asset://img/photo%20one.png").unwrap();
        let path = asset_path(&url, Path::new("/a"));
        assert_eq!(path, Path::new("/a").join("img").join("photo one.png"));
    }
}
