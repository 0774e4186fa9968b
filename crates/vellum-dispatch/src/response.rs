//! Responses handed back to the host's interception mechanism.
//!
//! The host expects one of two shapes: an in-memory body with a MIME type
//! (the view scheme) or an on-disk path whose bytes the host delivers
//! itself (the asset scheme). [`SchemeResponse`] covers both.

use std::path::{Path, PathBuf};

use crate::error::DispatchError;

/// MIME type for rendered view bodies.
pub const HTML_MIME: &str = "text/html";

/// A response to an intercepted scheme request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemeResponse {
    /// An in-memory body with its MIME type.
    Body {
        /// The body's MIME type.
        mime_type: String,
        /// The body bytes.
        data: Vec<u8>,
    },

    /// An on-disk file for the host's file-delivery mechanism. Existence is
    /// the host's problem; no I/O happened to produce this.
    Path(PathBuf),
}

impl SchemeResponse {
    /// Creates a `text/html` body response.
    pub fn html(body: impl Into<Vec<u8>>) -> Self {
        SchemeResponse::Body {
            mime_type: HTML_MIME.to_string(),
            data: body.into(),
        }
    }

    /// Creates the empty successful response used for ignored requests.
    pub fn empty_html() -> Self {
        Self::html(Vec::new())
    }

    /// Returns the MIME type and bytes if this is a body response.
    pub fn as_body(&self) -> Option<(&str, &[u8])> {
        match self {
            SchemeResponse::Body { mime_type, data } => Some((mime_type, data)),
            SchemeResponse::Path(_) => None,
        }
    }

    /// Returns the file path if this is a path response.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            SchemeResponse::Path(path) => Some(path),
            SchemeResponse::Body { .. } => None,
        }
    }
}

/// Converts a dispatch failure into a defined `text/html` error payload.
///
/// Giving the host no response on a failed render leaves the requesting
/// page blank with nothing to debug against. A page that names the failure
/// keeps the interception contract satisfied and puts the error where the
/// developer is already looking.
pub fn error_response(err: &DispatchError) -> SchemeResponse {
    let detail = escape_html(&err.to_string());
    SchemeResponse::html(format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>Render failed</title></head>\n\
         <body>\n<h1>Render failed</h1>\n<pre>{}</pre>\n</body>\n</html>\n",
        detail
    ))
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_response_shape() {
        let response = SchemeResponse::html("<h1>Hi</h1>");
        let (mime, data) = response.as_body().unwrap();
        assert_eq!(mime, HTML_MIME);
        assert_eq!(data, b"<h1>Hi</h1>");
        assert!(response.as_path().is_none());
    }

    #[test]
    fn test_empty_html_is_successful_and_empty() {
        let response = SchemeResponse::empty_html();
        let (mime, data) = response.as_body().unwrap();
        assert_eq!(mime, HTML_MIME);
        assert!(data.is_empty());
    }

    #[test]
    fn test_error_response_names_the_failure() {
        let err = DispatchError::NotActivated;
        let response = error_response(&err);
        let (mime, data) = response.as_body().unwrap();
        assert_eq!(mime, HTML_MIME);
        let body = std::str::from_utf8(data).unwrap();
        assert!(body.contains("Render failed"));
        assert!(body.contains("no renderer activated"));
    }

    #[test]
    fn test_error_response_escapes_markup() {
        let err = DispatchError::Configuration("<script>alert(1)</script>".into());
        let response = error_response(&err);
        let (_, data) = response.as_body().unwrap();
        let body = std::str::from_utf8(data).unwrap();
        assert!(!body.contains("<script>"));
        assert!(body.contains("&lt;script&gt;"));
    }
}
