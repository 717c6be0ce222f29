//! URL and number micro-parsers shared by the extractors.
//!
//! Tieba's mobile markup hides most of its structure in query strings
//! (`kz=`, `pid=`, `src=`) and text prefixes (`3楼. `), so these helpers are
//! kept small and separately testable.

use std::sync::LazyLock;

use regex::Regex;

static QUALITY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"quality=[0-9]+").expect("valid quality pattern"));
static SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"size=b[0-9]+_[0-9]+").expect("valid size pattern"));
static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid digits pattern"));

/// Returns the raw (still percent-encoded) value of query parameter `name`.
///
/// Only whole parameter names match: looking up `src` in `?imgsrc=a&src=b`
/// yields `b`. Empty values are treated as absent.
///
/// ```rust
/// use tiebafetch_core::query::query_param;
///
/// assert_eq!(query_param("m?kz=123&pn=2", "kz"), Some("123"));
/// assert_eq!(query_param("m?kz=&pn=2", "kz"), None);
/// ```
pub fn query_param<'a>(url: &'a str, name: &str) -> Option<&'a str> {
    let without_fragment = url.split('#').next().unwrap_or(url);
    let (_, query) = without_fragment.split_once('?')?;

    query
        .split(['&', ';'])
        .filter_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .find(|value| !value.is_empty())
}

/// Percent-decodes a query value. `+` is left alone.
///
/// Invalid UTF-8 after decoding is replaced rather than rejected.
pub fn percent_decode(value: &str) -> String {
    match urlencoding::decode(value) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(value.as_bytes())).into_owned(),
    }
}

/// Extracts and decodes query parameter `name`.
pub fn decoded_param(url: &str, name: &str) -> Option<String> {
    query_param(url, name).map(percent_decode)
}

/// Rewrites an image URL to request the largest rendition.
///
/// `quality=<n>` becomes `quality=100` and `size=b<w>_<h>` becomes
/// `size=b2000_2000`. Both patterns match whole digit runs, so the rewrite
/// is idempotent.
///
/// ```rust
/// use tiebafetch_core::query::canonicalize_image_url;
///
/// let url = "http://m.tiebaimg.com/timg?wapp&quality=80&size=b150_10000";
/// assert_eq!(
///     canonicalize_image_url(url),
///     "http://m.tiebaimg.com/timg?wapp&quality=100&size=b2000_2000"
/// );
/// ```
pub fn canonicalize_image_url(url: &str) -> String {
    let url = QUALITY_RE.replace_all(url, "quality=100");
    SIZE_RE.replace_all(&url, "size=b2000_2000").into_owned()
}

/// Splits a leading run of ASCII digits off `s` and parses it.
///
/// Returns `None` when `s` does not start with a digit or the number
/// overflows.
pub fn parse_leading_integer<T: std::str::FromStr>(s: &str) -> Option<(T, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let value = s[..end].parse().ok()?;
    Some((value, &s[end..]))
}

/// The first run of digits anywhere in `s`.
pub fn first_integer<T: std::str::FromStr>(s: &str) -> Option<T> {
    DIGITS_RE.find(s)?.as_str().parse().ok()
}

/// Removes everything up to and including the first occurrence of `token`.
///
/// Leaves `s` untouched when `token` does not occur.
pub fn strip_through<'a>(s: &'a str, token: &str) -> &'a str {
    match s.find(token) {
        Some(found) => &s[found + token.len()..],
        None => s,
    }
}
