//! Location codec.
//!
//! Converts between [`Location`] records and URL strings. Serialization
//! percent-encodes every component; parsing splits first and decodes each
//! component afterwards, so reserved characters inside values survive.
//!
//! Every parser here is total. Malformed input degrades to empty fields, and a
//! component that is not valid percent-encoded UTF-8 is kept verbatim.

use std::borrow::Cow;

use crate::location::{Location, Query};

/// Serializes a location into an absolute-path URL.
///
/// Segments are joined with `/`, query pairs with `&` (a bare key when the
/// value is `None`), and the fragment follows `#`. An absent or empty query or
/// fragment is omitted.
///
/// # Example
///
/// ```
/// use locus_core::{Location, location_to_url};
///
/// let location = Location::new(["a", "b"])
/// 	.with_query_param("x", Some("1"))
/// 	.with_query_param("y", None)
/// 	.with_fragment("frag");
/// assert_eq!(location_to_url(&location), "/a/b?x=1&y#frag");
/// ```
pub fn location_to_url(location: &Location) -> String {
	let mut url = String::from("/");
	let segments: Vec<Cow<'_, str>> = location.path.iter().map(|s| encode(s)).collect();
	url.push_str(&segments.join("/"));

	if let Some(query) = location.query.as_ref().filter(|q| !q.is_empty()) {
		let pairs: Vec<String> = query
			.iter()
			.map(|(key, value)| match value {
				Some(value) => format!("{}={}", encode(key), encode(value)),
				None => encode(key).into_owned(),
			})
			.collect();
		url.push('?');
		url.push_str(&pairs.join("&"));
	}

	if let Some(fragment) = location.fragment.as_deref().filter(|f| !f.is_empty()) {
		url.push('#');
		url.push_str(&encode(fragment));
	}

	url
}

/// Parses the three address components reported by `window.location`.
///
/// An empty query or fragment yields `None`.
pub fn parse_location(pathname: &str, search: &str, hash: &str) -> Location {
	let query = parse_query(search);
	let fragment = parse_hash(hash);

	Location {
		path: parse_path(pathname),
		query: (!query.is_empty()).then_some(query),
		fragment: (!fragment.is_empty()).then_some(fragment),
	}
}

/// Parses a full URL or an absolute-path reference (`/path?query#fragment`).
///
/// Scheme and authority are discarded when present. Only `scheme://` marks an
/// origin: a protocol-relative `//host/path` is read as a path whose first
/// segment is empty, which is what [`location_to_url`] writes for such a path.
pub fn parse_url(url: &str) -> Location {
	let rest = strip_origin(url.trim());

	let (rest, hash) = match rest.find('#') {
		Some(index) => rest.split_at(index),
		None => (rest, ""),
	};
	let (pathname, search) = match rest.find('?') {
		Some(index) => rest.split_at(index),
		None => (rest, ""),
	};

	parse_location(pathname, search, hash)
}

/// Splits a pathname into decoded segments.
///
/// One leading and one trailing empty segment are dropped, so `/a/b/` and
/// `a/b` both give `["a", "b"]`.
pub fn parse_path(path: &str) -> Vec<String> {
	let mut segments: Vec<String> = path.split('/').map(decode).collect();
	if segments.first().is_some_and(String::is_empty) {
		segments.remove(0);
	}
	if segments.last().is_some_and(String::is_empty) {
		segments.pop();
	}
	segments
}

/// Parses a query string, with or without its leading `?`.
///
/// Pairs are split on `&` and then on the first `=`; a pair without `=` is a
/// bare key. Empty keys are skipped and a repeated key keeps its last value.
pub fn parse_query(query: &str) -> Query {
	let query = query.trim();
	let query = query.strip_prefix('?').unwrap_or(query);

	let mut result = Query::new();
	for pair in query.split('&') {
		let (key, value) = match pair.split_once('=') {
			Some((key, value)) => (key, Some(decode(value))),
			None => (pair, None),
		};
		let key = decode(key);
		if key.is_empty() {
			continue;
		}
		result.insert(key, value);
	}
	result
}

/// Parses a fragment, with or without its leading `#`.
pub fn parse_hash(hash: &str) -> String {
	decode(hash.strip_prefix('#').unwrap_or(hash))
}

fn encode(component: &str) -> Cow<'_, str> {
	urlencoding::encode(component)
}

fn decode(component: &str) -> String {
	urlencoding::decode(component)
		.map(Cow::into_owned)
		.unwrap_or_else(|_| component.to_string())
}

/// Drops `scheme://authority` from an absolute URL. A leading `//` alone is
/// left in place.
fn strip_origin(url: &str) -> &str {
	let Some(scheme_end) = url.find("://") else {
		return url;
	};
	if !is_scheme(&url[..scheme_end]) {
		return url;
	}
	let after = &url[scheme_end + 3..];
	match after.find(|c: char| matches!(c, '/' | '?' | '#')) {
		Some(index) => &after[index..],
		None => "",
	}
}

fn is_scheme(candidate: &str) -> bool {
	let mut chars = candidate.chars();
	chars.next().is_some_and(|c| c.is_ascii_alphabetic())
		&& chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_parse_reference_example() {
		let location = parse_url("/a/b?x=1&y#frag");

		assert_eq!(location.path, vec!["a", "b"]);
		let query = location.query.expect("query present");
		assert_eq!(query.get("x"), Some(&Some("1".to_string())));
		assert_eq!(query.get("y"), Some(&None));
		assert_eq!(query.len(), 2);
		assert_eq!(location.fragment.as_deref(), Some("frag"));
	}

	#[rstest]
	#[case("")]
	#[case("/")]
	#[case("/?")]
	#[case("/#")]
	#[case("?#")]
	fn test_empty_components_parse_to_absent(#[case] url: &str) {
		assert_eq!(parse_url(url), Location::default());
	}

	#[rstest]
	#[case("/a/b", &["a", "b"])]
	#[case("/a/b/", &["a", "b"])]
	#[case("a/b", &["a", "b"])]
	#[case("//a", &["", "a"])]
	#[case("/a//b", &["a", "", "b"])]
	#[case("/hello%20world/x%2Fy", &["hello world", "x/y"])]
	#[case("/caf%C3%A9", &["café"])]
	fn test_parse_path(#[case] input: &str, #[case] expected: &[&str]) {
		assert_eq!(parse_path(input), expected);
	}

	#[rstest]
	fn test_parse_path_keeps_malformed_escape() {
		assert_eq!(parse_path("/%FF/ok"), vec!["%FF", "ok"]);
	}

	#[rstest]
	fn test_parse_query_with_and_without_marker() {
		assert_eq!(parse_query("?a=1&b"), parse_query("a=1&b"));
	}

	#[rstest]
	fn test_parse_query_splits_before_decoding() {
		let query = parse_query("?next=%2Fa%3Fb%3D1%26c&name=J%C3%BCrgen");
		assert_eq!(query.get("next"), Some(&Some("/a?b=1&c".to_string())));
		assert_eq!(query.get("name"), Some(&Some("Jürgen".to_string())));
	}

	#[rstest]
	fn test_parse_query_value_with_equals() {
		let query = parse_query("token=abc==");
		assert_eq!(query.get("token"), Some(&Some("abc==".to_string())));
	}

	#[rstest]
	fn test_parse_query_skips_empty_keys() {
		let query = parse_query("?&=orphan&&k=v&");
		assert_eq!(query.len(), 1);
		assert_eq!(query.get("k"), Some(&Some("v".to_string())));
	}

	#[rstest]
	fn test_parse_query_last_value_wins() {
		let query = parse_query("a=1&b=2&a=3");
		assert_eq!(query.get("a"), Some(&Some("3".to_string())));
		assert_eq!(query.keys().collect::<Vec<_>>(), vec!["a", "b"]);
	}

	#[rstest]
	fn test_parse_query_empty_value_is_not_bare() {
		let query = parse_query("a=");
		assert_eq!(query.get("a"), Some(&Some(String::new())));
	}

	#[rstest]
	#[case("#frag", "frag")]
	#[case("frag", "frag")]
	#[case("#", "")]
	#[case("", "")]
	#[case("#a%20b", "a b")]
	#[case("##x", "#x")]
	fn test_parse_hash(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(parse_hash(input), expected);
	}

	#[rstest]
	#[case("https://app.example.com/a/b?x=1#f", "/a/b?x=1#f")]
	#[case("http://localhost:8080", "/")]
	#[case("http://localhost:8080?x=1", "/?x=1")]
	#[case("/login?next=https://example.com/", "/login?next=https%3A%2F%2Fexample.com%2F")]
	fn test_parse_url_strips_origin(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(location_to_url(&parse_url(input)), expected);
	}

	#[rstest]
	#[case("//host/path", &["", "host", "path"])]
	#[case("//host", &["", "host"])]
	fn test_parse_url_keeps_protocol_relative_prefix(
		#[case] input: &str,
		#[case] expected: &[&str],
	) {
		let location = parse_url(input);
		assert_eq!(location.path, expected);
		assert_eq!(location_to_url(&location), input);
	}

	#[rstest]
	fn test_location_to_url_encodes_components() {
		let location = Location::new(["a b", "x/y"])
			.with_query_param("q", Some("1&2=3"))
			.with_query_param("flag", None)
			.with_fragment("top section");

		assert_eq!(
			location_to_url(&location),
			"/a%20b/x%2Fy?q=1%262%3D3&flag#top%20section"
		);
	}

	#[rstest]
	fn test_location_to_url_omits_empty_query_and_fragment() {
		let location = Location {
			path: vec!["a".to_string()],
			query: Some(Query::new()),
			fragment: Some(String::new()),
		};
		assert_eq!(location_to_url(&location), "/a");
	}

	#[rstest]
	fn test_location_to_url_root() {
		assert_eq!(location_to_url(&Location::default()), "/");
	}

	#[rstest]
	fn test_parse_location_components() {
		let location = parse_location("/workbench/acme/", "?mode=edit", "#top");
		assert_eq!(location.path, vec!["workbench", "acme"]);
		assert_eq!(location.query_value("mode"), Some("edit"));
		assert_eq!(location.fragment.as_deref(), Some("top"));
	}
}
