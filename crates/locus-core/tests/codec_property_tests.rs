//! Property-based tests for the location codec
//!
//! Uses proptest to verify properties that should hold for all well-formed
//! locations and URLs.

#[cfg(not(target_arch = "wasm32"))]
mod property_tests {
	use locus_core::{Location, Query, location_to_url, parse_url};
	use proptest::prelude::*;
	use proptest::proptest;

	fn segment() -> impl Strategy<Value = String> {
		"[a-zA-Z0-9 ._~!$&'()*+,;=:@/?#%-]{1,16}"
	}

	fn query() -> impl Strategy<Value = Option<Query>> {
		proptest::option::of(
			proptest::collection::vec(
				(segment(), proptest::option::of("[a-zA-Z0-9 &=?#%/]{0,12}")),
				1..5,
			)
			.prop_map(|pairs| pairs.into_iter().collect::<Query>()),
		)
	}

	fn location() -> impl Strategy<Value = Location> {
		(
			proptest::collection::vec(segment(), 0..6),
			query(),
			proptest::option::of("[a-zA-Z0-9 #?&=/%-]{1,16}"),
		)
			.prop_map(|(path, query, fragment)| Location {
				path,
				query,
				fragment,
			})
	}

	proptest! {
		/// Property: decoding an encoded location gives the location back
		#[test]
		fn prop_decode_inverts_encode(location in location()) {
			let url = location_to_url(&location);
			prop_assert_eq!(parse_url(&url), location);
		}

		/// Property: encoding is a fixed point after one decode/encode cycle
		#[test]
		fn prop_encode_decode_encode_is_stable(location in location()) {
			let url = location_to_url(&location);
			let again = location_to_url(&parse_url(&url));
			prop_assert_eq!(again, url);
		}

		/// Property: well-formed unreserved URLs survive decode/encode unchanged
		#[test]
		fn prop_unreserved_url_round_trip(
			path in proptest::collection::vec("[a-zA-Z0-9._~-]{1,8}", 0..5),
			query in proptest::collection::vec(
				("[a-z]{1,6}", proptest::option::of("[a-zA-Z0-9]{0,6}")),
				0..4,
			),
			fragment in "[a-zA-Z0-9-]{0,8}",
		) {
			let mut keys = std::collections::HashSet::new();
			let pairs: Vec<String> = query
				.into_iter()
				.filter(|(key, _)| keys.insert(key.clone()))
				.map(|(key, value)| match value {
					Some(value) => format!("{}={}", key, value),
					None => key,
				})
				.collect();

			let mut url = format!("/{}", path.join("/"));
			if !pairs.is_empty() {
				url.push('?');
				url.push_str(&pairs.join("&"));
			}
			if !fragment.is_empty() {
				url.push('#');
				url.push_str(&fragment);
			}

			prop_assert_eq!(location_to_url(&parse_url(&url)), url);
		}

		/// Property: parsing never panics on arbitrary input
		#[test]
		fn prop_parse_is_total(input in ".*") {
			let _ = location_to_url(&parse_url(&input));
		}
	}
}
