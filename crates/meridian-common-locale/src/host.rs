// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Domain key extraction from raw host strings.

/// Reduce a host string to the bare hostname used as a registry key.
///
/// Accepts plain hosts (`example.com`) as well as decorated forms such as
/// `Origin` header values (`https://example.com:8443`). Strips, in order:
/// an optional `scheme://` (or bare `//`), any path, query or fragment,
/// `user@` credentials, and a trailing `:port`. Bracketed IPv6 literals are
/// returned without their brackets.
///
/// # Example
///
/// ```
/// use meridian_common_locale::extract_domain_key;
///
/// assert_eq!(extract_domain_key("example.com"), "example.com");
/// assert_eq!(extract_domain_key("http://example.com:8080"), "example.com");
/// assert_eq!(extract_domain_key("[::1]:3000"), "::1");
/// ```
pub fn extract_domain_key(host: &str) -> &str {
	let mut rest = host.trim();

	if let Some(idx) = rest.find("://") {
		if !rest[..idx].contains('/') {
			rest = &rest[idx + 3..];
		}
	} else if let Some(stripped) = rest.strip_prefix("//") {
		rest = stripped;
	}

	if let Some(end) = rest.find(['/', '?', '#']) {
		rest = &rest[..end];
	}

	if let Some(idx) = rest.rfind('@') {
		rest = &rest[idx + 1..];
	}

	if let Some(inner) = rest.strip_prefix('[') {
		return match inner.find(']') {
			Some(end) => &inner[..end],
			None => inner,
		};
	}

	match rest.rsplit_once(':') {
		// A second colon means an unbracketed IPv6 address, not a port.
		Some((hostname, port))
			if !hostname.contains(':') && port.bytes().all(|b| b.is_ascii_digit()) =>
		{
			hostname
		}
		_ => rest,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_plain_host_passes_through() {
		assert_eq!(extract_domain_key("example.com"), "example.com");
		assert_eq!(extract_domain_key("127.0.0.1"), "127.0.0.1");
		assert_eq!(extract_domain_key("localhost"), "localhost");
	}

	#[test]
	fn test_decorated_forms_share_a_key() {
		for host in [
			"example.com",
			"http://example.com",
			"example.com:8080",
			"http://example.com:8080",
		] {
			assert_eq!(extract_domain_key(host), "example.com", "host: {host}");
		}
	}

	#[test]
	fn test_strips_any_scheme() {
		assert_eq!(extract_domain_key("https://example.com"), "example.com");
		assert_eq!(extract_domain_key("ws://example.com:9000"), "example.com");
		assert_eq!(extract_domain_key("//example.com"), "example.com");
	}

	#[test]
	fn test_strips_path_query_and_fragment() {
		assert_eq!(extract_domain_key("http://example.com/shop"), "example.com");
		assert_eq!(extract_domain_key("http://example.com:80/?_l=fr"), "example.com");
		assert_eq!(extract_domain_key("example.com#top"), "example.com");
	}

	#[test]
	fn test_scheme_marker_inside_path_is_not_a_scheme() {
		assert_eq!(
			extract_domain_key("example.com/redirect?to=http://other.com"),
			"example.com"
		);
	}

	#[test]
	fn test_strips_credentials() {
		assert_eq!(extract_domain_key("http://user:pw@example.com:8080"), "example.com");
	}

	#[test]
	fn test_ipv6_literals() {
		assert_eq!(extract_domain_key("[::1]"), "::1");
		assert_eq!(extract_domain_key("http://[::1]:8080"), "::1");
		assert_eq!(extract_domain_key("::1"), "::1");
	}

	#[test]
	fn test_non_numeric_suffix_is_kept() {
		assert_eq!(extract_domain_key("example.com:http"), "example.com:http");
	}

	#[test]
	fn test_empty_and_whitespace() {
		assert_eq!(extract_domain_key(""), "");
		assert_eq!(extract_domain_key("  example.com  "), "example.com");
	}

	proptest! {
		/// Scheme and port decorations never change the extracted key.
		#[test]
		fn decorations_are_stripped(
			host in "[a-z][a-z0-9-]{0,20}(\\.[a-z][a-z0-9-]{0,10}){0,3}",
			scheme in "(http|https|ws)",
			port in 1u16..,
		) {
			prop_assert_eq!(extract_domain_key(&host), host.as_str());
			let with_port = format!("{host}:{port}");
			prop_assert_eq!(extract_domain_key(&with_port), host.as_str());
			let with_scheme = format!("{scheme}://{host}");
			prop_assert_eq!(extract_domain_key(&with_scheme), host.as_str());
			let full = format!("{scheme}://{host}:{port}");
			prop_assert_eq!(extract_domain_key(&full), host.as_str());
		}
	}
}
