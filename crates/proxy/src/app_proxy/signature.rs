use std::collections::BTreeMap;

use axum::http::{HeaderMap, Uri};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Headers that may carry a base64 signature, in the order they are tried.
pub const HEADER_NAMES: [&str; 2] = ["x-shopify-hmac-sha256", "x-shopify-proxy-signature"];

/// Query parameter carrying the legacy hex signature.
pub const LEGACY_PARAM: &str = "signature";

/// Mount point Shopify prepends to proxied paths.
const APPS_PREFIX: &str = "/apps";

/// The parts of an inbound request that signature verification looks at.
#[derive(Debug, Clone, Default)]
pub struct ProxyRequest<'a> {
    /// Request target exactly as received: path, plus `?query` when present.
    pub raw_path: &'a str,
    /// Values of every signature header that was present, in `HEADER_NAMES` order.
    pub header_signatures: Vec<&'a [u8]>,
    /// Decoded query parameters in arrival order.
    pub params: Vec<(String, String)>,
}

impl<'a> ProxyRequest<'a> {
    /// Collect verification inputs from request headers and URI.
    #[must_use]
    pub fn from_parts(headers: &'a HeaderMap, uri: &'a Uri) -> Self {
        let raw_path = uri
            .path_and_query()
            .map_or_else(|| uri.path(), |pq| pq.as_str());

        let header_signatures = HEADER_NAMES
            .iter()
            .filter_map(|name| headers.get(*name))
            .map(axum::http::HeaderValue::as_bytes)
            .collect();

        let params = uri
            .query()
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();

        Self {
            raw_path,
            header_signatures,
            params,
        }
    }

    fn legacy_signature(&self) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == LEGACY_PARAM)
            .map(|(_, v)| v.as_str())
    }
}

/// A single way of proving a request came from Shopify.
type Strategy = fn(&ProxyRequest<'_>, &[u8]) -> bool;

/// Tried in order; the first acceptance wins.
const STRATEGIES: [Strategy; 3] = [header_as_received, header_with_apps_prefix, legacy_query];

/// Decide whether a request carries a valid App Proxy signature.
///
/// Returns `false` when `shared_secret` is empty, when no signature is
/// present, or when every strategy rejects.
#[must_use]
pub fn verify(request: &ProxyRequest<'_>, shared_secret: &str) -> bool {
    if shared_secret.is_empty() {
        return false;
    }
    let key = shared_secret.as_bytes();
    STRATEGIES.iter().any(|strategy| strategy(request, key))
}

fn header_as_received(request: &ProxyRequest<'_>, key: &[u8]) -> bool {
    header_matches(request, key, request.raw_path)
}

fn header_with_apps_prefix(request: &ProxyRequest<'_>, key: &[u8]) -> bool {
    let prefixed = if request.raw_path.starts_with('/') {
        format!("{APPS_PREFIX}{}", request.raw_path)
    } else {
        format!("{APPS_PREFIX}/{}", request.raw_path)
    };
    header_matches(request, key, &prefixed)
}

fn header_matches(request: &ProxyRequest<'_>, key: &[u8], message: &str) -> bool {
    if request.header_signatures.is_empty() {
        return false;
    }
    let Some(expected) = header_digest(key, message) else {
        return false;
    };
    request
        .header_signatures
        .iter()
        .any(|provided| constant_time_eq(expected.as_bytes(), provided))
}

fn legacy_query(request: &ProxyRequest<'_>, key: &[u8]) -> bool {
    let Some(provided) = request.legacy_signature() else {
        return false;
    };
    let message = legacy_message(&request.params);
    legacy_digest(key, &message)
        .is_some_and(|expected| constant_time_eq(expected.as_bytes(), provided.as_bytes()))
}

/// Build the legacy signing string: parameters other than `signature`,
/// sorted by key, each rendered `key=value`, with no separator between pairs.
///
/// Repeated keys have their values joined with `,` in arrival order.
#[must_use]
pub fn legacy_message(params: &[(String, String)]) -> String {
    let mut grouped: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (key, value) in params {
        if key == LEGACY_PARAM {
            continue;
        }
        grouped.entry(key.as_str()).or_default().push(value.as_str());
    }

    grouped
        .into_iter()
        .map(|(key, values)| format!("{key}={}", values.join(",")))
        .collect()
}

/// Base64-encoded HMAC-SHA256 of `message`.
#[must_use]
pub fn header_digest(key: &[u8], message: &str) -> Option<String> {
    hmac_sha256(key, message.as_bytes()).map(|digest| BASE64.encode(digest))
}

/// Hex-encoded HMAC-SHA256 of `message`.
#[must_use]
pub fn legacy_digest(key: &[u8], message: &str) -> Option<String> {
    hmac_sha256(key, message.as_bytes()).map(hex::encode)
}

fn hmac_sha256(key: &[u8], message: &[u8]) -> Option<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key).ok()?;
    mac.update(message);
    Some(mac.finalize().into_bytes().to_vec())
}

/// Constant-time byte comparison.
///
/// Both inputs are padded to the longer length with different fill bytes so
/// the content comparison always walks the same number of bytes.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let max_len = a.len().max(b.len());

    let mut a_padded = vec![0u8; max_len];
    let mut b_padded = vec![0xFFu8; max_len];
    a_padded
        .iter_mut()
        .zip(a)
        .for_each(|(dst, src)| *dst = *src);
    b_padded
        .iter_mut()
        .zip(b)
        .for_each(|(dst, src)| *dst = *src);

    let lengths_equal = a.len().ct_eq(&b.len());
    let contents_equal = a_padded.ct_eq(&b_padded);

    (lengths_equal & contents_equal).into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    const SECRET: &str = "hush-9f8e7d6c5b4a";

    fn signed_headers(name: &'static str, message: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let digest = header_digest(SECRET.as_bytes(), message).unwrap();
        headers.insert(name, HeaderValue::from_str(&digest).unwrap());
        headers
    }

    fn check(headers: &HeaderMap, uri: &str, secret: &str) -> bool {
        let uri: Uri = uri.parse().unwrap();
        verify(&ProxyRequest::from_parts(headers, &uri), secret)
    }

    #[test]
    fn test_header_signature_over_raw_path() {
        let headers = signed_headers(HEADER_NAMES[0], "/devis?customer_id=123");
        assert!(check(&headers, "/devis?customer_id=123", SECRET));
    }

    #[test]
    fn test_header_signature_over_apps_prefixed_path() {
        let headers = signed_headers(HEADER_NAMES[0], "/apps/devis?customer_id=123");
        assert!(check(&headers, "/devis?customer_id=123", SECRET));
    }

    #[test]
    fn test_second_header_name_is_accepted() {
        let headers = signed_headers(HEADER_NAMES[1], "/devis/55");
        assert!(check(&headers, "/devis/55", SECRET));
    }

    #[test]
    fn test_apps_prefix_inserts_single_separator() {
        let headers = signed_headers(HEADER_NAMES[0], "/apps/devis");
        let request = ProxyRequest {
            raw_path: "devis",
            header_signatures: vec![headers.get(HEADER_NAMES[0]).unwrap().as_bytes()],
            params: vec![],
        };
        assert!(verify(&request, SECRET));
    }

    #[test]
    fn test_raw_path_is_not_reencoded() {
        let headers = signed_headers(HEADER_NAMES[0], "/devis?after=a%2Fb");
        assert!(check(&headers, "/devis?after=a%2Fb", SECRET));

        let headers = signed_headers(HEADER_NAMES[0], "/devis?after=a/b");
        assert!(!check(&headers, "/devis?after=a%2Fb", SECRET));
    }

    #[test]
    fn test_empty_secret_always_fails() {
        let mut headers = HeaderMap::new();
        let digest = header_digest(b"", "/devis").unwrap();
        headers.insert(HEADER_NAMES[0], HeaderValue::from_str(&digest).unwrap());
        assert!(!check(&headers, "/devis", ""));
    }

    #[test]
    fn test_missing_signature_fails() {
        assert!(!check(&HeaderMap::new(), "/devis?customer_id=123", SECRET));
    }

    #[test]
    fn test_tampered_header_fails() {
        let mut headers = signed_headers(HEADER_NAMES[0], "/devis?customer_id=123");
        headers.insert(HEADER_NAMES[0], HeaderValue::from_static("AAAA"));
        assert!(!check(&headers, "/devis?customer_id=123", SECRET));
    }

    #[test]
    fn test_wrong_path_variant_fails() {
        let headers = signed_headers(HEADER_NAMES[0], "/apps/quotes/devis?customer_id=123");
        assert!(!check(&headers, "/devis?customer_id=123", SECRET));

        let headers = signed_headers(HEADER_NAMES[0], "/devis?customer_id=124");
        assert!(!check(&headers, "/devis?customer_id=123", SECRET));
    }

    #[test]
    fn test_wrong_secret_fails() {
        let headers = signed_headers(HEADER_NAMES[0], "/devis");
        assert!(!check(&headers, "/devis", "another-secret"));
    }

    #[test]
    fn test_legacy_signature() {
        let digest = legacy_digest(SECRET.as_bytes(), "a=1b=2").unwrap();
        let uri = format!("/devis?b=2&signature={digest}&a=1");
        assert!(check(&HeaderMap::new(), &uri, SECRET));
    }

    #[test]
    fn test_legacy_signature_tampered_param_fails() {
        let digest = legacy_digest(SECRET.as_bytes(), "a=1b=2").unwrap();
        let uri = format!("/devis?a=1&b=3&signature={digest}");
        assert!(!check(&HeaderMap::new(), &uri, SECRET));
    }

    #[test]
    fn test_legacy_used_when_header_fails() {
        let digest = legacy_digest(SECRET.as_bytes(), "customer_id=7").unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_NAMES[0], HeaderValue::from_static("bogus"));
        let uri = format!("/devis?customer_id=7&signature={digest}");
        assert!(check(&headers, &uri, SECRET));
    }

    #[test]
    fn test_legacy_message_format() {
        let params = vec![
            ("shop".to_string(), "x.myshopify.com".to_string()),
            ("signature".to_string(), "ignored".to_string()),
            ("extra".to_string(), "1".to_string()),
            ("extra".to_string(), "2".to_string()),
            ("empty".to_string(), String::new()),
        ];
        assert_eq!(
            legacy_message(&params),
            "empty=extra=1,2shop=x.myshopify.com"
        );
    }

    #[test]
    fn test_legacy_message_keeps_ambiguous_equals() {
        let params = vec![("a".to_string(), "b=c".to_string())];
        assert_eq!(legacy_message(&params), "a=b=c");
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"secret", b"secret"));
        assert!(!constant_time_eq(b"secret", b"secreT"));
        assert!(!constant_time_eq(b"secret", b"secret1"));
        assert!(!constant_time_eq(b"", b"x"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_digest_encodings() {
        let b64 = header_digest(b"key", "msg").unwrap();
        let hex_digest = legacy_digest(b"key", "msg").unwrap();
        assert_eq!(hex_digest.len(), 64);
        assert_eq!(BASE64.decode(b64).unwrap(), hex::decode(hex_digest).unwrap());
    }
}
