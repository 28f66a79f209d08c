//! Shopify App Proxy signature verification.
//!
//! Shopify forwards storefront requests under `/apps/<subpath>` to this server
//! and signs each one with the app's shared secret. Two schemes are accepted,
//! tried in order:
//!
//! 1. **Header signature** - base64 HMAC-SHA256 of the raw request target
//!    (path plus query) in `X-Shopify-Hmac-Sha256` or
//!    `X-Shopify-Proxy-Signature`. Depending on how the proxy is mounted the
//!    signed target may or may not carry the `/apps` prefix, so both are tried.
//! 2. **Legacy query signature** - hex HMAC-SHA256 of the sorted query
//!    parameters (minus `signature`) concatenated as `key=value` with no
//!    separator.
//!
//! An empty shared secret never verifies.

mod signature;

pub use signature::{
    HEADER_NAMES, LEGACY_PARAM, ProxyRequest, constant_time_eq, header_digest, legacy_digest,
    legacy_message, verify,
};
