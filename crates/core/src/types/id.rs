//! Opaque resource handles (GIDs) and legacy numeric ids.
//!
//! The Admin API identifies every resource with a global id of the form
//! `gid://shopify/<Type>/<digits>`. Storefront callers may send either that
//! handle or the bare numeric ("legacy") id, so both directions are supported.
//!
//! # Example
//!
//! ```rust
//! # use devis_proxy_core::{gid_to_legacy_id, normalize_gid};
//! assert_eq!(gid_to_legacy_id(Some("gid://shopify/DraftOrder/987")).as_deref(), Some("987"));
//! assert_eq!(gid_to_legacy_id(Some("abc")), None);
//! assert_eq!(
//!     normalize_gid("DraftOrder", "987").as_deref(),
//!     Some("gid://shopify/DraftOrder/987")
//! );
//! ```

use std::fmt;

use thiserror::Error;

/// Scheme and namespace used for handles built from a bare numeric id.
pub const GID_PREFIX: &str = "gid://shopify";

/// A legacy id that is not a decimal number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a numeric id: {0}")]
pub struct GidError(pub String);

/// A handle in the default namespace, built from a legacy id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Gid {
    resource_type: String,
    legacy_id: String,
}

impl Gid {
    /// Build a handle in the default namespace.
    ///
    /// # Errors
    ///
    /// Returns `GidError` if `legacy_id` is not all digits.
    pub fn new(resource_type: &str, legacy_id: &str) -> Result<Self, GidError> {
        if !is_numeral(legacy_id) {
            return Err(GidError(legacy_id.to_string()));
        }
        Ok(Self {
            resource_type: resource_type.to_string(),
            legacy_id: legacy_id.to_string(),
        })
    }
}

impl fmt::Display for Gid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{GID_PREFIX}/{}/{}", self.resource_type, self.legacy_id)
    }
}

/// Extract the legacy numeric id from a handle or a bare numeral.
///
/// Accepts a bare numeral as-is, otherwise takes whatever follows the last
/// `/` provided it is all digits. Anything else yields `None`.
#[must_use]
pub fn gid_to_legacy_id(value: Option<&str>) -> Option<String> {
    let value = value?;
    if is_numeral(value) {
        return Some(value.to_string());
    }
    let (_, tail) = value.rsplit_once('/')?;
    is_numeral(tail).then(|| tail.to_string())
}

/// Turn a bare numeral into a handle for `resource_type`.
///
/// Values that already look like a handle (anything ending in `/<digits>`)
/// pass through untouched. Returns `None` when no numeric id can be found.
#[must_use]
pub fn normalize_gid(resource_type: &str, value: &str) -> Option<String> {
    if is_numeral(value) {
        return Gid::new(resource_type, value).ok().map(|gid| gid.to_string());
    }
    gid_to_legacy_id(Some(value)).map(|_| value.to_string())
}

fn is_numeral(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_gid_to_legacy_id() {
        assert_eq!(
            gid_to_legacy_id(Some("gid://shop/DraftOrder/987")).as_deref(),
            Some("987")
        );
        assert_eq!(gid_to_legacy_id(Some("987")).as_deref(), Some("987"));
        assert_eq!(gid_to_legacy_id(Some("abc")), None);
        assert_eq!(gid_to_legacy_id(None), None);
    }

    #[test]
    fn test_gid_to_legacy_id_rejects_non_numeric_tail() {
        assert_eq!(gid_to_legacy_id(Some("gid://shopify/Customer/abc")), None);
        assert_eq!(gid_to_legacy_id(Some("gid://shopify/Customer/")), None);
        assert_eq!(gid_to_legacy_id(Some("")), None);
        assert_eq!(gid_to_legacy_id(Some("-12")), None);
    }

    #[test]
    fn test_gid_new_rejects_non_numeric() {
        assert_eq!(
            Gid::new("DraftOrder", "12a"),
            Err(GidError("12a".to_string()))
        );
        assert_eq!(
            Gid::new("DraftOrder", "12").unwrap().to_string(),
            "gid://shopify/DraftOrder/12"
        );
    }

    #[test]
    fn test_normalize_gid() {
        assert_eq!(
            normalize_gid("DraftOrder", "123").as_deref(),
            Some("gid://shopify/DraftOrder/123")
        );
        assert_eq!(
            normalize_gid("DraftOrder", "gid://shopify/DraftOrder/123").as_deref(),
            Some("gid://shopify/DraftOrder/123")
        );
        assert_eq!(
            normalize_gid("DraftOrder", "gid://shop/DraftOrder/987").as_deref(),
            Some("gid://shop/DraftOrder/987")
        );
        assert_eq!(normalize_gid("DraftOrder", "nope"), None);
    }
}
