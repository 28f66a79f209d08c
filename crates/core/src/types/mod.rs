//! Core types for the devis proxy.
//!
//! This module provides type-safe wrappers for the quote domain.

pub mod id;
pub mod price;
pub mod quote;

pub use id::{Gid, GidError, gid_to_legacy_id, normalize_gid};
pub use price::{Money, format_total};
pub use quote::{DraftOrderRecord, PageInfo, QuoteLineItem, QuotePage};
