//! Devis Proxy Core - Shared quote types.
//!
//! This crate provides the types shared by the App Proxy server and its tests:
//! - Opaque resource handles (GIDs) and their legacy numeric ids
//! - Money formatting for quote totals
//! - The simplified quote contract returned to the storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Resource handles, money, and quote records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
