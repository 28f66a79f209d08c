//! Devis Proxy library.
//!
//! Shopify App Proxy endpoint that lets storefront customers list and view
//! their quotes (draft orders). Every quote request must carry a valid App
//! Proxy signature; verified requests are relayed to the Admin GraphQL API
//! and the response is reduced to a small JSON contract.
//!
//! The crate is a library so the router can be exercised in tests with a
//! stubbed upstream; `main.rs` wires it to a real listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app_proxy;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod shopify;
pub mod state;
