//! TechEdge Store - Storage-backed commerce logic.
//!
//! This crate provides the client-side state of the TechEdge storefront
//! as a library: user records, sessions, carts, and orders persisted as
//! JSON under namespaced storage keys, plus the simulated checkout and
//! the product catalog loader.
//!
//! # Architecture
//!
//! [`CommerceStore`] owns the persisted state and is cheap to clone; the
//! services in [`services`] layer validation and flows on top of it.
//! There is no backend: payments are timers, the user table is a JSON
//! blob, and the only network call is the catalog fetch in [`catalog`].
//!
//! # Modules
//!
//! - [`storage`] - Key-value persistence backends
//! - [`models`] - Persisted record shapes
//! - [`commerce`] - The store itself
//! - [`services`] - Auth and checkout flows
//! - [`catalog`] - Product catalog fetch, cache, and fallback

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod commerce;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod services;
pub mod storage;

pub use commerce::CommerceStore;
pub use config::StoreConfig;
pub use error::StoreError;
pub use events::StoreEvent;
pub use storage::Storage;
