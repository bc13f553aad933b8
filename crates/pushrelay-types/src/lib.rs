//! Shared types, adapter traits, and core utilities for pushrelay.
//!
//! This crate contains the foundational types shared between the relay crate,
//! the server binary and the adapter implementations. Adapters depend only on
//! this crate, so they compile independently of the relay logic.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod document_adapter;
pub mod error;
pub mod extract;
pub mod prelude;
pub mod push_adapter;
pub mod types;

// vim: ts=4
