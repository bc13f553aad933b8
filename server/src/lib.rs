//! pushrelay relays chat notifications to a user's devices.
//!
//! # Features
//!
//!	- Callable HTTP endpoint (`POST /sendNotification`)
//!	- Bearer token caller authentication
//!	- Embedded document store for user records (redb)
//!	- Firebase Cloud Messaging delivery
//!	- Stale device token pruning

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod auth;
pub mod config;
pub mod prelude;
pub mod routes;

pub use crate::app::{App, AppBuilder, AppState};

// vim: ts=4
