//! Chat notification relay
//!
//! Relays a chat notification from an authenticated caller to every device
//! registered for the receiver.
//!
//! # Flow
//!
//! - Authenticate the caller and validate the request
//! - Read the receiver's user record and its `fcmTokens`
//! - Dispatch one push message to all tokens in a single batch
//! - Prune tokens the push service reported as invalid
//!
//! # Settings
//!
//! - `users_collection` - Collection holding user records (default `users`)
//! - `prune_policy` - `first` prunes one invalid token per call, `all` prunes every one

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod handler;
pub mod relay;
pub mod settings;

mod prelude;

pub use relay::NotificationRelay;
pub use settings::{PrunePolicy, RelayOpts};

// vim: ts=4
