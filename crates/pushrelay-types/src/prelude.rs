pub use crate::error::{ClResult, Error};
pub use crate::types::{CallerIdentity, NotificationRequest, RelayResponse};

pub use tracing::{debug, error, info, warn};

// vim: ts=4
