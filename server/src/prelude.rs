pub use crate::app::App;
pub use pushrelay_types::prelude::*;

// vim: ts=4
