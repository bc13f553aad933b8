pub use pushrelay_types::prelude::*;

// vim: ts=4
