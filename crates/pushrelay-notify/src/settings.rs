//! Relay options

use std::str::FromStr;

use crate::prelude::*;

pub const DEFAULT_USERS_COLLECTION: &str = "users";

/// Which invalid tokens to remove after a dispatch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrunePolicy {
	/// Remove only the first token reported invalid, in token order
	#[default]
	FirstInvalid,
	/// Remove every token reported invalid in a single update
	AllInvalid,
}

impl FromStr for PrunePolicy {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"first" => Ok(PrunePolicy::FirstInvalid),
			"all" => Ok(PrunePolicy::AllInvalid),
			other => Err(Error::ConfigError(format!("unknown prune policy: {}", other))),
		}
	}
}

#[derive(Debug, Clone)]
pub struct RelayOpts {
	pub users_collection: Box<str>,
	pub prune_policy: PrunePolicy,
}

impl Default for RelayOpts {
	fn default() -> Self {
		RelayOpts {
			users_collection: DEFAULT_USERS_COLLECTION.into(),
			prune_policy: PrunePolicy::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_prune_policy() {
		assert_eq!("first".parse::<PrunePolicy>().ok(), Some(PrunePolicy::FirstInvalid));
		assert_eq!(" ALL ".parse::<PrunePolicy>().ok(), Some(PrunePolicy::AllInvalid));
		assert!(matches!("some".parse::<PrunePolicy>(), Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_default_opts() {
		let opts = RelayOpts::default();
		assert_eq!(&*opts.users_collection, "users");
		assert_eq!(opts.prune_policy, PrunePolicy::FirstInvalid);
	}
}

// vim: ts=4
