//! Startup configuration read from environment variables
//!
//! | Variable | Default |
//! |---|---|
//! | `LISTEN` | `127.0.0.1:8080` |
//! | `DB_DIR` | `./data` |
//! | `FCM_SERVER_KEY` | required |
//! | `FCM_ENDPOINT` | `https://fcm.googleapis.com/fcm/send` |
//! | `AUTH_JWT_SECRET` | required |
//! | `PRUNE_POLICY` | `first` (`first` or `all`) |
//! | `USERS_COLLECTION` | `users` |

use std::{env, path::PathBuf};

use crate::prelude::*;
use pushrelay_notify::settings::DEFAULT_USERS_COLLECTION;
use pushrelay_notify::{PrunePolicy, RelayOpts};
use pushrelay_push_adapter_fcm::{DEFAULT_FCM_ENDPOINT, FcmConfig};

pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";
pub const DEFAULT_DB_DIR: &str = "./data";

#[derive(Debug)]
pub struct Config {
	pub listen: Box<str>,
	pub db_dir: PathBuf,
	pub fcm: FcmConfig,
	pub auth_secret: Box<str>,
	pub relay: RelayOpts,
}

impl Config {
	pub fn from_env() -> ClResult<Self> {
		Self::from_lookup(|name| env::var(name).ok())
	}

	/// Build the config from a variable lookup function
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClResult<Self> {
		let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
		let required = |name: &str| {
			var(name).ok_or_else(|| Error::ConfigError(format!("{} must be set", name)))
		};

		let prune_policy = match var("PRUNE_POLICY") {
			Some(policy) => policy.parse::<PrunePolicy>()?,
			None => PrunePolicy::default(),
		};

		Ok(Config {
			listen: var("LISTEN").unwrap_or_else(|| DEFAULT_LISTEN.to_string()).into(),
			db_dir: PathBuf::from(var("DB_DIR").unwrap_or_else(|| DEFAULT_DB_DIR.to_string())),
			fcm: FcmConfig {
				endpoint: var("FCM_ENDPOINT")
					.unwrap_or_else(|| DEFAULT_FCM_ENDPOINT.to_string())
					.into(),
				server_key: required("FCM_SERVER_KEY")?.into(),
			},
			auth_secret: required("AUTH_JWT_SECRET")?.into(),
			relay: RelayOpts {
				users_collection: var("USERS_COLLECTION")
					.unwrap_or_else(|| DEFAULT_USERS_COLLECTION.to_string())
					.into(),
				prune_policy,
			},
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let vars: HashMap<String, String> =
			vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
		move |name: &str| vars.get(name).cloned()
	}

	#[test]
	fn test_defaults() {
		let config =
			Config::from_lookup(lookup(&[("FCM_SERVER_KEY", "key"), ("AUTH_JWT_SECRET", "secret")]))
				.unwrap();
		assert_eq!(&*config.listen, DEFAULT_LISTEN);
		assert_eq!(config.db_dir, PathBuf::from("./data"));
		assert_eq!(&*config.fcm.endpoint, DEFAULT_FCM_ENDPOINT);
		assert_eq!(&*config.fcm.server_key, "key");
		assert_eq!(&*config.relay.users_collection, "users");
		assert_eq!(config.relay.prune_policy, PrunePolicy::FirstInvalid);
	}

	#[test]
	fn test_overrides() {
		let config = Config::from_lookup(lookup(&[
			("FCM_SERVER_KEY", "key"),
			("AUTH_JWT_SECRET", "secret"),
			("LISTEN", "0.0.0.0:9000"),
			("DB_DIR", "/var/lib/pushrelay"),
			("FCM_ENDPOINT", "http://localhost:9099/fcm/send"),
			("PRUNE_POLICY", "all"),
			("USERS_COLLECTION", "profiles"),
		]))
		.unwrap();
		assert_eq!(&*config.listen, "0.0.0.0:9000");
		assert_eq!(config.db_dir, PathBuf::from("/var/lib/pushrelay"));
		assert_eq!(&*config.fcm.endpoint, "http://localhost:9099/fcm/send");
		assert_eq!(config.relay.prune_policy, PrunePolicy::AllInvalid);
		assert_eq!(&*config.relay.users_collection, "profiles");
	}

	#[test]
	fn test_missing_required() {
		let res = Config::from_lookup(lookup(&[("AUTH_JWT_SECRET", "secret")]));
		assert!(matches!(res, Err(Error::ConfigError(msg)) if msg.contains("FCM_SERVER_KEY")));

		let res = Config::from_lookup(lookup(&[("FCM_SERVER_KEY", "key"), ("AUTH_JWT_SECRET", " ")]));
		assert!(matches!(res, Err(Error::ConfigError(msg)) if msg.contains("AUTH_JWT_SECRET")));
	}

	#[test]
	fn test_bad_prune_policy() {
		let res = Config::from_lookup(lookup(&[
			("FCM_SERVER_KEY", "key"),
			("AUTH_JWT_SECRET", "secret"),
			("PRUNE_POLICY", "sometimes"),
		]));
		assert!(matches!(res, Err(Error::ConfigError(_))));
	}
}

// vim: ts=4
