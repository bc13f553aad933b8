//! redb-based implementation of `DocumentAdapter`.
//!
//! All collections live in one database file. Documents are stored as JSON
//! text under `{collection}/{doc_id}`. Updates run inside a single redb write
//! transaction, and redb serializes writers, so an array removal never races
//! with a concurrent writer of the same document.

#![forbid(unsafe_code)]

mod error;
pub mod storage;

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

pub use error::Error;

use pushrelay_types::document_adapter::{DocumentAdapter, FieldUpdate, apply_field_update};
use pushrelay_types::prelude::{ClResult, Error as RelayError};

pub struct DocumentAdapterRedb {
	db_path: PathBuf,
	db: Arc<redb::Database>,
}

impl fmt::Debug for DocumentAdapterRedb {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DocumentAdapterRedb").field("db_path", &self.db_path).finish()
	}
}

impl DocumentAdapterRedb {
	/// Open (or create) the document database in `storage_dir`.
	pub async fn new(storage_dir: impl AsRef<Path>) -> ClResult<Self> {
		let storage_dir = storage_dir.as_ref();
		tokio::fs::create_dir_all(storage_dir).await?;
		let db_path = storage_dir.join(storage::DB_FILE_NAME);

		let path = db_path.clone();
		let db = tokio::task::spawn_blocking(move || -> ClResult<redb::Database> {
			let db = if path.exists() {
				redb::Database::open(&path).map_err(error::from_redb_error)?
			} else {
				redb::Database::create(&path).map_err(error::from_redb_error)?
			};

			// Initialize tables
			let tx = db.begin_write().map_err(error::from_redb_error)?;
			let _ = tx.open_table(storage::TABLE_DOCUMENTS).map_err(error::from_redb_error)?;
			tx.commit().map_err(error::from_redb_error)?;

			Ok(db)
		})
		.await??;

		info!(path = %db_path.display(), "Document store opened");
		Ok(Self { db_path, db: Arc::new(db) })
	}
}

#[async_trait]
impl DocumentAdapter for DocumentAdapterRedb {
	async fn get(&self, collection: &str, doc_id: &str) -> ClResult<Option<Value>> {
		let key = storage::doc_key(collection, doc_id)?;
		let db = Arc::clone(&self.db);

		tokio::task::spawn_blocking(move || -> ClResult<Option<Value>> {
			use redb::{ReadableDatabase, ReadableTable};

			let tx = db.begin_read().map_err(error::from_redb_error)?;
			let table = tx.open_table(storage::TABLE_DOCUMENTS).map_err(error::from_redb_error)?;

			match table.get(key.as_str()).map_err(error::from_redb_error)? {
				Some(v) => {
					let doc: Value = serde_json::from_str(v.value()).map_err(Error::from)?;
					Ok(Some(doc))
				}
				None => Ok(None),
			}
		})
		.await?
	}

	async fn set(&self, collection: &str, doc_id: &str, doc: Value) -> ClResult<()> {
		let key = storage::doc_key(collection, doc_id)?;
		let json = serde_json::to_string(&doc).map_err(Error::from)?;
		let db = Arc::clone(&self.db);

		tokio::task::spawn_blocking(move || -> ClResult<()> {
			let tx = db.begin_write().map_err(error::from_redb_error)?;
			{
				let mut table =
					tx.open_table(storage::TABLE_DOCUMENTS).map_err(error::from_redb_error)?;
				table.insert(key.as_str(), json.as_str()).map_err(error::from_redb_error)?;
			}
			tx.commit().map_err(error::from_redb_error)?;
			debug!(key = %key, "Document written");
			Ok(())
		})
		.await?
	}

	async fn update(
		&self,
		collection: &str,
		doc_id: &str,
		updates: &[(Box<str>, FieldUpdate)],
	) -> ClResult<()> {
		let key = storage::doc_key(collection, doc_id)?;
		let updates = updates.to_vec();
		let db = Arc::clone(&self.db);

		tokio::task::spawn_blocking(move || -> ClResult<()> {
			use redb::ReadableTable;

			// An early return drops the write transaction, which aborts it
			let tx = db.begin_write().map_err(error::from_redb_error)?;
			{
				let mut table =
					tx.open_table(storage::TABLE_DOCUMENTS).map_err(error::from_redb_error)?;

				let existing = table
					.get(key.as_str())
					.map_err(error::from_redb_error)?
					.map(|v| v.value().to_string());
				let Some(existing) = existing else {
					return Err(RelayError::NotFound);
				};

				let mut doc: Value = serde_json::from_str(&existing).map_err(Error::from)?;
				for (field, update) in &updates {
					apply_field_update(&mut doc, field, update)?;
				}

				let json = serde_json::to_string(&doc).map_err(Error::from)?;
				table.insert(key.as_str(), json.as_str()).map_err(error::from_redb_error)?;
			}
			tx.commit().map_err(error::from_redb_error)?;
			debug!(key = %key, fields = updates.len(), "Document updated");
			Ok(())
		})
		.await?
	}
}

// vim: ts=4
