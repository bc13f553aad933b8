use crate::error::Error;

/// Document storage table, keyed by `{collection}/{doc_id}`, JSON text values
pub const TABLE_DOCUMENTS: redb::TableDefinition<&str, &str> = redb::TableDefinition::new("docs");

/// Database file name inside the storage directory
pub const DB_FILE_NAME: &str = "documents.redb";

fn check_segment(kind: &str, segment: &str) -> Result<(), Error> {
	if segment.is_empty() {
		return Err(Error::InvalidKey(format!("empty {}", kind)));
	}
	if segment.contains('/') {
		return Err(Error::InvalidKey(format!("{} must not contain '/': {}", kind, segment)));
	}
	Ok(())
}

/// Build the storage key for a document
pub fn doc_key(collection: &str, doc_id: &str) -> Result<String, Error> {
	check_segment("collection", collection)?;
	check_segment("document id", doc_id)?;
	Ok(format!("{}/{}", collection, doc_id))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_doc_key() {
		assert_eq!(doc_key("users", "bob").ok().as_deref(), Some("users/bob"));
	}

	#[test]
	fn test_doc_key_rejects_bad_segments() {
		assert!(matches!(doc_key("", "bob"), Err(Error::InvalidKey(_))));
		assert!(matches!(doc_key("users", ""), Err(Error::InvalidKey(_))));
		assert!(matches!(doc_key("users", "bob/x"), Err(Error::InvalidKey(_))));
		assert!(matches!(doc_key("a/b", "bob"), Err(Error::InvalidKey(_))));
	}
}

// vim: ts=4
