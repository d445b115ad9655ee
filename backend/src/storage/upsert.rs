//! The replace-on-conflict primitive behind every keyed collection write.
//!
//! Each collection (KPI rows, employee KPI rows, submissions, targets,
//! hormone units, employees) is a plain `Vec` of records identified by a
//! composite natural key. Writing a record removes anything already
//! holding the same key and appends the new record, so a key exists at
//! most once and the survivor sits at the end of the sequence. Consumers
//! must not rely on the original position of an updated record.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    /// The record's key function returned None: a caller programming
    /// error, rejected before it can insert an unkeyed duplicate.
    #[error("record for collection '{0}' is missing its composite key fields")]
    MissingKey(&'static str),
}

/// Insert-or-replace `record` into `collection` by the key `key_fn`
/// computes. Pure: consumes and rebuilds the collection.
pub fn upsert<T, F>(
    collection: Vec<T>,
    record: T,
    key_fn: F,
    collection_name: &'static str,
) -> Result<Vec<T>, StorageError>
where
    F: Fn(&T) -> Option<String>,
{
    let key = key_fn(&record).ok_or(StorageError::MissingKey(collection_name))?;

    let mut result: Vec<T> = collection
        .into_iter()
        .filter(|existing| key_fn(existing).as_deref() != Some(key.as_str()))
        .collect();
    result.push(record);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Record {
        key: String,
        value: i32,
    }

    fn key_of(record: &Record) -> Option<String> {
        if record.key.is_empty() {
            None
        } else {
            Some(record.key.clone())
        }
    }

    fn record(key: &str, value: i32) -> Record {
        Record {
            key: key.to_string(),
            value,
        }
    }

    #[test]
    fn upsert_appends_new_key() {
        let collection = vec![record("a", 1)];
        let result = upsert(collection, record("b", 2), key_of, "test").unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[1], record("b", 2));
    }

    #[test]
    fn upsert_replaces_existing_key_and_moves_it_last() {
        let collection = vec![record("a", 1), record("b", 2)];
        let result = upsert(collection, record("a", 9), key_of, "test").unwrap();
        assert_eq!(result, vec![record("b", 2), record("a", 9)]);
    }

    #[test]
    fn upsert_is_idempotent() {
        let once = upsert(vec![record("a", 1)], record("a", 5), key_of, "test").unwrap();
        let twice = upsert(once.clone(), record("a", 5), key_of, "test").unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice.len(), 1);
    }

    #[test]
    fn upsert_rejects_record_without_key() {
        let result = upsert(vec![record("a", 1)], record("", 5), key_of, "test");
        assert_eq!(result.unwrap_err(), StorageError::MissingKey("test"));
    }

    #[test]
    fn upsert_leaves_unrelated_records_in_place() {
        let collection = vec![record("a", 1), record("b", 2), record("c", 3)];
        let result = upsert(collection, record("b", 7), key_of, "test").unwrap();
        assert_eq!(
            result,
            vec![record("a", 1), record("c", 3), record("b", 7)]
        );
    }
}
