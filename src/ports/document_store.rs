//! Document store port for distinct-value queries and inserts.

use serde_json::{Map, Value};

use super::PortError;

/// Equality filter: every field must equal the given value.
pub type Filter = Map<String, Value>;

/// A collection-oriented document store.
pub trait DocumentStore: Send + Sync {
    /// Returns the distinct values of `field` across documents in
    /// `collection` that match `filter`.
    ///
    /// Array values are flattened, so each element counts as a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be queried.
    fn distinct(
        &self,
        collection: &str,
        field: &str,
        filter: Option<&Filter>,
    ) -> Result<Vec<Value>, PortError>;

    /// Inserts `document` into `collection`, returning the inserted id if the
    /// store reported one.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn insert_one(&self, collection: &str, document: &Value) -> Result<Option<String>, PortError>;
}
