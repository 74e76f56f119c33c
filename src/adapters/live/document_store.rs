//! Live document store backed by JSON-lines files.
//!
//! Each collection is a file `<root>/<collection>.jsonl` holding one JSON
//! object per line. Queries follow the document-database conventions the
//! toolkit relies on: dotted field paths, equality filters that also match
//! array elements, and `distinct` flattening array values.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use uuid::Uuid;

use crate::ports::{DocumentStore, Filter, PortError};

/// File-backed document store rooted at a directory.
pub struct LiveDocumentStore {
    root: PathBuf,
}

impl LiveDocumentStore {
    /// Creates a store whose collections live under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the collection files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{collection}.jsonl"))
    }

    fn load(&self, collection: &str) -> Result<Vec<Value>, PortError> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&path)?;
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| {
                serde_json::from_str(line).map_err(|e| {
                    PortError::from(format!("{}:{}: invalid document: {e}", path.display(), n + 1))
                })
            })
            .collect()
    }
}

fn lookup<'v>(document: &'v Value, field: &str) -> Option<&'v Value> {
    field.split('.').try_fold(document, |value, key| value.get(key))
}

fn matches(document: &Value, filter: &Filter) -> bool {
    filter.iter().all(|(field, expected)| match lookup(document, field) {
        Some(actual @ Value::Array(items)) => actual == expected || items.contains(expected),
        Some(actual) => actual == expected,
        None => expected.is_null(),
    })
}

impl DocumentStore for LiveDocumentStore {
    fn distinct(
        &self,
        collection: &str,
        field: &str,
        filter: Option<&Filter>,
    ) -> Result<Vec<Value>, PortError> {
        let mut values: Vec<Value> = Vec::new();
        let mut push = |value: &Value| {
            if !values.contains(value) {
                values.push(value.clone());
            }
        };
        for document in self.load(collection)? {
            if filter.is_some_and(|f| !matches(&document, f)) {
                continue;
            }
            match lookup(&document, field) {
                Some(Value::Array(items)) => items.iter().for_each(&mut push),
                Some(value) => push(value),
                None => {}
            }
        }
        Ok(values)
    }

    fn insert_one(&self, collection: &str, document: &Value) -> Result<Option<String>, PortError> {
        let Value::Object(fields) = document else {
            return Err("only JSON objects can be inserted".into());
        };
        let mut fields = fields.clone();
        let id = match fields.get("_id") {
            Some(Value::String(id)) => id.clone(),
            Some(other) => other.to_string(),
            None => {
                let id = Uuid::new_v4().to_string();
                fields.insert("_id".into(), Value::String(id.clone()));
                id
            }
        };

        std::fs::create_dir_all(&self.root)?;
        let line = serde_json::to_string(&Value::Object(fields))?;
        let mut file =
            OpenOptions::new().create(true).append(true).open(self.collection_path(collection))?;
        writeln!(file, "{line}")?;
        Ok(Some(id))
    }
}
