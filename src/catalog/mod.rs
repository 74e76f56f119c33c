//! Listing and interactive selection of release artifacts.
//!
//! Every `select_*` function hands its candidates and a title to the
//! [`Selector`](crate::ports::Selector) port and returns `None` when the
//! user picks nothing. Printing outcomes is left to the caller.

pub mod library;
pub mod template;
pub mod version;

use std::collections::BTreeSet;

use serde_json::Value;

use crate::context::ServiceContext;
use crate::error::{Error, Result};

pub use library::{list_libraries, select_library, LibraryConfig, LibraryEntry, LibrarySource};
pub use template::{select_template, templates};
pub use version::{
    data_versions, ppp_versions, release_versions, select_data_version, select_ppp_version,
    select_release_version,
};

/// Document field naming the library a record belongs to.
pub const LIBRARY_NAME_FIELD: &str = "libraryName";

fn choose(ctx: &ServiceContext, title: &str, options: Vec<String>) -> Result<Option<String>> {
    let index = ctx.selector.select(title, &options).map_err(Error::port("selector"))?;
    Ok(index.and_then(|i| options.into_iter().nth(i)))
}

fn sorted_unique(values: impl IntoIterator<Item = String>) -> Vec<String> {
    values.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}

fn value_text(value: &Value) -> String {
    value.as_str().map_or_else(|| value.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sorted_unique_orders_and_dedups() {
        let values = ["b", "a", "b"].map(String::from);
        assert_eq!(sorted_unique(values), vec!["a", "b"]);
    }

    #[test]
    fn value_text_unquotes_strings_only() {
        assert_eq!(value_text(&json!("v2.1.0")), "v2.1.0");
        assert_eq!(value_text(&json!(3)), "3");
    }
}
