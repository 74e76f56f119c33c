//! Object store port for listing key prefixes.

use std::future::Future;
use std::pin::Pin;

use super::PortError;

/// Boxed future returned by [`ObjectStore::list_prefixes`].
pub type ListFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<String>, PortError>> + Send + 'a>>;

/// Lists "directories" in a bucket.
pub trait ObjectStore: Send + Sync {
    /// Returns the immediate child prefixes of `prefix` in `bucket`, using `/`
    /// as the delimiter.
    ///
    /// Each returned value is a full key prefix ending in `/`, for example
    /// `JRC2018_Unisex_20x_HR/FlyEM_Hemibrain_v1.2.1/` for the prefix
    /// `JRC2018_Unisex_20x_HR/`. An empty `prefix` lists the bucket root.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing request fails.
    fn list_prefixes<'a>(&'a self, bucket: &'a str, prefix: &'a str) -> ListFuture<'a>;
}
