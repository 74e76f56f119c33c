//! Interactive selection port.

use super::PortError;

/// Presents a list of options and lets the user pick one.
pub trait Selector: Send + Sync {
    /// Shows `title` followed by `options` and returns the chosen index, or
    /// `None` if the user dismissed the menu.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be driven.
    fn select(&self, title: &str, options: &[String]) -> Result<Option<usize>, PortError>;
}
