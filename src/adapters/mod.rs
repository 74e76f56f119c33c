//! Adapters implementing the port traits.
//!
//! - `live`: real clocks, sockets, files, HTTP and terminals.
//! - `recording`: wrap another adapter and capture every call into a cassette.
//! - `replaying`: serve previously captured calls back from a cassette.

pub mod live;
pub mod recording;
pub mod replaying;
