//! `neuronbridge status` command.

use crate::cli::StatusArgs;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::status::update_library_status;

/// Execute the `status` command.
///
/// # Errors
///
/// Returns an error if the update is incomplete or the store does not take
/// the record.
pub fn run(ctx: &ServiceContext, settings: &Settings, args: &StatusArgs) -> Result<()> {
    let recorded =
        update_library_status(ctx, &args.collection, args.update(), &settings.status_defaults())?;
    if !recorded {
        return Err(Error::NotRecorded { collection: args.collection.clone() });
    }
    println!("Status recorded in {}", args.collection);
    Ok(())
}
