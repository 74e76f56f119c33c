//! UID subcommands.

use chrono::{DateTime, Utc};

use crate::context::ServiceContext;
use crate::error::Result;
use crate::uid::{resolve_host_byte, DeploymentContext, Uid, UidError, UidGenerator};

/// Issues `count` UIDs, each avoiding the one before it, and prints them.
///
/// # Errors
///
/// Returns an error for contexts above 15 or if generation fails.
pub fn generate(ctx: &ServiceContext, context: u64, last: Option<Uid>, count: u32) -> Result<()> {
    let context = u8::try_from(context)
        .map_err(|_| UidError::ContextOutOfRange(context))
        .and_then(DeploymentContext::new)?;
    let generator = UidGenerator::from_context(ctx);

    let mut last = last;
    for _ in 0..count {
        let uid = generator.generate(context, last)?;
        println!("{uid}");
        last = Some(uid);
    }
    Ok(())
}

/// Prints the fields packed into `uid`.
pub fn decode(uid: Uid) {
    let issued = DateTime::<Utc>::from_timestamp_millis(uid.timestamp_ms())
        .map_or_else(|| "out of range".to_string(), |t| t.to_rfc3339());
    println!("uid:      {uid}");
    println!("issued:   {issued}");
    println!("retry:    {}", uid.retry_index());
    println!("context:  {}", uid.deployment_context());
    println!("host:     {}", uid.host_byte());
}

/// Prints the byte this host contributes to its UIDs.
pub fn host_byte(ctx: &ServiceContext) {
    println!("{}", resolve_host_byte(ctx.host.as_ref()));
}
