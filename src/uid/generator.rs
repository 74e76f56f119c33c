//! Time-ordered UID generation with same-millisecond retries.

use std::time::Duration;

use tracing::{debug, trace, warn};

use super::{resolve_host_byte, DeploymentContext, Uid, UidError, EPOCH_OFFSET_MS, MAX_RETRY, TIME_BITS};
use crate::context::ServiceContext;
use crate::ports::{Clock, HostResolver, Sleeper};

/// Pause before retrying once every retry index in a millisecond is used.
pub const BACKOFF_INTERVAL: Duration = Duration::from_millis(500);

/// Issues [`Uid`]s from a clock reading, a retry index, a deployment context
/// and this host's byte.
///
/// The generator holds no state between calls. To keep a sequence unique,
/// pass each returned ID back as `last_uid` on the next call. Two calls in
/// the same millisecond without that hint return the same ID.
pub struct UidGenerator<'a> {
    clock: &'a dyn Clock,
    sleeper: &'a dyn Sleeper,
    host_byte: u8,
    max_retry: u16,
    backoff: Duration,
    backoff_limit: Option<u32>,
}

impl<'a> UidGenerator<'a> {
    /// Creates a generator with an already resolved host byte.
    #[must_use]
    pub fn new(clock: &'a dyn Clock, sleeper: &'a dyn Sleeper, host_byte: u8) -> Self {
        Self {
            clock,
            sleeper,
            host_byte,
            max_retry: MAX_RETRY,
            backoff: BACKOFF_INTERVAL,
            backoff_limit: None,
        }
    }

    /// Creates a generator, resolving the host byte through `host` once.
    #[must_use]
    pub fn resolving(
        clock: &'a dyn Clock,
        sleeper: &'a dyn Sleeper,
        host: &dyn HostResolver,
    ) -> Self {
        Self::new(clock, sleeper, resolve_host_byte(host))
    }

    /// Creates a generator from the ports of a service context.
    #[must_use]
    pub fn from_context(ctx: &'a ServiceContext) -> Self {
        Self::resolving(ctx.clock.as_ref(), ctx.sleeper.as_ref(), ctx.host.as_ref())
    }

    /// Caps the retry index below [`MAX_RETRY`].
    #[must_use]
    pub fn with_max_retry(mut self, max_retry: u16) -> Self {
        self.max_retry = max_retry.min(MAX_RETRY);
        self
    }

    /// Replaces [`BACKOFF_INTERVAL`].
    #[must_use]
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Gives up with [`UidError::Exhausted`] after `rounds` backoffs instead
    /// of waiting for the clock indefinitely.
    #[must_use]
    pub fn with_backoff_limit(mut self, rounds: u32) -> Self {
        self.backoff_limit = Some(rounds);
        self
    }

    /// The host byte stamped into every ID.
    #[must_use]
    pub fn host_byte(&self) -> u8 {
        self.host_byte
    }

    /// Generates an ID that differs from `last_uid`.
    ///
    /// Within one millisecond a collision with `last_uid` bumps the retry
    /// index; once the index passes the maximum the generator sleeps for the
    /// backoff interval and starts again at index 0, by which time the clock
    /// has moved on.
    ///
    /// # Errors
    ///
    /// Returns [`UidError::ClockBeforeEpoch`] or [`UidError::ClockOverflow`]
    /// if the clock is outside the representable range, and
    /// [`UidError::Exhausted`] if a backoff limit is set and reached.
    pub fn generate(
        &self,
        context: DeploymentContext,
        last_uid: Option<Uid>,
    ) -> Result<Uid, UidError> {
        let mut retry: u16 = 0;
        let mut rounds: u32 = 0;
        loop {
            let candidate = self.candidate(context, retry)?;
            let Some(last) = last_uid.filter(|last| *last == candidate) else {
                debug!(uid = %candidate, retry, %context, "generated UID");
                return Ok(candidate);
            };

            retry += 1;
            trace!(%last, retry, "candidate collided with last UID");
            if retry > self.max_retry {
                if self.backoff_limit.is_some_and(|limit| rounds >= limit) {
                    return Err(UidError::Exhausted { last, rounds });
                }
                warn!(backoff = ?self.backoff, "retry indexes exhausted, backing off");
                self.sleeper.sleep(self.backoff);
                rounds += 1;
                retry = 0;
            }
        }
    }

    fn candidate(&self, context: DeploymentContext, retry: u16) -> Result<Uid, UidError> {
        let now_ms = self.clock.now_millis();
        let offset = now_ms
            .checked_sub(EPOCH_OFFSET_MS)
            .and_then(|offset| u64::try_from(offset).ok())
            .ok_or(UidError::ClockBeforeEpoch { now_ms })?;
        if offset >> TIME_BITS != 0 {
            return Err(UidError::ClockOverflow { now_ms });
        }
        Ok(Uid::pack(offset, retry, context, self.host_byte))
    }
}
