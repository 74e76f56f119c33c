//! JACS-style unique identifiers.
//!
//! A [`Uid`] packs four fields into a `u64`, high to low:
//!
//! ```text
//! | 42 bits: ms since EPOCH_OFFSET_MS | 10 bits: retry | 4 bits: context | 8 bits: host |
//! ```
//!
//! IDs from one host and deployment context sort by creation time. The
//! generator only avoids the single previous ID its caller hands back, so
//! wider uniqueness depends on giving concurrent callers distinct contexts or
//! hosts.

pub mod generator;
pub mod host;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use generator::UidGenerator;
pub use host::resolve_host_byte;

/// Reference instant subtracted from the clock, in ms since the Unix epoch.
pub const EPOCH_OFFSET_MS: i64 = 921_700_000_000;

/// Highest retry index tried within one millisecond before backing off.
pub const MAX_RETRY: u16 = 1023;

const TIME_SHIFT: u32 = 22;
const TIME_BITS: u32 = 42;
const RETRY_SHIFT: u32 = 12;
const RETRY_MASK: u64 = 0x3FF;
const CONTEXT_SHIFT: u32 = 8;
const CONTEXT_MASK: u64 = 0xF;
const HOST_MASK: u64 = 0xFF;

/// Errors that stop UID generation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UidError {
    /// The deployment context does not fit its 4-bit field.
    #[error("deployment context {0} does not fit in 4 bits (max {max})", max = DeploymentContext::MAX)]
    ContextOutOfRange(u64),
    /// The clock reads earlier than the UID epoch.
    #[error("clock reads {now_ms} ms, before the UID epoch at {epoch} ms", epoch = EPOCH_OFFSET_MS)]
    ClockBeforeEpoch {
        /// Clock reading in ms since the Unix epoch.
        now_ms: i64,
    },
    /// The clock is past the last time the 42-bit field can hold.
    #[error("clock reads {now_ms} ms, past the last representable UID time")]
    ClockOverflow {
        /// Clock reading in ms since the Unix epoch.
        now_ms: i64,
    },
    /// Every attempt collided with the previous UID and the backoff limit
    /// was reached without the clock moving on.
    #[error("no UID distinct from {last} after {rounds} backoff rounds")]
    Exhausted {
        /// The UID every candidate collided with.
        last: Uid,
        /// Backoff rounds performed.
        rounds: u32,
    },
}

/// Tag for the logical role or shard issuing IDs, `0..=15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DeploymentContext(u8);

impl DeploymentContext {
    /// Largest value the 4-bit field holds.
    pub const MAX: u8 = 15;

    /// Validates `value` against the field width.
    ///
    /// # Errors
    ///
    /// Returns [`UidError::ContextOutOfRange`] for values above 15; wider
    /// values would bleed into the retry field.
    pub fn new(value: u8) -> Result<Self, UidError> {
        if value > Self::MAX {
            return Err(UidError::ContextOutOfRange(u64::from(value)));
        }
        Ok(Self(value))
    }

    /// The raw tag.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for DeploymentContext {
    fn default() -> Self {
        Self(2)
    }
}

impl TryFrom<u8> for DeploymentContext {
    type Error = UidError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeploymentContext> for u8 {
    fn from(context: DeploymentContext) -> Self {
        context.0
    }
}

impl fmt::Display for DeploymentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A packed 64-bit identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(u64);

impl Uid {
    /// Wraps a raw value, e.g. one read back from storage.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Packs the four fields.
    ///
    /// `time_offset_ms` must fit in 42 bits and `retry` in 10; the generator
    /// checks both before calling this.
    #[must_use]
    pub(crate) fn pack(
        time_offset_ms: u64,
        retry: u16,
        context: DeploymentContext,
        host_byte: u8,
    ) -> Self {
        Self(
            (time_offset_ms << TIME_SHIFT)
                + (u64::from(retry) << RETRY_SHIFT)
                + (u64::from(context.get()) << CONTEXT_SHIFT)
                + u64::from(host_byte),
        )
    }

    /// The raw integer.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Milliseconds between [`EPOCH_OFFSET_MS`] and issue time.
    #[must_use]
    pub const fn time_offset_ms(self) -> u64 {
        self.0 >> TIME_SHIFT
    }

    /// Issue time in milliseconds since the Unix epoch.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn timestamp_ms(self) -> i64 {
        self.time_offset_ms() as i64 + EPOCH_OFFSET_MS
    }

    /// Retry index used when the ID was issued.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn retry_index(self) -> u16 {
        ((self.0 >> RETRY_SHIFT) & RETRY_MASK) as u16
    }

    /// Deployment context bits.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn deployment_context(self) -> u8 {
        ((self.0 >> CONTEXT_SHIFT) & CONTEXT_MASK) as u8
    }

    /// Host byte bits.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn host_byte(self) -> u8 {
        (self.0 & HOST_MASK) as u8
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Uid {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<Uid> for u64 {
    fn from(uid: Uid) -> Self {
        uid.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(value: u8) -> DeploymentContext {
        DeploymentContext::new(value).unwrap()
    }

    #[test]
    fn packs_fields_high_to_low() {
        let uid = Uid::pack(100, 0, ctx(2), 5);
        assert_eq!(uid.as_u64(), (100 << 22) + (2 << 8) + 5);
        assert_eq!(uid.as_u64(), 419_430_917);

        let retried = Uid::pack(100, 1, ctx(2), 5);
        assert_eq!(retried.as_u64(), 419_435_013);
    }

    #[test]
    fn decodes_every_field() {
        let uid = Uid::pack(123_456, 1023, ctx(15), 254);
        assert_eq!(uid.time_offset_ms(), 123_456);
        assert_eq!(uid.timestamp_ms(), EPOCH_OFFSET_MS + 123_456);
        assert_eq!(uid.retry_index(), 1023);
        assert_eq!(uid.deployment_context(), 15);
        assert_eq!(uid.host_byte(), 254);
    }

    #[test]
    fn wide_contexts_are_rejected() {
        assert_eq!(DeploymentContext::new(16), Err(UidError::ContextOutOfRange(16)));
        assert_eq!(DeploymentContext::try_from(15).map(u8::from), Ok(15));
        assert_eq!(DeploymentContext::default().get(), 2);
    }

    #[test]
    fn context_deserialization_validates() {
        let ok: DeploymentContext = serde_json::from_str("7").unwrap();
        assert_eq!(ok.get(), 7);
        assert!(serde_json::from_str::<DeploymentContext>("200").is_err());
    }

    #[test]
    fn parses_and_displays_as_integer() {
        let uid: Uid = " 419435013 ".parse().unwrap();
        assert_eq!(uid.to_string(), "419435013");
        assert_eq!(uid.retry_index(), 1);
        assert!("not-a-uid".parse::<Uid>().is_err());
    }
}
