//! Snowflake ID - 64-bit time-ordered identifier for posts and notifications
//!
//! Structure:
//! - Bits 63-22: Timestamp (milliseconds since the Lonkind epoch)
//! - Bits 21-12: Worker ID (0-1023)
//! - Bits 11-0:  Sequence number (0-4095)
//!
//! Ordering by id is ordering by creation time, which is what the
//! notification feed cursor relies on.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const WORKER_BITS: i64 = 10;
const SEQUENCE_BITS: i64 = 12;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;
const TIMESTAMP_SHIFT: i64 = WORKER_BITS + SEQUENCE_BITS;

/// Time-ordered 64-bit identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// Lonkind epoch: 2025-01-01 00:00:00 UTC (milliseconds)
    pub const EPOCH: i64 = 1_735_689_600_000;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Milliseconds since the Unix epoch at which this id was minted
    #[inline]
    pub fn timestamp(&self) -> i64 {
        (self.0 >> TIMESTAMP_SHIFT) + Self::EPOCH
    }

    #[inline]
    pub fn worker_id(&self) -> u16 {
        ((self.0 >> SEQUENCE_BITS) & ((1 << WORKER_BITS) - 1)) as u16
    }

    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        chrono::DateTime::from_timestamp_millis(self.timestamp()).unwrap_or_default()
    }

    /// Parse from the decimal string form used on the wire
    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SnowflakeParseError::Empty);
        }
        match s.parse::<i64>() {
            Ok(id) if id < 0 => Err(SnowflakeParseError::Negative),
            Ok(id) => Ok(Self(id)),
            Err(_) => Err(SnowflakeParseError::InvalidFormat),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("snowflake id is empty")]
    Empty,

    #[error("snowflake id must not be negative")]
    Negative,

    #[error("invalid snowflake format")]
    InvalidFormat,
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}

// Serialized as a string so JavaScript clients keep full precision
impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct SnowflakeVisitor;

        impl Visitor<'_> for SnowflakeVisitor {
            type Value = Snowflake;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer snowflake id")
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Snowflake, E> {
                Ok(Snowflake(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Snowflake, E> {
                i64::try_from(value)
                    .map(Snowflake)
                    .map_err(|_| E::custom("snowflake id out of range"))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Snowflake, E> {
                Snowflake::parse(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(SnowflakeVisitor)
    }
}

/// Thread-safe Snowflake generator
///
/// The last timestamp and sequence are packed into one atomic word so that
/// a single compare-exchange claims a slot.
pub struct SnowflakeGenerator {
    worker_id: u16,
    state: AtomicI64,
}

impl SnowflakeGenerator {
    pub const MAX_WORKER_ID: u16 = (1 << WORKER_BITS) - 1;

    /// Create a generator; worker ids above `MAX_WORKER_ID` are masked
    pub fn new(worker_id: u16) -> Self {
        Self {
            worker_id: worker_id & Self::MAX_WORKER_ID,
            state: AtomicI64::new(0),
        }
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }

    pub fn generate(&self) -> Snowflake {
        loop {
            let current = self.state.load(Ordering::Acquire);
            let last_ms = current >> SEQUENCE_BITS;
            let now_ms = Self::elapsed_millis().max(last_ms);

            let next = if now_ms == last_ms {
                let sequence = (current & SEQUENCE_MASK) + 1;
                if sequence > SEQUENCE_MASK {
                    // Sequence exhausted for this millisecond
                    std::hint::spin_loop();
                    continue;
                }
                (last_ms << SEQUENCE_BITS) | sequence
            } else {
                now_ms << SEQUENCE_BITS
            };

            if self
                .state
                .compare_exchange(current, next, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                let millis = next >> SEQUENCE_BITS;
                let sequence = next & SEQUENCE_MASK;
                return Snowflake::new(
                    (millis << TIMESTAMP_SHIFT)
                        | (i64::from(self.worker_id) << SEQUENCE_BITS)
                        | sequence,
                );
            }
        }
    }

    fn elapsed_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64 - Snowflake::EPOCH)
            .unwrap_or(0)
            .max(0)
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}
