crate::data_type!(DateTime);

/// OPC UA timestamp.
///
/// Encoded as Windows file time: a 64-bit count of 100-nanosecond intervals elapsed since
/// 12:00 A.M. January 1, 1601 (UTC).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime(i64);

/// Ticks between 1601-01-01 and 1970-01-01.
const UNIX_EPOCH_TICKS: i64 = 116_444_736_000_000_000;

/// Nanoseconds per tick.
const NANOS_PER_TICK: i128 = 100;

impl DateTime {
    #[must_use]
    pub const fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }

    /// Returns the raw tick count.
    #[must_use]
    pub const fn ticks(self) -> i64 {
        self.0
    }

    #[cfg(feature = "time")]
    pub fn new(dt: time::OffsetDateTime) -> Option<Self> {
        let nanos_unix = dt.unix_timestamp_nanos();
        let ticks_unix = nanos_unix / NANOS_PER_TICK;
        let ticks_ua = ticks_unix + i128::from(UNIX_EPOCH_TICKS);
        i64::try_from(ticks_ua).ok().map(Self)
    }

    #[must_use]
    #[cfg(feature = "time")]
    pub fn to_utc(self) -> Option<time::OffsetDateTime> {
        let ticks_unix = i128::from(self.0) - i128::from(UNIX_EPOCH_TICKS);
        let nanos_unix = ticks_unix * NANOS_PER_TICK;
        time::OffsetDateTime::from_unix_timestamp_nanos(nanos_unix).ok()
    }
}

#[cfg(feature = "time")]
impl From<time::OffsetDateTime> for DateTime {
    fn from(dt: time::OffsetDateTime) -> Self {
        Self::new(dt).unwrap_or_default()
    }
}

#[cfg(all(feature = "serde", feature = "time"))]
impl serde::Serialize for DateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self.to_utc() {
            Some(dt) => dt.serialize(serializer),
            None => serializer.serialize_i64(self.0),
        }
    }
}
