use std::cmp::Ordering;

use crate::ua;

crate::data_type!(DataValue);

/// Attribute value together with its quality and timestamps.
///
/// Picosecond fields refine the 100-nanosecond resolution of the timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataValue {
    pub value: ua::Variant,
    pub status: ua::StatusCode,
    pub source_timestamp: ua::DateTime,
    pub source_picoseconds: u16,
    pub server_timestamp: ua::DateTime,
    pub server_picoseconds: u16,
}

impl DataValue {
    #[must_use]
    pub fn new(value: ua::Variant, status: ua::StatusCode) -> Self {
        Self {
            value,
            status,
            ..Self::default()
        }
    }
}

impl Ord for DataValue {
    /// Orders by status, then server timestamp and picoseconds, then source timestamp and
    /// picoseconds, then value.
    fn cmp(&self, other: &Self) -> Ordering {
        self.status
            .cmp(&other.status)
            .then_with(|| self.server_timestamp.cmp(&other.server_timestamp))
            .then_with(|| self.server_picoseconds.cmp(&other.server_picoseconds))
            .then_with(|| self.source_timestamp.cmp(&other.source_timestamp))
            .then_with(|| self.source_picoseconds.cmp(&other.source_picoseconds))
            .then_with(|| self.value.cmp(&other.value))
    }
}

impl PartialOrd for DataValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use crate::ua;

    use super::DataValue;

    #[test]
    fn orders_by_status_then_timestamps_then_value() {
        let good = DataValue::new(ua::Variant::scalar(2_i32), ua::StatusCode::GOOD);
        let bad = DataValue::new(
            ua::Variant::scalar(1_i32),
            ua::StatusCode::BAD_INTERNAL_ERROR,
        );
        // Status dominates the value.
        assert!(good < bad);

        let mut early = DataValue::new(ua::Variant::scalar(9_i32), ua::StatusCode::GOOD);
        early.server_timestamp = ua::DateTime::from_ticks(100);
        let mut late = DataValue::new(ua::Variant::scalar(1_i32), ua::StatusCode::GOOD);
        late.server_timestamp = ua::DateTime::from_ticks(200);
        // Server timestamp dominates the value.
        assert!(early < late);

        let a = DataValue::new(ua::Variant::scalar(1_i32), ua::StatusCode::GOOD);
        let b = DataValue::new(ua::Variant::scalar(2_i32), ua::StatusCode::GOOD);
        assert!(a < b);
    }
}
