use std::{fmt, str::FromStr};

crate::data_type!(NumericRange);

/// Closed index interval over one dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NumericRangeDimension {
    pub start: u32,
    pub end: u32,
}

impl NumericRangeDimension {
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Single-index dimension.
    #[must_use]
    pub const fn index(index: u32) -> Self {
        Self {
            start: index,
            end: index,
        }
    }

    /// Number of addressed elements before clipping.
    #[must_use]
    pub const fn extent(self) -> u32 {
        self.end - self.start + 1
    }
}

/// Ordered list of closed index intervals, one per dimension.
///
/// One-dimensional ranges may also address bytes of a `String` or `ByteString` scalar.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NumericRange {
    dimensions: Vec<NumericRangeDimension>,
}

impl NumericRange {
    /// Creates a range from its dimensions.
    ///
    /// Every dimension must satisfy `start <= end`; returns `None` otherwise.
    #[must_use]
    pub fn new(dimensions: Vec<NumericRangeDimension>) -> Option<Self> {
        if dimensions.iter().any(|dim| dim.start > dim.end) {
            return None;
        }
        Some(Self { dimensions })
    }

    /// Shortcut for the common one-dimensional case.
    #[must_use]
    pub fn bounds(start: u32, end: u32) -> Option<Self> {
        Self::new(vec![NumericRangeDimension::new(start, end)])
    }

    #[must_use]
    pub fn dimensions(&self) -> &[NumericRangeDimension] {
        &self.dimensions
    }

    #[must_use]
    pub fn single_dimension(&self) -> Option<NumericRangeDimension> {
        match self.dimensions.as_slice() {
            &[dim] => Some(dim),
            _ => None,
        }
    }
}

impl fmt::Display for NumericRange {
    /// Formats in the part 4 textual form, e.g. `1:3` or `1:3,0:2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, dim) in self.dimensions.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            if dim.start == dim.end {
                write!(f, "{}", dim.start)?;
            } else {
                write!(f, "{}:{}", dim.start, dim.end)?;
            }
        }
        Ok(())
    }
}

/// Error parsing textual numeric-range form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid numeric range string")]
pub struct ParseNumericRangeError;

impl FromStr for NumericRange {
    type Err = ParseNumericRangeError;

    fn from_str(str: &str) -> Result<Self, Self::Err> {
        if str.is_empty() {
            return Err(ParseNumericRangeError);
        }
        let mut dimensions = Vec::new();
        for part in str.split(',') {
            let dim = match part.split_once(':') {
                Some((start, end)) => {
                    let start = start.parse().map_err(|_| ParseNumericRangeError)?;
                    let end = end.parse().map_err(|_| ParseNumericRangeError)?;
                    // Ranges with a single index must be written without the colon.
                    if start >= end {
                        return Err(ParseNumericRangeError);
                    }
                    NumericRangeDimension::new(start, end)
                }
                None => {
                    NumericRangeDimension::index(part.parse().map_err(|_| ParseNumericRangeError)?)
                }
            };
            dimensions.push(dim);
        }
        Ok(Self { dimensions })
    }
}

#[cfg(test)]
mod tests {
    use crate::ua;

    #[test]
    fn parse_format_round_trip() {
        for text in ["2", "1:3", "1:3,0:2"] {
            let range: ua::NumericRange = text.parse().expect("should parse range");
            assert_eq!(range.to_string(), text);
        }
    }

    #[test]
    fn rejects_malformed() {
        assert!("".parse::<ua::NumericRange>().is_err());
        assert!("3:1".parse::<ua::NumericRange>().is_err());
        assert!("1:1".parse::<ua::NumericRange>().is_err());
        assert!("a:b".parse::<ua::NumericRange>().is_err());
    }

    #[test]
    fn invalid_bounds() {
        assert!(ua::NumericRange::bounds(3, 1).is_none());
        assert!(ua::NumericRange::bounds(1, 1).is_some());
    }
}
