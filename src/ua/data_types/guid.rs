use std::{fmt, str::FromStr};

crate::data_type!(Guid);

/// OPC UA GUID.
///
/// Three little-endian numeric fields plus an eight-byte opaque tail, compared field by field and
/// then byte-wise on the tail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Guid {
    data1: u32,
    data2: u16,
    data3: u16,
    data4: [u8; 8],
}

impl Guid {
    #[must_use]
    pub const fn new(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Self {
            data1,
            data2,
            data3,
            data4,
        }
    }

    #[must_use]
    #[cfg(feature = "uuid")]
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        let (data1, data2, data3, data4) = uuid.as_fields();
        Self::new(data1, data2, data3, *data4)
    }

    #[must_use]
    #[cfg(feature = "uuid")]
    pub const fn to_uuid(&self) -> uuid::Uuid {
        uuid::Uuid::from_fields(self.data1, self.data2, self.data3, &self.data4)
    }

    /// Returns the 16 bytes hashed and compared by [`ua::NodeId`](crate::ua::NodeId).
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 16] {
        let mut bytes = [0_u8; 16];
        bytes[0..4].copy_from_slice(&self.data1.to_le_bytes());
        bytes[4..6].copy_from_slice(&self.data2.to_le_bytes());
        bytes[6..8].copy_from_slice(&self.data3.to_le_bytes());
        bytes[8..16].copy_from_slice(&self.data4);
        bytes
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            self.data1,
            self.data2,
            self.data3,
            self.data4[0],
            self.data4[1],
            self.data4[2],
            self.data4[3],
            self.data4[4],
            self.data4[5],
            self.data4[6],
            self.data4[7],
        )
    }
}

/// Error parsing textual GUID form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid GUID string")]
pub struct ParseGuidError;

impl FromStr for Guid {
    type Err = ParseGuidError;

    /// Parses the `XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX` hex form.
    fn from_str(str: &str) -> Result<Self, Self::Err> {
        let groups: Vec<&str> = str.split('-').collect();
        let [g1, g2, g3, g4, g5] = groups.as_slice() else {
            return Err(ParseGuidError);
        };
        if g1.len() != 8 || g2.len() != 4 || g3.len() != 4 || g4.len() != 4 || g5.len() != 12 {
            return Err(ParseGuidError);
        }
        let data1 = u32::from_str_radix(g1, 16).map_err(|_| ParseGuidError)?;
        let data2 = u16::from_str_radix(g2, 16).map_err(|_| ParseGuidError)?;
        let data3 = u16::from_str_radix(g3, 16).map_err(|_| ParseGuidError)?;
        let tail = u64::from_str_radix(&format!("{g4}{g5}"), 16).map_err(|_| ParseGuidError)?;
        Ok(Self::new(data1, data2, data3, tail.to_be_bytes()))
    }
}

#[cfg(feature = "uuid")]
impl From<uuid::Uuid> for Guid {
    fn from(uuid: uuid::Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

#[cfg(all(feature = "serde", feature = "uuid"))]
impl serde::Serialize for Guid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_uuid().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use crate::ua;

    #[test]
    fn parse_format_round_trip() {
        let text = "09087e75-8e5e-499b-954f-f2a9603db28a";
        let guid: ua::Guid = text.parse().expect("should parse GUID");
        assert_eq!(guid.to_string(), text);
    }

    #[test]
    fn rejects_malformed() {
        assert!("09087e75-8e5e-499b-954f".parse::<ua::Guid>().is_err());
        assert!("0908zz75-8e5e-499b-954f-f2a9603db28a".parse::<ua::Guid>().is_err());
    }

    #[test]
    fn orders_by_fields_then_tail() {
        let a = ua::Guid::new(1, 0, 0, [0; 8]);
        let b = ua::Guid::new(2, 0, 0, [0; 8]);
        let c = ua::Guid::new(2, 0, 0, [0, 0, 0, 0, 0, 0, 0, 1]);
        assert!(a < b);
        assert!(b < c);
    }
}
