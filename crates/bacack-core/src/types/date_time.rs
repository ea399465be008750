use core::fmt;

/// Wire value meaning "any" / "unspecified" for every date and time octet.
pub const UNSPECIFIED: u8 = 0xFF;

/// BACnet date as it appears on the wire: year offset from 1900, month, day,
/// and weekday (1 = Monday). Any octet may be [`UNSPECIFIED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Date {
    pub year_since_1900: u8,
    pub month: u8,
    pub day: u8,
    pub weekday: u8,
}

impl Date {
    pub const fn from_bytes(b: [u8; 4]) -> Self {
        Self {
            year_since_1900: b[0],
            month: b[1],
            day: b[2],
            weekday: b[3],
        }
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        [self.year_since_1900, self.month, self.day, self.weekday]
    }

    pub const fn year(self) -> Option<u16> {
        match self.year_since_1900 {
            UNSPECIFIED => None,
            y => Some(1900 + y as u16),
        }
    }
}

/// BACnet time of day with hundredths. Any octet may be [`UNSPECIFIED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub hundredths: u8,
}

impl Time {
    pub const fn from_bytes(b: [u8; 4]) -> Self {
        Self {
            hour: b[0],
            minute: b[1],
            second: b[2],
            hundredths: b[3],
        }
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        [self.hour, self.minute, self.second, self.hundredths]
    }
}

struct Field(u8, usize);

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == UNSPECIFIED {
            f.write_str("*")
        } else {
            write!(f, "{:0width$}", self.0, width = self.1)
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year() {
            Some(y) => write!(f, "{y:04}")?,
            None => f.write_str("*")?,
        }
        write!(f, "-{}-{}", Field(self.month, 2), Field(self.day, 2))
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}.{}",
            Field(self.hour, 2),
            Field(self.minute, 2),
            Field(self.second, 2),
            Field(self.hundredths, 2)
        )
    }
}
