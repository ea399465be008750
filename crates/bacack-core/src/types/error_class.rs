use core::fmt;

/// BACnet error class reported with a property access error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ErrorClass {
    Device = 0,
    Object = 1,
    Property = 2,
    Resources = 3,
    Security = 4,
    Services = 5,
    Vt = 6,
    Communication = 7,
}

/// Subset of BACnet error codes seen in read acknowledgements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum ErrorCode {
    Other = 0,
    ConfigurationInProgress = 2,
    DeviceBusy = 3,
    ReadAccessDenied = 27,
    UnknownObject = 31,
    UnknownProperty = 32,
    ValueOutOfRange = 37,
    WriteAccessDenied = 40,
    InvalidArrayIndex = 42,
    PropertyIsNotAnArray = 50,
}

impl ErrorClass {
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Device),
            1 => Some(Self::Object),
            2 => Some(Self::Property),
            3 => Some(Self::Resources),
            4 => Some(Self::Security),
            5 => Some(Self::Services),
            6 => Some(Self::Vt),
            7 => Some(Self::Communication),
            _ => None,
        }
    }
}

impl ErrorCode {
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Other),
            2 => Some(Self::ConfigurationInProgress),
            3 => Some(Self::DeviceBusy),
            27 => Some(Self::ReadAccessDenied),
            31 => Some(Self::UnknownObject),
            32 => Some(Self::UnknownProperty),
            37 => Some(Self::ValueOutOfRange),
            40 => Some(Self::WriteAccessDenied),
            42 => Some(Self::InvalidArrayIndex),
            50 => Some(Self::PropertyIsNotAnArray),
            _ => None,
        }
    }
}

/// Error returned in place of a value inside a ReadPropertyMultiple result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessError {
    pub error_class: u32,
    pub error_code: u32,
}

impl AccessError {
    pub const fn class(self) -> Option<ErrorClass> {
        ErrorClass::from_u32(self.error_class)
    }

    pub const fn code(self) -> Option<ErrorCode> {
        ErrorCode::from_u32(self.error_code)
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error: class ")?;
        match self.class() {
            Some(class) => write!(f, "{class:?}")?,
            None => write!(f, "{}", self.error_class)?,
        }
        f.write_str(", code ")?;
        match self.code() {
            Some(code) => write!(f, "{code:?}"),
            None => write!(f, "{}", self.error_code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AccessError, ErrorClass, ErrorCode};
    use alloc::string::ToString;

    #[test]
    fn names_known_pairs() {
        let err = AccessError {
            error_class: 2,
            error_code: 32,
        };
        assert_eq!(err.class(), Some(ErrorClass::Property));
        assert_eq!(err.code(), Some(ErrorCode::UnknownProperty));
        assert_eq!(err.to_string(), "error: class Property, code UnknownProperty");
    }

    #[test]
    fn keeps_raw_numbers_for_unknown_values() {
        let err = AccessError {
            error_class: 9,
            error_code: 300,
        };
        assert_eq!(err.to_string(), "error: class 9, code 300");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn error_names_serialize_as_variants() {
        assert_eq!(serde_json::to_string(&ErrorClass::Property).unwrap(), "\"Property\"");
        let code: ErrorCode = serde_json::from_str("\"UnknownProperty\"").unwrap();
        assert_eq!(code, ErrorCode::UnknownProperty);
    }
}
