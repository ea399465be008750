use crate::types::{AccessError, ObjectId, PropertyValue};
use alloc::vec::Vec;

/// What a property resolved to in the acknowledgement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecordValue {
    Single(PropertyValue),
    /// Zero or several values inside one value group (arrays and lists).
    Array(Vec<PropertyValue>),
    Error(AccessError),
}

impl RecordValue {
    pub(crate) fn from_values(mut values: Vec<PropertyValue>) -> Self {
        if values.len() == 1 {
            Self::Single(values.remove(0))
        } else {
            Self::Array(values)
        }
    }

    pub fn as_single(&self) -> Option<&PropertyValue> {
        match self {
            Self::Single(v) => Some(v),
            _ => None,
        }
    }

    /// All values, whether the record holds one or many. Empty for errors.
    pub fn values(&self) -> &[PropertyValue] {
        match self {
            Self::Single(v) => core::slice::from_ref(v),
            Self::Array(values) => values,
            Self::Error(_) => &[],
        }
    }
}

/// One property read back from a device.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyRecord {
    /// Object the property belongs to, when the ACK named one before it.
    pub object_id: Option<ObjectId>,
    pub identifier: u32,
    pub array_index: Option<u32>,
    pub value: RecordValue,
}

#[cfg(test)]
mod tests {
    use super::RecordValue;
    use crate::types::PropertyValue;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn single_value_collapses() {
        let v = RecordValue::from_values(vec![PropertyValue::Unsigned(35)]);
        assert_eq!(v.as_single(), Some(&PropertyValue::Unsigned(35)));
        assert_eq!(v.values().len(), 1);
    }

    #[test]
    fn empty_and_multiple_become_arrays() {
        assert_eq!(RecordValue::from_values(Vec::new()), RecordValue::Array(Vec::new()));
        let v = RecordValue::from_values(vec![PropertyValue::Null, PropertyValue::Null]);
        assert!(v.as_single().is_none());
        assert_eq!(v.values().len(), 2);
    }
}
