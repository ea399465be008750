//! Context-tag roles for each acknowledgement the walker understands.
//!
//! A layout is plain data: the walker asks it what a context tag means given
//! the group it appears in, so supporting another service is a matter of
//! adding a table, not code.

use crate::services::{SERVICE_READ_PROPERTY, SERVICE_READ_PROPERTY_MULTIPLE, SERVICE_READ_RANGE};

/// Meaning of a context tag inside an ACK body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextRole {
    ObjectIdentifier,
    PropertyIdentifier,
    ArrayIndex,
    /// Opening tag of a group holding the property's application values.
    PropertyValue,
    /// Opening tag of a group holding an error class and code.
    AccessError,
    /// Opening tag of a per-object list of results.
    ResultList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleEntry {
    /// Tag number of the innermost open group, `None` at the top level.
    pub enclosing: Option<u8>,
    pub tag_num: u8,
    pub role: ContextRole,
}

impl RoleEntry {
    pub const fn top(tag_num: u8, role: ContextRole) -> Self {
        Self {
            enclosing: None,
            tag_num,
            role,
        }
    }

    pub const fn within(enclosing: u8, tag_num: u8, role: ContextRole) -> Self {
        Self {
            enclosing: Some(enclosing),
            tag_num,
            role,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AckLayout<'a> {
    pub service_choice: u8,
    pub name: &'a str,
    pub entries: &'a [RoleEntry],
}

impl<'a> AckLayout<'a> {
    pub fn role(&self, enclosing: Option<u8>, tag_num: u8) -> Option<ContextRole> {
        self.entries
            .iter()
            .find(|e| e.enclosing == enclosing && e.tag_num == tag_num)
            .map(|e| e.role)
    }
}

/// Layout used for services without a table: every context tag is skipped.
pub const EMPTY_LAYOUT: AckLayout<'static> = AckLayout {
    service_choice: 0xFF,
    name: "unknown",
    entries: &[],
};

pub const READ_PROPERTY_ACK: AckLayout<'static> = AckLayout {
    service_choice: SERVICE_READ_PROPERTY,
    name: "read-property",
    entries: &[
        RoleEntry::top(0, ContextRole::ObjectIdentifier),
        RoleEntry::top(1, ContextRole::PropertyIdentifier),
        RoleEntry::top(2, ContextRole::ArrayIndex),
        RoleEntry::top(3, ContextRole::PropertyValue),
    ],
};

pub const READ_PROPERTY_MULTIPLE_ACK: AckLayout<'static> = AckLayout {
    service_choice: SERVICE_READ_PROPERTY_MULTIPLE,
    name: "read-property-multiple",
    entries: &[
        RoleEntry::top(0, ContextRole::ObjectIdentifier),
        RoleEntry::top(1, ContextRole::ResultList),
        RoleEntry::within(1, 2, ContextRole::PropertyIdentifier),
        RoleEntry::within(1, 3, ContextRole::ArrayIndex),
        RoleEntry::within(1, 4, ContextRole::PropertyValue),
        RoleEntry::within(1, 5, ContextRole::AccessError),
    ],
};

/// ReadRange-ACK. Result flags [3], item count [4] and first sequence
/// number [6] carry no property data and are skipped.
pub const READ_RANGE_ACK: AckLayout<'static> = AckLayout {
    service_choice: SERVICE_READ_RANGE,
    name: "read-range",
    entries: &[
        RoleEntry::top(0, ContextRole::ObjectIdentifier),
        RoleEntry::top(1, ContextRole::PropertyIdentifier),
        RoleEntry::top(2, ContextRole::ArrayIndex),
        RoleEntry::top(5, ContextRole::PropertyValue),
    ],
};

pub static STANDARD_LAYOUTS: &[AckLayout<'static>] =
    &[READ_PROPERTY_ACK, READ_PROPERTY_MULTIPLE_ACK, READ_RANGE_ACK];

pub fn find_layout<'s, 'a>(
    layouts: &'s [AckLayout<'a>],
    service_choice: u8,
) -> Option<&'s AckLayout<'a>> {
    layouts.iter().find(|l| l.service_choice == service_choice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_depend_on_enclosing_group() {
        let rpm = &READ_PROPERTY_MULTIPLE_ACK;
        assert_eq!(rpm.role(None, 0), Some(ContextRole::ObjectIdentifier));
        assert_eq!(rpm.role(Some(1), 2), Some(ContextRole::PropertyIdentifier));
        assert_eq!(rpm.role(None, 2), None);
        assert_eq!(rpm.role(Some(1), 5), Some(ContextRole::AccessError));
        assert_eq!(READ_PROPERTY_ACK.role(None, 3), Some(ContextRole::PropertyValue));
    }

    #[test]
    fn standard_layouts_are_keyed_by_service() {
        assert_eq!(
            find_layout(STANDARD_LAYOUTS, SERVICE_READ_PROPERTY).map(|l| l.name),
            Some("read-property")
        );
        assert_eq!(
            find_layout(STANDARD_LAYOUTS, SERVICE_READ_RANGE).map(|l| l.name),
            Some("read-range")
        );
        assert!(find_layout(STANDARD_LAYOUTS, 0x1F).is_none());
        assert!(EMPTY_LAYOUT.role(None, 0).is_none());
    }
}
