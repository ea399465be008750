/// BACnet object type carried in the upper 10 bits of an object identifier.
///
/// Standard types have named variants; anything else, including the
/// vendor range 128–1023, is kept as [`Other`](Self::Other).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectType {
    AnalogInput,
    AnalogOutput,
    AnalogValue,
    BinaryInput,
    BinaryOutput,
    BinaryValue,
    Calendar,
    Command,
    Device,
    EventEnrollment,
    File,
    Group,
    Loop,
    MultiStateInput,
    MultiStateOutput,
    NotificationClass,
    Program,
    Schedule,
    Averaging,
    MultiStateValue,
    TrendLog,
    LifeSafetyPoint,
    LifeSafetyZone,
    Accumulator,
    PulseConverter,
    EventLog,
    GlobalGroup,
    TrendLogMultiple,
    LoadControl,
    StructuredView,
    AccessDoor,
    Other(u16),
}

const KNOWN: [(ObjectType, &str); 31] = [
    (ObjectType::AnalogInput, "analog-input"),
    (ObjectType::AnalogOutput, "analog-output"),
    (ObjectType::AnalogValue, "analog-value"),
    (ObjectType::BinaryInput, "binary-input"),
    (ObjectType::BinaryOutput, "binary-output"),
    (ObjectType::BinaryValue, "binary-value"),
    (ObjectType::Calendar, "calendar"),
    (ObjectType::Command, "command"),
    (ObjectType::Device, "device"),
    (ObjectType::EventEnrollment, "event-enrollment"),
    (ObjectType::File, "file"),
    (ObjectType::Group, "group"),
    (ObjectType::Loop, "loop"),
    (ObjectType::MultiStateInput, "multi-state-input"),
    (ObjectType::MultiStateOutput, "multi-state-output"),
    (ObjectType::NotificationClass, "notification-class"),
    (ObjectType::Program, "program"),
    (ObjectType::Schedule, "schedule"),
    (ObjectType::Averaging, "averaging"),
    (ObjectType::MultiStateValue, "multi-state-value"),
    (ObjectType::TrendLog, "trend-log"),
    (ObjectType::LifeSafetyPoint, "life-safety-point"),
    (ObjectType::LifeSafetyZone, "life-safety-zone"),
    (ObjectType::Accumulator, "accumulator"),
    (ObjectType::PulseConverter, "pulse-converter"),
    (ObjectType::EventLog, "event-log"),
    (ObjectType::GlobalGroup, "global-group"),
    (ObjectType::TrendLogMultiple, "trend-log-multiple"),
    (ObjectType::LoadControl, "load-control"),
    (ObjectType::StructuredView, "structured-view"),
    (ObjectType::AccessDoor, "access-door"),
];

impl ObjectType {
    /// Numeric BACnet identifier.
    pub const fn to_u16(self) -> u16 {
        match self {
            Self::AnalogInput => 0,
            Self::AnalogOutput => 1,
            Self::AnalogValue => 2,
            Self::BinaryInput => 3,
            Self::BinaryOutput => 4,
            Self::BinaryValue => 5,
            Self::Calendar => 6,
            Self::Command => 7,
            Self::Device => 8,
            Self::EventEnrollment => 9,
            Self::File => 10,
            Self::Group => 11,
            Self::Loop => 12,
            Self::MultiStateInput => 13,
            Self::MultiStateOutput => 14,
            Self::NotificationClass => 15,
            Self::Program => 16,
            Self::Schedule => 17,
            Self::Averaging => 18,
            Self::MultiStateValue => 19,
            Self::TrendLog => 20,
            Self::LifeSafetyPoint => 21,
            Self::LifeSafetyZone => 22,
            Self::Accumulator => 23,
            Self::PulseConverter => 24,
            Self::EventLog => 25,
            Self::GlobalGroup => 26,
            Self::TrendLogMultiple => 27,
            Self::LoadControl => 28,
            Self::StructuredView => 29,
            Self::AccessDoor => 30,
            Self::Other(v) => v,
        }
    }

    /// Standard types occupy 0–30 contiguously, so `KNOWN` is indexed by number.
    pub const fn from_u16(value: u16) -> Self {
        if (value as usize) < KNOWN.len() {
            KNOWN[value as usize].0
        } else {
            Self::Other(value)
        }
    }

    /// Hyphenated BACnet name, `None` for [`Other`](Self::Other).
    pub const fn name(self) -> Option<&'static str> {
        match self {
            Self::Other(_) => None,
            known => Some(KNOWN[known.to_u16() as usize].1),
        }
    }
}
