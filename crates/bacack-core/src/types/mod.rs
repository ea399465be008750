pub mod bit_string;
pub mod date_time;
pub mod error_class;
pub mod object_id;
pub mod object_type;
pub mod property_table;
pub mod property_value;
pub mod record;

pub use bit_string::BitString;
pub use date_time::{Date, Time};
pub use error_class::{AccessError, ErrorClass, ErrorCode};
pub use object_id::ObjectId;
pub use object_type::ObjectType;
pub use property_table::{PropertyTable, STANDARD_PROPERTIES};
pub use property_value::{CharacterSet, PropertyValue};
pub use record::{PropertyRecord, RecordValue};
