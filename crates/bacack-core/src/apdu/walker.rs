//! Walks the tag stream of an ACK body and assembles property records.
//!
//! The walk is iterative. Structural groups (for example the ReadPropertyMultiple
//! list of results) live on an explicit stack, and value groups are read in
//! one go by [`decode_value_stream`], which keeps its own stack of partially
//! built constructed values. Neither recurses; nesting is bounded by the
//! configured depth limit.

use crate::encoding::{primitives::decode_unsigned32, reader::Reader, tag::Tag};
use crate::services::layout::{AckLayout, ContextRole};
use crate::services::value_codec::decode_application_value;
use crate::types::{AccessError, ObjectId, PropertyRecord, PropertyValue, RecordValue};
use crate::DecodeError;
use alloc::vec;
use alloc::vec::Vec;

/// Nesting limit used unless the caller configures another one.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Everything the walker extracted from one ACK body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkOutput {
    /// Last object identifier seen.
    pub object_id: Option<ObjectId>,
    /// Property records in the order they were completed.
    pub records: Vec<PropertyRecord>,
    /// Application values that appeared with no property identifier in scope.
    pub bare_values: Vec<PropertyValue>,
}

enum Pending {
    Nothing,
    Values(Vec<PropertyValue>),
    Error(AccessError),
}

struct PropertyRegister {
    object_id: Option<ObjectId>,
    identifier: u32,
    array_index: Option<u32>,
    /// Stack depth at which the identifier was read.
    owner_depth: usize,
    pending: Pending,
}

struct Walker<'l, 'a> {
    layout: &'l AckLayout<'a>,
    max_depth: usize,
    groups: Vec<u8>,
    object_id: Option<ObjectId>,
    register: Option<PropertyRegister>,
    out: WalkOutput,
}

/// Decodes the service body of a Complex-ACK using `layout` to interpret
/// context tags.
pub fn walk_body(
    body: &[u8],
    layout: &AckLayout<'_>,
    max_depth: usize,
) -> Result<WalkOutput, DecodeError> {
    let mut walker = Walker {
        layout,
        max_depth,
        groups: Vec::new(),
        object_id: None,
        register: None,
        out: WalkOutput::default(),
    };
    let mut r = Reader::new(body);
    while !r.is_empty() {
        let tag = Tag::decode(&mut r)?;
        walker.step(&mut r, tag)?;
    }
    walker.finish()
}

impl Walker<'_, '_> {
    fn role(&self, tag_num: u8) -> Option<ContextRole> {
        self.layout.role(self.groups.last().copied(), tag_num)
    }

    /// Nesting left inside a value group opened at the current depth.
    fn value_depth_budget(&self) -> usize {
        self.max_depth.saturating_sub(self.groups.len() + 1)
    }

    fn step(&mut self, r: &mut Reader<'_>, tag: Tag) -> Result<(), DecodeError> {
        match tag {
            Tag::Opening { tag_num } if self.groups.len() >= self.max_depth => {
                log::debug!("opening tag [{tag_num}] exceeds depth {}", self.max_depth);
                return Err(DecodeError::DepthLimitExceeded);
            }
            Tag::Opening { tag_num } => match self.role(tag_num) {
                Some(ContextRole::PropertyValue) => {
                    let values = decode_value_stream(r, Some(tag_num), self.value_depth_budget())?;
                    self.record_values(values);
                }
                Some(ContextRole::AccessError) => {
                    let values = decode_value_stream(r, Some(tag_num), self.value_depth_budget())?;
                    self.record_error(&values)?;
                }
                role => {
                    log::trace!("entering group [{tag_num}] as {role:?}");
                    self.groups.push(tag_num);
                }
            },
            Tag::Closing { tag_num } => {
                let depth = self.groups.len();
                if self.groups.pop() != Some(tag_num) {
                    return Err(DecodeError::UnbalancedTags);
                }
                if self
                    .register
                    .as_ref()
                    .is_some_and(|reg| reg.owner_depth == depth)
                {
                    self.flush_register();
                }
            }
            Tag::Context { tag_num, len } => {
                let window = r.read_window(len)?;
                self.context_primitive(tag_num, window)?;
            }
            Tag::Application { tag_num, len } => {
                let value = decode_application_value(r, tag_num, len)?;
                match self.register.as_mut() {
                    Some(reg) => reg.push_value(value),
                    None => {
                        log::warn!("value {value} has no property identifier in scope");
                        self.out.bare_values.push(value);
                    }
                }
            }
        }
        Ok(())
    }

    fn context_primitive(&mut self, tag_num: u8, window: &[u8]) -> Result<(), DecodeError> {
        match self.role(tag_num) {
            Some(ContextRole::ObjectIdentifier) => {
                let bytes: [u8; 4] = window
                    .try_into()
                    .map_err(|_| DecodeError::InvalidValueLength)?;
                self.flush_register();
                let id = ObjectId::from_be_bytes(bytes);
                log::trace!("object {id}");
                self.object_id = Some(id);
                self.out.object_id = Some(id);
            }
            Some(ContextRole::PropertyIdentifier) => {
                let identifier = decode_unsigned32(&mut Reader::new(window), window.len())?;
                self.flush_register();
                log::trace!("property {identifier}");
                self.register = Some(PropertyRegister {
                    object_id: self.object_id,
                    identifier,
                    array_index: None,
                    owner_depth: self.groups.len(),
                    pending: Pending::Nothing,
                });
            }
            Some(ContextRole::ArrayIndex) => {
                let index = decode_unsigned32(&mut Reader::new(window), window.len())?;
                match self.register.as_mut() {
                    Some(reg) => reg.array_index = Some(index),
                    None => log::debug!("array index {index} has no property identifier"),
                }
            }
            Some(ContextRole::PropertyValue) => {
                self.record_values(vec![PropertyValue::ContextTagged {
                    tag_num,
                    data: window.to_vec(),
                }]);
            }
            Some(ContextRole::AccessError) => return Err(DecodeError::InvalidTag),
            Some(ContextRole::ResultList) | None => {
                log::debug!("skipping context tag [{tag_num}] ({} bytes)", window.len());
            }
        }
        Ok(())
    }

    fn record_values(&mut self, values: Vec<PropertyValue>) {
        match self.register.as_mut() {
            Some(reg) => {
                for value in values {
                    reg.push_value(value);
                }
                if matches!(reg.pending, Pending::Nothing) {
                    reg.pending = Pending::Values(Vec::new());
                }
            }
            None => {
                log::warn!(
                    "{} values have no property identifier in scope",
                    values.len()
                );
                self.out.bare_values.extend(values);
            }
        }
    }

    fn record_error(&mut self, values: &[PropertyValue]) -> Result<(), DecodeError> {
        let mut numbers = values.iter().filter_map(error_number);
        let (Some(error_class), Some(error_code)) = (numbers.next(), numbers.next()) else {
            return Err(DecodeError::InvalidTag);
        };
        let error = AccessError {
            error_class,
            error_code,
        };
        match self.register.as_mut() {
            Some(reg) => {
                log::debug!("property {} returned {error}", reg.identifier);
                reg.pending = Pending::Error(error);
            }
            None => log::warn!("{error} has no property identifier in scope"),
        }
        Ok(())
    }

    fn flush_register(&mut self) {
        let Some(reg) = self.register.take() else {
            return;
        };
        let value = match reg.pending {
            Pending::Nothing => {
                log::debug!("property {} carried no value", reg.identifier);
                return;
            }
            Pending::Values(values) => RecordValue::from_values(values),
            Pending::Error(error) => RecordValue::Error(error),
        };
        self.out.records.push(PropertyRecord {
            object_id: reg.object_id,
            identifier: reg.identifier,
            array_index: reg.array_index,
            value,
        });
    }

    fn finish(mut self) -> Result<WalkOutput, DecodeError> {
        if !self.groups.is_empty() {
            log::debug!("body ended with groups {:?} still open", self.groups);
            return Err(DecodeError::UnbalancedTags);
        }
        self.flush_register();
        Ok(self.out)
    }
}

impl PropertyRegister {
    fn push_value(&mut self, value: PropertyValue) {
        match &mut self.pending {
            Pending::Values(values) => values.push(value),
            Pending::Nothing => self.pending = Pending::Values(vec![value]),
            Pending::Error(_) => log::debug!(
                "dropping value {value} after an error for property {}",
                self.identifier
            ),
        }
    }
}

fn error_number(value: &PropertyValue) -> Option<u32> {
    match value {
        PropertyValue::Enumerated(v) => Some(*v),
        PropertyValue::Unsigned(v) => u32::try_from(*v).ok(),
        PropertyValue::ContextTagged { data, .. } if (1..=4).contains(&data.len()) => {
            decode_unsigned32(&mut Reader::new(data), data.len()).ok()
        }
        _ => None,
    }
}

/// Reads application and context values up to the closing tag `closing`.
///
/// Nested opening/closing pairs become [`PropertyValue::Constructed`], at
/// most `max_depth` levels deep. With `closing` set to `None` the stream runs
/// to the end of the reader instead.
pub fn decode_value_stream(
    r: &mut Reader<'_>,
    closing: Option<u8>,
    max_depth: usize,
) -> Result<Vec<PropertyValue>, DecodeError> {
    let mut frames: Vec<(Option<u8>, Vec<PropertyValue>)> = vec![(closing, Vec::new())];
    loop {
        if r.is_empty() {
            return match (closing, frames.pop()) {
                (None, Some((_, values))) if frames.is_empty() => Ok(values),
                _ => Err(DecodeError::UnbalancedTags),
            };
        }

        let value = match Tag::decode(r)? {
            Tag::Application { tag_num, len } => decode_application_value(r, tag_num, len)?,
            Tag::Context { tag_num, len } => PropertyValue::ContextTagged {
                tag_num,
                data: r.read_window(len)?.to_vec(),
            },
            Tag::Opening { tag_num } => {
                if frames.len() > max_depth {
                    return Err(DecodeError::DepthLimitExceeded);
                }
                frames.push((Some(tag_num), Vec::new()));
                continue;
            }
            Tag::Closing { tag_num } => {
                let (open, values) = frames.pop().ok_or(DecodeError::UnbalancedTags)?;
                if open != Some(tag_num) {
                    return Err(DecodeError::UnbalancedTags);
                }
                if frames.is_empty() {
                    return Ok(values);
                }
                PropertyValue::Constructed { tag_num, values }
            }
        };
        if let Some((_, values)) = frames.last_mut() {
            values.push(value);
        }
    }
}
