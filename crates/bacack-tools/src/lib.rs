use bacack_core::types::{PropertyRecord, PropertyTable, RecordValue};
use bacack_core::{DecodeError, Response};
use clap::ValueEnum;
use std::fmt::Write as _;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("frame {index}: {source}")]
    Decode { index: usize, source: DecodeError },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown property name '{0}'")]
    UnknownProperty(String),
    #[error("no frames given")]
    NoInput,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Strips whitespace, `:`/`-` byte separators, and `0x` prefixes from a pasted
/// capture so the decoder sees bare hex digits.
pub fn normalize_hex(input: &str) -> String {
    input
        .split(|c: char| c.is_whitespace() || c == ':' || c == '-')
        .map(|chunk| {
            chunk
                .strip_prefix("0x")
                .or_else(|| chunk.strip_prefix("0X"))
                .unwrap_or(chunk)
        })
        .collect()
}

/// Splits a capture file into frames.
///
/// Frames are separated by blank lines; lines starting with `#` are comments.
pub fn frames_from_text(text: &str) -> Vec<String> {
    let mut frames = Vec::new();
    let mut current = String::new();
    for line in text.lines().map(str::trim) {
        if line.starts_with('#') {
            continue;
        }
        if line.is_empty() {
            if !current.is_empty() {
                frames.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push_str(&normalize_hex(line));
    }
    if !current.is_empty() {
        frames.push(current);
    }
    frames
}

fn property_label(table: &PropertyTable<'_>, record: &PropertyRecord) -> String {
    let name = match table.name(record.identifier) {
        Some(name) => name.to_string(),
        None => format!("property-{}", record.identifier),
    };
    match record.array_index {
        Some(index) => format!("{name}[{index}]"),
        None => name,
    }
}

pub fn render_value(value: &RecordValue) -> String {
    match value {
        RecordValue::Single(v) => v.to_string(),
        RecordValue::Array(values) => {
            let items: Vec<String> = values.iter().map(ToString::to_string).collect();
            format!("[{}]", items.join(", "))
        }
        RecordValue::Error(err) => err.to_string(),
    }
}

/// Human-readable listing of a decoded ACK, one record per line.
pub fn render_text(response: &Response, table: &PropertyTable<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "invoke-id {} service {:#04x}{}",
        response.invoke_id(),
        response.service_choice(),
        if response.is_segmented() { " (segment)" } else { "" }
    );
    let mut last_object = None;
    for record in response.records() {
        if record.object_id != last_object {
            if let Some(id) = record.object_id {
                let _ = writeln!(out, "object {id}");
            }
            last_object = record.object_id;
        }
        let _ = writeln!(
            out,
            "  {}: {}",
            property_label(table, record),
            render_value(&record.value)
        );
    }
    for value in response.bare_values() {
        let _ = writeln!(out, "  (no property): {value}");
    }
    out
}

pub fn render_json(response: &Response) -> Result<String, ToolError> {
    Ok(serde_json::to_string_pretty(response)?)
}
