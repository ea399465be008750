use bacack_core::apdu::DEFAULT_MAX_DEPTH;
use bacack_core::types::STANDARD_PROPERTIES;
use bacack_core::AckDecoder;
use bacack_tools::{
    frames_from_text, normalize_hex, render_json, render_text, render_value, OutputFormat,
    ToolError,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bacack-decode", about = "Decode captured BACnet Complex-ACK frames")]
struct Args {
    /// Frames as hex strings; spaces and `:` separators are allowed.
    frames: Vec<String>,
    /// Read frames from a file, separated by blank lines.
    #[arg(long)]
    file: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// Only print this property, by name (e.g. `object-name`).
    #[arg(long)]
    property: Option<String>,
}

fn run(args: Args) -> Result<(), ToolError> {
    let mut frames: Vec<String> = args.frames.iter().map(|f| normalize_hex(f)).collect();
    if let Some(path) = &args.file {
        frames.extend(frames_from_text(&std::fs::read_to_string(path)?));
    }
    if frames.is_empty() {
        return Err(ToolError::NoInput);
    }

    let property = match &args.property {
        Some(name) => Some(
            STANDARD_PROPERTIES
                .id(name)
                .ok_or_else(|| ToolError::UnknownProperty(name.clone()))?,
        ),
        None => None,
    };

    let decoder = AckDecoder::default().with_max_depth(args.max_depth);
    for (index, frame) in frames.iter().enumerate() {
        log::debug!("decoding frame {index} ({} hex digits)", frame.len());
        let response = decoder
            .decode(frame)
            .map_err(|source| ToolError::Decode { index, source })?;

        if let Some(id) = property {
            match (response.property(id), args.format) {
                (Some(record), OutputFormat::Json) => {
                    println!("{}", serde_json::to_string_pretty(record)?)
                }
                (Some(record), OutputFormat::Text) => println!("{}", render_value(&record.value)),
                (None, _) => log::warn!("frame {index} has no property {id}"),
            }
            continue;
        }

        match args.format {
            OutputFormat::Text => print!("{}", render_text(&response, &STANDARD_PROPERTIES)),
            OutputFormat::Json => println!("{}", render_json(&response)?),
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run(Args::parse()) {
        eprintln!("decode failed: {e}");
        std::process::exit(1);
    }
}
