#![no_main]

use bacack_core::AckDecoder;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let decoder = AckDecoder::default();
    let _ = decoder.decode_bytes(data);
    if let Ok(text) = core::str::from_utf8(data) {
        let _ = decoder.decode(text);
    }
});
