#![no_main]

use bacack_core::apdu::walker::decode_value_stream;
use bacack_core::encoding::reader::Reader;
use bacack_core::services::value_codec::decode_value;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Some((&tag_num, window)) = data.split_first() {
        let _ = decode_value(tag_num & 0x0F, window);
    }
    let _ = decode_value_stream(&mut Reader::new(data), None, 16);
});
