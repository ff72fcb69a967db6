#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut offset = 0;
    while let Ok(Some((value, next))) = spooltag_cbor::decode::decode_value(data, offset) {
        _ = format!("{value:?}");
        assert!(next > offset && next <= data.len());
        offset = next;
    }
});
