#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(records) = spooltag::ndef::parse(data) {
        assert!(!records.is_empty());
        for record in records {
            assert!(record.payload.len() < data.len());
            _ = record.mime();
        }
    }
});
