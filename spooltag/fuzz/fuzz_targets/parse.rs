#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let (status, descriptor) = spooltag::parse_status(data);
    assert_eq!(status == spooltag::Status::Ok, descriptor.is_some());
});
