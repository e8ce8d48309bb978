#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header probe and full decode must never panic
    let _ = bmpblend::BmpInfo::from_bytes(data);
    let _ = bmpblend::decode(data, enough::Unstoppable);

    // Streaming decode goes through a different source
    let _ = bmpblend::decode_reader(std::io::Cursor::new(data), None, enough::Unstoppable);
});
