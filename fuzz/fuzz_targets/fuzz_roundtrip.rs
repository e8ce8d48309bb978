#![no_main]
use libfuzzer_sys::fuzz_target;
use bmpblend::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let Ok(decoded) = decode(data, enough::Unstoppable) else {
        return;
    };

    let Ok(reencoded) = encode(&decoded, enough::Unstoppable) else {
        return;
    };
    let Ok(decoded2) = decode(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded, decoded2, "roundtrip pixel mismatch");

    // Our own output is canonical: a second pass is byte-identical
    let again = encode(&decoded2, enough::Unstoppable).expect("re-encode");
    assert_eq!(reencoded, again);
});
