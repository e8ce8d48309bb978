#![no_main]
use libfuzzer_sys::fuzz_target;
use bmpblend::*;

fuzz_target!(|data: &[u8]| {
    // First byte is alpha, the rest is split into two channel streams
    let Some((&alpha, rest)) = data.split_first() else {
        return;
    };
    let n = rest.len() / 6;
    if n == 0 {
        return;
    }
    let to_grid = |bytes: &[u8]| {
        let pixels = bytes
            .chunks_exact(3)
            .map(|c| Color::new(c[0], c[1], c[2]))
            .collect();
        PixelGrid::from_pixels(n as u32, 1, pixels).expect("grid")
    };
    let a = to_grid(&rest[..n * 3]);
    let b = to_grid(&rest[n * 3..n * 6]);

    let ab = combine(&a, &b, alpha).expect("same size");
    let ba = combine(&b, &a, alpha).expect("same size");
    assert_eq!(ab, ba, "blend must not depend on argument order");

    for ((o, x), y) in ab.pixels().iter().zip(a.pixels()).zip(b.pixels()) {
        assert!(o.red >= x.red.min(y.red) && o.red <= x.red.max(y.red));
        assert!(o.green >= x.green.min(y.green) && o.green <= x.green.max(y.green));
        assert!(o.blue >= x.blue.min(y.blue) && o.blue <= x.blue.max(y.blue));
    }
});
