#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: u32, height: u32, header_size: u32, gap: u32) -> Vec<u8> {
    let stride = (width * 3 + 3) & !3;
    let offset = 14 + header_size + gap;
    let total = offset + stride * height;
    let mut out = vec![0u8; total as usize];
    out[0] = b'B';
    out[1] = b'M';
    out[2..6].copy_from_slice(&total.to_le_bytes()); // file size
    out[10..14].copy_from_slice(&offset.to_le_bytes()); // data offset
    out[14..18].copy_from_slice(&header_size.to_le_bytes());
    if header_size == 12 {
        out[18..20].copy_from_slice(&(width as u16).to_le_bytes());
        out[20..22].copy_from_slice(&(height as u16).to_le_bytes());
        out[22..24].copy_from_slice(&1u16.to_le_bytes()); // planes
        out[24..26].copy_from_slice(&24u16.to_le_bytes()); // bpp
    } else {
        out[18..22].copy_from_slice(&(width as i32).to_le_bytes());
        out[22..26].copy_from_slice(&(height as i32).to_le_bytes());
        out[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
        out[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    }
    for (i, b) in out[offset as usize..].iter_mut().enumerate() {
        *b = (i * 37) as u8;
    }
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    fs::write(format!("{dir}/bmp_1x1.bmp"), bmp(1, 1, 40, 0)).unwrap();
    fs::write(format!("{dir}/bmp_3x2.bmp"), bmp(3, 2, 40, 0)).unwrap();
    fs::write(format!("{dir}/bmp_4x4.bmp"), bmp(4, 4, 40, 0)).unwrap();
    fs::write(format!("{dir}/bmp_core_2x2.bmp"), bmp(2, 2, 12, 0)).unwrap();
    fs::write(format!("{dir}/bmp_v4_2x2.bmp"), bmp(2, 2, 108, 0)).unwrap();
    fs::write(format!("{dir}/bmp_v5_gap.bmp"), bmp(5, 3, 124, 16)).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_bm.bin"), b"BM").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    let mut top_down = bmp(2, 2, 40, 0);
    top_down[22..26].copy_from_slice(&(-2i32).to_le_bytes());
    fs::write(format!("{dir}/top_down.bin"), top_down).unwrap();
    let full = bmp(3, 3, 40, 0);
    fs::write(format!("{dir}/short_pixels.bin"), &full[..full.len() - 5]).unwrap();

    println!("Generated seed corpus in {dir}/");
}
