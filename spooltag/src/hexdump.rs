//! `xxd`-style rendering of raw tag memory for logs and the CLI.

use core::fmt::Write;

const BYTES_PER_LINE: usize = 16;

/// Render up to `max_lines` lines of 16 bytes each.
///
/// Each line holds the offset, the hex bytes and their printable ASCII
/// characters. When `data` does not fit, a final line gives the total length.
pub fn xxd(data: &[u8], max_lines: usize) -> String {
    let mut out = String::new();
    for (i, chunk) in data.chunks(BYTES_PER_LINE).take(max_lines).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let hex = chunk
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(" ");
        let ascii: String = chunk
            .iter()
            .map(|&b| {
                if (32..127).contains(&b) {
                    b as char
                } else {
                    '.'
                }
            })
            .collect();
        _ = write!(out, "{:08x}: {hex:<48}  {ascii}", i * BYTES_PER_LINE);
    }
    if data.len() > max_lines.saturating_mul(BYTES_PER_LINE) {
        _ = write!(out, "\n... ({} bytes total)", data.len());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines() {
        assert_eq!("", xxd(&[], 16));
        assert_eq!(
            "00000000: e1 10 6d 00 03 41                                 ..m..A",
            xxd(&[0xE1, 0x10, 0x6D, 0x00, 0x03, 0x41], 16)
        );

        let data: Vec<u8> = (0x30..0x50).collect();
        assert_eq!(
            "00000000: 30 31 32 33 34 35 36 37 38 39 3a 3b 3c 3d 3e 3f   0123456789:;<=>?\n\
             00000010: 40 41 42 43 44 45 46 47 48 49 4a 4b 4c 4d 4e 4f   @ABCDEFGHIJKLMNO",
            xxd(&data, 16)
        );
        assert_eq!(
            "00000000: 30 31 32 33 34 35 36 37 38 39 3a 3b 3c 3d 3e 3f   0123456789:;<=>?\n\
             ... (32 bytes total)",
            xxd(&data, 1)
        );
        assert_eq!(xxd(&data, 2), xxd(&data, usize::MAX));
    }
}
