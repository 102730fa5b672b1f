/// Decodes backslash escapes in a command-line token into raw bytes.
///
/// Bytes outside an escape are copied unchanged. Supported escapes are the
/// C character escapes (`\\ \' \" \? \a \b \f \n \r \t \v`), greedy octal
/// (`\101`), and the fixed-width hex forms `\xHH`, `\uHHHH` and
/// `\UHHHHHHHH`. The `\u` and `\U` forms emit their value little-endian and
/// stop as soon as the remaining high part is zero, so `\u0041` is one byte
/// and `\u4100` is two. A backslash followed by anything else is dropped
/// together with that character.
///
/// The output is never longer than the input.
pub fn decode(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len());
    let mut pos = 0;

    while pos < src.len() {
        let byte = src[pos];
        pos += 1;
        if byte != b'\\' {
            out.push(byte);
            continue;
        }

        // lone trailing backslash
        let Some(&tag) = src.get(pos) else {
            break;
        };
        pos += 1;

        match tag {
            b'\\' | b'\'' | b'"' | b'?' => out.push(tag),
            b'a' => out.push(0x07),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0C),
            b'n' => out.push(0x0A),
            b'r' => out.push(0x0D),
            b't' => out.push(0x09),
            b'v' => out.push(0x0B),
            b'0'..=b'7' => {
                let (value, len) = scan_octal(&src[pos - 1..]);
                out.push(value as u8);
                pos += len - 1;
            }
            b'x' => {
                let (value, len) = scan_hex(&src[pos..], 2);
                out.push(value as u8);
                pos += len;
            }
            b'u' => {
                let (value, len) = scan_hex(&src[pos..], 4);
                push_trimmed_le(&mut out, value);
                pos += len;
            }
            b'U' => {
                let (value, len) = scan_hex(&src[pos..], 8);
                push_trimmed_le(&mut out, value);
                pos += len;
            }
            _ => {}
        }
    }

    out
}

/// Consumes every leading octal digit. Values beyond `i64::MAX` saturate,
/// which keeps the low byte at 0xFF.
fn scan_octal(src: &[u8]) -> (u64, usize) {
    let len = src.iter().take_while(|b| matches!(b, b'0'..=b'7')).count();
    let value = src[..len].iter().try_fold(0i64, |acc, &d| {
        acc.checked_mul(8)?.checked_add(i64::from(d - b'0'))
    });
    (value.unwrap_or(i64::MAX) as u64, len)
}

/// Looks at a window of up to `width` bytes (clamped to the input) and
/// reads the hex digits at its start. The whole window is consumed even if
/// it holds fewer digits.
fn scan_hex(src: &[u8], width: usize) -> (u32, usize) {
    let window = &src[..width.min(src.len())];
    let value = window
        .iter()
        .map_while(|&b| (b as char).to_digit(16))
        .fold(0u32, |acc, d| (acc << 4) | d);
    (value, window.len())
}

fn push_trimmed_le(out: &mut Vec<u8>, mut value: u32) {
    out.push(value as u8);
    value >>= 8;
    while value != 0 {
        out.push(value as u8);
        value >>= 8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_copied() {
        assert_eq!(decode(b"Hello, world"), b"Hello, world");
        assert_eq!(decode(b""), b"");
    }

    #[test]
    fn simple_escapes() {
        assert_eq!(decode(br"\n"), [0x0A]);
        assert_eq!(decode(br"\a\b\f\n\r\t\v"), [0x07, 0x08, 0x0C, 0x0A, 0x0D, 0x09, 0x0B]);
        assert_eq!(decode(br#"\\\'\"\?"#), br#"\'"?"#);
    }

    #[test]
    fn hex_escape() {
        assert_eq!(decode(br"\x41"), [0x41]);
        assert_eq!(decode(br"\xff\x00"), [0xFF, 0x00]);
        assert_eq!(decode(br"\x414"), b"A4");
    }

    #[test]
    fn octal_escape_is_greedy() {
        assert_eq!(decode(br"\101"), [0x41]);
        assert_eq!(decode(br"\0"), [0x00]);
        assert_eq!(decode(br"\7x"), [0x07, b'x']);
        // 0o1234 = 0x29C
        assert_eq!(decode(br"\1234"), [0x9C]);
        assert_eq!(decode(br"\18"), [0x01, b'8']);
    }

    #[test]
    fn octal_overflow_saturates() {
        let src = format!("\\{}", "7".repeat(30));
        assert_eq!(decode(src.as_bytes()), [0xFF]);
    }

    #[test]
    fn short_unicode_drops_zero_high_bytes() {
        assert_eq!(decode(br"\u0041"), [0x41]);
        assert_eq!(decode(br"\u4100"), [0x00, 0x41]);
        assert_eq!(decode(br"\u1234"), [0x34, 0x12]);
        assert_eq!(decode(br"\u0000"), [0x00]);
    }

    #[test]
    fn long_unicode_stops_at_zero_remainder() {
        assert_eq!(decode(br"\U00000041"), [0x41]);
        assert_eq!(decode(br"\U12345678"), [0x78, 0x56, 0x34, 0x12]);
        assert_eq!(decode(br"\U00010000"), [0x00, 0x00, 0x01]);
        assert_eq!(decode(br"\U00000100"), [0x00, 0x01]);
    }

    #[test]
    fn unknown_escape_is_dropped() {
        assert_eq!(decode(br"a\qb"), b"ab");
        assert_eq!(decode(br"\9"), b"");
    }

    #[test]
    fn truncated_escapes_stay_in_bounds() {
        assert_eq!(decode(b"abc\\"), b"abc");
        assert_eq!(decode(br"\x4"), [0x04]);
        assert_eq!(decode(br"\x"), [0x00]);
        assert_eq!(decode(br"\u12"), [0x12]);
        assert_eq!(decode(br"\U1"), [0x01]);
    }

    #[test]
    fn hex_window_with_non_digits() {
        // digits stop at 'g', the rest of the window is still consumed
        assert_eq!(decode(br"\x4gz"), [0x04, b'z']);
        assert_eq!(decode(br"\uzz41"), [0x00]);
    }

    #[test]
    fn mixed_payload() {
        assert_eq!(decode(br"Hi \x21"), b"Hi !");
        assert_eq!(decode(br"\x00\x01abc\n"), [0x00, 0x01, b'a', b'b', b'c', 0x0A]);
    }
}
