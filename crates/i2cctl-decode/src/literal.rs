/// Parses an address, register or value token into one byte.
///
/// `0x1A` and `26` are numbers (leading `0` means octal, a leading `-` is
/// allowed), anything else is taken as its first raw character. Numbers are
/// truncated to their low 8 bits and an empty token yields 0. This never
/// fails.
pub fn parse_byte(token: &[u8]) -> u8 {
    match token {
        [b'0', b'x', ..] | [b'0'..=b'9', ..] | [b'-', b'0'..=b'9', ..] => {
            scan_integer(token).0 as u8
        }
        [first, ..] => *first,
        [] => 0,
    }
}

/// Parses the optional byte count of a `read` action.
///
/// Accepts the same radix prefixes as [`parse_byte`] but the whole token has
/// to be a non-negative integer.
pub fn parse_count(token: &[u8]) -> Option<usize> {
    if !token.first().is_some_and(u8::is_ascii_digit) {
        return None;
    }
    match scan_integer(token) {
        (value, len) if len == token.len() => usize::try_from(value).ok(),
        _ => None,
    }
}

/// Reads the longest integer prefix with C `strtol` base-0 rules: `0x` for
/// hex, a leading `0` for octal, decimal otherwise. Out-of-range values
/// saturate. Returns the value and how many bytes were consumed.
fn scan_integer(token: &[u8]) -> (i64, usize) {
    let (negative, sign_len) = match token.first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };
    let body = &token[sign_len..];

    let (radix, prefix_len) = match body {
        [b'0', b'x' | b'X', d, ..] if d.is_ascii_hexdigit() => (16, 2),
        [b'0', ..] => (8, 0),
        _ => (10, 0),
    };
    let digits = &body[prefix_len..];

    let count = digits
        .iter()
        .take_while(|&&b| (b as char).is_digit(radix))
        .count();
    if count == 0 {
        return (0, 0);
    }

    let magnitude = digits[..count].iter().try_fold(0i64, |acc, &b| {
        let digit = (b as char).to_digit(radix).map(i64::from)?;
        acc.checked_mul(i64::from(radix))?.checked_add(digit)
    });
    let value = match (magnitude, negative) {
        (Some(v), true) => -v,
        (Some(v), false) => v,
        (None, true) => i64::MIN,
        (None, false) => i64::MAX,
    };
    (value, sign_len + prefix_len + count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_literals() {
        assert_eq!(parse_byte(b"0x1A"), 26);
        assert_eq!(parse_byte(b"0xff"), 0xFF);
        assert_eq!(parse_byte(b"0X1a"), 26);
        assert_eq!(parse_byte(b"0x123"), 0x23);
        // no digits after the prefix parses the leading zero only
        assert_eq!(parse_byte(b"0x"), 0);
    }

    #[test]
    fn decimal_and_octal_literals() {
        assert_eq!(parse_byte(b"26"), 26);
        assert_eq!(parse_byte(b"104"), 0x68);
        assert_eq!(parse_byte(b"010"), 8);
        assert_eq!(parse_byte(b"08"), 0);
        assert_eq!(parse_byte(b"300"), 44);
        assert_eq!(parse_byte(b"12abc"), 12);
    }

    #[test]
    fn negative_literals_wrap() {
        assert_eq!(parse_byte(b"-1"), 0xFF);
        assert_eq!(parse_byte(b"-128"), 0x80);
        assert_eq!(parse_byte(b"-0x10"), 0xF0);
    }

    #[test]
    fn overflow_saturates() {
        assert_eq!(parse_byte(b"99999999999999999999999"), 0xFF);
        assert_eq!(parse_byte(b"-99999999999999999999999"), 0x00);
    }

    #[test]
    fn raw_characters() {
        assert_eq!(parse_byte(b"A"), 0x41);
        assert_eq!(parse_byte(b"hello"), b'h');
        assert_eq!(parse_byte(b"-"), b'-');
        assert_eq!(parse_byte(b"-x"), b'-');
        assert_eq!(parse_byte(&[0xC3, 0xA9]), 0xC3);
        assert_eq!(parse_byte(b""), 0);
    }

    #[test]
    fn counts() {
        assert_eq!(parse_count(b"4"), Some(4));
        assert_eq!(parse_count(b"0"), Some(0));
        assert_eq!(parse_count(b"0x10"), Some(16));
        assert_eq!(parse_count(b"010"), Some(8));
        assert_eq!(parse_count(b"-1"), None);
        assert_eq!(parse_count(b"4k"), None);
        assert_eq!(parse_count(b"get"), None);
        assert_eq!(parse_count(b""), None);
    }
}
