use std::fmt::Write as _;

pub const DEFAULT_FORMAT: &str = "0x%02x\n";

/// A printf-style format applied to the byte returned by `get`.
///
/// Understands `%d %i %u %o %x %X %c` and `%%` with the usual flags
/// (`- + space # 0`), width, precision and length modifiers (ignored). Every
/// conversion receives the same byte. Anything it does not understand is
/// printed as written.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultFormat {
    pieces: Vec<Piece>,
}

#[derive(Debug, Clone, PartialEq)]
enum Piece {
    Literal(Vec<u8>),
    Conversion(Directive),
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Directive {
    left: bool,
    plus: bool,
    space: bool,
    alternate: bool,
    zero: bool,
    width: usize,
    precision: Option<usize>,
    kind: u8,
}

impl Default for ResultFormat {
    fn default() -> Self {
        Self::parse(DEFAULT_FORMAT.as_bytes())
    }
}

impl ResultFormat {
    pub fn parse(src: &[u8]) -> Self {
        let mut pieces = Vec::new();
        let mut literal = Vec::new();
        let mut pos = 0;

        while pos < src.len() {
            if src[pos] != b'%' {
                literal.push(src[pos]);
                pos += 1;
                continue;
            }
            match parse_directive(&src[pos + 1..]) {
                Some((directive, len)) if directive.kind == b'%' => {
                    literal.push(b'%');
                    pos += 1 + len;
                }
                Some((directive, len)) => {
                    if !literal.is_empty() {
                        pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                    }
                    pieces.push(Piece::Conversion(directive));
                    pos += 1 + len;
                }
                None => {
                    literal.push(b'%');
                    pos += 1;
                }
            }
        }
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        Self { pieces }
    }

    pub fn render(&self, value: u8) -> Vec<u8> {
        let mut out = Vec::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(bytes) => out.extend_from_slice(bytes),
                Piece::Conversion(directive) => directive.render(value, &mut out),
            }
        }
        out
    }
}

/// Parses what follows a `%`. Returns `None` if it is not a conversion we
/// support.
fn parse_directive(src: &[u8]) -> Option<(Directive, usize)> {
    let mut directive = Directive::default();
    let mut pos = 0;

    while let Some(&flag) = src.get(pos) {
        match flag {
            b'-' => directive.left = true,
            b'+' => directive.plus = true,
            b' ' => directive.space = true,
            b'#' => directive.alternate = true,
            b'0' => directive.zero = true,
            _ => break,
        }
        pos += 1;
    }

    let (width, len) = scan_decimal(&src[pos..]);
    directive.width = width;
    pos += len;

    if src.get(pos) == Some(&b'.') {
        let (precision, len) = scan_decimal(&src[pos + 1..]);
        directive.precision = Some(precision);
        pos += 1 + len;
    }

    while matches!(src.get(pos), Some(b'h' | b'l' | b'j' | b'z' | b't')) {
        pos += 1;
    }

    match src.get(pos) {
        Some(&kind @ (b'd' | b'i' | b'u' | b'o' | b'x' | b'X' | b'c' | b'%')) => {
            directive.kind = kind;
            Some((directive, pos + 1))
        }
        _ => None,
    }
}

fn scan_decimal(src: &[u8]) -> (usize, usize) {
    let len = src.iter().take_while(|b| b.is_ascii_digit()).count();
    let value = src[..len]
        .iter()
        .fold(0usize, |acc, d| acc.saturating_mul(10).saturating_add(usize::from(d - b'0')));
    (value, len)
}

impl Directive {
    fn render(&self, value: u8, out: &mut Vec<u8>) {
        if self.kind == b'c' {
            let pad = self.width.saturating_sub(1);
            if !self.left {
                out.extend(std::iter::repeat(b' ').take(pad));
            }
            out.push(value);
            if self.left {
                out.extend(std::iter::repeat(b' ').take(pad));
            }
            return;
        }

        let mut digits = String::new();
        let _ = match self.kind {
            b'o' => write!(digits, "{value:o}"),
            b'x' => write!(digits, "{value:x}"),
            b'X' => write!(digits, "{value:X}"),
            _ => write!(digits, "{value}"),
        };

        // an explicit zero precision prints nothing for zero
        if self.precision == Some(0) && value == 0 {
            digits.clear();
        }
        if let Some(precision) = self.precision {
            while digits.len() < precision {
                digits.insert(0, '0');
            }
        }

        let prefix = match self.kind {
            b'd' | b'i' if self.plus => "+",
            b'd' | b'i' if self.space => " ",
            b'x' if self.alternate && value != 0 => "0x",
            b'X' if self.alternate && value != 0 => "0X",
            b'o' if self.alternate && !digits.starts_with('0') => "0",
            _ => "",
        };

        let len = prefix.len() + digits.len();
        let pad = self.width.saturating_sub(len);
        if self.left {
            out.extend_from_slice(prefix.as_bytes());
            out.extend_from_slice(digits.as_bytes());
            out.extend(std::iter::repeat(b' ').take(pad));
        } else if self.zero && self.precision.is_none() {
            out.extend_from_slice(prefix.as_bytes());
            out.extend(std::iter::repeat(b'0').take(pad));
            out.extend_from_slice(digits.as_bytes());
        } else {
            out.extend(std::iter::repeat(b' ').take(pad));
            out.extend_from_slice(prefix.as_bytes());
            out.extend_from_slice(digits.as_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(format: &str, value: u8) -> String {
        String::from_utf8(ResultFormat::parse(format.as_bytes()).render(value)).unwrap()
    }

    #[test]
    fn default_format() {
        assert_eq!(String::from_utf8(ResultFormat::default().render(0xFF)).unwrap(), "0xff\n");
        assert_eq!(String::from_utf8(ResultFormat::default().render(0x3a)).unwrap(), "0x3a\n");
        assert_eq!(String::from_utf8(ResultFormat::default().render(5)).unwrap(), "0x05\n");
    }

    #[test]
    fn integer_conversions() {
        assert_eq!(render("%d\n", 58), "58\n");
        assert_eq!(render("%i", 200), "200");
        assert_eq!(render("%u", 7), "7");
        assert_eq!(render("%o", 8), "10");
        assert_eq!(render("%X", 0xab), "AB");
        assert_eq!(render("%hhx", 0xab), "ab");
    }

    #[test]
    fn flags_width_precision() {
        assert_eq!(render("[%5d]", 42), "[   42]");
        assert_eq!(render("[%-5d]", 42), "[42   ]");
        assert_eq!(render("[%05d]", 42), "[00042]");
        assert_eq!(render("[%+d]", 42), "[+42]");
        assert_eq!(render("[% d]", 42), "[ 42]");
        assert_eq!(render("[%#x]", 42), "[0x2a]");
        assert_eq!(render("[%#x]", 0), "[0]");
        assert_eq!(render("[%#o]", 8), "[010]");
        assert_eq!(render("[%.3d]", 7), "[007]");
        assert_eq!(render("[%6.3d]", 7), "[   007]");
        assert_eq!(render("[%.0d]", 0), "[]");
        assert_eq!(render("[%#06x]", 0x2a), "[0x002a]");
    }

    #[test]
    fn char_conversion_emits_raw_byte() {
        assert_eq!(render("%c", b'A'), "A");
        assert_eq!(render("[%3c]", b'A'), "[  A]");
        assert_eq!(ResultFormat::parse(b"%c").render(0xFF), vec![0xFF]);
    }

    #[test]
    fn percent_and_unsupported() {
        assert_eq!(render("100%%", 1), "100%");
        assert_eq!(render("%s!", 1), "%s!");
        assert_eq!(render("50%", 1), "50%");
    }

    #[test]
    fn every_conversion_gets_the_value() {
        assert_eq!(render("%d = 0x%02X\n", 58), "58 = 0x3A\n");
    }
}
