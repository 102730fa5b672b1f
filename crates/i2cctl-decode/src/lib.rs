//! Argument decoding: escape sequences and numeric literals.

pub mod escape;
pub mod literal;

pub use escape::decode;
pub use literal::{parse_byte, parse_count};
