use thiserror::Error;

/// Errors that can occur when parsing a binary string into a
/// [`Bitset`](crate::Bitset).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBitsetError {
    /// The string holds no binary digit.
    #[error("cannot parse bitset from empty string")]
    Empty,

    /// A character other than `0`, `1` or `_` was found.
    #[error("invalid character '{ch}' at position {pos} in binary string")]
    InvalidChar {
        /// The invalid character.
        ch: char,
        /// Byte offset of the character, after the optional `0b` prefix.
        pos: usize,
    },

    /// The string holds more digits than the bitset has bits.
    #[error("binary string has more than {capacity} digits")]
    TooLong {
        /// Number of bits in the bitset.
        capacity: usize,
    },
}
