/*
 * Copyright (C) 2022 taylor.fish <contact@taylor.fish>
 *
 * This file is part of Base41.
 *
 * Base41 is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Base41 is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with Base41. If not, see <https://www.gnu.org/licenses/>.
 */

//! Base41 encodes binary data two bytes at a time: each little-endian
//! 16-bit word becomes three printable symbols drawn from the 41 ASCII
//! characters `)` through `Q`.
//!
//! ```
//! let data = [26, 168, 48, 178, 7, 162, 52, 188, 199, 36];
//! let text = base41::encode(&data).unwrap();
//! assert_eq!(text, "BABA.DEDA.DECA.");
//! assert_eq!(base41::decode(&text).unwrap(), data);
//! ```
//!
//! Only even-length byte buffers can be encoded, and only strings whose
//! length is a multiple of three can be decoded. Nothing is padded.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]

pub mod decode;
mod digit;
pub mod encode;
mod iter;

#[cfg(feature = "alloc")]
extern crate alloc;

use core::fmt::{self, Display, Formatter};

const BASE: u32 = 41;
const BYTES_PER_WORD: usize = 2;
const SYMBOLS_PER_WORD: usize = 3;

/// The 41 symbols, in digit order. The symbol for digit `k` is the
/// character with code point `41 + k`.
pub const ALPHABET: &str = ")*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQ";

use digit::Digit;

/// An error encountered while encoding or decoding.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The input length was not a whole number of words: an odd number of
    /// bytes when encoding, or a character count not divisible by 3 when
    /// decoding.
    InvalidLength,
    /// A character outside the alphabet was found while decoding.
    InvalidCharacter {
        /// Index of the character (not the byte) in the input.
        index: usize,
        /// The offending character.
        found: char,
    },
    /// A symbol triple encoded a value greater than 65535.
    InvalidWord {
        /// Character index of the start of the triple.
        index: usize,
    },
    /// The output buffer passed to a `*_to_slice` function was too small.
    BufferTooSmall {
        /// The number of bytes the output requires.
        needed: usize,
    },
}

/// Alias of <code>[Result](core::result::Result)\<T, [Error]></code>.
pub type Result<T> = core::result::Result<T, Error>;

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength => write!(f, "invalid input length"),
            Self::InvalidCharacter {
                index,
                found,
            } => {
                write!(f, "invalid character {:?} at index {}", found, index)
            }
            Self::InvalidWord {
                index,
            } => write!(f, "symbols at index {} exceed 16 bits", index),
            Self::BufferTooSmall {
                needed,
            } => {
                write!(f, "output buffer too small ({} bytes needed)", needed)
            }
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for Error {}

pub use decode::{decode_bytes, decode_str, decode_to_slice, decoded_len};
pub use encode::{encode_to_bytes, encode_to_chars, encode_to_slice};
pub use encode::encoded_len;

#[cfg(feature = "alloc")]
pub use decode::decode_to_vec;
#[cfg(feature = "alloc")]
pub use encode::encode_to_string;

/// Encodes `bytes` as a Base41 string.
///
/// Alias of [`encode_to_string`].
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode(bytes: &[u8]) -> Result<alloc::string::String> {
    encode_to_string(bytes)
}

/// Decodes a Base41 string.
///
/// Alias of [`decode_to_vec`].
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode(s: &str) -> Result<alloc::vec::Vec<u8>> {
    decode_to_vec(s)
}
