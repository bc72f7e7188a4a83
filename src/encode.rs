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

//! Functions and types for encoding Base41 data.

use super::iter::Flatten;
use super::Digit;
use super::{Error, Result};
use super::{BASE, BYTES_PER_WORD, SYMBOLS_PER_WORD};

use core::array;
use core::iter::{FusedIterator, Map};
use core::slice::ChunksExact;

#[cfg(feature = "alloc")]
use alloc::string::String;

/// Returns the length of the encoding of `n` bytes, or [`None`] if `n` is
/// odd (or the result would overflow).
pub const fn encoded_len(n: usize) -> Option<usize> {
    if n % BYTES_PER_WORD != 0 {
        return None;
    }
    (n / BYTES_PER_WORD).checked_mul(SYMBOLS_PER_WORD)
}

struct WordsToDigits<'a>(ChunksExact<'a, u8>);

impl<'a> WordsToDigits<'a> {
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() % BYTES_PER_WORD != 0 {
            return Err(Error::InvalidLength);
        }
        Ok(Self(bytes.chunks_exact(BYTES_PER_WORD)))
    }
}

impl<'a> Iterator for WordsToDigits<'a> {
    type Item = [Digit; SYMBOLS_PER_WORD];

    fn next(&mut self) -> Option<Self::Item> {
        let pair = self.0.next()?;
        // Little-endian: the first byte is the low byte.
        let word = u32::from(pair[0]) + 256 * u32::from(pair[1]);
        // 41^3 > 65535, so the last digit needs no reduction, but taking
        // the remainder keeps `Digit` below 41 regardless.
        Some([
            Digit::from_remainder(word),
            Digit::from_remainder(word / BASE),
            Digit::from_remainder(word / (BASE * BASE)),
        ])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> ExactSizeIterator for WordsToDigits<'a> {}

impl<'a> FusedIterator for WordsToDigits<'a> {}

type SymbolTriple<T> = array::IntoIter<T, SYMBOLS_PER_WORD>;

type Symbols<'a, T> = Flatten<
    Map<WordsToDigits<'a>, fn([Digit; SYMBOLS_PER_WORD]) -> SymbolTriple<T>>,
    SymbolTriple<T>,
    SYMBOLS_PER_WORD,
>;

fn digits_to_chars(digits: [Digit; SYMBOLS_PER_WORD]) -> SymbolTriple<char> {
    IntoIterator::into_iter(digits.map(Digit::to_char))
}

fn digits_to_ascii(digits: [Digit; SYMBOLS_PER_WORD]) -> SymbolTriple<u8> {
    IntoIterator::into_iter(digits.map(Digit::to_ascii))
}

/// Iterator returned by [`encode_to_chars`].
pub struct CharEncoder<'a>(Symbols<'a, char>);

impl<'a> CharEncoder<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Result<Self> {
        let words = WordsToDigits::new(bytes)?;
        let f: fn(_) -> _ = digits_to_chars;
        Ok(Self(Flatten::new(words.map(f))))
    }
}

impl<'a> Iterator for CharEncoder<'a> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn fold<B, F>(self, init: B, f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        self.0.fold(init, f)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> ExactSizeIterator for CharEncoder<'a> {}

impl<'a> FusedIterator for CharEncoder<'a> {}

/// Iterator returned by [`encode_to_bytes`].
pub struct ByteEncoder<'a>(Symbols<'a, u8>);

impl<'a> ByteEncoder<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Result<Self> {
        let words = WordsToDigits::new(bytes)?;
        let f: fn(_) -> _ = digits_to_ascii;
        Ok(Self(Flatten::new(words.map(f))))
    }
}

impl<'a> Iterator for ByteEncoder<'a> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn fold<B, F>(self, init: B, f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        self.0.fold(init, f)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> ExactSizeIterator for ByteEncoder<'a> {}

impl<'a> FusedIterator for ByteEncoder<'a> {}

/// Encodes `bytes` as a sequence of Base41 chars.
///
/// Fails with [`Error::InvalidLength`] if `bytes` has an odd length.
pub fn encode_to_chars(bytes: &[u8]) -> Result<CharEncoder<'_>> {
    CharEncoder::new(bytes)
}

/// Encodes `bytes` as a sequence of Base41 symbols in ASCII.
///
/// Fails with [`Error::InvalidLength`] if `bytes` has an odd length.
pub fn encode_to_bytes(bytes: &[u8]) -> Result<ByteEncoder<'_>> {
    ByteEncoder::new(bytes)
}

/// Encodes `bytes` into `dst` as ASCII, returning the number of bytes
/// written.
///
/// `dst` must hold at least [`encoded_len(bytes.len())`](encoded_len)
/// bytes; otherwise [`Error::BufferTooSmall`] is returned and `dst` is left
/// untouched.
pub fn encode_to_slice(bytes: &[u8], dst: &mut [u8]) -> Result<usize> {
    let encoder = encode_to_bytes(bytes)?;
    let needed = encoder.len();
    if dst.len() < needed {
        return Err(Error::BufferTooSmall {
            needed,
        });
    }
    dst.iter_mut().zip(encoder).for_each(|(d, b)| *d = b);
    Ok(needed)
}

/// Encodes `bytes` as a Base41 [`String`].
///
/// Fails with [`Error::InvalidLength`] if `bytes` has an odd length.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode_to_string(bytes: &[u8]) -> Result<String> {
    let encoder = encode_to_chars(bytes)?;
    let mut s = String::with_capacity(encoder.len());
    s.extend(encoder);
    Ok(s)
}
