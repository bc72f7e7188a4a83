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

//! Functions and types for decoding Base41 data.

use super::iter::{ArrayChunks, Flatten};
use super::Digit;
use super::{Error, Result};
use super::{BASE, BYTES_PER_WORD, SYMBOLS_PER_WORD};

use core::array;
use core::convert::TryFrom;
use core::iter::{Copied, FusedIterator, Take};
use core::slice;
use core::str::Chars;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Returns the length of the data encoded by `n` Base41 symbols, or
/// [`None`] if `n` is not a multiple of 3.
pub const fn decoded_len(n: usize) -> Option<usize> {
    if n % SYMBOLS_PER_WORD != 0 {
        return None;
    }
    Some(n / SYMBOLS_PER_WORD * BYTES_PER_WORD)
}

trait Symbol: Copy + Default {
    fn digit(self) -> Option<Digit>;

    /// Used in [`Error::InvalidCharacter`].
    fn to_char(self) -> char;
}

impl Symbol for char {
    fn digit(self) -> Option<Digit> {
        Digit::from_char(self)
    }

    fn to_char(self) -> char {
        self
    }
}

impl Symbol for u8 {
    fn digit(self) -> Option<Digit> {
        Digit::from_ascii(self)
    }

    fn to_char(self) -> char {
        char::from(self)
    }
}

/// Decodes one symbol triple starting at character `index`.
fn decode_word<S: Symbol>(
    triple: [S; SYMBOLS_PER_WORD],
    index: usize,
) -> Result<u16> {
    let mut digits = [0_u32; SYMBOLS_PER_WORD];
    for (i, (s, d)) in triple.iter().zip(&mut digits).enumerate() {
        *d = s.digit().map(u32::from).ok_or(Error::InvalidCharacter {
            index: index + i,
            found: s.to_char(),
        })?;
    }
    // Least significant digit first.
    let word = digits.iter().rev().fold(0, |word, d| word * BASE + d);
    u16::try_from(word).map_err(|_| Error::InvalidWord {
        index,
    })
}

type WordBytes = Take<array::IntoIter<Result<u8>, BYTES_PER_WORD>>;

/// Turns symbol triples into byte pairs. Stops after the first error.
struct TriplesToBytes<I> {
    iter: I,
    index: usize,
    failed: bool,
}

impl<I> TriplesToBytes<I> {
    pub fn new(iter: I) -> Self {
        Self {
            iter,
            index: 0,
            failed: false,
        }
    }
}

impl<I, S> Iterator for TriplesToBytes<I>
where
    I: Iterator<Item = [S; SYMBOLS_PER_WORD]>,
    S: Symbol,
{
    type Item = WordBytes;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let triple = self.iter.next()?;
        let index = self.index;
        self.index += SYMBOLS_PER_WORD;
        Some(match decode_word(triple, index) {
            Ok(word) => {
                let [low, high] = word.to_le_bytes();
                IntoIterator::into_iter([Ok(low), Ok(high)])
                    .take(BYTES_PER_WORD)
            }
            Err(e) => {
                self.failed = true;
                IntoIterator::into_iter([Err(e), Ok(0)]).take(1)
            }
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            self.iter.size_hint()
        }
    }
}

impl<I, S> FusedIterator for TriplesToBytes<I>
where
    I: Iterator<Item = [S; SYMBOLS_PER_WORD]>,
    S: Symbol,
{
}

type Decoder<I> = Flatten<
    TriplesToBytes<ArrayChunks<I, SYMBOLS_PER_WORD>>,
    WordBytes,
    BYTES_PER_WORD,
>;

fn size_hint<I: Iterator>(decoder: &I) -> (usize, Option<usize>) {
    // An error ends decoding early, so only the upper bound is known.
    (0, decoder.size_hint().1)
}

/// Iterator returned by [`decode_str`].
pub struct StrDecoder<'a>(Decoder<Chars<'a>>);

impl<'a> StrDecoder<'a> {
    pub(crate) fn new(s: &'a str) -> Result<Self> {
        let count = s.chars().count();
        if count % SYMBOLS_PER_WORD != 0 {
            return Err(Error::InvalidLength);
        }
        let triples = ArrayChunks::new(s.chars(), count / SYMBOLS_PER_WORD);
        Ok(Self(Flatten::new(TriplesToBytes::new(triples))))
    }
}

impl<'a> Iterator for StrDecoder<'a> {
    type Item = Result<u8>;

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
        size_hint(&self.0)
    }
}

impl<'a> FusedIterator for StrDecoder<'a> {}

/// Iterator returned by [`decode_bytes`].
pub struct BytesDecoder<'a>(Decoder<Copied<slice::Iter<'a, u8>>>);

impl<'a> BytesDecoder<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() % SYMBOLS_PER_WORD != 0 {
            return Err(Error::InvalidLength);
        }
        let triples = ArrayChunks::new(
            bytes.iter().copied(),
            bytes.len() / SYMBOLS_PER_WORD,
        );
        Ok(Self(Flatten::new(TriplesToBytes::new(triples))))
    }
}

impl<'a> Iterator for BytesDecoder<'a> {
    type Item = Result<u8>;

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
        size_hint(&self.0)
    }
}

impl<'a> FusedIterator for BytesDecoder<'a> {}

/// Decodes a Base41 `str`.
///
/// Fails immediately with [`Error::InvalidLength`] if the number of chars
/// in `s` is not a multiple of 3. Otherwise, the returned iterator yields
/// the decoded bytes, or a single error for the first invalid symbol
/// triple, after which it ends.
pub fn decode_str(s: &str) -> Result<StrDecoder<'_>> {
    StrDecoder::new(s)
}

/// Decodes Base41 symbols given as ASCII bytes.
///
/// This function is like [`decode_str`], but each byte is one symbol. A
/// byte outside the alphabet is reported in [`Error::InvalidCharacter`]
/// as the char with the same code point.
pub fn decode_bytes(bytes: &[u8]) -> Result<BytesDecoder<'_>> {
    BytesDecoder::new(bytes)
}

/// Decodes Base41 symbols given as ASCII bytes into `dst`, returning the
/// number of bytes written.
///
/// `dst` must hold at least [`decoded_len(input.len())`](decoded_len)
/// bytes. Every triple is checked before anything is written, so on error
/// `dst` is left untouched.
pub fn decode_to_slice(input: &[u8], dst: &mut [u8]) -> Result<usize> {
    let needed = decoded_len(input.len()).ok_or(Error::InvalidLength)?;
    if dst.len() < needed {
        return Err(Error::BufferTooSmall {
            needed,
        });
    }
    let words = || {
        input.chunks_exact(SYMBOLS_PER_WORD).enumerate().map(|(i, c)| {
            decode_word([c[0], c[1], c[2]], i * SYMBOLS_PER_WORD)
        })
    };
    words().try_for_each(|word| word.map(drop))?;
    for (pair, word) in dst.chunks_exact_mut(BYTES_PER_WORD).zip(words()) {
        pair.copy_from_slice(&word?.to_le_bytes());
    }
    Ok(needed)
}

/// Decodes a Base41 `str` into a [`Vec`].
///
/// Nothing is returned on failure; see [`decode_str`] for the errors.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode_to_vec(s: &str) -> Result<Vec<u8>> {
    let mut decoder = decode_str(s)?;
    let mut bytes = Vec::with_capacity(decoder.size_hint().1.unwrap_or(0));
    decoder.try_for_each(|b| b.map(|b| bytes.push(b)))?;
    Ok(bytes)
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    const DATA: [u8; 10] = [26, 168, 48, 178, 7, 162, 52, 188, 199, 36];

    #[test]
    fn known_vector() {
        assert_eq!(decode_to_vec("BABA.DEDA.DECA.").unwrap(), DATA);
    }

    #[test]
    fn empty() {
        assert_eq!(decode_to_vec("").unwrap(), Vec::<u8>::new());
        assert_eq!(decoded_len(0), Some(0));
    }

    #[test]
    fn bad_length() {
        assert_eq!(decode_to_vec("AB"), Err(Error::InvalidLength));
        assert_eq!(decode_to_vec("BABA"), Err(Error::InvalidLength));
        assert!(decode_bytes(b"A").is_err());
        assert_eq!(decoded_len(4), None);
    }

    #[test]
    fn length_counts_chars() {
        // Three chars, four UTF-8 bytes.
        assert_eq!(
            decode_to_vec("Aé)"),
            Err(Error::InvalidCharacter {
                index: 1,
                found: 'é',
            }),
        );
        // Two chars, three UTF-8 bytes.
        assert_eq!(decode_to_vec("éA"), Err(Error::InvalidLength));
    }

    #[test]
    fn bad_char() {
        assert_eq!(
            decode_to_vec("!!!"),
            Err(Error::InvalidCharacter {
                index: 0,
                found: '!',
            }),
        );
        assert_eq!(
            decode_to_vec("BABA.R"),
            Err(Error::InvalidCharacter {
                index: 5,
                found: 'R',
            }),
        );
        assert_eq!(
            decode_to_vec(")))((("),
            Err(Error::InvalidCharacter {
                index: 3,
                found: '(',
            }),
        );
    }

    #[test]
    fn first_error_wins() {
        let mut decoder = decode_str("))))R!").unwrap();
        assert_eq!(decoder.next(), Some(Ok(0)));
        assert_eq!(decoder.next(), Some(Ok(0)));
        assert_eq!(
            decoder.next(),
            Some(Err(Error::InvalidCharacter {
                index: 4,
                found: 'R',
            })),
        );
        assert_eq!(decoder.next(), None);
    }

    #[test]
    fn word_overflow() {
        // ":QO" is 65535; ";QO" is 65536.
        assert_eq!(decode_to_vec(":QO").unwrap(), [0xff, 0xff]);
        assert_eq!(
            decode_to_vec(")));QO"),
            Err(Error::InvalidWord {
                index: 3,
            }),
        );
        assert_eq!(
            decode_to_vec("QQQ"),
            Err(Error::InvalidWord {
                index: 0,
            }),
        );
    }

    #[test]
    fn bytes_input() {
        let bytes: Result<Vec<u8>> =
            decode_bytes(b"BABA.DEDA.DECA.").unwrap().collect();
        assert_eq!(bytes.unwrap(), DATA);
        assert_eq!(
            decode_bytes(&[b'A', b'A', 0xe9]).unwrap().next(),
            Some(Err(Error::InvalidCharacter {
                index: 2,
                found: 'é',
            })),
        );
    }

    #[test]
    fn to_slice() {
        let mut buf = [0xaa; 12];
        assert_eq!(decode_to_slice(b"BABA.DEDA.DECA.", &mut buf), Ok(10));
        assert_eq!(buf[..10], DATA);
        assert_eq!(buf[10..], [0xaa, 0xaa]);

        let mut buf = [0xaa; 4];
        assert_eq!(
            decode_to_slice(b")))!))", &mut buf),
            Err(Error::InvalidCharacter {
                index: 3,
                found: '!',
            }),
        );
        assert_eq!(buf, [0xaa; 4]);
        assert_eq!(
            decode_to_slice(b":QO;QO", &mut buf),
            Err(Error::InvalidWord {
                index: 3,
            }),
        );
        assert_eq!(buf, [0xaa; 4]);
        assert_eq!(decode_to_slice(b":QO)))", &mut buf), Ok(4));
        assert_eq!(buf, [0xff, 0xff, 0, 0]);
        assert_eq!(
            decode_to_slice(b"BABA.DEDA.DECA.", &mut buf),
            Err(Error::BufferTooSmall {
                needed: 10,
            }),
        );
    }
}
