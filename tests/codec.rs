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

use base41::{decode, encode, Error, ALPHABET};
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

/// A string of whole symbol triples, each encoding a value below 65536.
#[derive(Clone, Debug)]
struct Encoded(String);

impl Arbitrary for Encoded {
    fn arbitrary(g: &mut Gen) -> Self {
        let symbols: Vec<char> = ALPHABET.chars().collect();
        let words = usize::arbitrary(g) % (g.size() + 1);
        let mut s = String::new();
        for _ in 0..words {
            let mut word = u32::from(u16::arbitrary(g));
            for _ in 0..3 {
                s.push(symbols[(word % 41) as usize]);
                word /= 41;
            }
        }
        Self(s)
    }
}

fn even(mut bytes: Vec<u8>) -> Vec<u8> {
    bytes.truncate(bytes.len() / 2 * 2);
    bytes
}

#[quickcheck]
fn bytes_round_trip(bytes: Vec<u8>) -> bool {
    let bytes = even(bytes);
    decode(&encode(&bytes).unwrap()).unwrap() == bytes
}

#[quickcheck]
fn symbols_round_trip(s: Encoded) -> bool {
    encode(&decode(&s.0).unwrap()).unwrap() == s.0
}

#[quickcheck]
fn length_law(bytes: Vec<u8>, s: Encoded) -> bool {
    let bytes = even(bytes);
    encode(&bytes).unwrap().len() == 3 * bytes.len() / 2
        && decode(&s.0).unwrap().len() == 2 * s.0.len() / 3
}

#[quickcheck]
fn odd_length_rejected(mut bytes: Vec<u8>, extra: u8) -> bool {
    bytes.truncate(bytes.len() / 2 * 2);
    bytes.push(extra);
    encode(&bytes) == Err(Error::InvalidLength)
}

#[quickcheck]
fn encoding_uses_alphabet(bytes: Vec<u8>) -> bool {
    encode(&even(bytes)).unwrap().chars().all(|c| ALPHABET.contains(c))
}

#[test]
fn known_vector() {
    let data = [26, 168, 48, 178, 7, 162, 52, 188, 199, 36];
    assert_eq!(encode(&data).unwrap(), "BABA.DEDA.DECA.");
    assert_eq!(decode("BABA.DEDA.DECA.").unwrap(), data);
}

#[test]
fn empty() {
    assert_eq!(encode(&[]).unwrap(), "");
    assert!(decode("").unwrap().is_empty());
}

#[test]
fn errors() {
    assert_eq!(encode(&[1, 2, 3]), Err(Error::InvalidLength));
    assert_eq!(decode("AB"), Err(Error::InvalidLength));
    assert!(matches!(
        decode("!!!"),
        Err(Error::InvalidCharacter {
            found: '!',
            ..
        })
    ));
    assert_eq!(
        decode("BABA.DEDA.DEC\u{7f}."),
        Err(Error::InvalidCharacter {
            index: 13,
            found: '\u{7f}',
        }),
    );
}

#[test]
fn every_word() {
    let mut buf = [0; 3];
    for word in 0..=u16::MAX {
        let bytes = word.to_le_bytes();
        assert_eq!(base41::encode_to_slice(&bytes, &mut buf), Ok(3));
        let mut out = [0; 2];
        assert_eq!(base41::decode_to_slice(&buf, &mut out), Ok(2));
        assert_eq!(out, bytes);
    }
}

#[test]
fn error_messages() {
    assert_eq!(Error::InvalidLength.to_string(), "invalid input length");
    assert_eq!(
        decode("))(").unwrap_err().to_string(),
        "invalid character '(' at index 2",
    );
    assert_eq!(
        decode("QQQ").unwrap_err().to_string(),
        "symbols at index 0 exceed 16 bits",
    );
}
