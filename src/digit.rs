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

use super::BASE;

use core::convert::TryFrom;

const OFFSET: u8 = 41;

/// A base-41 digit. Always less than 41.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Digit(u8);

impl Digit {
    pub fn new(x: u8) -> Option<Self> {
        (u32::from(x) < BASE).then(|| Self(x))
    }

    /// Takes the remainder of `n` modulo 41 as a digit.
    pub fn from_remainder(n: u32) -> Self {
        Self((n % BASE) as u8)
    }

    pub fn from_ascii(b: u8) -> Option<Self> {
        b.checked_sub(OFFSET).and_then(Self::new)
    }

    pub fn from_char(c: char) -> Option<Self> {
        u8::try_from(u32::from(c)).ok().and_then(Self::from_ascii)
    }

    pub fn to_ascii(self) -> u8 {
        self.0 + OFFSET
    }

    pub fn to_char(self) -> char {
        char::from(self.to_ascii())
    }
}

impl From<Digit> for u8 {
    fn from(d: Digit) -> u8 {
        d.0
    }
}

impl From<Digit> for u32 {
    fn from(d: Digit) -> u32 {
        d.0.into()
    }
}
