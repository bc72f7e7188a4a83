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

use core::iter::FusedIterator;

/// Groups the items of an iterator into arrays of `N`.
///
/// The number of arrays to produce is given up front; the caller is
/// responsible for checking that `iter` holds at least `len * N` items.
pub struct ArrayChunks<I, const N: usize> {
    iter: I,
    len: usize,
}

impl<I, const N: usize> ArrayChunks<I, N> {
    pub fn new(iter: I, len: usize) -> Self {
        Self {
            iter,
            len,
        }
    }
}

impl<I, const N: usize> Iterator for ArrayChunks<I, N>
where
    I: Iterator,
    I::Item: Copy + Default,
{
    type Item = [I::Item; N];

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let mut chunk = [I::Item::default(); N];
        for item in &mut chunk {
            *item = self.iter.next()?;
        }
        self.len -= 1;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<I, const N: usize> ExactSizeIterator for ArrayChunks<I, N>
where
    I: Iterator,
    I::Item: Copy + Default,
{
}

/// Like [`core::iter::Flatten`], but with a size hint that assumes every
/// sub-iterator not yet taken from `iter` yields exactly `N` items.
pub struct Flatten<I, Sub, const N: usize> {
    iter: I,
    sub: Option<Sub>,
}

impl<I, Sub, const N: usize> Flatten<I, Sub, N> {
    pub fn new(iter: I) -> Self {
        Self {
            iter,
            sub: None,
        }
    }
}

impl<I, Sub, const N: usize> Iterator for Flatten<I, Sub, N>
where
    I: Iterator<Item = Sub>,
    Sub: ExactSizeIterator,
{
    type Item = Sub::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(sub) = &mut self.sub {
            if let Some(item) = sub.next() {
                return Some(item);
            }
        }
        for mut sub in &mut self.iter {
            if let Some(item) = sub.next() {
                self.sub = Some(sub);
                return Some(item);
            }
        }
        self.sub = None;
        None
    }

    fn fold<B, F>(self, init: B, mut f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        let init = match self.sub {
            Some(sub) => sub.fold(init, &mut f),
            None => init,
        };
        self.iter.fold(init, |b, sub| sub.fold(b, &mut f))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = self.sub.as_ref().map_or(0, |sub| sub.len());
        let (lower, upper) = self.iter.size_hint();
        (
            lower.saturating_mul(N).saturating_add(pending),
            upper
                .and_then(|n| n.checked_mul(N))
                .and_then(|n| n.checked_add(pending)),
        )
    }
}

impl<I, Sub, const N: usize> FusedIterator for Flatten<I, Sub, N>
where
    I: FusedIterator<Item = Sub>,
    Sub: ExactSizeIterator,
{
}
