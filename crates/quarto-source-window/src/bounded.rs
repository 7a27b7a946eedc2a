/*
 * bounded.rs
 * Copyright (c) 2026 Posit, PBC
 */

//! Fixed-capacity stack used to collect line ranges.
//!
//! A [`BoundedStack`] never allocates. Its storage is either an inline array
//! whose size is a const parameter, or a mutable slice lent by the caller.
//! Pushing into a full stack fails with [`CapacityError`] instead of growing
//! or dropping the value.

use crate::error::CapacityError;

#[derive(Debug)]
enum Storage<'s, T, const N: usize> {
    Inline([T; N]),
    Borrowed(&'s mut [T]),
}

/// An ordered, bounded collection with a fallible push.
#[derive(Debug)]
pub struct BoundedStack<'s, T, const N: usize> {
    storage: Storage<'s, T, N>,
    len: usize,
    capacity: usize,
}

impl<T: Default, const N: usize> BoundedStack<'_, T, N> {
    /// Stack backed by an inline array holding up to `N` items.
    pub fn inline() -> Self {
        Self::inline_with_limit(N)
    }

    /// Inline stack that refuses pushes beyond `limit` items (at most `N`).
    pub fn inline_with_limit(limit: usize) -> Self {
        BoundedStack {
            storage: Storage::Inline(std::array::from_fn(|_| T::default())),
            len: 0,
            capacity: limit.min(N),
        }
    }
}

impl<'s, T> BoundedStack<'s, T, 0> {
    /// Stack that stores its items in a caller-supplied slice.
    ///
    /// The capacity is the slice length. Existing slice contents are
    /// overwritten as items are pushed.
    pub fn from_slice(buffer: &'s mut [T]) -> Self {
        let capacity = buffer.len();
        BoundedStack {
            storage: Storage::Borrowed(buffer),
            len: 0,
            capacity,
        }
    }
}

impl<T, const N: usize> BoundedStack<'_, T, N> {
    fn storage(&self) -> &[T] {
        match &self.storage {
            Storage::Inline(items) => items.as_slice(),
            Storage::Borrowed(items) => &items[..],
        }
    }

    fn storage_mut(&mut self) -> &mut [T] {
        match &mut self.storage {
            Storage::Inline(items) => items.as_mut_slice(),
            Storage::Borrowed(items) => &mut items[..],
        }
    }

    /// Appends `item`, or reports the capacity when the stack is full.
    pub fn push(&mut self, item: T) -> Result<(), CapacityError> {
        if self.is_full() {
            return Err(CapacityError {
                capacity: self.capacity,
            });
        }
        let len = self.len;
        self.storage_mut()[len] = item;
        self.len += 1;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[T] {
        &self.storage()[..self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len;
        &mut self.storage_mut()[..len]
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}
