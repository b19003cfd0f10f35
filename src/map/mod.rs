//! Storage for diagram elements.
//!
//! The diagram stores its vertices, half-edges and faces in [`Arena`]s: a
//! vector of slots with a free list. Every slot carries a generation counter
//! which is part of the handle, so stale handles are detected instead of
//! silently referring to a recycled element.

use std::{
    fmt,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use crate::handle::{hsize, Handle};


#[cfg(test)]
mod tests;


#[derive(Clone)]
struct Slot<T> {
    generation: hsize,
    value: Option<T>,
}

/// A generational arena mapping handles of type `H` to values of type `T`.
///
/// - `push` returns a fresh handle. Freed slots are reused (most recently
///   freed first), but with a new generation.
/// - Lookups with a handle whose generation doesn't match return `None`
///   (`get`) or panic (`Index`).
/// - `clear` keeps the slots alive but bumps all generations. Thus, no handle
///   created before `clear` will ever be valid again.
#[derive(Clone)]
pub struct Arena<H: Handle, T> {
    slots: Vec<Slot<T>>,
    free: Vec<hsize>,
    len: hsize,
    _dummy: PhantomData<H>,
}

impl<H: Handle, T> Arena<H, T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
            _dummy: PhantomData,
        }
    }

    /// Adds an element and returns its handle.
    pub fn push(&mut self, elem: T) -> H {
        self.len += 1;
        match self.free.pop() {
            Some(idx) => {
                let slot = &mut self.slots[idx as usize];
                debug_assert!(slot.value.is_none());
                slot.value = Some(elem);
                H::new(idx, slot.generation)
            }
            None => {
                let idx = self.slots.len();
                assert!(idx < hsize::max_value() as usize, "arena is full");
                self.slots.push(Slot { generation: 0, value: Some(elem) });
                H::new(idx as hsize, 0)
            }
        }
    }

    /// Removes the element referred to by `handle` and returns it. Returns
    /// `None` if the handle is stale.
    pub fn remove(&mut self, handle: H) -> Option<T> {
        let slot = self.slots.get_mut(handle.to_usize())?;
        if slot.generation != handle.generation() {
            return None;
        }

        let out = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.idx());
        self.len -= 1;
        Some(out)
    }

    /// Removes all elements. All handles created so far become stale.
    pub fn clear(&mut self) {
        self.free.clear();
        for (idx, slot) in self.slots.iter_mut().enumerate().rev() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(idx as hsize);
        }
        self.len = 0;
    }

    /// Returns `true` if `handle` refers to a live element of this arena.
    pub fn contains_handle(&self, handle: H) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: H) -> Option<&T> {
        self.slots.get(handle.to_usize())
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        self.slots.get_mut(handle.to_usize())
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.value.as_mut())
    }

    /// Returns the number of live elements.
    pub fn num_elements(&self) -> hsize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates over the handles of all live elements in slot order.
    pub fn handles(&self) -> Handles<'_, H, T> {
        Handles {
            iter: self.slots.iter().enumerate(),
            _dummy: PhantomData,
        }
    }

    /// Iterates over all live elements together with their handles in slot
    /// order.
    pub fn iter(&self) -> Iter<'_, H, T> {
        Iter {
            iter: self.slots.iter().enumerate(),
            _dummy: PhantomData,
        }
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(|slot| slot.value.as_ref())
    }
}

impl<H: Handle, T> Default for Arena<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Handle, T> Index<H> for Arena<H, T> {
    type Output = T;
    fn index(&self, handle: H) -> &Self::Output {
        match self.get(handle) {
            None => panic!("no element found for handle '{:?}' (stale or foreign handle)", handle),
            Some(r) => r,
        }
    }
}

impl<H: Handle, T> IndexMut<H> for Arena<H, T> {
    fn index_mut(&mut self, handle: H) -> &mut Self::Output {
        match self.get_mut(handle) {
            None => panic!("no element found for handle '{:?}' (stale or foreign handle)", handle),
            Some(r) => r,
        }
    }
}

impl<H: Handle, T: fmt::Debug> fmt::Debug for Arena<H, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}


/// Iterator over the handles of an [`Arena`].
#[derive(Debug)]
pub struct Handles<'a, H: Handle, T> {
    iter: std::iter::Enumerate<std::slice::Iter<'a, Slot<T>>>,
    _dummy: PhantomData<H>,
}

impl<'a, H: Handle, T> Iterator for Handles<'a, H, T> {
    type Item = H;
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.by_ref()
            .find(|(_, slot)| slot.value.is_some())
            .map(|(idx, slot)| H::new(idx as hsize, slot.generation))
    }
}

/// Iterator over the handles and elements of an [`Arena`].
#[derive(Debug)]
pub struct Iter<'a, H: Handle, T> {
    iter: std::iter::Enumerate<std::slice::Iter<'a, Slot<T>>>,
    _dummy: PhantomData<H>,
}

impl<'a, H: Handle, T> Iterator for Iter<'a, H, T> {
    type Item = (H, &'a T);
    fn next(&mut self) -> Option<Self::Item> {
        for (idx, slot) in &mut self.iter {
            if let Some(value) = &slot.value {
                return Some((H::new(idx as hsize, slot.generation), value));
            }
        }
        None
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Slot {{ generation: {}, value: {:?} }}", self.generation, self.value)
    }
}
