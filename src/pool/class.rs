//! One size class: a bounded free list of equally sized arrays.

use spin::Mutex;

/// Free list for arrays of exactly `len` units.
///
/// The lock only guards the push/pop; allocation and deallocation happen
/// outside of it. No class ever takes another class's lock.
pub(crate) struct SizeClass<T> {
    len: usize,
    depth: usize,
    free: Mutex<Vec<Box<[T]>>>,
}

impl<T: Copy + Default> SizeClass<T> {
    pub(crate) fn new(len: usize, depth: usize) -> Self {
        Self {
            len,
            depth,
            free: Mutex::new(Vec::with_capacity(depth)),
        }
    }

    /// Length of every array this class hands out.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Pops a cached array, if any.
    pub(crate) fn pop(&self) -> Option<Box<[T]>> {
        self.free.lock().pop()
    }

    /// Caches `array`, or hands it back when the free list is full.
    pub(crate) fn push(&self, array: Box<[T]>) -> Result<(), Box<[T]>> {
        debug_assert_eq!(array.len(), self.len);
        let mut free = self.free.lock();
        if free.len() < self.depth {
            free.push(array);
            Ok(())
        } else {
            Err(array)
        }
    }

    /// Allocates a fresh array of this class's length.
    pub(crate) fn allocate(&self) -> Box<[T]> {
        vec![T::default(); self.len].into_boxed_slice()
    }

    /// Number of arrays currently cached.
    pub(crate) fn cached(&self) -> usize {
        self.free.lock().len()
    }

    /// Releases every cached array, returning how many were dropped.
    pub(crate) fn drain(&self) -> usize {
        let released = std::mem::take(&mut *self.free.lock());
        released.len()
    }
}
