use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::Error;

/// A delay line for a single channel.
///
/// The storage might live on the stack, in a static or on the heap, which means
/// we do this as a trait that is fulfilled per storage kind.
///
/// The delay has a fixed capacity decided at construction, and an active length
/// in `1..=capacity` that can be changed later without reallocating. Each processed
/// sample does `read` (and maybe `read_previous`), then `write`, then `advance`.
pub trait Delay: Sized {
    /// Create a zero filled delay holding `capacity` samples. The active length
    /// starts out as the full capacity.
    fn with_capacity(capacity: usize) -> Result<Self, Error>;

    /// Max number of samples the delay can hold.
    fn capacity(&self) -> usize;

    /// The active length of the delay.
    fn len(&self) -> usize;

    /// Change the active length. Fails if `len` is zero or above capacity.
    fn set_len(&mut self, len: usize) -> Result<(), Error>;

    /// Current cursor position, always `< len()`.
    fn cursor(&self) -> usize;

    /// Read the value at the cursor.
    fn read(&self) -> f32;

    /// Read the value at the slot before the cursor, wrapping within the active length.
    fn read_previous(&self) -> f32;

    /// Overwrite the value at the cursor.
    fn write(&mut self, v: f32);

    /// Move cursor to the next slot.
    fn advance(&mut self);

    /// Zero the samples and rewind the cursor.
    fn clear(&mut self);
}

/// Cursor arithmetic shared by the delay implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    fn new(len: usize) -> Self {
        Cursor { index: 0, len }
    }

    fn previous(&self) -> usize {
        (self.index + self.len - 1) % self.len
    }

    fn advance(&mut self) {
        self.index += 1;
        if self.index >= self.len {
            self.index = 0;
        }
        debug_assert!(self.index < self.len);
    }

    fn resize(&mut self, len: usize, capacity: usize) -> Result<(), Error> {
        if len == 0 {
            return Err(Error::ZeroLength);
        }
        if len > capacity {
            return Err(Error::CapacityExceeded { len, capacity });
        }

        self.len = len;
        if self.index >= len {
            self.index %= len;
        }

        Ok(())
    }
}

/// An in-memory version of the [`Delay`] trait, sized at compile time.
///
/// Useful for short delays or targets where the buffer should be placed
/// statically. The whole array is moved along with the delay, so large `N` are
/// better served by [`HeapDelay`].
///
/// The capacity asked for in `with_capacity` may be less than `N`, and is what
/// bounds `set_len`.
pub struct MemoryDelay<const N: usize> {
    buffer: [f32; N],
    capacity: usize,
    cursor: Cursor,
}

impl<const N: usize> Delay for MemoryDelay<N> {
    fn with_capacity(capacity: usize) -> Result<Self, Error> {
        if N == 0 || capacity == 0 {
            return Err(Error::ZeroLength);
        }
        if capacity > N {
            return Err(Error::CapacityExceeded { len: capacity, capacity: N });
        }

        Ok(Self {
            buffer: [0.0; N],
            capacity,
            cursor: Cursor::new(capacity),
        })
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.cursor.len
    }

    fn set_len(&mut self, len: usize) -> Result<(), Error> {
        self.cursor.resize(len, self.capacity)
    }

    fn cursor(&self) -> usize {
        self.cursor.index
    }

    fn read(&self) -> f32 {
        self.buffer[self.cursor.index]
    }

    fn read_previous(&self) -> f32 {
        self.buffer[self.cursor.previous()]
    }

    fn write(&mut self, v: f32) {
        self.buffer[self.cursor.index] = v;
    }

    fn advance(&mut self) {
        self.cursor.advance();
    }

    fn clear(&mut self) {
        self.buffer = [0.0; N];
        self.cursor.index = 0;
    }
}

/// A heap allocated version of the [`Delay`] trait.
///
/// The buffer is allocated once in `with_capacity`, and an allocation failure is
/// reported rather than aborting.
pub struct HeapDelay {
    buffer: Box<[f32]>,
    cursor: Cursor,
}

impl Delay for HeapDelay {
    fn with_capacity(capacity: usize) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::ZeroLength);
        }

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(capacity)
            .map_err(|_| Error::Allocation { capacity })?;
        buffer.resize(capacity, 0.0);

        Ok(Self {
            buffer: buffer.into_boxed_slice(),
            cursor: Cursor::new(capacity),
        })
    }

    fn capacity(&self) -> usize {
        self.buffer.len()
    }

    fn len(&self) -> usize {
        self.cursor.len
    }

    fn set_len(&mut self, len: usize) -> Result<(), Error> {
        self.cursor.resize(len, self.buffer.len())
    }

    fn cursor(&self) -> usize {
        self.cursor.index
    }

    fn read(&self) -> f32 {
        self.buffer[self.cursor.index]
    }

    fn read_previous(&self) -> f32 {
        self.buffer[self.cursor.previous()]
    }

    fn write(&mut self, v: f32) {
        self.buffer[self.cursor.index] = v;
    }

    fn advance(&mut self) {
        self.cursor.advance();
    }

    fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.cursor.index = 0;
    }
}
