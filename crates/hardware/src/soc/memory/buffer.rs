//! Backing store for the main-memory bank.
//!
//! On Unix the buffer is an anonymous `mmap` reserved without swap, so only
//! the pages a program touches are committed by the host. Elsewhere it is a
//! zeroed heap allocation.

use std::io;
use std::slice;

/// Contiguous, zero-initialized byte buffer.
pub struct DramBuffer {
    ptr: *mut u8,
    size: usize,
    is_mmap: bool,
}

// SAFETY: the buffer uniquely owns its allocation and hands out references
// only through `&self`/`&mut self`, so the usual borrow rules apply.
unsafe impl Send for DramBuffer {}
// SAFETY: see `Send`; no interior mutability is exposed.
unsafe impl Sync for DramBuffer {}

impl DramBuffer {
    /// Allocates a zeroed buffer of `size` bytes.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the mapping cannot be created.
    pub fn new(size: usize) -> io::Result<Self> {
        #[cfg(unix)]
        {
            use std::ptr;
            // SAFETY: anonymous private mapping with no address hint; the
            // result is checked against MAP_FAILED before use.
            let ptr = unsafe {
                libc::mmap(
                    ptr::null_mut(),
                    size.max(1),
                    libc::PROT_READ | libc::PROT_WRITE,
                    libc::MAP_PRIVATE | libc::MAP_ANONYMOUS | libc::MAP_NORESERVE,
                    -1,
                    0,
                )
            };

            if ptr == libc::MAP_FAILED {
                return Err(io::Error::last_os_error());
            }

            Ok(Self {
                ptr: ptr as *mut u8,
                size,
                is_mmap: true,
            })
        }

        #[cfg(not(unix))]
        {
            let mut bytes = vec![0u8; size].into_boxed_slice();
            let ptr = bytes.as_mut_ptr();
            std::mem::forget(bytes);
            Ok(Self {
                ptr,
                size,
                is_mmap: false,
            })
        }
    }

    /// Returns the size of the buffer in bytes.
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns whether the buffer is zero-sized.
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Borrows the whole buffer.
    pub const fn as_slice(&self) -> &[u8] {
        // SAFETY: `ptr` is valid for `size` initialized bytes for the
        // lifetime of `self`.
        unsafe { slice::from_raw_parts(self.ptr, self.size) }
    }

    /// Mutably borrows the whole buffer.
    pub const fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: as `as_slice`; `&mut self` guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.ptr, self.size) }
    }

    /// Reads the little-endian word at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + 4` exceeds the buffer.
    pub fn read_u32(&self, offset: usize) -> u32 {
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.as_slice()[offset..offset + 4]);
        u32::from_le_bytes(word)
    }

    /// Copies `data` into the buffer at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the buffer.
    pub fn write_slice(&mut self, offset: usize, data: &[u8]) {
        self.as_mut_slice()[offset..offset + data.len()].copy_from_slice(data);
    }
}

impl std::fmt::Debug for DramBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DramBuffer")
            .field("size", &self.size)
            .field("is_mmap", &self.is_mmap)
            .finish_non_exhaustive()
    }
}

impl Drop for DramBuffer {
    fn drop(&mut self) {
        if self.is_mmap {
            #[cfg(unix)]
            // SAFETY: `ptr` came from `mmap` with this length and is unmapped once.
            unsafe {
                let _ = libc::munmap(self.ptr.cast(), self.size.max(1));
            }
        } else {
            #[cfg(not(unix))]
            // SAFETY: `ptr` came from a leaked boxed slice of exactly `size` bytes.
            unsafe {
                drop(Box::from_raw(slice::from_raw_parts_mut(self.ptr, self.size)));
            }
        }
    }
}
