//! Owned, NUL-terminated output buffer handed back to the host.

use std::ffi::{c_char, CString};

use crate::error::FilterError;

/// Serialized record followed by a single NUL sentinel.
///
/// Holds no interior NUL, so callers that scan for the terminator see the
/// whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBuffer {
    inner: CString,
}

impl OutputBuffer {
    /// Wrap serialized bytes, appending the sentinel.
    pub fn new(bytes: Vec<u8>) -> Result<Self, FilterError> {
        let inner = CString::new(bytes).map_err(|e| FilterError::EmbeddedNul {
            position: e.nul_position(),
        })?;
        Ok(Self { inner })
    }

    /// Contents without the sentinel.
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }

    /// Contents including the trailing sentinel.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        self.inner.as_bytes_with_nul()
    }

    pub fn to_str(&self) -> Result<&str, FilterError> {
        Ok(std::str::from_utf8(self.as_bytes())?)
    }

    /// Length without the sentinel.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// Hand ownership to the caller. The allocation is not freed until it
    /// comes back through [`OutputBuffer::from_raw`].
    pub fn into_raw(self) -> *mut u8 {
        self.inner.into_raw().cast::<u8>()
    }

    /// Reclaim a buffer previously released with [`OutputBuffer::into_raw`].
    ///
    /// # Safety
    ///
    /// `ptr` must come from `into_raw`, must not have been reclaimed already,
    /// and the bytes up to and including the sentinel must be unmodified.
    pub unsafe fn from_raw(ptr: *mut u8) -> Self {
        // SAFETY: guaranteed by the caller, see above.
        let inner = unsafe { CString::from_raw(ptr.cast::<c_char>()) };
        Self { inner }
    }
}
