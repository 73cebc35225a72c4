//! Payload buffer normalization.
//!
//! The tailing subsystem hands chunks over in one of two shapes: a flat byte
//! array it just read, or an offset+length view into a shared backing buffer
//! (a re-sliced read of a larger block). Both collapse into a single owned
//! [`Bytes`] here so everything downstream of the boundary is written once.

use bytes::Bytes;

/// A payload as supplied by the tailing subsystem, before normalization.
#[derive(Debug, Clone)]
pub enum RecordData {
    /// A flat, self-contained byte array.
    Flat(Vec<u8>),
    /// An offset+length view over a shared backing buffer.
    View {
        backing: Bytes,
        offset: usize,
        len: usize,
    },
}

impl RecordData {
    /// Builds a view over `len` bytes of `backing` starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + len` exceeds the backing buffer, mirroring the
    /// out-of-range behavior of slicing.
    pub fn view(backing: Bytes, offset: usize, len: usize) -> Self {
        assert!(
            offset + len <= backing.len(),
            "view [{}, {}) out of range for backing buffer of {} bytes",
            offset,
            offset + len,
            backing.len()
        );
        RecordData::View {
            backing,
            offset,
            len,
        }
    }

    /// Normalizes either shape into one contiguous owned buffer.
    ///
    /// Views are zero-copy: the result shares the backing storage.
    pub fn into_bytes(self) -> Bytes {
        match self {
            RecordData::Flat(data) => Bytes::from(data),
            RecordData::View {
                backing,
                offset,
                len,
            } => backing.slice(offset..offset + len),
        }
    }

    /// Length of the payload in bytes, without normalizing.
    pub fn len(&self) -> usize {
        match self {
            RecordData::Flat(data) => data.len(),
            RecordData::View { len, .. } => *len,
        }
    }

    /// True when the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<u8>> for RecordData {
    fn from(data: Vec<u8>) -> Self {
        RecordData::Flat(data)
    }
}

impl From<&[u8]> for RecordData {
    fn from(data: &[u8]) -> Self {
        RecordData::Flat(data.to_vec())
    }
}

impl From<Bytes> for RecordData {
    fn from(backing: Bytes) -> Self {
        let len = backing.len();
        RecordData::View {
            backing,
            offset: 0,
            len,
        }
    }
}
