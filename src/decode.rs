//! Convenience interfaces decoding a whole document.
//!
//! [`slice::decode`] runs the full pipeline over an in-memory document.
//! With the `std` feature, [`reader::decode`] and [`reader::decode_file`]
//! read the document from a source first, reporting read failures
//! distinctly from failures of the document itself.

#[cfg(feature = "std")]
pub mod reader;
pub mod slice;

use alloc::vec::Vec;

use either::Either;
use thiserror::Error;

use crate::format::FormatError;
use crate::matrix::{DataError, DataMatrix};
use crate::text::TextDictionary;

pub use crate::format::Warning;

/// Why numeric decoding was refused for a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unsupported {
    /// The declared format is outside the supported subset.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The DATA segment is absent or inconsistent with the declared counts.
    #[error(transparent)]
    Data(#[from] DataError),
}

/// A decoded document.
///
/// The metadata dictionary is produced even when numeric decoding is
/// refused; `data` then carries the reason instead of a matrix.
#[derive(Debug, Clone)]
pub struct Decode {
    /// The TEXT segment dictionary, unless excluded by [`Options`].
    pub text: Option<TextDictionary>,
    /// The decoded event matrix, or why none was produced.
    pub data: Either<DataMatrix, Unsupported>,
    /// Non-fatal conditions noticed along the way.
    pub warnings: Vec<Warning>,
}

/// Options controlling the shape of a decode.
#[derive(Debug, Clone)]
pub struct Options {
    pub(crate) include_text: bool,
}

impl Options {
    pub fn new() -> Options {
        Options { include_text: true }
    }

    /// Attach the metadata dictionary to the result (default `true`).
    ///
    /// The TEXT segment is tokenized and validated either way; this only
    /// controls whether the dictionary is kept in the result.
    pub fn include_text(mut self, include: bool) -> Options {
        self.include_text = include;
        self
    }
}

impl Default for Options {
    fn default() -> Options {
        Options::new()
    }
}
