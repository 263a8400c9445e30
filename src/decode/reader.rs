//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::io::Read;
use std::path::Path;
use std::vec::Vec;

use thiserror::Error;

use super::{Decode, Options, slice};

extern crate std;

/// Errors occurring while decoding from a source.
#[derive(Debug, Error)]
pub enum Error {
    /// The document could not be read from its source.
    #[error("Could not read document source: {0}")]
    Unavailable(#[from] std::io::Error),
    /// An error from the decoder itself.
    #[error(transparent)]
    Decode(#[from] slice::Error),
}

/// Decode a document from a reader.
///
/// Read failures surface as [`Error::Unavailable`], distinct from failures
/// of the document itself.
///
/// This function is also re-exported as `cuvette::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: &mut impl Read, options: &Options) -> Result<Decode, Error> {
    let mut buf = Vec::new();
    r.read_to_end(&mut buf)?;

    Ok(slice::decode(&buf, options)?)
}

/// Decode a document from a file path.
///
/// This function is also re-exported as `cuvette::decode_file`.
///
/// _Requires Cargo feature `std`._
pub fn decode_file(path: impl AsRef<Path>, options: &Options) -> Result<Decode, Error> {
    let buf = std::fs::read(path)?;

    Ok(slice::decode(&buf, options)?)
}
