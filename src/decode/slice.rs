//! Slice-based decoder implementation.

use alloc::vec::Vec;

use either::Either::{Left, Right};
use thiserror::Error;

use crate::format;
use crate::header::{Header, HeaderError};
use crate::matrix::DataMatrix;
use crate::segment;
use crate::text::TextDictionary;

use super::{Decode, Options, Unsupported};

/// Errors aborting a decode outright.
///
/// Format and DATA-segment conditions are not listed here: they refuse the
/// matrix but still return the dictionary (see [`Unsupported`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Incorrect document header.
    #[error("Incorrect document header: {0}")]
    Header(#[from] HeaderError),
    /// The declared TEXT segment is absent or too short.
    #[error("Could not locate TEXT segment.")]
    MissingText,
}

/// Decode a document held in memory.
///
/// This function is also re-exported as `cuvette::decode_slice`.
pub fn decode(r: &[u8], options: &Options) -> Result<Decode, Error> {
    let header = Header::parse(r)?;

    let text = segment::locate(r, header.begin_text, header.end_text).ok_or(Error::MissingText)?;
    let text = TextDictionary::parse(text).ok_or(Error::MissingText)?;

    log::debug!("TEXT segment: {} entries", text.len());

    let mut warnings = Vec::new();

    let data = match format::check(&text, &mut warnings) {
        Ok(layout) => match DataMatrix::decode(r, &header, &layout) {
            Ok(matrix) => {
                log::debug!(
                    "DATA segment: {} events of {} parameters",
                    matrix.events(),
                    matrix.parameters(),
                );
                Left(matrix)
            }
            Err(e) => Right(Unsupported::Data(e)),
        },
        Err(e) => Right(Unsupported::Format(e)),
    };

    Ok(Decode {
        text: options.include_text.then_some(text),
        data,
        warnings,
    })
}
