//! Validation of the declared data format, and range mask derivation.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use thiserror::Error;
use tinyvec::ArrayVec;

use crate::text::TextDictionary;

/// Maximum number of parameters (channels) handled per document.
pub const MAX_PAR: usize = 99;

/// An error validating the declared data format.
///
/// Any of these refuses numeric decoding; the metadata dictionary remains
/// available to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// No parameter count was declared.
    #[error("Parameter count ($PAR) is missing.")]
    MissingParameterCount,
    /// More parameters than this decoder handles.
    #[error("Too many parameters ($PAR={0}, limit {MAX_PAR}).")]
    TooManyParameters(i64),
    /// Data is not stored as integers.
    #[error("Data is not integral ($DATATYPE={0:?}).")]
    UnsupportedDataType(String),
    /// Data is not in list mode.
    #[error("Data is not in list mode ($MODE={0:?}).")]
    UnsupportedMode(String),
    /// Data is not little endian.
    #[error("Data is not in little endian byte order ($BYTEORD={0:?}).")]
    UnsupportedByteOrder(String),
    /// A parameter is not stored as 32 bits.
    #[error("Parameter {parameter} is not 32 bits wide ($P{n}B={bits}).", n = .parameter + 1)]
    UnsupportedBitWidth { parameter: usize, bits: i64 },
}

/// A non-fatal condition noticed while validating a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Warning {
    /// The document declares `$UNICODE`; text output may be corrupted.
    #[error("Unicode flag detected; text output may be corrupted.")]
    UnicodeUnsupported,
}

/// Per-parameter bitmasks clipping decoded values to their declared range.
///
/// One entry per declared parameter: `$PnR − 1` where the range is a
/// positive integer, `0` otherwise. A zero mask zeroes every value of its
/// parameter. The table is owned by the decode that derived it, so
/// concurrent decodes cannot observe each other's masks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterMask {
    masks: ArrayVec<[u32; MAX_PAR]>,
}

impl ParameterMask {
    /// Derive masks for the first `parameters` declared parameters.
    pub fn derive(txt: &TextDictionary, parameters: usize) -> ParameterMask {
        let mut masks = ArrayVec::default();

        for n in 0..parameters.min(MAX_PAR) {
            let range = txt.get_int(&parameter_key(n, 'R')).unwrap_or(0);

            masks.push(match range {
                1.. => u32::try_from(range - 1).unwrap_or(u32::MAX),
                _ => 0,
            });
        }

        ParameterMask { masks }
    }

    /// The mask for a parameter, `0` for indices outside the table.
    pub fn get(&self, parameter: usize) -> u32 {
        self.masks.get(parameter).copied().unwrap_or(0)
    }

    /// Number of parameters covered.
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }
}

/// The validated data layout: counts, range masks, and display labels.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    /// Declared parameter count (`$PAR`).
    pub parameters: usize,
    /// Declared event count (`$TOT`).
    pub events: usize,
    /// Per-parameter range masks.
    pub masks: ParameterMask,
    /// Per-parameter display labels (`$PnN`), empty where undeclared.
    pub labels: Vec<String>,
}

/// Build a per-parameter keyword, of the form `$P{n+1}{kind}`.
///
/// Parameter keywords are numbered from one: `parameter_key(0, 'B')` is
/// `"$P1B"`.
pub fn parameter_key(n: usize, kind: char) -> String {
    format!("$P{}{}", n + 1, kind)
}

/// Check the declared format against the supported subset.
///
/// Checks run in a fixed order and stop at the first failure. Non-fatal
/// conditions are appended to `warnings`. Range masks are derived as soon
/// as the parameter count is known, before the remaining checks.
pub fn check(txt: &TextDictionary, warnings: &mut Vec<Warning>) -> Result<Layout, FormatError> {
    let parameters = txt
        .get_int("$PAR")
        .ok_or(FormatError::MissingParameterCount)?;
    if parameters > MAX_PAR as i64 {
        return Err(FormatError::TooManyParameters(parameters));
    }
    let parameters = parameters.max(0) as usize;

    let masks = ParameterMask::derive(txt, parameters);

    let data_type = txt.get("$DATATYPE").unwrap_or("");
    if !data_type.eq_ignore_ascii_case("I") {
        return Err(FormatError::UnsupportedDataType(data_type.to_string()));
    }

    let mode = txt.get("$MODE").unwrap_or("");
    if !mode.eq_ignore_ascii_case("L") {
        return Err(FormatError::UnsupportedMode(mode.to_string()));
    }

    let byte_order = txt.get("$BYTEORD").unwrap_or("");
    if byte_order != "1,2,3,4" {
        return Err(FormatError::UnsupportedByteOrder(byte_order.to_string()));
    }

    if !txt.get("$UNICODE").unwrap_or("").is_empty() {
        // The TEXT segment was tokenized bytewise regardless; affected
        // values may be corrupted, but numeric decoding is unaffected.
        log::warn!("Unicode flag detected; text output may be corrupted");
        warnings.push(Warning::UnicodeUnsupported);
    }

    for parameter in 0..parameters {
        let bits = txt.get_int(&parameter_key(parameter, 'B')).unwrap_or(0);
        if bits != 32 {
            return Err(FormatError::UnsupportedBitWidth { parameter, bits });
        }
    }

    let events = txt.get_int("$TOT").unwrap_or(0).max(0) as usize;

    let labels = (0..parameters)
        .map(|n| txt.get(&parameter_key(n, 'N')).unwrap_or("").to_string())
        .collect();

    Ok(Layout {
        parameters,
        events,
        masks,
        labels,
    })
}
