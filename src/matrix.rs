//! The DATA segment: the per-event channel value grid.

use alloc::string::String;
use alloc::vec::Vec;

use either::Either::{Left, Right};
use thiserror::Error;

use crate::format::Layout;
use crate::header::Header;
use crate::segment;

/// An error extracting the DATA segment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// The declared DATA segment is absent or out of bounds.
    #[error("Could not locate DATA segment.")]
    MissingSegment,
    /// The declared counts overrun the DATA segment.
    #[error("DATA segment holds {available} bytes, but the declared counts need {required}.")]
    Truncated { required: usize, available: usize },
}

/// Channel values for every recorded event.
///
/// Values are stored in document order, parameter index varying fastest:
/// one contiguous block of `parameters` values per event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataMatrix {
    parameters: usize,
    events: usize,
    labels: Vec<String>,
    values: Vec<u32>,
}

impl DataMatrix {
    /// Decode the DATA segment of a document.
    ///
    /// Reads `events × parameters` unsigned little-endian 32-bit values
    /// from the segment, applying each parameter's range mask. The read is
    /// bounded by the segment: counts overrunning it are refused rather
    /// than decoded short, and bytes past the declared cell count are
    /// ignored.
    pub fn decode(r: &[u8], header: &Header, layout: &Layout) -> Result<DataMatrix, DataError> {
        let data = segment::locate(r, header.begin_data, header.end_data)
            .ok_or(DataError::MissingSegment)?;

        let required = layout
            .events
            .saturating_mul(layout.parameters)
            .saturating_mul(size_of::<u32>());
        if required > data.len() {
            return Err(DataError::Truncated {
                required,
                available: data.len(),
            });
        }

        let mut values = Vec::with_capacity(required / size_of::<u32>());
        for (k, cell) in data[..required].chunks_exact(size_of::<u32>()).enumerate() {
            let value = u32::from_le_bytes(cell.try_into().unwrap());
            values.push(value & layout.masks.get(k % layout.parameters));
        }

        Ok(DataMatrix {
            parameters: layout.parameters,
            events: layout.events,
            labels: layout.labels.clone(),
            values,
        })
    }

    /// Number of parameters (channels) per event.
    pub fn parameters(&self) -> usize {
        self.parameters
    }

    /// Number of recorded events.
    pub fn events(&self) -> usize {
        self.events
    }

    /// Display labels for each parameter, from `$PnN`.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The value of one parameter within one event.
    pub fn value(&self, parameter: usize, event: usize) -> Option<u32> {
        if parameter >= self.parameters {
            return None;
        }

        let k = event.checked_mul(self.parameters)?.checked_add(parameter)?;
        self.values.get(k).copied()
    }

    /// All channel values of one event, in parameter order.
    pub fn event(&self, event: usize) -> Option<&[u32]> {
        let begin = event.checked_mul(self.parameters)?;
        self.values.get(begin..begin.checked_add(self.parameters)?)
    }

    /// One parameter's value across every event, in event order.
    pub fn parameter_values(&self, parameter: usize) -> impl Iterator<Item = u32> + '_ {
        if parameter >= self.parameters {
            Left(core::iter::empty())
        } else {
            Right(
                self.values
                    .iter()
                    .skip(parameter)
                    .step_by(self.parameters)
                    .copied(),
            )
        }
    }

    /// All values in document order, parameter index varying fastest.
    pub fn values(&self) -> &[u32] {
        &self.values
    }
}
