//! The fixed-width document header.

use thiserror::Error;
use zerocopy::FromBytes;

/// Length in bytes of the fixed document header.
pub const HEADER_LEN: usize = 58;

/// An error parsing a document header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// Document too short to hold a header.
    #[error("Document shorter than a header ({0} bytes).")]
    Truncated(usize),
    /// Incorrect format marker.
    #[error("Incorrect format marker.")]
    BadMagic,
    /// An offset field held no decimal integer.
    #[error("Segment offset field {0} is not a decimal integer.")]
    MalformedOffsets(usize),
}

/// Byte offsets of the document segments, as declared by the header.
///
/// End offsets are exclusive. Offsets are declared, not verified: each is
/// re-checked against the actual document length when its segment is
/// extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub begin_text: i64,
    pub end_text: i64,
    pub begin_data: i64,
    pub end_data: i64,
    pub begin_analysis: i64,
    pub end_analysis: i64,
}

impl Header {
    /// Parse the header at the start of a document.
    ///
    /// The header is the version marker `FCS3.0` padded to ten bytes,
    /// followed by six 8-byte right-justified decimal offsets.
    pub fn parse(r: &[u8]) -> Result<Header, HeaderError> {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct RawHeader {
            magic: [u8; 10],
            offsets: [[u8; 8]; 6],
        }

        let r: [u8; HEADER_LEN] = r
            .get(..HEADER_LEN)
            .ok_or(HeaderError::Truncated(r.len()))?
            .try_into()
            .unwrap();

        let RawHeader { magic, offsets } = zerocopy::transmute!(r);

        if &magic != b"FCS3.0    " {
            Err(HeaderError::BadMagic)?;
        }

        let mut fields = [0_i64; 6];
        for (n, field) in offsets.iter().enumerate() {
            fields[n] = parse_offset(field).ok_or(HeaderError::MalformedOffsets(n))?;
        }

        let [begin_text, end_text, begin_data, end_data, begin_analysis, end_analysis] = fields;

        Ok(Header {
            begin_text,
            end_text,
            begin_data,
            end_data,
            begin_analysis,
            end_analysis,
        })
    }
}

/// Parse a right-justified, optionally signed decimal offset field.
fn parse_offset(r: &[u8; 8]) -> Option<i64> {
    let s = core::str::from_utf8(r).ok()?;
    let s = s.trim_matches(' ');

    if s.is_empty() {
        return None;
    }

    s.parse().ok()
}
