#![no_std]

//! An efficient decoder for Luminex LXB flow cytometry containers.
//!
//! LXB files are FCS 3.0 documents as written by Luminex bead-array
//! instruments: a fixed ASCII header locating the segments, a
//! delimiter-separated TEXT segment of acquisition metadata, and a DATA
//! segment of little-endian 32-bit channel values. Cuvette decodes a file
//! into a [`text::TextDictionary`] and, when the declared format is within
//! the supported subset, a [`matrix::DataMatrix`] of per-event channel
//! values clipped to each parameter's declared range.
//!
//! Most users should begin with [`decode_slice`] (or, with the `std`
//! feature, [`decode_file`]). The individual pipeline stages in [`header`],
//! [`text`], [`format`], and [`matrix`] are public for applications that
//! want to stop early, for example to inspect the metadata of a file whose
//! DATA segment is unsupported.
//!
//! An unsupported or absent DATA segment does not discard the metadata:
//! [`decode::Decode`] carries the dictionary alongside either the matrix or
//! the reason numeric decoding was refused.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable reader- and path-based decoders (default).

extern crate alloc;

pub mod decode;
pub mod format;
pub mod header;
pub mod matrix;
pub mod text;

mod segment;

pub use decode::slice::decode as decode_slice;

#[cfg(feature = "std")]
pub use decode::reader::{decode as decode_reader, decode_file};
