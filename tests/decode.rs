//! Full-pipeline checks over synthetic in-memory documents.

#![cfg(feature = "std")]

use either::Either::Right;

use cuvette::decode::slice::Error;
use cuvette::decode::{Options, Unsupported, Warning, reader};
use cuvette::format::{FormatError, parameter_key};
use cuvette::header::HeaderError;
use cuvette::matrix::DataError;

/// Assemble a document from metadata pairs and DATA segment cells.
fn document<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)], cells: &[u32]) -> Vec<u8> {
    let mut text = vec![b'/'];
    for (key, value) in pairs {
        text.extend_from_slice(key.as_ref().as_bytes());
        text.push(b'/');
        text.extend_from_slice(value.as_ref().as_bytes());
        text.push(b'/');
    }

    let begin_text = 58;
    let end_text = begin_text + text.len();
    let begin_data = end_text;
    let end_data = begin_data + cells.len() * 4;

    let mut r = format!(
        "FCS3.0    {begin_text:>8}{end_text:>8}{begin_data:>8}{end_data:>8}{:>8}{:>8}",
        0, 0,
    )
    .into_bytes();
    r.extend_from_slice(&text);
    for cell in cells {
        r.extend_from_slice(&cell.to_le_bytes());
    }
    r
}

/// Metadata declaring a supported layout of 32-bit parameters, each with
/// the full value range.
fn supported(parameters: usize, events: usize) -> Vec<(String, String)> {
    let mut pairs = vec![
        ("$PAR".to_string(), parameters.to_string()),
        ("$TOT".to_string(), events.to_string()),
        ("$DATATYPE".to_string(), "I".to_string()),
        ("$MODE".to_string(), "L".to_string()),
        ("$BYTEORD".to_string(), "1,2,3,4".to_string()),
    ];
    for n in 0..parameters {
        pairs.push((parameter_key(n, 'B'), "32".to_string()));
        pairs.push((parameter_key(n, 'R'), "4294967296".to_string()));
    }
    pairs
}

#[test]
fn decodes_matrix_parameter_fastest() {
    let mut pairs = supported(2, 3);
    pairs.push(("$P1N".to_string(), "CD3".to_string()));
    pairs.push(("$P2N".to_string(), "CD45".to_string()));
    let r = document(&pairs, &[1, 2, 3, 4, 5, 6]);

    let decode = cuvette::decode_slice(&r, &Options::new()).unwrap();

    let text = decode.text.unwrap();
    assert_eq!(text.get("$PAR"), Some("2"));

    let matrix = decode.data.left().unwrap();
    assert_eq!(matrix.parameters(), 2);
    assert_eq!(matrix.events(), 3);
    assert_eq!(matrix.labels(), ["CD3", "CD45"]);

    let first: Vec<_> = matrix.parameter_values(0).collect();
    let second: Vec<_> = matrix.parameter_values(1).collect();
    assert_eq!(first, [1, 3, 5]);
    assert_eq!(second, [2, 4, 6]);

    assert_eq!(matrix.event(1), Some(&[3, 4][..]));
    assert_eq!(matrix.value(1, 2), Some(6));
    assert_eq!(matrix.value(2, 0), None);
}

#[test]
fn applies_range_masks_per_parameter() {
    let mut pairs = supported(2, 3);
    pairs.iter_mut().find(|(k, _)| k == "$P1R").unwrap().1 = "4".to_string();
    pairs.retain(|(k, _)| k != "$P2R");
    let r = document(&pairs, &[5, 7, 6, 9, 7, 11]);

    let decode = cuvette::decode_slice(&r, &Options::new()).unwrap();

    let matrix = decode.data.left().unwrap();
    let first: Vec<_> = matrix.parameter_values(0).collect();
    let second: Vec<_> = matrix.parameter_values(1).collect();
    assert_eq!(first, [1, 2, 3]); // values & 0b11
    assert_eq!(second, [0, 0, 0]); // undeclared range zeroes the channel
}

#[test]
fn refuses_counts_overrunning_data_segment() {
    let r = document(&supported(2, 3), &[1, 2, 3, 4]);

    let decode = cuvette::decode_slice(&r, &Options::new()).unwrap();

    assert!(decode.text.is_some());
    assert_eq!(
        decode.data,
        Right(Unsupported::Data(DataError::Truncated {
            required: 24,
            available: 16,
        })),
    );
}

#[test]
fn refuses_data_segment_beyond_document() {
    let mut r = document(&supported(2, 3), &[1, 2, 3, 4, 5, 6]);
    r.truncate(r.len() - 4);

    let decode = cuvette::decode_slice(&r, &Options::new()).unwrap();

    assert!(decode.text.is_some());
    assert_eq!(
        decode.data,
        Right(Unsupported::Data(DataError::MissingSegment)),
    );
}

#[test]
fn refuses_empty_data_segment() {
    let r = document(&supported(2, 3), &[]);

    let decode = cuvette::decode_slice(&r, &Options::new()).unwrap();

    assert_eq!(
        decode.data,
        Right(Unsupported::Data(DataError::MissingSegment)),
    );
}

#[test]
fn keeps_dictionary_when_format_unsupported() {
    let mut pairs = supported(2, 3);
    pairs.iter_mut().find(|(k, _)| k == "$DATATYPE").unwrap().1 = "F".to_string();
    let r = document(&pairs, &[1, 2, 3, 4, 5, 6]);

    let decode = cuvette::decode_slice(&r, &Options::new()).unwrap();

    let text = decode.text.as_ref().unwrap();
    assert_eq!(text.get("$DATATYPE"), Some("F"));
    assert_eq!(
        decode.data,
        Right(Unsupported::Format(FormatError::UnsupportedDataType(
            "F".to_string(),
        ))),
    );
}

#[test]
fn keeps_dictionary_when_parameter_limit_exceeded() {
    let r = document(&supported(100, 1), &[0; 100]);

    let decode = cuvette::decode_slice(&r, &Options::new()).unwrap();

    assert!(decode.text.is_some());
    assert_eq!(
        decode.data,
        Right(Unsupported::Format(FormatError::TooManyParameters(100))),
    );
}

#[test]
fn excludes_dictionary_on_request() {
    let r = document(&supported(2, 3), &[1, 2, 3, 4, 5, 6]);

    let options = Options::new().include_text(false);
    let decode = cuvette::decode_slice(&r, &options).unwrap();

    assert!(decode.text.is_none());
    assert!(decode.data.is_left());
}

#[test]
fn warns_on_unicode_flag() {
    let mut pairs = supported(1, 1);
    pairs.push(("$UNICODE".to_string(), "40 $P1N".to_string()));
    let r = document(&pairs, &[42]);

    let decode = cuvette::decode_slice(&r, &Options::new()).unwrap();

    assert_eq!(decode.warnings, [Warning::UnicodeUnsupported]);
    assert!(decode.data.is_left());
}

#[test]
fn ignores_bytes_past_declared_cells() {
    let r = document(&supported(2, 1), &[1, 2, 99]);

    let decode = cuvette::decode_slice(&r, &Options::new()).unwrap();

    let matrix = decode.data.left().unwrap();
    assert_eq!(matrix.events(), 1);
    assert_eq!(matrix.values(), [1, 2]);
}

#[test]
fn decodes_empty_matrix_for_zero_events() {
    let r = document(&supported(2, 0), &[99]);

    let decode = cuvette::decode_slice(&r, &Options::new()).unwrap();

    let matrix = decode.data.left().unwrap();
    assert_eq!(matrix.events(), 0);
    assert!(matrix.values().is_empty());
}

#[test]
fn rejects_wrong_magic() {
    let mut r = document(&supported(1, 1), &[42]);
    r[..10].copy_from_slice(b"FCS2.0    ");

    let err = cuvette::decode_slice(&r, &Options::new()).unwrap_err();
    assert_eq!(err, Error::Header(HeaderError::BadMagic));
}

#[test]
fn rejects_unlocatable_text_segment() {
    let r = format!("FCS3.0    {:>8}{:>8}{:>8}{:>8}{:>8}{:>8}", 0, 0, 0, 0, 0, 0).into_bytes();

    let err = cuvette::decode_slice(&r, &Options::new()).unwrap_err();
    assert_eq!(err, Error::MissingText);
}

#[test]
fn rejects_text_segment_shorter_than_delimiter_and_content() {
    let mut r = format!("FCS3.0    {:>8}{:>8}{:>8}{:>8}{:>8}{:>8}", 58, 59, 0, 0, 0, 0).into_bytes();
    r.push(b'/');

    let err = cuvette::decode_slice(&r, &Options::new()).unwrap_err();
    assert_eq!(err, Error::MissingText);
}

#[test]
fn concurrent_decodes_use_independent_masks() {
    let mut narrow = supported(1, 2);
    narrow.iter_mut().find(|(k, _)| k == "$P1R").unwrap().1 = "4".to_string();
    let narrow = document(&narrow, &[0xFF, 0xFF]);

    let mut wide = supported(1, 2);
    wide.iter_mut().find(|(k, _)| k == "$P1R").unwrap().1 = "256".to_string();
    let wide = document(&wide, &[0xFF, 0xFF]);

    let handles = [narrow, wide].map(|r| {
        std::thread::spawn(move || {
            let decode = cuvette::decode_slice(&r, &Options::new()).unwrap();
            decode.data.left().unwrap().values().to_vec()
        })
    });

    let [narrow, wide] = handles.map(|h| h.join().unwrap());
    assert_eq!(narrow, [0x03, 0x03]);
    assert_eq!(wide, [0xFF, 0xFF]);
}

#[test]
fn decodes_from_reader() {
    let r = document(&supported(2, 3), &[1, 2, 3, 4, 5, 6]);
    let mut cursor = std::io::Cursor::new(r);

    let decode = cuvette::decode_reader(&mut cursor, &Options::new()).unwrap();
    assert!(decode.data.is_left());
}

#[test]
fn reports_unavailable_source_distinctly() {
    let err = cuvette::decode_file("fixtures/does-not-exist.lxb", &Options::new()).unwrap_err();
    assert!(matches!(err, reader::Error::Unavailable(_)));
}
