//! Model and vectors file validation
//!
//! The engine must never see bytes that were not produced for it. Both
//! validators run before the engine is handed the file: the binary model
//! header is checked for magic and version, the text vectors header for the
//! declared dimension.

use crate::core::unified_error::{load_errors, BindingResult};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Magic number at the start of every fastText binary model.
pub const FASTTEXT_FILEFORMAT_MAGIC_INT32: i32 = 793712314;
/// Newest model format version understood by fastText.
pub const FASTTEXT_VERSION: i32 = 12;

/// Header constants an engine accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFormat {
    pub magic: i32,
    pub max_version: i32,
}

impl FileFormat {
    pub const FASTTEXT: FileFormat = FileFormat {
        magic: FASTTEXT_FILEFORMAT_MAGIC_INT32,
        max_version: FASTTEXT_VERSION,
    };
}

impl Default for FileFormat {
    fn default() -> Self {
        FileFormat::FASTTEXT
    }
}

/// Decoded binary model header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelHeader {
    pub magic: i32,
    pub version: i32,
}

/// Decoded text vectors header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorsHeader {
    pub rows: i64,
    pub dim: i64,
}

/// Reason a header was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderMismatch {
    #[error("file is too short to hold a model header")]
    Truncated,
    #[error("magic number {found} does not match expected {expected}")]
    Magic { found: i32, expected: i32 },
    #[error("format version {found} is newer than supported version {supported}")]
    Version { found: i32, supported: i32 },
    #[error("vectors header is not two integers")]
    MalformedVectors,
    #[error("vectors dimension {found} does not match model dimension {expected}")]
    Dimension { found: i64, expected: i64 },
}

fn read_i32<R: Read>(reader: &mut R) -> Result<i32, HeaderMismatch> {
    let mut buf = [0u8; 4];
    reader
        .read_exact(&mut buf)
        .map_err(|_| HeaderMismatch::Truncated)?;
    Ok(i32::from_ne_bytes(buf))
}

/// Read and check the 8-byte model header.
///
/// The version is only read when the magic matches, so a foreign file is
/// rejected after consuming at most four bytes.
pub fn check_model_header<R: Read>(
    reader: &mut R,
    format: FileFormat,
) -> Result<ModelHeader, HeaderMismatch> {
    let magic = read_i32(reader)?;
    if magic != format.magic {
        return Err(HeaderMismatch::Magic {
            found: magic,
            expected: format.magic,
        });
    }

    let version = read_i32(reader)?;
    if version > format.max_version {
        return Err(HeaderMismatch::Version {
            found: version,
            supported: format.max_version,
        });
    }

    Ok(ModelHeader { magic, version })
}

/// Outcome of extracting one integer from header text
enum Extracted {
    Value(i64),
    /// only whitespace remains, more input is needed
    Exhausted,
    Invalid,
}

/// Extract the integer at `pos` the way formatted stream input does: skip
/// whitespace, take an optional sign and the longest run of digits, and
/// leave anything after the digits unread.
fn extract_integer(text: &str, pos: &mut usize) -> Extracted {
    let bytes = text.as_bytes();
    while *pos < bytes.len() && bytes[*pos].is_ascii_whitespace() {
        *pos += 1;
    }
    if *pos == bytes.len() {
        return Extracted::Exhausted;
    }

    let start = *pos;
    if matches!(bytes[*pos], b'+' | b'-') {
        *pos += 1;
    }
    let digits = *pos;
    while *pos < bytes.len() && bytes[*pos].is_ascii_digit() {
        *pos += 1;
    }
    if *pos == digits {
        return Extracted::Invalid;
    }

    text[start..*pos]
        .parse()
        .map_or(Extracted::Invalid, Extracted::Value)
}

/// Read the `rows dim` pair that opens a text vectors file and compare the
/// dimension against the model's.
///
/// Integers may be separated by any whitespace, including line breaks. Each
/// value is its leading integer, so `4.5` or `4abc` read as `4`, while text
/// without leading digits where a value is expected is malformed.
pub fn check_vectors_header<R: BufRead>(
    reader: &mut R,
    expected_dim: i64,
) -> Result<VectorsHeader, HeaderMismatch> {
    let mut text = String::new();
    let mut pos = 0;
    let mut values: Vec<i64> = Vec::with_capacity(2);

    while values.len() < 2 {
        match extract_integer(&text, &mut pos) {
            Extracted::Value(value) => values.push(value),
            Extracted::Invalid => return Err(HeaderMismatch::MalformedVectors),
            Extracted::Exhausted => {
                let read = reader
                    .read_line(&mut text)
                    .map_err(|_| HeaderMismatch::MalformedVectors)?;
                if read == 0 {
                    return Err(HeaderMismatch::MalformedVectors);
                }
            }
        }
    }

    let (rows, dim) = (values[0], values[1]);
    if dim != expected_dim {
        return Err(HeaderMismatch::Dimension {
            found: dim,
            expected: expected_dim,
        });
    }

    Ok(VectorsHeader { rows, dim })
}

/// Open a model file and validate its header.
///
/// On success the returned reader is positioned right after the header, ready
/// for the engine to continue deserialization.
pub fn open_model_file(path: &Path, format: FileFormat) -> BindingResult<BufReader<File>> {
    let display = path.to_string_lossy();
    let file = File::open(path).map_err(|e| load_errors::not_open(&display, e))?;
    let mut reader = BufReader::new(file);

    check_model_header(&mut reader, format)
        .map_err(|e| load_errors::wrong_model(&display, e.to_string()))?;

    Ok(reader)
}

/// Open a text vectors file and validate its header against `expected_dim`.
pub fn validate_vectors_file(path: &Path, expected_dim: i64) -> BindingResult<VectorsHeader> {
    let display = path.to_string_lossy();
    let file = File::open(path).map_err(|e| load_errors::not_open(&display, e))?;
    let mut reader = BufReader::new(file);

    check_vectors_header(&mut reader, expected_dim)
        .map_err(|e| load_errors::wrong_model(&display, e.to_string()))
}
