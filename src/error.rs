//! Error types.
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors are either I/O issues or variant lines that do not follow the VCF column layout
pub enum Error {
    #[error("Could not read or write file")]
    /// Read/write error on the input VCF or output BED
    Io(#[from] std::io::Error),
    #[error("Could not open VCF file")]
    /// Opening or detecting the compression of the input failed
    CouldNotOpen(#[from] niffler::Error),
    #[error("VCF line {line} has {found} columns but at least 10 are required")]
    /// Line is missing mandatory or sample columns
    MissingColumns {
        /// 1-based line number in the input
        line: usize,
        /// Number of whitespace delimited columns found
        found: usize,
    },
    #[error("VCF line {line} has position `{value}` which is not a positive integer")]
    /// POS column could not be read as a 1-based coordinate
    InvalidPosition {
        /// 1-based line number in the input
        line: usize,
        /// Raw POS column
        value: String,
    },
}
