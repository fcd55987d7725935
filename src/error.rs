use std::path::PathBuf;

use thiserror::Error;

/// Anything that can go wrong between picking a file and printing its reports.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("error during CSV processing: {0}")]
    Csv(#[from] csv::Error),
    #[error("error during XML processing at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },
    #[error("malformed XML at byte {position}: {reason}")]
    MalformedXml { position: u64, reason: String },
    #[error("line {line}: expected 4 fields, found {fields}")]
    MalformedRow { line: u64, fields: usize },
    #[error("unsupported file type: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
