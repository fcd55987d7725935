use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::delimited::Delimited;
use crate::error::{Error, Result};
use crate::markup::Markup;
use crate::record::SourceFormat;
use crate::tally::Multiplicities;

/// Turns one input stream into record multiplicities in a single pass.
pub trait RecordSource {
    fn extract<R: BufRead>(&self, reader: R) -> Result<Multiplicities>;
}

impl RecordSource for SourceFormat {
    fn extract<R: BufRead>(&self, reader: R) -> Result<Multiplicities> {
        match self {
            SourceFormat::Delimited => Delimited.extract(reader),
            SourceFormat::Markup => Markup.extract(reader),
        }
    }
}

/// Opens `path`, picks the reader by extension and extracts it. The file is
/// closed before this returns, on success and on failure alike.
pub fn extract_file(path: &Path) -> Result<Multiplicities> {
    let format =
        SourceFormat::from_path(path).ok_or_else(|| Error::UnsupportedFormat(path.to_path_buf()))?;

    let multiplicities = {
        let file = File::open(path)?;
        format.extract(BufReader::new(file))?
    };

    info!(
        path = %path.display(),
        ?format,
        rows = multiplicities.total(),
        distinct = multiplicities.len(),
        "extracted records"
    );

    Ok(multiplicities)
}
