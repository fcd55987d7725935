use std::io::BufRead;

use tracing::debug;

use crate::error::{Error, Result};
use crate::record::Record;
use crate::source::RecordSource;
use crate::tally::Multiplicities;

pub const DELIMITER: u8 = b';';
pub const QUOTE: u8 = b'"';

/// Semicolon separated text with a header line.
///
/// The header is dropped as raw bytes before any field parsing, so it is
/// never mistaken for a record. Every row with at least four fields is
/// counted, empty fields included; columns past the fourth are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct Delimited;

impl Delimited {
    fn reader_builder() -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(false)
            .delimiter(DELIMITER)
            .quote(QUOTE)
            .double_quote(true)
            .flexible(true);
        builder
    }
}

impl RecordSource for Delimited {
    fn extract<R: BufRead>(&self, mut reader: R) -> Result<Multiplicities> {
        // the header may be in any encoding, so drop it as bytes
        let mut header = Vec::new();
        reader.read_until(b'\n', &mut header)?;

        let mut rdr = Self::reader_builder().from_reader(reader);
        let mut row = csv::StringRecord::new();
        let mut multiplicities = Multiplicities::new();

        while rdr.read_record(&mut row)? {
            if row.len() < 4 {
                // +1 for the header we cut off
                let line = row.position().map_or(0, |pos| pos.line() + 1);
                return Err(Error::MalformedRow {
                    line,
                    fields: row.len(),
                });
            }

            multiplicities.insert(Record::new(&row[0], &row[1], &row[2], &row[3]));
        }

        debug!(
            rows = multiplicities.total(),
            distinct = multiplicities.len(),
            "parsed delimited source"
        );

        Ok(multiplicities)
    }
}
