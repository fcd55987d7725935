use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use crate::error::{Error, Result};
use crate::record::Record;
use crate::source::RecordSource;
use crate::tally::Multiplicities;

pub const ITEM_TAG: &[u8] = b"item";

/// A document whose root holds `<item city=".." street=".." house=".." floor=".."/>`
/// children. Items missing any of the four attributes, or carrying an empty
/// one, are skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct Markup;

fn malformed(position: u64, reason: &str) -> Error {
    Error::MalformedXml {
        position,
        reason: reason.to_string(),
    }
}

/// `None` when the item lacks one of the four attributes or has it empty.
/// Values are decoded with the encoding the document declared.
fn record_from(
    item: &BytesStart<'_>,
    decoder: Decoder,
) -> std::result::Result<Option<Record>, quick_xml::Error> {
    let mut city = None;
    let mut street = None;
    let mut house = None;
    let mut floor = None;

    for attr in item.attributes() {
        let attr = attr?;
        let slot = match attr.key.as_ref() {
            b"city" => &mut city,
            b"street" => &mut street,
            b"house" => &mut house,
            b"floor" => &mut floor,
            _ => continue,
        };
        *slot = Some(attr.decode_and_unescape_value(decoder)?.into_owned());
    }

    let record = match (city, street, house, floor) {
        (Some(city), Some(street), Some(house), Some(floor))
            if !city.is_empty() && !street.is_empty() && !house.is_empty() && !floor.is_empty() =>
        {
            Some(Record::new(city, street, house, floor))
        }
        _ => None,
    };

    Ok(record)
}

impl RecordSource for Markup {
    fn extract<R: BufRead>(&self, reader: R) -> Result<Multiplicities> {
        let mut reader = Reader::from_reader(reader);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut depth = 0usize;
        let mut seen_root = false;
        let mut dropped = 0usize;
        let mut multiplicities = Multiplicities::new();

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|source| Error::Xml {
                    position: reader.error_position() as u64,
                    source,
                })?;
            let position = reader.buffer_position() as u64;

            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    if depth == 0 {
                        if seen_root {
                            return Err(malformed(position, "more than one root element"));
                        }
                        seen_root = true;
                    } else if depth == 1 && e.name().as_ref() == ITEM_TAG {
                        let record = record_from(e, reader.decoder())
                            .map_err(|source| Error::Xml { position, source })?;
                        match record {
                            Some(record) => multiplicities.insert(record),
                            None => {
                                dropped += 1;
                                debug!(position, "skipping item with a missing attribute");
                            }
                        }
                    }

                    if matches!(event, Event::Start(_)) {
                        depth += 1;
                    }
                }
                Event::End(_) => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| malformed(position, "closing tag without an opening tag"))?;
                }
                Event::Text(ref text) if depth == 0 => {
                    if text.iter().any(|b| !b.is_ascii_whitespace()) {
                        return Err(malformed(position, "text outside the root element"));
                    }
                }
                Event::CData(_) if depth == 0 => {
                    return Err(malformed(position, "text outside the root element"));
                }
                Event::Eof => {
                    if depth != 0 {
                        return Err(malformed(position, "unexpected end of document"));
                    }
                    if !seen_root {
                        return Err(malformed(position, "no root element"));
                    }
                    break;
                }
                _ => (),
            }

            buf.clear();
        }

        debug!(
            rows = multiplicities.total(),
            distinct = multiplicities.len(),
            dropped,
            "parsed markup source"
        );

        Ok(multiplicities)
    }
}
