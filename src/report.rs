use std::io::{self, Write};
use std::time::Duration;

use crate::tally::{CityFloorTally, Multiplicities};

const SEPARATOR: &str = " | ";

const DUPLICATES_HEADER: [&str; 5] = ["City", "Street", "House", "Floors", "Duplicates"];
const TALLY_HEADER: [&str; 3] = ["City", "Floors", "Buildings"];

/// Lists every record seen more than once. The header is always printed; a
/// notice takes the place of the rows when there is nothing to list.
pub fn render_duplicates<W: Write>(out: &mut W, multiplicities: &Multiplicities) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Duplicate records:")?;
    writeln!(out, "{}", DUPLICATES_HEADER.join(SEPARATOR))?;

    let mut any = false;
    for (record, count) in multiplicities.duplicates() {
        writeln!(out, "{record}{SEPARATOR}{count}")?;
        any = true;
    }

    if !any {
        writeln!(out, "No duplicate records found.")?;
        writeln!(out)?;
    }

    Ok(())
}

/// Rows come out in the tally's own order, with an empty line in front of
/// each new city.
pub fn render_city_floor_tally<W: Write>(out: &mut W, tally: &CityFloorTally) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Buildings per city by floor count:")?;
    writeln!(out)?;
    writeln!(out, "{}", TALLY_HEADER.join(SEPARATOR))?;

    let mut previous_city: Option<&str> = None;
    for (city, floors, count) in tally.iter() {
        if previous_city != Some(city) {
            writeln!(out)?;
        }
        writeln!(out, "{city}{SEPARATOR}{floors}{SEPARATOR}{count}")?;
        previous_city = Some(city);
    }

    Ok(())
}

pub fn render_elapsed<W: Write>(out: &mut W, elapsed: Duration) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Processing time: {:.5} s", elapsed.as_secs_f64())?;
    writeln!(out)
}
