use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;

use tracing::{error, info};

use crate::error::Result;
use crate::report::{render_city_floor_tally, render_duplicates, render_elapsed};
use crate::selector::Selector;
use crate::source::extract_file;
use crate::tally::{CityFloorTally, FloorOrder, Multiplicities};

/// Both aggregates for one file. Never modified once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub multiplicities: Multiplicities,
    pub tally: CityFloorTally,
}

impl Report {
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        render_duplicates(out, &self.multiplicities)?;
        render_city_floor_tally(out, &self.tally)
    }
}

pub fn process_file(path: &Path, order: FloorOrder) -> Result<Report> {
    let multiplicities = extract_file(path)?;
    let tally = CityFloorTally::from_multiplicities(&multiplicities, order);

    Ok(Report {
        multiplicities,
        tally,
    })
}

/// Reads, aggregates and prints `path`, timing the whole pipeline including
/// the printing.
pub fn process_and_render<W: Write>(path: &Path, order: FloorOrder, out: &mut W) -> Result<()> {
    let started = Instant::now();
    let report = process_file(path, order)?;
    report.render(out)?;
    render_elapsed(out, started.elapsed())?;

    info!(
        path = %path.display(),
        duplicates = report.multiplicities.duplicates().count(),
        buckets = report.tally.len(),
        "processed file"
    );

    Ok(())
}

/// The interactive session: pick a file, report on it, ask whether to go on.
pub struct App<R, W> {
    selector: Selector<R, W>,
    order: FloorOrder,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(selector: Selector<R, W>, order: FloorOrder) -> Self {
        Self { selector, order }
    }

    pub fn into_selector(self) -> Selector<R, W> {
        self.selector
    }

    /// A file that fails to parse is reported and the user is sent back to
    /// the file prompt. Only failures to talk to the user end the session.
    pub fn run(&mut self) -> Result<()> {
        while let Some(path) = self.selector.select()? {
            if let Err(err) = process_and_render(&path, self.order, self.selector.output()) {
                error!(path = %path.display(), %err, "failed to process file");
                writeln!(
                    self.selector.output(),
                    "Error: failed to process {}: {err}",
                    path.display()
                )?;
                continue;
            }

            if !self.selector.ask_continue()? {
                break;
            }
        }

        Ok(())
    }
}
