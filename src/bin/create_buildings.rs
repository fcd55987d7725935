use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result, ensure};
use clap::{Parser, ValueEnum};
use floortally::Record;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

const STREETS: [&str; 8] = [
    "Lenina",
    "Mira",
    "Sovetskaya",
    "Gagarina",
    "Pushkina",
    "Tverskaya",
    "Bauman",
    "Nevsky prospekt",
];

// name, mean floor count
const CITIES: [(&str, f64); 8] = [
    ("Moscow", 9.0),
    ("Saint Petersburg", 6.0),
    ("Kazan", 5.0),
    ("Ufa", 4.0),
    ("Yekaterinburg", 7.0),
    ("Novosibirsk", 8.0),
    ("Sochi", 3.0),
    ("Tomsk", 2.5),
];

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Csv,
    Xml,
}

/// Writes a synthetic building dataset to stdout.
#[derive(Parser, Debug)]
struct Cli {
    /// Number of rows, underscores allowed (10_000)
    rows: String,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Share of rows that repeat an earlier row
    #[arg(long, default_value_t = 0.1)]
    duplicate_ratio: f64,

    /// Share of XML items written without a house attribute
    #[arg(long, default_value_t = 0.0)]
    missing_ratio: f64,

    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug)]
struct City {
    name: &'static str,
    distribution: Normal<f64>,
}

impl City {
    fn new(name: &'static str, mean: f64) -> Result<Self> {
        let distribution = Normal::new(mean, 2.0)
            .with_context(|| format!("could not create normal distribution for: {name}"))?;
        Ok(Self { name, distribution })
    }

    fn floors(&self, rng: &mut impl Rng) -> u32 {
        self.distribution.sample(rng).round().clamp(1.0, 30.0) as u32
    }
}

fn generate(cli: &Cli, rng: &mut impl Rng) -> Result<Vec<Record>> {
    let num: usize = cli
        .rows
        .replace('_', "")
        .parse()
        .context("expected an integer row count")?;

    let cities = CITIES
        .iter()
        .map(|&(name, mean)| City::new(name, mean))
        .collect::<Result<Vec<_>>>()?;

    let mut records: Vec<Record> = Vec::with_capacity(num);
    for _ in 0..num {
        if !records.is_empty() && rng.random_bool(cli.duplicate_ratio) {
            let earlier = records[rng.random_range(0..records.len())].clone();
            records.push(earlier);
            continue;
        }

        let city = &cities[rng.random_range(0..cities.len())];
        records.push(Record::new(
            city.name,
            STREETS[rng.random_range(0..STREETS.len())],
            rng.random_range(1..200u32).to_string(),
            city.floors(rng).to_string(),
        ));
    }

    Ok(records)
}

fn write_csv<W: Write>(out: W, records: &[Record]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);
    writer.write_record(["city", "street", "house", "floor"])?;
    for record in records {
        writer.write_record(record.fields())?;
    }
    writer.flush()?;
    Ok(())
}

fn write_xml<W: Write>(out: W, records: &[Record], missing_ratio: f64, rng: &mut impl Rng) -> Result<()> {
    let mut writer = Writer::new_with_indent(out, b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("items")))?;

    for record in records {
        let mut item = BytesStart::new("item");
        item.push_attribute(("city", record.city.as_str()));
        item.push_attribute(("street", record.street.as_str()));
        if !rng.random_bool(missing_ratio) {
            item.push_attribute(("house", record.house.as_str()));
        }
        item.push_attribute(("floor", record.floor_count.as_str()));
        writer.write_event(Event::Empty(item))?;
    }

    writer.write_event(Event::End(BytesEnd::new("items")))?;
    writer.into_inner().flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    ensure!(
        (0.0..=1.0).contains(&cli.duplicate_ratio) && (0.0..=1.0).contains(&cli.missing_ratio),
        "ratios must lie between 0 and 1"
    );

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let records = generate(&cli, &mut rng)?;
    let out = BufWriter::new(io::stdout().lock());

    match cli.format {
        Format::Csv => write_csv(out, &records),
        Format::Xml => write_xml(out, &records, cli.missing_ratio, &mut rng),
    }
}
