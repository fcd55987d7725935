pub mod app;
pub mod delimited;
pub mod error;
pub mod markup;
pub mod record;
pub mod report;
pub mod selector;
pub mod source;
pub mod tally;

pub use app::{App, Report, process_and_render, process_file};
pub use error::{Error, Result};
pub use record::{Record, SourceFormat};
pub use selector::Selector;
pub use source::{RecordSource, extract_file};
pub use tally::{CityFloorTally, FloorOrder, Multiplicities};
