use std::fmt;
use std::path::Path;

/// One building entry. Fields are compared byte for byte; `floor_count` is an
/// opaque key and is never parsed here.
#[derive(Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Record {
    pub city: String,
    pub street: String,
    pub house: String,
    pub floor_count: String,
}

impl Record {
    pub fn new(
        city: impl Into<String>,
        street: impl Into<String>,
        house: impl Into<String>,
        floor_count: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            street: street.into(),
            house: house.into(),
            floor_count: floor_count.into(),
        }
    }

    pub fn fields(&self) -> [&str; 4] {
        [&self.city, &self.street, &self.house, &self.floor_count]
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fields().join(" | "))
    }
}

/// The two record shapes we know how to read, told apart by file extension.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SourceFormat {
    Delimited,
    Markup,
}

impl SourceFormat {
    /// Extension matching is exact: `data.CSV` is not recognised.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("csv") => Some(SourceFormat::Delimited),
            Some("xml") => Some(SourceFormat::Markup),
            _ => None,
        }
    }
}
