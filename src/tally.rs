use std::cmp::Ordering;

use hashbrown::HashMap;
use indexmap::IndexMap;

use crate::record::Record;

/// How many times each distinct record was seen, in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Multiplicities {
    counts: IndexMap<Record, u64>,
}

impl Multiplicities {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn insert(&mut self, record: Record) {
        *self.counts.entry(record).or_insert(0) += 1;
    }

    pub fn count(&self, record: &Record) -> u64 {
        self.counts.get(record).copied().unwrap_or(0)
    }

    /// Number of distinct records.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of accepted input rows.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Record, u64)> {
        self.counts.iter().map(|(record, &count)| (record, count))
    }

    pub fn duplicates(&self) -> impl Iterator<Item = (&Record, u64)> {
        self.iter().filter(|&(_, count)| count > 1)
    }

    pub fn has_duplicates(&self) -> bool {
        self.duplicates().next().is_some()
    }
}

impl FromIterator<Record> for Multiplicities {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut multiplicities = Multiplicities::new();
        for record in iter {
            multiplicities.insert(record);
        }
        multiplicities
    }
}

/// Ordering applied to floor counts inside one city.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FloorOrder {
    /// Plain string order, so "10" sorts before "2".
    #[default]
    Lexicographic,
    /// Integers by value, anything unparsable after them in string order.
    Numeric,
}

impl FloorOrder {
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            FloorOrder::Lexicographic => a.cmp(b),
            FloorOrder::Numeric => match (a.parse::<u64>(), b.parse::<u64>()) {
                (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
                (Ok(_), Err(_)) => Ordering::Less,
                (Err(_), Ok(_)) => Ordering::Greater,
                (Err(_), Err(_)) => a.cmp(b),
            },
        }
    }
}

/// Distinct buildings per `(city, floor_count)`, sorted by city then floor count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CityFloorTally {
    entries: Vec<((String, String), usize)>,
}

impl CityFloorTally {
    /// Every distinct record adds exactly one to its bucket, however many
    /// times it was duplicated.
    pub fn from_multiplicities(multiplicities: &Multiplicities, order: FloorOrder) -> Self {
        let mut buckets: HashMap<(&str, &str), usize> = HashMap::new();

        for (record, _) in multiplicities.iter() {
            *buckets
                .entry((record.city.as_str(), record.floor_count.as_str()))
                .or_default() += 1;
        }

        let mut entries: Vec<_> = buckets
            .into_iter()
            .map(|((city, floors), count)| ((city.to_string(), floors.to_string()), count))
            .collect();

        entries.sort_unstable_by(|((city_a, floors_a), _), ((city_b, floors_b), _)| {
            city_a
                .cmp(city_b)
                .then_with(|| order.compare(floors_a, floors_b))
        });

        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, usize)> {
        self.entries
            .iter()
            .map(|((city, floors), count)| (city.as_str(), floors.as_str(), *count))
    }

    pub fn get(&self, city: &str, floor_count: &str) -> Option<usize> {
        self.iter()
            .find(|&(c, f, _)| c == city && f == floor_count)
            .map(|(_, _, count)| count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct cities in report order.
    pub fn cities(&self) -> Vec<&str> {
        let mut cities: Vec<&str> = Vec::new();
        for (city, _, _) in self.iter() {
            if cities.last() != Some(&city) {
                cities.push(city);
            }
        }
        cities
    }

    /// Sum of all buckets; equals the number of distinct records.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}
