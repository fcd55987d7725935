use std::fs;
use std::path::{Path, PathBuf};

use floortally::{Error, FloorOrder, Record, process_file};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn tally_of(path: &Path) -> Vec<(String, String, usize)> {
    process_file(path, FloorOrder::default())
        .unwrap()
        .tally
        .iter()
        .map(|(c, f, n)| (c.to_string(), f.to_string(), n))
        .collect()
}

#[test]
fn test_delimited_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "houses.csv",
        "city;street;house;floor\nMoscow;Lenina;5;3\nMoscow;Lenina;5;4\nMoscow;Lenina;5;3\n",
    );

    let report = process_file(&path, FloorOrder::default()).unwrap();
    let seen: Vec<_> = report.multiplicities.iter().collect();
    assert_eq!(
        seen,
        vec![
            (&Record::new("Moscow", "Lenina", "5", "3"), 2),
            (&Record::new("Moscow", "Lenina", "5", "4"), 1),
        ]
    );
    assert_eq!(
        tally_of(&path),
        vec![
            ("Moscow".to_string(), "3".to_string(), 1),
            ("Moscow".to_string(), "4".to_string(), 1),
        ]
    );
}

#[test]
fn test_markup_item_without_house_is_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "houses.xml",
        r#"<items>
  <item city="Kazan" street="Bauman" floor="2"/>
  <item city="Ufa" street="Mira" house="1" floor="2"/>
</items>"#,
    );

    let report = process_file(&path, FloorOrder::default()).unwrap();
    assert_eq!(report.multiplicities.total(), 1);
    assert_eq!(report.tally.get("Kazan", "2"), None);
    assert_eq!(report.tally.get("Ufa", "2"), Some(1));
}

#[test]
fn test_header_only_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "houses.csv", "city;street;house;floor\n");

    let report = process_file(&path, FloorOrder::default()).unwrap();
    assert!(report.multiplicities.is_empty());
    assert!(report.tally.is_empty());

    let mut out = Vec::new();
    report.render(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("No duplicate records found."));
    assert!(text.ends_with("City | Floors | Buildings\n"));
}

#[test]
fn test_tally_sorted_as_strings() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "houses.csv",
        "h\nMoscow;a;1;2\nKazan;a;1;10\nMoscow;a;2;10\nKazan;a;2;2\n",
    );

    let order: Vec<_> = tally_of(&path)
        .into_iter()
        .map(|(c, f, _)| format!("{c}/{f}"))
        .collect();
    assert_eq!(order, vec!["Kazan/10", "Kazan/2", "Moscow/10", "Moscow/2"]);
}

#[test]
fn test_numeric_floor_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "houses.csv", "h\nKazan;a;1;10\nKazan;a;2;2\n");

    let report = process_file(&path, FloorOrder::Numeric).unwrap();
    let floors: Vec<_> = report.tally.iter().map(|(_, f, _)| f.to_string()).collect();
    assert_eq!(floors, vec!["2", "10"]);
}

#[test]
fn test_same_file_twice_gives_same_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "houses.xml",
        r#"<items>
  <item city="Kazan" street="Bauman" house="1" floor="2"/>
  <item city="Kazan" street="Bauman" house="1" floor="2"/>
  <item city="Moscow" street="Arbat" house="3" floor="9"/>
</items>"#,
    );

    let first = process_file(&path, FloorOrder::default()).unwrap();
    let second = process_file(&path, FloorOrder::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_conservation_and_tally_correctness() {
    let dir = tempfile::tempdir().unwrap();
    let rows = [
        "Moscow;Lenina;5;3",
        "Moscow;Lenina;5;3",
        "Moscow;Arbat;1;3",
        "Kazan;Bauman;1;2",
        "Kazan;Bauman;1;2",
        "Kazan;Bauman;1;2",
        "Kazan;Kremlin;9;2",
        "Ufa;Mira;;",
    ];
    let path = write(&dir, "houses.csv", &format!("h\n{}\n", rows.join("\n")));

    let report = process_file(&path, FloorOrder::default()).unwrap();
    let m = &report.multiplicities;

    assert_eq!(m.total(), rows.len() as u64);

    let surplus: u64 = m.duplicates().map(|(_, n)| n - 1).sum();
    assert_eq!(surplus, m.total() - m.len() as u64);

    for (city, floors, count) in report.tally.iter() {
        let distinct = m
            .iter()
            .filter(|(r, _)| r.city == city && r.floor_count == floors)
            .count();
        assert_eq!(count, distinct);
    }

    let keys: Vec<_> = report.tally.iter().map(|(c, f, _)| (c, f)).collect();
    assert!(keys.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_malformed_markup_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "houses.xml", "<items><item city=\"a\"></items>");

    assert!(matches!(
        process_file(&path, FloorOrder::default()),
        Err(Error::Xml { .. })
    ));
}

#[test]
fn test_unsupported_or_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let json = write(&dir, "houses.json", "{}");

    assert!(matches!(
        process_file(&json, FloorOrder::default()),
        Err(Error::UnsupportedFormat(_))
    ));
    assert!(matches!(
        process_file(&dir.path().join("gone.csv"), FloorOrder::default()),
        Err(Error::Io(_))
    ));
}
