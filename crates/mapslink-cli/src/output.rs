//! CSV, failure-log and console status output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use mapslink_core::{format_coordinate, PlaceResult};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const CSV_HEADER: [&str; 4] = ["lugar", "latitude", "longitude", "link"];

/// Writes results as `;`-separated CSV with a UTF-8 BOM for spreadsheets.
pub(crate) fn write_csv<W: Write>(mut writer: W, results: &[PlaceResult]) -> anyhow::Result<()> {
    writer.write_all(UTF8_BOM)?;

    let mut csv = csv::WriterBuilder::new()
        .delimiter(b';')
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(CSV_HEADER)?;
    for result in results {
        csv.write_record([
            result.name.as_str(),
            &format_coordinate(result.latitude()),
            &format_coordinate(result.longitude()),
            result.link.as_str(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

pub(crate) fn write_csv_file(path: &Path, results: &[PlaceResult]) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create CSV file {}", path.display()))?;
    write_csv(BufWriter::new(file), results)
        .with_context(|| format!("failed to write CSV file {}", path.display()))
}

/// Writes one link per line. The file is created even when `links` is empty.
pub(crate) fn write_failures_file(path: &Path, links: &[String]) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create failure log {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for link in links {
        writeln!(writer, "{link}")?;
    }
    writer.flush()?;
    Ok(())
}

/// `[NN] OK | name | lat,lon | link`, or `FALHA` when coordinates are missing.
pub(crate) fn status_line(position: usize, result: &PlaceResult) -> String {
    let status = if result.is_located() { "OK" } else { "FALHA" };
    format!(
        "[{position:02}] {status} | {} | {},{} | {}",
        result.name,
        format_coordinate(result.latitude()),
        format_coordinate(result.longitude()),
        result.link
    )
}

#[cfg(test)]
mod tests {
    use mapslink_core::Coordinates;

    use super::*;

    fn csv_string(results: &[PlaceResult]) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, results).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn csv_starts_with_bom_and_header() {
        let out = csv_string(&[]);
        assert_eq!(out, "\u{FEFF}lugar;latitude;longitude;link\n");
    }

    #[test]
    fn csv_formats_coordinates_with_two_decimals() {
        let results = [PlaceResult::new(
            "Estadio Legal",
            Some(Coordinates::new(-23.5, -46.634_9)),
            "https://maps.app.goo.gl/x",
        )];
        let out = csv_string(&results);
        assert!(out.ends_with("Estadio Legal;-23.50;-46.63;https://maps.app.goo.gl/x\n"));
    }

    #[test]
    fn csv_leaves_absent_coordinates_empty() {
        let results = [PlaceResult::unavailable("https://maps.app.goo.gl/y")];
        let out = csv_string(&results);
        assert!(out.ends_with("(unavailable);;;https://maps.app.goo.gl/y\n"));
    }

    #[test]
    fn csv_quotes_fields_containing_the_delimiter() {
        let results = [PlaceResult::new("Bar; Grill", None, "l")];
        let out = csv_string(&results);
        assert!(out.ends_with("\"Bar; Grill\";;;l\n"), "got: {out}");
    }

    #[test]
    fn failure_log_is_created_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links_falhos.txt");
        write_failures_file(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn failure_log_lists_one_link_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links_falhos.txt");
        write_failures_file(&path, &["a".to_owned(), "b".to_owned()]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\nb\n");
    }

    #[test]
    fn status_line_for_located_result() {
        let result = PlaceResult::new("Padaria Central", Some(Coordinates::new(-23.55, -46.63)), "l");
        assert_eq!(
            status_line(3, &result),
            "[03] OK | Padaria Central | -23.55,-46.63 | l"
        );
    }

    #[test]
    fn status_line_for_failure() {
        let result = PlaceResult::unavailable("l");
        assert_eq!(status_line(12, &result), "[12] FALHA | (unavailable) | , | l");
    }
}
