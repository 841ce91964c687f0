//! Input link list loading.

use std::path::Path;

use anyhow::Context;

/// Reads one link per line, trimming whitespace and skipping blank lines.
///
/// # Errors
///
/// Returns an error naming the path if the file is missing or unreadable.
pub(crate) fn load_links(path: &Path) -> anyhow::Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("input file not found or unreadable: {}", path.display()))?;
    Ok(parse_links(&raw))
}

fn parse_links(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blank_lines_and_trims() {
        let raw = "https://maps.app.goo.gl/a\n\n   \n  https://maps.app.goo.gl/b  \r\n";
        assert_eq!(
            parse_links(raw),
            vec!["https://maps.app.goo.gl/a", "https://maps.app.goo.gl/b"]
        );
    }

    #[test]
    fn keeps_duplicates_for_the_batch_runner() {
        let raw = "x\nx\n";
        assert_eq!(parse_links(raw), vec!["x", "x"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("links.txt");
        let err = load_links(&missing).unwrap_err();
        assert!(
            format!("{err:#}").contains("links.txt"),
            "error should name the path, got: {err:#}"
        );
    }

    #[test]
    fn reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("links.txt");
        std::fs::write(&file, "a\nb\n").unwrap();
        assert_eq!(load_links(&file).unwrap(), vec!["a", "b"]);
    }
}
