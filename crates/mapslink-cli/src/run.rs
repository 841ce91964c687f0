use std::path::{Path, PathBuf};

use anyhow::Context;
use mapslink_core::AppConfig;
use mapslink_resolver::{run_batch, LinkProcessor, Pacing};

use crate::{input, output};

/// Where a finished run left its files.
#[derive(Debug)]
pub(crate) struct RunSummary {
    pub csv_path: PathBuf,
    pub failures_path: PathBuf,
    pub processed: usize,
    pub failed: usize,
}

/// Loads the input list, resolves every link and writes both output files.
///
/// # Errors
///
/// Returns an error if the input file is missing, an HTTP client cannot be
/// built, or an output file cannot be written. Per-link failures are not
/// errors; they end up in the failure log.
pub(crate) async fn run(config: &AppConfig) -> anyhow::Result<RunSummary> {
    ensure_parent_dir(&config.input_path)?;
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let links = input::load_links(&config.input_path)?;
    tracing::info!(
        count = links.len(),
        input = %config.input_path.display(),
        "loaded links"
    );

    let processor = LinkProcessor::from_config(&config.resolver)
        .context("failed to build the link processor")?;
    let pacing = Pacing::from_config(&config.resolver);

    let report = run_batch(&processor, &links, pacing, |position, result| {
        println!("{}", output::status_line(position, result));
    })
    .await;

    let csv_path = config.csv_path();
    let failures_path = config.failures_path();
    output::write_csv_file(&csv_path, &report.results)?;
    output::write_failures_file(&failures_path, &report.failed_links)?;

    Ok(RunSummary {
        csv_path,
        failures_path,
        processed: report.results.len(),
        failed: report.failed_links.len(),
    })
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create input directory {}", parent.display())),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use mapslink_core::ResolverConfig;
    use serde_json::json;
    use wiremock::matchers::{path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn config_for(server: &MockServer, dir: &Path) -> AppConfig {
        AppConfig {
            input_path: dir.join("input").join("links.txt"),
            output_dir: dir.join("out"),
            log_level: "info".to_owned(),
            resolver: ResolverConfig {
                allowed_hosts: vec!["127.0.0.1".to_owned()],
                nominatim_url: format!("{}/reverse", server.uri()),
                overpass_url: format!("{}/api/interpreter", server.uri()),
                redirect_timeout_secs: 5,
                geocode_timeout_secs: 5,
                poi_timeout_secs: 5,
                lookup_delay_ms: 0,
                link_delay_ms: 0,
                ..ResolverConfig::default()
            },
        }
    }

    #[tokio::test]
    async fn missing_input_file_is_fatal_but_creates_directories() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&server, dir.path());

        let err = run(&config).await.unwrap_err();

        assert!(format!("{err:#}").contains("links.txt"));
        assert!(dir.path().join("input").is_dir());
        assert!(dir.path().join("out").is_dir());
    }

    #[tokio::test]
    async fn writes_csv_and_failure_log() {
        let server = MockServer::start().await;
        Mock::given(path("/estadio"))
            .respond_with(ResponseTemplate::new(302).insert_header(
                "Location",
                format!(
                    "{}/maps/place/Estadio%20Legal/@-23.5505,-46.6333,15z",
                    server.uri()
                )
                .as_str(),
            ))
            .mount(&server)
            .await;
        Mock::given(path_regex(r"^/maps/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(path("/reverse"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&server, dir.path());
        let good = format!("{}/estadio", server.uri());
        let bad = format!("{}/gone", server.uri());
        std::fs::create_dir_all(dir.path().join("input")).unwrap();
        std::fs::write(&config.input_path, format!("{good}\n\n{good}\n{bad}\n")).unwrap();

        let summary = run(&config).await.unwrap();

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.failed, 1);

        let csv = std::fs::read_to_string(&summary.csv_path).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "\u{FEFF}lugar;latitude;longitude;link");
        assert_eq!(lines[1], format!("Estadio Legal;-23.55;-46.63;{good}"));
        assert_eq!(lines[2], format!("(unavailable);;;{bad}"));
        assert_eq!(lines.len(), 3);

        let failures = std::fs::read_to_string(&summary.failures_path).unwrap();
        assert_eq!(failures, format!("{bad}\n"));
    }
}
