use std::path::PathBuf;

/// Final redirect hosts trusted enough to extract data from. A host matches
/// when it equals an entry or is a subdomain of one.
pub const DEFAULT_ALLOWED_HOSTS: &[&str] = &[
    "maps.app.goo.gl",
    "www.google.com",
    "google.com",
    "www.google.com.br",
    "google.com.br",
    "maps.google.com",
];

pub const DEFAULT_BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118.0.0.0 Safari/537.36";
pub const DEFAULT_CONTACT_USER_AGENT: &str = "mapslink/0.1 (contact: set MAPSLINK_CONTACT_USER_AGENT)";
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/reverse";
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Immutable settings for every resolver component.
///
/// Built once at startup and passed by reference into each component
/// constructor; tests override endpoints and delays on a cloned default.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    pub allowed_hosts: Vec<String>,
    /// Sent when following shortlinks.
    pub browser_user_agent: String,
    /// `Accept-Language` sent when following shortlinks.
    pub browser_accept_language: String,
    /// Identifying client header required by the OSM usage policies.
    pub contact_user_agent: String,
    pub nominatim_url: String,
    pub overpass_url: String,
    /// Language requested for reverse-geocoded names.
    pub geocode_language: String,
    pub geocode_zoom: u8,
    pub redirect_timeout_secs: u64,
    pub geocode_timeout_secs: u64,
    pub poi_timeout_secs: u64,
    pub poi_radius_m: u32,
    /// Pause after every reverse-geocode or POI call attempt.
    pub lookup_delay_ms: u64,
    /// Pause after every processed link.
    pub link_delay_ms: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            allowed_hosts: DEFAULT_ALLOWED_HOSTS
                .iter()
                .map(|h| (*h).to_string())
                .collect(),
            browser_user_agent: DEFAULT_BROWSER_USER_AGENT.to_string(),
            browser_accept_language: "pt-BR,pt;q=0.9,en;q=0.8".to_string(),
            contact_user_agent: DEFAULT_CONTACT_USER_AGENT.to_string(),
            nominatim_url: DEFAULT_NOMINATIM_URL.to_string(),
            overpass_url: DEFAULT_OVERPASS_URL.to_string(),
            geocode_language: "pt-BR".to_string(),
            geocode_zoom: 18,
            redirect_timeout_secs: 12,
            geocode_timeout_secs: 20,
            poi_timeout_secs: 25,
            poi_radius_m: 120,
            lookup_delay_ms: 1000,
            link_delay_ms: 250,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub log_level: String,
    pub resolver: ResolverConfig,
}

impl AppConfig {
    #[must_use]
    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join("resultado_excel_ptbr.csv")
    }

    #[must_use]
    pub fn failures_path(&self) -> PathBuf {
        self.output_dir.join("links_falhos.txt")
    }
}
