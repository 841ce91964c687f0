//! Shortlink redirect following, constrained to a host whitelist.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode, Url};

use mapslink_core::ResolverConfig;

use crate::error::LookupError;
use crate::http::base_builder;

const MAX_REDIRECTS: usize = 10;

/// Follows a shortlink to its final destination.
///
/// Tries a `HEAD` first and falls back to `GET` when the `HEAD` fails or the
/// server rejects the method. The final URL is only trusted when its host is
/// whitelisted; otherwise, and on any network failure, the input URL is
/// returned unchanged.
pub struct RedirectResolver {
    client: Client,
    allowed_hosts: Vec<String>,
}

impl RedirectResolver {
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &ResolverConfig) -> Result<Self, LookupError> {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&config.browser_accept_language) {
            headers.insert(ACCEPT_LANGUAGE, value);
        }

        let client = base_builder(config.redirect_timeout_secs, &config.browser_user_agent)
            .default_headers(headers)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self {
            client,
            allowed_hosts: config
                .allowed_hosts
                .iter()
                .map(|h| h.to_ascii_lowercase())
                .collect(),
        })
    }

    /// Returns the trusted final URL for `url`, or `url` itself.
    ///
    /// Never fails: absence of progress is the only failure signal.
    pub async fn resolve(&self, url: &str) -> String {
        let Some(final_url) = self.follow(url).await else {
            return url.to_owned();
        };

        if is_host_allowed(&final_url, &self.allowed_hosts) {
            final_url
        } else {
            tracing::warn!(
                link = url,
                final_url = %final_url,
                "redirect ended on a host outside the whitelist; ignoring it"
            );
            url.to_owned()
        }
    }

    async fn follow(&self, url: &str) -> Option<String> {
        match self.client.head(url).send().await {
            Ok(response) if !method_rejected(response.status()) => {
                return Some(response.url().to_string());
            }
            Ok(response) => {
                tracing::debug!(
                    url,
                    status = response.status().as_u16(),
                    "HEAD not supported; retrying redirect with GET"
                );
            }
            Err(e) => {
                tracing::debug!(url, error = %e, "HEAD redirect failed; retrying with GET");
            }
        }

        match self.client.get(url).send().await {
            Ok(response) => Some(response.url().to_string()),
            Err(e) => {
                tracing::warn!(url, error = %e, "could not follow redirect");
                None
            }
        }
    }
}

fn method_rejected(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED
    )
}

/// Returns `true` when the host of `url` equals an allowed host or is a
/// subdomain of one. Unparseable URLs and host-less URLs are never allowed.
#[must_use]
pub fn is_host_allowed<S: AsRef<str>>(url: &str, allowed_hosts: &[S]) -> bool {
    let Some(host) = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
    else {
        return false;
    };

    allowed_hosts.iter().any(|allowed| {
        let allowed = allowed.as_ref();
        host == allowed
            || host
                .strip_suffix(allowed)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOSTS: &[&str] = &["maps.app.goo.gl", "google.com", "maps.google.com"];

    #[test]
    fn exact_host_is_allowed() {
        assert!(is_host_allowed("https://maps.app.goo.gl/abc123", HOSTS));
        assert!(is_host_allowed("https://google.com/maps", HOSTS));
    }

    #[test]
    fn subdomain_is_allowed() {
        assert!(is_host_allowed(
            "https://www.google.com/maps/@1,2,3z",
            HOSTS
        ));
    }

    #[test]
    fn host_comparison_is_case_insensitive() {
        assert!(is_host_allowed("https://WWW.Google.COM/maps", HOSTS));
    }

    #[test]
    fn lookalike_suffix_is_rejected() {
        assert!(!is_host_allowed("https://evilgoogle.com/maps", HOSTS));
        assert!(!is_host_allowed("https://google.com.evil.net/maps", HOSTS));
    }

    #[test]
    fn unknown_host_is_rejected() {
        assert!(!is_host_allowed("https://example.org/@1,2", HOSTS));
    }

    #[test]
    fn unparseable_url_is_rejected() {
        assert!(!is_host_allowed("not a url", HOSTS));
        assert!(!is_host_allowed("", HOSTS));
    }

    #[test]
    fn method_rejection_statuses() {
        assert!(method_rejected(StatusCode::METHOD_NOT_ALLOWED));
        assert!(method_rejected(StatusCode::NOT_IMPLEMENTED));
        assert!(!method_rejected(StatusCode::OK));
        assert!(!method_rejected(StatusCode::NOT_FOUND));
    }
}
