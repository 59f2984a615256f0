//! URL construction for the encyclopedia's REST and action APIs.

use reqwest::Url;

use crate::error::FetchError;

/// Default host suffix; the locale is prepended as a subdomain.
pub const DEFAULT_DOMAIN: &str = "wikipedia.org";

/// Maximum thumbnail edge length requested from the page-image API.
pub const THUMBNAIL_SIZE: u32 = 500;

/// Replaces spaces with the underscore connector used in article paths.
pub fn normalize_topic(topic: &str) -> String {
    topic.replace(' ', "_")
}

/// Builds request and article URLs for a given locale and topic.
#[derive(Debug, Clone)]
pub struct Endpoints {
    domain: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_DOMAIN)
    }
}

impl Endpoints {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    fn host(&self, locale: &str) -> String {
        format!("https://{locale}.{}", self.domain)
    }

    pub fn summary_url(&self, topic: &str, locale: &str) -> String {
        format!(
            "{}/api/rest_v1/page/summary/{}",
            self.host(locale),
            normalize_topic(topic)
        )
    }

    pub fn page_url(&self, topic: &str, locale: &str) -> String {
        format!("{}/wiki/{}", self.host(locale), normalize_topic(topic))
    }

    /// Page-image metadata query. Uses `formatversion=2` so pages come back
    /// as an ordered array.
    pub fn image_query_url(&self, topic: &str, locale: &str) -> Result<String, FetchError> {
        let base = format!("{}/w/api.php", self.host(locale));
        let thumb_size = THUMBNAIL_SIZE.to_string();
        let url = Url::parse_with_params(
            &base,
            &[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("prop", "pageimages"),
                ("piprop", "thumbnail"),
                ("pithumbsize", thumb_size.as_str()),
                ("redirects", "1"),
                ("titles", topic),
            ],
        )
        .map_err(|e| FetchError::Url {
            url: base.clone(),
            message: e.to_string(),
        })?;
        Ok(url.into())
    }
}
