use image::DynamicImage;
use serde::Deserialize;
use std::sync::Arc;

use super::endpoints::Endpoints;
use super::transport::{HttpResponse, Transport};
use crate::cache::{CacheEntry, CacheKey, ResponseCache};
use crate::error::FetchError;

/// Returned when the summary endpoint has no `extract` for a topic.
pub const NO_SUMMARY: &str = "No summary available.";

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    extract: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ImageQueryResponse {
    #[serde(default)]
    query: Option<QueryBody>,
}

#[derive(Debug, Default, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<PageEntry>,
}

#[derive(Debug, Deserialize)]
struct PageEntry {
    #[serde(default)]
    thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    source: String,
}

impl ImageQueryResponse {
    fn first_thumbnail(self) -> Option<String> {
        self.query?
            .pages
            .into_iter()
            .find_map(|page| page.thumbnail.map(|t| t.source))
    }
}

/// Fetches summaries and thumbnails, consulting the session cache first.
pub struct WikiClient<T> {
    transport: T,
    endpoints: Endpoints,
}

impl<T: Transport> WikiClient<T> {
    pub const fn new(transport: T, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Returns the summary text, or a displayable failure message.
    ///
    /// Only successful lookups are cached; a failure is retried next time.
    pub async fn fetch_summary(
        &self,
        cache: &mut ResponseCache,
        topic: &str,
        locale: &str,
    ) -> String {
        match self.try_fetch_summary(cache, topic, locale).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::debug!(error = %e, "summary lookup failed");
                format!("Failed to fetch summary: {e}")
            }
        }
    }

    pub async fn try_fetch_summary(
        &self,
        cache: &mut ResponseCache,
        topic: &str,
        locale: &str,
    ) -> Result<String, FetchError> {
        let key = CacheKey::summary(locale, topic);
        if let Some(summary) = cache.get(&key).and_then(CacheEntry::as_summary) {
            tracing::debug!(topic, locale, "summary cache hit");
            return Ok(summary.to_string());
        }

        let url = self.endpoints.summary_url(topic, locale);
        let response = self.get_ok(&url).await?;
        let decoded: SummaryResponse =
            serde_json::from_slice(&response.body).map_err(|source| FetchError::Decode {
                url: url.clone(),
                source,
            })?;

        let summary = decoded.extract.unwrap_or_else(|| NO_SUMMARY.to_string());
        cache.put(key, CacheEntry::Summary(summary.clone()));
        Ok(summary)
    }

    /// Returns the topic's thumbnail, or `None` if there is none or the
    /// lookup failed. Failures are reported as warnings.
    pub async fn fetch_image(
        &self,
        cache: &mut ResponseCache,
        topic: &str,
        locale: &str,
    ) -> Option<Arc<DynamicImage>> {
        match self.try_fetch_image(cache, topic, locale).await {
            Ok(image) => image,
            Err(e) => {
                crate::warn!(
                    "{} Failed to fetch image: {e}",
                    crate::ui::Style::warning("Warning:")
                );
                None
            }
        }
    }

    pub async fn try_fetch_image(
        &self,
        cache: &mut ResponseCache,
        topic: &str,
        locale: &str,
    ) -> Result<Option<Arc<DynamicImage>>, FetchError> {
        let key = CacheKey::image(locale, topic);
        if let Some(image) = cache.get(&key).and_then(CacheEntry::as_image) {
            tracing::debug!(topic, locale, "image cache hit");
            return Ok(Some(image));
        }

        let url = self.endpoints.image_query_url(topic, locale)?;
        let response = self.get_ok(&url).await?;
        let decoded: ImageQueryResponse =
            serde_json::from_slice(&response.body).map_err(|source| FetchError::Decode {
                url: url.clone(),
                source,
            })?;

        // Absent thumbnails are not cached; the next lookup asks again.
        let Some(image_url) = decoded.first_thumbnail() else {
            tracing::debug!(topic, locale, "no thumbnail");
            return Ok(None);
        };

        let response = self.get_ok(&image_url).await?;
        let image = image::load_from_memory(&response.body).map_err(|source| {
            FetchError::Image {
                url: image_url.clone(),
                source,
            }
        })?;

        let image = Arc::new(image);
        cache.put(key, CacheEntry::Image(Arc::clone(&image)));
        Ok(Some(image))
    }

    async fn get_ok(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let response = self.transport.get(url).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(FetchError::Status {
                url: url.to_string(),
                status: response.status,
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::wiki::transport::testing::MockTransport;
    use serde_json::json;
    use std::io::Cursor;

    fn client(transport: MockTransport) -> WikiClient<MockTransport> {
        WikiClient::new(transport, Endpoints::default())
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = DynamicImage::new_rgb8(width, height);
        let mut buffer = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buffer), image::ImageOutputFormat::Png)
            .unwrap();
        buffer
    }

    fn thumbnail_query(source: &str) -> serde_json::Value {
        json!({
            "batchcomplete": true,
            "query": {
                "pages": [
                    { "pageid": 1, "ns": 0, "title": "Redirect" },
                    {
                        "pageid": 22989,
                        "ns": 0,
                        "title": "Paris",
                        "thumbnail": { "source": source, "width": 500, "height": 375 }
                    }
                ]
            }
        })
    }

    #[tokio::test]
    async fn test_fetch_summary_returns_extract() {
        let client = client(MockTransport::new().json(
            "/page/summary/Paris",
            &json!({ "title": "Paris", "extract": "Paris is the capital of France." }),
        ));
        let mut cache = ResponseCache::new();

        let summary = client.fetch_summary(&mut cache, "Paris", "en").await;

        assert_eq!(summary, "Paris is the capital of France.");
    }

    #[tokio::test]
    async fn test_fetch_summary_without_extract_uses_placeholder() {
        let client = client(
            MockTransport::new().json("/page/summary/", &json!({ "title": "Nothing" })),
        );
        let mut cache = ResponseCache::new();

        let summary = client.fetch_summary(&mut cache, "Nothing", "en").await;

        assert_eq!(summary, "No summary available.");
    }

    #[tokio::test]
    async fn test_fetch_summary_is_cached() {
        let client = client(
            MockTransport::new().json("/page/summary/", &json!({ "extract": "Tokyo text" })),
        );
        let mut cache = ResponseCache::new();

        let first = client.fetch_summary(&mut cache, "Tokyo", "en").await;
        let second = client.fetch_summary(&mut cache, "Tokyo", "en").await;

        assert_eq!(first, second);
        assert_eq!(client.transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_summary_cache_is_per_locale() {
        let client = client(
            MockTransport::new().json("/page/summary/", &json!({ "extract": "text" })),
        );
        let mut cache = ResponseCache::new();

        client.fetch_summary(&mut cache, "Tokyo", "en").await;
        client.fetch_summary(&mut cache, "Tokyo", "ja").await;

        assert_eq!(client.transport.call_count(), 2);
        assert_eq!(client.transport.calls_matching("https://ja."), 1);
    }

    #[tokio::test]
    async fn test_clear_cache_triggers_one_new_request() {
        let client = client(
            MockTransport::new().json("/page/summary/", &json!({ "extract": "Cairo text" })),
        );
        let mut cache = ResponseCache::new();

        client.fetch_summary(&mut cache, "Cairo", "en").await;
        cache.clear();
        client.fetch_summary(&mut cache, "Cairo", "en").await;
        client.fetch_summary(&mut cache, "Cairo", "en").await;

        assert_eq!(client.transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_fetch_summary_normalizes_topic_in_url() {
        let client = client(
            MockTransport::new().json("/page/summary/", &json!({ "extract": "A city" })),
        );
        let mut cache = ResponseCache::new();

        client.fetch_summary(&mut cache, "New York City", "en").await;

        assert_eq!(
            client.transport.calls(),
            ["https://en.wikipedia.org/api/rest_v1/page/summary/New_York_City"]
        );
    }

    #[tokio::test]
    async fn test_fetch_summary_http_error_is_reported_and_not_cached() {
        let client = client(MockTransport::new().respond("/page/summary/", 503, "busy"));
        let mut cache = ResponseCache::new();

        let summary = client.fetch_summary(&mut cache, "Paris", "en").await;

        assert!(summary.starts_with("Failed to fetch summary:"));
        assert!(summary.contains("503"));
        assert!(cache.is_empty());

        client.fetch_summary(&mut cache, "Paris", "en").await;
        assert_eq!(client.transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_fetch_summary_transport_error_is_reported() {
        let client = client(MockTransport::new().fail("/page/summary/", "connection refused"));
        let mut cache = ResponseCache::new();

        let summary = client.fetch_summary(&mut cache, "Paris", "en").await;

        assert!(summary.contains("connection refused"));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_try_fetch_summary_rejects_malformed_body() {
        let client = client(MockTransport::new().respond("/page/summary/", 200, "<html>"));
        let mut cache = ResponseCache::new();

        let result = client.try_fetch_summary(&mut cache, "Paris", "en").await;

        assert!(matches!(result, Err(FetchError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_fetch_image_without_thumbnail_returns_none() {
        let client = client(MockTransport::new().json(
            "api.php",
            &json!({ "query": { "pages": [ { "pageid": 5, "title": "Abstract idea" } ] } }),
        ));
        let mut cache = ResponseCache::new();

        let image = client.fetch_image(&mut cache, "Abstract idea", "en").await;

        assert!(image.is_none());
        assert!(cache.is_empty());

        // Nothing was cached, so the metadata is queried again.
        client.fetch_image(&mut cache, "Abstract idea", "en").await;
        assert_eq!(client.transport.calls_matching("api.php"), 2);
    }

    #[tokio::test]
    async fn test_fetch_image_with_missing_query_returns_none() {
        let client = client(MockTransport::new().json("api.php", &json!({ "batchcomplete": true })));
        let mut cache = ResponseCache::new();

        assert!(client.fetch_image(&mut cache, "Nowhere", "en").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_image_downloads_first_thumbnail() {
        let client = client(
            MockTransport::new()
                .json("api.php", &thumbnail_query("https://upload.example/paris.png"))
                .respond("upload.example/paris.png", 200, png_bytes(8, 6)),
        );
        let mut cache = ResponseCache::new();

        let image = client.fetch_image(&mut cache, "Paris", "en").await.unwrap();

        assert_eq!((image.width(), image.height()), (8, 6));
        assert_eq!(client.transport.call_count(), 2);

        let again = client.fetch_image(&mut cache, "Paris", "en").await.unwrap();
        assert!(Arc::ptr_eq(&image, &again));
        assert_eq!(client.transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_fetch_image_download_failure_returns_none() {
        let client = client(
            MockTransport::new()
                .json("api.php", &thumbnail_query("https://upload.example/paris.png"))
                .fail("upload.example", "timed out"),
        );
        let mut cache = ResponseCache::new();

        assert!(client.fetch_image(&mut cache, "Paris", "en").await.is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_try_fetch_image_rejects_undecodable_bytes() {
        let client = client(
            MockTransport::new()
                .json("api.php", &thumbnail_query("https://upload.example/paris.png"))
                .respond("upload.example", 200, "not an image"),
        );
        let mut cache = ResponseCache::new();

        let result = client.try_fetch_image(&mut cache, "Paris", "en").await;

        assert!(matches!(result, Err(FetchError::Image { .. })));
    }
}
