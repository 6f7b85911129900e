//! HTTP implementation of the page transport
//!
//! Wire protocol:
//! - `GET {base}/total_pages` answers with a plain-text integer
//! - `GET {base}?page={cursor}` answers with `{"nextPage": ..., "html": ...}`

use super::types::{PageResponse, PageTransport};
use crate::config::HttpConfig;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::types::Cursor;
use async_trait::async_trait;
use tracing::debug;
use url::Url;

/// Query parameter carrying the cursor
const PAGE_PARAM: &str = "page";

/// Path segment for the total page count
const TOTAL_PAGES_SEGMENT: &str = "total_pages";

/// Page transport over HTTP
#[derive(Debug)]
pub struct HttpTransport {
    client: HttpClient,
}

impl HttpTransport {
    /// Create a transport around an existing client
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Create a transport from HTTP settings
    pub fn from_config(config: HttpConfig) -> Result<Self> {
        Ok(Self::new(HttpClient::new(config)?))
    }
}

#[async_trait]
impl PageTransport for HttpTransport {
    async fn total_pages(&self, base_uri: &str) -> Result<usize> {
        let url = total_pages_url(base_uri)?;
        let body = self.client.get_text(url.as_str(), &[]).await?;

        body.trim().parse::<usize>().map_err(|e| {
            Error::malformed(format!("total page count '{}' is not a number: {e}", body.trim()))
        })
    }

    async fn fetch_page(&self, base_uri: &str, cursor: &Cursor) -> Result<PageResponse> {
        debug!("Fetching page with cursor {}", cursor);
        let body = self
            .client
            .get_text(base_uri, &[(PAGE_PARAM, cursor.as_param())])
            .await?;

        serde_json::from_str(&body)
            .map_err(|e| Error::malformed(format!("page body is not valid JSON: {e}")))
    }
}

/// `{base}/total_pages`, keeping any existing path
fn total_pages_url(base_uri: &str) -> Result<Url> {
    let mut url = Url::parse(base_uri)?;
    url.path_segments_mut()
        .map_err(|()| Error::invalid_value("base_uri", "must be a hierarchical URL"))?
        .pop_if_empty()
        .push(TOTAL_PAGES_SEGMENT);
    Ok(url)
}

#[cfg(test)]
mod url_tests {
    use super::*;

    #[test]
    fn test_total_pages_url() {
        let url = total_pages_url("https://example.com/memberlist").unwrap();
        assert_eq!(url.as_str(), "https://example.com/memberlist/total_pages");

        let url = total_pages_url("https://example.com/memberlist/").unwrap();
        assert_eq!(url.as_str(), "https://example.com/memberlist/total_pages");

        assert!(total_pages_url("mailto:someone@example.com").is_err());
    }
}
