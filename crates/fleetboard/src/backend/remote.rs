//! Remote HTTP backend.
//!
//! Talks to an aircraft service exposing:
//!
//! - `GET /aircraft` returning a JSON array of records
//! - `PATCH /aircraft/{id}` with `{"status": ...}` returning the updated record

use reqwest::Url;
use serde::Serialize;
use tracing::debug;

use crate::aircraft::{AircraftId, AircraftRecord, AircraftStatus};
use crate::config::BackendKind;
use crate::error::{Error, Result};

use super::FleetBackend;

#[derive(Debug, Serialize)]
struct StatusPatch {
    status: AircraftStatus,
}

/// Fleet backend served by a remote aircraft API.
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    base_url: Url,
    client: reqwest::Client,
}

impl RemoteBackend {
    /// Create a backend for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a usable URL or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("fleetboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(base_url, client)
    }

    /// Create a backend using an existing client.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a usable URL.
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Result<Self> {
        let invalid = |reason: String| Error::ConfigValidation {
            message: format!("remote.base_url '{base_url}' {reason}"),
        };
        let parsed = Url::parse(base_url).map_err(|e| invalid(format!("is not a URL: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid("cannot hold a path".to_string()));
        }
        Ok(Self {
            base_url: parsed,
            client,
        })
    }

    /// The base URL with `segments` appended, each one percent-encoded.
    fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Only fails for cannot-be-a-base URLs, rejected in `with_client`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn collection_url(&self) -> Url {
        self.url_for(&["aircraft"])
    }

    fn record_url(&self, id: &AircraftId) -> Url {
        self.url_for(&["aircraft", &id.to_string()])
    }
}

fn check_status(
    method: &'static str,
    url: &Url,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::RemoteStatus {
            method,
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

#[async_trait::async_trait]
impl FleetBackend for RemoteBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Remote
    }

    async fn load(&self) -> Result<Vec<AircraftRecord>> {
        let url = self.collection_url();
        let response = self.client.get(url.clone()).send().await?;
        let fleet: Vec<AircraftRecord> = check_status("GET", &url, response)?.json().await?;
        debug!("Fetched {} aircraft from {}", fleet.len(), url);
        Ok(fleet)
    }

    async fn update_status(
        &self,
        id: &AircraftId,
        status: AircraftStatus,
    ) -> Result<AircraftRecord> {
        let url = self.record_url(id);
        let response = self
            .client
            .patch(url.clone())
            .json(&StatusPatch { status })
            .send()
            .await?;
        let record = check_status("PATCH", &url, response)?.json().await?;
        debug!("PATCH {} accepted", url);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_strip_trailing_slash() {
        let backend = RemoteBackend::new("http://localhost:3001/").unwrap();
        assert_eq!(
            backend.collection_url().as_str(),
            "http://localhost:3001/aircraft"
        );
        assert_eq!(
            backend.record_url(&AircraftId::Numeric(4)).as_str(),
            "http://localhost:3001/aircraft/4"
        );
        assert_eq!(
            backend.record_url(&AircraftId::from("x9")).as_str(),
            "http://localhost:3001/aircraft/x9"
        );
    }

    #[test]
    fn test_urls_keep_base_path() {
        let backend = RemoteBackend::new("http://fleet.example/api/v1/").unwrap();
        assert_eq!(
            backend.collection_url().as_str(),
            "http://fleet.example/api/v1/aircraft"
        );
    }

    #[test]
    fn test_record_url_encodes_reserved_characters() {
        let backend = RemoteBackend::new("http://localhost:3001").unwrap();
        let url = |id: &str| backend.record_url(&AircraftId::from(id)).to_string();

        assert_eq!(url("N1#a"), "http://localhost:3001/aircraft/N1%23a");
        assert_eq!(url("N1?a"), "http://localhost:3001/aircraft/N1%3Fa");
        assert_eq!(url("a/b"), "http://localhost:3001/aircraft/a%2Fb");
        assert_eq!(url("tn 1"), "http://localhost:3001/aircraft/tn%201");
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        let err = RemoteBackend::new("localhost:3001 fleet").unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));
        assert!(RemoteBackend::new("mailto:ops@fleet.example").is_err());
    }

    #[test]
    fn test_status_patch_body() {
        let body = serde_json::to_value(StatusPatch {
            status: AircraftStatus::Aog,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "status": "aog" }));
    }

    #[tokio::test]
    async fn test_load_unreachable_service() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let backend = RemoteBackend::new(&format!("http://127.0.0.1:{port}")).unwrap();
        let err = backend.load().await.unwrap_err();
        assert!(err.is_remote());
    }
}
