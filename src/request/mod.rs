use ::reqwest::StatusCode;
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use std::time::Duration;

use crate::error::{Error, Result};

mod reqwest;
pub use self::reqwest::ReqwestApi;

#[cfg(test)]
mod dummy;
#[cfg(test)]
pub use self::dummy::DummyApi;

/// A subset of a Response, derived from [`reqwest::Response`].
#[derive(Debug)]
pub struct Response {
    pub url: String,
    pub status: StatusCode,
    pub body: String,
}

/// Generalized API endpoint.
///
/// This abstracts away from the real thing to allow for deterministic local
/// tests with a DummyApi.
#[async_trait]
pub trait Api: Send + Sync {
    /// Send a single get request to `url`.
    ///
    /// Transport failures are errors, an unsuccessful status is not.
    async fn get(&self, url: &str, timeout: Duration) -> Result<Response>;
}

/// Client for the upstream canteen service.
#[derive(Debug)]
pub struct ApiClient<A> {
    api: A,
    base_url: String,
    timeout: Duration,
}

impl<A: Api> ApiClient<A> {
    pub fn new<S: Into<String>>(api: A, base_url: S, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            api,
            base_url,
            timeout,
        }
    }

    /// Fetch `path` relative to the base url and parse the body as json.
    ///
    /// The json value is returned untouched, interpreting it is left to
    /// the caller.
    pub async fn fetch(&self, path: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        info!("Fetching {:?}", url);
        let resp = self.api.get(&url, self.timeout).await?;
        if !resp.status.is_success() {
            return Err(Error::NonSuccessStatusCode(resp.url, resp.status));
        }
        serde_json::from_str(&resp.body).map_err(|why| Error::Deserializing(why, "fetching json"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use std::sync::Mutex;

    use super::*;

    /// Answers every request with an empty list and remembers the timeouts.
    #[derive(Default)]
    struct RecordingApi {
        timeouts: Mutex<Vec<Duration>>,
    }

    #[async_trait]
    impl Api for RecordingApi {
        async fn get(&self, url: &str, timeout: Duration) -> Result<Response> {
            self.timeouts.lock().unwrap().push(timeout);
            Ok(Response {
                url: url.to_owned(),
                status: StatusCode::OK,
                body: String::from("[]"),
            })
        }
    }

    fn client(api: DummyApi) -> ApiClient<DummyApi> {
        ApiClient::new(api, "http://invalid.local/", Duration::from_secs(30))
    }

    #[tokio::test]
    async fn it_returns_the_body_as_is() {
        let api = DummyApi::new().with("http://invalid.local/canteens", r#"[{"id": 4}]"#);
        let value = client(api).fetch("/canteens").await.unwrap();
        assert_eq!(value, json!([{ "id": 4 }]));
    }

    #[tokio::test]
    async fn it_fails_on_error_status() {
        let api = DummyApi::new().with_status(
            "http://invalid.local/canteens",
            StatusCode::INTERNAL_SERVER_ERROR,
            "oops",
        );
        let err = client(api).fetch("/canteens").await.unwrap_err();
        assert!(err.is_http());
        assert_eq!(
            err.to_string(),
            r#"Url "http://invalid.local/canteens" returned status 500 Internal Server Error"#
        );
    }

    #[tokio::test]
    async fn it_rejects_non_json_bodies() {
        let api = DummyApi::new().with("http://invalid.local/canteens", "<html>");
        let err = client(api).fetch("/canteens").await.unwrap_err();
        assert!(matches!(err, Error::Deserializing(..)));
        assert!(!err.is_http());
    }

    #[tokio::test]
    async fn unknown_urls_are_not_found() {
        let err = client(DummyApi::new()).fetch("/nope").await.unwrap_err();
        assert!(matches!(
            err,
            Error::NonSuccessStatusCode(_, StatusCode::NOT_FOUND)
        ));
    }

    #[tokio::test]
    async fn it_passes_the_timeout_on() {
        let client = ApiClient::new(
            RecordingApi::default(),
            "http://invalid.local",
            Duration::from_secs(7),
        );
        client.fetch("/canteens").await.unwrap();
        client.fetch("/canteens/4/days").await.unwrap();
        assert_eq!(
            *client.api.timeouts.lock().unwrap(),
            vec![Duration::from_secs(7); 2]
        );
    }
}
