use async_trait::async_trait;
use reqwest::Client;

use std::time::Duration;

use crate::error::{Error, Result};

use super::{Api, Response};

/// Real api accessing the inter-webs.
///
/// Every request gets its own [`Client`], connections are never shared
/// between calls and are released once the request future is dropped.
#[derive(Debug, Default)]
pub struct ReqwestApi;

#[async_trait]
impl Api for ReqwestApi {
    async fn get(&self, url: &str, timeout: Duration) -> Result<Response> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Reqwest)?;
        let resp = client.get(url).send().await.map_err(Error::Reqwest)?;
        Ok(Response {
            url: resp.url().to_string(),
            status: resp.status(),
            body: resp.text().await.map_err(Error::Reqwest)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{
        net::TcpListener,
        time::{Duration, Instant},
    };

    use super::*;

    #[tokio::test]
    async fn it_gives_up_after_the_timeout() {
        // Accepts connections into the backlog but never answers
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/canteens", listener.local_addr().unwrap());
        let started = Instant::now();
        let err = ReqwestApi
            .get(&url, Duration::from_millis(200))
            .await
            .unwrap_err();
        assert!(err.is_http());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn connection_failures_are_http_errors() {
        let err = ReqwestApi
            .get("http://127.0.0.1:1/canteens", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Reqwest(_)));
        assert!(err.is_http());
    }
}
