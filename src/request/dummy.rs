//! This contains the [`DummyApi`] used for testing purposes.
use async_trait::async_trait;
use reqwest::StatusCode;

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use crate::error::Result;

use super::{Api, Response};

/// A dummy API, serving local, deterministic Responses.
///
/// Urls without a registered response are answered with `404 Not Found`.
#[derive(Debug, Default, Clone)]
pub struct DummyApi {
    pages: HashMap<String, (StatusCode, String)>,
    hits: Arc<AtomicUsize>,
}

impl DummyApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with status `200 OK` for `url`.
    pub fn with(self, url: &str, body: &str) -> Self {
        self.with_status(url, StatusCode::OK, body)
    }

    pub fn with_status(mut self, url: &str, status: StatusCode, body: &str) -> Self {
        self.pages
            .insert(url.to_owned(), (status, body.to_owned()));
        self
    }

    /// Number of requests served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Api for DummyApi {
    async fn get(&self, url: &str, _timeout: Duration) -> Result<Response> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        let (status, body) = self
            .pages
            .get(url)
            .cloned()
            .unwrap_or((StatusCode::NOT_FOUND, String::from("Not Found")));
        Ok(Response {
            url: url.to_owned(),
            status,
            body,
        })
    }
}
