use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::EntityType;
use crate::error::EtlError;

/// One page of a SWAPI listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub count: usize,
    pub next: Option<String>,
    #[serde(default)]
    pub results: Vec<Value>,
}

pub trait SwapiClient: Send + Sync {
    /// Every record of `entity`, across all pages. Fails when the number collected does
    /// not match the count the API advertises.
    fn fetch_all(&self, entity: EntityType) -> Result<Vec<Value>, EtlError>;
}

#[derive(Clone)]
pub struct SwapiHttpClient {
    client: Client,
    base_url: String,
}

impl SwapiHttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, EtlError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("swapi-etl/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| EtlError::SwapiHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|err| EtlError::SwapiHttp(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn resource_url(&self, entity: EntityType) -> String {
        format!("{}/{}/", self.base_url, entity.resource())
    }

    fn handle_status(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, EtlError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .unwrap_or_else(|_| "SWAPI request failed".to_string());
        Err(EtlError::SwapiStatus { status, message })
    }

    fn get_page(&self, entity: EntityType, url: &str) -> Result<Page, EtlError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| EtlError::SwapiHttp(err.to_string()))?;
        let response = Self::handle_status(response)?;
        response.json().map_err(|err| EtlError::SwapiDecode {
            resource: entity.resource().to_string(),
            message: err.to_string(),
        })
    }
}

impl SwapiClient for SwapiHttpClient {
    fn fetch_all(&self, entity: EntityType) -> Result<Vec<Value>, EtlError> {
        let first = self.get_page(entity, &self.resource_url(entity))?;
        let expected = first.count;
        let mut next = first.next;
        let mut results = first.results;

        while let Some(url) = next {
            debug!(resource = entity.resource(), %url, "fetching page");
            let page = self.get_page(entity, &url)?;
            results.extend(page.results);
            next = page.next;
        }

        check_count(entity, results.len(), expected)?;
        Ok(results)
    }
}

pub fn check_count(entity: EntityType, received: usize, expected: usize) -> Result<(), EtlError> {
    if received != expected {
        return Err(EtlError::CountMismatch {
            resource: entity.resource().to_string(),
            received,
            expected,
        });
    }
    Ok(())
}
