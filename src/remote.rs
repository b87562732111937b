//! Blocking HTTP client for the benchmark API.

use anyhow::{Context, Result};

use crate::compare::ComparisonSource;
use crate::error::FetchError;
use crate::model::{ComparisonResult, FetchKey, RefCatalog};

mod http_client;

pub struct DashboardClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl DashboardClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("benchdash")
            .build()
            .context("build reqwest client")?;
        let mut base_url = base_url.trim().to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}vitess/refs`
    pub fn fetch_refs(&self) -> Result<RefCatalog, FetchError> {
        self.get_json(&self.url("vitess/refs"))
    }

    pub fn fetch_comparison(&self, key: &FetchKey) -> Result<ComparisonResult, FetchError> {
        self.get_json(&self.url(&key.endpoint()))
    }
}

impl ComparisonSource for DashboardClient {
    fn fetch_refs(&self) -> Result<RefCatalog, FetchError> {
        DashboardClient::fetch_refs(self)
    }

    fn fetch_comparison(&self, key: &FetchKey) -> Result<ComparisonResult, FetchError> {
        DashboardClient::fetch_comparison(self, key)
    }
}
