//! Article Search API client.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::config::Config;
use crate::error::{FetchError, Result};
use crate::model::{decode_docs, Article};

/// Source of articles for the search controller.
///
/// One call issues exactly one request. No retries happen here; callers
/// decide what to do with a failure.
pub trait ArticleSearch: Send + Sync {
    /// Search by free text. Results keep the service's ordering.
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<Article>>> + Send;

    /// Fetch a single article by its id, if the service still has it.
    fn lookup(&self, id: &str) -> impl Future<Output = Result<Option<Article>>> + Send;
}

#[derive(Clone)]
pub struct NytClient {
    http: Client,
    base_url: Arc<str>,
    api_key: Arc<str>,
}

impl NytClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self::with_client(http, config))
    }

    pub fn with_client(http: Client, config: &Config) -> Self {
        Self {
            http,
            base_url: Arc::from(config.base_url.as_str()),
            api_key: Arc::from(config.api_key.as_str()),
        }
    }

    async fn fetch(&self, params: &[(&str, &str)]) -> Result<Vec<Article>> {
        let res = self
            .http
            .get(&*self.base_url)
            .query(params)
            .query(&[("api-key", &*self.api_key)])
            .send()
            .await
            .map_err(transport)?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let bytes = res.bytes().await.map_err(transport)?;
        decode_docs(&bytes).map_err(FetchError::Decode)
    }
}

impl ArticleSearch for NytClient {
    async fn search(&self, query: &str) -> Result<Vec<Article>> {
        tracing::debug!(query, "searching articles");
        let out = self.fetch(&[("q", query)]).await;
        match &out {
            Ok(docs) => tracing::info!(count = docs.len(), "search returned"),
            Err(e) => tracing::warn!(detail = %e.detail(), "search failed"),
        }
        out
    }

    async fn lookup(&self, id: &str) -> Result<Option<Article>> {
        tracing::debug!(id, "looking up article");
        let fq = id_filter(id);
        let out = self.fetch(&[("fq", fq.as_str())]).await;
        if let Err(e) = &out {
            tracing::warn!(id, detail = %e.detail(), "lookup failed");
        }
        Ok(out?.into_iter().next())
    }
}

// reqwest errors carry the request URL, which includes the api key.
fn transport(e: reqwest::Error) -> FetchError {
    FetchError::Transport(e.without_url())
}

/// Filter-query expression matching a single document id.
pub fn id_filter(id: &str) -> String {
    let escaped = id.replace('\\', "\\\\").replace('"', "\\\"");
    format!("_id:(\"{escaped}\")")
}
