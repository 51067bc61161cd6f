use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use std::sync::Arc;
use std::time::Duration;
use synthview_core::{NodeRecord, PathId, ProcessTimelines};

use crate::net::protocol::{FetchKind, FetchRequest, Incoming};

/// Read-only client for the synthesis service.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base: String,
}

impl HttpBackend {
    pub fn new(base: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build http client")?;
        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    pub fn synthesis_url(&self) -> String {
        format!("{}/synthesis", self.base)
    }

    pub fn timelines_url(&self, node: &PathId) -> String {
        format!("{}/synthesis/{}/timelines", self.base, node)
    }

    pub async fn fetch_synthesis_tree(&self) -> Result<NodeRecord> {
        self.get_json(&self.synthesis_url()).await
    }

    pub async fn fetch_timelines(&self, node: &PathId) -> Result<ProcessTimelines<u64>> {
        self.get_json(&self.timelines_url(node)).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?
            .error_for_status()
            .with_context(|| format!("GET {url}"))?;
        resp.json::<T>()
            .await
            .with_context(|| format!("decode response of {url}"))
    }
}

/// Runs requests on a background runtime and reports each result on `tx`.
pub struct Fetcher {
    rt: tokio::runtime::Runtime,
    backend: Arc<HttpBackend>,
    tx: Sender<Incoming>,
}

impl Fetcher {
    pub fn new(backend: HttpBackend, tx: Sender<Incoming>) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .context("tokio runtime")?;
        Ok(Self {
            rt,
            backend: Arc::new(backend),
            tx,
        })
    }

    pub fn submit(&self, req: FetchRequest) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            tracing::debug!(seq = req.token.seq, kind = ?req.kind, "fetch started");
            let token = req.token;
            let inc = match req.kind {
                FetchKind::SynthesisTree => match backend.fetch_synthesis_tree().await {
                    Ok(root) => Incoming::tree(token, root),
                    Err(e) => Incoming::error(token, format!("{e:#}")),
                },
                FetchKind::Timelines(node) => match backend.fetch_timelines(&node).await {
                    Ok(data) => Incoming::timelines(token, data),
                    Err(e) => Incoming::error(token, format!("{e:#}")),
                },
            };
            // receiver gone means the viewer is shutting down
            let _ = tx.send(inc);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_built_from_base() {
        let backend = HttpBackend::new("http://localhost:8080/", Duration::from_secs(1)).unwrap();
        assert_eq!(backend.synthesis_url(), "http://localhost:8080/synthesis");
        assert_eq!(
            backend.timelines_url(&PathId::from("-:2:1")),
            "http://localhost:8080/synthesis/-:2:1/timelines"
        );
    }
}
