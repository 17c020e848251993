//! reqwest-backed build service client

use super::{
    BuildService, CardanoBuildRequest, CardanoBuildResponse, TronBuildEnvelope, TronBuildRequest,
};
use crate::config::BackendConfig;
use crate::error::{SwapError, SwapResult};
use crate::routes::Route;
use crate::wallet::TronTransaction;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// HTTP client for the remote build service
pub struct HttpBuildService {
    client: Client,
    base_url: String,
}

impl HttpBuildService {
    pub fn new(backend: &BackendConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: backend.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post<B: serde::Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
    ) -> SwapResult<reqwest::Response> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| SwapError::Build {
                detail: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SwapError::build_from_body(status.as_u16(), &body));
        }

        Ok(response)
    }
}

#[async_trait]
impl BuildService for HttpBuildService {
    async fn build_cardano(
        &self,
        route: Route,
        request: CardanoBuildRequest,
    ) -> SwapResult<CardanoBuildResponse> {
        let url = self.endpoint(route.endpoint());
        debug!(%url, route = route.name(), "requesting swap build");

        let response = self.post(&url, &request).await?;
        response
            .json::<CardanoBuildResponse>()
            .await
            .map_err(|e| SwapError::Build {
                detail: e.to_string(),
            })
    }

    async fn build_tron_transfer(&self, request: TronBuildRequest) -> SwapResult<TronTransaction> {
        let url = self.endpoint("swap-tron/build");
        debug!(%url, "requesting contract-call build");

        let response = self.post(&url, &request).await?;
        let envelope =
            response
                .json::<TronBuildEnvelope>()
                .await
                .map_err(|e| SwapError::Build {
                    detail: e.to_string(),
                })?;

        if !envelope.ok {
            return Err(SwapError::build_from_remote(envelope.error));
        }

        envelope.data.ok_or_else(|| SwapError::Build {
            detail: "build response carried no transaction".to_string(),
        })
    }
}
