//! Cloudflare HTTP 请求方法

use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::http_client::HttpUtils;
use crate::traits::TransportResult;

use super::CloudflareApi;

impl CloudflareApi {
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    /// Authorize, send (retrying when `max_retries > 0`) and parse the envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        method: &str,
        url: &str,
        max_retries: u32,
    ) -> TransportResult<T> {
        let request = request.bearer_auth(&self.api_token);
        let (status, body) =
            HttpUtils::execute_request_with_retry(request, method, url, max_retries).await?;
        HttpUtils::parse_envelope(status, &body)
    }

    /// 执行 GET 请求
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> TransportResult<T> {
        let url = self.url(path);
        let request = self.client.get(&url).query(query);
        self.send(request, "GET", &url, self.max_retries).await
    }

    /// 执行 POST 请求
    ///
    /// Sent exactly once, regardless of `max_retries`.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> TransportResult<T> {
        let url = self.url(path);
        if log::log_enabled!(log::Level::Debug) {
            let body_json = serde_json::to_string(body)
                .unwrap_or_else(|_| "<unserializable body>".to_string());
            log::debug!("[cloudflare] Request Body: {body_json}");
        }
        let request = self.client.post(&url).json(body);
        self.send(request, "POST", &url, 0).await
    }

    /// 执行 DELETE 请求
    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> TransportResult<T> {
        let url = self.url(path);
        let request = self.client.delete(&url);
        self.send(request, "DELETE", &url, self.max_retries).await
    }
}
