use std::time::Duration;

use bytes::Bytes;
use reqwest::Proxy;

use super::types::{
    Method, Payload, RequestConfig, RequestDescriptor, ResponseEnvelope, ResponseType,
};
use crate::config::HttpConfig;
use crate::interceptors::{Interceptor, InterceptorPipeline};
use crate::{Error, Result};

/// Thin wrapper over `reqwest` with a fixed timeout and interceptor hooks.
///
/// Every verb method goes through [`HttpClient::execute`] and returns only the
/// decoded payload; the status and headers stay inside the envelope seen by
/// the response interceptors.
pub struct HttpClient {
    client: reqwest::Client,
    timeout: Duration,
    interceptors: InterceptorPipeline,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str());

        if let Some(proxy_url) = &config.proxy_url {
            match Proxy::all(proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => tracing::warn!(error = %e, "ignoring invalid proxy url"),
            }
        }

        let client = builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            timeout: config.timeout,
            interceptors: InterceptorPipeline::new(),
        })
    }

    pub fn with_interceptor<I: Interceptor + 'static>(mut self, interceptor: I) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<Payload> {
        let req = RequestDescriptor::new(Method::Get, url).with_params(params);
        Ok(self.execute(req).await?.payload)
    }

    pub async fn post(
        &self,
        url: &str,
        body: serde_json::Value,
        config: RequestConfig,
    ) -> Result<Payload> {
        let req = RequestDescriptor::new(Method::Post, url)
            .with_body(body)
            .with_config(config);
        Ok(self.execute(req).await?.payload)
    }

    pub async fn put(
        &self,
        url: &str,
        body: serde_json::Value,
        config: RequestConfig,
    ) -> Result<Payload> {
        let req = RequestDescriptor::new(Method::Put, url)
            .with_body(body)
            .with_config(config);
        Ok(self.execute(req).await?.payload)
    }

    pub async fn del(&self, url: &str, params: &[(&str, &str)]) -> Result<Payload> {
        let req = RequestDescriptor::new(Method::Delete, url).with_params(params);
        Ok(self.execute(req).await?.payload)
    }

    /// Runs a descriptor through the interceptors and the network.
    pub async fn execute(&self, req: RequestDescriptor) -> Result<ResponseEnvelope> {
        self.interceptors.execute(req, |req| self.send(req)).await
    }

    async fn send(&self, req: RequestDescriptor) -> Result<ResponseEnvelope> {
        let mut request = match req.method {
            Method::Get => self.client.get(&req.url),
            Method::Post => self.client.post(&req.url),
            Method::Put => self.client.put(&req.url),
            Method::Delete => self.client.delete(&req.url),
        };

        if !req.params.is_empty() {
            request = request.query(&req.params);
        }

        for (k, v) in &req.headers {
            request = request.header(k.as_str(), v.as_str());
        }

        if let Some(body) = &req.body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::classify(e, self.timeout))?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::classify(e, self.timeout))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            }
            .into());
        }

        let payload = decode(bytes, req.response_type)?;
        Ok(ResponseEnvelope {
            status: status.as_u16(),
            headers,
            payload,
        })
    }
}

fn decode(bytes: Bytes, response_type: ResponseType) -> Result<Payload> {
    Ok(match response_type {
        ResponseType::Json if bytes.is_empty() => Payload::Json(serde_json::Value::Null),
        ResponseType::Json => Payload::Json(serde_json::from_slice(&bytes)?),
        ResponseType::Text => Payload::Text(String::from_utf8_lossy(&bytes).into_owned()),
        ResponseType::Bytes => Payload::Bytes(bytes),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    fn classify(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Http(err)
        }
    }
}
