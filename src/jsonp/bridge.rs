//! JSONP bridge: correlates callback invocations with the calls that issued them.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tokio::sync::oneshot;

use super::payload::{build_script_url, next_callback_name, JsonpData};
use super::script::parse_invocation;
use crate::clock::epoch_millis;
use crate::config::JsonpConfig;
use crate::transport::{HttpClient, Method, RequestConfig, RequestDescriptor, ResponseType};
use crate::{Error, ErrorContext, Result};

/// Fetches the script a JSONP call points at.
#[async_trait]
pub trait ScriptLoader: Send + Sync {
    async fn load(&self, src: &str) -> Result<String>;
}

/// Loads scripts with a plain GET through the HTTP client wrapper.
pub struct HttpScriptLoader {
    client: Arc<HttpClient>,
}

impl HttpScriptLoader {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ScriptLoader for HttpScriptLoader {
    async fn load(&self, src: &str) -> Result<String> {
        let req = RequestDescriptor::new(Method::Get, src)
            .with_config(RequestConfig::new().response_type(ResponseType::Text));
        let resp = self.client.execute(req).await?;
        Ok(String::from_utf8_lossy(&resp.payload.into_bytes()).into_owned())
    }
}

/// A live call: its callback name and the script it injected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingScript {
    pub callback: String,
    pub src: String,
}

struct PendingEntry {
    src: String,
    resolver: oneshot::Sender<serde_json::Value>,
}

pub struct JsonpBridge {
    loader: Arc<dyn ScriptLoader>,
    config: JsonpConfig,
    pending: Mutex<HashMap<String, PendingEntry>>,
}

impl JsonpBridge {
    pub fn new(loader: Arc<dyn ScriptLoader>, config: JsonpConfig) -> Self {
        Self {
            loader,
            config,
            pending: Mutex::new(HashMap::new()),
        }
    }

    pub fn over_http(client: Arc<HttpClient>, config: JsonpConfig) -> Self {
        Self::new(Arc::new(HttpScriptLoader::new(client)), config)
    }

    pub fn config(&self) -> &JsonpConfig {
        &self.config
    }

    /// Issues a JSONP call and resolves with the value the callback receives.
    ///
    /// Fails with `InvalidArgument` before any I/O when `url` is blank, and
    /// with `NonDelivery` when the callback is not invoked within the
    /// configured timeout. The callback name and its script are released on
    /// every exit path, including when the returned future is dropped.
    pub async fn jsonp(&self, url: &str, data: Option<JsonpData>) -> Result<serde_json::Value> {
        if url.trim().is_empty() {
            return Err(Error::invalid_argument_with_context(
                "url is necessary",
                ErrorContext::new()
                    .with_field_path("url")
                    .with_source("jsonp"),
            ));
        }

        let callback = next_callback_name();
        let src = build_script_url(url, &callback, data.as_ref(), epoch_millis());
        let (tx, rx) = oneshot::channel();
        self.table().insert(
            callback.clone(),
            PendingEntry {
                src: src.clone(),
                resolver: tx,
            },
        );
        let _guard = PendingGuard {
            bridge: self,
            callback: &callback,
        };
        tracing::debug!(callback = %callback, "jsonp call started");

        let started = Instant::now();
        let call = async {
            let script = self.loader.load(&src).await?;
            self.run_script(&script);
            rx.await.map_err(|_| Error::NonDelivery {
                callback: callback.clone(),
                waited: started.elapsed(),
            })
        };

        match self.config.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(callback = %callback, "jsonp callback not invoked in time");
                    Err(Error::NonDelivery {
                        callback: callback.clone(),
                        waited: limit,
                    })
                }
            },
            None => call.await,
        }
    }

    /// Fires a callback by name, as the loaded script would.
    ///
    /// Resolves the matching call and releases its script and name together.
    /// Returns `false` when no live call uses `callback`.
    pub fn deliver(&self, callback: &str, value: serde_json::Value) -> bool {
        let entry = self.table().remove(callback);
        match entry {
            Some(entry) => {
                tracing::debug!(callback = %callback, src = %entry.src, "jsonp callback fired");
                // The caller may have gone away already; nothing to do then.
                let _ = entry.resolver.send(value);
                true
            }
            None => false,
        }
    }

    /// Live calls, ordered by callback name.
    pub fn pending(&self) -> Vec<PendingScript> {
        let mut scripts: Vec<_> = self
            .table()
            .iter()
            .map(|(name, entry)| PendingScript {
                callback: name.clone(),
                src: entry.src.clone(),
            })
            .collect();
        scripts.sort_by(|a, b| a.callback.cmp(&b.callback));
        scripts
    }

    fn run_script(&self, script: &str) {
        match parse_invocation(script) {
            Some(inv) => {
                if !self.deliver(&inv.callback, inv.payload) {
                    tracing::warn!(callback = %inv.callback, "script invoked an unknown callback");
                }
            }
            None => tracing::debug!("script did not invoke a callback"),
        }
    }

    fn table(&self) -> MutexGuard<'_, HashMap<String, PendingEntry>> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }
}

struct PendingGuard<'a> {
    bridge: &'a JsonpBridge,
    callback: &'a str,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.bridge.table().remove(self.callback);
    }
}
