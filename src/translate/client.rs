use std::sync::Arc;

use super::sign::SignedQuery;
use crate::clock::{Clock, SystemClock};
use crate::jsonp::JsonpBridge;
use crate::Result;

pub const YOUDAO_ENDPOINT: &str = "https://openapi.youdao.com/api";

/// Translates English `text` to Simplified Chinese through the JSONP bridge.
///
/// Returns whatever the provider's callback delivers; result fields are not
/// inspected here.
pub async fn translate(
    bridge: &JsonpBridge,
    app_id: &str,
    app_secret: &str,
    text: &str,
) -> Result<serde_json::Value> {
    translate_with(bridge, YOUDAO_ENDPOINT, &SystemClock, app_id, app_secret, text).await
}

/// [`translate`] against an explicit endpoint and clock.
pub async fn translate_with(
    bridge: &JsonpBridge,
    endpoint: &str,
    clock: &dyn Clock,
    app_id: &str,
    app_secret: &str,
    text: &str,
) -> Result<serde_json::Value> {
    let query = SignedQuery::new(app_id, app_secret, text, clock);
    tracing::debug!(salt = query.salt, curtime = query.curtime, "signed translation request");
    bridge.jsonp(endpoint, Some(query.into_data())).await
}

/// Translation adapter bound to a bridge, endpoint and clock.
pub struct Translator {
    bridge: Arc<JsonpBridge>,
    endpoint: String,
    clock: Arc<dyn Clock>,
}

impl Translator {
    pub fn new(bridge: Arc<JsonpBridge>) -> Self {
        Self {
            bridge,
            endpoint: YOUDAO_ENDPOINT.to_string(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn translate(
        &self,
        app_id: &str,
        app_secret: &str,
        text: &str,
    ) -> Result<serde_json::Value> {
        translate_with(
            &self.bridge,
            &self.endpoint,
            self.clock.as_ref(),
            app_id,
            app_secret,
            text,
        )
        .await
    }
}
