//! JSONP bridge: URL construction, correlation of concurrent calls, HTTP loading.

mod common;

use async_trait::async_trait;
use common::{query_param, MockServerFixture};
use mockito::Matcher;
use phonetic_dict::jsonp::{JsonpBridge, JsonpData, ScriptLoader};
use phonetic_dict::{Error, JsonpConfig, Result};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Records every script URL and never invokes a callback by itself.
#[derive(Default)]
struct Recorder {
    sources: Mutex<Vec<String>>,
}

#[async_trait]
impl ScriptLoader for Recorder {
    async fn load(&self, src: &str) -> Result<String> {
        self.sources.lock().unwrap().push(src.to_string());
        Ok(String::new())
    }
}

async fn wait_for_pending(bridge: &JsonpBridge, count: usize) {
    for _ in 0..200 {
        if bridge.pending().len() == count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("expected {count} pending calls, found {}", bridge.pending().len());
}

#[tokio::test]
async fn request_url_carries_callback_data_and_timestamp() {
    let loader = Arc::new(Recorder::default());
    let bridge = Arc::new(JsonpBridge::new(
        loader.clone(),
        JsonpConfig::without_timeout(),
    ));

    let call = {
        let bridge = bridge.clone();
        tokio::spawn(async move {
            bridge
                .jsonp(
                    "https://dict.test/api",
                    Some(JsonpData::pairs([("to", "zh-CHS"), ("q", "a b&c")])),
                )
                .await
        })
    };
    wait_for_pending(&bridge, 1).await;

    let src = loader.sources.lock().unwrap()[0].clone();
    assert!(src.starts_with("https://dict.test/api?callback=CALLBACK"));
    let callback = query_param(&src, "callback").unwrap();
    assert!(callback["CALLBACK".len()..].chars().all(|c| c.is_ascii_digit()));
    assert!(src.contains("&to=zh-CHS"));
    assert!(src.contains("&q=a%20b%26c"));
    let time = query_param(&src, "_time").unwrap();
    assert!(time.parse::<u64>().is_ok());

    assert!(bridge.deliver(&callback, json!({"ok": true})));
    assert_eq!(call.await.unwrap().unwrap(), json!({"ok": true}));
}

#[tokio::test]
async fn empty_url_fails_without_loading() {
    let loader = Arc::new(Recorder::default());
    let bridge = JsonpBridge::new(loader.clone(), JsonpConfig::default());

    let err = bridge
        .jsonp("", Some(JsonpData::text("a=1")))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
    assert!(loader.sources.lock().unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_calls_resolve_independently() {
    let loader = Arc::new(Recorder::default());
    let bridge = Arc::new(JsonpBridge::new(loader, JsonpConfig::without_timeout()));

    let first = {
        let bridge = bridge.clone();
        tokio::spawn(async move { bridge.jsonp("https://a.test/api", None).await })
    };
    wait_for_pending(&bridge, 1).await;
    let second = {
        let bridge = bridge.clone();
        tokio::spawn(async move { bridge.jsonp("https://b.test/api", None).await })
    };
    wait_for_pending(&bridge, 2).await;

    let pending = bridge.pending();
    assert_ne!(pending[0].callback, pending[1].callback);
    let first_name = pending
        .iter()
        .find(|p| p.src.starts_with("https://a.test"))
        .unwrap()
        .callback
        .clone();

    assert!(bridge.deliver(&first_name, json!("one")));
    assert_eq!(first.await.unwrap().unwrap(), json!("one"));

    let remaining = bridge.pending();
    assert_eq!(remaining.len(), 1);
    assert!(remaining[0].src.starts_with("https://b.test/api?callback="));
    assert!(!second.is_finished());

    // A callback fires once; its name is gone afterwards.
    assert!(!bridge.deliver(&first_name, json!("again")));

    assert!(bridge.deliver(&remaining[0].callback, json!("two")));
    assert_eq!(second.await.unwrap().unwrap(), json!("two"));
    assert!(bridge.pending().is_empty());
}

#[tokio::test]
async fn scripts_are_loaded_over_http() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_jsonp(
            "/api",
            Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "hello world".into()),
                Matcher::Regex("_time=[0-9]+".into()),
            ]),
            json!({"errorCode": "0", "translation": ["你好世界"]}),
        )
        .await;

    let bridge = JsonpBridge::over_http(fixture.client(), JsonpConfig::default());
    let value = bridge
        .jsonp(
            &fixture.url("/api"),
            Some(JsonpData::pairs([("q", "hello world")])),
        )
        .await
        .unwrap();

    assert_eq!(value["translation"][0], "你好世界");
    assert!(bridge.pending().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn script_without_callback_times_out() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("GET", "/api")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("console.log('no callback');")
        .create_async()
        .await;

    let bridge = JsonpBridge::over_http(
        fixture.client(),
        JsonpConfig::with_timeout(Duration::from_millis(100)),
    );
    let err = bridge.jsonp(&fixture.url("/api"), None).await.unwrap_err();
    assert!(matches!(err, Error::NonDelivery { .. }));
    assert!(bridge.pending().is_empty());
}

#[tokio::test]
async fn failed_script_load_surfaces_transport_error() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_error_response("GET", "/api", 404).await;

    let bridge = JsonpBridge::over_http(fixture.client(), JsonpConfig::default());
    let err = bridge.jsonp(&fixture.url("/api"), None).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(bridge.pending().is_empty());
}
