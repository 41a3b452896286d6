//! HTTP-level tests for the Gemini clients against a local mock server.

use futures_util::StreamExt;
use uplink_common::Citation;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{AiError, ChatBackend, ImageBackend, ImageRequest, Message};

use super::{GeminiClient, GeminiConfig, GeminiImageClient};

fn chat_client(server: &MockServer) -> GeminiClient {
    GeminiClient::new(
        GeminiConfig::new("AIzaTestKey")
            .with_base_url(format!("{}/v1beta", server.uri()))
            .with_model("gemini-test"),
    )
    .unwrap()
}

fn sse_body(events: &[&str]) -> String {
    events
        .iter()
        .map(|e| format!("data: {e}\r\n\r\n"))
        .collect()
}

#[tokio::test]
async fn open_stream_yields_fragments_in_order() {
    let server = MockServer::start().await;
    let body = sse_body(&[
        r#"{"candidates":[{"content":{"parts":[{"text":"Sys"}]}}]}"#,
        r#"{"candidates":[{"content":{"parts":[{"text":"tem online."}]}}],"usageMetadata":{"promptTokenCount":3,"candidatesTokenCount":2}}"#,
    ]);

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-test:streamGenerateContent"))
        .and(query_param("alt", "sse"))
        .and(header("x-goog-api-key", "AIzaTestKey"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(body),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = chat_client(&server);
    let stream = client
        .open_stream(&[Message::user("hi"), Message::assistant("hello")], "status?")
        .await
        .unwrap();
    let fragments: Vec<_> = stream.collect().await;

    assert_eq!(fragments.len(), 2);
    let texts: Vec<String> = fragments
        .into_iter()
        .map(|f| f.unwrap().text)
        .collect();
    assert_eq!(texts.concat(), "System online.");

    let requests = server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent["contents"].as_array().unwrap().len(), 3);
    assert_eq!(sent["contents"][2]["parts"][0]["text"], "status?");
}

#[tokio::test]
async fn open_stream_carries_grounding_citations() {
    let server = MockServer::start().await;
    let body = sse_body(&[
        r#"{"candidates":[{"content":{"parts":[{"text":"Coverage confirmed."}]},"groundingMetadata":{"groundingChunks":[{"web":{"uri":"https://example.mil/dod","title":"DoD Report"}}]}}]}"#,
    ]);
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let stream = chat_client(&server)
        .open_stream(&[], "satellite coverage")
        .await
        .unwrap();
    let fragments: Vec<_> = stream.collect().await;
    let fragment = fragments[0].as_ref().unwrap();
    assert_eq!(
        fragment.citations,
        vec![Citation::new("DoD Report", "https://example.mil/dod")]
    );
}

#[tokio::test]
async fn open_stream_maps_http_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let result = chat_client(&server).open_stream(&[], "x").await;
    match result {
        Err(AiError::ApiError(msg)) => {
            assert!(msg.contains("500"));
            assert!(msg.contains("backend exploded"));
        }
        Err(other) => panic!("expected ApiError, got {other:?}"),
        Ok(_) => panic!("expected ApiError, got a stream"),
    }
}

#[tokio::test]
async fn open_stream_maps_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let result = chat_client(&server).open_stream(&[], "x").await;
    assert!(matches!(result, Err(AiError::RateLimited)));
}

#[tokio::test]
async fn open_stream_surfaces_mid_stream_error_event() {
    let server = MockServer::start().await;
    let body = sse_body(&[
        r#"{"candidates":[{"content":{"parts":[{"text":"partial"}]}}]}"#,
        r#"{"error":{"code":500,"message":"internal","status":"INTERNAL"}}"#,
    ]);
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let stream = chat_client(&server).open_stream(&[], "x").await.unwrap();
    let fragments: Vec<_> = stream.collect().await;
    assert_eq!(fragments[0].as_ref().unwrap().text, "partial");
    assert!(matches!(fragments[1], Err(AiError::ApiError(_))));
}

#[tokio::test]
async fn open_stream_unreachable_host_is_network_error() {
    let client = GeminiClient::new(
        GeminiConfig::new("k").with_base_url("http://127.0.0.1:1/v1beta"),
    )
    .unwrap();
    let result = client.open_stream(&[], "x").await;
    assert!(matches!(result, Err(AiError::NetworkError(_))));
}

#[tokio::test]
async fn imagen_generate_returns_parts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/imagen-test:predict"))
        .and(header("x-goog-api-key", "AIzaTestKey"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "predictions": [
                { "bytesBase64Encoded": "iVBORw0KGgo=", "mimeType": "image/png" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiImageClient::new("AIzaTestKey", "imagen-test")
        .unwrap()
        .with_base_url(format!("{}/v1beta", server.uri()));
    let response = client
        .generate("orbital relay", &ImageRequest::default())
        .await
        .unwrap();
    assert_eq!(response.parts.len(), 1);
    assert_eq!(response.parts[0].mime_type, "image/png");

    let requests = server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent["instances"][0]["prompt"], "orbital relay");
    assert_eq!(sent["parameters"]["aspectRatio"], "16:9");
}

#[tokio::test]
async fn imagen_generate_with_no_predictions_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = GeminiImageClient::new("k", "imagen-test")
        .unwrap()
        .with_base_url(format!("{}/v1beta", server.uri()));
    let response = client.generate("x", &ImageRequest::default()).await.unwrap();
    assert!(response.is_empty());
}

#[tokio::test]
async fn image_generate_maps_http_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let client = GeminiImageClient::new("k", "imagen-test")
        .unwrap()
        .with_base_url(format!("{}/v1beta", server.uri()));
    let err = client
        .generate("x", &ImageRequest::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("403"));
}
