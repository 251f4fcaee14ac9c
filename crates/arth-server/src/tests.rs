//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use arth_core::ai::MockBackend;
use arth_core::fallback_insights;
use http_body_util::BodyExt;
use tower::ServiceExt;

fn test_app(ai: Option<AiClient>) -> Router {
    create_router_with_state(Profile::sample(), ai, None, ServerConfig::default())
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_insights(body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/insights")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

// ========== Dashboard ==========

#[tokio::test]
async fn test_dashboard_page() {
    let app = test_app(None);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("Arth"));
}

// ========== Profile API ==========

#[tokio::test]
async fn test_get_user_data() {
    let app = test_app(None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/user-data")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json, serde_json::to_value(Profile::sample()).unwrap());
}

#[tokio::test]
async fn test_get_user_data_is_stable_across_calls() {
    let app = test_app(None);

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/user-data")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        bodies.push(bytes);
    }

    assert_eq!(bodies[0], bodies[1]);
}

// ========== Insights API ==========

#[tokio::test]
async fn test_insights_generated_path() {
    let app = test_app(Some(AiClient::mock()));
    let body = serde_json::to_value(Profile::sample()).unwrap();

    let response = app.oneshot(post_insights(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(INSIGHTS_SOURCE_HEADER).unwrap(),
        "generated"
    );

    let json = get_body_json(response).await;
    let insights = json.as_array().unwrap();
    assert!(!insights.is_empty());

    // Every card satisfies the schema's enum constraints
    for card in insights {
        assert!(["positive", "warning", "info", "suggestion"]
            .contains(&card["type"].as_str().unwrap()));
        assert!(["Goal", "Tax", "Savings", "Investment", "Debt"]
            .contains(&card["category"].as_str().unwrap()));
        assert!(["High", "Medium", "Low"].contains(&card["impact"].as_str().unwrap()));
    }
}

#[tokio::test]
async fn test_insights_fallback_on_backend_failure() {
    let app = test_app(Some(AiClient::Mock(MockBackend::failing("upstream down"))));
    let body = serde_json::to_value(Profile::sample()).unwrap();

    let response = app.oneshot(post_insights(&body)).await.unwrap();

    // Errors degrade to fallback, never to a non-200 status
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(INSIGHTS_SOURCE_HEADER).unwrap(),
        "fallback"
    );

    let json = get_body_json(response).await;
    assert_eq!(json, serde_json::to_value(fallback_insights()).unwrap());
}

#[tokio::test]
async fn test_insights_fallback_without_configured_backend() {
    let app = test_app(None);
    let body = serde_json::to_value(Profile::sample()).unwrap();

    let response = app.oneshot(post_insights(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(INSIGHTS_SOURCE_HEADER).unwrap(),
        "fallback"
    );

    let json = get_body_json(response).await;
    let insights = json.as_array().unwrap();
    assert_eq!(insights.len(), 2);
    assert_eq!(insights[0]["title"], "Goal Feasibility");
    assert_eq!(insights[1]["title"], "Emergency Fund");
}

#[tokio::test]
async fn test_insights_rejects_payload_missing_financials() {
    let app = test_app(Some(AiClient::mock()));
    let body = serde_json::json!({
        "Name": "Test User",
        "Age": "30",
        "Goal": {"goal": "House", "target-amt": 5_000_000, "target-time": 60},
        "investments": {"risk-opt": "Low", "invest-amt": 0}
    });

    let response = app.oneshot(post_insights(&body)).await.unwrap();

    // Bad input is a client error, not a silent fallback
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get(INSIGHTS_SOURCE_HEADER).is_none());

    let json = get_body_json(response).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_insights_rejects_non_json_body() {
    let app = test_app(Some(AiClient::mock()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/insights")
                .header("content-type", "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_insights_end_to_end_fallback_scenario() {
    // Sample profile (income 150000, expenses 45000, debt 12000, goal
    // 2100000/24 months, risk Medium) against an erroring generation
    // service: the response is exactly the two fixed fallback cards.
    let app = test_app(Some(AiClient::Mock(MockBackend::failing("boom"))));
    let body = serde_json::to_value(Profile::sample()).unwrap();
    assert_eq!(body["financials"]["monthly-income"], 150_000);

    let response = app.oneshot(post_insights(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let insights = json.as_array().unwrap();
    assert_eq!(insights.len(), 2);

    assert_eq!(insights[0]["title"], "Goal Feasibility");
    assert_eq!(insights[0]["type"], "info");
    assert_eq!(insights[0]["category"], "Goal");
    assert_eq!(insights[0]["impact"], "High");
    assert!(insights[0]["description"]
        .as_str()
        .unwrap()
        .contains("₹75,000"));

    assert_eq!(insights[1]["title"], "Emergency Fund");
    assert_eq!(insights[1]["type"], "suggestion");
    assert_eq!(insights[1]["category"], "Savings");
    assert_eq!(insights[1]["impact"], "High");
    assert!(insights[1]["description"]
        .as_str()
        .unwrap()
        .contains("₹2.7L"));
}

#[tokio::test]
async fn test_insights_end_to_end_against_mock_gemini() {
    use arth_core::ai::GeminiBackend;
    use arth_core::test_utils::MockGeminiServer;

    // Full stack over the wire format: the mock Gemini server answers with
    // a fenced JSON array, the handler must strip the fence and parse it.
    let server = MockGeminiServer::start().await;
    let ai = AiClient::Gemini(GeminiBackend::new(&server.url(), "test-key", "test-model"));
    let app = test_app(Some(ai));
    let body = serde_json::to_value(Profile::sample()).unwrap();

    let response = app.oneshot(post_insights(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(INSIGHTS_SOURCE_HEADER).unwrap(),
        "generated"
    );

    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_insights_end_to_end_truncated_gemini_output() {
    use arth_core::ai::GeminiBackend;
    use arth_core::test_utils::MockGeminiServer;

    let server = MockGeminiServer::start_with_response(r#"[{"title": "Goal SIP", "descr"#).await;
    let ai = AiClient::Gemini(GeminiBackend::new(&server.url(), "test-key", "test-model"));
    let app = test_app(Some(ai));
    let body = serde_json::to_value(Profile::sample()).unwrap();

    let response = app.oneshot(post_insights(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(INSIGHTS_SOURCE_HEADER).unwrap(),
        "fallback"
    );

    let json = get_body_json(response).await;
    assert_eq!(json, serde_json::to_value(fallback_insights()).unwrap());
}

// ========== Health API ==========

#[tokio::test]
async fn test_health_with_mock_backend() {
    let app = test_app(Some(AiClient::mock()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["ai"]["configured"], true);
    assert_eq!(json["ai"]["healthy"], true);
    assert_eq!(json["ai"]["model"], "mock");
}

#[tokio::test]
async fn test_health_without_backend() {
    let app = test_app(None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["ai"]["configured"], false);
    assert!(json["ai"].get("model").is_none());
}

// ========== Security headers ==========

#[tokio::test]
async fn test_security_headers_present() {
    let app = test_app(None);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert!(headers.get("content-security-policy").is_some());
}
