use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use engine::{CategoryCatalog, Extractor, Ingestor};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use server::{Ledger, ServerState};
use tower::ServiceExt;

fn state() -> ServerState {
    let ingestor = Ingestor::new(Extractor::builder().build().unwrap());
    ServerState::new(
        ingestor,
        CategoryCatalog::default_seed(),
        Some("mytesttoken".to_string()),
    )
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

fn post_json(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn text_message(body: &str) -> Value {
    json!({"entry": [{"changes": [{"value": {"messages": [
        {"type": "text", "text": {"body": body}}
    ]}}]}]})
}

#[tokio::test]
async fn quick_add_creates_and_echoes() {
    let state = state();
    let app = server::router(state.clone());

    let (status, body) = send(
        app,
        post_json("/api/nlp", json!({"text": "gastei 50 no mercado"}).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["description"], "Mercado");
    assert_eq!(body["amount"], "50.00");
    assert_eq!(body["kind"], "EXPENSE");
    assert_eq!(body["category"], "Alimentação");
    assert_eq!(state.ledger.len().unwrap(), 1);
}

#[tokio::test]
async fn quick_add_without_text_is_400() {
    let state = state();

    for body in [json!({"text": ""}), json!({})] {
        let (status, response) =
            send(server::router(state.clone()), post_json("/api/nlp", body.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let response: Value = serde_json::from_slice(&response).unwrap();
        assert_eq!(response["error"], "no text provided");
    }
    assert_eq!(state.ledger.len().unwrap(), 0);
}

#[tokio::test]
async fn quick_add_invalid_json_is_400() {
    let (status, _) = send(
        server::router(state()),
        post_json("/api/nlp", "{not json".to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn quick_add_storage_failure_is_500_without_detail() {
    let state = state().with_ledger(Ledger::with_limit(0));

    let (status, body) = send(
        server::router(state.clone()),
        post_json("/api/nlp", json!({"text": "uber 20"}).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "internal server error");
    assert_eq!(state.ledger.len().unwrap(), 0);
}

#[tokio::test]
async fn webhook_text_message_is_stored() {
    let state = state();

    let (status, body) = send(
        server::router(state.clone()),
        post_json(
            "/webhook/whatsapp",
            text_message("recebi 1500 de salário").to_string(),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "transaction created");

    let stored = state.ledger.snapshot().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].record.description, "Salário");
    assert_eq!(stored[0].record.direction, engine::Direction::Income);
    assert_eq!(stored[0].record.source, engine::TransactionSource::InboundChannel);
}

#[tokio::test]
async fn webhook_non_text_and_malformed_still_200() {
    let state = state();
    let image = json!({"entry": [{"changes": [{"value": {"messages": [{"type": "image"}]}}]}]});

    let cases = [
        (image, "not a text message"),
        (json!({}), "no messages found"),
        (text_message(""), "empty text"),
    ];
    for (payload, expected) in cases {
        let (status, body) = send(
            server::router(state.clone()),
            post_json("/webhook/whatsapp", payload.to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], expected);
    }

    let (status, body) = send(
        server::router(state.clone()),
        post_json("/webhook/whatsapp", json!({"entry": 5}).to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert!(body["status"].as_str().unwrap().starts_with("malformed payload"));

    assert_eq!(state.ledger.len().unwrap(), 0);
}

#[tokio::test]
async fn webhook_double_encoded_body_is_accepted() {
    let state = state();
    let encoded = Value::String(text_message("uber 12").to_string()).to_string();

    let (status, _) = send(
        server::router(state.clone()),
        post_json("/webhook/whatsapp", encoded),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.ledger.len().unwrap(), 1);
}

#[tokio::test]
async fn webhook_invalid_json_is_400() {
    let (status, body) = send(
        server::router(state()),
        post_json("/webhook/whatsapp", "nope".to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("invalid json"));
}

#[tokio::test]
async fn verification_handshake() {
    let ok = "/webhook/whatsapp?hub.mode=subscribe&hub.verify_token=mytesttoken&hub.challenge=1158201444";
    let (status, body) = send(server::router(state()), get(ok)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"1158201444");

    let wrong = "/webhook/whatsapp?hub.mode=subscribe&hub.verify_token=other&hub.challenge=1";
    let (status, body) = send(server::router(state()), get(wrong)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, b"Forbidden");

    let (status, body) = send(server::router(state()), get("/webhook/whatsapp")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Hello");
}

#[tokio::test]
async fn handshake_refused_without_configured_token() {
    let ingestor = Ingestor::new(Extractor::builder().build().unwrap());
    let state = ServerState::new(ingestor, CategoryCatalog::default_seed(), None);
    let uri = "/webhook/whatsapp?hub.mode=subscribe&hub.verify_token=x&hub.challenge=1";

    let (status, _) = send(server::router(state), get(uri)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn transactions_are_listed_newest_first() {
    let state = state();
    for text in ["uber 10", "cinema 30"] {
        let (status, _) = send(
            server::router(state.clone()),
            post_json("/api/nlp", json!({ "text": text }).to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(server::router(state), get("/transactions")).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    let list = body["transactions"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["description"], "Cinema");
    assert_eq!(list[0]["category"], "Lazer");
    assert_eq!(list[0]["source"], "direct-entry");
    assert_eq!(list[1]["amount"], "10.00");
}

#[tokio::test]
async fn categories_are_listed() {
    let (status, body) = send(server::router(state()), get("/categories")).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 10);
    assert!(
        categories
            .iter()
            .any(|c| c["name"] == "Salário" && c["is_income"] == true)
    );
}
