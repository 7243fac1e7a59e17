mod common;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use std::time::Duration;

use common::{spawn_server, Hits};
use translator_backend::language::LanguagePair;
use translator_backend::translate::error::{
    CONNECTION_FAILURE_MESSAGE, EMPTY_INPUT_MESSAGE, NO_TRANSLATION_MESSAGE,
};
use translator_backend::translate::{ProxyClient, TranslateError, TranslateInterface, TranslatorView};

/// Mock proxy endpoint answering every request with `status` and `body`.
async fn mock_endpoint(status: StatusCode, body: Value) -> (String, Hits) {
    let hits = Hits::default();
    let router = Router::new()
        .route(
            "/api/huggingface",
            post(
                move |State(hits): State<Hits>, Json(request): Json<Value>| {
                    let body = body.clone();
                    async move {
                        hits.record();
                        assert!(request["inputs"].is_string());
                        assert!(request["language"].is_string());
                        (status, Json(body))
                    }
                },
            ),
        )
        .with_state(hits.clone());
    let (addr, _server) = spawn_server(router).await;
    (format!("http://{}/api/huggingface", addr), hits)
}

/// Mock proxy endpoint that never answers.
async fn silent_endpoint() -> (String, Hits) {
    let hits = Hits::default();
    let router = Router::new()
        .route(
            "/api/huggingface",
            post(|State(hits): State<Hits>| async move {
                hits.record();
                tokio::time::sleep(Duration::from_secs(3600)).await;
                StatusCode::OK
            }),
        )
        .with_state(hits.clone());
    let (addr, _server) = spawn_server(router).await;
    (format!("http://{}/api/huggingface", addr), hits)
}

#[tokio::test]
async fn spanish_text_is_translated() {
    let (endpoint, hits) =
        mock_endpoint(StatusCode::OK, json!([{ "translation_text": "Hello world" }])).await;
    let client = ProxyClient::new(endpoint);

    let mut view = TranslatorView::new();
    view.set_source_text("Hola mundo");
    view.set_language_pair(LanguagePair::SpanishToEnglish);
    assert!(view.submit_with(&client).await);

    let snapshot = view.snapshot();
    assert_eq!(snapshot.translation.as_deref(), Some("Hello world"));
    assert_eq!(snapshot.error_message, None);
    assert!(!snapshot.is_pending);
    assert_eq!(hits.count(), 1);
}

#[tokio::test]
async fn empty_text_never_reaches_the_endpoint() {
    let (endpoint, hits) =
        mock_endpoint(StatusCode::OK, json!([{ "translation_text": "unused" }])).await;
    let client = ProxyClient::new(endpoint);

    let mut view = TranslatorView::new();
    view.set_source_text("");
    assert!(!view.submit_with(&client).await);

    assert_eq!(view.result().error_message(), Some(EMPTY_INPUT_MESSAGE));
    assert_eq!(hits.count(), 0);
}

#[tokio::test]
async fn server_error_message_is_shown() {
    let (endpoint, hits) = mock_endpoint(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "model unavailable" }),
    )
    .await;
    let client = ProxyClient::new(endpoint);

    let mut view = TranslatorView::new();
    view.set_source_text("Bonjour");
    view.set_language_pair(LanguagePair::FrenchToEnglish);
    view.submit_with(&client).await;

    assert_eq!(view.result().error_message(), Some("model unavailable"));
    assert_eq!(view.result().translation(), None);
    assert_eq!(hits.count(), 1);
}

#[tokio::test]
async fn server_error_without_message_uses_generic_text() {
    let (endpoint, _hits) = mock_endpoint(StatusCode::BAD_GATEWAY, json!({})).await;
    let client = ProxyClient::new(endpoint);

    let err = client
        .translate("Hallo", LanguagePair::GermanToEnglish)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TranslateError::Server {
            status: 502,
            message: None
        }
    );
    assert_eq!(err.user_message(), CONNECTION_FAILURE_MESSAGE);
}

#[tokio::test]
async fn success_without_translation_is_informational() {
    let (endpoint, _hits) = mock_endpoint(StatusCode::OK, json!([{ "score": 0.9 }])).await;
    let client = ProxyClient::new(endpoint);

    let mut view = TranslatorView::new();
    view.set_source_text("Privet");
    view.set_language_pair(LanguagePair::RussianToEnglish);
    view.submit_with(&client).await;

    assert_eq!(view.result().translation(), Some(NO_TRANSLATION_MESSAGE));
    assert_eq!(view.result().error_message(), None);
}

#[tokio::test]
async fn unresponsive_server_times_out() {
    let (endpoint, hits) = silent_endpoint().await;
    let client = ProxyClient::with_timeout(endpoint, Duration::from_millis(200));

    let mut view = TranslatorView::new();
    view.set_source_text("Ciao");
    view.set_language_pair(LanguagePair::ItalianToEnglish);

    let started = std::time::Instant::now();
    view.submit_with(&client).await;
    assert!(started.elapsed() < Duration::from_secs(5));

    let snapshot = view.snapshot();
    assert!(!snapshot.is_pending);
    assert_eq!(snapshot.error_message.as_deref(), Some(CONNECTION_FAILURE_MESSAGE));
    assert_eq!(hits.count(), 1);
}

#[tokio::test]
async fn unreachable_endpoint_is_a_connection_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ProxyClient::new(format!("http://{}/api/huggingface", addr));
    let err = client
        .translate("Hola", LanguagePair::SpanishToEnglish)
        .await
        .unwrap_err();
    assert!(matches!(err, TranslateError::Transport(_)));
    assert_eq!(err.user_message(), CONNECTION_FAILURE_MESSAGE);
}

#[tokio::test(start_paused = true)]
async fn default_client_gives_up_after_ten_seconds() {
    let (endpoint, _hits) = silent_endpoint().await;
    let client = ProxyClient::new(endpoint);

    let started = tokio::time::Instant::now();
    let err = client
        .translate("Ciao", LanguagePair::ItalianToEnglish)
        .await
        .unwrap_err();
    let elapsed = started.elapsed();

    assert_eq!(err, TranslateError::Timeout(Duration::from_millis(10_000)));
    assert!(elapsed >= Duration::from_millis(10_000), "elapsed {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(11), "elapsed {:?}", elapsed);
    assert_eq!(err.user_message(), CONNECTION_FAILURE_MESSAGE);
}
