use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::post};
use phrasepool::{FilePool, IssueStatus, LocalPool, MemoryStorage, TemplateGenerator};
use phrasepool_client::{ClientError, HttpIssuer, Issuer, Offline, Shell, View};
use phrasepool_server::server::{handler::router, state::AppState};
use serde_json::json;
use std::{fs, net::SocketAddr, time::Duration};
use tokio::net::TcpListener;

async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn stub(status: StatusCode, body: Option<serde_json::Value>) -> Router {
    Router::new().route(
        "/api/next-phrase",
        post(move || {
            let body = body.clone();
            async move {
                match body {
                    Some(body) => (status, Json(body)).into_response(),
                    None => status.into_response(),
                }
            }
        }),
    )
}

fn local_pool() -> LocalPool<MemoryStorage> {
    LocalPool::new(MemoryStorage::new(), TemplateGenerator::default())
}

#[tokio::test]
async fn real_server_issues_then_reports_gone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("phrases.json");
    fs::write(&path, r#"["A Quick Fox Jumps"]"#).unwrap();
    let pool = FilePool::new(&path, TemplateGenerator::default());
    let base = spawn(router(AppState::new(pool))).await;

    let issuer = HttpIssuer::new(&base, Some(Duration::from_secs(5))).unwrap();
    assert_eq!(
        issuer.issue().await.unwrap(),
        IssueStatus::Ready {
            phrase: "A Quick Fox Jumps".to_string()
        }
    );
    assert_eq!(issuer.issue().await.unwrap(), IssueStatus::Depleted);

    let mut shell = Shell::with_fallback(issuer, local_pool());
    assert_eq!(shell.generate().await, View::Depleted);
    assert!(shell.fallback().unwrap().seen().is_empty());
}

#[tokio::test]
async fn server_error_is_replaced_by_local_phrase() {
    let base = spawn(stub(
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(json!({ "error": "disk full" })),
    ))
    .await;
    let issuer = HttpIssuer::new(&base, None).unwrap();

    match issuer.issue().await {
        Err(ClientError::Status { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "disk full");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    let mut shell = Shell::with_fallback(issuer, local_pool());
    let View::Phrase(phrase) = shell.generate().await else {
        panic!("expected a phrase from the local pool");
    };
    assert!(phrase.starts_with("A ") || phrase.starts_with("An "));
    assert_eq!(shell.fallback().unwrap().seen(), vec![phrase]);
}

#[tokio::test]
async fn server_error_is_shown_without_fallback() {
    let base = spawn(stub(
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(json!({ "error": "disk full" })),
    ))
    .await;

    let mut shell = Shell::new(HttpIssuer::new(&base, None).unwrap());
    assert_eq!(shell.generate().await, View::Error("disk full".to_string()));
}

#[tokio::test]
async fn error_without_message_uses_status() {
    let base = spawn(stub(StatusCode::BAD_GATEWAY, Some(json!({})))).await;
    let mut shell = Shell::new(HttpIssuer::new(&base, None).unwrap());
    assert_eq!(
        shell.generate().await,
        View::Error("Request failed: 502".to_string())
    );
}

#[tokio::test]
async fn error_with_non_object_json_uses_status() {
    for body in [json!([]), json!("x")] {
        let base = spawn(stub(StatusCode::INTERNAL_SERVER_ERROR, Some(body))).await;
        let mut shell = Shell::new(HttpIssuer::new(&base, None).unwrap());
        assert_eq!(
            shell.generate().await,
            View::Error("Request failed: 500".to_string())
        );
    }
}

#[tokio::test]
async fn error_with_unparseable_body_says_failed() {
    let base = spawn(stub(StatusCode::SERVICE_UNAVAILABLE, None)).await;
    let mut shell = Shell::new(HttpIssuer::new(&base, None).unwrap());
    assert_eq!(shell.generate().await, View::Error("Failed".to_string()));
}

#[tokio::test]
async fn no_content_counts_as_depleted() {
    let base = spawn(stub(StatusCode::NO_CONTENT, None)).await;
    let issuer = HttpIssuer::new(&base, None).unwrap();
    assert_eq!(issuer.issue().await.unwrap(), IssueStatus::Depleted);
}

#[tokio::test]
async fn malformed_success_body_falls_back() {
    let base = spawn(stub(StatusCode::OK, Some(json!({ "nope": 1 })))).await;
    let issuer = HttpIssuer::new(&base, None).unwrap();
    assert!(matches!(issuer.issue().await, Err(ClientError::Decode(_))));

    let mut shell = Shell::with_fallback(issuer, local_pool());
    assert!(matches!(shell.generate().await, View::Phrase(_)));
}

#[tokio::test]
async fn unreachable_server_falls_back() {
    // Bind and drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let issuer = HttpIssuer::new(&format!("http://{addr}/"), Some(Duration::from_secs(2))).unwrap();
    assert_eq!(issuer.endpoint(), format!("http://{addr}/api/next-phrase"));
    assert!(matches!(issuer.issue().await, Err(ClientError::Transport(_))));

    let mut shell = Shell::with_fallback(issuer, local_pool());
    assert!(matches!(shell.generate().await, View::Phrase(_)));
}

#[tokio::test]
async fn offline_shell_only_uses_local_pool() {
    let mut shell = Shell::with_fallback(Offline, local_pool());
    let mut issued = Vec::new();
    for _ in 0..5 {
        let View::Phrase(phrase) = shell.generate().await else {
            panic!("expected a phrase");
        };
        issued.push(phrase);
    }
    assert_eq!(shell.fallback().unwrap().seen(), issued);

    assert!(shell.reset_local());
    assert!(shell.fallback().unwrap().seen().is_empty());
}
