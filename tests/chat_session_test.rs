// End-to-end exercise of the terminal chat session against a real server
// instance whose upstream is a wiremock provider.

use fanforge::chat::{ChatSession, WELCOME_MESSAGE};
use fanforge::config::AppConfig;
use fanforge::models::Role;
use fanforge::web_server::{build_router, AppState};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn spawn_app(api_base: &str) -> String {
    let state = AppState::new(AppConfig::new("test-key", api_base));
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });
    format!("http://{addr}")
}

fn chat_completion_body(content: &str) -> serde_json::Value {
    json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
}

#[tokio::test]
async fn test_submit_appends_user_and_assistant_messages() {
    let mock = MockServer::start().await;
    let concepts = json!([
        { "title": "Pixel Quest", "description": "An 8-bit dungeon crawl.", "style": "Vintage" },
        { "title": "High Score", "description": "A glowing scoreboard.", "style": "Vintage" },
        { "title": "Continue?", "description": "A countdown screen.", "style": "Vintage" },
        { "title": "Player One", "description": "A joystick motif.", "style": "Vintage" }
    ])
    .to_string();
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_body(&concepts)))
        .mount(&mock)
        .await;

    let server_url = spawn_app(&mock.uri()).await;
    let mut session = ChatSession::new(server_url);
    assert_eq!(session.messages[0].content, WELCOME_MESSAGE);

    session.input = "retro gaming tee".to_string();
    session.submit().await;

    assert_eq!(session.messages.len(), 3);
    assert_eq!(session.messages[1].role, Role::User);
    assert_eq!(session.messages[1].content, "retro gaming tee");
    assert_eq!(session.messages[2].role, Role::Assistant);
    assert!(session.messages[2].content.contains("Pixel Quest"));
    assert!(!session.is_loading());
}

#[tokio::test]
async fn test_submit_surfaces_fallback_advisory_in_reply() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock)
        .await;

    let server_url = spawn_app(&mock.uri()).await;
    let mut session = ChatSession::new(server_url);
    session.input = "retro gaming tee".to_string();
    session.submit().await;

    // The server still answers 200 with the fallback batch, so the reply
    // lists the fallback concepts plus the advisory note.
    let reply = &session.messages[2].content;
    assert!(reply.contains("Simple Black Tee"));
    assert!(reply.contains("Heads up"));
}

#[tokio::test]
async fn test_submit_with_unreachable_server_appends_error_message() {
    // Nothing is listening on this port.
    let mut session = ChatSession::new("http://127.0.0.1:1");
    session.input = "retro gaming tee".to_string();
    session.submit().await;

    assert_eq!(session.messages.len(), 3);
    assert_eq!(session.messages[2].role, Role::Assistant);
    assert!(session.messages[2].content.contains("error"));
    assert!(!session.is_loading());
}

#[tokio::test]
async fn test_blank_submit_is_a_noop() {
    let mut session = ChatSession::new("http://127.0.0.1:1");
    session.input = "   ".to_string();
    session.submit().await;
    assert_eq!(session.messages.len(), 1);
    assert!(!session.is_loading());
}
