use axum::http::StatusCode;
use axum_test::TestServer;
use fanforge::config::AppConfig;
use fanforge::constants::FALLBACK_PITCHES;
use fanforge::models::PitchResponse;
use fanforge::web_server::{build_router, AppState};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_state(api_base: &str) -> AppState {
    AppState::new(AppConfig::new("test-key", api_base))
}

fn chat_completion_body(content: &str) -> serde_json::Value {
    json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
}

fn pitch_object(count: usize) -> String {
    let entries: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            json!({
                "title": format!("Angle {i}"),
                "description": format!("Summary {i}"),
                "headline": format!("Headline {i}")
            })
        })
        .collect();
    json!({ "concepts": entries }).to_string()
}

#[tokio::test]
async fn test_pitch_returns_the_generated_angles() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        // The route asks for a JSON object, so the hint must be on the wire.
        .and(body_string_contains("json_object"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_completion_body(&pitch_object(4))),
        )
        .expect(1)
        .mount(&mock)
        .await;

    let server = TestServer::new(build_router(test_state(&mock.uri()))).unwrap();
    let response = server
        .post("/api/generate-pitch")
        .json(&json!({ "prompt": "A streetwear brand inspired by retro gaming culture", "tone": "playful" }))
        .await;

    response.assert_status_ok();
    let body: PitchResponse = response.json();
    assert_eq!(body.concepts.len(), 4);
    assert!(body.error.is_none());
    for concept in &body.concepts {
        assert!(!concept.title.is_empty());
        assert!(!concept.description.is_empty());
        assert!(!concept.headline.is_empty());
    }
}

#[tokio::test]
async fn test_pitch_accepts_three_angles() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_completion_body(&pitch_object(3))),
        )
        .mount(&mock)
        .await;

    let server = TestServer::new(build_router(test_state(&mock.uri()))).unwrap();
    let response = server
        .post("/api/generate-pitch")
        .json(&json!({ "prompt": "lofi coffee brand" }))
        .await;

    response.assert_status_ok();
    let body: PitchResponse = response.json();
    assert_eq!(body.concepts.len(), 3);
    assert!(body.error.is_none());
}

#[tokio::test]
async fn test_blank_pitch_prompt_is_rejected_without_upstream_call() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock)
        .await;

    let server = TestServer::new(build_router(test_state(&mock.uri()))).unwrap();
    let response = server
        .post("/api/generate-pitch")
        .json(&json!({ "prompt": "   " }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pitch_failure_serves_fallback_batch() {
    let cases = vec![
        // Upstream rejects the call.
        None,
        // Upstream answers with an unusable count.
        Some(pitch_object(6)),
        // Upstream answers with prose only.
        Some("Let me think about pitch angles for a while.".to_string()),
    ];

    for case in cases {
        let mock = MockServer::start().await;
        let template = match &case {
            None => ResponseTemplate::new(500).set_body_string("boom"),
            Some(content) => {
                ResponseTemplate::new(200).set_body_json(chat_completion_body(content))
            }
        };
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(template)
            .mount(&mock)
            .await;

        let server = TestServer::new(build_router(test_state(&mock.uri()))).unwrap();
        let response = server
            .post("/api/generate-pitch")
            .json(&json!({ "prompt": "lofi coffee brand" }))
            .await;

        response.assert_status_ok();
        let body: PitchResponse = response.json();
        assert_eq!(body.concepts, *FALLBACK_PITCHES, "failed for: {case:?}");
        assert!(body.error.is_some(), "failed for: {case:?}");
    }
}
