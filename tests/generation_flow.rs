use std::sync::Arc;

use promptbox::apis::OpenAiClient;
use promptbox::controller::SessionController;
use promptbox::display::{self, Display};
use promptbox::session::{ResponseType, SessionEvent, SessionStatus};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn controller_for(server: &MockServer) -> SessionController {
    let client = reqwest::Client::new();
    let service = Arc::new(OpenAiClient::with_base_url(
        client,
        "test-key".into(),
        server.uri(),
    ));
    SessionController::new(service)
}

#[tokio::test]
async fn text_generation_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(serde_json::json!({
            "messages": [{"role": "user", "content": "cat"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"choices":[{"message":{"content":"a small orange cat"}}]}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = controller_for(&server);
    controller.handle(SessionEvent::PromptEdited("cat".into()));

    let status = controller.submit().await;
    assert_eq!(status, SessionStatus::Succeeded);
    assert_eq!(
        display::resolve(controller.state()),
        Display::Text("a small orange cat")
    );
}

#[tokio::test]
async fn image_generation_yields_a_loadable_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .and(body_partial_json(serde_json::json!({"prompt": "cat"})))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"data":[{"url":"https://example/cat.png"}]}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = controller_for(&server);
    controller.handle(SessionEvent::PromptEdited("cat".into()));
    controller.handle(SessionEvent::ResponseTypeSelected(ResponseType::Image));

    let status = controller.submit().await;
    assert_eq!(status, SessionStatus::Succeeded);
    assert_eq!(
        display::resolve(controller.state()),
        Display::Image("https://example/cat.png")
    );
}

#[tokio::test]
async fn api_error_message_reaches_the_user_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_raw(
            r#"{"error":{"message":"rate limited"}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let mut controller = controller_for(&server);
    controller.handle(SessionEvent::PromptEdited("cat".into()));

    let status = controller.submit().await;
    assert_eq!(status, SessionStatus::Failed);
    assert_eq!(
        display::resolve(controller.state()),
        Display::Error("rate limited")
    );
}

#[tokio::test]
async fn error_without_a_message_falls_back_to_the_status_line() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let mut controller = controller_for(&server);
    controller.handle(SessionEvent::PromptEdited("cat".into()));

    let status = controller.submit().await;
    assert_eq!(status, SessionStatus::Failed);
    let error = controller.state().error.as_deref().unwrap();
    assert!(error.contains("500"), "unexpected error message: {error}");
}

#[tokio::test]
async fn validation_failure_sends_nothing_over_the_wire() {
    let server = MockServer::start().await;
    // No mocks mounted: any request would 404 and the expect(0) below would
    // catch a stray call on drop.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut controller = controller_for(&server);
    controller.handle(SessionEvent::PromptEdited("   ".into()));

    let status = controller.submit().await;
    assert_eq!(status, SessionStatus::Failed);
    assert_eq!(
        display::resolve(controller.state()),
        Display::Error("Please enter a prompt.")
    );
}

#[tokio::test]
async fn resubmitting_after_a_failure_overwrites_the_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"choices":[{"message":{"content":"second try"}}]}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let mut controller = controller_for(&server);
    controller.handle(SessionEvent::PromptEdited("".into()));
    assert_eq!(controller.submit().await, SessionStatus::Failed);

    controller.handle(SessionEvent::PromptEdited("cat".into()));
    assert_eq!(controller.submit().await, SessionStatus::Succeeded);
    assert_eq!(controller.state().error, None);
    assert_eq!(controller.state().result.as_deref(), Some("second try"));
}
