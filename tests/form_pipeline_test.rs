use async_trait::async_trait;
use folio::app::server::{router, AppState};
use folio::core::relay::{relay_from_config, ScriptRelay};
use folio::domain::model::{ContactRow, FailureReason, FormField, SubmissionOutcome, SubmissionState};
use folio::domain::ports::SheetSink;
use folio::utils::validation::Validate;
use folio::{ContactForm, RelayConfig, RelayMode};
use httpmock::prelude::*;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;

fn fill<R: folio::core::Relay>(form: &ContactForm<R>) {
    form.set_field(FormField::Name, "Grace");
    form.set_field(FormField::Email, "grace@navy.mil");
    form.set_field(FormField::Message, "Found a moth in the relay.");
}

#[derive(Default)]
struct RecordingSheet {
    rows: Mutex<Vec<ContactRow>>,
}

#[async_trait]
impl SheetSink for RecordingSheet {
    async fn append_row(&self, row: ContactRow) -> folio::Result<()> {
        self.rows.lock().await.push(row);
        Ok(())
    }
}

#[tokio::test]
async fn test_script_relay_round_trip() {
    let server = MockServer::start();
    let script = server.mock(|when, then| {
        when.method(POST)
            .path("/macros/exec")
            .body_contains("name=Grace")
            .body_contains("email=grace%40navy.mil")
            .body_contains("message=Found+a+moth+in+the+relay.")
            .body_contains("timestamp=");
        // opaque 模式下看不到錯誤頁
        then.status(404);
    });

    let form = ContactForm::new(ScriptRelay::new(server.url("/macros/exec")));
    fill(&form);

    assert_eq!(form.submit().await, SubmissionOutcome::Sent);
    assert!(form.input().is_empty());
    assert_eq!(form.state(), SubmissionState::Submitted);
    script.assert();
}

#[tokio::test]
async fn test_slow_relay_fails_with_timeout() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/slow");
        then.status(200).delay(Duration::from_secs(3));
    });

    let form = ContactForm::with_timeout(
        ScriptRelay::new(server.url("/slow")),
        Duration::from_millis(200),
    );
    fill(&form);

    assert_eq!(
        form.submit().await,
        SubmissionOutcome::Failed(FailureReason::Timeout)
    );
    assert_eq!(form.input().name, "Grace");
    assert!(form.failure_notice().is_some());

    assert!(form.reset());
    assert_eq!(form.state(), SubmissionState::Idle);
    // reset 後輸入保留，可直接重送
    assert_eq!(form.input().email, "grace@navy.mil");
}

#[tokio::test]
async fn test_abandoned_submit_does_not_wedge_form() {
    let server = MockServer::start();
    let slow = server.mock(|when, then| {
        when.method(POST).path("/slow");
        then.status(200).delay(Duration::from_secs(2));
    });

    let form = ContactForm::with_timeout(
        ScriptRelay::new(server.url("/slow")),
        Duration::from_millis(300),
    );
    fill(&form);

    let abandoned = tokio::time::timeout(Duration::from_millis(100), form.submit()).await;
    assert!(abandoned.is_err());
    assert_eq!(form.state(), SubmissionState::Idle);
    assert!(!form.reset());

    // 表單仍可再次送出，而不是回傳 Busy
    assert_eq!(
        form.submit().await,
        SubmissionOutcome::Failed(FailureReason::Timeout)
    );
    assert_eq!(form.input().message, "Found a moth in the relay.");
    slow.assert_hits(2);
}

#[tokio::test]
async fn test_backend_mode_reaches_relay_service() {
    let sheet = Arc::new(RecordingSheet::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(AppState::new(sheet.clone()));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[relay]
mode = "backend"
endpoint = "http://{}/api/contact"
timeout_seconds = 5
"#,
        addr
    )
    .unwrap();

    let config = RelayConfig::from_file(file.path()).unwrap();
    tokio_test::assert_ok!(config.validate());
    assert_eq!(config.mode, RelayMode::Backend);

    let form = ContactForm::with_timeout(relay_from_config(&config), config.timeout());
    fill(&form);
    assert_eq!(form.submit().await, SubmissionOutcome::Sent);

    let rows = sheet.rows.lock().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Grace");
    assert_eq!(rows[0].message, "Found a moth in the relay.");
}

#[tokio::test]
async fn test_backend_error_is_visible_in_transparent_mode() {
    let server = MockServer::start();
    let backend = server.mock(|when, then| {
        when.method(POST).path("/api/contact");
        then.status(500)
            .json_body(serde_json::json!({"error": "Failed to save data"}));
    });

    let config = RelayConfig::new(RelayMode::Backend, server.url("/api/contact"));
    let form = ContactForm::new(relay_from_config(&config));
    fill(&form);

    match form.submit().await {
        SubmissionOutcome::Failed(FailureReason::Transport(reason)) => {
            assert!(reason.contains("Failed to save data"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(form.input().name, "Grace");
    backend.assert();
}

#[tokio::test]
async fn test_invalid_form_never_reaches_relay() {
    let server = MockServer::start();
    let script = server.mock(|when, then| {
        when.method(POST).path("/exec");
        then.status(200);
    });

    let form = ContactForm::new(ScriptRelay::new(server.url("/exec")));
    form.set_field(FormField::Name, "Bob");
    form.set_field(FormField::Email, "not-an-email");
    form.set_field(FormField::Message, "hi");

    match form.submit().await {
        SubmissionOutcome::Invalid(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.get(FormField::Email), Some("Email is invalid"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(form.state(), SubmissionState::Idle);
    script.assert_hits(0);
}
