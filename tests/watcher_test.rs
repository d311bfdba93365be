//! End-to-end poll cycle tests with mocked API and Telegram servers
//!
//! Each test drives `run_once` directly instead of `run`, so no real
//! sleeping is involved.

use std::time::Duration;

use statuswatch::api::StatusClient;
use statuswatch::notifier::TelegramNotifier;
use statuswatch::watcher::{CycleOutcome, Watcher, WatcherState};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const APPROVED_MESSAGE: &str = "Изменился статус проверки работы \"project1\". \
                                Работа проверена: ревьюеру всё понравилось. Ура!";

async fn telegram_expecting(times: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/botbot-token/sendMessage"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"ok": true, "result": {}})),
        )
        .expect(times)
        .mount(&server)
        .await;
    server
}

fn watcher_for(api: &MockServer, telegram: &MockServer, from_date: i64) -> Watcher {
    let client = StatusClient::with_base_url(&api.uri(), "api-token").unwrap();
    let notifier = TelegramNotifier::with_base_url(
        &telegram.uri(),
        "bot-token",
        "4242",
        Duration::from_secs(5),
    )
    .unwrap();
    Watcher::with_state(
        client,
        notifier,
        Duration::from_secs(600),
        WatcherState::starting_at(from_date),
    )
}

/// Test a status change is notified exactly once across two cycles
#[tokio::test]
async fn test_status_change_notified_once() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user_api/homework_statuses/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "homeworks": [{"homework_name": "project1", "status": "approved"}],
            "current_date": 1000
        })))
        .mount(&api)
        .await;
    let telegram = telegram_expecting(1).await;

    let mut watcher = watcher_for(&api, &telegram, 0);

    let first = watcher.run_once().await;
    assert_eq!(first, CycleOutcome::Notified(APPROVED_MESSAGE.to_string()));

    // Same payload again: message identical to the previous cycle
    let second = watcher.run_once().await;
    assert_eq!(second, CycleOutcome::Unchanged);
}

/// Test the notification carries the exact formatted sentence
#[tokio::test]
async fn test_notification_text() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user_api/homework_statuses/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "homeworks": [{"homework_name": "project1", "status": "approved"}],
            "current_date": 1000
        })))
        .mount(&api)
        .await;

    let telegram = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/botbot-token/sendMessage"))
        .and(body_partial_json(serde_json::json!({
            "chat_id": "4242",
            "text": APPROVED_MESSAGE
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"ok": true, "result": {}})),
        )
        .expect(1)
        .mount(&telegram)
        .await;

    let mut watcher = watcher_for(&api, &telegram, 0);
    watcher.run_once().await;
}

/// Test an empty homework list produces no notification
#[tokio::test]
async fn test_empty_list_is_noop() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user_api/homework_statuses/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"homeworks": [], "current_date": 1000})),
        )
        .mount(&api)
        .await;
    let telegram = telegram_expecting(0).await;

    let mut watcher = watcher_for(&api, &telegram, 0);
    let outcome = watcher.run_once().await;

    assert_eq!(outcome, CycleOutcome::NoNews);
}

/// Test a malformed payload is reported once and suppressed on repeat
#[tokio::test]
async fn test_shape_error_reported_once() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user_api/homework_statuses/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&api)
        .await;
    let telegram = telegram_expecting(1).await;

    let mut watcher = watcher_for(&api, &telegram, 0);

    let first = watcher.run_once().await;
    match &first {
        CycleOutcome::Failed(message) => {
            assert!(message.starts_with("Сбой в работе программы: "));
            assert!(message.contains("homeworks"));
        }
        other => panic!("expected a failed cycle, got {other:?}"),
    }

    // Identical failure next cycle: logged but not re-sent
    let second = watcher.run_once().await;
    assert_eq!(second, first);
}

/// Test a non-200 API response becomes a failure notification
#[tokio::test]
async fn test_remote_status_error_notified() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user_api/homework_statuses/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&api)
        .await;
    let telegram = telegram_expecting(1).await;

    let mut watcher = watcher_for(&api, &telegram, 0);

    let outcome = watcher.run_once().await;
    match outcome {
        CycleOutcome::Failed(message) => {
            assert!(message.contains("503"));
        }
        other => panic!("expected a failed cycle, got {other:?}"),
    }
}

/// Test from_date advances to current_date after a successful cycle
#[tokio::test]
async fn test_from_date_advances() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user_api/homework_statuses/"))
        .and(query_param("from_date", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"homeworks": [], "current_date": 1000})),
        )
        .expect(1)
        .mount(&api)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/user_api/homework_statuses/"))
        .and(query_param("from_date", "1000"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"homeworks": [], "current_date": 2000})),
        )
        .expect(1)
        .mount(&api)
        .await;
    let telegram = telegram_expecting(0).await;

    let mut watcher = watcher_for(&api, &telegram, 0);

    watcher.run_once().await;
    assert_eq!(watcher.state().from_date, 1000);

    watcher.run_once().await;
    assert_eq!(watcher.state().from_date, 2000);
}

/// Test from_date does not advance when the cycle fails
#[tokio::test]
async fn test_from_date_frozen_on_failure() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user_api/homework_statuses/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "homeworks": [{"status": "approved"}],
                "current_date": 1000
            })),
        )
        .mount(&api)
        .await;
    let telegram = telegram_expecting(1).await;

    let mut watcher = watcher_for(&api, &telegram, 123);

    let outcome = watcher.run_once().await;
    assert!(matches!(outcome, CycleOutcome::Failed(_)));
    // Parse failed, so the record must be re-fetched from the same point
    assert_eq!(watcher.state().from_date, 123);
}

/// Test a rejected-then-approved sequence notifies on each change
#[tokio::test]
async fn test_two_distinct_statuses_two_notifications() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user_api/homework_statuses/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "homeworks": [{"homework_name": "project1", "status": "rejected"}],
            "current_date": 1000
        })))
        .up_to_n_times(1)
        .mount(&api)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/user_api/homework_statuses/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "homeworks": [{"homework_name": "project1", "status": "approved"}],
            "current_date": 2000
        })))
        .mount(&api)
        .await;
    let telegram = telegram_expecting(2).await;

    let mut watcher = watcher_for(&api, &telegram, 0);

    let first = watcher.run_once().await;
    assert!(matches!(first, CycleOutcome::Notified(_)));

    let second = watcher.run_once().await;
    assert_eq!(second, CycleOutcome::Notified(APPROVED_MESSAGE.to_string()));
}

/// Test a failure notification that cannot be delivered still leaves
/// the loop in a consistent state (delivery is best-effort)
#[tokio::test]
async fn test_notification_failure_does_not_break_cycle() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user_api/homework_statuses/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "homeworks": [{"homework_name": "project1", "status": "approved"}],
            "current_date": 1000
        })))
        .mount(&api)
        .await;

    let telegram = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/botbot-token/sendMessage"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&telegram)
        .await;

    let mut watcher = watcher_for(&api, &telegram, 0);

    // Delivery fails, but the cycle itself reports the status change
    let outcome = watcher.run_once().await;
    assert!(matches!(outcome, CycleOutcome::Notified(_)));
    assert_eq!(watcher.state().from_date, 1000);
}
