//! End-to-end runs against a scripted registry and mocked HTTP endpoints

mod helper;

use std::sync::Arc;

use mockito::Server;
use tempfile::TempDir;

use helper::{ScriptedRegistry, capture_warnings, mod_list_body, mod_url};
use modwatch::config::AppConfig;
use modwatch::mods::aggregator::{SkipReason, aggregate};
use modwatch::mods::registries::ThunderstoreRegistry;
use modwatch::mods::resolver::ModUrlResolver;
use modwatch::mods::types::ModReference;
use modwatch::report::{PersistedRecord, read_results};
use modwatch::run::{Pipeline, RunOptions};

fn pipeline(registry: ScriptedRegistry, notify_url: Option<&str>) -> Pipeline {
    let mut config = AppConfig::default();
    if let Some(url) = notify_url {
        config.notify.api_url = url.to_string();
    }
    Pipeline::with_registry(config, reqwest::Client::new(), Arc::new(registry))
}

async fn serve_mod_list(server: &mut Server, mods: &[(&str, &str)]) -> mockito::Mock {
    serve_mod_list_times(server, mods, 1).await
}

async fn serve_mod_list_times(
    server: &mut Server,
    mods: &[(&str, &str)],
    hits: usize,
) -> mockito::Mock {
    server
        .mock("GET", "/mods.json")
        .expect(hits)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(mod_list_body(mods))
        .create_async()
        .await
}

fn options(server: &Server) -> RunOptions {
    RunOptions {
        mods_url: format!("{}/mods.json", server.url()),
        concurrency: 5,
        ..RunOptions::default()
    }
}

fn names(records: &[modwatch::mods::types::ModRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

#[tokio::test]
async fn malformed_url_and_timeout_leave_one_record_and_two_log_entries() {
    let (logs, _guard) = capture_warnings();
    let registry = ScriptedRegistry::new()
        .with_release("Good", "1.0.0", "2024-05-01T00:00:00Z")
        .with_timeout("Slow");
    let references = vec![
        ModReference::new("Broken", "https://thunderstore.io/c/repo/p/OnlyOwner/"),
        ModReference::new("Good", mod_url("Good")),
        ModReference::new("Slow", mod_url("Slow")),
    ];

    let result = aggregate(Arc::new(registry), &ModUrlResolver::new(), &references, 5).await;

    assert_eq!(names(&result.records), vec!["Good"]);
    assert_eq!(result.skipped.len(), 2);
    assert!(matches!(
        result.skipped[0].reason,
        SkipReason::InvalidReference(_)
    ));
    assert!(matches!(result.skipped[1].reason, SkipReason::Fetch(_)));

    let lines = logs.lines();
    assert_eq!(lines.len(), 2, "unexpected log lines: {:?}", lines);
    assert!(lines.iter().any(|l| l.contains("WARN") && l.contains("Broken")));
    assert!(lines.iter().any(|l| l.contains("ERROR") && l.contains("Slow")));
}

#[tokio::test]
async fn n_references_with_k_failures_yield_n_minus_k_records_newest_first() {
    let registry = ScriptedRegistry::new()
        .with_release("A", "1.0.0", "2024-01-01T00:00:00Z")
        .with_release("B", "1.0.0", "2024-03-01T00:00:00Z")
        .with_malformed("C")
        .with_release("D", "1.0.0", "2024-02-01T00:00:00Z")
        .with_timeout("E");
    let references: Vec<_> = ["A", "B", "C", "D", "E", "Unknown"]
        .into_iter()
        .map(|p| ModReference::new(p, mod_url(p)))
        .collect();

    let result = aggregate(Arc::new(registry), &ModUrlResolver::new(), &references, 2).await;

    assert_eq!(names(&result.records), vec!["B", "D", "A"]);
    assert_eq!(result.skipped.len(), 3);
}

#[tokio::test]
async fn prior_snapshot_with_same_version_reports_only_new_mod() {
    let mut server = Server::new_async().await;
    let list = serve_mod_list(
        &mut server,
        &[("ModA", mod_url("ModA").as_str()), ("ModB", mod_url("ModB").as_str())],
    )
    .await;
    let temp_dir = TempDir::new().unwrap();
    let snapshot_path = temp_dir.path().join("prior.json");
    std::fs::write(&snapshot_path, r#"[{"name": "ModA", "version": "1.0.0"}]"#).unwrap();

    let registry = ScriptedRegistry::new()
        .with_release("ModA", "1.0.0", "2024-01-01T00:00:00Z")
        .with_release("ModB", "2.0.0", "2024-02-01T00:00:00Z");
    let run_options = RunOptions {
        snapshot: Some(snapshot_path.display().to_string()),
        ..options(&server)
    };

    let summary = pipeline(registry, None).run(&run_options).await.unwrap();

    list.assert_async().await;
    assert_eq!(summary.updates.iter().collect::<Vec<_>>(), vec!["ModB"]);
    assert_eq!(summary.total, 2);
}

#[tokio::test]
async fn unreachable_snapshot_reports_every_mod_as_updated() {
    let mut server = Server::new_async().await;
    let list = serve_mod_list(
        &mut server,
        &[
            ("ModA", mod_url("ModA").as_str()),
            ("ModB", mod_url("ModB").as_str()),
            ("ModC", mod_url("ModC").as_str()),
        ],
    )
    .await;
    let snapshot = server
        .mock("GET", "/prior.json")
        .with_status(503)
        .create_async()
        .await;

    let registry = ScriptedRegistry::new()
        .with_release("ModA", "1.0.0", "2024-03-01T00:00:00Z")
        .with_release("ModB", "2.0.0", "2024-02-01T00:00:00Z")
        .with_release("ModC", "3.0.0", "2024-01-01T00:00:00Z");
    let run_options = RunOptions {
        snapshot: Some(format!("{}/prior.json", server.url())),
        ..options(&server)
    };

    let summary = pipeline(registry, None).run(&run_options).await.unwrap();

    list.assert_async().await;
    snapshot.assert_async().await;
    assert_eq!(
        summary.updates.iter().collect::<Vec<_>>(),
        vec!["ModA", "ModB", "ModC"]
    );
}

#[tokio::test]
async fn unreachable_mod_list_fails_the_run() {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", "/mods.json")
        .with_status(500)
        .create_async()
        .await;

    let result = pipeline(ScriptedRegistry::new(), None)
        .run(&options(&server))
        .await;

    list.assert_async().await;
    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("Error fetching mod list"));
}

#[tokio::test]
async fn saved_output_round_trips_and_serves_as_next_snapshot() {
    let mut server = Server::new_async().await;
    let list = serve_mod_list_times(
        &mut server,
        &[("ModA", mod_url("ModA").as_str()), ("ModB", mod_url("ModB").as_str())],
        2,
    )
    .await;
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("results.json");

    let registry = || {
        ScriptedRegistry::new()
            .with_release("ModA", "1.0.0", "2024-01-01T00:00:00Z")
            .with_release("ModB", "2.0.0", "2024-02-01T00:00:00Z")
    };
    let first_options = RunOptions {
        output: Some(output.clone()),
        ..options(&server)
    };

    let first = pipeline(registry(), None).run(&first_options).await.unwrap();

    let saved = read_results(&output).unwrap();
    let expected: Vec<PersistedRecord> =
        first.records().iter().map(PersistedRecord::from).collect();
    assert_eq!(saved, expected);
    assert_eq!(saved[0].date_updated, "2024-02-01, 00:00:00");
    assert!(!std::fs::read_to_string(&output).unwrap().contains("raw_date"));

    let second_options = RunOptions {
        snapshot: Some(output.display().to_string()),
        ..options(&server)
    };
    let second = pipeline(registry(), None).run(&second_options).await.unwrap();

    list.assert_async().await;
    assert!(second.updates.is_empty());
}

#[tokio::test]
async fn notification_lists_updated_mods() {
    let mut server = Server::new_async().await;
    let list = serve_mod_list(&mut server, &[("ModA", mod_url("ModA").as_str())]).await;
    let telegram = server
        .mock("POST", "/bottoken/sendMessage")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "chat_id": "100",
            "text": "Updated 1 of 1 mods. Received 1 of 1 mods from Thunderstore.\n- ModA 1.0.0 (2024-01-01, 00:00:00)"
        })))
        .with_status(200)
        .with_body(r#"{"ok": true}"#)
        .create_async()
        .await;

    let registry =
        ScriptedRegistry::new().with_release("ModA", "1.0.0", "2024-01-01T00:00:00Z");
    let run_options = RunOptions {
        send_notification: true,
        telegram_token: Some("token".to_string()),
        telegram_chat_id: Some("100".to_string()),
        ..options(&server)
    };

    pipeline(registry, Some(&server.url()))
        .run(&run_options)
        .await
        .unwrap();

    list.assert_async().await;
    telegram.assert_async().await;
}

#[tokio::test]
async fn missing_credentials_skip_notification_without_failing() {
    let mut server = Server::new_async().await;
    let list = serve_mod_list(&mut server, &[("ModA", mod_url("ModA").as_str())]).await;
    let telegram = server
        .mock("POST", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let registry =
        ScriptedRegistry::new().with_release("ModA", "1.0.0", "2024-01-01T00:00:00Z");
    let run_options = RunOptions {
        send_notification: true,
        telegram_chat_id: Some("100".to_string()),
        ..options(&server)
    };

    let summary = pipeline(registry, Some(&server.url()))
        .run(&run_options)
        .await
        .unwrap();

    list.assert_async().await;
    telegram.assert_async().await;
    assert_eq!(summary.records().len(), 1);
}

#[tokio::test]
async fn failed_delivery_does_not_fail_the_run() {
    let mut server = Server::new_async().await;
    let list = serve_mod_list(&mut server, &[("ModA", mod_url("ModA").as_str())]).await;
    let telegram = server
        .mock("POST", "/bottoken/sendMessage")
        .with_status(500)
        .create_async()
        .await;

    let registry =
        ScriptedRegistry::new().with_release("ModA", "1.0.0", "2024-01-01T00:00:00Z");
    let run_options = RunOptions {
        send_notification: true,
        telegram_token: Some("token".to_string()),
        telegram_chat_id: Some("100".to_string()),
        ..options(&server)
    };

    let result = pipeline(registry, Some(&server.url())).run(&run_options).await;

    list.assert_async().await;
    telegram.assert_async().await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn thunderstore_failures_log_one_line_each() {
    let mut server = Server::new_async().await;
    let down = server
        .mock("GET", "/package/Owner/Down/")
        .with_status(503)
        .create_async()
        .await;
    let garbled = server
        .mock("GET", "/package/Owner/Garbled/")
        .with_status(200)
        .with_body(r#"{"unexpected": true}"#)
        .create_async()
        .await;
    let registry = ThunderstoreRegistry::new(
        reqwest::Client::new(),
        &server.url(),
        "https://thunderstore.io",
    );
    let references = vec![
        ModReference::new("Down", mod_url("Down")),
        ModReference::new("Garbled", mod_url("Garbled")),
    ];

    let (logs, _guard) = capture_warnings();
    let result = aggregate(Arc::new(registry), &ModUrlResolver::new(), &references, 2).await;

    down.assert_async().await;
    garbled.assert_async().await;
    assert!(result.records.is_empty());
    assert_eq!(result.skipped.len(), 2);
    let lines = logs.lines();
    assert_eq!(lines.len(), 2, "unexpected log lines: {:?}", lines);
    assert!(lines.iter().any(|l| l.contains("ERROR") && l.contains("Down")));
    assert!(lines.iter().any(|l| l.contains("ERROR") && l.contains("Garbled")));
}

#[tokio::test]
async fn null_url_entry_is_skipped_without_failing_the_run() {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", "/mods.json")
        .with_status(200)
        .with_body(format!(
            r#"{{"repo_mods": [{{"name": "Bad", "url": null}}, {{"name": "Good", "url": "{}"}}]}}"#,
            mod_url("Good")
        ))
        .create_async()
        .await;
    let registry =
        ScriptedRegistry::new().with_release("Good", "1.0.0", "2024-01-01T00:00:00Z");

    let summary = pipeline(registry, None)
        .run(&options(&server))
        .await
        .unwrap();

    list.assert_async().await;
    assert_eq!(summary.total, 2);
    assert_eq!(names(summary.records()), vec!["Good"]);
    assert_eq!(summary.aggregation.skipped.len(), 1);
    assert_eq!(summary.aggregation.skipped[0].name, "Bad");
    assert!(matches!(
        summary.aggregation.skipped[0].reason,
        SkipReason::InvalidReference(_)
    ));
}

#[tokio::test]
async fn collected_results_survive_a_failed_output_write() {
    let mut server = Server::new_async().await;
    let list = serve_mod_list(&mut server, &[("ModA", mod_url("ModA").as_str())]).await;
    let temp_dir = TempDir::new().unwrap();
    let registry =
        ScriptedRegistry::new().with_release("ModA", "1.0.0", "2024-01-01T00:00:00Z");
    let run_options = RunOptions {
        output: Some(temp_dir.path().join("missing-dir").join("results.json")),
        ..options(&server)
    };
    let pipeline = pipeline(registry, None);

    let summary = pipeline.collect(&run_options).await.unwrap();
    let reported = pipeline.report(&summary, &run_options).await;

    list.assert_async().await;
    assert_eq!(names(summary.records()), vec!["ModA"]);
    let err = reported.unwrap_err();
    assert!(format!("{:#}", err).contains("Error saving results"));
}
