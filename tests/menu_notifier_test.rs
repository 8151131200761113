use anyhow::Result;
use httpmock::prelude::*;
use std::time::Duration;
use tempfile::TempDir;
use watchbot::adapters::SlackWebhookSink;
use watchbot::app::pipelines::MenuDay;
use watchbot::config::MenuConfig;
use watchbot::core::menu::MissingMenuPolicy;
use watchbot::{MenuNotifier, RunEngine};

const MENU_FILE: &str = r#"{
    "2024-06-10": {
        "tarih": "10.06.2024 Pazartesi",
        "corbalar": ["Mercimek Çorbası"],
        "ana_yemekler": ["Tavuk Sote", "Etli Nohut"],
        "yan_yemekler": ["Pirinç Pilavı"],
        "salatalar": [],
        "tatlilar": [],
        "kalori": "920 kcal"
    },
    "2024-06-17": {
        "tarih": "17.06.2024",
        "ozel_durum": "Kurban Bayramı - yemekhane kapalı"
    }
}"#;

fn menu_config(dir: &TempDir, date: &str, on_missing: MissingMenuPolicy) -> MenuConfig {
    let missing = dir.path().join("data").join("yemek_menusu.json");
    let present = dir.path().join("yemek_menusu.json");
    MenuConfig {
        data_paths: vec![
            missing.to_str().unwrap().to_string(),
            present.to_str().unwrap().to_string(),
        ],
        date: Some(date.parse().unwrap()),
        on_missing,
        ..Default::default()
    }
}

async fn run(
    server: &MockServer,
    config: MenuConfig,
) -> Result<watchbot::app::pipelines::MenuReport> {
    let sink = SlackWebhookSink::new(server.url("/hook"), Duration::from_secs(5))?;
    Ok(RunEngine::new(MenuNotifier::new(sink, config)).run().await?)
}

#[tokio::test]
async fn test_full_menu_is_posted_as_blocks() -> Result<()> {
    let dir = TempDir::new()?;
    tokio::fs::write(dir.path().join("yemek_menusu.json"), MENU_FILE).await?;

    let server = MockServer::start();
    let hook = server.mock(|when, then| {
        when.method(POST)
            .path("/hook")
            .body_contains("\"channel\":\"#ogle-yemegi\"")
            .body_contains("blocks")
            .body_contains("Tavuk Sote")
            .body_contains("Kalori");
        then.status(200).body("ok");
    });

    let report = run(&server, menu_config(&dir, "2024-06-10", MissingMenuPolicy::SendFallback)).await?;

    hook.assert();
    assert_eq!(report.day, MenuDay::FullMenu);
    assert_eq!(report.delivered, Some(true));
    Ok(())
}

#[tokio::test]
async fn test_special_notice_is_posted_as_text() -> Result<()> {
    let dir = TempDir::new()?;
    tokio::fs::write(dir.path().join("yemek_menusu.json"), MENU_FILE).await?;

    let server = MockServer::start();
    let hook = server.mock(|when, then| {
        when.method(POST)
            .path("/hook")
            .body_contains("Kurban Bayram");
        then.status(200);
    });

    let report = run(&server, menu_config(&dir, "2024-06-17", MissingMenuPolicy::SendFallback)).await?;

    hook.assert();
    assert_eq!(report.day, MenuDay::Notice);
    Ok(())
}

#[tokio::test]
async fn test_weekend_and_weekday_fallbacks() -> Result<()> {
    let dir = TempDir::new()?;
    tokio::fs::write(dir.path().join("yemek_menusu.json"), MENU_FILE).await?;

    let server = MockServer::start();
    let no_service = server.mock(|when, then| {
        when.method(POST).path("/hook").body_contains("Yemek Servisi Yok");
        then.status(200);
    });
    let no_data = server.mock(|when, then| {
        when.method(POST).path("/hook").body_contains("Menü Bilgisi Bulunamadı");
        then.status(200);
    });

    // Saturday, then Tuesday
    let saturday = run(&server, menu_config(&dir, "2024-06-15", MissingMenuPolicy::SendFallback)).await?;
    let tuesday = run(&server, menu_config(&dir, "2024-06-11", MissingMenuPolicy::SendFallback)).await?;

    no_service.assert();
    no_data.assert();
    assert_eq!(saturday.day, MenuDay::Weekend);
    assert_eq!(tuesday.day, MenuDay::Missing);
    Ok(())
}

#[tokio::test]
async fn test_silent_policy_posts_nothing_when_missing() -> Result<()> {
    let dir = TempDir::new()?;

    let server = MockServer::start();
    let hook = server.mock(|when, then| {
        when.method(POST).path("/hook");
        then.status(200);
    });

    // no menu file at all: an empty table, not an error
    let report = run(&server, menu_config(&dir, "2024-06-11", MissingMenuPolicy::Silent)).await?;

    hook.assert_hits(0);
    assert_eq!(report.day, MenuDay::Missing);
    assert_eq!(report.delivered, None);
    assert!(!report.delivery_failed());
    Ok(())
}

#[tokio::test]
async fn test_rejected_webhook_is_reported() -> Result<()> {
    let dir = TempDir::new()?;
    tokio::fs::write(dir.path().join("yemek_menusu.json"), MENU_FILE).await?;

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/hook");
        then.status(403).body("invalid_token");
    });

    let report = run(&server, menu_config(&dir, "2024-06-10", MissingMenuPolicy::SendFallback)).await?;

    assert!(report.delivery_failed());
    Ok(())
}
