//! HTTP-level tests against a live server on a local port.

use std::sync::Arc;
use std::time::Duration;

use notes_worker::app::build_pipeline;
use notes_worker::config::AppConfig;
use notes_worker::store::{DataStore, MemoryStore};

mod common;

async fn start_app(config: AppConfig) -> (String, notes_worker::Shutdown) {
    let store: Arc<dyn DataStore> = Arc::new(MemoryStore::with_initial_schema());
    let pipeline = Arc::new(build_pipeline(&config, store));
    let (addr, shutdown) = common::start_server(config, pipeline).await;
    (format!("http://{}", addr), shutdown)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_public_pages_and_not_found() {
    let (base, shutdown) = start_app(AppConfig::default()).await;
    let client = client();

    let res = client.get(format!("{base}/ping")).send().await.expect("server unreachable");
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    let body = res.text().await.unwrap();
    assert!(body.contains("<p>Pong (public)</p>"));
    assert!(body.contains(r#"<a href="/notes">Notes</a>"#));

    let res = client.get(format!("{base}/missing")).send().await.unwrap();
    assert_eq!(res.status(), 404);

    let res = client.get(format!("{base}/me")).send().await.unwrap();
    assert_eq!(res.status(), 401);
    assert_eq!(res.text().await.unwrap(), "Unauthorized");

    shutdown.trigger();
}

#[tokio::test]
async fn test_seeded_user_can_post_and_list_notes() {
    let (base, shutdown) = start_app(AppConfig::default()).await;
    let client = client();

    // First request opens the gate; seeding finishes in the background.
    let res = client.get(format!("{base}/")).send().await.unwrap();
    assert_eq!(res.status(), 200);

    let mut status = 0;
    for _ in 0..40 {
        let res = client
            .get(format!("{base}/me"))
            .header("Cookie", "session=u_123")
            .send()
            .await
            .unwrap();
        status = res.status().as_u16();
        if status == 200 {
            assert!(res.text().await.unwrap().contains("Hello John user page"));
            break;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    assert_eq!(status, 200, "seed users never became visible");

    let res = client
        .post(format!("{base}/notes"))
        .header("Cookie", "session=u_123")
        .form(&[("title", "Groceries"), ("content", "milk & eggs")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.text().await.unwrap().contains("<strong>Groceries</strong>: milk &amp; eggs"));

    let res = client
        .get(format!("{base}/notes"))
        .header("Cookie", "session=u_456")
        .send()
        .await
        .unwrap();
    let body = res.text().await.unwrap();
    assert!(body.contains("No notes yet."));
    assert!(!body.contains("Groceries"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_fallback_session_user() {
    let mut config = AppConfig::default();
    config.session.fallback_user_id = Some("u_789".into());
    let (base, shutdown) = start_app(config).await;
    let client = client();

    let mut body = String::new();
    for _ in 0..40 {
        let res = client.get(format!("{base}/me")).send().await.unwrap();
        if res.status() == 200 {
            body = res.text().await.unwrap();
            break;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    assert!(body.contains("Hello Thandi user page"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let mut config = AppConfig::default();
    config.listener.max_body_bytes = 16;
    let (base, shutdown) = start_app(config).await;

    let res = client()
        .post(format!("{base}/notes"))
        .form(&[("title", "this title is far too long for the limit")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 413);

    shutdown.trigger();
}
