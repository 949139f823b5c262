//! End-to-end catalog behavior against a mock session manager: capture
//! flows, URL construction, and the one-close-per-acquisition discipline.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use saflix_common::SaflixError;
use saflix_scrape::browser::{Session, SessionManager};
use saflix_scrape::catalog::Catalog;
use url::Url;

#[derive(Default)]
struct Counters {
    acquired: AtomicUsize,
    closed: AtomicUsize,
    navigations: Mutex<Vec<String>>,
}

#[derive(Clone, Copy, PartialEq)]
enum NavigationMode {
    Succeed,
    Fail,
    Hang,
}

struct MockManager {
    html: String,
    mode: NavigationMode,
    counters: Arc<Counters>,
}

impl MockManager {
    fn new(html: &str, mode: NavigationMode) -> (Arc<Self>, Arc<Counters>) {
        let counters = Arc::new(Counters::default());
        let manager = Arc::new(Self {
            html: html.to_string(),
            mode,
            counters: counters.clone(),
        });
        (manager, counters)
    }
}

#[async_trait]
impl SessionManager for MockManager {
    async fn acquire(&self) -> Result<Box<dyn Session>> {
        self.counters.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockSession {
            html: self.html.clone(),
            mode: self.mode,
            counters: self.counters.clone(),
            location: String::new(),
        }))
    }
}

struct MockSession {
    html: String,
    mode: NavigationMode,
    counters: Arc<Counters>,
    location: String,
}

#[async_trait]
impl Session for MockSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.counters
            .navigations
            .lock()
            .unwrap()
            .push(url.to_string());
        match self.mode {
            NavigationMode::Succeed => {
                self.location = url.to_string();
                Ok(())
            }
            NavigationMode::Fail => anyhow::bail!("net::ERR_NAME_NOT_RESOLVED"),
            NavigationMode::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                unreachable!("hung navigation should be cut off by the timeout")
            }
        }
    }

    async fn content(&self) -> Result<String> {
        Ok(self.html.clone())
    }

    async fn resolved_url(&self) -> Result<String> {
        Ok(self.location.clone())
    }

    async fn close(&mut self) -> Result<()> {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn catalog(manager: Arc<MockManager>, timeout_secs: u64) -> Catalog {
    Catalog::new(
        manager,
        Url::parse("https://www.4khotvideo.com/").unwrap(),
        timeout_secs,
    )
}

fn listing_html(cards: usize) -> String {
    let body: String = (0..cards)
        .map(|i| {
            format!(
                r#"<article><a href="/m/{i}"><img src="/t/{i}.jpg"><h2>Movie {i}</h2></a></article>"#
            )
        })
        .collect();
    format!("<html><body>{body}</body></html>")
}

#[tokio::test]
async fn home_caps_items_and_closes_the_session_once() {
    let (manager, counters) = MockManager::new(&listing_html(25), NavigationMode::Succeed);
    let items = catalog(manager, 30).home().await.unwrap();

    assert_eq!(items.len(), 20);
    assert!(items.iter().all(|i| !i.title.is_empty() && !i.url.is_empty()));
    assert_eq!(counters.acquired.load(Ordering::SeqCst), 1);
    assert_eq!(counters.closed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn search_navigates_to_encoded_query_target() {
    let (manager, counters) = MockManager::new(&listing_html(3), NavigationMode::Succeed);
    let items = catalog(manager, 30).search("the matrix").await.unwrap();

    assert_eq!(items.len(), 3);
    let navigations = counters.navigations.lock().unwrap();
    assert_eq!(navigations.len(), 1);
    assert_eq!(navigations[0], "https://www.4khotvideo.com/?s=the%20matrix");
}

#[tokio::test]
async fn navigation_failure_is_fatal_but_still_closes() {
    let (manager, counters) = MockManager::new("<html></html>", NavigationMode::Fail);
    let err = catalog(manager, 30).home().await.unwrap_err();

    assert!(matches!(err, SaflixError::Driver(_)));
    assert_eq!(counters.acquired.load(Ordering::SeqCst), 1);
    assert_eq!(counters.closed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn hung_navigation_hits_the_timeout_and_still_closes() {
    let (manager, counters) = MockManager::new("<html></html>", NavigationMode::Hang);
    let err = catalog(manager, 0).home().await.unwrap_err();

    assert!(matches!(err, SaflixError::NavigationTimeout(0)));
    assert_eq!(counters.closed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn stream_resolves_iframe_embeds() {
    let html = r#"<html><body><h1>Embedded Film</h1>
        <iframe src="https://embed.example/x"></iframe></body></html>"#;
    let (manager, counters) = MockManager::new(html, NavigationMode::Succeed);
    let descriptor = catalog(manager, 30)
        .stream("https://www.4khotvideo.com/m/42")
        .await
        .unwrap();

    assert_eq!(descriptor.stream_url.as_deref(), Some("https://embed.example/x"));
    assert_eq!(descriptor.title, "Embedded Film");
    assert_eq!(descriptor.page_url, "https://www.4khotvideo.com/m/42");
    assert_eq!(counters.closed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn stream_without_any_embed_is_still_a_success() {
    let html = "<html><body><p>gone</p></body></html>";
    let (manager, counters) = MockManager::new(html, NavigationMode::Succeed);
    let descriptor = catalog(manager, 30)
        .stream("https://www.4khotvideo.com/m/404")
        .await
        .unwrap();

    assert_eq!(descriptor.stream_url, None);
    assert_eq!(descriptor.title, "Unknown Title");
    assert_eq!(counters.closed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn malformed_stream_url_never_touches_the_browser() {
    let (manager, counters) = MockManager::new("<html></html>", NavigationMode::Succeed);
    let err = catalog(manager, 30).stream("not-a-url").await.unwrap_err();

    assert!(matches!(err, SaflixError::InvalidRequest(_)));
    assert_eq!(counters.acquired.load(Ordering::SeqCst), 0);
}
