use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

/// A date the stub site pretends has no strip yet: its page links to the
/// following day, the way the real site redirects to the nearest strip.
const MISSING_STRIP_DATE: &str = "2005-01-01";

const GIF_BYTES: &[u8] = b"GIF89a\x01\x00\x01\x00\x80\x00\x00\x00\x00\x00\xff\xff\xff;";

#[derive(Debug, Deserialize)]
struct ComicResponse {
    date: String,
    caption: String,
    image: String,
    source_url: String,
    cached: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    kind: String,
}

// ---- stub comic site ------------------------------------------------------

#[derive(Clone)]
struct StubState {
    host: String,
    hits: Arc<StdMutex<HashMap<String, u64>>>,
}

impl StubState {
    fn record(&self, path: String) {
        let mut hits = self.hits.lock().unwrap();
        *hits.entry(path).or_insert(0) += 1;
    }
}

struct StubSite {
    base_url: String,
    host: String,
    hits: Arc<StdMutex<HashMap<String, u64>>>,
}

impl StubSite {
    fn hits_for(&self, path: &str) -> u64 {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }
}

async fn stub_strip(State(stub): State<StubState>, Path(date): Path<String>) -> Html<String> {
    stub.record(format!("/strip/{date}"));
    let linked = if date == MISSING_STRIP_DATE {
        "2005-01-02".to_string()
    } else {
        date.clone()
    };
    let host = &stub.host;
    Html(format!(
        r#"<html><body>
  <div class="comic-item-container">
    <a class="img-comic-link" href="http://{host}/strip/{linked}">
      <img class="img-comic" src="//{host}/img/{date}.gif" alt="Stub strip for {date}">
    </a>
  </div>
</body></html>"#
    ))
}

async fn stub_image(State(stub): State<StubState>, Path(name): Path<String>) -> impl IntoResponse {
    stub.record(format!("/img/{name}"));
    ([(header::CONTENT_TYPE, "image/gif")], GIF_BYTES.to_vec())
}

/// The stub runs on its own runtime thread so it outlives every per-test
/// runtime created by #[tokio::test].
static STUB: Lazy<StubSite> = Lazy::new(|| {
    let hits: Arc<StdMutex<HashMap<String, u64>>> = Arc::new(StdMutex::new(HashMap::new()));
    let (tx, rx) = std::sync::mpsc::channel();
    let thread_hits = Arc::clone(&hits);

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("stub runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind stub site");
            let addr = listener.local_addr().expect("stub addr");
            let state = StubState {
                host: addr.to_string(),
                hits: thread_hits,
            };
            let router = Router::new()
                .route("/strip/:date", get(stub_strip))
                .route("/img/:name", get(stub_image))
                .with_state(state);
            tx.send(addr).expect("report stub addr");
            axum::serve(listener, router).await.expect("serve stub site");
        });
    });

    let addr = rx.recv().expect("stub did not start");
    StubSite {
        base_url: format!("http://{addr}"),
        host: addr.to_string(),
        hits,
    }
});

// ---- app server under test ------------------------------------------------

struct TestServer {
    base_url: String,
    cache_path: PathBuf,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_cache_path() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "daily_comic_http_{}_{}.json",
        std::process::id(),
        nanos
    ));
    path
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let cache_path = unique_cache_path();
    let child = Command::new(env!("CARGO_BIN_EXE_daily_comic"))
        .env("PORT", port.to_string())
        .env("COMIC_CACHE_PATH", &cache_path)
        .env("COMIC_SITE_URL", &STUB.base_url)
        // Keep the stub's request counters test-driven only.
        .env("COMIC_REFRESH_MINUTES", "0")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer {
        base_url,
        cache_path,
        child,
    }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn get_comic(client: &Client, server: &TestServer, date: &str) -> reqwest::Response {
    client
        .get(format!("{}/api/comic", server.base_url))
        .query(&[("date", date)])
        .send()
        .await
        .unwrap()
}

fn cache_file_entries(server: &TestServer) -> BTreeMap<String, String> {
    match std::fs::read(&server.cache_path) {
        Ok(bytes) => serde_json::from_slice(&bytes).expect("cache file is JSON"),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
        Err(err) => panic!("failed to read cache file: {err}"),
    }
}

// ---- tests ----------------------------------------------------------------

#[tokio::test]
async fn http_today_is_cached_once_and_reused() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let today = daily_comic::dates::date_key(daily_comic::dates::today());
    let strip_path = format!("/strip/{today}");
    let image_path = format!("/img/{today}.gif");

    let first: ComicResponse = get_comic(&client, &server, &today)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(first.date, today);
    assert!(first.cached);
    assert!(first.image.starts_with("data:image/gif;base64,"));
    assert_eq!(first.caption, format!("Stub strip for {today}"));
    assert_eq!(
        first.source_url,
        format!("{}/strip/{today}", STUB.base_url)
    );

    let strip_hits = STUB.hits_for(&strip_path);
    let image_hits = STUB.hits_for(&image_path);
    assert!(strip_hits >= 1);
    assert!(image_hits >= 1);

    let second: ComicResponse = get_comic(&client, &server, &today)
        .await
        .json()
        .await
        .unwrap();
    assert!(second.cached);
    assert_eq!(second.image, first.image);

    // The second request was answered from the cache without touching the
    // upstream site at all.
    assert_eq!(STUB.hits_for(&strip_path), strip_hits);
    assert_eq!(STUB.hits_for(&image_path), image_hits);

    let entries = cache_file_entries(&server);
    assert!(entries.contains_key(&format!("dilbert-{today}.data")));
    assert!(entries.contains_key(&format!("dilbert-{today}.desc")));
    assert!(entries.contains_key(&format!("dilbert-{today}.url")));
    assert_eq!(entries.len(), 3);
}

#[tokio::test]
async fn http_past_date_is_served_live_and_never_cached() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let comic: ComicResponse = get_comic(&client, &server, "2005-01-02")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(comic.date, "2005-01-02");
    assert!(!comic.cached);
    // Live remote image URL, scheme resolved from the protocol-relative src.
    assert_eq!(
        comic.image,
        format!("{}/img/2005-01-02.gif", STUB.base_url)
    );

    // The image itself was never fetched server-side.
    assert_eq!(STUB.hits_for("/img/2005-01-02.gif"), 0);

    let entries = cache_file_entries(&server);
    assert!(!entries.contains_key("dilbert-2005-01-02.desc"));
}

#[tokio::test]
async fn http_missing_strip_is_a_validation_error() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = get_comic(&client, &server, MISSING_STRIP_DATE).await;
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    let body: ErrorResponse = response.json().await.unwrap();
    assert_eq!(body.kind, "validation");
    assert!(body.error.contains(MISSING_STRIP_DATE));

    let entries = cache_file_entries(&server);
    assert!(!entries.contains_key(&format!("dilbert-{MISSING_STRIP_DATE}.desc")));
}

#[tokio::test]
async fn http_malformed_date_is_a_bad_request() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = get_comic(&client, &server, "not-a-date").await;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_out_of_range_date_is_clamped_to_the_bounds() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let comic: ComicResponse = get_comic(&client, &server, "1970-01-01")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(comic.date, "1989-04-16");
    assert!(!comic.cached);
}

#[tokio::test]
async fn http_index_carries_the_date_picker_bounds() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let today = daily_comic::dates::date_key(daily_comic::dates::today());

    let page = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(page.contains("comic-date-form"));
    assert!(page.contains("1989-04-16"));
    assert!(page.contains(&today));
}
