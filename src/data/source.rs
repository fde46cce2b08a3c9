//! Market-data document loading (HTTP or local directory).
//!
//! One compact JSON document exists per dashboard. It is fetched in full,
//! parsed, and expanded; any failure along the way is a single "failed to
//! load" error and there are no partial results.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::header::{CACHE_CONTROL, PRAGMA};

use crate::data::catalog::Dashboard;
use crate::domain::{CompactMarketData, MarketData};
use crate::error::{AppError, EXIT_USAGE};

/// Environment variable naming the data root (URL or directory).
pub const DATA_URL_ENV: &str = "MDASH_DATA_URL";

/// Data root used when nothing is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Where dashboard documents live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// `http(s)://host/data`: documents are `<base>/<file>`.
    Http(String),
    /// Local directory containing the documents.
    Dir(PathBuf),
}

impl DataSource {
    /// Interpret a user-supplied root: URLs by scheme, anything else as a path.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DataSource::Http(trimmed.trim_end_matches('/').to_string())
        } else {
            DataSource::Dir(PathBuf::from(trimmed))
        }
    }

    /// Location of a document under this root, for messages and logging.
    pub fn locate(&self, file: &str) -> String {
        match self {
            DataSource::Http(base) => format!("{base}/{}", file.trim_start_matches('/')),
            DataSource::Dir(dir) => dir.join(file).display().to_string(),
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Http(base) => write!(f, "{base}"),
            DataSource::Dir(dir) => write!(f, "{}", dir.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MarketDataClient {
    client: Client,
    source: DataSource,
}

impl MarketDataClient {
    pub fn new(source: DataSource) -> Self {
        Self {
            client: Client::new(),
            source,
        }
    }

    /// Resolve the data root: explicit override, then `MDASH_DATA_URL` (via `.env`), then `data/`.
    pub fn from_env(override_source: Option<&str>) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let raw = match override_source {
            Some(s) => s.to_string(),
            None => std::env::var(DATA_URL_ENV).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string()),
        };
        if raw.trim().is_empty() {
            return Err(AppError::new(EXIT_USAGE, format!("Empty data source (check {DATA_URL_ENV}).")));
        }

        let source = DataSource::parse(&raw);
        debug!("market data source: {source}");
        Ok(Self::new(source))
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Fetch, parse, and expand the document of a dashboard.
    pub fn load_dashboard(&self, dashboard: &Dashboard) -> Result<MarketData, AppError> {
        let compact = self.fetch_document(dashboard.data_file)?;
        let data = MarketData::from_compact(&compact);
        info!(
            "loaded {} ({} years, {} regions)",
            dashboard.id,
            data.years.len(),
            data.region.len()
        );
        Ok(data)
    }

    /// Fetch and parse one compact document from the data root.
    pub fn fetch_document(&self, file: &str) -> Result<CompactMarketData, AppError> {
        match &self.source {
            DataSource::Http(base) => self.fetch_http(&format!("{base}/{}", file.trim_start_matches('/'))),
            DataSource::Dir(dir) => read_document(&dir.join(file)),
        }
    }

    fn fetch_http(&self, url: &str) -> Result<CompactMarketData, AppError> {
        debug!("GET {url}");
        let resp = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .map_err(|e| AppError::load(format!("request to {url} failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::load(format!("{url} returned status {}", resp.status())));
        }

        resp.json::<CompactMarketData>()
            .map_err(|e| AppError::load(format!("invalid document at {url}: {e}")))
    }
}

/// Read and parse a compact document from disk.
pub fn read_document(path: &Path) -> Result<CompactMarketData, AppError> {
    debug!("reading {}", path.display());
    let file = File::open(path).map_err(|e| AppError::load(format!("cannot open '{}': {e}", path.display())))?;
    serde_json::from_reader(std::io::BufReader::new(file))
        .map_err(|e| AppError::load(format!("invalid document '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::SOFT_GOODS;
    use crate::error::LOAD_FAILED;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    const DOC: &str = r#"{"years": [2024, 2025], "totalMarket": [10, 12], "endUser": {"OE": [6, 7]}}"#;

    /// Client that talks to the local test server directly, ignoring proxy settings.
    fn http_client(base: String) -> MarketDataClient {
        MarketDataClient {
            client: Client::builder().no_proxy().build().unwrap(),
            source: DataSource::Http(base),
        }
    }

    fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Serve `count` requests: the document at `/data/marketData.json`, 404 otherwise.
    fn serve(count: usize) -> (String, thread::JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}/data", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let mut requests = Vec::new();
            for stream in listener.incoming().take(count) {
                let mut stream = stream.unwrap();
                let request = read_request(&mut stream);
                let (status, body) = if request.starts_with("GET /data/marketData.json ") {
                    ("200 OK", DOC)
                } else {
                    ("404 Not Found", "not found")
                };
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                stream.write_all(response.as_bytes()).unwrap();
                requests.push(request);
            }
            requests
        });
        (base, handle)
    }

    #[test]
    fn parse_distinguishes_urls_and_paths() {
        assert_eq!(
            DataSource::parse("https://example.com/data/"),
            DataSource::Http("https://example.com/data".to_string())
        );
        assert_eq!(DataSource::parse("./public/data"), DataSource::Dir(PathBuf::from("./public/data")));
        assert_eq!(
            DataSource::parse("http://localhost:8080").locate("/marketData.json"),
            "http://localhost:8080/marketData.json"
        );
    }

    #[test]
    fn loads_dashboard_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        let doc = r#"{"years": [2024, 2025], "totalMarket": [10, 12], "region": {"Europe": [4, 5]}}"#;
        std::fs::write(dir.path().join(SOFT_GOODS.data_file), doc).unwrap();

        let client = MarketDataClient::new(DataSource::Dir(dir.path().to_path_buf()));
        let data = client.load_dashboard(&SOFT_GOODS).unwrap();
        assert_eq!(data.years, vec![2024, 2025]);
        assert_eq!(data.region[0].data[1].value, 5.0);
    }

    #[test]
    fn missing_and_malformed_documents_collapse_to_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let client = MarketDataClient::new(DataSource::Dir(dir.path().to_path_buf()));

        let missing = client.load_dashboard(&SOFT_GOODS).unwrap_err();
        assert!(missing.is_load_failure());

        std::fs::write(dir.path().join(SOFT_GOODS.data_file), "{ not json").unwrap();
        let malformed = client.load_dashboard(&SOFT_GOODS).unwrap_err();
        assert!(malformed.is_load_failure());
        assert!(malformed.message().starts_with(LOAD_FAILED));
    }

    #[test]
    fn http_status_errors_are_load_failures() {
        let (base, server) = serve(2);
        let client = http_client(base);

        let err = client.fetch_document("missing.json").unwrap_err();
        assert!(err.is_load_failure());
        assert!(err.message().contains("404"));

        let doc = client.fetch_document("/marketData.json").unwrap();
        assert_eq!(doc.years, vec![2024, 2025]);
        assert_eq!(doc.end_user.get("OE"), Some(&vec![6.0, 7.0]));

        let requests = server.join().unwrap();
        assert_eq!(requests.len(), 2);
        for request in &requests {
            let lower = request.to_ascii_lowercase();
            assert!(lower.contains("cache-control: no-cache"), "{request}");
            assert!(lower.contains("pragma: no-cache"), "{request}");
        }
    }

    #[test]
    fn unreachable_server_is_a_load_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}/data", listener.local_addr().unwrap());
        drop(listener);

        let err = http_client(base).fetch_document("marketData.json").unwrap_err();
        assert!(err.is_load_failure());
        assert!(err.message().starts_with(LOAD_FAILED));
    }
}
