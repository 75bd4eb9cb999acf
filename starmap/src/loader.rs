//! Newline-delimited JSON dataset loading.
//!
//! A bad line only costs that line. A failed fetch costs the whole dataset
//! but still yields an (empty) report, so callers always get something to lay out.

use crate::model::EntityRecord;
use log::{error, info, warn};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Where the dataset text comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl Source {
    pub fn parse(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            Source::Url(s.to_string())
        } else {
            Source::Path(PathBuf::from(s))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(p) => write!(f, "{}", p.display()),
            Source::Url(u) => write!(f, "{}", u),
        }
    }
}

/// The dataset source could not be read (IO, transport, or non-success status).
#[derive(Debug)]
pub struct FetchError {
    pub source: String,
    pub message: String,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to fetch {}: {}", self.source, self.message)
    }
}

impl std::error::Error for FetchError {}

/// One dataset line that did not parse into a record. `line` is 1-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for LineError {}

#[derive(Debug, Default)]
pub struct LoadReport {
    /// Parsed records, in input line order.
    pub records: Vec<EntityRecord>,
    pub skipped: Vec<LineError>,
}

/// Fetch and parse. Never fails: a fetch error is logged and yields an empty report.
pub fn load(source: &Source) -> LoadReport {
    match fetch_text(source) {
        Ok(text) => {
            let report = parse_ndjson(&text);
            info!(
                "loaded {} records from {} ({} skipped)",
                report.records.len(),
                source,
                report.skipped.len()
            );
            report
        }
        Err(e) => {
            error!("{}", e);
            LoadReport::default()
        }
    }
}

pub fn fetch_text(source: &Source) -> Result<String, FetchError> {
    match source {
        Source::Path(path) => fs::read_to_string(path).map_err(|e| FetchError {
            source: source.to_string(),
            message: e.to_string(),
        }),
        Source::Url(url) => fetch_url(url),
    }
}

fn fetch_url(url: &str) -> Result<String, FetchError> {
    let fail = |message: String| FetchError {
        source: url.to_string(),
        message,
    };

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("starmap/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| fail(format!("client error: {}", e)))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| fail(format!("request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(fail(format!("HTTP {}", status)));
    }

    response
        .text()
        .map_err(|e| fail(format!("failed to read body: {}", e)))
}

/// Parse newline-delimited JSON. Blank lines are ignored, bad lines are
/// reported in `skipped` and logged.
pub fn parse_ndjson(text: &str) -> LoadReport {
    let mut report = LoadReport::default();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_record(line) {
            Ok(rec) => report.records.push(rec),
            Err(message) => {
                let err = LineError {
                    line: idx + 1,
                    message,
                };
                warn!("skipping dataset {}", err);
                report.skipped.push(err);
            }
        }
    }

    report
}

fn parse_record(line: &str) -> Result<EntityRecord, String> {
    let value: Value = serde_json::from_str(line).map_err(|e| e.to_string())?;
    if !value.is_object() {
        return Err(format!("expected a JSON object, found {}", kind_of(&value)));
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Answers a single request with `status` and `body`, then closes.
    fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/info.json", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut req = Vec::new();
            let mut chunk = [0u8; 512];
            while !req.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                req.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/x-ndjson\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        (url, handle)
    }

    #[test]
    fn keeps_order_and_drops_blank_and_bad_lines() {
        let text = "\
{\"pl_name\":\"a\",\"pl_radius\":1}

{\"pl_name\":\"b\",\"pl_radius\":2
   \t
{\"pl_name\":\"c\",\"pl_radius\":3}
[1,2,3]
{\"pl_name\":\"d\"}
";
        let report = parse_ndjson(text);
        let names: Vec<&str> = report.records.iter().map(|r| r.display_name()).collect();
        assert_eq!(names, vec!["a", "c", "d"]);

        let bad_lines: Vec<usize> = report.skipped.iter().map(|e| e.line).collect();
        assert_eq!(bad_lines, vec![3, 6]);
        assert!(report.skipped[1].message.contains("array"));
    }

    #[test]
    fn handles_crlf_line_endings() {
        let report = parse_ndjson("{\"pl_name\":\"a\"}\r\n{\"pl_name\":\"b\"}\r\n");
        assert_eq!(report.records.len(), 2);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn empty_text_is_empty_report() {
        let report = parse_ndjson("");
        assert!(report.records.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn source_kind_from_string() {
        assert_eq!(
            Source::parse("https://example.com/info.json"),
            Source::Url("https://example.com/info.json".to_string())
        );
        assert_eq!(Source::parse("info.json"), Source::Path(PathBuf::from("info.json")));
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let source = Source::Path(PathBuf::from("/definitely/not/here/info.json"));
        assert!(fetch_text(&source).is_err());
        let report = load(&source);
        assert!(report.records.is_empty());
    }

    #[test]
    fn loads_from_disk() {
        let path = std::env::temp_dir().join(format!("starmap-loader-{}.json", std::process::id()));
        fs::write(&path, "{\"pl_name\":\"x\",\"to_star_distance\":12.5}\n").unwrap();
        let report = load(&Source::Path(path.clone()));
        fs::remove_file(&path).ok();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].distance_ly, Some(12.5));
    }

    #[test]
    fn http_error_status_loads_as_empty() {
        let (url, server) = serve_once("404 Not Found", "missing");
        let err = fetch_text(&Source::Url(url)).unwrap_err();
        server.join().unwrap();
        assert!(err.message.contains("404"), "{}", err);

        let (url, server) = serve_once("404 Not Found", "missing");
        let report = load(&Source::Url(url));
        server.join().unwrap();
        assert!(report.records.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn loads_over_http_in_order() {
        let (url, server) = serve_once(
            "200 OK",
            "{\"pl_name\":\"first\"}\n{\"pl_name\":\"second\"}\n",
        );
        let report = load(&Source::Url(url));
        server.join().unwrap();
        let names: Vec<&str> = report.records.iter().map(|r| r.display_name()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn refused_connection_loads_as_empty() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let source = Source::Url(format!("http://127.0.0.1:{}/info.json", port));
        assert!(fetch_text(&source).is_err());
        assert!(load(&source).records.is_empty());
    }
}
