use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use super::{Country, CountrySource};

pub const COUNTRIES_NOW_URL: &str = "https://countriesnow.space/api/v0.1/countries/flag/images";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Country list in the CountriesNow `countries/flag/images` response shape:
///
/// ```json
/// { "error": false, "msg": "...", "data": [{ "name": "Brazil", "iso2": "BR", "flag": "https://..." }] }
/// ```
///
/// Fetched once over HTTP or read from a saved copy on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagFeed {
    Url(String),
    File(PathBuf),
}

#[derive(Debug, Deserialize)]
struct FeedDocument {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<Vec<FeedEntry>>,
}

#[derive(Debug, Deserialize)]
struct FeedEntry {
    name: String,
    #[serde(default)]
    iso2: Option<String>,
    #[serde(default)]
    flag: Option<String>,
}

impl FlagFeed {
    pub fn file(path: impl AsRef<Path>) -> Self {
        FlagFeed::File(path.as_ref().to_path_buf())
    }

    pub fn url(url: impl Into<String>) -> Self {
        FlagFeed::Url(url.into())
    }

    /// `http://` and `https://` locations are fetched, anything else is a path.
    pub fn from_location(location: &str) -> Self {
        let location = location.trim();
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::url(location)
        } else {
            Self::file(location)
        }
    }

    pub fn parse(text: &str) -> Result<Vec<Country>> {
        let document: FeedDocument =
            serde_json::from_str(text).context("flag feed is not valid JSON")?;
        if document.error {
            bail!(
                "flag feed reported an error: {}",
                document.msg.unwrap_or_else(|| "no message".into())
            );
        }
        let Some(entries) = document.data else {
            bail!("flag feed has no data field");
        };
        Ok(entries
            .into_iter()
            .filter_map(|entry| {
                let code = entry.iso2?.trim().to_ascii_lowercase();
                if code.is_empty() {
                    return None;
                }
                Some(Country::new(code, entry.name, entry.flag))
            })
            .collect())
    }
}

impl CountrySource for FlagFeed {
    fn name(&self) -> &str {
        "flag-feed"
    }

    // Uses the blocking client; call before any tokio runtime is entered.
    fn load(&self) -> Result<Vec<Country>> {
        match self {
            FlagFeed::Url(url) => {
                let client = reqwest::blocking::Client::builder()
                    .timeout(FETCH_TIMEOUT)
                    .build()
                    .context("Failed to build HTTP client")?;
                let text = client
                    .get(url)
                    .send()
                    .and_then(|response| response.error_for_status())
                    .and_then(|response| response.text())
                    .with_context(|| format!("Failed to fetch flag feed {url}"))?;
                Self::parse(&text).with_context(|| format!("Failed to parse {url}"))
            }
            FlagFeed::File(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read flag feed {}", path.display()))?;
                Self::parse(&text).with_context(|| format!("Failed to parse {}", path.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_without_code_are_dropped() {
        let countries = FlagFeed::parse(
            r#"{
                "error": false,
                "msg": "flags images retrieved",
                "data": [
                    { "name": "Brazil", "iso2": "BR", "flag": "https://example.org/br.svg" },
                    { "name": "Kosovo", "flag": "https://example.org/xk.svg" },
                    { "name": "Blank", "iso2": " " }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].code, "br");
        assert_eq!(
            countries[0].flag_url.as_deref(),
            Some("https://example.org/br.svg")
        );
    }

    #[test]
    fn error_flag_and_missing_data_fail() {
        assert!(FlagFeed::parse(r#"{ "error": true, "msg": "down" }"#).is_err());
        assert!(FlagFeed::parse(r#"{ "error": false }"#).is_err());
        assert!(FlagFeed::parse("not json").is_err());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flags.json");
        fs::write(
            &path,
            r#"{ "data": [{ "name": "Argentina", "iso2": "AR", "flag": null }] }"#,
        )
        .unwrap();
        let countries = FlagFeed::file(&path).load().unwrap();
        assert_eq!(countries, vec![Country::new("ar", "Argentina", None)]);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = FlagFeed::file("/nonexistent/flags.json").load().unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/flags.json"));
    }

    #[test]
    fn location_selects_url_or_file() {
        assert_eq!(
            FlagFeed::from_location(COUNTRIES_NOW_URL),
            FlagFeed::Url(COUNTRIES_NOW_URL.to_string())
        );
        assert_eq!(
            FlagFeed::from_location(" HTTP://localhost:8000/flags.json "),
            FlagFeed::Url("HTTP://localhost:8000/flags.json".to_string())
        );
        assert_eq!(
            FlagFeed::from_location("data/flags.json"),
            FlagFeed::File(PathBuf::from("data/flags.json"))
        );
    }

    /// Serves one canned HTTP response on a local port and returns its URL.
    fn serve_once(status: &str, body: &'static str) -> String {
        use std::io::{Read, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let status = status.to_string();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0_u8; 4096];
                let _ = stream.read(&mut buf);
                let reply = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(reply.as_bytes());
            }
        });
        format!("http://{addr}/api/v0.1/countries/flag/images")
    }

    #[test]
    fn fetches_feed_over_http() {
        let url = serve_once(
            "200 OK",
            r#"{ "error": false, "data": [{ "name": "Brazil", "iso2": "BR", "flag": "https://example.org/br.svg" }] }"#,
        );
        let countries = FlagFeed::url(url).load().unwrap();
        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].code, "br");
    }

    #[test]
    fn http_error_status_fails() {
        let url = serve_once("503 Service Unavailable", "{}");
        let err = FlagFeed::url(url.clone()).load().unwrap_err();
        assert!(format!("{err:#}").contains(&url));
    }
}
