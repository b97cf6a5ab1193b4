use std::path::PathBuf;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{DlHubError, Result};

pub const DEFAULT_OUTPUT_PREFIX: &str = "dlhub_";

const DEFAULT_HEADERS: &[(&str, &str)] = &[
    (
        "User-Agent",
        "Mozilla/5.0 (iPhone; CPU iPhone OS 16_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, \
         like Gecko) Version/16.2 Mobile/15E148 Safari/604.1",
    ),
    ("Accept-Language", "en-US,en;q=0.9"),
];

/// Construction inputs for one pipeline run. `extra_headers` entries are
/// `"Name: Value"` lines merged over the built-in defaults, overriding by
/// header name.
#[derive(Debug, Clone)]
pub struct HubConfig {
    pub url: String,
    pub extra_headers: Vec<String>,
    pub output_prefix: String,
    pub output_dir: Option<PathBuf>,
    pub output_filename: Option<String>,
}

impl HubConfig {
    pub fn new<T: Into<String>>(url: T) -> Self {
        Self {
            url: url.into(),
            extra_headers: Vec::new(),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            output_dir: None,
            output_filename: None,
        }
    }

    pub(crate) fn header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        for (name, value) in DEFAULT_HEADERS {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| DlHubError::Config(e.to_string()))?;
            let value =
                HeaderValue::from_str(value).map_err(|e| DlHubError::Config(e.to_string()))?;
            headers.insert(name, value);
        }

        for line in &self.extra_headers {
            let (name, value) = parse_header_line(line)?;
            headers.insert(name, value);
        }

        Ok(headers)
    }
}

fn parse_header_line(line: &str) -> Result<(HeaderName, HeaderValue)> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| DlHubError::Config(format!("malformed header line: {line:?}")))?;

    let name = HeaderName::from_bytes(name.trim().as_bytes())
        .map_err(|e| DlHubError::Config(format!("bad header name in {line:?}: {e}")))?;
    let value = HeaderValue::from_str(value.trim())
        .map_err(|e| DlHubError::Config(format!("bad header value in {line:?}: {e}")))?;

    Ok((name, value))
}
