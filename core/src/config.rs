//! # Describer Configuration
//!
//! Settings fixed at load time. The base URL is taken from the caller when given,
//! otherwise from the document's `schemes`, `host` and `basePath`.

/// Base URL used when neither the caller nor the document names a host.
pub const FALLBACK_BASE_URL: &str = "http://localhost";

/// Load-time settings for a describer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriberConfig {
    /// Base URL prefixed to every operation path. Used verbatim (no `basePath` appended).
    pub base_url: Option<String>,
}

impl DescriberConfig {
    /// Config with an explicit base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
        }
    }

    /// The effective base URL, without a trailing slash.
    pub fn resolve_base_url(
        &self,
        schemes: &[String],
        host: Option<&str>,
        base_path: Option<&str>,
    ) -> String {
        let url = match &self.base_url {
            Some(url) => url.clone(),
            None => document_base_url(schemes, host, base_path),
        };
        url.trim_end_matches('/').to_string()
    }
}

fn document_base_url(schemes: &[String], host: Option<&str>, base_path: Option<&str>) -> String {
    let base_path = base_path.unwrap_or_default().trim_end_matches('/');
    match host.filter(|h| !h.is_empty()) {
        Some(host) => {
            let scheme = schemes
                .iter()
                .find(|s| s.as_str() == "https")
                .or_else(|| schemes.first())
                .map(String::as_str)
                .unwrap_or("http");
            format!("{}://{}{}", scheme, host, base_path)
        }
        None => format!("{}{}", FALLBACK_BASE_URL, base_path),
    }
}
