use std::collections::BTreeMap;

use reqwest::Client;
pub use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.gsocorganizations.dev/";

/// Description stored when the API does not provide one.
pub const PLACEHOLDER_DESCRIPTION: &str = "GSoC Organization";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationMetadata {
    pub description: String,
    pub url: String,
}

impl Default for OrganizationMetadata {
    fn default() -> Self {
        Self {
            description: PLACEHOLDER_DESCRIPTION.to_string(),
            url: String::new(),
        }
    }
}

/// Organizations of a single year, keyed by name.
pub type YearOrganizations = BTreeMap<String, OrganizationMetadata>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailureKind {
    FetchFailed,
    ParseFailed,
}

#[derive(Debug, Error)]
pub enum FetchYearOrganizationsError {
    #[error("RequestSend: {source}")]
    RequestSend {
        source: reqwest::Error,
    },

    #[error("UnexpectedStatus: API returned {status} for year {year}")]
    UnexpectedStatus {
        year: i32,
        status: StatusCode,
    },

    #[error("ResponseRead: {source}")]
    ResponseRead {
        source: reqwest::Error,
    },

    #[error("DeserializeResponseBody: {source}")]
    DeserializeResponseBody {
        #[from]
        source: serde_json::Error,
    },
}

impl FetchYearOrganizationsError {
    pub fn kind(&self) -> FetchFailureKind {
        match self {
            Self::DeserializeResponseBody { .. } => FetchFailureKind::ParseFailed,
            Self::RequestSend { .. }
            | Self::UnexpectedStatus { .. }
            | Self::ResponseRead { .. } => FetchFailureKind::FetchFailed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GsocClient {
    client: Client,
    base_url: String,
}

impl Default for GsocClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl GsocClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn year_url(&self, year: i32) -> String {
        format!("{}{year}.json", self.base_url)
    }

    /// GET the organizations of `year`. Any non-2xx status is an error.
    pub async fn fetch_year_organizations(
        &self,
        year: i32,
    ) -> Result<YearOrganizations, FetchYearOrganizationsError> {
        let response = self
            .client
            .get(self.year_url(year))
            .header("User-Agent", "rust-client")
            .send()
            .await
            .map_err(|source| FetchYearOrganizationsError::RequestSend { source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchYearOrganizationsError::UnexpectedStatus { year, status });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchYearOrganizationsError::ResponseRead { source })?;

        Ok(parse_year_organizations(&body)?)
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawOrganization {
    projects_url: Option<Value>,
    description: Option<Value>,
}

/// Parses a yearly document. The root must be an object; entries that are
/// not objects, or carry non-string fields, fall back to the defaults.
pub fn parse_year_organizations(body: &str) -> Result<YearOrganizations, serde_json::Error> {
    let raw: BTreeMap<String, Value> = serde_json::from_str(body)?;

    Ok(raw
        .into_iter()
        .map(|(name, value)| {
            let raw = serde_json::from_value::<RawOrganization>(value).unwrap_or_default();
            let mut metadata = OrganizationMetadata::default();
            if let Some(Value::String(url)) = raw.projects_url {
                metadata.url = url;
            }
            if let Some(Value::String(description)) = raw.description {
                metadata.description = description;
            }
            (name, metadata)
        })
        .collect())
}
