//! BioPortal REST client.
//!
//! Issues `GET {base_url}/search` with the API key in the `Authorization`
//! header and reads the `collection` array of the JSON response.

use std::time::Duration;

use reqwest::Url;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;

use crate::error::{OntologyError, Result};
use crate::search::{OntologySearch, SearchCandidate, SearchRequest};

/// Public BioPortal REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://data.bioontology.org";

/// Environment variable holding the BioPortal API key.
pub const API_KEY_ENV_VAR: &str = "BIOPORTAL_API_KEY";

const USER_AGENT_VALUE: &str = concat!("biosample-analyzer/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OntologyClientConfig {
    pub base_url: String,
    pub api_key: String,
    /// Number of hits requested per search. Only the first is used.
    pub page_size: u32,
}

impl OntologyClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            page_size: 1,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct BioPortalClient {
    client: reqwest::blocking::Client,
    search_url: Url,
    page_size: u32,
}

impl BioPortalClient {
    pub fn new(config: &OntologyClientConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(OntologyError::Config("API key is empty".to_string()));
        }
        let base = format!("{}/", config.base_url.trim_end_matches('/'));
        let search_url = Url::parse(&base)
            .and_then(|base| base.join("search"))
            .map_err(|e| OntologyError::Config(format!("invalid base URL {}: {e}", config.base_url)))?;

        let mut authorization = HeaderValue::from_str(&format!("apikey token={}", config.api_key))
            .map_err(|e| OntologyError::Config(format!("invalid API key: {e}")))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| OntologyError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            search_url,
            page_size: config.page_size.max(1),
        })
    }

    /// Full request URL for a search.
    ///
    /// The prepared query encodes spaces as `+`; they are decoded back to
    /// spaces here so form encoding renders them as `+` on the wire.
    pub fn search_url(&self, request: &SearchRequest) -> Url {
        let mut url = self.search_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", &request.query.replace('+', " "));
            if request.exact_match {
                pairs.append_pair("require_exact_match", "true");
            }
            if let Some(ontologies) = request.ontology_filter() {
                pairs.append_pair("ontologies", &ontologies);
            }
            pairs.append_pair("page", "1");
            pairs.append_pair("pagesize", &self.page_size.to_string());
        }
        url
    }
}

impl OntologySearch for BioPortalClient {
    fn search(&self, request: &SearchRequest) -> Result<Vec<SearchCandidate>> {
        let url = self.search_url(request);
        tracing::debug!(
            exact_match = request.exact_match,
            ontologies = request.ontologies.len(),
            "querying BioPortal search"
        );

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(OntologyError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let body = response.text()?;
        parse_search_response(&body)
    }
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    collection: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "@id", default)]
    id: String,
    #[serde(rename = "@type", default)]
    type_uri: String,
    #[serde(rename = "prefLabel", default)]
    pref_label: String,
    #[serde(rename = "ontologyType", default)]
    ontology_type: String,
}

/// Decode a BioPortal search response body. A blank body has no candidates.
pub fn parse_search_response(body: &str) -> Result<Vec<SearchCandidate>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let page: SearchPage =
        serde_json::from_str(body).map_err(|e| OntologyError::Decode(e.to_string()))?;
    Ok(page
        .collection
        .into_iter()
        .map(|hit| SearchCandidate {
            type_uri: hit.type_uri,
            ontology_category: hit.ontology_type,
            canonical_id: hit.id,
            preferred_label: hit.pref_label,
        })
        .collect())
}
