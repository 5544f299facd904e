//! Airtable REST backend.

use std::time::Duration;

use mingpian_core::{FieldName, PersonRecord, StoreConfig};
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use super::{RecordStore, StoredRecord};
use crate::{Credentials, Result, StoreError};

/// Writes to and searches one Airtable table.
#[derive(Debug, Clone)]
pub struct AirtableStore {
    client: Client,
    endpoint: Url,
    credentials: Credentials,
    page_size: usize,
}

/// One page of records as returned by the list and create endpoints.
#[derive(Debug, Deserialize)]
struct RecordPage {
    #[serde(default)]
    records: Vec<ApiRecord>,
    #[serde(default)]
    offset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiRecord {
    id: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

impl From<ApiRecord> for StoredRecord {
    fn from(api: ApiRecord) -> Self {
        StoredRecord {
            id: api.id,
            record: PersonRecord::from_labeled_fields(&api.fields),
        }
    }
}

impl AirtableStore {
    /// Create a store for the table named in `config`.
    pub fn new(credentials: Credentials, config: &StoreConfig) -> Result<Self> {
        config.validate()?;

        let endpoint = table_endpoint(&config.api_url, credentials.base_id(), &config.table_name)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            credentials,
            page_size: config.page_size,
        })
    }

    /// URL of the table endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn fetch_page(&self, formula: &str, offset: Option<&str>) -> Result<RecordPage> {
        let mut request = self
            .client
            .get(self.endpoint.clone())
            .bearer_auth(self.credentials.api_key())
            .query(&[
                ("pageSize", self.page_size.to_string()),
                ("filterByFormula", formula.to_string()),
            ]);
        if let Some(offset) = offset {
            request = request.query(&[("offset", offset)]);
        }

        let response = check_status(request.send().await?).await?;
        let body = response.text().await?;
        decode_page(&body)
    }
}

impl RecordStore for AirtableStore {
    async fn create_records(&self, records: &[PersonRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let body = create_body(records);
        debug!("POST {} ({} records)", self.endpoint, records.len());

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.credentials.api_key())
            .json(&body)
            .send()
            .await?;
        check_status(response).await?;

        Ok(records.len())
    }

    async fn search(&self, term: &str) -> Result<Vec<StoredRecord>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(StoreError::InvalidQuery("search term is empty".to_string()));
        }

        let formula = search_formula(term);
        let mut found = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let page = self.fetch_page(&formula, offset.as_deref()).await?;
            debug!("Fetched page with {} records", page.records.len());
            found.extend(page.records.into_iter().map(StoredRecord::from));

            match page.offset {
                Some(next) if !next.is_empty() => offset = Some(next),
                _ => break,
            }
        }

        Ok(found)
    }
}

/// `{api_url}/{base_id}/{table}` with each segment percent-encoded.
fn table_endpoint(api_url: &str, base_id: &str, table: &str) -> Result<Url> {
    let mut url = Url::parse(api_url)
        .map_err(|e| StoreError::Config(format!("invalid api_url {}: {}", api_url, e)))?;

    url.path_segments_mut()
        .map_err(|_| StoreError::Config(format!("api_url cannot take a path: {}", api_url)))?
        .pop_if_empty()
        .push(base_id)
        .push(table);

    Ok(url)
}

/// Request body for the create-many endpoint.
fn create_body(records: &[PersonRecord]) -> Value {
    let records: Vec<Value> = records
        .iter()
        .map(|record| json!({ "fields": record.to_labeled_fields() }))
        .collect();
    json!({ "records": records })
}

/// Formula matching records whose company or name contains `term`.
fn search_formula(term: &str) -> String {
    let escaped = term.replace('\\', "\\\\").replace('"', "\\\"");
    format!(
        r#"OR(SEARCH("{term}",{{{company}}})>0,SEARCH("{term}",{{{name}}})>0)"#,
        term = escaped,
        company = FieldName::Company.label(),
        name = FieldName::Name.label(),
    )
}

/// Pass successful responses through; turn the rest into `StoreError::Api`.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = error_body(response.text().await);
    let message = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("no response body").to_string()
    } else {
        api_error_message(&body)
    };

    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Body of a failed response; an unreadable body counts as empty.
fn error_body<E: std::fmt::Display>(read: std::result::Result<String, E>) -> String {
    match read {
        Ok(body) => body,
        Err(e) => {
            debug!("Could not read Airtable error body: {}", e);
            String::new()
        }
    }
}

/// `error.message`, else the `error` string, else the raw body.
fn api_error_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let error = parsed.as_ref().and_then(|v| v.get("error"));

    match error {
        Some(Value::Object(err)) => match err.get("message").and_then(Value::as_str) {
            Some(message) => message.to_string(),
            None => body.trim().to_string(),
        },
        Some(Value::String(err)) => err.clone(),
        _ => body.trim().to_string(),
    }
}

fn decode_page(body: &str) -> Result<RecordPage> {
    serde_json::from_str(body).map_err(|e| StoreError::Decode(e.to_string()))
}
