//! Stateless HTTP request builder and response parser for the item API.
//!
//! # Design
//! `ItemClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Executing the round-trip is left to a `Transport`.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::id::is_decimal_id;
use crate::types::Item;

/// Synchronous, stateless client for the item API.
#[derive(Debug, Clone)]
pub struct ItemClient {
    base_url: String,
}

impl ItemClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_items(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/items", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Fails with `InvalidId` unless `id` is a decimal string.
    pub fn build_get_item(&self, id: &str) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Get,
            path: self.item_path(id)?,
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn build_create_item(&self, item: &Item) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(item).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/items", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// Fails with `InvalidId` unless `id` is a decimal string.
    pub fn build_delete_item(&self, id: &str) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_path(id)?,
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn parse_list_items(&self, response: HttpResponse) -> Result<Vec<Item>, ApiError> {
        check_status(&response, &[200])?;
        decode(&response.body)
    }

    pub fn parse_get_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        check_status(&response, &[200])?;
        decode(&response.body)
    }

    /// Accepts 201 as well as the 200 some json-server style backends send.
    pub fn parse_create_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        check_status(&response, &[201, 200])?;
        decode(&response.body)
    }

    pub fn parse_delete_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[204, 200])?;
        Ok(())
    }

    fn item_path(&self, id: &str) -> Result<String, ApiError> {
        if !is_decimal_id(id) {
            return Err(ApiError::InvalidId(id.to_string()));
        }
        Ok(format!("{}/items/{id}", self.base_url))
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: &[u16]) -> Result<(), ApiError> {
    if expected.contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
