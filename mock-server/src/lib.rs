use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_for_removal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_removed: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removal_method: Option<String>,
}

/// Insertion-ordered item store.
pub type Db = Arc<RwLock<Vec<Item>>>;

pub fn app() -> Router {
    app_with_items(Vec::new())
}

/// Router whose store starts out holding `items`.
pub fn app_with_items(items: Vec<Item>) -> Router {
    let db: Db = Arc::new(RwLock::new(items));
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", get(get_item).delete(delete_item))
        .with_state(db)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock item store listening");
    }
    axum::serve(listener, app()).await
}

fn is_decimal_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

async fn list_items(State(db): State<Db>) -> Json<Vec<Item>> {
    Json(db.read().await.clone())
}

async fn create_item(
    State(db): State<Db>,
    Json(input): Json<Item>,
) -> Result<(StatusCode, Json<Item>), StatusCode> {
    if !is_decimal_id(&input.id) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut items = db.write().await;
    if items.iter().any(|item| item.id == input.id) {
        return Err(StatusCode::CONFLICT);
    }
    items.push(input.clone());
    Ok((StatusCode::CREATED, Json(input)))
}

async fn get_item(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Item>, StatusCode> {
    let items = db.read().await;
    items
        .iter()
        .find(|item| item.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn delete_item(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut items = db.write().await;
    let index = items
        .iter()
        .position(|item| item.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    items.remove(index);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_serializes_camel_case_and_skips_absent_fields() {
        let item = Item {
            id: "1".to_string(),
            name: "Chair".to_string(),
            reason_for_removal: Some("broken leg".to_string()),
            photo_url: None,
            age: Some(4.0),
            comments: None,
            date_removed: None,
            removal_method: None,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "1", "name": "Chair", "reasonForRemoval": "broken leg", "age": 4.0})
        );
    }

    #[test]
    fn item_accepts_minimal_body() {
        let item: Item = serde_json::from_str(r#"{"id":"3","name":"Lamp"}"#).unwrap();
        assert_eq!(item.id, "3");
        assert!(item.age.is_none());
    }

    #[test]
    fn item_rejects_missing_name() {
        let result: Result<Item, _> = serde_json::from_str(r#"{"id":"3"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn decimal_ids() {
        assert!(is_decimal_id("10"));
        assert!(!is_decimal_id("ten"));
        assert!(!is_decimal_id(""));
    }
}
