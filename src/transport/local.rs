//! Serves the in-memory catalog through the same REST-style surface as the
//! remote admin API.

use crate::descriptor::EntityKind;
use crate::lifecycle::{Catalog, CatalogError};
use crate::model::StoreId;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport, TransportFault};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, instrument};

/// Routes requests to a [`Catalog`] instead of the network.
///
/// Status codes: 200 success, 400 invalid payload or dangling reference,
/// 404 unknown row or route, 405 unsupported method, 409 integrity conflict.
/// A 409 body names the blocking kinds: `{"error": "...", "blocking": ["categories"]}`.
#[derive(Clone)]
pub struct LocalTransport {
    catalog: Catalog,
}

impl LocalTransport {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

/// A parsed `/api/...` path.
#[derive(Debug, PartialEq)]
struct Route {
    kind: EntityKind,
    store_id: StoreId,
    id: Option<String>,
}

fn parse_route(path: &str) -> Option<Route> {
    let rest = path.strip_prefix("/api/")?;
    let parts: Vec<&str> = rest.trim_end_matches('/').split('/').collect();
    match parts.as_slice() {
        ["stores"] => Some(Route {
            kind: EntityKind::Store,
            store_id: StoreId::new(""),
            id: None,
        }),
        ["stores", id] => Some(Route {
            kind: EntityKind::Store,
            store_id: StoreId::new(*id),
            id: Some((*id).to_string()),
        }),
        [store, segment] => Some(Route {
            kind: nested_kind(segment)?,
            store_id: StoreId::new(*store),
            id: None,
        }),
        [store, segment, id] => Some(Route {
            kind: nested_kind(segment)?,
            store_id: StoreId::new(*store),
            id: Some((*id).to_string()),
        }),
        _ => None,
    }
}

fn nested_kind(segment: &str) -> Option<EntityKind> {
    EntityKind::from_segment(segment).filter(|kind| *kind != EntityKind::Store)
}

fn error_response(err: &CatalogError) -> ApiResponse {
    let message = err.to_string();
    match err {
        CatalogError::NotFound { .. } => ApiResponse::new(404, json!({ "error": message })),
        CatalogError::Invalid { .. } | CatalogError::DanglingReference(_) => {
            ApiResponse::new(400, json!({ "error": message }))
        }
        CatalogError::Conflict { blocking, .. } => {
            let blocking: Vec<&str> = blocking.iter().map(|k| k.descriptor().segment).collect();
            ApiResponse::new(409, json!({ "error": message, "blocking": blocking }))
        }
        CatalogError::Unavailable { .. } => ApiResponse::new(503, json!({ "error": message })),
    }
}

#[async_trait]
impl Transport for LocalTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportFault> {
        let Some(route) = parse_route(&request.path) else {
            debug!("No such route");
            return Ok(ApiResponse::new(404, json!({ "error": "not found" })));
        };

        let body = request.body.unwrap_or(Value::Null);
        let Route { kind, store_id, id } = route;
        let result = match (request.method, id) {
            (Method::Get, None) => self.catalog.list_json(kind, &store_id).await,
            (Method::Post, None) => self.catalog.create_json(kind, &store_id, body).await,
            (Method::Get, Some(id)) => self.catalog.get_json(kind, &store_id, &id).await,
            (Method::Patch, Some(id)) => self.catalog.update_json(kind, &store_id, &id, body).await,
            (Method::Delete, Some(id)) => self.catalog.delete_json(kind, &store_id, &id).await,
            _ => return Ok(ApiResponse::new(405, json!({ "error": "method not allowed" }))),
        };

        let response = match result {
            Ok(value) => ApiResponse::ok(value),
            Err(e) => error_response(&e),
        };
        debug!(status = response.status, "Handled");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::CatalogSystem;

    #[test]
    fn test_parse_routes() {
        assert_eq!(
            parse_route("/api/store_1/billboards/billboard_2"),
            Some(Route {
                kind: EntityKind::Billboard,
                store_id: StoreId::new("store_1"),
                id: Some("billboard_2".into()),
            })
        );
        assert_eq!(parse_route("/api/stores").map(|r| r.kind), Some(EntityKind::Store));
        assert_eq!(parse_route("/api/store_1/widgets"), None);
        assert_eq!(parse_route("/dashboard"), None);
    }

    #[tokio::test]
    async fn test_conflict_body_names_blocking_kinds() {
        let system = CatalogSystem::new();
        let transport = LocalTransport::new(system.catalog());

        let store = transport
            .send(ApiRequest::new(Method::Post, "/api/stores").with_body(json!({ "name": "Main" })))
            .await
            .unwrap();
        assert_eq!(store.status, 200);
        let store_id = store.body["id"].as_str().unwrap().to_string();

        let billboard = transport
            .send(
                ApiRequest::new(Method::Post, format!("/api/{store_id}/billboards"))
                    .with_body(json!({ "label": "Sale", "imageUrl": "https://img/sale.png" })),
            )
            .await
            .unwrap();
        let billboard_id = billboard.body["id"].as_str().unwrap().to_string();

        transport
            .send(
                ApiRequest::new(Method::Post, format!("/api/{store_id}/categories"))
                    .with_body(json!({ "name": "Shoes", "billboardId": billboard_id })),
            )
            .await
            .unwrap();

        let response = transport
            .send(ApiRequest::new(
                Method::Delete,
                format!("/api/{store_id}/billboards/{billboard_id}"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status, 409);
        assert_eq!(response.status_text, "Conflict");
        assert_eq!(response.body["blocking"], json!(["categories"]));
    }

    #[tokio::test]
    async fn test_missing_row_is_404() {
        let system = CatalogSystem::new();
        let transport = LocalTransport::new(system.catalog());

        let response = transport
            .send(ApiRequest::new(Method::Get, "/api/stores/store_404"))
            .await
            .unwrap();
        assert_eq!(response.status, 404);

        let response = transport
            .send(ApiRequest::new(Method::Patch, "/api/stores"))
            .await
            .unwrap();
        assert_eq!(response.status, 405);
    }
}
