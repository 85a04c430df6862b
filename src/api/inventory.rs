use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::model::inventory::{InventoryItem, InventoryPatch, InventoryStats, NewInventoryItem};
use crate::store::Store;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ReorderRequest {
    /// Target stock level; the item's own `max_stock` when omitted
    #[serde(alias = "maxStock")]
    #[schema(example = 50)]
    pub max_stock: Option<i64>,
}

/// List inventory
#[utoipa::path(
    get,
    path = "/api/inventory",
    responses(
        (status = 200, description = "All inventory items ordered by id", body = [InventoryItem]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Inventory"
)]
pub async fn list_inventory(store: web::Data<dyn Store>) -> Result<HttpResponse, ApiError> {
    let items = store.list_inventory().await?;
    info!(count = items.len(), "Retrieved inventory items");
    Ok(HttpResponse::Ok().json(items))
}

/// Inventory statistics
#[utoipa::path(
    get,
    path = "/api/inventory/stats",
    responses(
        (status = 200, description = "Stock level summary", body = InventoryStats),
        (status = 500, description = "Internal server error")
    ),
    tag = "Inventory"
)]
pub async fn inventory_stats(store: web::Data<dyn Store>) -> Result<HttpResponse, ApiError> {
    let items = store.list_inventory().await?;
    Ok(HttpResponse::Ok().json(InventoryStats::from_items(&items)))
}

#[utoipa::path(
    get,
    path = "/api/inventory/{item_id}",
    params(
        ("item_id", Path, description = "Inventory item ID")
    ),
    responses(
        (status = 200, body = InventoryItem),
        (status = 404, description = "Inventory item not found")
    ),
    tag = "Inventory"
)]
pub async fn get_inventory_item(
    store: web::Data<dyn Store>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    match store.find_inventory_item(path.into_inner()).await? {
        Some(item) => Ok(HttpResponse::Ok().json(item)),
        None => Err(ApiError::NotFound("Inventory item")),
    }
}

#[utoipa::path(
    post,
    path = "/api/inventory",
    request_body = NewInventoryItem,
    responses(
        (status = 201, description = "Inventory item created", body = InventoryItem),
        (status = 400, description = "Invalid payload"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Inventory"
)]
pub async fn create_inventory_item(
    store: web::Data<dyn Store>,
    payload: web::Json<NewInventoryItem>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate().map_err(ApiError::Validation)?;

    let item = store.insert_inventory_item(payload).await?;
    info!(item_id = item.id, sku = %item.sku, "Inventory item created");

    Ok(HttpResponse::Created().json(item))
}

#[utoipa::path(
    put,
    path = "/api/inventory/{item_id}",
    params(
        ("item_id", Path, description = "Inventory item ID")
    ),
    request_body = InventoryPatch,
    responses(
        (status = 200, description = "Inventory item updated", body = InventoryItem),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Inventory item not found")
    ),
    tag = "Inventory"
)]
pub async fn update_inventory_item(
    store: web::Data<dyn Store>,
    path: web::Path<u64>,
    body: web::Json<InventoryPatch>,
) -> Result<HttpResponse, ApiError> {
    let item_id = path.into_inner();
    let patch = body.into_inner();

    if patch.is_empty() {
        return Err(ApiError::Validation(
            "No fields provided for update".to_string(),
        ));
    }
    patch.validate().map_err(ApiError::Validation)?;

    match store.update_inventory_item(item_id, patch).await? {
        Some(item) => {
            info!(item_id, "Inventory item updated");
            Ok(HttpResponse::Ok().json(item))
        }
        None => Err(ApiError::NotFound("Inventory item")),
    }
}

/// Restock an item up to its maximum level
#[utoipa::path(
    put,
    path = "/api/inventory/{item_id}/reorder",
    params(
        ("item_id", Path, description = "Inventory item ID")
    ),
    request_body = ReorderRequest,
    responses(
        (status = 200, description = "Item reordered", body = Object, example = json!({
            "message": "Item reordered successfully",
            "newStock": 50
        })),
        (status = 400, description = "Invalid stock level"),
        (status = 404, description = "Inventory item not found")
    ),
    tag = "Inventory"
)]
pub async fn reorder_inventory_item(
    store: web::Data<dyn Store>,
    path: web::Path<u64>,
    body: Option<web::Json<ReorderRequest>>,
) -> Result<HttpResponse, ApiError> {
    let item_id = path.into_inner();
    let request = body.map(|b| b.into_inner()).unwrap_or_default();

    let target = match request.max_stock {
        Some(level) => level,
        None => {
            store
                .find_inventory_item(item_id)
                .await?
                .ok_or(ApiError::NotFound("Inventory item"))?
                .max_stock
        }
    };
    if target < 0 {
        return Err(ApiError::Validation(
            "stock levels must not be negative".to_string(),
        ));
    }

    let patch = InventoryPatch {
        stock: Some(target),
        ..Default::default()
    };
    let item = store
        .update_inventory_item(item_id, patch)
        .await?
        .ok_or(ApiError::NotFound("Inventory item"))?;

    info!(item_id, new_stock = item.stock, "Inventory item reordered");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Item reordered successfully",
        "newStock": item.stock
    })))
}

#[utoipa::path(
    delete,
    path = "/api/inventory/{item_id}",
    params(
        ("item_id", Path, description = "Inventory item ID")
    ),
    responses(
        (status = 200, description = "Inventory item deleted"),
        (status = 404, description = "Inventory item not found")
    ),
    tag = "Inventory"
)]
pub async fn delete_inventory_item(
    store: web::Data<dyn Store>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let item_id = path.into_inner();

    if !store.delete_inventory_item(item_id).await? {
        return Err(ApiError::NotFound("Inventory item"));
    }

    info!(item_id, "Inventory item deleted");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Inventory item deleted successfully"
    })))
}
