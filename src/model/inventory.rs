use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Laptop",
        "sku": "LAP-001",
        "category": "Electronics",
        "stock": 15,
        "min_stock": 5,
        "max_stock": 50,
        "price": 1200.0
    })
)]
pub struct InventoryItem {
    pub id: u64,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub stock: i64,
    pub min_stock: i64,
    pub max_stock: i64,
    pub price: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct NewInventoryItem {
    #[schema(example = "Laptop")]
    pub name: String,
    #[schema(example = "LAP-001")]
    pub sku: String,
    #[schema(example = "Electronics")]
    pub category: String,
    #[schema(example = 15)]
    pub stock: i64,
    #[schema(example = 5)]
    pub min_stock: i64,
    #[schema(example = 50)]
    pub max_stock: i64,
    #[schema(example = 1200.0)]
    pub price: f64,
}

impl NewInventoryItem {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.sku.trim().is_empty() {
            return Err("sku must not be empty".to_string());
        }
        if self.stock < 0 || self.min_stock < 0 || self.max_stock < 0 {
            return Err("stock levels must not be negative".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err("price must be a non-negative number".to_string());
        }
        Ok(())
    }

    pub fn into_item(self, id: u64) -> InventoryItem {
        InventoryItem {
            id,
            name: self.name,
            sku: self.sku,
            category: self.category,
            stock: self.stock,
            min_stock: self.min_stock,
            max_stock: self.max_stock,
            price: self.price,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct InventoryPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub stock: Option<i64>,
    pub min_stock: Option<i64>,
    pub max_stock: Option<i64>,
    pub price: Option<f64>,
}

impl InventoryPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.sku.is_none()
            && self.category.is_none()
            && self.stock.is_none()
            && self.min_stock.is_none()
            && self.max_stock.is_none()
            && self.price.is_none()
    }

    pub fn validate(&self) -> Result<(), String> {
        let negative = [self.stock, self.min_stock, self.max_stock]
            .into_iter()
            .flatten()
            .any(|level| level < 0);
        if negative {
            return Err("stock levels must not be negative".to_string());
        }
        if let Some(price) = self.price {
            if !price.is_finite() || price < 0.0 {
                return Err("price must be a non-negative number".to_string());
            }
        }
        Ok(())
    }
}

impl InventoryItem {
    pub fn apply(&mut self, patch: InventoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(sku) = patch.sku {
            self.sku = sku;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(min_stock) = patch.min_stock {
            self.min_stock = min_stock;
        }
        if let Some(max_stock) = patch.max_stock {
            self.max_stock = max_stock;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_items: usize,
    pub low_stock_items: usize,
    pub out_of_stock_items: usize,
    pub total_value: f64,
}

impl InventoryStats {
    pub fn from_items(items: &[InventoryItem]) -> Self {
        Self {
            total_items: items.len(),
            low_stock_items: items.iter().filter(|i| i.stock <= i.min_stock).count(),
            out_of_stock_items: items.iter().filter(|i| i.stock == 0).count(),
            total_value: items.iter().map(|i| i.stock as f64 * i.price).sum(),
        }
    }
}
