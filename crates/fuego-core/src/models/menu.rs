use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{id_string, lenient_bool, lenient_f64, lenient_text};

pub const UNNAMED_ITEM: &str = "Item sem nome";
pub const FALLBACK_CATEGORY: &str = "outros";
pub const FALLBACK_IMAGE: &str = "https://images.unsplash.com/photo-1546069901-ba9599a7e63c";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "fallback_category")]
    pub category: String,
    #[serde(default)]
    pub highlight: bool,
    #[serde(default = "fallback_image")]
    pub image: String,
}

fn fallback_category() -> String {
    FALLBACK_CATEGORY.to_string()
}

fn fallback_image() -> String {
    FALLBACK_IMAGE.to_string()
}

/// A `menu_items` row exactly as the database returns it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuItemRow {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub highlight: Option<Value>,
    #[serde(default)]
    pub image: Option<Value>,
}

impl MenuItemRow {
    pub fn normalize(self) -> Option<MenuItem> {
        let id = id_string(self.id.as_ref())?;
        let category = lenient_text(self.category.as_ref())
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(fallback_category);
        Some(MenuItem {
            id,
            name: lenient_text(self.name.as_ref())
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| UNNAMED_ITEM.to_string()),
            description: lenient_text(self.description.as_ref()).unwrap_or_default(),
            price: lenient_f64(self.price.as_ref())
                .filter(|p| *p >= 0.0)
                .unwrap_or(0.0),
            category,
            highlight: lenient_bool(self.highlight.as_ref()).unwrap_or(false),
            image: lenient_text(self.image.as_ref())
                .filter(|i| !i.trim().is_empty())
                .unwrap_or_else(fallback_image),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceUpdate {
    pub price: f64,
}
