use std::fmt;
use std::str::FromStr;

use err_derive::Error;
use serde::{Deserialize, Serialize};

use crate::money::Price;
use infra::ids::{Entity, Id};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Pizza,
    Burgers,
    Desserts,
    Drinks,
    Healthy,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(display = "Unknown category: {:?}", _0)]
pub struct UnknownCategory(pub String);

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CategoryInfo {
    pub id: Category,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: Id<CatalogItem>,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image: String,
    pub category: Category,
    pub rating: f32,
    pub review_count: u32,
    pub is_veg: bool,
    #[serde(default)]
    pub is_hot: bool,
    #[serde(default)]
    pub is_bestseller: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Pizza,
        Category::Burgers,
        Category::Desserts,
        Category::Drinks,
        Category::Healthy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Pizza => "pizza",
            Category::Burgers => "burgers",
            Category::Desserts => "desserts",
            Category::Drinks => "drinks",
            Category::Healthy => "healthy",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == src)
            .ok_or_else(|| UnknownCategory(src.to_string()))
    }
}

impl CatalogItem {
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
    }
}

impl Entity for CatalogItem {
    const PREFIX: &'static str = "item";
}
