use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use err_derive::Error;
use log::*;
use serde::Serialize;

use crate::services::{Queryable, Request};
use infra::ids::Id;

mod data;
mod models;
mod query;

pub use self::models::{CatalogItem, Category, CategoryInfo, UnknownCategory};
pub use self::query::{
    query, CategoryFilter, DietFilter, ParamParseError, QueryParameters, SortKey,
};

const RELATED_LIMIT: usize = 4;
const BESTSELLER_LIMIT: usize = 4;
const FEATURED_LIMIT: usize = 8;

/// The read-only catalog. Cheap to clone; every clone shares the same items.
#[derive(Debug, Clone)]
pub struct Menu {
    items: Arc<Vec<CatalogItem>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    #[error(display = "Duplicate catalog item: {}", _0)]
    DuplicateItem(String),
    #[error(display = "Empty catalog")]
    Empty,
}

/// The outcome of running the query pipeline. A surface that has not
/// queried yet simply has no `Listing`; an empty one is a valid answer.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Listing {
    pub params: QueryParameters,
    pub items: Vec<CatalogItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowMenu(pub QueryParameters);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowProduct(pub Id<CatalogItem>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedProducts(pub Id<CatalogItem>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bestsellers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Featured(pub Option<Category>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowCategories;

impl Menu {
    pub fn standard() -> Result<Self> {
        Self::from_items(data::standard_items()?)
    }

    pub fn from_items(items: Vec<CatalogItem>) -> Result<Self> {
        if items.is_empty() {
            return Err(MenuError::Empty.into());
        }
        let mut seen = HashSet::new();
        for item in items.iter() {
            if !seen.insert(&item.id) {
                return Err(MenuError::DuplicateItem(item.id.to_string()).into());
            }
        }
        debug!("Built menu of {} items", items.len());
        Ok(Menu {
            items: Arc::new(items),
        })
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn find(&self, id: &Id<CatalogItem>) -> Option<&CatalogItem> {
        self.items.iter().find(|item| &item.id == id)
    }
}

impl Request for ShowMenu {
    type Resp = Listing;
}

impl Queryable<ShowMenu> for Menu {
    fn query(&self, ShowMenu(params): ShowMenu) -> Listing {
        let items = query::query(&self.items, &params);
        Listing { params, items }
    }
}

impl Request for ShowProduct {
    type Resp = Option<CatalogItem>;
}

impl Queryable<ShowProduct> for Menu {
    fn query(&self, ShowProduct(id): ShowProduct) -> Option<CatalogItem> {
        let res = self.find(&id).cloned();
        if res.is_none() {
            debug!("No such product: {}", id);
        }
        res
    }
}

impl Request for RelatedProducts {
    type Resp = Vec<CatalogItem>;
}

impl Queryable<RelatedProducts> for Menu {
    fn query(&self, RelatedProducts(id): RelatedProducts) -> Vec<CatalogItem> {
        let category = match self.find(&id) {
            Some(item) => item.category,
            None => return Vec::new(),
        };
        self.items
            .iter()
            .filter(|item| item.category == category && item.id != id)
            .take(RELATED_LIMIT)
            .cloned()
            .collect()
    }
}

impl Request for Bestsellers {
    type Resp = Vec<CatalogItem>;
}

impl Queryable<Bestsellers> for Menu {
    fn query(&self, _: Bestsellers) -> Vec<CatalogItem> {
        self.items
            .iter()
            .filter(|item| item.is_bestseller)
            .take(BESTSELLER_LIMIT)
            .cloned()
            .collect()
    }
}

impl Request for Featured {
    type Resp = Vec<CatalogItem>;
}

impl Queryable<Featured> for Menu {
    fn query(&self, Featured(category): Featured) -> Vec<CatalogItem> {
        self.items
            .iter()
            .filter(|item| category.map_or(true, |c| item.category == c))
            .take(FEATURED_LIMIT)
            .cloned()
            .collect()
    }
}

impl Request for ShowCategories {
    type Resp = Vec<CategoryInfo>;
}

impl Queryable<ShowCategories> for Menu {
    fn query(&self, _: ShowCategories) -> Vec<CategoryInfo> {
        data::CATEGORIES.to_vec()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn menu() -> Menu {
        Menu::standard().expect("standard menu")
    }

    fn id(s: &str) -> Id<CatalogItem> {
        s.parse().expect("id")
    }

    fn ids(items: &[CatalogItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn standard_menu_has_fifteen_items() {
        assert_eq!(menu().items().len(), 15);
    }

    #[test]
    fn finds_known_product() {
        let item = menu().query(ShowProduct(id("drink-1"))).expect("drink-1");

        assert_eq!(item.name, "Mango Tango Smoothie");
    }

    #[test]
    fn unknown_product_is_not_found() {
        assert_eq!(menu().query(ShowProduct(id("pizza-99"))), None);
    }

    #[test]
    fn related_products_share_category_and_exclude_self() {
        let related = menu().query(RelatedProducts(id("pizza-2")));

        assert_eq!(ids(&related), vec!["pizza-1", "pizza-3"]);
        assert!(menu().query(RelatedProducts(id("nope"))).is_empty());
    }

    #[test]
    fn bestsellers_are_capped_at_four() {
        let best = menu().query(Bestsellers);

        assert_eq!(
            ids(&best),
            vec!["pizza-1", "pizza-2", "burger-1", "dessert-1"]
        );
    }

    #[test]
    fn featured_takes_first_eight_optionally_by_category() {
        assert_eq!(menu().query(Featured(None)).len(), 8);
        assert_eq!(
            ids(&menu().query(Featured(Some(Category::Drinks)))),
            vec!["drink-1", "drink-2", "drink-3"]
        );
    }

    #[test]
    fn lists_categories_in_fixed_order() {
        let cats = menu().query(ShowCategories);

        let ids = cats.iter().map(|c| c.id).collect::<Vec<_>>();
        assert_eq!(ids, Category::ALL.to_vec());
    }

    #[test]
    fn show_menu_keeps_parameters_with_result() {
        let params = QueryParameters {
            search: "bowl".to_string(),
            ..Default::default()
        };

        let listing = menu().query(ShowMenu(params.clone()));

        assert_eq!(listing.params, params);
        assert_eq!(ids(&listing.items), vec!["healthy-1", "healthy-3"]);
    }

    #[test]
    fn rejects_duplicate_identifiers() {
        let mut items = menu().items().to_vec();
        items.push(items[0].clone());

        let err = Menu::from_items(items).expect_err("duplicate");

        assert_eq!(
            err.downcast_ref::<MenuError>(),
            Some(&MenuError::DuplicateItem("pizza-1".to_string()))
        );
    }

    #[test]
    fn rejects_empty_catalog() {
        assert!(Menu::from_items(Vec::new()).is_err());
    }
}
