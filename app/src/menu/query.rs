//! Search, filter and sort over the catalog. Each stage narrows or reorders
//! the previous stage's output; the catalog itself is never touched.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use err_derive::Error;
use log::*;
use serde::{Deserialize, Serialize};

use super::models::{CatalogItem, Category};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryFilter {
    All,
    Only(Category),
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DietFilter {
    All,
    Veg,
    NonVeg,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    Popular,
    Rating,
    PriceLow,
    PriceHigh,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(display = "Unrecognised {}: {:?}", what, value)]
pub struct ParamParseError {
    what: &'static str,
    value: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParameters {
    pub search: String,
    pub category: CategoryFilter,
    pub diet: DietFilter,
    pub sort: SortKey,
}

pub fn query(items: &[CatalogItem], params: &QueryParameters) -> Vec<CatalogItem> {
    let needle = params.search.to_lowercase();
    let mut result = items
        .iter()
        .filter(|item| needle.is_empty() || item.matches_text(&needle))
        .filter(|item| params.category.admits(item))
        .filter(|item| params.diet.admits(item))
        .cloned()
        .collect::<Vec<_>>();

    // `sort_by` is stable, so ties keep catalog order.
    result.sort_by(|a, b| params.sort.compare(a, b));

    debug!("Query {:?} -> {} items", params, result.len());
    result
}

impl CategoryFilter {
    fn admits(&self, item: &CatalogItem) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => item.category == *c,
        }
    }
}

impl DietFilter {
    fn admits(&self, item: &CatalogItem) -> bool {
        match self {
            DietFilter::All => true,
            DietFilter::Veg => item.is_veg,
            DietFilter::NonVeg => !item.is_veg,
        }
    }
}

impl SortKey {
    fn compare(&self, a: &CatalogItem, b: &CatalogItem) -> Ordering {
        match self {
            SortKey::Popular => b.review_count.cmp(&a.review_count),
            SortKey::Rating => b.rating.total_cmp(&a.rating),
            SortKey::PriceLow => a.price.cmp(&b.price),
            SortKey::PriceHigh => b.price.cmp(&a.price),
        }
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        CategoryFilter::All
    }
}

impl Default for DietFilter {
    fn default() -> Self {
        DietFilter::All
    }
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Popular
    }
}

impl FromStr for CategoryFilter {
    type Err = ParamParseError;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        if src == "all" {
            return Ok(CategoryFilter::All);
        }
        src.parse::<Category>()
            .map(CategoryFilter::Only)
            .map_err(|_| ParamParseError::new("category", src))
    }
}

impl FromStr for DietFilter {
    type Err = ParamParseError;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        match src {
            "all" => Ok(DietFilter::All),
            "veg" => Ok(DietFilter::Veg),
            "non-veg" => Ok(DietFilter::NonVeg),
            _ => Err(ParamParseError::new("diet", src)),
        }
    }
}

impl FromStr for SortKey {
    type Err = ParamParseError;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        match src {
            "popular" => Ok(SortKey::Popular),
            "rating" => Ok(SortKey::Rating),
            "price-low" => Ok(SortKey::PriceLow),
            "price-high" => Ok(SortKey::PriceHigh),
            _ => Err(ParamParseError::new("sort key", src)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            SortKey::Popular => "popular",
            SortKey::Rating => "rating",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
        };
        fmt.write_str(s)
    }
}

impl ParamParseError {
    fn new(what: &'static str, value: &str) -> Self {
        ParamParseError {
            what,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::menu::data;
    use crate::money::Price;

    fn catalog() -> Vec<CatalogItem> {
        data::standard_items().expect("standard items")
    }

    fn ids(items: &[CatalogItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    fn item(id: &str, cents: u64, rating: f32, reviews: u32) -> CatalogItem {
        let mut it = catalog().remove(0);
        it.id = id.parse().expect("id");
        it.price = Price::cents(cents);
        it.rating = rating;
        it.review_count = reviews;
        it
    }

    #[test]
    fn default_parameters_sort_by_popularity() {
        let result = query(&catalog(), &QueryParameters::default());

        assert_eq!(result.len(), 15);
        assert_eq!(result[0].id.as_str(), "burger-1");
        assert_eq!(result[1].id.as_str(), "pizza-2");
        assert!(result
            .windows(2)
            .all(|w| w[0].review_count >= w[1].review_count));
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_description() {
        let params = QueryParameters {
            search: "MANGO".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&query(&catalog(), &params)), vec!["drink-1"]);

        let params = QueryParameters {
            search: "espresso".to_string(),
            ..Default::default()
        };
        // Popularity: latte 345, tiramisu 189.
        assert_eq!(
            ids(&query(&catalog(), &params)),
            vec!["drink-3", "dessert-3"]
        );
    }

    #[test]
    fn category_and_diet_filters_compose() {
        let params = QueryParameters {
            category: CategoryFilter::Only(Category::Pizza),
            diet: DietFilter::NonVeg,
            sort: SortKey::PriceLow,
            ..Default::default()
        };

        assert_eq!(ids(&query(&catalog(), &params)), vec!["pizza-2", "pizza-3"]);
    }

    #[test]
    fn veg_filter_keeps_only_vegetarian_items() {
        let params = QueryParameters {
            diet: DietFilter::Veg,
            ..Default::default()
        };

        let result = query(&catalog(), &params);

        assert_eq!(result.len(), 10);
        assert!(result.iter().all(|i| i.is_veg));
    }

    #[test]
    fn price_sorts_go_both_ways() {
        let asc = QueryParameters {
            sort: SortKey::PriceLow,
            ..Default::default()
        };
        let desc = QueryParameters {
            sort: SortKey::PriceHigh,
            ..Default::default()
        };

        let asc = query(&catalog(), &asc);
        let desc = query(&catalog(), &desc);

        assert_eq!(asc[0].id.as_str(), "drink-2");
        assert_eq!(desc[0].id.as_str(), "pizza-3");
    }

    #[test]
    fn ties_keep_input_order() {
        let items = vec![
            item("a", 500, 4.5, 10),
            item("b", 300, 4.8, 10),
            item("c", 500, 4.5, 20),
            item("d", 500, 4.8, 10),
        ];

        let by = |sort| {
            let params = QueryParameters {
                sort,
                ..Default::default()
            };
            query(&items, &params)
                .into_iter()
                .map(|i| i.id.to_string())
                .collect::<Vec<_>>()
        };

        assert_eq!(by(SortKey::Popular), vec!["c", "a", "b", "d"]);
        assert_eq!(by(SortKey::Rating), vec!["b", "d", "a", "c"]);
        assert_eq!(by(SortKey::PriceLow), vec!["b", "a", "c", "d"]);
        assert_eq!(by(SortKey::PriceHigh), vec!["a", "c", "d", "b"]);
    }

    #[test]
    fn no_match_is_an_empty_listing() {
        let params = QueryParameters {
            search: "sushi".to_string(),
            ..Default::default()
        };

        assert!(query(&catalog(), &params).is_empty());
    }

    #[test]
    fn parameters_parse_from_kebab_case() {
        assert_eq!("non-veg".parse(), Ok(DietFilter::NonVeg));
        assert_eq!("price-high".parse(), Ok(SortKey::PriceHigh));
        assert_eq!(
            "desserts".parse(),
            Ok(CategoryFilter::Only(Category::Desserts))
        );
        assert_eq!("all".parse(), Ok(CategoryFilter::All));
        assert!("cheapest".parse::<SortKey>().is_err());
    }
}
