use anyhow::Result;
use log::*;

pub mod cart;
pub mod checkout;
pub mod config;
pub mod menu;
pub mod money;
pub mod notice;
pub mod services;
pub mod wishlist;

use crate::cart::Cart;
use crate::checkout::{Checkout, Totals};
use crate::menu::{CatalogItem, Menu};
use crate::notice::Notice;
use crate::wishlist::Wishlist;
use infra::ids::Id;

/// One shopping session. Creating it sets up the catalog and empty cart and
/// wishlist; dropping every handle to it ends the session and closes all
/// subscriptions.
#[derive(Debug, Clone)]
pub struct Storefront {
    menu: Menu,
    cart: Cart,
    wishlist: Wishlist,
    checkout: Checkout,
}

impl Storefront {
    pub fn new(config: &config::Config) -> Result<Self> {
        let menu = Menu::standard()?;
        Self::with_menu(menu, config)
    }

    pub fn with_menu(menu: Menu, config: &config::Config) -> Result<Self> {
        info!("Opening storefront with {} items", menu.items().len());
        let cart = Cart::new();
        let wishlist = Wishlist::new();
        let checkout = Checkout::new(cart.clone(), &config.checkout)?;
        Ok(Storefront {
            menu,
            cart,
            wishlist,
            checkout,
        })
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    pub fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    /// Adds a catalog item by identifier. `None` means nothing was added:
    /// there is no such product, or the quantity was zero.
    pub fn add_to_cart(&self, id: &Id<CatalogItem>, quantity: u32) -> Option<Notice> {
        let item = self.menu.find(id)?;
        if quantity == 0 {
            return None;
        }
        self.cart.add_item(item, quantity);
        let notice = if quantity == 1 {
            Notice::success(format!("{} added to cart!", item.name))
                .with_description(format!("${}", item.price))
        } else {
            Notice::success(format!("Added {}x {} to cart!", quantity, item.name))
        };
        Some(notice)
    }

    pub fn toggle_wishlist(&self, id: &Id<CatalogItem>) -> Option<Notice> {
        self.menu.find(id)?;
        let notice = if self.wishlist.toggle(id) {
            Notice::info("Added to wishlist")
        } else {
            Notice::info("Removed from wishlist")
        };
        Some(notice)
    }

    pub fn wishlist_items(&self) -> Vec<CatalogItem> {
        self.wishlist
            .items()
            .iter()
            .filter_map(|id| self.menu.find(id).cloned())
            .collect()
    }

    pub fn totals(&self) -> Totals {
        self.checkout.totals()
    }
}
