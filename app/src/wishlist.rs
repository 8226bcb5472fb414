use std::collections::BTreeSet;

use log::*;

use crate::menu::CatalogItem;
use infra::ids::Id;
use infra::store::{Store, Subscription};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WishlistState {
    items: BTreeSet<Id<CatalogItem>>,
}

/// Favourites, kept apart from the cart: no quantities, no ordering.
#[derive(Debug, Clone)]
pub struct Wishlist {
    store: Store<WishlistState>,
}

impl WishlistState {
    pub fn contains(&self, id: &Id<CatalogItem>) -> bool {
        self.items.contains(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Wishlist {
    pub fn new() -> Self {
        Wishlist {
            store: Store::new(WishlistState::default()),
        }
    }

    /// Adds `id` if absent, removes it if present. Returns whether it is
    /// wished for afterwards.
    pub fn toggle(&self, id: &Id<CatalogItem>) -> bool {
        let mut now_present = false;
        self.store.update(|wl| {
            now_present = if wl.items.remove(id) {
                false
            } else {
                wl.items.insert(id.clone())
            };
            true
        });
        debug!("Wishlist toggle {} -> {}", id, now_present);
        now_present
    }

    pub fn contains(&self, id: &Id<CatalogItem>) -> bool {
        self.store.read(|wl| wl.contains(id))
    }

    pub fn items(&self) -> Vec<Id<CatalogItem>> {
        self.store.read(|wl| wl.items.iter().cloned().collect())
    }

    pub fn len(&self) -> usize {
        self.store.read(WishlistState::len)
    }

    pub fn is_empty(&self) -> bool {
        self.store.read(WishlistState::is_empty)
    }

    pub fn subscribe(&self) -> Subscription<WishlistState> {
        self.store.subscribe()
    }
}

impl Default for Wishlist {
    fn default() -> Self {
        Self::new()
    }
}
