use log::*;

use crate::menu::CatalogItem;
use infra::ids::Id;
use infra::store::{Snapshot, Store, Subscription};

mod models;

pub use self::models::{CartLine, CartState};

/// Handle to the one cart of a session. Clones share state; every surface
/// holds a clone rather than a copy of the lines.
///
/// None of the operations fail. Acting on a line that is not in the cart
/// does nothing, so repeated or stale clicks are harmless.
#[derive(Debug, Clone)]
pub struct Cart {
    store: Store<CartState>,
}

impl Cart {
    pub fn new() -> Self {
        Cart {
            store: Store::new(CartState::default()),
        }
    }

    /// Merges into the existing line for `item`, or appends a new one. A
    /// merged line keeps the name, price and image it was created with.
    pub fn add_item(&self, item: &CatalogItem, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let changed = self.store.update(|cart| match cart.line_mut(&item.id) {
            Some(line) => {
                let merged = line.quantity.saturating_add(quantity);
                let grew = merged != line.quantity;
                line.quantity = merged;
                grew
            }
            None => {
                cart.push(CartLine::for_item(item, quantity));
                true
            }
        });
        if changed {
            debug!("Added {} x {}", quantity, item.id);
        }
    }

    /// Sets the quantity of an existing line; anything at or below zero
    /// removes it.
    pub fn update_quantity(&self, id: &Id<CatalogItem>, quantity: i64) {
        if self.store.update(|cart| cart.set_quantity(id, quantity)) {
            debug!("Set {} to {}", id, quantity);
        }
    }

    pub fn increment(&self, id: &Id<CatalogItem>) {
        self.step(id, 1);
    }

    pub fn decrement(&self, id: &Id<CatalogItem>) {
        self.step(id, -1);
    }

    pub fn remove_item(&self, id: &Id<CatalogItem>) {
        let removed = self.store.update(|cart| cart.remove(id).is_some());
        if removed {
            debug!("Removed {}", id);
        }
    }

    /// Empties the cart and hands back the lines it held, in one update.
    pub fn take_lines(&self) -> Vec<CartLine> {
        let mut taken = Vec::new();
        self.store.update(|cart| {
            taken = cart.take_lines();
            !taken.is_empty()
        });
        if !taken.is_empty() {
            debug!("Took {} lines", taken.len());
        }
        taken
    }

    pub fn clear(&self) {
        if self.store.update(CartState::clear_lines) {
            debug!("Cleared cart");
        }
    }

    pub fn set_panel_open(&self, visible: bool) {
        self.store.update(|cart| cart.set_panel_open(visible));
    }

    pub fn snapshot(&self) -> Snapshot<CartState> {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> Subscription<CartState> {
        self.store.subscribe()
    }

    fn step(&self, id: &Id<CatalogItem>, delta: i64) {
        let changed = self.store.update(|cart| match cart.line(id) {
            Some(line) => {
                let next = i64::from(line.quantity) + delta;
                cart.set_quantity(id, next)
            }
            None => false,
        });
        if changed {
            debug!("Stepped {} by {}", id, delta);
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}
