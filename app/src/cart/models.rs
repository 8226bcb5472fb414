use std::convert::TryFrom;

use serde::Serialize;

use crate::menu::CatalogItem;
use crate::money::Price;
use infra::ids::Id;

/// One item in the cart. Name, price and image are copied from the catalog
/// when the line is created and never refreshed afterwards.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item_id: Id<CatalogItem>,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub quantity: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct CartState {
    lines: Vec<CartLine>,
    panel_open: bool,
}

impl CartLine {
    pub(super) fn for_item(item: &CatalogItem, quantity: u32) -> Self {
        CartLine {
            item_id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            image: item.image.clone(),
            quantity,
        }
    }

    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }
}

impl CartState {
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, id: &Id<CatalogItem>) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.item_id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn total_item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub(super) fn line_mut(&mut self, id: &Id<CatalogItem>) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| &l.item_id == id)
    }

    pub(super) fn push(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    pub(super) fn remove(&mut self, id: &Id<CatalogItem>) -> Option<CartLine> {
        let idx = self.lines.iter().position(|l| &l.item_id == id)?;
        Some(self.lines.remove(idx))
    }

    /// Sets a line's quantity, removing it at or below zero. Returns whether
    /// anything changed; an absent line is left absent.
    pub(super) fn set_quantity(&mut self, id: &Id<CatalogItem>, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(id).is_some();
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.line_mut(id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    pub(super) fn take_lines(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.lines)
    }

    pub(super) fn clear_lines(&mut self) -> bool {
        if self.lines.is_empty() {
            return false;
        }
        self.lines.clear();
        true
    }

    pub(super) fn set_panel_open(&mut self, visible: bool) -> bool {
        if self.panel_open == visible {
            return false;
        }
        self.panel_open = visible;
        true
    }
}
