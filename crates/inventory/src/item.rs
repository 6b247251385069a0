use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use warehouse_core::{DomainError, DomainResult, Money, Quantity};

/// Stock record for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    /// Unit price of the most recent purchase.
    pub price: Money,
    pub quantity: Quantity,
}

/// Product name → stock record, iterated in first-purchase order.
///
/// Names are case-sensitive and used exactly as given; callers trim them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: IndexMap<String, StockItem>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, product: &str) -> Option<&StockItem> {
        self.items.get(product)
    }

    /// Units on hand; an unknown product has none.
    pub fn stock_of(&self, product: &str) -> Quantity {
        self.items.get(product).map_or(0, |item| item.quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StockItem)> {
        self.items.iter().map(|(name, item)| (name.as_str(), item))
    }

    /// Check that `quantity` units of `product` can be withdrawn.
    pub fn ensure_available(&self, product: &str, quantity: Quantity) -> DomainResult<()> {
        match self.items.get(product) {
            Some(item) if item.quantity >= quantity => Ok(()),
            Some(item) => Err(DomainError::insufficient_stock(product, quantity, item.quantity)),
            None => Err(DomainError::insufficient_stock(product, quantity, 0)),
        }
    }

    /// Add purchased units. Creates the record on first purchase; afterwards the
    /// quantity accumulates and the price is replaced by the latest one.
    ///
    /// Quantities saturate at `Quantity::MAX`; callers reject receipts that
    /// would not fit before getting here.
    pub fn receive(&mut self, product: &str, price: Money, quantity: Quantity) {
        match self.items.get_mut(product) {
            Some(item) => {
                item.quantity = item.quantity.saturating_add(quantity);
                item.price = price;
            }
            None => {
                self.items
                    .insert(product.to_string(), StockItem { price, quantity });
            }
        }
    }

    /// Remove sold units. The stored price is left unchanged.
    pub fn withdraw(&mut self, product: &str, quantity: Quantity) -> DomainResult<()> {
        self.ensure_available(product, quantity)?;
        if let Some(item) = self.items.get_mut(product) {
            item.quantity -= quantity;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_receipt_creates_the_record() {
        let mut inv = Inventory::new();
        assert!(inv.is_empty());

        inv.receive("widget", Money::new(2.0), 10);

        assert_eq!(
            inv.get("widget"),
            Some(&StockItem {
                price: Money::new(2.0),
                quantity: 10
            })
        );
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn later_receipt_overwrites_price() {
        let mut inv = Inventory::new();
        inv.receive("widget", Money::new(2.0), 10);
        inv.receive("widget", Money::new(4.0), 5);

        let item = inv.get("widget").unwrap();
        assert_eq!(item.quantity, 15);
        assert_eq!(item.price, Money::new(4.0));
    }

    #[test]
    fn receipt_beyond_capacity_saturates() {
        let mut inv = Inventory::new();
        inv.receive("widget", Money::ZERO, Quantity::MAX - 1);
        inv.receive("widget", Money::ZERO, 5);
        assert_eq!(inv.stock_of("widget"), Quantity::MAX);
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut inv = Inventory::new();
        inv.receive("Widget", Money::new(1.0), 1);
        assert!(inv.get("widget").is_none());
        assert_eq!(inv.stock_of("Widget"), 1);
    }

    #[test]
    fn withdraw_keeps_price_and_reduces_stock() {
        let mut inv = Inventory::new();
        inv.receive("widget", Money::new(2.0), 10);
        inv.withdraw("widget", 10).unwrap();

        let item = inv.get("widget").unwrap();
        assert_eq!(item.quantity, 0);
        assert_eq!(item.price, Money::new(2.0));
    }

    #[test]
    fn over_withdrawal_is_rejected() {
        let mut inv = Inventory::new();
        inv.receive("widget", Money::new(2.0), 3);

        let err = inv.withdraw("widget", 4).unwrap_err();
        assert_eq!(err, DomainError::insufficient_stock("widget", 4, 3));
        assert_eq!(inv.stock_of("widget"), 3);
    }

    #[test]
    fn unknown_product_has_no_stock() {
        let mut inv = Inventory::new();
        let err = inv.withdraw("gadget", 1).unwrap_err();
        assert!(matches!(err, DomainError::InsufficientStock { available: 0, .. }));
        assert!(inv.is_empty());
    }

    #[test]
    fn iteration_follows_first_receipt_order() {
        let mut inv = Inventory::new();
        inv.receive("zeta", Money::new(1.0), 1);
        inv.receive("alpha", Money::new(1.0), 1);
        inv.receive("zeta", Money::new(3.0), 1);

        let names: Vec<&str> = inv.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    proptest! {
        /// Property: quantity is the sum of receipts and price is the last one.
        #[test]
        fn receipts_accumulate_and_last_price_wins(
            receipts in prop::collection::vec((0.01f64..1_000.0, 0u64..1_000), 1..20)
        ) {
            let mut inv = Inventory::new();
            for (price, qty) in &receipts {
                inv.receive("widget", Money::new(*price), *qty);
            }

            let item = inv.get("widget").unwrap();
            let total: u64 = receipts.iter().map(|(_, q)| q).sum();
            prop_assert_eq!(item.quantity, total);
            prop_assert_eq!(item.price, Money::new(receipts.last().unwrap().0));
        }
    }
}
