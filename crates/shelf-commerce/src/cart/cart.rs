//! Cart and line item types.

use crate::catalog::Book;
use crate::error::CommerceError;
use crate::ids::BookId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A line item in the cart.
///
/// Title, author and unit price are copied from the catalog at add time so
/// the cart renders without re-fetching; the book ID is the key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Book being purchased.
    pub book_id: BookId,
    /// Title at add time.
    pub title: String,
    /// Author at add time.
    pub author: String,
    /// Unit price at add time.
    pub unit_price: Money,
    /// Quantity, always in `1..=stock` as known at the last mutation.
    pub quantity: i64,
}

impl LineItem {
    fn from_book(book: &Book) -> Self {
        Self {
            book_id: book.id.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            unit_price: book.price,
            quantity: 1,
        }
    }

    /// Line total (unit price times quantity).
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// An ordered collection of line items, one per book.
///
/// All mutations keep two invariants: no line ever has quantity outside
/// `1..=stock` (stock as known at the time of the operation), and no two
/// lines share a book ID. Stock can legitimately change between catalog
/// refreshes; the cart does not re-validate against live inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one copy of a book, capped by the book's snapshot stock.
    ///
    /// An existing line below the stock ceiling gains one; a line already
    /// at the ceiling is left as-is (silent no-op, the storefront disables
    /// the button but the ledger enforces the cap regardless). Adding a
    /// book with zero stock is rejected.
    pub fn add(&mut self, book: &Book) -> Result<(), CommerceError> {
        if let Some(existing) = self.items.iter_mut().find(|i| i.book_id == book.id) {
            if existing.quantity < book.stock {
                existing.quantity += 1;
            }
            return Ok(());
        }

        if !book.in_stock() {
            return Err(CommerceError::OutOfStock(book.title.clone()));
        }

        self.items.push(LineItem::from_book(book));
        Ok(())
    }

    /// Remove one copy of a book; a line at quantity 1 is removed whole.
    ///
    /// Unknown IDs are ignored.
    pub fn decrement(&mut self, id: &BookId) {
        if let Some(pos) = self.items.iter().position(|i| &i.book_id == id) {
            if self.items[pos].quantity > 1 {
                self.items[pos].quantity -= 1;
            } else {
                self.items.remove(pos);
            }
        }
    }

    /// Set a line's quantity explicitly, clamped to `[0, stock]`.
    ///
    /// A clamped result of 0 removes the line. Returns whether the line
    /// existed.
    pub fn set_quantity(&mut self, id: &BookId, quantity: i64, stock: i64) -> bool {
        let clamped = quantity.clamp(0, stock.max(0));
        if clamped == 0 {
            return self.remove(id);
        }

        if let Some(item) = self.items.iter_mut().find(|i| &i.book_id == id) {
            item.quantity = clamped;
            true
        } else {
            false
        }
    }

    /// Remove a line unconditionally. Returns whether anything was removed.
    pub fn remove(&mut self, id: &BookId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.book_id != id);
        self.items.len() < len_before
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get a line by book ID.
    pub fn get(&self, id: &BookId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.book_id == id)
    }

    /// Total item count (sum of quantities; drives the cart badge).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct books.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str, price_cents: i64, stock: i64) -> Book {
        Book::new(
            BookId::new(id),
            format!("Title {id}"),
            "Author",
            Money::zar(price_cents),
            stock,
        )
    }

    #[test]
    fn test_add_new_item() {
        let mut cart = Cart::new();
        cart.add(&book("b1", 20000, 3)).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.unique_item_count(), 1);
        let line = cart.get(&BookId::new("b1")).unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.unit_price.amount_cents, 20000);
    }

    #[test]
    fn test_add_same_book_increments() {
        let mut cart = Cart::new();
        let b = book("b1", 20000, 3);
        cart.add(&b).unwrap();
        cart.add(&b).unwrap();

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_add_stops_silently_at_stock_ceiling() {
        let mut cart = Cart::new();
        let b = book("b1", 20000, 2);
        cart.add(&b).unwrap();
        cart.add(&b).unwrap();
        // At the ceiling: no error, no change.
        cart.add(&b).unwrap();

        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_add_out_of_stock_rejected() {
        let mut cart = Cart::new();
        let result = cart.add(&book("b1", 20000, 0));
        assert!(matches!(result, Err(CommerceError::OutOfStock(_))));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrement_removes_at_one() {
        let mut cart = Cart::new();
        let b = book("b1", 20000, 3);
        cart.add(&b).unwrap();
        cart.add(&b).unwrap();

        cart.decrement(&b.id);
        assert_eq!(cart.item_count(), 1);

        cart.decrement(&b.id);
        assert!(cart.is_empty());

        // Unknown id is a no-op.
        cart.decrement(&b.id);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_clamps_to_stock() {
        let mut cart = Cart::new();
        let b = book("b1", 20000, 5);
        cart.add(&b).unwrap();

        assert!(cart.set_quantity(&b.id, 99, 5));
        assert_eq!(cart.get(&b.id).unwrap().quantity, 5);

        assert!(cart.set_quantity(&b.id, 3, 5));
        assert_eq!(cart.get(&b.id).unwrap().quantity, 3);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        let b = book("b1", 20000, 5);
        cart.add(&b).unwrap();

        assert!(cart.set_quantity(&b.id, 0, 5));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add(&book("b1", 20000, 3)).unwrap();
        cart.add(&book("b2", 5000, 3)).unwrap();

        assert!(cart.remove(&BookId::new("b1")));
        assert!(!cart.remove(&BookId::new("b1")));
        assert_eq!(cart.unique_item_count(), 1);

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_never_leaves_bounds() {
        // Mixed op sequence: quantity stays in 1..=stock throughout.
        let mut cart = Cart::new();
        let b = book("b1", 1000, 3);
        for _ in 0..10 {
            cart.add(&b).unwrap();
        }
        assert_eq!(cart.get(&b.id).unwrap().quantity, 3);

        cart.set_quantity(&b.id, -4, 3);
        assert!(cart.get(&b.id).is_none());

        cart.add(&b).unwrap();
        cart.decrement(&b.id);
        assert!(cart.is_empty());
    }
}
