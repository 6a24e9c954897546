//! Book types.

use crate::ids::BookId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A purchasable book as seen in a catalog snapshot.
///
/// Snapshot members are immutable; the backend owns the inventory and the
/// whole snapshot is replaced on refresh, never patched in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Unique book identifier.
    pub id: BookId,
    /// Title.
    pub title: String,
    /// Author.
    pub author: String,
    /// Genre.
    pub genre: Option<String>,
    /// Page count.
    pub pages: Option<i64>,
    /// ISBN, when known.
    pub isbn: Option<String>,
    /// Unit price.
    pub price: Money,
    /// Available stock at snapshot time.
    pub stock: i64,
}

impl Book {
    /// Create a book with the required fields.
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        price: Money,
        stock: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            genre: None,
            pages: None,
            isbn: None,
            price,
            stock,
        }
    }

    /// Check if the book can be added to a cart at all.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_stock() {
        let mut book = Book::new(BookId::new("b1"), "1984", "George Orwell", Money::zar(19900), 3);
        assert!(book.in_stock());

        book.stock = 0;
        assert!(!book.in_stock());
    }
}
