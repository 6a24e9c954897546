//! Point-in-time catalog snapshots.

use crate::catalog::Book;
use crate::ids::BookId;
use serde::{Deserialize, Serialize};

/// Policy constants for supplier reorder recommendations.
///
/// Items at or below `low_stock_threshold` are flagged; the recommended
/// order quantity tops the item back up to `target_level`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReplenishmentPolicy {
    /// Stock at or below this level is considered low.
    pub low_stock_threshold: i64,
    /// Reorders aim to bring stock back up to this level.
    pub target_level: i64,
}

impl Default for ReplenishmentPolicy {
    fn default() -> Self {
        Self {
            low_stock_threshold: 5,
            target_level: 10,
        }
    }
}

/// A low-stock entry with its reorder recommendation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LowStockAlert {
    /// Book flagged as low.
    pub book_id: BookId,
    /// Title (denormalized for display).
    pub title: String,
    /// Author (denormalized for display).
    pub author: String,
    /// ISBN, when the catalog knows it.
    pub isbn: Option<String>,
    /// Stock at snapshot time.
    pub current_stock: i64,
    /// Suggested reorder quantity (target level minus current stock).
    pub recommended_order: i64,
}

/// The most recently fetched set of purchasable books.
///
/// Read-only and replaced wholesale on refresh. Stock figures are valid
/// as of fetch time only; cart operations validate against this snapshot,
/// not against live inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CatalogSnapshot {
    books: Vec<Book>,
}

impl CatalogSnapshot {
    /// Create an empty snapshot (the state before the first fetch).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a snapshot from a freshly fetched book list.
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    /// All books in the snapshot.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Number of books in the snapshot.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Check if the snapshot holds no books.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Look up a book by ID.
    pub fn get(&self, id: &BookId) -> Option<&Book> {
        self.books.iter().find(|b| &b.id == id)
    }

    /// Stock for a book, or 0 if it is not in the snapshot.
    pub fn stock_for(&self, id: &BookId) -> i64 {
        self.get(id).map(|b| b.stock).unwrap_or(0)
    }

    /// Scan for books at or below the policy's low-stock threshold.
    ///
    /// The recommendation is `target_level - current_stock`, floored at 1
    /// so a flagged book never gets a zero-quantity suggestion.
    pub fn low_stock(&self, policy: ReplenishmentPolicy) -> Vec<LowStockAlert> {
        self.books
            .iter()
            .filter(|b| b.stock <= policy.low_stock_threshold)
            .map(|b| LowStockAlert {
                book_id: b.id.clone(),
                title: b.title.clone(),
                author: b.author.clone(),
                isbn: b.isbn.clone(),
                current_stock: b.stock,
                recommended_order: (policy.target_level - b.stock).max(1),
            })
            .collect()
    }
}
