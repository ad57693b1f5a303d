//! Transaction aggregator - per-order totals and global statistics
//!
//! All arithmetic is done on plain `f64` book prices as read at query time.
//! Genre frequency counts orders, not items: an order touching the same genre
//! through several books counts once for that genre.

use std::collections::{HashMap, HashSet};

use crate::entities::{OrderDetails, OrderLine};
use crate::query::SortOrder;

/// Computed figures for one order
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrderTotals {
    /// sum of quantity x price
    pub total: f64,
    /// mean unit price over the items, 0 for an order without items
    pub average_price: f64,
    pub item_count: usize,
}

/// Sum the lines of one order
pub fn order_totals(lines: &[OrderLine]) -> OrderTotals {
    if lines.is_empty() {
        return OrderTotals::default();
    }
    let total = lines.iter().map(OrderLine::subtotal).sum();
    let price_sum: f64 = lines.iter().map(|line| line.book_price).sum();
    OrderTotals {
        total,
        average_price: price_sum / lines.len() as f64,
        item_count: lines.len(),
    }
}

/// An order together with its computed totals
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub details: OrderDetails,
    pub totals: OrderTotals,
}

impl From<OrderDetails> for OrderSummary {
    fn from(details: OrderDetails) -> Self {
        let totals = order_totals(&details.lines);
        Self { details, totals }
    }
}

impl OrderSummary {
    /// Case-insensitive partial match against any item's book title
    pub fn mentions_title(&self, needle_lowercase: &str) -> bool {
        self.details
            .lines
            .iter()
            .any(|line| line.book_title.to_lowercase().contains(needle_lowercase))
    }
}

/// Ordering requested for a transaction listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarySort {
    Amount(SortOrder),
    AveragePrice(SortOrder),
}

impl SummarySort {
    /// `orderByAmount` takes precedence when both are given
    pub fn from_params(amount: Option<SortOrder>, price: Option<SortOrder>) -> Option<Self> {
        amount
            .map(Self::Amount)
            .or_else(|| price.map(Self::AveragePrice))
    }
}

/// Stable sort: ties keep their incoming (newest first) order
pub fn sort_summaries(summaries: &mut [OrderSummary], sort: SummarySort) {
    let (key, order): (fn(&OrderSummary) -> f64, SortOrder) = match sort {
        SummarySort::Amount(order) => (|s| s.totals.total, order),
        SummarySort::AveragePrice(order) => (|s| s.totals.average_price, order),
    };
    summaries.sort_by(|a, b| {
        let ordering = key(a).total_cmp(&key(b));
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Number of orders touching a genre
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreFrequency {
    pub genre: String,
    pub orders: u64,
}

/// Statistics across a set of orders
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionStatistics {
    pub total_transactions: u64,
    pub average_transaction_value: f64,
    pub top_genre: Option<String>,
    pub least_genre: Option<String>,
    /// In first-encountered order
    pub genre_frequency: Vec<GenreFrequency>,
}

/// Aggregate statistics.
///
/// `orders` are visited in the given order and each order's lines by item id;
/// on equal frequency the genre encountered first wins both `top_genre` and
/// `least_genre`.
pub fn compute_statistics(orders: &[OrderDetails]) -> TransactionStatistics {
    let mut frequency: Vec<GenreFrequency> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut value_sum = 0.0;

    for details in orders {
        value_sum += order_totals(&details.lines).total;

        let mut lines: Vec<&OrderLine> = details.lines.iter().collect();
        lines.sort_by_key(|line| line.item.id);

        let mut seen: HashSet<&str> = HashSet::new();
        for genre in lines.iter().filter_map(|line| line.genre_name.as_deref()) {
            if !seen.insert(genre) {
                continue;
            }
            match index.get(genre) {
                Some(&at) => frequency[at].orders += 1,
                None => {
                    index.insert(genre, frequency.len());
                    frequency.push(GenreFrequency {
                        genre: genre.to_string(),
                        orders: 1,
                    });
                }
            }
        }
    }

    let mut top: Option<&GenreFrequency> = None;
    let mut least: Option<&GenreFrequency> = None;
    for entry in &frequency {
        if top.is_none_or(|best| entry.orders > best.orders) {
            top = Some(entry);
        }
        if least.is_none_or(|worst| entry.orders < worst.orders) {
            least = Some(entry);
        }
    }

    let total_transactions = orders.len() as u64;
    let average_transaction_value = if orders.is_empty() {
        0.0
    } else {
        value_sum / orders.len() as f64
    };

    TransactionStatistics {
        total_transactions,
        average_transaction_value,
        top_genre: top.map(|entry| entry.genre.clone()),
        least_genre: least.map(|entry| entry.genre.clone()),
        genre_frequency: frequency,
    }
}
