//! Quotes and quote ladders.

use serde::{Deserialize, Serialize};

use crate::{OrderType, Price, Side, Size};

/// A single resting order proposal.
///
/// Price and size are already on the tick/lot grid when produced by a generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub side: Side,
    pub order_type: OrderType,
    pub price: Price,
    pub size: Size,
}

impl Quote {
    /// Create a limit bid.
    pub fn bid(price: Price, size: Size) -> Self {
        Self {
            side: Side::Bid,
            order_type: OrderType::Limit,
            price,
            size,
        }
    }

    /// Create a limit ask.
    pub fn ask(price: Price, size: Size) -> Self {
        Self {
            side: Side::Ask,
            order_type: OrderType::Limit,
            price,
            size,
        }
    }
}

/// Full two-sided ladder, interleaved bid/ask, innermost level first.
///
/// Position in the ladder is placement priority and is never reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteLadder(Vec<Quote>);

impl QuoteLadder {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Append one level pair: bid first, then ask.
    pub fn push_level(&mut self, bid: Quote, ask: Quote) {
        self.0.push(bid);
        self.0.push(ask);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Quote> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Quote] {
        &self.0
    }

    /// Bid quotes, innermost first.
    pub fn bids(&self) -> impl Iterator<Item = &Quote> {
        self.0.iter().filter(|q| q.side == Side::Bid)
    }

    /// Ask quotes, innermost first.
    pub fn asks(&self) -> impl Iterator<Item = &Quote> {
        self.0.iter().filter(|q| q.side == Side::Ask)
    }

    /// Highest bid price (the innermost bid).
    pub fn best_bid(&self) -> Option<Price> {
        self.bids().map(|q| q.price).max()
    }

    /// Lowest ask price (the innermost ask).
    pub fn best_ask(&self) -> Option<Price> {
        self.asks().map(|q| q.price).min()
    }

    pub fn into_vec(self) -> Vec<Quote> {
        self.0
    }
}

impl<'a> IntoIterator for &'a QuoteLadder {
    type Item = &'a Quote;
    type IntoIter = std::slice::Iter<'a, Quote>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for QuoteLadder {
    type Item = Quote;
    type IntoIter = std::vec::IntoIter<Quote>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
