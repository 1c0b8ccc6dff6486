//! Canonical order entities.
//!
//! An [`Order`] is immutable once it is part of a snapshot. Other components keep
//! auxiliary state keyed by [`OrderId`] and never hold references into the list,
//! so the synchronizer can replace the whole list on every push.

use crate::model::OrderStatus;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type-safe identifier for the user whose orders are synchronized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One purchased line. Has no identity of its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    pub name: String,
    pub image: String,
    pub size: String,
    pub color: String,
    pub unit_price: Decimal,
    /// Always at least 1.
    pub quantity: u32,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Represents a customer order after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub order_id: OrderId,
    pub order_number: String,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    /// Display order is insertion order.
    pub items: Vec<OrderItem>,
    pub sub_total: Decimal,
    pub tax_amount: Decimal,
    pub discount: Decimal,
    pub platform_fee: Decimal,
    pub delivery_fee: Decimal,
    /// Authoritative; never recomputed from the other amounts.
    pub final_total: Decimal,
    pub delivery_address: String,
    pub payment_method: String,
}

impl Order {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}
