//! # Order Normalizer
//!
//! Turns decoded feed records into canonical [`Order`]s. [`normalize`] is total: any
//! [`RawOrder`] yields an order, with defaults standing in for missing or unusable
//! fields. It is also idempotent, so re-normalizing a re-serialized order is a no-op.
//!
//! | Field | Default |
//! |-------|---------|
//! | status | `Unknown` (pending semantics) |
//! | money amounts | `0` |
//! | order date | Unix epoch |
//! | item quantity | `1` when missing or below 1 |
//! | strings | empty |

pub mod derived;
pub mod format;

pub use derived::{derive, estimated_delivery, status_color, status_icon, DerivedFields};
pub use format::{format_currency, format_date};

use crate::model::{DecodeError, Order, OrderId, OrderItem, OrderStatus, RawItem, RawOrder};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

pub fn normalize(raw: &RawOrder) -> Order {
    let status = raw
        .status
        .as_deref()
        .map(OrderStatus::parse)
        .unwrap_or_else(|| OrderStatus::Unknown(String::new()));
    let items: Vec<OrderItem> = raw.items.iter().map(normalize_item).collect();

    if items.is_empty() && !matches!(status, OrderStatus::Pending | OrderStatus::Unknown(_)) {
        debug!(order_id = %raw.order_id, %status, "Order past pending has no items");
    }

    Order {
        order_id: OrderId(raw.order_id.clone()),
        order_number: raw.order_number.clone().unwrap_or_default(),
        order_date: raw.order_date.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        status,
        items,
        sub_total: raw.sub_total.unwrap_or(Decimal::ZERO),
        tax_amount: raw.tax_amount.unwrap_or(Decimal::ZERO),
        discount: raw.discount.unwrap_or(Decimal::ZERO),
        platform_fee: raw.platform_fee.unwrap_or(Decimal::ZERO),
        delivery_fee: raw.delivery_fee.unwrap_or(Decimal::ZERO),
        final_total: raw.final_total.unwrap_or(Decimal::ZERO),
        delivery_address: raw.delivery_address.clone().unwrap_or_default(),
        payment_method: raw.payment_method.clone().unwrap_or_default(),
    }
}

fn normalize_item(raw: &RawItem) -> OrderItem {
    let quantity = match raw.quantity {
        Some(q) if q >= 1 => u32::try_from(q).unwrap_or(u32::MAX),
        _ => 1,
    };
    OrderItem {
        name: raw.name.clone().unwrap_or_default(),
        image: raw.image.clone().unwrap_or_default(),
        size: raw.size.clone().unwrap_or_default(),
        color: raw.color.clone().unwrap_or_default(),
        unit_price: raw.price.unwrap_or(Decimal::ZERO),
        quantity,
    }
}

/// Decodes and normalizes one feed document.
pub fn normalize_value(value: &Value) -> Result<Order, DecodeError> {
    RawOrder::from_value(value).map(|raw| normalize(&raw))
}
