//! Derived display fields. Computed on demand, never stored on the order.

use crate::config::TimelineConfig;
use crate::model::{Order, OrderStatus};
use crate::normalizer::format::format_date;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedFields {
    pub formatted_date: String,
    pub estimated_delivery: DateTime<Utc>,
    pub formatted_estimated_delivery: String,
    pub status_label: &'static str,
    pub status_color: &'static str,
    pub status_icon: &'static str,
    pub item_count: usize,
}

pub fn derive(order: &Order, config: &TimelineConfig) -> DerivedFields {
    let estimated = estimated_delivery(order.order_date, config.delivery_lead_days);
    DerivedFields {
        formatted_date: format_date(order.order_date, &config.date_format),
        estimated_delivery: estimated,
        formatted_estimated_delivery: format_date(estimated, &config.date_format),
        status_label: order.status.label(),
        status_color: status_color(&order.status),
        status_icon: status_icon(&order.status),
        item_count: order.item_count(),
    }
}

/// Hex display color for a status. Unknown statuses use the pending color.
pub fn status_color(status: &OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending | OrderStatus::Unknown(_) => "#F59E0B",
        OrderStatus::Processing => "#3B82F6",
        OrderStatus::Confirmed => "#6366F1",
        OrderStatus::Shipped => "#8B5CF6",
        OrderStatus::Delivered => "#10B981",
        OrderStatus::Cancelled => "#EF4444",
    }
}

/// Icon key for a status.
pub fn status_icon(status: &OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending | OrderStatus::Unknown(_) => "clock",
        OrderStatus::Processing => "cog",
        OrderStatus::Confirmed => "check-circle",
        OrderStatus::Shipped => "truck",
        OrderStatus::Delivered => "package-check",
        OrderStatus::Cancelled => "x-circle",
    }
}

/// `order_date + lead_days`. Saturates at `order_date` when the sum is out of range.
pub fn estimated_delivery(order_date: DateTime<Utc>, lead_days: i64) -> DateTime<Utc> {
    TimeDelta::try_days(lead_days)
        .and_then(|lead| order_date.checked_add_signed(lead))
        .unwrap_or(order_date)
}
