//! # Presentation
//!
//! Stateless assembly of view-models from the snapshot, disclosure state and tracking
//! progress. Nothing here is cached; every call recomputes from its inputs.

use crate::config::TimelineConfig;
use crate::disclosure::{DisclosureManager, DisclosurePhase};
use crate::model::{Order, OrderId, OrderItem, OrderStatus};
use crate::normalizer::{derive, format_currency, status_icon};
use crate::sync::OrderSnapshot;
use crate::tracking::{TrackedStep, TrackingProgress};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemLine {
    pub name: String,
    pub image: String,
    pub size: String,
    pub color: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    pub order_id: OrderId,
    pub order_number: String,
    pub status_label: &'static str,
    pub status_color: &'static str,
    pub status_icon: &'static str,
    pub order_date: String,
    pub estimated_delivery: String,
    pub total: String,
    pub item_count: usize,
    pub phase: DisclosurePhase,
    pub height: f32,
    pub items: Vec<ItemLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayStep {
    pub label: &'static str,
    pub icon: &'static str,
    pub progress: f32,
    pub reached: bool,
}

/// `rejected_status` carries a feed status the lifecycle refused, so the view can
/// reconcile the overlay with the row that already shows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingOverlay {
    pub order_id: OrderId,
    pub order_number: String,
    pub cancelled: bool,
    pub rejected_status: Option<OrderStatus>,
    pub steps: Vec<OverlayStep>,
}

/// Formatted money amounts of an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountLines {
    pub sub_total: String,
    pub tax_amount: String,
    pub discount: String,
    pub platform_fee: String,
    pub delivery_fee: String,
    pub final_total: String,
}

/// Payload handed to the detail screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub order_id: OrderId,
    pub order_number: String,
    pub status: OrderStatus,
    pub status_label: &'static str,
    pub order_date: DateTime<Utc>,
    pub formatted_date: String,
    pub estimated_delivery: DateTime<Utc>,
    pub formatted_estimated_delivery: String,
    pub items: Vec<ItemLine>,
    pub final_total: Decimal,
    pub amounts: AmountLines,
    pub delivery_address: String,
    pub payment_method: String,
}

fn item_line(item: &OrderItem, symbol: &str) -> ItemLine {
    ItemLine {
        name: item.name.clone(),
        image: item.image.clone(),
        size: item.size.clone(),
        color: item.color.clone(),
        quantity: item.quantity,
        unit_price: format_currency(item.unit_price, symbol),
        line_total: format_currency(item.line_total(), symbol),
    }
}

pub fn assemble_rows(
    snapshot: &OrderSnapshot,
    disclosure: &DisclosureManager,
    config: &TimelineConfig,
) -> Vec<OrderRow> {
    let symbol = config.currency_symbol.as_str();
    snapshot
        .orders()
        .iter()
        .map(|order| {
            let derived = derive(order, config);
            OrderRow {
                order_id: order.order_id.clone(),
                order_number: order.order_number.clone(),
                status_label: derived.status_label,
                status_color: derived.status_color,
                status_icon: derived.status_icon,
                order_date: derived.formatted_date,
                estimated_delivery: derived.formatted_estimated_delivery,
                total: format_currency(order.final_total, symbol),
                item_count: derived.item_count,
                phase: disclosure.phase(&order.order_id),
                height: disclosure.height(&order.order_id),
                items: order.items.iter().map(|i| item_line(i, symbol)).collect(),
            }
        })
        .collect()
}

pub fn tracking_overlay(progress: &TrackingProgress, order: &Order) -> TrackingOverlay {
    let steps = progress
        .visible_steps()
        .into_iter()
        .map(|view| {
            let status = match view.step {
                TrackedStep::Lifecycle(step) => step.status(),
                TrackedStep::Cancelled => OrderStatus::Cancelled,
            };
            OverlayStep {
                label: status.label(),
                icon: status_icon(&status),
                progress: view.progress,
                reached: view.reached,
            }
        })
        .collect();

    TrackingOverlay {
        order_id: order.order_id.clone(),
        order_number: order.order_number.clone(),
        cancelled: progress.status().is_cancelled(),
        rejected_status: progress.rejected_status().cloned(),
        steps,
    }
}

pub fn order_detail(order: &Order, config: &TimelineConfig) -> OrderDetail {
    let derived = derive(order, config);
    let symbol = config.currency_symbol.as_str();
    OrderDetail {
        order_id: order.order_id.clone(),
        order_number: order.order_number.clone(),
        status: order.status.clone(),
        status_label: derived.status_label,
        order_date: order.order_date,
        formatted_date: derived.formatted_date,
        estimated_delivery: derived.estimated_delivery,
        formatted_estimated_delivery: derived.formatted_estimated_delivery,
        items: order.items.iter().map(|i| item_line(i, symbol)).collect(),
        final_total: order.final_total,
        amounts: AmountLines {
            sub_total: format_currency(order.sub_total, symbol),
            tax_amount: format_currency(order.tax_amount, symbol),
            discount: format_currency(order.discount, symbol),
            platform_fee: format_currency(order.platform_fee, symbol),
            delivery_fee: format_currency(order.delivery_fee, symbol),
            final_total: format_currency(order.final_total, symbol),
        },
        delivery_address: order.delivery_address.clone(),
        payment_method: order.payment_method.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize_value;
    use serde_json::json;
    use std::time::Duration;
    use tokio::time::Instant;

    fn order() -> Order {
        normalize_value(&json!({
            "orderId": "ord_7",
            "orderNumber": "A-7",
            "orderDate": "2026-04-10T12:00:00Z",
            "status": "confirmed",
            "items": [
                { "name": "Lamp", "price": "1250", "quantity": 1 },
                { "name": "Bulb", "price": "2.5", "quantity": 4 }
            ],
            "subTotal": "1260",
            "discount": "-10",
            "finalTotal": "1250.00",
            "deliveryAddress": "9 Elm St",
            "paymentMethod": "card"
        }))
        .unwrap()
    }

    #[test]
    fn test_rows_combine_order_and_disclosure() {
        let config = TimelineConfig::default();
        let snapshot = OrderSnapshot::new(vec![order()], 1);
        let mut disclosure = DisclosureManager::from_config(&config);
        let t0 = Instant::now();
        disclosure.toggle(&OrderId::from("ord_7"), 2, t0);
        disclosure.on_frame(t0 + config.disclosure_duration());

        let rows = assemble_rows(&snapshot, &disclosure, &config);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.status_label, "Confirmed");
        assert_eq!(row.total, "$1,250.00");
        assert_eq!(row.order_date, "Apr 10, 2026");
        assert_eq!(row.estimated_delivery, "Apr 15, 2026");
        assert_eq!(row.phase, DisclosurePhase::Expanded);
        assert_eq!(row.height, 2.0 * config.row_height);
        assert_eq!(row.items[1].line_total, "$10.00");
    }

    #[test]
    fn test_overlay_lists_reached_steps() {
        let order = order();
        let t0 = Instant::now();
        let progress = TrackingProgress::open(&order, t0, Duration::from_millis(500));

        let overlay = tracking_overlay(&progress, &order);
        assert!(!overlay.cancelled);
        let labels: Vec<&str> = overlay.steps.iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            vec!["Pending", "Processing", "Confirmed", "Shipped", "Delivered"]
        );
        let reached: Vec<bool> = overlay.steps.iter().map(|s| s.reached).collect();
        assert_eq!(reached, vec![true, true, true, false, false]);
        assert_eq!(overlay.rejected_status, None);
    }

    #[test]
    fn test_row_and_overlay_serialize_camel_case() {
        let config = TimelineConfig::default();
        let order = order();
        let snapshot = OrderSnapshot::new(vec![order.clone()], 1);
        let disclosure = DisclosureManager::from_config(&config);
        let rows = assemble_rows(&snapshot, &disclosure, &config);
        let row = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(row["orderId"], "ord_7");
        assert_eq!(row["statusLabel"], "Confirmed");
        assert_eq!(row["itemCount"], 2);
        assert_eq!(row["items"][0]["lineTotal"], "$1,250.00");
        assert!(row.get("order_id").is_none());

        let progress = TrackingProgress::open(&order, Instant::now(), Duration::from_millis(500));
        let overlay = serde_json::to_value(tracking_overlay(&progress, &order)).unwrap();
        assert_eq!(overlay["orderNumber"], "A-7");
        assert!(overlay["rejectedStatus"].is_null());
    }

    #[test]
    fn test_detail_serializes_for_navigation() {
        let detail = order_detail(&order(), &TimelineConfig::default());
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["orderId"], "ord_7");
        assert_eq!(value["status"], "confirmed");
        assert_eq!(value["amounts"]["discount"], "-$10.00");
        assert_eq!(value["items"][0]["unitPrice"], "$1,250.00");
        assert_eq!(value["paymentMethod"], "card");
    }
}
