//! Raw order records as delivered by the feed.
//!
//! The remote store is schemaless, so decoding is deliberately lenient: the only hard
//! requirement is an object with a non-blank `orderId`. Everything else is optional,
//! and a field of the wrong type decodes as absent rather than failing the record.

use crate::model::{Order, OrderItem};
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};
use std::str::FromStr;
use thiserror::Error;

/// Why a raw document could not become a [`RawOrder`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DecodeError {
    #[error("Record is not an object (found {0})")]
    NotAnObject(&'static str),

    #[error("Record has no orderId")]
    MissingOrderId,
}

/// A decoded line item; every field optional.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawItem {
    pub name: Option<String>,
    pub image: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i64>,
}

/// A decoded order record; only `order_id` is guaranteed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawOrder {
    pub order_id: String,
    pub order_number: Option<String>,
    pub order_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub items: Vec<RawItem>,
    pub sub_total: Option<Decimal>,
    pub tax_amount: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub platform_fee: Option<Decimal>,
    pub delivery_fee: Option<Decimal>,
    pub final_total: Option<Decimal>,
    pub delivery_address: Option<String>,
    pub payment_method: Option<String>,
}

impl RawOrder {
    /// Decodes a feed document.
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let obj = value
            .as_object()
            .ok_or_else(|| DecodeError::NotAnObject(json_kind(value)))?;

        let order_id = match obj.get("orderId") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err(DecodeError::MissingOrderId),
        };

        let items = obj
            .get("items")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(decode_item).collect())
            .unwrap_or_default();

        Ok(Self {
            order_id,
            order_number: string_field(obj, "orderNumber"),
            order_date: obj.get("orderDate").and_then(decode_instant),
            status: string_field(obj, "status"),
            items,
            sub_total: decimal_field(obj, "subTotal"),
            tax_amount: decimal_field(obj, "taxAmount"),
            discount: decimal_field(obj, "discount"),
            platform_fee: decimal_field(obj, "platformFee"),
            delivery_fee: decimal_field(obj, "deliveryFee"),
            final_total: decimal_field(obj, "finalTotal"),
            delivery_address: string_field(obj, "deliveryAddress"),
            payment_method: string_field(obj, "paymentMethod"),
        })
    }

    /// Encodes back into the feed's document shape.
    pub fn to_value(&self) -> Value {
        let items: Vec<Value> = self
            .items
            .iter()
            .map(|item| {
                json!({
                    "name": item.name,
                    "image": item.image,
                    "size": item.size,
                    "color": item.color,
                    "price": item.price.map(|d| d.to_string()),
                    "quantity": item.quantity,
                })
            })
            .collect();

        json!({
            "orderId": self.order_id,
            "orderNumber": self.order_number,
            "orderDate": self
                .order_date
                .map(|d| d.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            "status": self.status,
            "items": items,
            "subTotal": self.sub_total.map(|d| d.to_string()),
            "taxAmount": self.tax_amount.map(|d| d.to_string()),
            "discount": self.discount.map(|d| d.to_string()),
            "platformFee": self.platform_fee.map(|d| d.to_string()),
            "deliveryFee": self.delivery_fee.map(|d| d.to_string()),
            "finalTotal": self.final_total.map(|d| d.to_string()),
            "deliveryAddress": self.delivery_address,
            "paymentMethod": self.payment_method,
        })
    }
}

impl From<&OrderItem> for RawItem {
    fn from(item: &OrderItem) -> Self {
        Self {
            name: Some(item.name.clone()),
            image: Some(item.image.clone()),
            size: Some(item.size.clone()),
            color: Some(item.color.clone()),
            price: Some(item.unit_price),
            quantity: Some(i64::from(item.quantity)),
        }
    }
}

impl From<&Order> for RawOrder {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.order_id.0.clone(),
            order_number: Some(order.order_number.clone()),
            order_date: Some(order.order_date),
            status: Some(order.status.as_str().to_string()),
            items: order.items.iter().map(RawItem::from).collect(),
            sub_total: Some(order.sub_total),
            tax_amount: Some(order.tax_amount),
            discount: Some(order.discount),
            platform_fee: Some(order.platform_fee),
            delivery_fee: Some(order.delivery_fee),
            final_total: Some(order.final_total),
            delivery_address: Some(order.delivery_address.clone()),
            payment_method: Some(order.payment_method.clone()),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn decode_item(value: &Value) -> Option<RawItem> {
    let obj = value.as_object()?;
    Some(RawItem {
        name: string_field(obj, "name"),
        image: string_field(obj, "image"),
        size: string_field(obj, "size"),
        color: string_field(obj, "color"),
        price: decimal_field(obj, "price"),
        quantity: obj.get("quantity").and_then(decode_integer),
    })
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn decimal_field(obj: &Map<String, Value>, key: &str) -> Option<Decimal> {
    obj.get(key).and_then(decode_decimal)
}

fn decode_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn decode_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Accepts RFC 3339 strings, epoch milliseconds, or `{seconds, nanoseconds}` objects
/// (with or without a leading underscore on the keys).
fn decode_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            DateTime::parse_from_rfc3339(s)
                .map(|d| d.with_timezone(&Utc))
                .ok()
                .or_else(|| s.parse::<i64>().ok().and_then(from_millis))
        }
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(from_millis),
        Value::Object(obj) => {
            let seconds = obj
                .get("seconds")
                .or_else(|| obj.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanos = obj
                .get("nanoseconds")
                .or_else(|| obj.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0);
            Utc.timestamp_opt(seconds, nanos).single()
        }
        _ => None,
    }
}

fn from_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}
