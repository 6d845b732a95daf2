//! ORDERS parser.
//!
//! Walks a segment stream once and assembles a purchase order. Grouping is
//! implicit in EDIFACT: a `LIN` segment starts a line item and the `QTY`,
//! `PRI`, and `IMD` segments that follow apply to the most recently started
//! item. The walker keeps that rule visible as an explicit current-item
//! accumulator.

use serde::{Deserialize, Serialize};

use crate::segment::{format_date, Segment};

/// One order line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Sequential, 1-based.
    pub line_number: u32,
    pub product_code: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub description: Option<String>,
}

/// A purchase order assembled from an ORDERS segment stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedOrder {
    pub order_number: String,
    pub buyer_code: String,
    pub order_date: String,
    pub delivery_date: Option<String>,
    pub items: Vec<OrderItem>,
}

/// Parse result plus the fields that fell back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersOutcome {
    pub order: Option<ParsedOrder>,
    pub warnings: Vec<String>,
}

/// Parse an ORDERS segment stream.
///
/// Returns `None` when no `BGM` segment is found (no order number).
/// Missing buyer or dates degrade to empty values rather than errors.
pub fn parse_orders(segments: &[Segment]) -> Option<ParsedOrder> {
    parse_orders_with_warnings(segments).order
}

/// Parse an ORDERS segment stream, reporting every field that fell back to
/// a default on the warnings channel.
pub fn parse_orders_with_warnings(segments: &[Segment]) -> OrdersOutcome {
    let mut warnings = Vec::new();

    let mut order_number: Option<String> = None;
    let mut buyer_code = String::new();
    let mut order_date = String::new();
    let mut delivery_date: Option<String> = None;
    let mut items: Vec<OrderItem> = Vec::new();
    // Index of the item the next QTY/PRI/IMD applies to; set only by LIN.
    let mut current_item: Option<usize> = None;

    for segment in segments {
        match segment.tag.as_str() {
            "BGM" => {
                order_number = segment.component(1, 0).map(str::to_string);
            }
            "NAD" => {
                if segment.component(0, 0) == Some("BY") {
                    buyer_code = segment.component_or_empty(1, 0).to_string();
                }
            }
            "DTM" => match segment.component(0, 0) {
                Some("137") => {
                    order_date = format_date(segment.component_or_empty(0, 1));
                }
                Some("2") => {
                    delivery_date = Some(format_date(segment.component_or_empty(0, 1)));
                }
                _ => {}
            },
            "LIN" => {
                let product_code = match segment.component(2, 0) {
                    Some(code) if !code.is_empty() => code.to_string(),
                    _ => {
                        warnings.push(format!(
                            "LIN segment {} has no product code",
                            items.len() + 1
                        ));
                        String::new()
                    }
                };
                items.push(OrderItem {
                    line_number: items.len() as u32 + 1,
                    product_code,
                    quantity: 0.0,
                    unit_price: 0.0,
                    description: None,
                });
                current_item = Some(items.len() - 1);
            }
            "QTY" => {
                if let Some(index) = current_item {
                    items[index].quantity =
                        parse_numeric(segment.component_or_empty(0, 1), "QTY", &mut warnings);
                } else {
                    warnings.push("QTY segment before any LIN segment".to_string());
                }
            }
            "PRI" => {
                if let Some(index) = current_item {
                    items[index].unit_price =
                        parse_numeric(segment.component_or_empty(0, 1), "PRI", &mut warnings);
                } else {
                    warnings.push("PRI segment before any LIN segment".to_string());
                }
            }
            "IMD" => {
                if let Some(index) = current_item {
                    if let Some(element) = segment.element(2) {
                        if let Some(text) = element.iter().find(|c| !c.is_empty()) {
                            items[index].description = Some(text.clone());
                        }
                    }
                }
            }
            _ => {}
        }
    }

    let order = match order_number {
        Some(order_number) => {
            if buyer_code.is_empty() {
                warnings.push("no NAD+BY segment; buyer code is empty".to_string());
            }
            if order_date.is_empty() {
                warnings.push("no DTM+137 segment; order date is empty".to_string());
            }
            Some(ParsedOrder {
                order_number,
                buyer_code,
                order_date,
                delivery_date,
                items,
            })
        }
        None => None,
    };

    OrdersOutcome { order, warnings }
}

fn parse_numeric(raw: &str, tag: &str, warnings: &mut Vec<String>) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            warnings.push(format!("{tag} value `{raw}` is not numeric; using 0"));
            0.0
        }
    }
}
