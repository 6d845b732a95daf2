//! DESADV (dispatch advice) generator.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::format_quantity;

/// One dispatched line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesadvItem {
    pub product_code: String,
    pub quantity: f64,
    #[serde(default)]
    pub lot_number: Option<String>,
}

/// Shipment data for a dispatch advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesadvData {
    pub shipment_number: String,
    pub ship_date: NaiveDate,
    #[serde(default)]
    pub carrier: Option<String>,
    #[serde(default)]
    pub tracking_code: Option<String>,
    pub order_reference: String,
    pub items: Vec<DesadvItem>,
}

/// Generate a DESADV segment stream for a shipment.
///
/// Segments are emitted with their `'` terminator and joined with newlines;
/// the generation date in `DTM+137` is stamped at call time.
pub fn generate_desadv(data: &DesadvData) -> String {
    let mut segments: Vec<String> = Vec::new();

    segments.push("UNH+1+DESADV:D:96A:UN".to_string());
    segments.push(format!("BGM+351+{}+9", data.shipment_number));
    segments.push(format!("DTM+137:{}:102", Utc::now().format("%Y%m%d")));
    segments.push(format!("DTM+11:{}:102", data.ship_date.format("%Y%m%d")));

    if let Some(carrier) = &data.carrier {
        segments.push(format!("TDT+20++++{carrier}"));
    }
    if let Some(tracking) = &data.tracking_code {
        segments.push(format!("RFF+AAS:{tracking}"));
    }
    segments.push(format!("RFF+ON:{}", data.order_reference));

    for (index, item) in data.items.iter().enumerate() {
        segments.push(format!("LIN+{}++{}:SA", index + 1, item.product_code));
        segments.push(format!("QTY+12:{}", format_quantity(item.quantity)));
        if let Some(lot) = &item.lot_number {
            segments.push(format!("LOT+{lot}"));
        }
    }

    segments.push(format!("UNT+{}+1", segments.len() + 1));

    segments
        .iter()
        .map(|segment| format!("{segment}'"))
        .collect::<Vec<_>>()
        .join("\n")
}
