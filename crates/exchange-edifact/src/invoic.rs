//! INVOIC (invoice) generator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::format_quantity;

/// One invoiced line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicItem {
    pub product_code: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_price: f64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Invoice data for an INVOIC interchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicData {
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub order_reference: String,
    pub items: Vec<InvoicItem>,
    pub total_value: f64,
}

/// Generate an INVOIC segment stream for an invoice.
///
/// Monetary values are rendered fixed-point with exactly two decimals.
pub fn generate_invoic(data: &InvoicData) -> String {
    let mut segments: Vec<String> = Vec::new();

    segments.push("UNH+1+INVOIC:D:96A:UN".to_string());
    segments.push(format!("BGM+380+{}+9", data.invoice_number));
    segments.push(format!(
        "DTM+137:{}:102",
        data.invoice_date.format("%Y%m%d")
    ));
    segments.push(format!("RFF+ON:{}", data.order_reference));

    for (index, item) in data.items.iter().enumerate() {
        segments.push(format!("LIN+{}++{}:SA", index + 1, item.product_code));
        segments.push(format!("QTY+47:{}", format_quantity(item.quantity)));
        segments.push(format!("PRI+AAA:{:.2}", item.unit_price));
        segments.push(format!("MOA+203:{:.2}", item.total_price));
        if let Some(description) = &item.description {
            segments.push(format!("IMD+F++:::{description}"));
        }
    }

    segments.push(format!("MOA+86:{:.2}", data.total_value));
    segments.push(format!("UNT+{}+1", segments.len() + 1));

    segments
        .iter()
        .map(|segment| format!("{segment}'"))
        .collect::<Vec<_>>()
        .join("\n")
}
