//! # exchange-edifact
//!
//! EDIFACT codec for the exchange core: the segment tokenizer, the ORDERS
//! parser, and the DESADV/INVOIC generators.
//!
//! The codec is deliberately lenient. Malformed wire content degrades to
//! empty values rather than errors, so none of the functions in this crate
//! are fallible; fields that fell back to a default are reported on a
//! warnings channel instead.

pub mod desadv;
pub mod invoic;
pub mod orders;
pub mod segment;

pub use desadv::{generate_desadv, DesadvData, DesadvItem};
pub use invoic::{generate_invoic, InvoicData, InvoicItem};
pub use orders::{parse_orders, parse_orders_with_warnings, OrderItem, OrdersOutcome, ParsedOrder};
pub use segment::{format_date, parse_segments, Segment};

/// Render a quantity without a spurious fractional part: whole values print
/// as integers, fractional values keep their digits.
pub(crate) fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
