//! Reusable UI components.

pub mod address_input;
pub mod header;
pub mod price_label;
pub mod status_bar;
pub mod trade_list;
