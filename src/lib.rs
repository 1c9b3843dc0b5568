//! Breadwinner
//!
//! Breadwinner is a business-management engine for independent bakeries: recipe
//! costing with suggested retail prices, customer orders and invoices, expense
//! tracking, and trial/subscription access resolution.

pub mod billing;
pub mod catalog;
pub mod costing;
pub mod expenses;
pub mod ingredients;
pub mod invoices;
pub mod orders;
pub mod recipes;
pub mod reports;
pub mod units;
pub mod utils;
