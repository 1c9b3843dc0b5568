//! Invoices

use std::fmt;

use jiff::civil::Date;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use crate::orders::{Order, OrderError, OrderLine, lines_total};

/// Sequential invoice number, displayed as `INV-0042`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvoiceNumber(pub u32);

impl fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INV-{:04}", self.0)
    }
}

/// An invoice raised for a customer order.
///
/// Line items are copied from the order at issue time, so later edits to the
/// order do not change what was billed.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice<'a> {
    number: InvoiceNumber,
    customer: String,
    issued_on: Date,
    paid_on: Option<Date>,
    lines: SmallVec<[OrderLine<'a>; 6]>,
}

impl<'a> Invoice<'a> {
    /// Raises an invoice for an order.
    #[must_use]
    pub fn from_order(number: InvoiceNumber, order: &Order<'a>, issued_on: Date) -> Self {
        Self {
            number,
            customer: order.customer().to_string(),
            issued_on,
            paid_on: None,
            lines: order.lines().iter().cloned().collect(),
        }
    }

    /// Returns the invoice number.
    pub fn number(&self) -> InvoiceNumber {
        self.number
    }

    /// Returns the billed customer's name.
    pub fn customer(&self) -> &str {
        &self.customer
    }

    /// Returns the issue date.
    pub fn issued_on(&self) -> Date {
        self.issued_on
    }

    /// Returns the date payment was recorded, if any.
    pub fn paid_on(&self) -> Option<Date> {
        self.paid_on
    }

    /// Whether payment has been recorded.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.paid_on.is_some()
    }

    /// Records payment of the invoice.
    pub fn mark_paid(&mut self, on: Date) {
        self.paid_on = Some(on);
    }

    /// Returns the billed line items.
    pub fn lines(&self) -> &[OrderLine<'a>] {
        &self.lines
    }

    /// Total amount billed.
    ///
    /// # Errors
    ///
    /// See [`Order::total`]; an invoice raised from a valid order totals the
    /// same way.
    pub fn total(&self) -> Result<Money<'a, Currency>, OrderError> {
        lines_total(&self.lines)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    fn order<'a>() -> Order<'a> {
        let mut order = Order::new("Marta", date(2026, 8, 28));

        order.add_line(OrderLine {
            description: "Sourdough loaf".to_string(),
            quantity: 3,
            unit_price: Money::from_minor(450, USD),
        });

        order
    }

    #[test]
    fn invoice_number_formats_with_padding() {
        assert_eq!(InvoiceNumber(42).to_string(), "INV-0042");
        assert_eq!(InvoiceNumber(12_345).to_string(), "INV-12345");
    }

    #[test]
    fn from_order_copies_customer_and_lines() -> TestResult {
        let order = order();
        let invoice = Invoice::from_order(InvoiceNumber(7), &order, date(2026, 8, 20));

        assert_eq!(invoice.number(), InvoiceNumber(7));
        assert_eq!(invoice.customer(), "Marta");
        assert_eq!(invoice.issued_on(), date(2026, 8, 20));
        assert_eq!(invoice.lines(), order.lines());
        assert_eq!(invoice.total()?, order.total()?);

        Ok(())
    }

    #[test]
    fn invoice_total_is_fixed_at_issue_time() -> TestResult {
        let mut order = order();
        let invoice = Invoice::from_order(InvoiceNumber(8), &order, date(2026, 8, 20));

        order.add_line(OrderLine {
            description: "Extra rolls".to_string(),
            quantity: 6,
            unit_price: Money::from_minor(80, USD),
        });

        assert_eq!(invoice.total()?, Money::from_minor(1_350, USD));
        assert_ne!(invoice.total()?, order.total()?);

        Ok(())
    }

    #[test]
    fn mark_paid_sets_paid_date() {
        let order = order();
        let mut invoice = Invoice::from_order(InvoiceNumber(9), &order, date(2026, 8, 20));

        assert!(!invoice.is_paid());

        invoice.mark_paid(date(2026, 9, 1));

        assert!(invoice.is_paid());
        assert_eq!(invoice.paid_on(), Some(date(2026, 9, 1)));
    }
}
