//! Orders

use jiff::civil::Date;
use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

/// Errors that can occur while totalling order lines.
#[derive(Debug, Error, PartialEq)]
pub enum OrderError {
    /// No lines were provided, so currency could not be determined.
    #[error("no order lines; cannot determine currency")]
    NoLines,

    /// A line total exceeded the representable range of minor units.
    #[error("line total overflowed")]
    AmountOverflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Lifecycle of a customer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Received but not yet confirmed
    Pending,

    /// Confirmed and scheduled for baking
    Confirmed,

    /// Handed over to the customer
    Delivered,

    /// Called off before delivery
    Cancelled,
}

impl OrderStatus {
    /// Whether the order still needs fulfilling.
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }
}

/// One priced line on an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine<'a> {
    /// What is being sold, e.g. "Sourdough loaf"
    pub description: String,

    /// Number of units ordered
    pub quantity: u32,

    /// Price per unit
    pub unit_price: Money<'a, Currency>,
}

impl<'a> OrderLine<'a> {
    /// Price of the whole line (quantity × unit price).
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::AmountOverflow`] if the multiplication overflows
    /// minor units.
    pub fn line_total(&self) -> Result<Money<'a, Currency>, OrderError> {
        let minor = self
            .unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or(OrderError::AmountOverflow)?;

        Ok(Money::from_minor(minor, self.unit_price.currency()))
    }
}

/// A customer order with a due date.
#[derive(Debug, Clone, PartialEq)]
pub struct Order<'a> {
    customer: String,
    due_date: Date,
    status: OrderStatus,
    lines: SmallVec<[OrderLine<'a>; 6]>,
}

impl<'a> Order<'a> {
    /// Creates a new pending order with no lines.
    #[must_use]
    pub fn new(customer: impl Into<String>, due_date: Date) -> Self {
        Self {
            customer: customer.into(),
            due_date,
            status: OrderStatus::Pending,
            lines: SmallVec::new(),
        }
    }

    /// Adds a line to the order.
    pub fn add_line(&mut self, line: OrderLine<'a>) {
        self.lines.push(line);
    }

    /// Moves the order to a new lifecycle status.
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    /// Returns the customer name.
    pub fn customer(&self) -> &str {
        &self.customer
    }

    /// Returns the date the order is due.
    pub fn due_date(&self) -> Date {
        self.due_date
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the order lines.
    pub fn lines(&self) -> &[OrderLine<'a>] {
        &self.lines
    }

    /// Total price of the order.
    ///
    /// # Errors
    ///
    /// - [`OrderError::NoLines`]: the order has no lines.
    /// - [`OrderError::AmountOverflow`]: a line total overflowed.
    /// - [`OrderError::Money`]: currencies disagree across lines.
    pub fn total(&self) -> Result<Money<'a, Currency>, OrderError> {
        lines_total(&self.lines)
    }

    /// Whether the order is past due at `today` and still open.
    ///
    /// Delivered and cancelled orders are never overdue.
    #[must_use]
    pub fn is_overdue(&self, today: Date) -> bool {
        self.status.is_open() && today > self.due_date
    }
}

/// Sums line totals, taking the currency from the first line.
///
/// # Errors
///
/// See [`Order::total`].
pub(crate) fn lines_total<'a>(
    lines: &[OrderLine<'a>],
) -> Result<Money<'a, Currency>, OrderError> {
    let first = lines.first().ok_or(OrderError::NoLines)?;

    lines.iter().try_fold(
        Money::from_minor(0, first.unit_price.currency()),
        |acc, line| Ok(acc.add(line.line_total()?)?),
    )
}
