use std::fmt;

use serde::{Deserialize, Serialize};

use crate::price::Price;

/// A single ticket sale: the reference record payload.
///
/// Field order is the digest order: event, buyer, seat, price.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketSale {
    /// Name of the event the ticket admits to.
    pub event: String,
    /// Name of the buyer.
    pub buyer: String,
    /// Seat identifier.
    pub seat: String,
    pub price: Price,
}

impl TicketSale {
    pub fn new(
        event: impl Into<String>,
        buyer: impl Into<String>,
        seat: impl Into<String>,
        price: Price,
    ) -> Self {
        Self {
            event: event.into(),
            buyer: buyer.into(),
            seat: seat.into(),
            price,
        }
    }

    /// The fixed payload carried by every genesis record.
    pub fn genesis() -> Self {
        Self::new("Genesis Event", "None", "0", Price::zero())
    }
}

impl fmt::Display for TicketSale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / seat {} @ {}",
            self.event, self.buyer, self.seat, self.price
        )
    }
}
