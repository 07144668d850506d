use std::fmt;

use tkl_types::TicketSale;

use crate::error::ValidationError;

/// Domain content carried by a [`Record`](crate::Record).
///
/// A payload is a fixed-arity tuple of fields. Its canonical field strings,
/// in declared order, are part of the record digest, so the rendering of each
/// field must be stable across releases.
pub trait Payload: Clone + fmt::Debug {
    /// Canonical string form of every field, in declared order.
    fn canonical_fields(&self) -> Vec<String>;

    /// Check append-time preconditions.
    fn validate(&self) -> Result<(), ValidationError>;

    /// The caller-independent payload of the genesis record. Not validated.
    fn genesis() -> Self;
}

impl Payload for TicketSale {
    fn canonical_fields(&self) -> Vec<String> {
        vec![
            self.event.clone(),
            self.buyer.clone(),
            self.seat.clone(),
            self.price.canonical(),
        ]
    }

    fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("event", &self.event),
            ("buyer", &self.buyer),
            ("seat", &self.seat),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyField { field });
            }
        }
        if !self.price.is_positive() {
            return Err(ValidationError::NonPositivePrice);
        }
        Ok(())
    }

    fn genesis() -> Self {
        TicketSale::genesis()
    }
}
