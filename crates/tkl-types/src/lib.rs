//! Foundation types for the Ticket Ledger (TKL).
//!
//! Every value that ends up inside a record digest lives here, together with
//! its canonical string form. Two implementations that agree on these
//! renderings produce identical record hashes.
//!
//! # Key Types
//!
//! - [`Timestamp`]: UTC creation instant with microsecond resolution
//! - [`Price`]: Non-negative amount held in minor units (cents)
//! - [`TicketSale`]: The reference record payload: event, buyer, seat, price

pub mod error;
pub mod price;
pub mod sale;
pub mod timestamp;

pub use error::TypeError;
pub use price::Price;
pub use sale::TicketSale;
pub use timestamp::Timestamp;
