//! Offer catalog, payment estimates, and profile-driven ranking.

mod catalog;
pub mod domain;
mod payment;
mod ranking;

pub use catalog::{CatalogError, OfferCatalog};
pub use domain::{LoanType, OfferQuery, OfferRecord, RankedOffer};
pub use payment::amortized_payment;
pub use ranking::{OfferEngine, MIN_PRICED_TERM_MONTHS};
