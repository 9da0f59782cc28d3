pub mod error;
pub mod packages;
pub mod profile;
pub mod quote;
pub mod recommendation;
pub mod schedule;
pub mod tiers;
pub mod types;

pub use error::PricingError;
pub use profile::{ClientProfile, QuoteInput, TransactionVolume};
pub use schedule::FeeSchedules;
pub use types::*;

/// Standard result type for all package-pricing operations
pub type PricingResult<T> = Result<T, PricingError>;
