//! Database models for single-record operations.

pub mod account;
pub mod business;
pub mod investment;
pub mod tax_type;

pub use account::Account;
pub use business::Business;
pub use investment::Investment;
pub use tax_type::{CreateTaxType, TaxType, UpdateTaxType};
