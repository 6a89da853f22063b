//! Listings: the ads users publish for barter.

pub mod model;
pub mod service;
pub mod validation;

pub use model::{Ad, AdResponse, Category, Condition};
pub use service::AdService;
