//! Exchange proposals between two listings.

pub mod model;
pub mod service;

pub use model::{ExchangeProposal, ProposalResponse, ProposalStatus};
pub use service::ProposalService;
