//! Backend for a peer-to-peer barter marketplace.
//!
//! Users publish listings (ads) of items they want to trade and exchange
//! proposals between listings, with an accept/reject workflow owned by the
//! receiving side. Identity comes from an external provider via signed
//! bearer tokens; this service mirrors the public profile and owns
//! everything else.

pub mod admin;
pub mod ads;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pagination;
pub mod permissions;
pub mod proposals;
pub mod routes;
pub mod state;
pub mod users;
