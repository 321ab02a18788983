//! Bearer token models returned by the client-credentials exchange.

pub mod access;
pub mod secret;
