//! c14-api: Online.net API adapter for the c14 CLI client
//!
//! This crate provides the implementation of the OnlineApi trait
//! using reqwest. It is the only crate that talks HTTP.

pub mod client;
pub mod connector;
pub mod wait;

#[cfg(test)]
mod testing;

pub use client::OnlineClient;
pub use connector::OnlineConnector;
