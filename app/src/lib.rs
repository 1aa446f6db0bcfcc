//! Host side of the movie search client.
//!
//! # Overview
//! Supplies what `movie-search-core` leaves to its host: a reqwest-backed
//! [`transport::ReqwestTransport`], configuration loading and tracing setup
//! ([`settings`]), and a line-oriented terminal front end ([`terminal`]) that
//! drives the `Controller`.

pub mod settings;
pub mod terminal;
pub mod transport;

pub use transport::ReqwestTransport;
