//! Core of the movie search client.
//!
//! # Overview
//! Validates queries, builds OMDb requests, classifies responses, renders
//! result and detail markup, and drives the page state machine. Network I/O
//! stays with the host (host-does-IO pattern): the core hands out
//! `HttpRequest` values and takes `HttpResponse` values back, which keeps
//! every transition testable without a network or a display.
//!
//! # Design
//! - `OmdbClient` is stateless apart from its base URL and key.
//! - `Controller` owns the only `UiState`/`Page` pair and is driven by
//!   `Event`s; requests come back out as `Command`s.
//! - All provider text reaches markup through `escape::escape_html`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod escape;
pub mod http;
pub mod render;
pub mod state;
pub mod types;

pub use client::OmdbClient;
pub use config::Config;
pub use controller::{perform, Command, Completion, Controller, Event, Key};
pub use error::{ApiError, ClientError, ConfigError, NetworkError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use render::{render_detail, render_results, Markup, RenderOptions};
pub use state::{Focus, Page, Phase, UiState};
pub use types::{DetailRecord, Poster, ResultList, ResultSummary, SearchQuery};
