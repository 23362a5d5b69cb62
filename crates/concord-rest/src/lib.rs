//! # Concord REST
//!
//! Transport implementations for the Concord platform client.
//!
//! This crate provides concrete implementations of the [`Transport`] seam
//! defined in `concord-core`. Implementations are gated behind feature
//! flags so that consumers who bring their own transport pay for nothing.
//!
//! ## Features
//!
//! - `http-client`: HTTP transport backed by `reqwest`
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  concord-client     │  (interactions, events)
//! ├─────────────────────┤
//! │  concord-core       │  (Transport trait, endpoints, bodies)
//! ├─────────────────────┤
//! │  concord-rest       │  <- This crate (implementations)
//! ├─────────────────────┤
//! │  Network (HTTP)     │
//! └─────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use concord_core::RestConfig;
//! use concord_rest::HttpTransport;
//!
//! let config = RestConfig::new().with_token(std::env::var("BOT_TOKEN")?);
//! let transport = HttpTransport::new(config)?;
//! ```
//!
//! [`Transport`]: concord_core::Transport

// Transport implementations (feature-gated)
#[cfg(feature = "http-client")]
pub mod http;

#[cfg(feature = "http-client")]
pub use http::HttpTransport;
