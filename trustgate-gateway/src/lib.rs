//! HTTP front end for the trustgate policy engine.
//!
//! Exposes `GET /evaluate`, which a reverse proxy calls with the request's
//! identifying headers before letting it through, plus a liveness probe.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod routes;
