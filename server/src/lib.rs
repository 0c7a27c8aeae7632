//! memoshare library
//!
//! Server-rendered pages for a memo-sharing site. The binary wires these
//! into an axum server; the library is exposed for integration tests.

pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod pages;
pub mod render;
pub mod server;
pub mod services;
