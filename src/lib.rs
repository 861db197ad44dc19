//! Huespread - palette extension for every kind of color vision
//!
//! HTTP and CLI host around the `spread-engine` optimizer.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
