//! HTTP API: router, service wiring, and response mapping.

pub mod app;
