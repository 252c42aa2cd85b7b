//! Forger server: HTTP front door and CLI support for the analysis service.

pub mod routes;
pub mod state;
pub mod validate;
