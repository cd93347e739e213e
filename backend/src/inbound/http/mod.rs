//! HTTP inbound adapter exposing the question and answer REST endpoints.

pub mod answers;
pub mod body;
pub mod envelope;
pub mod error;
pub mod health;
pub mod identity;
pub mod questions;
pub mod routes;
pub mod state;
pub mod validation;

pub use error::ApiResult;
