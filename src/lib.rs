//! Vitt Mukti — financial literacy core
//!
//! Two stateless engines sit at the centre:
//! - Deterministic calculators (SIP, loan EMI, investment growth)
//! - A rule-based bilingual chat responder (first-match keyword table)
//!
//! Around them live the collaborators the web app uses: chat sessions,
//! the government scheme catalog, learning progress, and authentication,
//! all reachable over the HTTP API.

pub mod api;
pub mod auth;
pub mod calculator;
pub mod chat;
pub mod config;
pub mod error;
pub mod learning;
pub mod models;
pub mod responder;
pub mod schemes;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use calculator::{compute_investment_growth, compute_loan_emi, compute_sip};
pub use responder::{select_response, ResponseSelector, Topic};
