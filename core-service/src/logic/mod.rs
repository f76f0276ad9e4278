//! Logic Module - Presentation Model & Collaborators
//!
//! Pure derivations (risk, drivers, actions, history) plus the provider,
//! push registrar and the controller that ties them together.

// Pure presentation model
pub mod risk;
pub mod drivers;
pub mod actions;
pub mod history;

// Collaborators
pub mod provider;
pub mod notify;

// Orchestration
pub mod controller;
pub mod config;
pub mod error;

#[cfg(test)]
pub(crate) mod test_support;
