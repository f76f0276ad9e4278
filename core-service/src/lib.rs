//! Migraine Risk - Client Core
//!
//! Presentation model for the risk screen (gauge, drivers, actions, history),
//! the Risk Data Provider / Token Registrar clients and the controller that
//! owns the screen state.

pub mod api;
pub mod constants;
pub mod logic;
