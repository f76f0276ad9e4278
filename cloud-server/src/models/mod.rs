//! Data models

pub mod risk;
pub mod token;

pub use risk::*;
pub use token::*;
