//! Push Notifications
//!
//! One registrar per session; see `registrar`.

pub mod registrar;

pub use registrar::{
    PermissionStatus, PushTokenSource, RegisterTokenRequest, RegistrationOutcome, StaticTokenSource,
    TokenRegistrar,
};
