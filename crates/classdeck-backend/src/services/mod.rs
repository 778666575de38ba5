//! Backend service handlers for shell-driven requests.
//!
//! This module groups async request handlers that operate on the shared
//! `AppContext`, perform side effects (network, filesystem), and emit
//! responses or notifications back to the shell.

pub mod assistant_service;
pub mod config_service;
pub mod dashboard_service;
pub mod session_service;

/// Represents a type that is used in all handlers as an application context.
pub(crate) type AppContextHandle = std::sync::Arc<crate::AppContext>;
