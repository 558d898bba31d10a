//! # stockroom-store: Stateful Store Layer
//!
//! Everything mutable in Stockroom lives here, behind three explicit
//! service objects a presentation front end holds and drives:
//!
//! - [`state::ProductRegistry`] - the authoritative product list
//! - [`state::WithdrawalWorkflow`] - the cart and withdrawal history
//! - [`state::SessionStore`] - the authenticated user
//!
//! Around them sit the collaborator surfaces the console needs:
//! report building ([`report`]), spreadsheet export ([`export`]),
//! aggregate statistics ([`stats`]), toast notifications ([`notify`]),
//! sample data ([`seed`]), and configuration ([`config`]).
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use stockroom_store::{AppConfig, AppServices, LogNotifier};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! stockroom_store::init_tracing();
//!
//! let config = AppConfig::from_env();
//! let services = AppServices::bootstrap(&config, Arc::new(LogNotifier))?;
//!
//! services.session.login("admin@example.com", "password").await?;
//! let widget = services.registry.products().remove(0);
//! services.workflow.add_to_cart(&widget, 2)?;
//! services.workflow.confirm_withdrawal(Some("bench 3".into()))?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod config;
pub mod datefmt;
pub mod export;
pub mod notify;
pub mod report;
pub mod seed;
pub mod state;
pub mod stats;

// Re-exports for the common embedding path
pub use app::{init_tracing, AppServices};
pub use config::AppConfig;
pub use notify::{LogNotifier, Notifier, RecordingNotifier};
pub use state::{ProductRegistry, SessionStore, ViewTarget, WithdrawalWorkflow};
