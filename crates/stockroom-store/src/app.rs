//! # Composition Root
//!
//! Wires the three stores together for an embedding front end.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. init_tracing() ───────────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: INFO, override with RUST_LOG                             │
//! │                                                                         │
//! │  2. AppConfig::from_env() ────────────────────────────────────────────► │
//! │     • STOCKROOM_* environment overrides                                 │
//! │                                                                         │
//! │  3. AppServices::bootstrap(config, notifier) ─────────────────────────► │
//! │     • Resolve session file path (ProjectDirs)                           │
//! │     • Seed the sample catalog                                           │
//! │     • Wire registry → session → workflow                                │
//! │                                                                         │
//! │  4. Front end holds clones of the three stores and drives them          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There are no ambient singletons: every store is an explicit object
//! owned here and injected into whatever handles user interaction.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::notify::Notifier;
use crate::seed;
use crate::state::{
    FileSessionStorage, FixedCredentials, ProductRegistry, SessionStorage, SessionStore,
    WithdrawalWorkflow,
};

/// The wired application services.
///
/// Each field is independently clonable; handlers take clones of
/// exactly the stores they need.
#[derive(Clone)]
pub struct AppServices {
    pub registry: ProductRegistry,
    pub workflow: WithdrawalWorkflow,
    pub session: SessionStore,
}

impl AppServices {
    /// Wires the stores with file-backed session storage and the seed
    /// catalog.
    pub fn bootstrap(
        config: &AppConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let session_path = config.resolve_session_path()?;
        info!(path = %session_path.display(), "session path resolved");

        let storage: Arc<dyn SessionStorage> = Arc::new(FileSessionStorage::new(session_path));
        Ok(Self::with_storage(config, storage, notifier))
    }

    /// Wires the stores over caller-provided session storage. Tests
    /// and ephemeral embeddings use this with in-memory storage.
    pub fn with_storage(
        config: &AppConfig,
        storage: Arc<dyn SessionStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (products, categories) = if config.seed_sample_data {
            (seed::sample_products(), seed::sample_categories())
        } else {
            (Vec::new(), seed::sample_categories())
        };

        let registry = ProductRegistry::new(products, categories, notifier.clone());
        let session = SessionStore::new(
            Arc::new(FixedCredentials::sample()),
            storage,
            notifier.clone(),
            config.login_delay,
        );
        let workflow = WithdrawalWorkflow::new(registry.clone(), session.clone(), notifier);

        info!(org = %config.org_name, "stores wired");
        AppServices {
            registry,
            workflow,
            session,
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockroom=trace` - Trace for stockroom crates only
/// - Default: INFO level
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stockroom=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
