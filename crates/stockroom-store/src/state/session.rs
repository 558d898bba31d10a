//! # Session Store
//!
//! Owns the current authenticated user and its single persisted
//! record.
//!
//! ## Login Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Login Flow                                      │
//! │                                                                         │
//! │  login(email, password)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  try_lock login gate ──── already held? ──► LoginInProgress toast      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sleep(login_delay)          (simulated network latency)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CredentialGate::verify ── mismatch? ─────► InvalidCredentials toast   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  set current user ──► persist record ──► success toast ──► Dashboard   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Placeholder Credentials
//! Exactly one hardcoded credential pair exists. The check is isolated
//! behind [`CredentialGate`] so real authentication can be substituted
//! later without touching callers.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, info, warn};

use stockroom_core::{CoreError, CoreResult, User};

use crate::notify::Notifier;
use crate::seed::{sample_user, SAMPLE_EMAIL, SAMPLE_PASSWORD};

// =============================================================================
// Navigation Signal
// =============================================================================

/// Navigation target signaled to the presentation layer.
///
/// The core exposes no routes itself; it only tells the front end
/// where it intends the user to go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewTarget {
    /// The default view after a successful login.
    Dashboard,
    /// The login view after logout.
    Login,
}

// =============================================================================
// Credential Gate
// =============================================================================

/// Replaceable credential check.
///
/// Returns the authenticated user on a match, `None` on a mismatch.
pub trait CredentialGate: Send + Sync {
    fn verify(&self, email: &str, password: &str) -> Option<User>;
}

/// The development gate: one hardcoded credential pair mapping to the
/// sample user.
pub struct FixedCredentials {
    email: String,
    password: String,
    user: User,
}

impl FixedCredentials {
    /// The sample account (`admin@example.com` / `password`).
    pub fn sample() -> Self {
        FixedCredentials {
            email: SAMPLE_EMAIL.to_string(),
            password: SAMPLE_PASSWORD.to_string(),
            user: sample_user(),
        }
    }
}

impl CredentialGate for FixedCredentials {
    fn verify(&self, email: &str, password: &str) -> Option<User> {
        if email == self.email && password == self.password {
            Some(self.user.clone())
        } else {
            None
        }
    }
}

// =============================================================================
// Session Storage
// =============================================================================

/// Durable store for the single session record.
///
/// Failures are the storage's problem: implementations log and
/// swallow, callers never see an error. An absent record simply means
/// "unauthenticated at startup".
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> Option<User>;
    fn store(&self, user: &User);
    fn clear(&self);
}

/// File-backed session storage (one JSON file).
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: PathBuf) -> Self {
        FileSessionStorage { path }
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Option<User> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            // Missing file is the normal logged-out state
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "could not read session file");
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(user) => Some(user),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "corrupt session file ignored");
                None
            }
        }
    }

    fn store(&self, user: &User) {
        let json = match serde_json::to_string_pretty(user) {
            Ok(json) => json,
            Err(err) => {
                warn!(%err, "could not serialize session record");
                return;
            }
        };

        if let Err(err) = std::fs::write(&self.path, json) {
            warn!(path = %self.path.display(), %err, "could not persist session record");
        }
    }

    fn clear(&self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), %err, "could not clear session record");
            }
        }
    }
}

/// In-memory session storage for tests and ephemeral embeddings.
#[derive(Default)]
pub struct MemorySessionStorage {
    record: Mutex<Option<User>>,
}

impl MemorySessionStorage {
    /// Pre-populates the stored record, simulating a previous session.
    pub fn seed(&self, user: User) {
        *self.record.lock().expect("Session mutex poisoned") = Some(user);
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Option<User> {
        self.record.lock().expect("Session mutex poisoned").clone()
    }

    fn store(&self, user: &User) {
        *self.record.lock().expect("Session mutex poisoned") = Some(user.clone());
    }

    fn clear(&self) {
        *self.record.lock().expect("Session mutex poisoned") = None;
    }
}

// =============================================================================
// Session Store
// =============================================================================

/// The session service object.
///
/// Cheap to clone; all clones share the same current user.
#[derive(Clone)]
pub struct SessionStore {
    current: Arc<Mutex<Option<User>>>,
    gate: Arc<dyn CredentialGate>,
    storage: Arc<dyn SessionStorage>,
    notifier: Arc<dyn Notifier>,
    /// Serializes login attempts; an overlapping attempt is refused.
    login_gate: Arc<tokio::sync::Mutex<()>>,
    login_delay: Duration,
}

impl SessionStore {
    /// Creates a session store, rehydrating the current user from the
    /// persisted record if one exists.
    pub fn new(
        gate: Arc<dyn CredentialGate>,
        storage: Arc<dyn SessionStorage>,
        notifier: Arc<dyn Notifier>,
        login_delay: Duration,
    ) -> Self {
        let current = storage.load();
        if let Some(user) = &current {
            debug!(email = %user.email, "session rehydrated from persisted record");
        }

        SessionStore {
            current: Arc::new(Mutex::new(current)),
            gate,
            storage,
            notifier,
            login_gate: Arc::new(tokio::sync::Mutex::new(())),
            login_delay,
        }
    }

    /// Test convenience: sample credentials, zero latency.
    pub fn for_tests(storage: Arc<dyn SessionStorage>, notifier: Arc<dyn Notifier>) -> Self {
        SessionStore::new(
            Arc::new(FixedCredentials::sample()),
            storage,
            notifier,
            Duration::ZERO,
        )
    }

    /// Returns the authenticated user, if any.
    pub fn current_user(&self) -> Option<User> {
        self.current.lock().expect("Session mutex poisoned").clone()
    }

    /// `true` when a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Attempts a login after a simulated network delay.
    ///
    /// On a match: sets the current user, persists the record, toasts
    /// success, and signals navigation to the dashboard. On a
    /// mismatch: toasts failure and leaves state unchanged. Attempts
    /// are serialized - an overlapping attempt is refused rather than
    /// raced.
    pub async fn login(&self, email: &str, password: &str) -> CoreResult<ViewTarget> {
        let Ok(_guard) = self.login_gate.try_lock() else {
            let err = CoreError::LoginInProgress;
            self.notifier.error(&err.to_string());
            return Err(err);
        };

        // Simulated network latency
        tokio::time::sleep(self.login_delay).await;

        match self.gate.verify(email, password) {
            Some(user) => {
                info!(email = %user.email, "login succeeded");
                self.storage.store(&user);
                *self.current.lock().expect("Session mutex poisoned") = Some(user);
                self.notifier.success("Logged in successfully");
                Ok(ViewTarget::Dashboard)
            }
            None => {
                debug!(email, "login rejected");
                let err = CoreError::InvalidCredentials;
                self.notifier.error(&err.to_string());
                Err(err)
            }
        }
    }

    /// Clears the current user and the persisted record, toasts, and
    /// signals navigation to the login view.
    pub fn logout(&self) -> ViewTarget {
        *self.current.lock().expect("Session mutex poisoned") = None;
        self.storage.clear();
        info!("logged out");
        self.notifier.success("Logged out");
        ViewTarget::Login
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
