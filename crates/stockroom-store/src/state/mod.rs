//! # State Module
//!
//! The three service objects that own all mutable state.
//!
//! ## Why Multiple Store Types?
//! Instead of a single `AppState` struct containing everything, each
//! store has a single responsibility:
//!
//! 1. **Better Separation of Concerns**: registry, cart, and session
//!    change for different reasons
//! 2. **Easier Testing**: each store can be constructed alone
//! 3. **Clearer Call Sites**: front-end handlers hold exactly the
//!    stores they need
//! 4. **Reduced Contention**: independent locks don't block each other
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Store Architecture                                  │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌────────────────────┐  ┌──────────────────┐    │
//! │  │ ProductRegistry  │  │ WithdrawalWorkflow │  │  SessionStore    │    │
//! │  │                  │  │                    │  │                  │    │
//! │  │  Arc<Mutex<      │◄─┤  cart + history    │  │  current user    │    │
//! │  │   products +     │  │  holds a registry  │  │  login gate      │    │
//! │  │   categories>>   │  │  clone for live    │  │  storage +       │    │
//! │  │                  │  │  stock checks      │  │  rehydration     │    │
//! │  └──────────────────┘  └────────────────────┘  └──────────────────┘    │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Every store is Send + Sync and internally locked                    │
//! │  • Confirm's validate-then-apply runs in one registry critical         │
//! │    section while the cart lock is held (workflow → registry order)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod registry;
mod session;
mod withdrawal;

pub use registry::ProductRegistry;
pub use session::{
    CredentialGate, FileSessionStorage, FixedCredentials, MemorySessionStorage, SessionStorage,
    SessionStore, ViewTarget,
};
pub use withdrawal::WithdrawalWorkflow;
