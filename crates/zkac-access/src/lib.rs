//! # zkac-access - Registry and Mediator
//!
//! Decides whether an anonymous `(proof, public inputs)` submission may
//! perform an action, and makes sure it can do so only once.
//!
//! ## Components
//!
//! - **Registry** (`registry.rs`): the active root epoch and the
//!   consumed-nullifier ledger. Root updates are administrator-only.
//!
//! - **Ledger** (`ledger.rs`): [`NullifierLedger`] and the sharded in-memory
//!   [`ConsumedNullifierSet`] with atomic check-and-consume.
//!
//! - **Attempt** (`attempt.rs`): typestate `Submitted → Verifying →
//!   Consuming`. Consumption is unreachable without verification.
//!
//! - **Mediator** (`mediator.rs`): [`AccessMediator::authorize`] drives one
//!   attempt to a [`Decision`].
//!
//! ## Design
//!
//! Denials are values, not errors: `Decision::Denied(DenialReason)`. The
//! only error type, [`AccessError`], covers administrative misuse.

pub mod attempt;
pub mod decision;
pub mod error;
pub mod ledger;
pub mod mediator;
pub mod registry;

pub use decision::{Decision, DenialReason, Grant, Remediation};
pub use error::AccessError;
pub use ledger::{ConsumedNullifierSet, Consumption, NullifierLedger, NullifierRecord};
pub use mediator::AccessMediator;
pub use registry::{AuthorizationRegistry, RegistrySnapshot, RootEpoch};
