//! Application Layer
//!
//! Core client, the ordered-candidate fallback and the resource use cases.

pub mod client;
pub mod collections;
pub mod config;
pub mod fallback;
pub mod forward;
pub mod health;
pub mod users;

pub use client::{CallOptions, CoreClient};
pub use collections::{APPS, Collection, CollectionUseCase, TENANTS};
pub use fallback::{Candidate, Outcome, attempt_in_order};
pub use forward::{ForwardInput, ForwardUseCase};
pub use health::{HealthReport, HealthUseCase};
pub use users::{CreateUserInput, ListUsersInput, UsersUseCase};
