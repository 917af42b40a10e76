// ============================================================================
// API Layer - actix-web HTTP surface
// ============================================================================
//
// Thin translation layer: authentication resolves the actor, request DTOs
// are parsed into domain commands, and domain errors are mapped to HTTP
// status codes. No business rules live here.
//
// ============================================================================

pub mod auth;
pub mod error;
pub mod orders;
pub mod server;

pub use auth::{ActorRegistry, AuthenticatedActor};
pub use error::ApiError;
pub use server::{configure, run, AppState};
