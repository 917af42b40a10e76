use std::collections::HashMap;
use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};

use super::error::ApiError;
use crate::domain::order::Actor;

// ============================================================================
// Authentication - Static bearer tokens resolving to actors
// ============================================================================
//
// Token verification is out of scope for the order service itself; the
// gateway issues tokens and this registry resolves them to an actor
// (id + role). Every protected handler takes `AuthenticatedActor` as an
// extractor, so the actor is always explicit in the request path.
//
// ============================================================================

/// Token lookup table, populated from `GAZMAN_API_TOKENS` at startup.
pub struct ActorRegistry {
    tokens: HashMap<String, Actor>,
}

impl ActorRegistry {
    pub fn new(tokens: HashMap<String, Actor>) -> Self {
        Self { tokens }
    }

    pub fn lookup(&self, token: &str) -> Option<Actor> {
        self.tokens.get(token).copied()
    }
}

/// Extractor that resolves the `Authorization: Bearer <token>` header into
/// the requesting actor, or rejects the request with 401.
pub struct AuthenticatedActor(pub Actor);

impl FromRequest for AuthenticatedActor {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let actor = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .and_then(|token| {
                req.app_data::<web::Data<ActorRegistry>>()
                    .and_then(|registry| registry.lookup(token))
            });

        ready(match actor {
            Some(actor) => Ok(AuthenticatedActor(actor)),
            None => Err(ApiError::unauthorized()),
        })
    }
}
