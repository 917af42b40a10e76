use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::domain::order::{HandlerError, OrderError};
use crate::models::ErrorBody;

// ============================================================================
// API Errors - HTTP mapping for domain and infrastructure failures
// ============================================================================
//
// Status code mapping:
//   400  malformed or rule-violating request (invalid transition, bad payload)
//   401  missing or unknown bearer token
//   403  authenticated but not permitted (role/ownership gate)
//   404  unknown order
//   409  optimistic concurrency conflict
//   500  storage or other internal failure
//
// Every error body carries {code, message}.
//
// ============================================================================

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody::new(code, message),
        }
    }

    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "invalid_token",
            "Missing or unknown bearer token",
        )
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "unauthorized", message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.body.code, self.body.message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(&self.body)
    }
}

impl From<&OrderError> for ApiError {
    fn from(err: &OrderError) -> Self {
        let status = match err {
            OrderError::Unauthorized => StatusCode::FORBIDDEN,
            _ => StatusCode::BAD_REQUEST,
        };
        Self::new(status, err.code(), err.to_string())
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        Self::from(&err)
    }
}

impl From<HandlerError> for ApiError {
    fn from(err: HandlerError) -> Self {
        match err {
            HandlerError::Domain(domain) => Self::from(&domain),
            HandlerError::NotFound(id) => Self::new(
                StatusCode::NOT_FOUND,
                "order_not_found",
                format!("Order not found: {}", id),
            ),
            HandlerError::Conflict(id) => Self::new(
                StatusCode::CONFLICT,
                "version_conflict",
                format!("Order {} was modified concurrently; retry", id),
            ),
            HandlerError::Internal(e) => {
                tracing::error!(error = %e, "Internal error while handling request");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error",
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderStatus;
    use uuid::Uuid;

    #[test]
    fn test_domain_error_mapping() {
        let err = ApiError::from(OrderError::Unauthorized);
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.body.code, "unauthorized");

        let err = ApiError::from(OrderError::InvalidTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Pending,
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body.code, "invalid_transition");
    }

    #[test]
    fn test_handler_error_mapping() {
        let err = ApiError::from(HandlerError::NotFound(Uuid::new_v4()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.body.code, "order_not_found");

        let err = ApiError::from(HandlerError::Conflict(Uuid::new_v4()));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.body.code, "version_conflict");
    }
}
