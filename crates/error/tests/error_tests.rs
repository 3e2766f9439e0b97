//! # Error Crate Tests
//!
//! Tests for error types, the response envelope and conversions.

#[cfg(test)]
mod error_response_tests {
    use axum::response::IntoResponse;
    use error::AppError;

    async fn body_json(err: AppError) -> (http::StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, json) = body_json(AppError::not_found("Task not found")).await;
        assert_eq!(status, http::StatusCode::NOT_FOUND);
        assert_eq!(json["status"], "error");
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Task not found");
    }

    #[tokio::test]
    async fn test_database_body_is_opaque() {
        let (status, json) = body_json(AppError::database("duplicate key value violates unique constraint")).await;
        assert_eq!(status, http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "DATABASE_ERROR");
        assert_eq!(json["message"], "Internal server error");
    }

    #[tokio::test]
    async fn test_distinct_client_codes() {
        let (_, forbidden) = body_json(AppError::forbidden("Admin role required")).await;
        let (_, unauthorized) = body_json(AppError::unauthorized("Missing bearer token")).await;
        let (_, conflict) = body_json(AppError::conflict("Username already taken")).await;

        assert_eq!(forbidden["code"], "FORBIDDEN");
        assert_eq!(unauthorized["code"], "UNAUTHORIZED");
        assert_eq!(conflict["code"], "CONFLICT");
    }
}

#[cfg(test)]
mod error_status_mapping_tests {
    use error::AppError;

    #[test]
    fn test_all_status_codes() {
        assert_eq!(AppError::not_found("x").status(), http::StatusCode::NOT_FOUND);
        assert_eq!(AppError::bad_request("x").status(), http::StatusCode::BAD_REQUEST);
        assert_eq!(AppError::unauthorized("x").status(), http::StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::forbidden("x").status(), http::StatusCode::FORBIDDEN);
        assert_eq!(AppError::conflict("x").status(), http::StatusCode::CONFLICT);
        assert_eq!(AppError::validation("x").status(), http::StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(AppError::internal("x").status(), http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::database("x").status(), http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            AppError::Io {
                message: "x".to_string(),
            }
            .status(),
            http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
