use actix_multipart::form::MultipartFormConfig;
use actix_web::HttpResponse;
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::services::ServiceError;

pub mod products;

/// Uniform body returned by every product endpoint.
///
/// `data` is omitted when the outer option is `None` and serialized as `null`
/// for `Some(None)`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Option<T>>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(Some(data)),
        }
    }
}

impl ApiResponse<()> {
    /// Successful response without a `data` member.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    /// Successful response with an explicit `data: null`.
    pub fn success_null(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(None),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::Form(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Render a service failure as an envelope. `not_found` is the message used
/// for [`ServiceError::NotFound`].
pub fn error_response(err: &ServiceError, not_found: &str) -> HttpResponse {
    let message = match err {
        ServiceError::NotFound => not_found.to_string(),
        other => other.to_string(),
    };
    HttpResponse::build(err.status_code()).json(ApiResponse::failure(message))
}

/// Multipart settings for product uploads; malformed payloads are answered
/// with an envelope instead of a plain-text error.
pub fn multipart_config() -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(60 * 1024 * 1024)
        .error_handler(|err, _req| {
            let response = HttpResponse::BadRequest().json(ApiResponse::failure(err.to_string()));
            InternalError::from_response(err, response).into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::{Value, json};

    async fn body_json(response: HttpResponse) -> Value {
        let bytes = to_bytes(response.into_body())
            .await
            .unwrap_or_default();
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[test]
    fn envelope_distinguishes_absent_and_null_data() {
        let absent = serde_json::to_value(ApiResponse::success("done")).expect("serialize");
        assert_eq!(absent, json!({"success": true, "message": "done"}));

        let null = serde_json::to_value(ApiResponse::success_null("made")).expect("serialize");
        assert_eq!(null, json!({"success": true, "message": "made", "data": null}));

        let data =
            serde_json::to_value(ApiResponse::with_data("list", vec![1, 2])).expect("serialize");
        assert_eq!(data, json!({"success": true, "message": "list", "data": [1, 2]}));
    }

    #[actix_web::test]
    async fn error_response_maps_taxonomy_to_status() {
        let cases = [
            (ServiceError::Unauthorized, 401, "Unauthorized."),
            (
                ServiceError::Form("Required fields are missing.".to_string()),
                400,
                "Required fields are missing.",
            ),
            (ServiceError::NotFound, 404, "Product not found."),
            (
                ServiceError::Persistence("disk I/O error".to_string()),
                500,
                "disk I/O error",
            ),
        ];

        for (err, status, message) in cases {
            let response = error_response(&err, "Product not found.");
            assert_eq!(response.status().as_u16(), status);
            assert_eq!(
                body_json(response).await,
                json!({"success": false, "message": message})
            );
        }
    }
}
