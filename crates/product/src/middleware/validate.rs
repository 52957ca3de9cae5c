use crate::domain::requests::validation_messages;
use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use shared::errors::ErrorResponse;
use validator::{Validate, ValidationErrors};

/// JSON body that has passed its `validator` rules.
///
/// Malformed JSON keeps axum's own rejection status with a plain
/// [`ErrorResponse`]; rule violations are answered with 422 and the same
/// body extended by a per-field `details` map.
pub struct ValidatedJson<T>(pub T);

#[derive(Serialize)]
struct ValidationErrorResponse {
    #[serde(flatten)]
    error: ErrorResponse,
    details: Value,
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, axum::Json<Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let payload =
                    ErrorResponse::new(format!("Invalid JSON: {}", rejection.body_text()));
                (rejection.status(), axum::Json(json!(payload)))
            })?;

        value.validate().map_err(|validation_errors| {
            let payload = ValidationErrorResponse {
                error: ErrorResponse::new(format!(
                    "Validation failed: {}",
                    validation_messages(&validation_errors).join("; ")
                )),
                details: detailed(&validation_errors),
            };
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(json!(payload)))
        })?;

        Ok(Self(value))
    }
}

fn detailed(errors: &ValidationErrors) -> Value {
    let mut error_map = serde_json::Map::new();

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {field}"))
            })
            .collect();
        error_map.insert(field.to_string(), json!(messages));
    }

    Value::Object(error_map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requests::product::CreateProductRequest;
    use axum::body::Body;

    fn json_request(body: &str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri("/productos")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn rule_violations_are_unprocessable() {
        let body = r#"{"name":"Mouse","price":0,"category":"Periféricos","stock":5}"#;
        let rejection = ValidatedJson::<CreateProductRequest>::from_request(json_request(body), &())
            .await
            .err()
            .unwrap();

        assert_eq!(rejection.0, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            rejection.1.0["details"]["price"][0],
            "Price must be between 0.01 and 99999999.99"
        );
    }

    #[tokio::test]
    async fn rejection_bodies_keep_the_shared_error_shape() {
        let invalid = r#"{"name":"","price":25.5,"category":"Periféricos","stock":5}"#;
        let (_, axum::Json(body)) =
            ValidatedJson::<CreateProductRequest>::from_request(json_request(invalid), &())
                .await
                .err()
                .unwrap();

        assert_eq!(body.as_object().unwrap().len(), 3);
        let shared: ErrorResponse = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(shared.status, "error");
        assert!(shared.message.contains("name:"));
        assert!(body["details"]["name"].is_array());

        let (status, axum::Json(body)) =
            ValidatedJson::<CreateProductRequest>::from_request(json_request("{"), &())
                .await
                .err()
                .unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.as_object().unwrap().len(), 2);
        let shared: ErrorResponse = serde_json::from_value(body).unwrap();
        assert!(shared.message.starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn valid_body_is_extracted() {
        let body = r#"{"name":"Mouse","price":25.5,"category":"Periféricos","stock":5}"#;
        let ValidatedJson(req) =
            ValidatedJson::<CreateProductRequest>::from_request(json_request(body), &())
                .await
                .ok()
                .unwrap();

        assert_eq!(req.name, "Mouse");
        assert!(req.id.is_none());
        assert!(req.description.is_none());
    }
}
