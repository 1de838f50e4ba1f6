//! Request extractors whose rejections render as failure envelopes
//!
//! axum's own `Json`, `Path` and `Query` reject with plain-text bodies.
//! The wrappers here turn every rejection into an [`ApiError`], which renders
//! the usual `{success: false, ...}` envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::error::ApiError;

/// JSON body that must also pass `validator` rules.
///
/// Malformed or mistyped JSON answers 400, rule violations 422.
pub struct ValidatedJson<T>(pub T);

/// Path parameters; unparseable segments answer 400.
pub struct ApiPath<T>(pub T);

/// Query string; values of the wrong type answer 400.
pub struct ApiQuery<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match &rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                StatusCode::BAD_REQUEST
            }
            other => other.status(),
        };
        ApiError::new(status, format!("Invalid JSON: {}", rejection.body_text()))
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, validation_message(&errors))
    }
}

/// `field: message` pairs joined by `; `, ordered by field name.
fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let parts: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{field}: {msg}"),
                None => format!("{field}: invalid ({})", e.code),
            })
        })
        .collect();

    if parts.is_empty() {
        "Validation failed".to_string()
    } else {
        parts.join("; ")
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| Self(value))
            .map_err(|r| ApiError::new(r.status(), r.body_text()))
    }
}

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|r| ApiError::new(r.status(), r.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::http::modules::products::dto::{
        CreateProductRequest, ListProductsParams,
    };
    use axum::http::Uri;

    fn request_parts(uri: &'static str) -> Parts {
        let request = axum::http::Request::builder()
            .uri(Uri::from_static(uri))
            .body(())
            .unwrap();
        request.into_parts().0
    }

    fn create_request(body: serde_json::Value) -> CreateProductRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn product_rule_violations_are_422_and_name_each_field() {
        let req = create_request(serde_json::json!({
            "name": "",
            "reviews_count": -1,
        }));
        let err = ApiError::from(req.validate().unwrap_err());

        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        let name_at = err.message.find("name: name is required").unwrap();
        let count_at = err.message.find("reviews_count: invalid (range)").unwrap();
        assert!(name_at < count_at);
    }

    #[test]
    fn valid_product_passes() {
        let req = create_request(serde_json::json!({"name": "Desk Lamp", "sku": "LAMP-1"}));
        assert!(req.validate().is_ok());
    }

    #[tokio::test]
    async fn mistyped_filter_is_a_400_api_error() {
        let mut parts = request_parts("/api/v1/products?active=yes");

        let err = ApiQuery::<ListProductsParams>::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.starts_with("Failed to deserialize query string"));
    }

    #[tokio::test]
    async fn lenient_paging_values_do_not_reject() {
        let mut parts = request_parts("/api/v1/products?limit=abc&offset=7");

        let ApiQuery(params) = ApiQuery::<ListProductsParams>::from_request_parts(&mut parts, &())
            .await
            .map_err(|e| e.message)
            .unwrap();
        assert_eq!(params.limit, None);
        assert_eq!(params.offset, Some(7));
    }
}
