//! `Json<T>` followed by `validator` checks.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::errors::AppError;

/// Request body that deserialized and passed its `#[validate]` rules.
///
/// Both failure kinds (bad JSON, rule violations) come back as
/// `AppError::Validation`, i.e. 400.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = match Json::<T>::from_request(req, state).await {
            Ok(Json(body)) => body,
            Err(rejection) => return Err(AppError::validation(rejection.body_text())),
        };

        if let Err(errors) = body.validate() {
            return Err(AppError::validation(describe(&errors)));
        }

        Ok(Self(body))
    }
}

/// One message per failed rule, fields in alphabetical order.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut messages = Vec::new();
    for (field, failures) in fields {
        for failure in failures.iter() {
            match &failure.message {
                Some(message) => messages.push(message.to_string()),
                None => messages.push(format!("{} is invalid", field)),
            }
        }
    }

    messages.join("; ")
}
