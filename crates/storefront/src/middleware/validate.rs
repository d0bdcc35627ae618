use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use shared::errors::HttpError;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// JSON body extractor that runs `validator` rules. Malformed bodies and
/// rule violations are both answered with 400.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| HttpError::Rejected {
                status: StatusCode::BAD_REQUEST,
                message: "Invalid JSON body".into(),
                details: json!({ "reason": rejection.body_text() }),
            })?;

        value.validate().map_err(|errors| {
            let fields = collect_field_errors(&errors);
            HttpError::Rejected {
                status: StatusCode::BAD_REQUEST,
                message: summarize(&fields),
                details: json!(fields),
            }
        })?;

        Ok(Self(value))
    }
}

fn summarize(fields: &BTreeMap<String, Vec<String>>) -> String {
    if fields.is_empty() {
        return "Validation failed".into();
    }

    fields
        .iter()
        .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{field}: {m}")))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Flattens nested and list errors into `items[0].quantity` style keys.
/// Struct level rules land under `__all__`.
fn collect_field_errors(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    let mut out = BTreeMap::new();
    walk("", errors, &mut out);
    out
}

fn walk(prefix: &str, errors: &ValidationErrors, out: &mut BTreeMap<String, Vec<String>>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages = out.entry(path.clone()).or_default();
                messages.extend(field_errors.iter().map(|e| message_for(&path, e)));
            }
            ValidationErrorsKind::Struct(inner) => walk(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    walk(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}

fn message_for(field: &str, error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| match error.code.as_ref() {
            "email" => "Invalid email format".to_string(),
            "length" => "Invalid length".to_string(),
            "range" => "Value out of range".to_string(),
            _ => format!("Invalid {field}"),
        })
}
