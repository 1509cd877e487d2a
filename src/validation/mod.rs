use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use chrono::NaiveDate;
use serde_json::{Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::database::models::NewUser;
use crate::error::{ApiError, FieldError};

/// Response order of violations, by payload field
const FIELD_ORDER: [&str; 4] = ["Username", "Password", "Email", "Birthday"];

/// Registration and update payload
#[derive(Debug, Clone, Validate)]
pub struct UserPayload {
    #[validate(length(min = 5, message = "Username is required"))]
    #[validate(custom(function = "alphanumeric"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[validate(email(message = "Email does not appear to be valid"))]
    pub email: String,

    pub birthday: Option<NaiveDate>,
}

fn alphanumeric(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Ok(());
    }
    let mut error = ValidationError::new("alphanumeric");
    error.message = Some("Username contains non alphanumeric characters - not allowed.".into());
    Err(error)
}

impl UserPayload {
    /// Read a payload out of a JSON body and run every rule.
    ///
    /// Missing or null fields read as empty and surface as rule violations.
    /// A field of the wrong type is reported the same way, one entry per field.
    pub fn from_json(body: Value) -> Result<Self, ApiError> {
        let Value::Object(fields) = body else {
            return Err(ApiError::bad_request("Request body must be a JSON object"));
        };

        let mut malformed = Vec::new();
        let payload = Self {
            username: text_field(&fields, "Username", true, &mut malformed),
            password: text_field(&fields, "Password", false, &mut malformed),
            email: text_field(&fields, "Email", true, &mut malformed),
            birthday: date_field(&fields, &mut malformed),
        };

        let mut errors = payload.rule_violations();
        errors.retain(|e| !malformed.iter().any(|m: &FieldError| m.param == e.param));
        errors.extend(malformed);
        if errors.is_empty() {
            return Ok(payload);
        }

        errors.sort_by_key(|e| FIELD_ORDER.iter().position(|p| *p == e.param));
        Err(ApiError::Validation(errors))
    }

    fn rule_violations(&self) -> Vec<FieldError> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => self.field_errors(&errors),
        }
    }

    /// Writable user fields with the password already hashed.
    pub fn into_new_user(self, password_hash: String) -> NewUser {
        NewUser {
            username: self.username,
            password_hash,
            email: self.email,
            birthday: self.birthday,
        }
    }

    fn field_errors(&self, errors: &ValidationErrors) -> Vec<FieldError> {
        let by_field = errors.field_errors();

        // Fixed order keeps responses stable; the password value is never echoed
        let fields = [
            ("Username", "username", Some(&self.username)),
            ("Password", "password", None),
            ("Email", "email", Some(&self.email)),
        ];

        let mut out = Vec::new();
        for (param, key, value) in fields {
            let Some(violations) = by_field.get(key) else {
                continue;
            };
            for violation in violations.iter() {
                out.push(FieldError {
                    location: "body",
                    param,
                    msg: violation
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| violation.code.to_string()),
                    value: value.cloned(),
                });
            }
        }
        out
    }
}

/// Extractor that parses a JSON [`UserPayload`] and rejects it with 422 when
/// any rule fails.
#[derive(Debug)]
pub struct ValidatedUser(pub UserPayload);

#[async_trait]
impl<S> FromRequest<S> for ValidatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!("Unreadable user payload: {}", rejection.body_text());
                ApiError::bad_request("Request body must be valid JSON")
            })?;

        Ok(Self(UserPayload::from_json(body)?))
    }
}

/// String field; anything other than a string or null is recorded as malformed.
fn text_field(
    fields: &Map<String, Value>,
    param: &'static str,
    echo: bool,
    malformed: &mut Vec<FieldError>,
) -> String {
    match fields.get(param) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(value)) => value.clone(),
        Some(other) => {
            malformed.push(FieldError {
                location: "body",
                param,
                msg: format!("{param} must be a string"),
                value: echo.then(|| other.to_string()),
            });
            String::new()
        }
    }
}

fn date_field(fields: &Map<String, Value>, malformed: &mut Vec<FieldError>) -> Option<NaiveDate> {
    let raw = match fields.get("Birthday") {
        None | Some(Value::Null) => return None,
        Some(raw) => raw,
    };

    let parsed = raw
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
    if parsed.is_none() {
        malformed.push(FieldError {
            location: "body",
            param: "Birthday",
            msg: "Birthday must be a date (YYYY-MM-DD)".to_string(),
            value: Some(raw.as_str().map_or_else(|| raw.to_string(), str::to_string)),
        });
    }
    parsed
}
