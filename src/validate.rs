use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{NewUser, Role, Status, User, UserPatch};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    MissingField,
    InvalidFormat,
    DuplicateEmail,
}

/// One field-level validation failure, returned in the 400 response body.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub code: ErrorCode,
    pub message: String,
}

impl FieldError {
    fn missing(field: &'static str) -> Self {
        FieldError {
            field,
            code: ErrorCode::MissingField,
            message: format!("{field} is required"),
        }
    }

    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        FieldError {
            field,
            code: ErrorCode::InvalidFormat,
            message: message.into(),
        }
    }
}

/// Create request body. All fields are optional at the deserialization
/// layer so that absence surfaces as a field error rather than a serde
/// rejection.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

/// Update request body; every field may be omitted.
#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

/// Check a full create payload: every field present and well-formed.
/// Uniqueness is checked separately via `check_email_unique`.
pub fn validate_create(req: &CreateUser) -> Result<NewUser, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = match req.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => Some(name.to_string()),
        _ => {
            errors.push(FieldError::missing("name"));
            None
        }
    };

    let email = match req.email.as_deref().map(str::trim) {
        Some(email) if !email.is_empty() => {
            if EMAIL_RE.is_match(email) {
                Some(email.to_string())
            } else {
                errors.push(FieldError::invalid("email", "email is invalid"));
                None
            }
        }
        _ => {
            errors.push(FieldError::missing("email"));
            None
        }
    };

    let role = match req.role.as_deref() {
        Some(raw) if !raw.is_empty() => match Role::from_str(raw) {
            Ok(role) => Some(role),
            Err(()) => {
                errors.push(FieldError::invalid(
                    "role",
                    "role must be one of: admin, manager, user",
                ));
                None
            }
        },
        _ => {
            errors.push(FieldError::missing("role"));
            None
        }
    };

    let status = match req.status.as_deref() {
        Some(raw) if !raw.is_empty() => match Status::from_str(raw) {
            Ok(status) => Some(status),
            Err(()) => {
                errors.push(FieldError::invalid(
                    "status",
                    "status must be one of: active, inactive",
                ));
                None
            }
        },
        _ => {
            errors.push(FieldError::missing("status"));
            None
        }
    };

    match (name, email, role, status) {
        (Some(name), Some(email), Some(role), Some(status)) if errors.is_empty() => Ok(NewUser {
            name,
            email,
            role,
            status,
        }),
        _ => Err(errors),
    }
}

/// Check a partial update payload: only present fields are validated.
pub fn validate_update(req: &UpdateUser) -> Result<UserPatch, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut patch = UserPatch::default();

    if let Some(name) = req.name.as_deref().map(str::trim) {
        if name.is_empty() {
            errors.push(FieldError::missing("name"));
        } else {
            patch.name = Some(name.to_string());
        }
    }

    if let Some(email) = req.email.as_deref().map(str::trim) {
        if EMAIL_RE.is_match(email) {
            patch.email = Some(email.to_string());
        } else {
            errors.push(FieldError::invalid("email", "email is invalid"));
        }
    }

    if let Some(raw) = req.role.as_deref() {
        match Role::from_str(raw) {
            Ok(role) => patch.role = Some(role),
            Err(()) => errors.push(FieldError::invalid(
                "role",
                "role must be one of: admin, manager, user",
            )),
        }
    }

    if let Some(raw) = req.status.as_deref() {
        match Status::from_str(raw) {
            Ok(status) => patch.status = Some(status),
            Err(()) => errors.push(FieldError::invalid(
                "status",
                "status must be one of: active, inactive",
            )),
        }
    }

    if errors.is_empty() { Ok(patch) } else { Err(errors) }
}

/// Exact-match uniqueness scan over the current record set. `exclude`
/// skips the record being updated so a user can keep their own email.
pub fn check_email_unique(
    email: &str,
    exclude: Option<Uuid>,
    users: &[User],
) -> Result<(), FieldError> {
    let taken = users
        .iter()
        .any(|u| Some(u.id) != exclude && u.email == email);
    if taken {
        Err(FieldError {
            field: "email",
            code: ErrorCode::DuplicateEmail,
            message: "A user with this email already exists".to_string(),
        })
    } else {
        Ok(())
    }
}
