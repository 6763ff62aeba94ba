//! Request DTOs with validation.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

use almacen_core::error::AppError;
use almacen_entity::user::UserRole;
use almacen_entity::user::model::is_valid_email;
use almacen_service::auth::{LoginInput, RegisterInput};
use almacen_service::category::{CategoryInput, UpdateCategoryInput};
use almacen_service::user::{CreateUserInput, UpdateUserInput};

/// Registration body (`/api/auth/signup`), also used by `POST /api/users`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Login name.
    #[validate(length(min = 1, message = "userName is required"))]
    pub user_name: String,
    /// Email address.
    #[validate(custom(function = "validate_email_address"))]
    pub email: String,
    /// Plaintext password; length is checked against configuration.
    pub password: String,
    /// Optional role, defaulting to `auxiliar`.
    #[serde(default)]
    pub role: Option<UserRole>,
}

impl From<SignupRequest> for RegisterInput {
    fn from(req: SignupRequest) -> Self {
        Self {
            user_name: req.user_name,
            email: req.email,
            password: req.password,
            role: req.role,
        }
    }
}

impl From<SignupRequest> for CreateUserInput {
    fn from(req: SignupRequest) -> Self {
        Self {
            user_name: req.user_name,
            email: req.email,
            password: req.password,
            role: req.role,
        }
    }
}

/// Same address rule the services apply on update.
fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message("email is not a valid address".into()))
    }
}

/// Login body. Either `userName` or `email` must be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninRequest {
    /// Login name.
    #[serde(default)]
    pub user_name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Plaintext password.
    #[serde(default)]
    pub password: Option<String>,
}

impl From<SigninRequest> for LoginInput {
    fn from(req: SigninRequest) -> Self {
        Self {
            user_name: req.user_name,
            email: req.email,
            password: req.password,
        }
    }
}

/// Typed part of a user update. `role` is read separately from the raw
/// body because its mere presence matters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateUserFields {
    #[serde(default)]
    user_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    active: Option<bool>,
}

/// Converts a raw `PUT /api/users/{id}` body into an update.
pub fn update_user_input(body: Value) -> Result<UpdateUserInput, AppError> {
    let Value::Object(mut map) = body else {
        return Err(AppError::validation("Request body must be a JSON object"));
    };

    let role = map.remove("role").map(|v| match v {
        Value::String(s) => s,
        other => other.to_string(),
    });
    let fields: UpdateUserFields = serde_json::from_value(Value::Object(map))
        .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;

    Ok(UpdateUserInput {
        user_name: fields.user_name,
        email: fields.email,
        password: fields.password,
        role,
        active: fields.active,
    })
}

/// Category creation body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryRequest {
    /// Name.
    #[serde(default)]
    pub name: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
}

impl From<CategoryRequest> for CategoryInput {
    fn from(req: CategoryRequest) -> Self {
        Self {
            name: req.name.unwrap_or_default(),
            description: req.description.unwrap_or_default(),
        }
    }
}

/// Category update body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCategoryRequest {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New active flag.
    #[serde(default)]
    pub active: Option<bool>,
}

impl From<UpdateCategoryRequest> for UpdateCategoryInput {
    fn from(req: UpdateCategoryRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            active: req.active,
        }
    }
}

/// Query flags are on only for the literal `true`; any other value is off.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(String::deserialize(deserializer)? == "true")
}

/// `?includeInactive=true`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Include soft-deleted records.
    #[serde(default, deserialize_with = "flag")]
    pub include_inactive: bool,
}

/// `?hardDelete=true`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteQuery {
    /// Remove permanently instead of deactivating.
    #[serde(default, deserialize_with = "flag")]
    pub hard_delete: bool,
}
