//! Account records and the request bodies that create or change them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A registered account. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Birthday", default)]
    pub birthday: Option<NaiveDate>,
    #[serde(rename = "FavoriteMovies", default)]
    pub favorite_movies: Vec<Uuid>,
}

/// Fields needed to insert a new account; `password_hash` is already hashed.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<NaiveDate>,
}

/// POST /users body.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(rename = "Username", default)]
    #[validate(length(min = 5, message = "Username must be at least 5 characters"))]
    pub username: String,
    #[serde(rename = "Password", default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[serde(rename = "Email", default)]
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[serde(rename = "Birthday", default)]
    pub birthday: Option<NaiveDate>,
}

/// PUT /users/:username body. Present fields follow the registration rules.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    #[serde(rename = "Username", default)]
    #[validate(length(min = 5, message = "Username must be at least 5 characters"))]
    pub username: Option<String>,
    #[serde(rename = "Password", default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: Option<String>,
    #[serde(rename = "Email", default)]
    #[validate(email(message = "Email is invalid"))]
    pub email: Option<String>,
    #[serde(rename = "Birthday", default)]
    pub birthday: Option<NaiveDate>,
}

/// POST /login body. Missing fields deserialize empty and fail credential checks.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "Username", default)]
    pub username: String,
    #[serde(rename = "Password", default)]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_account_omits_password_hash() {
        let account = Account {
            id: Uuid::new_v4(),
            username: "alice".into(),
            password_hash: "$argon2id$secret".into(),
            email: "a@x.com".into(),
            birthday: None,
            favorite_movies: vec![],
        };
        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["Username"], "alice");
        assert_eq!(json["_id"], account.id.to_string());
    }

    #[test]
    fn register_request_rules() {
        let ok: RegisterRequest = serde_json::from_value(serde_json::json!({
            "Username": "alice",
            "Password": "secret123",
            "Email": "a@x.com"
        }))
        .unwrap();
        assert!(ok.validate().is_ok());

        let short: RegisterRequest = serde_json::from_value(serde_json::json!({
            "Username": "bob",
            "Password": "secret123",
            "Email": "not-an-email"
        }))
        .unwrap();
        let errors = short.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn login_request_defaults_missing_credentials() {
        let body: LoginRequest =
            serde_json::from_value(serde_json::json!({ "Username": "alice" })).unwrap();
        assert_eq!(body.username, "alice");
        assert!(body.password.is_empty());
    }

    #[test]
    fn update_request_skips_absent_fields() {
        let body: UpdateAccountRequest =
            serde_json::from_value(serde_json::json!({ "Email": "new@x.com" })).unwrap();
        assert!(body.validate().is_ok());
        assert!(body.username.is_none());
    }
}
