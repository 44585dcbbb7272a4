/// User model and authentication forms
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Argon2 PHC hash
    pub password: String,
    pub name: String,
}

/// What templates may see of the logged-in user
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "Please enter your full name."))]
    pub name: String,
    #[validate(
        length(min = 1, message = "Please enter your email."),
        email(message = "Invalid email address.")
    )]
    pub email: String,
    #[serde(skip_serializing)]
    #[validate(length(min = 1, message = "Please enter a password."))]
    pub password: String,
    #[serde(skip_serializing)]
    #[validate(length(min = 1, message = "Please confirm your password."))]
    pub confirm_password: String,
}

impl RegisterForm {
    /// Trim text inputs and lower-case the email. Passwords are kept verbatim.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = normalize_email(&self.email);
        if self.password.trim().is_empty() {
            self.password.clear();
        }
        if self.confirm_password.trim().is_empty() {
            self.confirm_password.clear();
        }
        self
    }

    pub fn passwords_match(&self) -> bool {
        self.password == self.confirm_password
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoginForm {
    #[validate(
        length(min = 1, message = "Please enter your email."),
        email(message = "Invalid email address.")
    )]
    pub email: String,
    #[serde(skip_serializing)]
    #[validate(length(min = 1, message = "Please enter your password."))]
    pub password: String,
}

impl LoginForm {
    pub fn normalized(mut self) -> Self {
        self.email = normalize_email(&self.email);
        if self.password.trim().is_empty() {
            self.password.clear();
        }
        self
    }
}

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_form(name: &str, email: &str, password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_valid_register_form() {
        let form = register_form(" Ada ", " Ada@Example.COM ", "secret", "secret").normalized();
        assert!(form.validate().is_ok());
        assert_eq!(form.name, "Ada");
        assert_eq!(form.email, "ada@example.com");
        assert!(form.passwords_match());
    }

    #[test]
    fn test_whitespace_only_fields_are_required() {
        let form = register_form("   ", "ada@example.com", "   ", "secret").normalized();
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let form = LoginForm {
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        }
        .normalized();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_password_mismatch_detected() {
        let form = register_form("Ada", "ada@example.com", "secret", "Secret").normalized();
        assert!(form.validate().is_ok());
        assert!(!form.passwords_match());
    }

    #[test]
    fn test_passwords_not_serialized() {
        let form = register_form("Ada", "ada@example.com", "secret", "secret");
        let json = serde_json::to_string(&form).unwrap();
        assert!(!json.contains("secret"));
    }
}
