// hostee-client/src/accounts.rs
// 账号流程 - 注册、登录、登出

use shared::models::{ProfileSeed, Session};
use shared::util::now_rfc3339;

use crate::client::HosteeClient;
use crate::{ClientResult, MIN_PASSWORD_LEN, ValidationError};

/// Sign-up form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// Display name (required)
    pub name: String,
    pub phone: String,
    pub role: String,
    pub shift: String,
    pub experience: String,
    pub restaurant: String,
}

impl RegistrationForm {
    /// Form with the required fields filled in
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Local checks, in order: required fields, confirmation, length
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() || self.password.is_empty() || self.name.trim().is_empty()
        {
            return Err(ValidationError::RequiredFields);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }
        Ok(())
    }

    fn seed(&self) -> ProfileSeed {
        ProfileSeed {
            email: self.email.trim().to_string(),
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            role: self.role.trim().to_string(),
            shift: self.shift.trim().to_string(),
            experience: self.experience.trim().to_string(),
            restaurant: self.restaurant.trim().to_string(),
        }
    }
}

/// Sign-in form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Both fields must hold something besides whitespace
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() || self.password.trim().is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        Ok(())
    }
}

/// Account flows bound to a client
pub struct Accounts<'a> {
    client: &'a HosteeClient,
}

impl<'a> Accounts<'a> {
    pub(crate) fn new(client: &'a HosteeClient) -> Self {
        Self { client }
    }

    /// Create the account and its profile document
    ///
    /// The new session is stored as soon as the account exists. If the
    /// profile write then fails the error is returned and the user stays
    /// signed in; the profile screen falls back to defaults.
    pub async fn register(&self, form: &RegistrationForm) -> ClientResult<Session> {
        form.validate()?;
        let email = form.email.trim();

        let session = self
            .client
            .bounded(
                "create_account",
                self.client.auth_service.create_account(email, &form.password),
            )
            .await?;
        self.client.auth.set(session.clone());
        tracing::info!(uid = %session.uid, "Account created");

        let document = form.seed().into_document(&now_rfc3339());
        let collection = &self.client.config.users_collection;
        let written = self
            .client
            .bounded(
                "set_document",
                self.client
                    .documents
                    .set_document(&session, collection, &session.uid, document, false),
            )
            .await;
        if let Err(e) = written {
            tracing::error!(uid = %session.uid, error = %e, "Failed to write initial profile");
            return Err(e);
        }

        Ok(session)
    }

    /// Authenticate and store the session
    pub async fn sign_in(&self, form: &LoginForm) -> ClientResult<Session> {
        form.validate()?;

        let session = self
            .client
            .bounded(
                "sign_in",
                self.client
                    .auth_service
                    .sign_in(form.email.trim(), &form.password),
            )
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Sign-in failed"))?;

        self.client.auth.set(session.clone());
        tracing::info!(uid = %session.uid, "Signed in");
        Ok(session)
    }

    /// Sign out and clear the session
    ///
    /// Signed-out callers get `Ok` without a remote call. When the service
    /// fails the session is kept so the user can retry.
    pub async fn sign_out(&self) -> ClientResult<()> {
        let Some(session) = self.client.auth.current() else {
            return Ok(());
        };

        self.client
            .bounded("sign_out", self.client.auth_service.sign_out(&session))
            .await?;
        self.client.auth.clear();
        tracing::info!(uid = %session.uid, "Signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_validation_order() {
        // Missing name wins over mismatch and length
        let form = RegistrationForm::new("ana@hostee.com", "123", "456", " ");
        assert_eq!(form.validate(), Err(ValidationError::RequiredFields));

        // Mismatch wins over length
        let form = RegistrationForm::new("ana@hostee.com", "123", "456", "Ana");
        assert_eq!(form.validate(), Err(ValidationError::PasswordMismatch));

        let form = RegistrationForm::new("ana@hostee.com", "12345", "12345", "Ana");
        assert_eq!(form.validate(), Err(ValidationError::PasswordTooShort));

        let form = RegistrationForm::new("ana@hostee.com", "123456", "123456", "Ana");
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_password_length_counts_characters() {
        // 6 characters, 7 bytes
        let form = RegistrationForm::new("ana@hostee.com", "contrñ", "contrñ", "Ana");
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert_eq!(
            LoginForm::new("  ", "secreto").validate(),
            Err(ValidationError::MissingCredentials)
        );
        assert_eq!(
            LoginForm::new("ana@hostee.com", "   ").validate(),
            Err(ValidationError::MissingCredentials)
        );
        assert!(LoginForm::new("ana@hostee.com", "secreto").validate().is_ok());
    }

    #[test]
    fn test_seed_trims_fields() {
        let mut form = RegistrationForm::new(" ana@hostee.com ", "123456", "123456", " Ana ");
        form.role = "  ".into();
        let seed = form.seed();
        assert_eq!(seed.email, "ana@hostee.com");
        assert_eq!(seed.name, "Ana");
        assert!(seed.role.is_empty());
    }
}
