//! Auth Form Controller
//!
//! Backs the login and signup forms: sends credentials, maps the backend's
//! structured error codes to user-facing messages, updates the session and
//! navigates on success.
//!
//! Each submit performs at most one outbound request, one session write and
//! one navigation. While a request is outstanding further submits are
//! refused with [`AuthError::InProgress`].

use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error;

use crate::api::{codes, AnalyticsApi, ApiError, Credentials};
use crate::navigation::{Navigator, Route};
use crate::session::{SessionContext, StorageError};

/// Notice shown after a successful signup
pub const SIGNUP_SUCCESS: &str = "Signup successful! Please login.";

/// Failure of a login or signup submit; `Display` is the user-facing message
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Passwords don't match!")]
    PasswordMismatch,

    #[error("This email is not registered. Please sign up first.")]
    EmailNotFound,

    #[error("Password is incorrect. Please try again.")]
    InvalidPassword,

    #[error("Email already exists! Please use a different email.")]
    EmailExists,

    #[error("Login failed. Please check your credentials.")]
    LoginFailed,

    #[error("An error occurred during signup. Please try again.")]
    SignupFailed,

    #[error("Error connecting to server. Please try again.")]
    Connectivity,

    #[error("A request is already in progress.")]
    InProgress,

    #[error("Could not save your session. Please try again.")]
    Storage(#[source] StorageError),
}

/// Coarse classification of an [`AuthError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caught before any network call
    Validation,
    /// Structured rejection from the backend
    Domain,
    /// Unreachable endpoint or malformed response
    Connectivity,
    /// Submit refused because another one is outstanding
    Busy,
    /// Local session storage failed
    Storage,
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::PasswordMismatch => ErrorKind::Validation,
            AuthError::EmailNotFound
            | AuthError::InvalidPassword
            | AuthError::EmailExists
            | AuthError::LoginFailed
            | AuthError::SignupFailed => ErrorKind::Domain,
            AuthError::Connectivity => ErrorKind::Connectivity,
            AuthError::InProgress => ErrorKind::Busy,
            AuthError::Storage(_) => ErrorKind::Storage,
        }
    }

    fn from_login(err: &ApiError) -> Self {
        match err.code() {
            Some(codes::EMAIL_NOT_FOUND) => AuthError::EmailNotFound,
            Some(codes::INVALID_PASSWORD) => AuthError::InvalidPassword,
            _ if err.is_connectivity() => AuthError::Connectivity,
            _ => AuthError::LoginFailed,
        }
    }

    fn from_signup(err: &ApiError) -> Self {
        match err.code() {
            Some(codes::EMAIL_EXISTS) => AuthError::EmailExists,
            _ => AuthError::SignupFailed,
        }
    }
}

/// Resets the in-flight flag on every exit path
struct Submitting<'a>(&'a Cell<bool>);

impl<'a> Submitting<'a> {
    fn begin(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for Submitting<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Controller behind the login and signup forms
pub struct AuthFormController {
    api: Rc<dyn AnalyticsApi>,
    session: SessionContext,
    navigator: Rc<dyn Navigator>,
    submitting: Cell<bool>,
}

impl AuthFormController {
    pub fn new(
        api: Rc<dyn AnalyticsApi>,
        session: SessionContext,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            session,
            navigator,
            submitting: Cell::new(false),
        }
    }

    /// Whether a submit is outstanding; forms disable their button on this
    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    /// Log in and, on success, authenticate the session and open the dashboard
    pub async fn submit_login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let _submitting = Submitting::begin(&self.submitting).ok_or(AuthError::InProgress)?;

        let credentials = Credentials::new(email, password);
        if let Err(e) = self.api.login(&credentials).await {
            let err = AuthError::from_login(&e);
            tracing::warn!(email = %email, error = %e, "Login rejected");
            return Err(err);
        }

        self.session
            .set_authenticated(email)
            .map_err(AuthError::Storage)?;
        self.navigator.go_to(Route::Dashboard, &[]);
        Ok(())
    }

    /// Register a new account; on success the user is sent to log in
    ///
    /// Signup never authenticates the session by itself.
    pub async fn submit_signup(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<&'static str, AuthError> {
        if password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let _submitting = Submitting::begin(&self.submitting).ok_or(AuthError::InProgress)?;

        let credentials = Credentials::new(email, password);
        if let Err(e) = self.api.signup(&credentials).await {
            tracing::warn!(email = %email, error = %e, "Signup rejected");
            return Err(AuthError::from_signup(&e));
        }

        tracing::info!(email = %email, "Signup succeeded");
        self.navigator.go_to(Route::Login, &[]);
        Ok(SIGNUP_SUCCESS)
    }
}
