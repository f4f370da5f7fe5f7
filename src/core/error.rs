// Centralized error handling for account operations

use thiserror::Error;

/// Errors surfaced to the user by the account forms
///
/// Every variant except `Storage` is a validation failure: the current
/// screen stays where it is and the message is shown to the user.
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Please fill in all fields ({0} is empty)")]
    MissingField(&'static str),

    #[error("PIN must be a 4-digit number")]
    InvalidPinFormat,

    #[error("PINs do not match")]
    PinMismatch,

    #[error("Username already exists. Please choose another one")]
    DuplicateUsername,

    #[error("Username not found")]
    UsernameNotFound,

    #[error("Incorrect answer to security question")]
    WrongSecurityAnswer,

    #[error("Invalid username or PIN")]
    InvalidCredentials,

    #[error("'{action}' is not available on the {screen} screen")]
    UnexpectedAction {
        action: &'static str,
        screen: &'static str,
    },

    #[error("Account storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

impl AccountError {
    /// True for failures caused by user input rather than the store
    pub fn is_validation(&self) -> bool {
        !matches!(self, AccountError::Storage(_))
    }
}
