use crate::core::error::AccountError;
use crate::models::account::NewAccount;
use crate::models::form::{CreateAccountForm, LoginForm, ResetPinForm};
use crate::validation::pin::{validate_pin_pair, Pin};

/// Login input after trimming; the PIN is deliberately not format-checked
#[derive(Debug)]
pub struct ValidatedLogin {
    pub username: String,
    pub pin: String,
}

impl CreateAccountForm {
    /// Check order: required fields, PIN format, PIN match.
    /// Username uniqueness needs the store and is checked there.
    pub fn validate(self) -> Result<NewAccount, AccountError> {
        let first_name = required(&self.first_name, "First Name")?;
        let last_name = required(&self.last_name, "Last Name")?;
        let address_line1 = required(&self.address_line1, "Address Line 1")?;
        let account_type = self.account_type.ok_or(AccountError::MissingField("Account Type"))?;
        let username = required(&self.username, "Username")?;
        let pin = required(&self.pin, "PIN")?;
        let confirm_pin = required(&self.confirm_pin, "Confirm PIN")?;
        let security_question = self
            .security_question
            .ok_or(AccountError::MissingField("Security Question"))?;
        let security_answer = required(&self.security_answer, "Security Answer")?;

        let pin = validate_pin_pair(&pin, &confirm_pin)?;

        let address_line2 = match self.address_line2.trim() {
            "" => None,
            line => Some(line.to_string()),
        };

        Ok(NewAccount {
            first_name,
            last_name,
            address_line1,
            address_line2,
            account_type,
            username,
            pin,
            security_question,
            security_answer,
        })
    }
}

impl LoginForm {
    pub fn validate(self) -> Result<ValidatedLogin, AccountError> {
        let username = required(&self.username, "Username")?;
        let pin = required(&self.pin, "PIN")?;

        Ok(ValidatedLogin { username, pin })
    }
}

impl ResetPinForm {
    pub fn validate(self) -> Result<Pin, AccountError> {
        let new_pin = required(&self.new_pin, "New PIN")?;
        let confirm_pin = required(&self.confirm_pin, "Confirm New PIN")?;

        validate_pin_pair(&new_pin, &confirm_pin)
    }
}

/// Trimmed value of a required text field
pub fn required(value: &str, field: &'static str) -> Result<String, AccountError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AccountError::MissingField(field));
    }
    Ok(trimmed.to_string())
}
