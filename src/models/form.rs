use crate::models::account::{AccountType, SecurityQuestion};

/// Raw input of the Create Account screen
///
/// Selectors are `None` while left at the placeholder.
#[derive(Debug, Clone, Default)]
pub struct CreateAccountForm {
    pub first_name: String,
    pub last_name: String,
    pub address_line1: String,
    pub address_line2: String,
    pub account_type: Option<AccountType>,
    pub username: String,
    pub pin: String,
    pub confirm_pin: String,
    pub security_question: Option<SecurityQuestion>,
    pub security_answer: String,
}

/// Raw input of the Login screen
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub pin: String,
}

/// Raw input of the Reset PIN screen
#[derive(Debug, Clone, Default)]
pub struct ResetPinForm {
    pub new_pin: String,
    pub confirm_pin: String,
}
