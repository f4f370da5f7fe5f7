use crate::validation::pin::Pin;
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Label shown by a selector that has no choice yet
pub const SELECT_PLACEHOLDER: &str = "-- Select --";

/// Kind of account chosen at creation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountType {
    User,
    Vendor,
}

impl AccountType {
    pub const ALL: [AccountType; 2] = [AccountType::User, AccountType::Vendor];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::User => "User",
            AccountType::Vendor => "Vendor",
        }
    }
}

/// Fixed set of recovery questions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SecurityQuestion {
    MothersMaidenName,
    BirthCity,
    FirstPet,
    FavoriteColor,
    ElementarySchool,
}

impl SecurityQuestion {
    pub const ALL: [SecurityQuestion; 5] = [
        SecurityQuestion::MothersMaidenName,
        SecurityQuestion::BirthCity,
        SecurityQuestion::FirstPet,
        SecurityQuestion::FavoriteColor,
        SecurityQuestion::ElementarySchool,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityQuestion::MothersMaidenName => "What is your mother's maiden name?",
            SecurityQuestion::BirthCity => "What city were you born in?",
            SecurityQuestion::FirstPet => "What is the name of your first pet?",
            SecurityQuestion::FavoriteColor => "What is your favorite color?",
            SecurityQuestion::ElementarySchool => "What is the name of your elementary school?",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChoice(pub String);

impl fmt::Display for UnknownChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown choice '{}'", self.0)
    }
}

impl std::error::Error for UnknownChoice {}

impl FromStr for AccountType {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccountType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownChoice(s.to_string()))
    }
}

impl FromStr for SecurityQuestion {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SecurityQuestion::ALL
            .into_iter()
            .find(|q| q.as_str() == s)
            .ok_or_else(|| UnknownChoice(s.to_string()))
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SecurityQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row of the `accounts` table
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AccountRecord {
    pub first_name: String,
    pub last_name: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub account_type: String,
    pub username: String,
    pub pin_digest: String,
    pub security_question: String,
    /// Stored in plaintext
    pub security_answer: String,
}

/// Validated account ready to be inserted
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub account_type: AccountType,
    pub username: String,
    pub pin: Pin,
    pub security_question: SecurityQuestion,
    pub security_answer: String,
}
