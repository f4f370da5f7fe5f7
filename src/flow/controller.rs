use crate::core::error::AccountError;
use crate::models::form::{CreateAccountForm, LoginForm, ResetPinForm};
use crate::stores::account_store::AccountStore;
use crate::utils::auth::constant_time_eq;
use crate::validation::forms::required;
use std::fmt;
use tracing::{debug, info, warn};

/// Screen the user is currently on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    LoggedOut,
    Creating,
    AwaitingSecurityAnswer { username: String, question: String },
    Resetting { username: String },
    LoggedIn { username: String },
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::LoggedOut => "Login",
            Screen::Creating => "Create Account",
            Screen::AwaitingSecurityAnswer { .. } => "Security Question",
            Screen::Resetting { .. } => "Reset PIN",
            Screen::LoggedIn { .. } => "Main Menu",
        }
    }
}

/// User-triggered button presses
#[derive(Debug, Clone)]
pub enum Action {
    SubmitLogin(LoginForm),
    RequestCreate,
    SubmitCreate(CreateAccountForm),
    ForgotPin { username: String },
    SubmitAnswer { answer: String },
    SubmitNewPin(ResetPinForm),
    Logout,
    Cancel,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SubmitLogin(_) => "login",
            Action::RequestCreate => "create account",
            Action::SubmitCreate(_) => "submit account",
            Action::ForgotPin { .. } => "forgot PIN",
            Action::SubmitAnswer { .. } => "submit answer",
            Action::SubmitNewPin(_) => "reset PIN",
            Action::Logout => "logout",
            Action::Cancel => "cancel",
        }
    }
}

/// Success message shown after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    LoginSucceeded,
    AccountCreated,
    AnswerAccepted,
    PinReset,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Notice::LoginSucceeded => "Login successful!",
            Notice::AccountCreated => "Account created successfully. You can now login.",
            Notice::AnswerAccepted => "Security answer correct. You can now reset your PIN.",
            Notice::PinReset => "PIN reset successfully.",
        };
        f.write_str(message)
    }
}

/// Single owner of the current screen and the account store.
///
/// A failed action leaves the screen unchanged.
pub struct FormFlow {
    store: AccountStore,
    screen: Screen,
}

impl FormFlow {
    pub fn new(store: AccountStore) -> Self {
        Self {
            store,
            screen: Screen::LoggedOut,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub async fn dispatch(&mut self, action: Action) -> Result<Option<Notice>, AccountError> {
        let from = self.screen.name();
        let result = self.transition(action).await;

        match &result {
            Ok(_) => debug!(from, to = self.screen.name(), "Screen transition"),
            Err(e) if e.is_validation() => debug!(screen = from, error = %e, "Action rejected"),
            Err(e) => warn!(screen = from, error = %e, "Action failed"),
        }

        result
    }

    async fn transition(&mut self, action: Action) -> Result<Option<Notice>, AccountError> {
        match (self.screen.clone(), action) {
            (Screen::LoggedOut, Action::SubmitLogin(form)) => {
                let login = form.validate()?;
                if !self.store.verify_credentials(&login.username, &login.pin).await? {
                    info!(username = %login.username, "Login failed");
                    return Err(AccountError::InvalidCredentials);
                }
                info!(username = %login.username, "Login succeeded");
                self.screen = Screen::LoggedIn {
                    username: login.username,
                };
                Ok(Some(Notice::LoginSucceeded))
            }
            (Screen::LoggedOut, Action::RequestCreate) => {
                self.screen = Screen::Creating;
                Ok(None)
            }
            (Screen::LoggedOut, Action::ForgotPin { username }) => {
                let username = required(&username, "Username")?;
                let question = self
                    .store
                    .get_security_question(&username)
                    .await?
                    .ok_or(AccountError::UsernameNotFound)?;
                self.screen = Screen::AwaitingSecurityAnswer { username, question };
                Ok(None)
            }
            (Screen::Creating, Action::SubmitCreate(form)) => {
                let account = form.validate()?;
                self.store.create(account).await?;
                self.screen = Screen::LoggedOut;
                Ok(Some(Notice::AccountCreated))
            }
            (Screen::AwaitingSecurityAnswer { username, .. }, Action::SubmitAnswer { answer }) => {
                let expected = self
                    .store
                    .get_security_answer(&username)
                    .await?
                    .ok_or(AccountError::UsernameNotFound)?;
                if !constant_time_eq(&answer, &expected) {
                    info!(username = %username, "Wrong security answer");
                    return Err(AccountError::WrongSecurityAnswer);
                }
                self.screen = Screen::Resetting { username };
                Ok(Some(Notice::AnswerAccepted))
            }
            (Screen::Resetting { username }, Action::SubmitNewPin(form)) => {
                let pin = form.validate()?;
                self.store.update_pin(&username, &pin).await?;
                self.screen = Screen::LoggedOut;
                Ok(Some(Notice::PinReset))
            }
            (Screen::LoggedIn { username }, Action::Logout) => {
                info!(username = %username, "Logged out");
                self.screen = Screen::LoggedOut;
                Ok(None)
            }
            (
                Screen::Creating | Screen::AwaitingSecurityAnswer { .. } | Screen::Resetting { .. },
                Action::Cancel,
            ) => {
                self.screen = Screen::LoggedOut;
                Ok(None)
            }
            (screen, action) => Err(AccountError::UnexpectedAction {
                action: action.name(),
                screen: screen.name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::{AccountType, SecurityQuestion};
    use crate::stores::account_store::tests::temp_store;

    fn alice_form(pin: &str, confirm_pin: &str) -> CreateAccountForm {
        CreateAccountForm {
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
            address_line1: "1 Rabbit Hole".to_string(),
            address_line2: String::new(),
            account_type: Some(AccountType::User),
            username: "alice".to_string(),
            pin: pin.to_string(),
            confirm_pin: confirm_pin.to_string(),
            security_question: Some(SecurityQuestion::BirthCity),
            security_answer: "Reno".to_string(),
        }
    }

    fn login(username: &str, pin: &str) -> Action {
        Action::SubmitLogin(LoginForm {
            username: username.to_string(),
            pin: pin.to_string(),
        })
    }

    fn new_pin(pin: &str, confirm_pin: &str) -> Action {
        Action::SubmitNewPin(ResetPinForm {
            new_pin: pin.to_string(),
            confirm_pin: confirm_pin.to_string(),
        })
    }

    async fn flow_with_alice(pin: &str) -> (tempfile::TempDir, FormFlow) {
        let (dir, store) = temp_store().await;
        let mut flow = FormFlow::new(store);
        flow.dispatch(Action::RequestCreate).await.unwrap();
        flow.dispatch(Action::SubmitCreate(alice_form(pin, pin)))
            .await
            .unwrap();
        (dir, flow)
    }

    #[tokio::test]
    async fn test_create_then_login_end_to_end() {
        let (_dir, mut flow) = flow_with_alice("0000").await;
        assert_eq!(flow.screen(), &Screen::LoggedOut);

        let notice = flow.dispatch(login("alice", "0000")).await.unwrap();
        assert_eq!(notice, Some(Notice::LoginSucceeded));
        assert_eq!(
            flow.screen(),
            &Screen::LoggedIn {
                username: "alice".to_string()
            }
        );

        flow.dispatch(Action::Logout).await.unwrap();
        assert_eq!(flow.screen(), &Screen::LoggedOut);

        let result = flow.dispatch(login("alice", "9999")).await;
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
        assert_eq!(flow.screen(), &Screen::LoggedOut);
    }

    #[tokio::test]
    async fn test_create_notice() {
        let (_dir, store) = temp_store().await;
        let mut flow = FormFlow::new(store);

        assert_eq!(flow.dispatch(Action::RequestCreate).await.unwrap(), None);
        assert_eq!(flow.screen(), &Screen::Creating);

        let notice = flow
            .dispatch(Action::SubmitCreate(alice_form("0000", "0000")))
            .await
            .unwrap();
        assert_eq!(notice, Some(Notice::AccountCreated));
    }

    #[tokio::test]
    async fn test_create_errors_stay_on_screen() {
        let (_dir, store) = temp_store().await;
        let mut flow = FormFlow::new(store);
        flow.dispatch(Action::RequestCreate).await.unwrap();

        let mut blank = alice_form("0000", "0000");
        blank.first_name.clear();
        let result = flow.dispatch(Action::SubmitCreate(blank)).await;
        assert!(matches!(result, Err(AccountError::MissingField("First Name"))));
        assert_eq!(flow.screen(), &Screen::Creating);

        let result = flow.dispatch(Action::SubmitCreate(alice_form("12a4", "12a4"))).await;
        assert!(matches!(result, Err(AccountError::InvalidPinFormat)));
        assert_eq!(flow.screen(), &Screen::Creating);

        let result = flow.dispatch(Action::SubmitCreate(alice_form("1234", "4321"))).await;
        assert!(matches!(result, Err(AccountError::PinMismatch)));
        assert_eq!(flow.screen(), &Screen::Creating);
    }

    #[tokio::test]
    async fn test_duplicate_username_stays_creating() {
        let (_dir, mut flow) = flow_with_alice("0000").await;
        flow.dispatch(Action::RequestCreate).await.unwrap();

        let mut other = alice_form("5555", "5555");
        other.account_type = Some(AccountType::Vendor);
        other.security_question = Some(SecurityQuestion::FirstPet);

        let result = flow.dispatch(Action::SubmitCreate(other)).await;
        assert!(matches!(result, Err(AccountError::DuplicateUsername)));
        assert_eq!(flow.screen(), &Screen::Creating);
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let (_dir, store) = temp_store().await;
        let mut flow = FormFlow::new(store);

        let result = flow.dispatch(login("", "1234")).await;
        assert!(matches!(result, Err(AccountError::MissingField("Username"))));
    }

    #[tokio::test]
    async fn test_forgot_pin_unknown_user() {
        let (_dir, store) = temp_store().await;
        let mut flow = FormFlow::new(store);

        let result = flow
            .dispatch(Action::ForgotPin {
                username: "ghost".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AccountError::UsernameNotFound)));
        assert_eq!(flow.screen(), &Screen::LoggedOut);

        let result = flow
            .dispatch(Action::ForgotPin {
                username: "  ".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AccountError::MissingField("Username"))));
    }

    #[tokio::test]
    async fn test_recovery_and_reset() {
        let (_dir, mut flow) = flow_with_alice("1111").await;

        flow.dispatch(Action::ForgotPin {
            username: "alice".to_string(),
        })
        .await
        .unwrap();
        assert_eq!(
            flow.screen(),
            &Screen::AwaitingSecurityAnswer {
                username: "alice".to_string(),
                question: "What city were you born in?".to_string(),
            }
        );

        // Case-sensitive exact match
        let result = flow
            .dispatch(Action::SubmitAnswer {
                answer: "reno".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AccountError::WrongSecurityAnswer)));
        assert!(matches!(flow.screen(), Screen::AwaitingSecurityAnswer { .. }));

        let notice = flow
            .dispatch(Action::SubmitAnswer {
                answer: "Reno".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(notice, Some(Notice::AnswerAccepted));
        assert_eq!(
            flow.screen(),
            &Screen::Resetting {
                username: "alice".to_string()
            }
        );

        let result = flow.dispatch(new_pin("2222", "2223")).await;
        assert!(matches!(result, Err(AccountError::PinMismatch)));
        let result = flow.dispatch(new_pin("", "")).await;
        assert!(matches!(result, Err(AccountError::MissingField("New PIN"))));
        let result = flow.dispatch(new_pin("22", "22")).await;
        assert!(matches!(result, Err(AccountError::InvalidPinFormat)));
        assert!(matches!(flow.screen(), Screen::Resetting { .. }));

        let notice = flow.dispatch(new_pin("2222", "2222")).await.unwrap();
        assert_eq!(notice, Some(Notice::PinReset));
        assert_eq!(flow.screen(), &Screen::LoggedOut);

        let result = flow.dispatch(login("alice", "1111")).await;
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
        flow.dispatch(login("alice", "2222")).await.unwrap();
    }

    #[tokio::test]
    async fn test_answer_is_not_trimmed() {
        let (_dir, mut flow) = flow_with_alice("1111").await;
        flow.dispatch(Action::ForgotPin {
            username: "alice".to_string(),
        })
        .await
        .unwrap();

        let result = flow
            .dispatch(Action::SubmitAnswer {
                answer: "Reno ".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AccountError::WrongSecurityAnswer)));
    }

    #[tokio::test]
    async fn test_cancel_returns_to_login() {
        let (_dir, mut flow) = flow_with_alice("1111").await;

        flow.dispatch(Action::RequestCreate).await.unwrap();
        flow.dispatch(Action::Cancel).await.unwrap();
        assert_eq!(flow.screen(), &Screen::LoggedOut);

        flow.dispatch(Action::ForgotPin {
            username: "alice".to_string(),
        })
        .await
        .unwrap();
        flow.dispatch(Action::Cancel).await.unwrap();
        assert_eq!(flow.screen(), &Screen::LoggedOut);

        // PIN is untouched after an abandoned recovery
        flow.dispatch(login("alice", "1111")).await.unwrap();
    }

    #[tokio::test]
    async fn test_unexpected_actions() {
        let (_dir, store) = temp_store().await;
        let mut flow = FormFlow::new(store);

        let result = flow.dispatch(Action::Logout).await;
        assert!(matches!(
            result,
            Err(AccountError::UnexpectedAction {
                action: "logout",
                screen: "Login"
            })
        ));

        let result = flow.dispatch(Action::Cancel).await;
        assert!(matches!(result, Err(AccountError::UnexpectedAction { .. })));

        let result = flow.dispatch(new_pin("1234", "1234")).await;
        assert!(matches!(result, Err(AccountError::UnexpectedAction { .. })));
        assert_eq!(flow.screen(), &Screen::LoggedOut);
    }

    #[test]
    fn test_notice_messages() {
        assert_eq!(Notice::LoginSucceeded.to_string(), "Login successful!");
        assert_eq!(Notice::PinReset.to_string(), "PIN reset successfully.");
    }
}
