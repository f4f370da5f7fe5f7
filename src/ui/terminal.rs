use crate::core::config::MenuLink;
use crate::flow::controller::{Action, FormFlow, Screen};
use crate::models::account::{AccountType, SecurityQuestion, SELECT_PLACEHOLDER};
use crate::models::form::{CreateAccountForm, LoginForm, ResetPinForm};
use crate::ui::browser::Launcher;
use crate::ui::secret::SecretInput;
use anyhow::Result;
use std::fmt::Display;
use std::io::{BufRead, ErrorKind, Write};
use std::str::FromStr;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
#[error("end of input")]
struct EndOfInput;

/// What the user chose on the current screen
enum Step {
    Dispatch(Action),
    Stay,
    Exit,
}

/// Line-oriented front-end for the account screens
///
/// Every error or success notice is printed as its own message line and the
/// loop carries on; only `Exit` or end of input stops it. PIN fields go
/// through the secret reader when one is attached and through `input`
/// otherwise.
pub struct Terminal<'a, R, W> {
    input: R,
    output: W,
    links: &'a [MenuLink],
    launcher: &'a dyn Launcher,
    secret: Option<Box<dyn SecretInput + 'a>>,
}

impl<'a, R: BufRead, W: Write> Terminal<'a, R, W> {
    pub fn new(
        input: R,
        output: W,
        links: &'a [MenuLink],
        launcher: &'a dyn Launcher,
    ) -> Self {
        Self {
            input,
            output,
            links,
            launcher,
            secret: None,
        }
    }

    /// Read PINs without echo
    pub fn with_secret_input(mut self, secret: Box<dyn SecretInput + 'a>) -> Self {
        self.secret = Some(secret);
        self
    }

    pub async fn run(&mut self, flow: &mut FormFlow) -> Result<()> {
        loop {
            let step = match self.next_step(flow.screen()) {
                Ok(step) => step,
                Err(e) if e.is::<EndOfInput>() => break,
                Err(e) => return Err(e),
            };

            let action = match step {
                Step::Dispatch(action) => action,
                Step::Stay => continue,
                Step::Exit => break,
            };

            match flow.dispatch(action).await {
                Ok(Some(notice)) => writeln!(self.output, "Success: {}", notice)?,
                Ok(None) => {}
                Err(e) => {
                    if !e.is_validation() {
                        error!(error = %e, "Account store error");
                    }
                    writeln!(self.output, "Error: {}", e)?;
                }
            }
        }

        writeln!(self.output, "Goodbye.")?;
        self.output.flush()?;
        Ok(())
    }

    fn next_step(&mut self, screen: &Screen) -> Result<Step> {
        writeln!(self.output)?;
        match screen {
            Screen::LoggedOut => self.login_screen(),
            Screen::Creating => self.create_screen(),
            Screen::AwaitingSecurityAnswer { question, .. } => self.security_screen(question),
            Screen::Resetting { .. } => self.reset_screen(),
            Screen::LoggedIn { username } => self.main_menu(username),
        }
    }

    fn login_screen(&mut self) -> Result<Step> {
        writeln!(self.output, "== Login ==")?;
        match self.menu(&["Login", "Create Account", "Forgot PIN?", "Exit"])?.as_str() {
            "1" => {
                let username = self.prompt("Username: ")?;
                let pin = self.secret_prompt("PIN: ")?;
                Ok(Step::Dispatch(Action::SubmitLogin(LoginForm { username, pin })))
            }
            "2" => Ok(Step::Dispatch(Action::RequestCreate)),
            "3" => {
                let username = self.prompt("Username: ")?;
                Ok(Step::Dispatch(Action::ForgotPin { username }))
            }
            "4" => Ok(Step::Exit),
            other => self.unknown_option(other),
        }
    }

    fn create_screen(&mut self) -> Result<Step> {
        writeln!(self.output, "== Create Account ==")?;
        match self.menu(&["Fill in form", "Back to login", "Exit"])?.as_str() {
            "1" => {
                let form = CreateAccountForm {
                    first_name: self.prompt("First Name: ")?,
                    last_name: self.prompt("Last Name: ")?,
                    address_line1: self.prompt("Address Line 1: ")?,
                    address_line2: self.prompt("Address Line 2: ")?,
                    account_type: self.select("Account Type", &AccountType::ALL)?,
                    username: self.prompt("Username: ")?,
                    pin: self.secret_prompt("PIN (4 digits): ")?,
                    confirm_pin: self.secret_prompt("Confirm PIN: ")?,
                    security_question: self
                        .select("Security Question", &SecurityQuestion::ALL)?,
                    security_answer: self.prompt("Security Answer: ")?,
                };
                Ok(Step::Dispatch(Action::SubmitCreate(form)))
            }
            "2" => Ok(Step::Dispatch(Action::Cancel)),
            "3" => Ok(Step::Exit),
            other => self.unknown_option(other),
        }
    }

    fn security_screen(&mut self, question: &str) -> Result<Step> {
        writeln!(self.output, "== Security Question ==")?;
        writeln!(self.output, "{}", question)?;
        match self.menu(&["Answer", "Back to login", "Exit"])?.as_str() {
            "1" => {
                let answer = self.prompt("Answer: ")?;
                Ok(Step::Dispatch(Action::SubmitAnswer { answer }))
            }
            "2" => Ok(Step::Dispatch(Action::Cancel)),
            "3" => Ok(Step::Exit),
            other => self.unknown_option(other),
        }
    }

    fn reset_screen(&mut self) -> Result<Step> {
        writeln!(self.output, "== Reset PIN ==")?;
        match self.menu(&["Set new PIN", "Back to login", "Exit"])?.as_str() {
            "1" => {
                let new_pin = self.secret_prompt("New PIN: ")?;
                let confirm_pin = self.secret_prompt("Confirm New PIN: ")?;
                Ok(Step::Dispatch(Action::SubmitNewPin(ResetPinForm {
                    new_pin,
                    confirm_pin,
                })))
            }
            "2" => Ok(Step::Dispatch(Action::Cancel)),
            "3" => Ok(Step::Exit),
            other => self.unknown_option(other),
        }
    }

    fn main_menu(&mut self, username: &str) -> Result<Step> {
        writeln!(self.output, "== Main Menu ({}) ==", username)?;
        for (idx, link) in self.links.iter().enumerate() {
            writeln!(self.output, "  {}) {}", idx + 1, link.label)?;
        }
        writeln!(self.output, "  L) Logout")?;
        writeln!(self.output, "  X) Exit")?;

        let choice = self.prompt("Choose: ")?;
        let choice = choice.trim();

        if choice.eq_ignore_ascii_case("l") {
            return Ok(Step::Dispatch(Action::Logout));
        }
        if choice.eq_ignore_ascii_case("x") {
            return Ok(Step::Exit);
        }

        let links = self.links;
        let link = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| links.get(idx));

        match link {
            Some(link) => {
                writeln!(self.output, "Opening {}...", link.label)?;
                self.launcher.open(&link.url);
                Ok(Step::Stay)
            }
            None => self.unknown_option(choice),
        }
    }

    /// Print numbered entries and return the trimmed choice
    fn menu(&mut self, entries: &[&str]) -> Result<String> {
        for (idx, entry) in entries.iter().enumerate() {
            writeln!(self.output, "  {}) {}", idx + 1, entry)?;
        }
        Ok(self.prompt("Choose: ")?.trim().to_string())
    }

    /// Selector with the placeholder at `0`; anything unrecognised stays unselected
    fn select<T>(&mut self, label: &str, options: &[T]) -> Result<Option<T>>
    where
        T: Copy + Display + FromStr,
    {
        writeln!(self.output, "{}:", label)?;
        writeln!(self.output, "  0) {}", SELECT_PLACEHOLDER)?;
        for (idx, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}) {}", idx + 1, option)?;
        }

        let choice = self.prompt("Choose: ")?;
        let choice = choice.trim();

        let selected = match choice.parse::<usize>() {
            Ok(n) => n.checked_sub(1).and_then(|idx| options.get(idx)).copied(),
            Err(_) => choice.parse::<T>().ok(),
        };

        Ok(selected)
    }

    fn unknown_option(&mut self, choice: &str) -> Result<Step> {
        writeln!(self.output, "Error: Unknown option '{}'", choice)?;
        Ok(Step::Stay)
    }

    /// Read one line, keeping everything but the line terminator
    fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(EndOfInput.into());
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }

        Ok(line)
    }

    fn secret_prompt(&mut self, label: &str) -> Result<String> {
        self.output.flush()?;

        let read = match self.secret.as_mut() {
            Some(secret) => secret.read_secret(label),
            None => return self.prompt(label),
        };

        match read {
            Ok(value) => Ok(value),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(EndOfInput.into()),
            Err(e) => Err(e.into()),
        }
    }
}
