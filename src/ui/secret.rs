use std::io;

/// Reads a value without echoing it back to the screen
///
/// Implementations write `label` themselves and return the line without its
/// terminator. End of input is reported as `ErrorKind::UnexpectedEof`.
pub trait SecretInput {
    fn read_secret(&mut self, label: &str) -> io::Result<String>;
}

/// Hidden entry on the controlling terminal
pub struct HiddenTty;

impl SecretInput for HiddenTty {
    fn read_secret(&mut self, label: &str) -> io::Result<String> {
        rpassword::prompt_password(label)
    }
}
