use crate::core::error::AccountError;
use crate::utils::digest::{digest_pin, DIGEST_HEX_LEN};
use std::fmt;

/// Number of digits in a PIN
pub const PIN_LENGTH: usize = 4;

/// A PIN that passed format validation: exactly four ASCII digits
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
    pub fn parse(raw: &str) -> Result<Self, AccountError> {
        let bytes = raw.as_bytes();

        if bytes.len() != PIN_LENGTH || !bytes.iter().all(|b| b.is_ascii_digit()) {
            return Err(AccountError::InvalidPinFormat);
        }

        Ok(Pin(raw.to_string()))
    }

    /// Digest stored in place of the PIN
    pub fn digest(&self) -> String {
        let digest = digest_pin(&self.0);
        debug_assert_eq!(digest.len(), DIGEST_HEX_LEN);
        digest
    }
}

// Never print the digits, even in debug output
impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

/// Validate a PIN and its confirmation field: format first, then equality
pub fn validate_pin_pair(pin: &str, confirm_pin: &str) -> Result<Pin, AccountError> {
    let parsed = Pin::parse(pin)?;

    if pin.as_bytes() != confirm_pin.as_bytes() {
        return Err(AccountError::PinMismatch);
    }

    Ok(parsed)
}
