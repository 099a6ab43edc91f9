//! PIN validation.
//!
//! The journal PIN is a fixed-length numeric code entered on a keypad.

use crate::error::{JournalError, Result};

/// Number of digits in a journal PIN.
pub const PIN_LENGTH: usize = 6;

/// Validate that a PIN has exactly [`PIN_LENGTH`] ASCII digits.
///
/// # Examples
///
/// ```
/// use calmspace_core::crypto::validate_pin;
///
/// assert!(validate_pin("204610").is_ok());
/// assert!(validate_pin("12ab56").is_err());
/// ```
pub fn validate_pin(pin: &str) -> Result<()> {
    if pin.is_empty() {
        return Err(JournalError::InvalidPin("PIN cannot be empty".to_string()));
    }

    if !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(JournalError::InvalidPin(
            "PIN must contain only digits".to_string(),
        ));
    }

    if pin.len() != PIN_LENGTH {
        return Err(JournalError::InvalidPin(format!(
            "PIN must be exactly {} digits (got {})",
            PIN_LENGTH,
            pin.len()
        )));
    }

    Ok(())
}
