//! Master password validation.
//!
//! Strength scoring lives outside the core; the only hard rule here is that
//! a vault can never be sealed or opened with an empty password.

use crate::error::{Result, VaultError};

/// Validate that a master password is usable for key derivation.
///
/// Only the empty string is rejected; whitespace-only passwords are accepted.
///
/// # Examples
///
/// ```
/// use strongbox_core::crypto::validate_master_password;
///
/// assert!(validate_master_password("correct").is_ok());
/// assert!(validate_master_password("").is_err());
/// ```
pub fn validate_master_password(master_password: &str) -> Result<()> {
    if master_password.is_empty() {
        return Err(VaultError::WeakCredential);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_master_password() {
        assert!(validate_master_password("correct").is_ok());
        assert!(validate_master_password("x").is_ok());
        assert!(validate_master_password("   ").is_ok());
    }

    #[test]
    fn test_empty_master_password_rejected() {
        assert!(matches!(
            validate_master_password(""),
            Err(VaultError::WeakCredential)
        ));
    }
}
