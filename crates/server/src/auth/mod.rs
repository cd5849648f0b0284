//! Administrator tokens and end-user credential handling.
//!
//! Only administrators get bearer tokens. End users authenticate by
//! login/password on each call that needs it and are otherwise identified by
//! the user id the client sends.

mod error;
mod middleware;
mod password;
mod token;

pub use error::AuthError;
pub use middleware::{AuthenticatedAdmin, require_admin};
pub use password::PasswordHasher;
pub use token::{ADMIN_ROLE, Claims, TokenService};

/// Checks a submitted password-reset code against the shared one.
///
/// The code is the same for every account and never expires.
pub fn reset_code_matches(expected: &str, submitted: &str) -> bool {
    expected.len() == submitted.len()
        && expected
            .bytes()
            .zip(submitted.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

#[cfg(test)]
mod tests {
    use super::reset_code_matches;

    #[test]
    fn reset_code_comparison() {
        assert!(reset_code_matches("1111", "1111"));
        assert!(!reset_code_matches("1111", "1112"));
        assert!(!reset_code_matches("1111", "11111"));
        assert!(!reset_code_matches("1111", ""));
    }
}
