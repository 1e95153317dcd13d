//! Placeholder password generation for new accounts.

use rand::Rng;

/// Alphabet the generator draws from: lowercase, uppercase, digits, and
/// punctuation (88 characters).
const CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Length of the password generated at account creation.
pub const GENERATED_PASSWORD_LENGTH: usize = 16;

/// Generate a random string of the requested length.
///
/// Characters are drawn uniformly with replacement from [`CHARSET`]. Not
/// cryptographically specified; the value is stored and never echoed back.
#[must_use]
pub fn generate(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(CHARSET[rng.gen_range(0..CHARSET.len())]))
        .collect()
}

#[cfg(test)]
mod tests {
    //! Length and alphabet guarantees.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn charset_has_eighty_eight_characters() {
        assert_eq!(CHARSET.len(), 88);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(16)]
    #[case(88)]
    fn generated_string_has_requested_length(#[case] length: usize) {
        assert_eq!(generate(length).chars().count(), length);
    }

    #[rstest]
    fn generated_characters_come_from_charset() {
        let password = generate(256);
        for byte in password.bytes() {
            assert!(
                CHARSET.contains(&byte),
                "unexpected character: {}",
                char::from(byte)
            );
        }
    }
}
