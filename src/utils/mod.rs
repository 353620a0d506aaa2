pub mod ip;
pub mod password;

/// Generate a URL-safe random token of `length` alphanumeric characters
pub fn generate_secure_token(length: usize) -> String {
    use std::iter;

    let chars = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    iter::repeat_with(|| chars[rand::random_range(0..chars.len())] as char)
        .take(length)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_secure_token_length() {
        assert_eq!(generate_secure_token(32).len(), 32);
        assert_eq!(generate_secure_token(0).len(), 0);
    }

    #[test]
    fn test_generate_secure_token_is_alphanumeric() {
        let token = generate_secure_token(64);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
