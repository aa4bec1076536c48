//! Email address helpers

/// Normalize an email address for lookups (surrounding whitespace removed)
pub fn normalize_email(email: &str) -> String {
    email.trim().to_string()
}

/// Mask an email address for log output
///
/// Keeps the first two characters of the local part and the full domain,
/// e.g. `jane.doe@example.com` becomes `ja******@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let visible: String = local.chars().take(2).collect();
            let hidden = local.chars().count().saturating_sub(2).max(1);
            format!("{}{}@{}", visible, "*".repeat(hidden), domain)
        }
        None => "*".repeat(email.chars().count()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("jane.doe@example.com"), "ja******@example.com");
        assert_eq!(mask_email("ab@example.com"), "ab*@example.com");
        assert_eq!(mask_email("a@example.com"), "a*@example.com");
        assert_eq!(mask_email("broken"), "******");
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  user@example.com "), "user@example.com");
    }
}
