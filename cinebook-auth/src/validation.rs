//! Field checks for the registration form, mirrored server-side.

/// 3-20 characters, letters/digits/underscores only.
pub fn validate_username(username: &str) -> bool {
    let len = username.chars().count();
    (3..=20).contains(&len) && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Minimal shape check: one '@' with non-empty local part and a dotted domain.
pub fn validate_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (local, domain) = match (parts.next(), parts.next()) {
        (Some(local), Some(domain)) => (local, domain),
        _ => return false,
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let mut domain_parts = domain.rsplitn(2, '.');
    matches!(
        (domain_parts.next(), domain_parts.next()),
        (Some(tld), Some(rest)) if !tld.is_empty() && !rest.is_empty()
    )
}

/// 10-15 characters of digits with optional leading '+' and common
/// separators (space, dash, parentheses).
pub fn validate_phone(phone: &str) -> bool {
    let len = phone.chars().count();
    if !(10..=15).contains(&len) {
        return false;
    }
    phone.chars().enumerate().all(|(i, c)| {
        c.is_ascii_digit()
            || matches!(c, ' ' | '-' | '(' | ')')
            || (c == '+' && i == 0)
    })
}

/// Password policy errors in the order they are reported.
pub fn validate_password(password: &str) -> Vec<&'static str> {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one number");
    }
    if !password.chars().any(|c| "!@#$%^&*(),.?\":{}|<>".contains(c)) {
        errors.push("Password must contain at least one special character");
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("movie_fan42"));
        assert!(!validate_username("ab"));
        assert!(!validate_username("has space"));
        assert!(!validate_username("way_too_long_for_a_username"));
    }

    #[test]
    fn test_email_shape() {
        assert!(validate_email("user@example.com"));
        assert!(!validate_email("userexample.com"));
        assert!(!validate_email("user@nodot"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("user @example.com"));
    }

    #[test]
    fn test_phone_shape() {
        assert!(validate_phone("+1 555-000-1234"));
        assert!(validate_phone("9876543210"));
        assert!(!validate_phone("12345"));
        assert!(!validate_phone("call-me-maybe!"));
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("Str0ng!pass").is_empty());
        let errors = validate_password("weak");
        assert!(errors.contains(&"Password must be at least 8 characters long"));
        assert!(errors.contains(&"Password must contain at least one uppercase letter"));
        assert!(validate_password("NoDigits!!").iter().any(|e| e.contains("number")));
    }
}
