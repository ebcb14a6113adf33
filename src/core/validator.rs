use crate::utils::error::{ComposerError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// The only domain messages may be delivered to.
pub const ALLOWED_DOMAIN: &str = "bhavyabgada.dev";

static ALLOWED_RECIPIENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@bhavyabgada\.dev$").expect("recipient pattern is valid")
});

/// Full-string, case-sensitive match of `local-part@bhavyabgada.dev`.
pub fn is_allowed_recipient(address: &str) -> bool {
    ALLOWED_RECIPIENT.is_match(address)
}

pub fn ensure_allowed_recipient(address: &str) -> Result<()> {
    if is_allowed_recipient(address) {
        Ok(())
    } else {
        tracing::warn!("Rejected recipient outside {}: {:?}", ALLOWED_DOMAIN, address);
        Err(ComposerError::ValidationError {
            address: address.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_allowed_domain() {
        assert!(is_allowed_recipient("alice@bhavyabgada.dev"));
        assert!(is_allowed_recipient("bob@bhavyabgada.dev"));
        assert!(is_allowed_recipient("a.b_c%d+e-f@bhavyabgada.dev"));
        assert!(is_allowed_recipient("UPPER.case9@bhavyabgada.dev"));
        assert!(is_allowed_recipient("x@bhavyabgada.dev"));
    }

    #[test]
    fn test_rejects_other_domains() {
        assert!(!is_allowed_recipient("alice@other.dev"));
        assert!(!is_allowed_recipient("bob@gmail.com"));
        assert!(!is_allowed_recipient("alice@bhavyabgada.com"));
        assert!(!is_allowed_recipient("alice@mail.bhavyabgada.dev"));
        assert!(!is_allowed_recipient("alice@bhavyabgadaxdev"));
    }

    #[test]
    fn test_rejects_partial_matches() {
        assert!(!is_allowed_recipient("alice@bhavyabgada.dev.evil.com"));
        assert!(!is_allowed_recipient("alice@bhavyabgada.dev "));
        assert!(!is_allowed_recipient(" alice@bhavyabgada.dev"));
        assert!(!is_allowed_recipient("alice@bhavyabgada.dev\n"));
        assert!(!is_allowed_recipient("x@evil.com,alice@bhavyabgada.dev"));
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(!is_allowed_recipient(""));
        assert!(!is_allowed_recipient("@bhavyabgada.dev"));
        assert!(!is_allowed_recipient("alice"));
        assert!(!is_allowed_recipient("alice@"));
        assert!(!is_allowed_recipient("al ice@bhavyabgada.dev"));
        assert!(!is_allowed_recipient("alice@@bhavyabgada.dev"));
        assert!(!is_allowed_recipient("Alice <alice@bhavyabgada.dev>"));
    }

    #[test]
    fn test_domain_is_case_sensitive() {
        assert!(!is_allowed_recipient("alice@BHAVYABGADA.DEV"));
        assert!(!is_allowed_recipient("alice@Bhavyabgada.dev"));
    }

    #[test]
    fn test_ensure_allowed_recipient() {
        assert!(ensure_allowed_recipient("alice@bhavyabgada.dev").is_ok());

        match ensure_allowed_recipient("alice@other.dev") {
            Err(ComposerError::ValidationError { address }) => {
                assert_eq!(address, "alice@other.dev")
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
