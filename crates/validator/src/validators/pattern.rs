//! Pattern rules backed by `regex`

use regex::Regex;

use crate::builder::Predicate;
use crate::foundation::ContractError;

/// Requires the string to match `pattern` anywhere.
///
/// Anchor the pattern (`^...$`) to match the whole string.
///
/// # Errors
///
/// [`ContractError::InvalidPattern`] if `pattern` does not compile.
pub fn matches<S: 'static>(pattern: &str) -> Result<Predicate<S, String>, ContractError> {
    let regex = Regex::new(pattern).map_err(|error| ContractError::InvalidPattern {
        pattern: pattern.to_owned(),
        reason: error.to_string(),
    })?;
    Ok(Predicate::test(move |value: &String| regex.is_match(value))
        .display(format!("matches /{pattern}/"))
        .arg("pattern", pattern.to_owned())
        .build_builtin("{member} must match {arg.pattern}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Rule;

    #[test]
    fn test_matches() {
        let zip = matches::<()>(r"^\d{5}$").unwrap();
        assert!(zip.check("12345".into(), &()));
        assert!(!zip.check("1234a".into(), &()));
        assert_eq!(zip.describe(), r"matches /^\d{5}$/");
    }

    #[test]
    fn test_invalid_pattern() {
        let error = matches::<()>("(unclosed").unwrap_err();
        assert!(matches!(error, ContractError::InvalidPattern { .. }));
    }
}
