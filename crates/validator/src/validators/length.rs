//! Length rules for strings and collections

use crate::builder::Predicate;

/// Requires a non-empty string.
#[must_use]
pub fn not_empty<S: 'static>() -> Predicate<S, String> {
    Predicate::test(|value: &String| !value.is_empty())
        .display("not empty")
        .build_builtin("{member} must not be empty")
}

/// Requires a string that is not empty or whitespace only.
#[must_use]
pub fn not_blank<S: 'static>() -> Predicate<S, String> {
    Predicate::test(|value: &String| !value.trim().is_empty())
        .display("not blank")
        .build_builtin("{member} must not be blank")
}

/// Requires at least `min` elements.
#[must_use]
pub fn min_len<S: 'static, T: 'static>(min: usize) -> Predicate<S, Vec<T>> {
    Predicate::test(move |value: &Vec<T>| value.len() >= min)
        .display("min length")
        .arg("min", min)
        .build_builtin("{member} must contain at least {arg.min} item(s)")
}

/// Requires at most `max` elements.
#[must_use]
pub fn max_len<S: 'static, T: 'static>(max: usize) -> Predicate<S, Vec<T>> {
    Predicate::test(move |value: &Vec<T>| value.len() <= max)
        .display("max length")
        .arg("max", max)
        .build_builtin("{member} must contain at most {arg.max} item(s)")
}
