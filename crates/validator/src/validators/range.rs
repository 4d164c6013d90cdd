//! Numeric range rules

use crate::builder::Predicate;
use crate::foundation::ArgValue;

/// Requires the value to be at least `min`.
#[must_use]
pub fn at_least<S, T>(min: T) -> Predicate<S, T>
where
    S: 'static,
    T: PartialOrd + Clone + Into<ArgValue> + Send + Sync + 'static,
{
    let bound = min.clone();
    Predicate::test(move |value: &T| *value >= bound)
        .display("at least")
        .arg("min", min)
        .build_builtin("{member} must be at least {arg.min}")
}

/// Requires the value to be at most `max`.
#[must_use]
pub fn at_most<S, T>(max: T) -> Predicate<S, T>
where
    S: 'static,
    T: PartialOrd + Clone + Into<ArgValue> + Send + Sync + 'static,
{
    let bound = max.clone();
    Predicate::test(move |value: &T| *value <= bound)
        .display("at most")
        .arg("max", max)
        .build_builtin("{member} must be at most {arg.max}")
}

/// Requires `min <= value <= max`.
#[must_use]
pub fn in_range<S, T>(min: T, max: T) -> Predicate<S, T>
where
    S: 'static,
    T: PartialOrd + Clone + Into<ArgValue> + Send + Sync + 'static,
{
    let (low, high) = (min.clone(), max.clone());
    Predicate::test(move |value: &T| *value >= low && *value <= high)
        .display("in range")
        .arg("min", min)
        .arg("max", max)
        .build_builtin("{member} must be between {arg.min} and {arg.max}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{InvariantFormat, Rule};
    use crate::member::MemberPath;
    use rstest::rstest;

    #[rstest]
    #[case(17, false)]
    #[case(18, true)]
    #[case(99, true)]
    fn test_at_least(#[case] value: i32, #[case] ok: bool) {
        assert_eq!(at_least::<(), _>(18).check(value, &()), ok);
    }

    #[rstest]
    #[case(0.5, true)]
    #[case(1.0, true)]
    #[case(1.5, false)]
    fn test_at_most(#[case] value: f64, #[case] ok: bool) {
        assert_eq!(at_most::<(), _>(1.0).check(value, &()), ok);
    }

    #[test]
    fn test_in_range_message() {
        let rule = in_range::<(), u16>(1, 1024);
        assert!(rule.check(80, &()));

        let failure = rule.apply(0, &()).unwrap_err();
        assert_eq!(
            failure.render(&MemberPath::root("port"), &(), &InvariantFormat),
            "port must be between 1 and 1024"
        );
    }
}
