//! Parsing rules: `String -> T`

use std::str::FromStr;

use crate::builder::Predicate;

/// Requires the string to parse as `T`, handing on the parsed value.
#[must_use]
pub fn parses<S, T>() -> Predicate<S, String, T>
where
    S: 'static,
    T: FromStr + 'static,
{
    let type_name = short_type_name::<T>();
    Predicate::try_map(|value: String| value.parse::<T>().ok())
        .display(format!("parses as {type_name}"))
        .arg("type", type_name)
        .build_builtin("{member} must be a valid {arg.type}")
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{InvariantFormat, Rule};
    use crate::member::MemberPath;
    use std::net::Ipv4Addr;

    #[test]
    fn test_parses() {
        let rule = parses::<(), i64>();
        assert_eq!(rule.apply("-7".into(), &()).unwrap(), -7);

        let failure = rule.apply("seven".into(), &()).unwrap_err();
        assert_eq!(
            failure.render(&MemberPath::root("count"), &(), &InvariantFormat),
            "count must be a valid i64"
        );
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<Ipv4Addr>(), "Ipv4Addr");
        assert_eq!(short_type_name::<u8>(), "u8");
    }
}
