//! Collection element access

use crate::builder::Predicate;

/// Narrows a `Vec<T>` to its element at `index`.
///
/// Used by [`MemberChain::element_at`](crate::tree::MemberChain::element_at),
/// which also renames the member to `name[index]`.
#[must_use]
pub fn element_at<S: 'static, T: 'static>(index: usize) -> Predicate<S, Vec<T>, T> {
    Predicate::try_map(move |value: Vec<T>| value.into_iter().nth(index))
        .display(format!("element [{index}]"))
        .arg("index", index)
        .build_builtin("{member} does not exist (index {arg.index} out of bounds)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Rule;

    #[test]
    fn test_element_at() {
        let rule = element_at::<(), &str>(1);
        assert_eq!(rule.apply(vec!["a", "b"], &()).unwrap(), "b");
        assert!(rule.apply(vec!["a"], &()).is_err());
    }
}
