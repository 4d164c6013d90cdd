//! Property-based tests for verity-validator.

use std::sync::Arc;

use proptest::prelude::*;
use verity_validator::prelude::*;

fn above(min: i64) -> Predicate<(), i64> {
    Predicate::test(move |v: &i64| *v > min)
        .display("above")
        .build()
        .unwrap()
}

fn below(max: i64) -> Predicate<(), i64> {
    Predicate::test(move |v: &i64| *v < max)
        .display("below")
        .build()
        .unwrap()
}

// ============================================================================
// COMBINATOR LAWS: a.and(b) succeeds iff a succeeds and b succeeds
// ============================================================================

proptest! {
    #[test]
    fn and_succeeds_iff_both_succeed(n in any::<i64>(), a in -100i64..100, b in -100i64..100) {
        let left = above(a);
        let right = below(b);
        let combined = (&left).and(&right);

        prop_assert_eq!(combined.check(n, &()), left.check(n, &()) && right.check(n, &()));
    }

    #[test]
    fn and_reports_first_failing_leaf(n in -200i64..200, a in -100i64..100, b in -100i64..100) {
        let left = above(a);
        let right = below(b);
        let combined = (&left).and(&right);

        if let Err(failure) = combined.apply(n, &()) {
            if left.check(n, &()) {
                prop_assert!(failure.is(&right));
            } else {
                prop_assert!(failure.is(&left));
            }
        }
    }
}

// ============================================================================
// IDENTITY LAWS: identity().and(r) == r == r.and(identity())
// ============================================================================

proptest! {
    #[test]
    fn identity_is_left_neutral(n in any::<i64>(), a in any::<i64>()) {
        let rule = above(a);
        let composed = identity::<(), i64>().and(&rule);
        prop_assert_eq!(composed.apply(n, &()).ok(), rule.apply(n, &()).ok());
        prop_assert_eq!(composed.describe(), Rule::describe(&rule));
    }

    #[test]
    fn identity_is_right_neutral(n in any::<i64>(), a in any::<i64>()) {
        let rule = above(a);
        let composed = (&rule).and(identity::<(), i64>());
        prop_assert_eq!(composed.apply(n, &()).ok(), rule.apply(n, &()).ok());
        prop_assert_eq!(composed.describe(), Rule::describe(&rule));
    }

    #[test]
    fn identity_returns_input(s in ".*") {
        prop_assert_eq!(identity::<(), String>().apply(s.clone(), &()).ok(), Some(s));
    }
}

// ============================================================================
// NAMES: full name is ancestors and name joined by dots
// ============================================================================

proptest! {
    #[test]
    fn full_name_joins_ancestors(
        ancestors in prop::collection::vec("[a-z]{1,8}", 0..4),
        name in "[a-z]{1,8}",
    ) {
        let path = MemberPath::new(
            name.as_str(),
            ancestors.iter().map(|a| Arc::<str>::from(a.as_str())).collect::<Vec<_>>(),
        );
        let mut expected = ancestors.clone();
        expected.push(name.clone());
        prop_assert_eq!(path.full_name(), expected.join("."));
    }

    #[test]
    fn parses_accepts_exactly_what_from_str_accepts(s in "-?[0-9]{0,20}x?") {
        let rule = parses::<(), i64>();
        prop_assert_eq!(rule.apply(s.clone(), &()).ok(), s.parse::<i64>().ok());
    }
}

// ============================================================================
// IDEMPOTENCY: validate(x) == validate(x)
// ============================================================================

proptest! {
    #[test]
    fn validation_idempotent(name in ".{0,12}", age in any::<i32>()) {
        #[derive(Clone)]
        struct Person {
            name: String,
            age: i32,
        }

        let mut set = MemberConstraintSet::<Person>::new();
        set.verify_that("name", |p: &Person| p.name.clone()).unwrap().satisfies(not_blank());
        set.verify_that("age", |p: &Person| p.age).unwrap().satisfies(in_range(0, 150));

        let person = Person { name, age };
        prop_assert_eq!(set.validate(&person).unwrap(), set.validate(&person).unwrap());
    }
}
