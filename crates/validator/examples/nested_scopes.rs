//! Nested scopes example for verity-validator
//!
//! Declares a tree for an order with a customer and an address, runs it
//! against a valid and an invalid order and prints the reports.

use verity_validator::prelude::*;

#[derive(Clone, Debug)]
struct Address {
    street: String,
    zip: String,
}

#[derive(Clone, Debug)]
struct Customer {
    name: String,
    age: i64,
    address: Option<Address>,
}

#[derive(Clone, Debug)]
struct Order {
    reference: String,
    quantity: String,
    customer: Option<Customer>,
    tags: Vec<String>,
}

impl Validated for Address {
    fn declare(set: &mut MemberConstraintSet<Self>) -> Result<(), ContractError> {
        set.verify_that("street", |a: &Address| a.street.clone())?
            .satisfies(not_blank());
        set.verify_that("zip", |a: &Address| a.zip.clone())?
            .satisfies(matches(r"^\d{5}$")?);
        Ok(())
    }
}

impl Validated for Customer {
    fn declare(set: &mut MemberConstraintSet<Self>) -> Result<(), ContractError> {
        set.verify_that("name", |c: &Customer| c.name.clone())?
            .satisfies(not_blank());
        set.verify_that("age", |c: &Customer| c.age)?
            .satisfies(at_least(18));
        set.verify_that("address", |c: &Customer| c.address.clone())?
            .satisfies(not_none())
            .and_validated()
    }
}

impl Validated for Order {
    fn declare(set: &mut MemberConstraintSet<Self>) -> Result<(), ContractError> {
        set.verify_that("reference", |o: &Order| o.reference.clone())?
            .satisfies(with_message(not_blank(), "an order needs a reference")?);
        set.verify_that("quantity", |o: &Order| o.quantity.clone())?
            .satisfies(parses::<Order, i64>())
            .satisfies(in_range(1, 99));
        set.verify_that("tags", |o: &Order| o.tags.clone())?
            .element_at(0)
            .satisfies(not_empty());
        set.verify_that("customer", |o: &Order| o.customer.clone())?
            .satisfies(not_none())
            .and_validated()
    }
}

fn print_report(label: &str, order: &Order) -> Result<(), ContractError> {
    let report = validate_subject(order)?;
    if report.is_empty() {
        println!("{label}: valid");
    } else {
        print!("{label}: {report}");
    }
    Ok(())
}

fn main() -> Result<(), ContractError> {
    let valid = Order {
        reference: "PO-1138".into(),
        quantity: "3".into(),
        customer: Some(Customer {
            name: "Kim".into(),
            age: 34,
            address: Some(Address {
                street: "Harbour Road 4".into(),
                zip: "12345".into(),
            }),
        }),
        tags: vec!["priority".into()],
    };

    let invalid = Order {
        reference: "  ".into(),
        quantity: "three".into(),
        customer: Some(Customer {
            name: "Kim".into(),
            age: 12,
            address: Some(Address {
                street: String::new(),
                zip: "1234".into(),
            }),
        }),
        tags: Vec::new(),
    };

    print_report("valid order", &valid)?;
    print_report("invalid order", &invalid)?;

    let tree = MemberConstraintSet::<Order>::for_type()?;
    for name in tree.member_names() {
        println!("{name}: {}", tree.describe(name).unwrap_or_default());
    }
    Ok(())
}
