use proptest::prelude::*;

use propply::expr::{Expression, Notation};
use propply::parsing::parse_expression;
use propply::rules::equivalence::*;

fn expression() -> impl Strategy<Value = Expression> {
	let leaf = prop_oneof![
		4 => "[PQRSabc][a-z0-9]{0,3}".prop_map(|name| Expression::var(name)),
		1 => Just(Expression::True),
		1 => Just(Expression::False),
	];
	leaf.prop_recursive(5, 48, 2, |inner| {
		prop_oneof![
			inner.clone().prop_map(Expression::not),
			(inner.clone(), inner.clone()).prop_map(|(l, r)| Expression::and(l, r)),
			(inner.clone(), inner.clone()).prop_map(|(l, r)| Expression::or(l, r)),
			(inner.clone(), inner.clone()).prop_map(|(l, r)| Expression::implies(l, r)),
			(inner.clone(), inner.clone()).prop_map(|(l, r)| Expression::iff(l, r)),
			(inner.clone(), inner).prop_map(|(l, r)| Expression::xor(l, r)),
		]
	})
}

proptest! {
	#[test]
	fn unicode_round_trip(expr in expression()) {
		prop_assert_eq!(parse_expression(&expr.to_string()), Ok(expr));
	}

	#[test]
	fn ascii_round_trip(expr in expression()) {
		let text = expr.display_with(&Notation::ASCII).to_string();
		prop_assert!(text.is_ascii());
		prop_assert_eq!(parse_expression(&text), Ok(expr));
	}

	#[test]
	fn every_path_resolves_and_sets_back(expr in expression()) {
		for path in expr.paths() {
			let part = expr.get_ref(path.as_path()).unwrap().clone();
			let mut copy = expr.clone();
			prop_assert_eq!(copy.set(path.as_path(), part.clone()), Ok(part));
			prop_assert_eq!(&copy, &expr);
		}
	}

	#[test]
	fn replacing_a_part_changes_only_that_part(expr in expression()) {
		for path in expr.paths() {
			let mut copy = expr.clone();
			copy.set(path.as_path(), Expression::var("Z")).unwrap();
			prop_assert_eq!(copy.get_ref(path.as_path()), Ok(&Expression::var("Z")));
			for other in expr.paths() {
				if !other.0.starts_with(&path.0) && !path.0.starts_with(&other.0) {
					prop_assert_eq!(copy.get_ref(other.as_path()), expr.get_ref(other.as_path()));
				}
			}
		}
	}

	#[test]
	fn negation_pair(expr in expression()) {
		prop_assert_eq!(negation(&negation_inverse(&expr).unwrap()), Ok(expr));
	}

	#[test]
	fn demorgan_pairs(a in expression(), b in expression()) {
		let and = Expression::not(Expression::and(a.clone(), b.clone()));
		prop_assert_eq!(demorgan_and_inverse(&demorgan_and(&and).unwrap()), Ok(and));
		let or = Expression::not(Expression::or(a, b));
		prop_assert_eq!(demorgan_or_inverse(&demorgan_or(&or).unwrap()), Ok(or));
	}

	#[test]
	fn associative_pairs(a in expression(), b in expression(), c in expression()) {
		let and = Expression::and(Expression::and(a.clone(), b.clone()), c.clone());
		prop_assert_eq!(associative_and_inverse(&associative_and(&and).unwrap()), Ok(and));
		let or = Expression::or(a, Expression::or(b, c));
		prop_assert_eq!(associative_or(&associative_or_inverse(&or).unwrap()), Ok(or));
	}

	#[test]
	fn connective_pairs(a in expression(), b in expression()) {
		let implication = Expression::implies(a.clone(), b.clone());
		prop_assert_eq!(
			material_implication_inverse(&material_implication(&implication).unwrap()),
			Ok(implication)
		);
		let iff = Expression::iff(a.clone(), b.clone());
		prop_assert_eq!(
			biconditional_elimination_inverse(&biconditional_elimination(&iff).unwrap()),
			Ok(iff)
		);
		let xor = Expression::xor(a, b);
		prop_assert_eq!(xor_decomposition_inverse(&xor_decomposition(&xor).unwrap()), Ok(xor));
	}
}
