use proptest::prelude::*;
use std::collections::HashSet;
use truthtab::assignment::enumerate;
use truthtab::derivation::split_steps;
use truthtab::latex::{normalize, Normalizer};
use truthtab::prop_tree::evaluate;
use truthtab::render::to_latex;
use truthtab::symbol::{extract_all, Variable};
use truthtab::truth_table::check_equality;

fn formula() -> impl Strategy<Value = String> {
	let leaf = prop_oneof![
		prop::sample::select(vec!["A", "B", "C", "D"]).prop_map(String::from),
		prop::sample::select(vec!["0", "1"]).prop_map(String::from),
	];
	leaf.prop_recursive(4, 32, 2, |inner| {
		prop_oneof![
			inner.clone().prop_map(|f| format!("!{}", f)),
			(inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({} & {})", a, b)),
			(inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({} | {})", a, b)),
			(inner.clone(), inner).prop_map(|(a, b)| format!("({} == {})", a, b)),
		]
	})
}

fn all_equal(derivation: &str) -> bool {
	let steps = split_steps(derivation, &Normalizer::default()).unwrap();
	check_equality(&steps, None).unwrap().all_equal
}

proptest! {
	#[test]
	fn enumeration_is_complete(symbols in prop::sample::subsequence(
		('A'..='Z').collect::<Vec<char>>(),
		0..=8,
	)) {
		let variables: Vec<Variable> = symbols.iter().filter_map(|c| Variable::new(*c)).collect();
		let rows = enumerate(&variables);
		prop_assert_eq!(rows.len(), 1usize << variables.len());

		let distinct: HashSet<Vec<bool>> = rows.iter().map(|a| a.values().collect()).collect();
		prop_assert_eq!(distinct.len(), rows.len());

		prop_assert!(rows[0].values().all(|v| v));
		prop_assert!(rows[rows.len() - 1].values().all(|v| !v));
	}

	#[test]
	fn latex_round_trip(f in formula()) {
		prop_assert_eq!(normalize(&to_latex(&f)), f);
	}

	#[test]
	fn implication_matches_material_conditional(f in formula(), g in formula()) {
		let rewritten = normalize(&format!("({}) \\to ({})", to_latex(&f), to_latex(&g)));
		for a in enumerate(&extract_all(&[f.as_str(), g.as_str()])) {
			let expected = !evaluate(&f, &a).unwrap() || evaluate(&g, &a).unwrap();
			prop_assert_eq!(evaluate(&rewritten, &a), Ok(expected));
		}
	}

	#[test]
	fn de_morgan(f in formula(), g in formula()) {
		let over_or = format!("!({0} | {1}) = !({0}) & !({1})", f, g);
		let over_and = format!("!({0} & {1}) = !({0}) | !({1})", f, g);
		prop_assert!(all_equal(&over_or));
		prop_assert!(all_equal(&over_and));
	}

	#[test]
	fn distribution_and_double_negation(f in formula(), g in formula(), h in formula()) {
		let distributed = format!("{0} & ({1} | {2}) = ({0} & {1}) | ({0} & {2})", f, g, h);
		let doubled = format!("!!{0} = {0}", f);
		prop_assert!(all_equal(&distributed));
		prop_assert!(all_equal(&doubled));
	}
}
