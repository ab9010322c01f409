use truthtab::assignment::{enumerate, Assignment};
use truthtab::derivation::split_steps;
use truthtab::latex::{normalize, Normalizer};
use truthtab::prop_tree::evaluate;
use truthtab::symbol::{extract_variables, Variable};
use truthtab::truth_table::{build_table, check_equality, TableOutcome};

fn assign(pairs: &[(char, bool)]) -> Assignment {
	Assignment::new(
		pairs
			.iter()
			.map(|(c, b)| (Variable::new(*c).unwrap(), *b))
			.collect(),
	)
}

fn equal_everywhere(left: &str, right: &str) -> bool {
	let steps = split_steps(&format!("{} = {}", left, right), &Normalizer::default()).unwrap();
	check_equality(&steps, None).unwrap().all_equal
}

#[test]
fn conjunction() {
	assert_eq!(evaluate("A & B", &assign(&[('A', true), ('B', true)])), Ok(true));
	assert_eq!(evaluate("A & B", &assign(&[('A', true), ('B', false)])), Ok(false));
}

#[test]
fn negation_binds_tightest() {
	let a = assign(&[('A', false), ('B', false), ('C', true)]);
	assert_eq!(evaluate("A | !B & C", &a), Ok(true));
}

#[test]
fn latex_connectives() {
	assert_eq!(normalize("A \\lor B"), "A | B");
	assert_eq!(normalize("A \\land B"), "A & B");
}

#[test]
fn implication_is_disjunction() {
	assert_eq!(normalize("A \\rightarrow B"), "!A | B");
	assert_eq!(normalize("(A \\lor B) \\rightarrow C"), "!(A | B) | C");
	let rewritten = normalize("A \\rightarrow B");
	for a in enumerate(&extract_variables("A B")) {
		assert_eq!(evaluate(&rewritten, &a), evaluate("!A | B", &a));
	}
}

#[test]
fn equivalence_laws() {
	assert!(equal_everywhere("!(A|B)", "!A & !B"));
	assert!(equal_everywhere("!(A&B)", "!A | !B"));
	assert!(equal_everywhere("A & (B|C)", "(A&B)|(A&C)"));
	assert!(equal_everywhere("!!A", "A"));
	assert!(!equal_everywhere("A \\to B", "B \\to A"));
	assert!(equal_everywhere("A \\to B", "\\neg B \\to \\neg A"));
}

#[test]
fn de_morgan_derivation() {
	let steps = split_steps("\\neg(A \\lor B) = \\neg A \\land \\neg B", &Normalizer::default()).unwrap();
	let report = check_equality(&steps, None).unwrap();
	assert!(report.all_equal);
	assert_eq!(report.mismatch_count, 0);
	assert_eq!(report.table.as_ref().map(|t| t.rows.len()), Some(4));
}

#[test]
fn conjunction_against_disjunction() {
	let steps = split_steps("A & B = A | B", &Normalizer::default()).unwrap();
	let report = check_equality(&steps, None).unwrap();
	assert!(!report.all_equal);
	assert_eq!(report.mismatch_count, 2);
}

#[test]
fn constants_only() {
	assert!(extract_variables("1 & 0").is_empty());
	assert_eq!(build_table(&["1 & 0"], None), Ok(TableOutcome::NoVariables));
}

#[test]
fn multi_line_derivation() {
	let raw = r"
\begin{align*}
\overline{A \land B} \to C &= \neg\neg(A \land B) \lor C \\
&= (A \land B) \lor C && \text{double negation} \\
&= C \lor (B \wedge A)
\end{align*}
";
	let steps = split_steps(raw, &Normalizer::default()).unwrap();
	assert_eq!(steps.len(), 4);
	assert_eq!(steps[0].formula, "!(!(A & B)) | C");
	let report = check_equality(&steps, None).unwrap();
	assert!(report.all_equal);
	assert_eq!(report.table.as_ref().map(|t| t.rows.len()), Some(8));
}
