extern crate truthtab;

use truthtab::config::RenderStyle;
use truthtab::derivation::split_steps;
use truthtab::latex::{normalize, Normalizer};
use truthtab::render::{render_equality, render_outcome};
use truthtab::truth_table::{build_table, check_equality};

fn disp(latex: &str) {
	let formula = normalize(latex);
	println!("{} => {}", latex, formula);
	match build_table(&[formula], None) {
		Ok(outcome) => print!("{}", render_outcome(&outcome, RenderStyle::Plain)),
		Err(e) => println!("{}", e),
	}
	println!();
}

fn derive(derivation: &str) {
	let report = split_steps(derivation, &Normalizer::default())
		.and_then(|steps| check_equality(&steps, None));
	match report {
		Ok(report) => print!("{}", render_equality(&report, RenderStyle::Plain)),
		Err(e) => println!("{}", e),
	}
	println!();
}

fn main() {
	disp("A \\lor \\neg A");
	disp("(A \\to B) \\leftrightarrow (\\neg B \\to \\neg A)");
	disp("\\overline{A \\land B} \\to C");
	derive("\\neg(A \\lor B) = \\neg A \\land \\neg B");
	derive("A \\land (B \\lor C) = (A \\land B) \\lor (A \\land C)");
	derive(
		"\\begin{align*}\n\
		A \\to B &= \\neg A \\lor B \\\\\n\
		&= B \\to A && \\text{wrong} \\\\\n\
		\\end{align*}",
	);
}
