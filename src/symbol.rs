use std::collections::BTreeSet;
use std::fmt;

/// A propositional variable, one uppercase letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(char);

impl Variable {
	pub fn new(symbol: char) -> Option<Variable> {
		if symbol.is_ascii_uppercase() {
			Some(Variable(symbol))
		} else {
			None
		}
	}

	pub fn symbol(self) -> char {
		self.0
	}
}

impl fmt::Display for Variable {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Distinct variables referenced by a native formula, in alphabetical order.
pub fn extract_variables(formula: &str) -> Vec<Variable> {
	let set: BTreeSet<Variable> = formula.chars().filter_map(Variable::new).collect();
	set.into_iter().collect()
}

/// Union of the variables of every formula, in alphabetical order.
pub fn extract_all<S: AsRef<str>>(formulas: &[S]) -> Vec<Variable> {
	let set: BTreeSet<Variable> = formulas
		.iter()
		.flat_map(|formula| formula.as_ref().chars().filter_map(Variable::new))
		.collect();
	set.into_iter().collect()
}

#[cfg(test)]
mod test {
	use super::*;

	fn symbols(vars: &[Variable]) -> String {
		vars.iter().map(|v| v.symbol()).collect()
	}

	#[test]
	fn test_extract_sorted_dedup() {
		assert_eq!(symbols(&extract_variables("C & (A | !C) == B")), "ABC");
		assert_eq!(symbols(&extract_variables("Z|Z|Z")), "Z");
	}

	#[test]
	fn test_extract_constants_only() {
		assert!(extract_variables("1 & 0").is_empty());
		assert!(extract_variables("").is_empty());
	}

	#[test]
	fn test_extract_all_union() {
		assert_eq!(symbols(&extract_all(&["B & A", "C", "A | D"])), "ABCD");
		assert!(extract_all::<&str>(&[]).is_empty());
	}

	#[test]
	fn test_variable_alphabet() {
		assert!(Variable::new('a').is_none());
		assert!(Variable::new('1').is_none());
		assert_eq!(Variable::new('Q').map(|v| v.to_string()), Some("Q".to_string()));
	}
}
