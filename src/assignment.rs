use crate::symbol::Variable;

/// A total valuation of an ordered set of variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
	pairs: Vec<(Variable, bool)>,
}

impl Assignment {
	pub fn new(pairs: Vec<(Variable, bool)>) -> Assignment {
		Assignment { pairs }
	}

	pub fn get(&self, variable: Variable) -> Option<bool> {
		self.pairs
			.iter()
			.find(|(v, _)| *v == variable)
			.map(|(_, value)| *value)
	}

	pub fn values(&self) -> impl Iterator<Item = bool> + '_ {
		self.pairs.iter().map(|(_, value)| *value)
	}

	pub fn pairs(&self) -> &[(Variable, bool)] {
		&self.pairs
	}

	pub fn len(&self) -> usize {
		self.pairs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.pairs.is_empty()
	}
}

/// Every assignment of `variables`, from all true down to all false.
///
/// Row `i` counts down from `2^n - 1`; the variable at position `j` takes bit `n - 1 - j`,
/// so the last variable alternates fastest.
pub fn enumerate(variables: &[Variable]) -> Vec<Assignment> {
	let n = variables.len();
	let rows: usize = 1 << n;
	(0..rows)
		.rev()
		.map(|i| {
			Assignment::new(
				variables
					.iter()
					.enumerate()
					.map(|(j, v)| (*v, (i >> (n - 1 - j)) & 1 == 1))
					.collect(),
			)
		})
		.collect()
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::symbol::extract_variables;

	fn row(a: &Assignment) -> String {
		a.values().map(|b| if b { 'T' } else { 'F' }).collect()
	}

	#[test]
	fn test_enumerate_order() {
		let rows: Vec<String> = enumerate(&extract_variables("A B")).iter().map(row).collect();
		assert_eq!(rows, vec!["TT", "TF", "FT", "FF"]);
	}

	#[test]
	fn test_enumerate_three() {
		let rows = enumerate(&extract_variables("A B C"));
		assert_eq!(rows.len(), 8);
		assert_eq!(row(&rows[0]), "TTT");
		assert_eq!(row(&rows[1]), "TTF");
		assert_eq!(row(&rows[6]), "FFT");
		assert_eq!(row(&rows[7]), "FFF");
	}

	#[test]
	fn test_enumerate_empty() {
		let rows = enumerate(&[]);
		assert_eq!(rows.len(), 1);
		assert!(rows[0].is_empty());
	}

	#[test]
	fn test_get() {
		let rows = enumerate(&extract_variables("A B"));
		let b = Variable::new('B').unwrap();
		let c = Variable::new('C').unwrap();
		assert_eq!(rows[1].get(b), Some(false));
		assert_eq!(rows[1].get(c), None);
	}
}
