use crate::assignment::{enumerate, Assignment};
use crate::derivation::DerivationStep;
use crate::error::LogicError;
use crate::misc::log::targets;
use crate::prop_tree::PropTree;
use crate::symbol::{extract_all, Variable};
use log::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
	pub assignment: Assignment,
	/// One value per formula, in formula order.
	pub results: Vec<bool>,
}

/// Values of some formulas under every assignment of their variables.
///
/// Rows follow [enumerate]: `2^n` of them for `n` variables, all true first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TruthTable {
	pub variables: Vec<Variable>,
	pub formulas: Vec<String>,
	pub rows: Vec<Row>,
}

impl TruthTable {
	fn evaluate(variables: Vec<Variable>, formulas: Vec<String>) -> Result<TruthTable, LogicError> {
		let trees = formulas
			.iter()
			.map(|formula| PropTree::from_string(formula))
			.collect::<Result<Vec<_>, _>>()?;
		let rows = enumerate(&variables)
			.into_iter()
			.map(|assignment| {
				let results = trees
					.iter()
					.map(|tree| tree.eval(&assignment))
					.collect::<Result<Vec<_>, _>>()?;
				Ok(Row {
					assignment,
					results,
				})
			})
			.collect::<Result<Vec<_>, LogicError>>()?;
		Ok(TruthTable {
			variables,
			formulas,
			rows,
		})
	}

	pub fn column_count(&self) -> usize {
		self.variables.len() + self.formulas.len()
	}

	/// Values of formula `index`, one per row.
	pub fn column(&self, index: usize) -> Vec<bool> {
		self.rows.iter().map(|row| row.results[index]).collect()
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableOutcome {
	Table(TruthTable),
	/// No formulas were given.
	NoExpressions,
	/// The formulas reference no variables.
	NoVariables,
}

fn check_limit(count: usize, limit: Option<usize>) -> Result<(), LogicError> {
	match limit {
		Some(limit) if count > limit => Err(LogicError::TooManyVariables { count, limit }),
		_ => Ok(()),
	}
}

/// Tabulate native formulas over the union of their variables.
pub fn build_table<S: AsRef<str>>(
	formulas: &[S],
	max_variables: Option<usize>,
) -> Result<TableOutcome, LogicError> {
	if formulas.is_empty() {
		debug!(target: targets::TABLE, "no formulas, nothing to tabulate");
		return Ok(TableOutcome::NoExpressions);
	}
	let variables = extract_all(formulas);
	if variables.is_empty() {
		debug!(target: targets::TABLE, "no variables, nothing to tabulate");
		return Ok(TableOutcome::NoVariables);
	}
	check_limit(variables.len(), max_variables)?;
	debug!(
		target: targets::TABLE,
		"{} formulas over {} variables",
		formulas.len(),
		variables.len()
	);
	let formulas = formulas.iter().map(|f| f.as_ref().to_owned()).collect();
	Ok(TableOutcome::Table(TruthTable::evaluate(variables, formulas)?))
}

/// Whether every step of a derivation agrees with the first on every assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EqualityReport {
	pub all_equal: bool,
	pub steps: Vec<DerivationStep>,
	pub mismatch_count: usize,
	/// Absent when there are fewer than two steps.
	pub table: Option<TruthTable>,
	/// Per row of `table`, whether some step differs from the first.
	pub mismatches: Vec<bool>,
}

impl EqualityReport {
	/// Fewer than two steps, the verdict is vacuous.
	pub fn nothing_to_compare(&self) -> bool {
		self.table.is_none()
	}

	pub fn formulas(&self) -> Vec<&str> {
		self.steps.iter().map(|step| step.formula.as_str()).collect()
	}
}

/// Compare every step of a derivation against the first.
///
/// Steps without variables are still evaluated, over the single empty assignment.
pub fn check_equality(
	steps: &[DerivationStep],
	max_variables: Option<usize>,
) -> Result<EqualityReport, LogicError> {
	if steps.len() < 2 {
		debug!(target: targets::TABLE, "{} steps, nothing to compare", steps.len());
		return Ok(EqualityReport {
			all_equal: true,
			steps: steps.to_vec(),
			mismatch_count: 0,
			table: None,
			mismatches: Vec::new(),
		});
	}
	let formulas: Vec<String> = steps.iter().map(|step| step.formula.clone()).collect();
	let variables = extract_all(&formulas);
	check_limit(variables.len(), max_variables)?;

	let table = TruthTable::evaluate(variables, formulas)?;
	let mismatches: Vec<bool> = table
		.rows
		.iter()
		.map(|row| row.results.iter().any(|value| *value != row.results[0]))
		.collect();
	let mismatch_count = mismatches.iter().filter(|m| **m).count();
	debug!(
		target: targets::TABLE,
		"{} steps, {} of {} rows mismatch",
		steps.len(),
		mismatch_count,
		table.rows.len()
	);
	Ok(EqualityReport {
		all_equal: mismatch_count == 0,
		steps: steps.to_vec(),
		mismatch_count,
		table: Some(table),
		mismatches,
	})
}
