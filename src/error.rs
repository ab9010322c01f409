use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogicError {
	/// The formula holds something other than constants, operators, parentheses and
	/// whitespace once every variable has been replaced by its value.
	#[error("invalid expression '{formula}': unexpected {found:?} at offset {offset}")]
	InvalidExpression {
		formula: String,
		found: String,
		offset: usize,
	},
	#[error("failed to evaluate '{formula}': {reason}")]
	EvaluationFailure { formula: String, reason: String },
	/// `arrow` counts implications in rewrite order, starting at 1.
	#[error("cannot determine the antecedent of implication #{arrow} in '{formula}'")]
	UnresolvableImplicationScope { formula: String, arrow: usize },
	#[error("{count} variables exceed the limit of {limit}")]
	TooManyVariables { count: usize, limit: usize },
}

impl LogicError {
	pub(crate) fn failure(formula: &str, reason: impl Into<String>) -> LogicError {
		LogicError::EvaluationFailure {
			formula: formula.to_owned(),
			reason: reason.into(),
		}
	}
}
