use crate::assignment::Assignment;
use crate::error::LogicError;
use crate::misc::log::targets;
use crate::symbol::Variable;
use log::trace;
use plex::lexer;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
enum Token {
	Variable(Variable),
	Constant(bool),
	LeftParenthesis,
	RightParenthesis,
	And,
	Or,
	Not,
	Iff,
	Whitespace,
	Unexpected(String),
}

lexer! {
	fn next_token(text: 'a) -> Token;

	r#"[ \t\r\n]+"# => Token::Whitespace,
	r#"[A-Z]"# => match text.chars().next().and_then(Variable::new) {
		Some(variable) => Token::Variable(variable),
		None => Token::Unexpected(text.to_owned()),
	},
	r#"0"# => Token::Constant(false),
	r#"1"# => Token::Constant(true),
	r#"\("# => Token::LeftParenthesis,
	r#"\)"# => Token::RightParenthesis,
	r#"\&"# => Token::And,
	r#"\|"# => Token::Or,
	r#"!"# => Token::Not,
	r#"=="# => Token::Iff,
	r#"="# => Token::Iff,
	r#"."# => Token::Unexpected(text.to_owned()),
}

// (byte offset, token), whitespace dropped
fn tokenize(string: &str) -> Result<Vec<(usize, Token)>, LogicError> {
	let mut tokens = Vec::new();
	let mut remaining = string;
	while let Some((token, new_remaining)) = next_token(remaining) {
		let offset = string.len() - remaining.len();
		match token {
			Token::Whitespace => {}
			Token::Unexpected(found) => {
				return Err(LogicError::InvalidExpression {
					formula: string.to_owned(),
					found,
					offset,
				})
			}
			any_token => tokens.push((offset, any_token)),
		}
		remaining = new_remaining;
	}
	Ok(tokens)
}

#[derive(Clone, Debug)]
pub struct PropTree {
	formula: String,
	root: usize,
	nodes: Vec<PropTreeNode>,
}

#[derive(Clone, Debug)]
pub struct PropTreeNode {
	pub lexical_unit: LexicalUnit,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LexicalUnit {
	And(usize, usize),
	Or(usize, usize),
	Not(usize),
	Iff(usize, usize),
	// variable and its offset in the source text
	Atom(Variable, usize),
	Constant(bool),
}

/// Deepest parenthesis nesting the parser accepts.
pub const MAX_NESTING: usize = 256;

struct Parser<'a> {
	formula: &'a str,
	tokens: Vec<(usize, Token)>,
	position: usize,
	// open parentheses around the current position
	depth: usize,
	nodes: Vec<PropTreeNode>,
}

impl<'a> Parser<'a> {
	fn push_node(&mut self, l_unit: LexicalUnit) -> usize {
		let id = self.nodes.len();
		self.nodes.push(PropTreeNode {
			lexical_unit: l_unit,
		});
		id
	}

	fn eat(&mut self, token: &Token) -> bool {
		match self.tokens.get(self.position) {
			Some((_, next)) if next == token => {
				self.position += 1;
				true
			}
			_ => false,
		}
	}

	// iff := or (= or)*
	fn parse_iff(&mut self) -> Result<usize, LogicError> {
		let mut left = self.parse_or()?;
		while self.eat(&Token::Iff) {
			let right = self.parse_or()?;
			left = self.push_node(LexicalUnit::Iff(left, right));
		}
		Ok(left)
	}

	fn parse_or(&mut self) -> Result<usize, LogicError> {
		let mut left = self.parse_and()?;
		while self.eat(&Token::Or) {
			let right = self.parse_and()?;
			left = self.push_node(LexicalUnit::Or(left, right));
		}
		Ok(left)
	}

	fn parse_and(&mut self) -> Result<usize, LogicError> {
		let mut left = self.parse_not()?;
		while self.eat(&Token::And) {
			let right = self.parse_not()?;
			left = self.push_node(LexicalUnit::And(left, right));
		}
		Ok(left)
	}

	fn parse_not(&mut self) -> Result<usize, LogicError> {
		let mut negations = 0;
		while self.eat(&Token::Not) {
			negations += 1;
		}
		let mut id = self.parse_atom()?;
		for _ in 0..negations {
			id = self.push_node(LexicalUnit::Not(id));
		}
		Ok(id)
	}

	fn parse_atom(&mut self) -> Result<usize, LogicError> {
		let (offset, token) = match self.tokens.get(self.position) {
			Some((offset, token)) => (*offset, token.clone()),
			None => return Err(LogicError::failure(self.formula, "unexpected end of formula")),
		};
		self.position += 1;
		match token {
			Token::Variable(variable) => Ok(self.push_node(LexicalUnit::Atom(variable, offset))),
			Token::Constant(value) => Ok(self.push_node(LexicalUnit::Constant(value))),
			Token::LeftParenthesis => {
				if self.depth == MAX_NESTING {
					return Err(LogicError::failure(
						self.formula,
						format!("parentheses nested deeper than {} at offset {}", MAX_NESTING, offset),
					));
				}
				self.depth += 1;
				let id = self.parse_iff()?;
				self.depth -= 1;
				if !self.eat(&Token::RightParenthesis) {
					return Err(LogicError::failure(
						self.formula,
						format!("parenthesis opened at offset {} is never closed", offset),
					));
				}
				Ok(id)
			}
			other => Err(LogicError::failure(
				self.formula,
				format!("expected an operand at offset {}, found {:?}", offset, other),
			)),
		}
	}
}

impl PropTree {
	/// Parse a native formula.
	///
	/// Characters outside the formula alphabet are rejected as
	/// [`LogicError::InvalidExpression`] before parsing starts.
	pub fn from_string(string: &str) -> Result<PropTree, LogicError> {
		let tokens = tokenize(string)?;
		PropTree::from_tokens(string, tokens)
	}

	fn from_tokens(string: &str, tokens: Vec<(usize, Token)>) -> Result<PropTree, LogicError> {
		let mut parser = Parser {
			formula: string,
			tokens,
			position: 0,
			depth: 0,
			nodes: Vec::new(),
		};
		let root = parser.parse_iff()?;
		if let Some((offset, token)) = parser.tokens.get(parser.position) {
			return Err(LogicError::failure(
				string,
				format!("unexpected {:?} at offset {}", token, offset),
			));
		}
		let result = PropTree {
			formula: string.to_owned(),
			root,
			nodes: parser.nodes,
		};
		trace!(target: targets::EVALUATE, "parsed '{}' as {}", string, result);
		Ok(result)
	}

	pub fn formula(&self) -> &str {
		&self.formula
	}

	pub fn nodes(&self) -> &[PropTreeNode] {
		&self.nodes
	}

	/// Value of the formula under `assignment`.
	pub fn eval(&self, assignment: &Assignment) -> Result<bool, LogicError> {
		// children are pushed before their parents, one pass in arena order suffices
		let mut values: Vec<bool> = Vec::with_capacity(self.nodes.len());
		for node in &self.nodes {
			let value = match node.lexical_unit {
				LexicalUnit::And(a, b) => values[a] && values[b],
				LexicalUnit::Or(a, b) => values[a] || values[b],
				LexicalUnit::Iff(a, b) => values[a] == values[b],
				LexicalUnit::Not(a) => !values[a],
				LexicalUnit::Constant(value) => value,
				LexicalUnit::Atom(variable, offset) => match assignment.get(variable) {
					Some(value) => value,
					None => {
						return Err(LogicError::InvalidExpression {
							formula: self.formula.clone(),
							found: variable.to_string(),
							offset,
						})
					}
				},
			};
			values.push(value);
		}
		Ok(values[self.root])
	}
}

enum Pending {
	Node(usize),
	Text(&'static str),
}

// prefix form, e.g. `|(A &(!B C))`
impl fmt::Display for PropTree {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let mut pending = vec![Pending::Node(self.root)];
		while let Some(item) = pending.pop() {
			let id = match item {
				Pending::Text(text) => {
					f.write_str(text)?;
					continue;
				}
				Pending::Node(id) => id,
			};
			let (operator, a, b) = match self.nodes[id].lexical_unit {
				LexicalUnit::And(a, b) => ("&(", a, b),
				LexicalUnit::Or(a, b) => ("|(", a, b),
				LexicalUnit::Iff(a, b) => ("=(", a, b),
				LexicalUnit::Not(a) => {
					f.write_str("!")?;
					pending.push(Pending::Node(a));
					continue;
				}
				LexicalUnit::Atom(variable, _) => {
					write!(f, "{}", variable)?;
					continue;
				}
				LexicalUnit::Constant(value) => {
					f.write_str(if value { "1" } else { "0" })?;
					continue;
				}
			};
			f.write_str(operator)?;
			pending.extend([
				Pending::Text(")"),
				Pending::Node(b),
				Pending::Text(" "),
				Pending::Node(a),
			]);
		}
		Ok(())
	}
}

/// Evaluate a native formula under one assignment.
///
/// Every variable is checked against the assignment before the formula is parsed, so a
/// stray symbol is an [`LogicError::InvalidExpression`] even when the formula is also
/// malformed.
pub fn evaluate(formula: &str, assignment: &Assignment) -> Result<bool, LogicError> {
	let tokens = tokenize(formula)?;
	for (offset, token) in &tokens {
		if let Token::Variable(variable) = token {
			if assignment.get(*variable).is_none() {
				return Err(LogicError::InvalidExpression {
					formula: formula.to_owned(),
					found: variable.to_string(),
					offset: *offset,
				});
			}
		}
	}
	PropTree::from_tokens(formula, tokens)?.eval(assignment)
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::assignment::enumerate;
	use crate::symbol::extract_variables;

	fn assign(pairs: &[(char, bool)]) -> Assignment {
		Assignment::new(
			pairs
				.iter()
				.filter_map(|(c, b)| Variable::new(*c).map(|v| (v, *b)))
				.collect(),
		)
	}

	fn tree(string: &str) -> String {
		PropTree::from_string(string).unwrap().to_string()
	}

	#[test]
	fn test_precedence() {
		assert_eq!(tree("A | !B & C"), "|(A &(!B C))");
		assert_eq!(tree("A & B | C == D"), "=(|(&(A B) C) D)");
		assert_eq!(tree("!(A | B)"), "!|(A B)");
		assert_eq!(tree("!!A"), "!!A");
	}

	#[test]
	fn test_left_associative() {
		assert_eq!(tree("A & B & C"), "&(&(A B) C)");
		assert_eq!(tree("A | B | C"), "|(|(A B) C)");
		assert_eq!(tree("A = B = C"), "=(=(A B) C)");
	}

	#[test]
	fn test_evaluate_and() {
		assert_eq!(evaluate("A & B", &assign(&[('A', true), ('B', true)])), Ok(true));
		assert_eq!(evaluate("A & B", &assign(&[('A', true), ('B', false)])), Ok(false));
	}

	#[test]
	fn test_evaluate_precedence() {
		let a = assign(&[('A', false), ('B', false), ('C', true)]);
		assert_eq!(evaluate("A | !B & C", &a), Ok(true));
		assert_eq!(evaluate("(A | !B) & !C", &a), Ok(false));
	}

	#[test]
	fn test_biconditional() {
		let a = assign(&[('A', false), ('B', false)]);
		assert_eq!(evaluate("A == B", &a), Ok(true));
		assert_eq!(evaluate("A = !B", &a), Ok(false));
		assert_eq!(evaluate("1 == 0 | 1", &a), Ok(true));
	}

	#[test]
	fn test_invalid_character() {
		let a = assign(&[('A', true)]);
		assert!(matches!(
			evaluate("A + 1", &a),
			Err(LogicError::InvalidExpression { offset: 2, .. })
		));
		assert!(matches!(
			evaluate("a & 1", &a),
			Err(LogicError::InvalidExpression { .. })
		));
	}

	#[test]
	fn test_unassigned_before_parse() {
		// unassigned B wins over the dangling operator
		let a = assign(&[('A', true)]);
		match evaluate("A & B &", &a) {
			Err(LogicError::InvalidExpression { found, offset, .. }) => {
				assert_eq!(found, "B");
				assert_eq!(offset, 4);
			}
			other => panic!("unexpected {:?}", other),
		}
	}

	#[test]
	fn test_malformed() {
		let a = assign(&[('A', true), ('B', true)]);
		for formula in ["(A & B", "A & B)", "A &", "& A", "", "()", "A B", "10"] {
			assert!(
				matches!(evaluate(formula, &a), Err(LogicError::EvaluationFailure { .. })),
				"{:?} should not parse",
				formula
			);
		}
	}

	#[test]
	fn test_nesting_limit() {
		let a = assign(&[('A', true)]);
		let nested = |n: usize| format!("{}A{}", "(".repeat(n), ")".repeat(n));
		assert_eq!(evaluate(&nested(MAX_NESTING), &a), Ok(true));
		assert!(matches!(
			evaluate(&nested(MAX_NESTING + 1), &a),
			Err(LogicError::EvaluationFailure { .. })
		));
		assert!(matches!(
			evaluate(&nested(5000), &a),
			Err(LogicError::EvaluationFailure { .. })
		));
	}

	#[test]
	fn test_long_chains() {
		let a = assign(&[('A', true), ('B', false)]);
		let negations = format!("{}A", "!".repeat(20001));
		assert_eq!(evaluate(&negations, &a), Ok(false));
		let conjunction = vec!["A"; 50000].join(" & ") + " & B";
		assert_eq!(evaluate(&conjunction, &a), Ok(false));
		let tree = PropTree::from_string(&vec!["A"; 20000].join(" | ")).unwrap();
		assert!(tree.to_string().starts_with("|(|(|("));
	}

	#[test]
	fn test_reuse_tree() {
		let prop = PropTree::from_string("A == !B").unwrap();
		let results: Vec<bool> = enumerate(&extract_variables("A B"))
			.iter()
			.map(|a| prop.eval(a).unwrap())
			.collect();
		assert_eq!(results, vec![false, true, true, false]);
	}
}
