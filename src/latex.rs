/*!
Normalization of LaTeX logic notation into native formulas.

The rewrite runs over a token list in a fixed order:

1. complements, `\overline{X}` to `!X` or `!(X)`
2. the constants `\top` and `\bot`
3. disjunction, conjunction and negation
4. biconditionals, to `==`
5. implications, `L \to R` to `!L | R`
6. whitespace collapse

Later passes rely on earlier ones. In particular the antecedent scan of (5) only
understands native negation and parentheses, which (1) to (3) have produced.
*/

use crate::config::ScopePolicy;
use crate::error::LogicError;
use crate::misc::log::targets;
use log::{trace, warn};
use plex::lexer;
use std::ops::Range;

#[derive(Clone, Debug, PartialEq)]
pub enum TexToken {
	/// A macro name, without the backslash.
	Macro(String),
	Variable(char),
	Constant(bool),
	LeftBrace,
	RightBrace,
	LeftParenthesis,
	RightParenthesis,
	And,
	Or,
	Not,
	Iff,
	Space,
	Other(String),
}

lexer! {
	fn next_token(text: 'a) -> TexToken;

	r#"[ \t\r\n]+"# => TexToken::Space,
	r#"\\[,;:! ]"# => TexToken::Space,
	r#"\\[A-Za-z]+"# => TexToken::Macro(text[1..].to_owned()),
	r#"[A-Z]"# => match text.chars().next() {
		Some(symbol) => TexToken::Variable(symbol),
		None => TexToken::Other(text.to_owned()),
	},
	r#"0"# => TexToken::Constant(false),
	r#"1"# => TexToken::Constant(true),
	r#"\{"# => TexToken::LeftBrace,
	r#"\}"# => TexToken::RightBrace,
	r#"\("# => TexToken::LeftParenthesis,
	r#"\)"# => TexToken::RightParenthesis,
	r#"\&"# => TexToken::And,
	r#"\|"# => TexToken::Or,
	r#"!"# => TexToken::Not,
	r#"=="# => TexToken::Iff,
	r#"="# => TexToken::Iff,
	r#"."# => TexToken::Other(text.to_owned()),
}

const COMPLEMENT: &[&str] = &["overline", "bar"];
const TRUE: &[&str] = &["top", "true"];
const FALSE: &[&str] = &["bot", "false"];
const OR: &[&str] = &["lor", "vee"];
const AND: &[&str] = &["land", "wedge"];
const NOT: &[&str] = &["neg", "lnot"];
const IFF: &[&str] = &["iff", "leftrightarrow", "Leftrightarrow"];
const IMPLIES: &[&str] = &["rightarrow", "to", "implies", "Rightarrow"];
// sizing only
const PRESENTATION: &[&str] = &["left", "right", "bigl", "bigr", "Bigl", "Bigr"];

fn is_macro(token: &TexToken, names: &[&str]) -> bool {
	match token {
		TexToken::Macro(name) => names.contains(&name.as_str()),
		_ => false,
	}
}

pub fn tokenize(string: &str) -> Vec<TexToken> {
	let mut tokens = Vec::new();
	let mut remaining = string;
	while let Some((token, new_remaining)) = next_token(remaining) {
		if !is_macro(&token, PRESENTATION) {
			tokens.push(token);
		}
		remaining = new_remaining;
	}
	tokens
}

/// Text of a token list, binary operators padded with spaces.
pub fn render(tokens: &[TexToken]) -> String {
	let mut result = String::new();
	for token in tokens {
		match token {
			TexToken::Macro(name) => {
				result.push('\\');
				result.push_str(name);
			}
			TexToken::Variable(symbol) => result.push(*symbol),
			TexToken::Constant(value) => result.push(if *value { '1' } else { '0' }),
			TexToken::LeftBrace => result.push('{'),
			TexToken::RightBrace => result.push('}'),
			TexToken::LeftParenthesis => result.push('('),
			TexToken::RightParenthesis => result.push(')'),
			TexToken::And => result.push_str(" & "),
			TexToken::Or => result.push_str(" | "),
			TexToken::Not => result.push('!'),
			TexToken::Iff => result.push_str(" == "),
			TexToken::Space => result.push(' '),
			TexToken::Other(text) => result.push_str(text),
		}
	}
	result
}

fn is_atom(token: &TexToken) -> bool {
	matches!(token, TexToken::Variable(_) | TexToken::Constant(_))
}

/// Index of the last non-space token before `index`.
pub fn skip_space_back(tokens: &[TexToken], index: usize) -> Option<usize> {
	(0..index.min(tokens.len()))
		.rev()
		.find(|&i| tokens[i] != TexToken::Space)
}

/// Index of the parenthesis opening the group that `close` ends.
pub fn matching_open(tokens: &[TexToken], close: usize) -> Option<usize> {
	let mut depth = 0usize;
	for i in (0..=close).rev() {
		match tokens[i] {
			TexToken::RightParenthesis => depth += 1,
			TexToken::LeftParenthesis => {
				depth = depth.checked_sub(1)?;
				if depth == 0 {
					return Some(i);
				}
			}
			_ => {}
		}
	}
	None
}

fn matching_brace(tokens: &[TexToken], open: usize) -> Option<usize> {
	let mut depth = 0usize;
	for (i, token) in tokens.iter().enumerate().skip(open) {
		match token {
			TexToken::LeftBrace => depth += 1,
			TexToken::RightBrace => {
				depth -= 1;
				if depth == 0 {
					return Some(i);
				}
			}
			_ => {}
		}
	}
	None
}

/// Extend `start` backward over any prefix negations.
pub fn absorb_negations(tokens: &[TexToken], mut start: usize) -> usize {
	while let Some(previous) = skip_space_back(tokens, start) {
		if tokens[previous] != TexToken::Not {
			break;
		}
		start = previous;
	}
	start
}

/// Token range of the left operand of the arrow at `arrow`.
///
/// The operand is the parenthesized group or single atom immediately before the arrow,
/// together with the negations prefixed to it.
pub fn antecedent_scope(tokens: &[TexToken], arrow: usize) -> Option<Range<usize>> {
	let last = skip_space_back(tokens, arrow)?;
	let first = match &tokens[last] {
		TexToken::RightParenthesis => matching_open(tokens, last)?,
		token if is_atom(token) => last,
		_ => return None,
	};
	Some(absorb_negations(tokens, first)..last + 1)
}

// `(..)` as a whole, or negations ahead of one atom
fn is_self_contained(operand: &[TexToken]) -> bool {
	let solid: Vec<&TexToken> = operand.iter().filter(|t| **t != TexToken::Space).collect();
	match solid.first() {
		Some(TexToken::LeftParenthesis) => {
			matching_open(operand, operand.len() - 1) == Some(0)
				&& operand.last() == Some(&TexToken::RightParenthesis)
		}
		Some(_) => {
			let atoms = solid.iter().filter(|t| is_atom(t)).count();
			atoms == 1
				&& solid.last().map_or(false, |t| is_atom(t))
				&& solid[..solid.len() - 1].iter().all(|t| **t == TexToken::Not)
		}
		None => false,
	}
}

fn rewrite_complements(tokens: &[TexToken]) -> Vec<TexToken> {
	let mut result = Vec::new();
	let mut i = 0;
	while i < tokens.len() {
		if is_macro(&tokens[i], COMPLEMENT) {
			let mut argument = i + 1;
			while tokens.get(argument) == Some(&TexToken::Space) {
				argument += 1;
			}
			match tokens.get(argument) {
				Some(TexToken::LeftBrace) => {
					if let Some(close) = matching_brace(tokens, argument) {
						let inner = rewrite_complements(&tokens[argument + 1..close]);
						let solid: Vec<&TexToken> =
							inner.iter().filter(|t| **t != TexToken::Space).collect();
						let bare = match solid.as_slice() {
							[TexToken::Variable(symbol)] => Some(*symbol),
							_ => None,
						};
						result.push(TexToken::Not);
						if let Some(symbol) = bare {
							result.push(TexToken::Variable(symbol));
						} else {
							result.push(TexToken::LeftParenthesis);
							result.extend(inner);
							result.push(TexToken::RightParenthesis);
						}
						i = close + 1;
						continue;
					}
				}
				// `\bar A`
				Some(variable @ TexToken::Variable(_)) => {
					result.push(TexToken::Not);
					result.push(variable.clone());
					i = argument + 1;
					continue;
				}
				_ => {}
			}
		}
		result.push(tokens[i].clone());
		i += 1;
	}
	result
}

fn rewrite_constants(tokens: Vec<TexToken>) -> Vec<TexToken> {
	tokens
		.into_iter()
		.map(|token| {
			if is_macro(&token, TRUE) {
				TexToken::Constant(true)
			} else if is_macro(&token, FALSE) {
				TexToken::Constant(false)
			} else {
				token
			}
		})
		.collect()
}

fn rewrite_connectives(tokens: Vec<TexToken>) -> Vec<TexToken> {
	let mut result = Vec::with_capacity(tokens.len());
	let mut after_not = false;
	for token in tokens {
		if after_not && token == TexToken::Space {
			continue;
		}
		after_not = false;
		if is_macro(&token, OR) {
			result.push(TexToken::Or);
		} else if is_macro(&token, AND) {
			result.push(TexToken::And);
		} else if is_macro(&token, NOT) {
			result.push(TexToken::Not);
			after_not = true;
		} else {
			result.push(token);
		}
	}
	result
}

fn rewrite_biconditionals(tokens: Vec<TexToken>) -> Vec<TexToken> {
	tokens
		.into_iter()
		.map(|token| {
			if is_macro(&token, IFF) {
				TexToken::Iff
			} else {
				token
			}
		})
		.collect()
}

/// An implication rewritten as a plain disjunction as its antecedent could not be found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeDiagnostic {
	/// Position of the implication in rewrite order, from 1.
	pub arrow: usize,
	/// Text before the arrow at the time of the rewrite.
	pub preceding: String,
}

/// Rewrite every arrow, first to last, re-deriving scope from the current tokens each time.
fn rewrite_implications(mut tokens: Vec<TexToken>) -> (Vec<TexToken>, Vec<ScopeDiagnostic>) {
	let mut diagnostics = Vec::new();
	let mut count = 0;
	while let Some(arrow) = tokens.iter().position(|t| is_macro(t, IMPLIES)) {
		count += 1;
		let scope = match antecedent_scope(&tokens, arrow) {
			Some(scope) => scope,
			None => {
				let preceding = collapse(&render(&tokens[..arrow]));
				warn!(
					target: targets::NORMALIZE,
					"no antecedent for implication #{} after '{}', treating it as a disjunction",
					count,
					preceding
				);
				diagnostics.push(ScopeDiagnostic {
					arrow: count,
					preceding,
				});
				tokens[arrow] = TexToken::Or;
				continue;
			}
		};

		let operand = &tokens[scope.clone()];
		let wrap = !is_self_contained(operand);
		let mut rewritten = Vec::with_capacity(tokens.len() + 3);
		rewritten.extend_from_slice(&tokens[..scope.start]);
		rewritten.push(TexToken::Not);
		if wrap {
			rewritten.push(TexToken::LeftParenthesis);
		}
		rewritten.extend_from_slice(operand);
		if wrap {
			rewritten.push(TexToken::RightParenthesis);
		}
		rewritten.extend_from_slice(&tokens[scope.end..arrow]);
		rewritten.push(TexToken::Or);
		rewritten.extend_from_slice(&tokens[arrow + 1..]);
		tokens = rewritten;
		trace!(target: targets::NORMALIZE, "implication #{}: {}", count, render(&tokens));
	}
	(tokens, diagnostics)
}

fn collapse(text: &str) -> String {
	text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_tokens(latex: &str) -> (String, Vec<ScopeDiagnostic>) {
	let tokens = rewrite_complements(&tokenize(latex));
	let tokens = rewrite_constants(tokens);
	let tokens = rewrite_connectives(tokens);
	let tokens = rewrite_biconditionals(tokens);
	let (tokens, diagnostics) = rewrite_implications(tokens);
	(collapse(&render(&tokens)), diagnostics)
}

/// The result of normalizing one formula.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Normalized {
	pub formula: String,
	pub diagnostics: Vec<ScopeDiagnostic>,
}

impl Normalized {
	/// Whether some implication was degraded, leaving a formula that should not be trusted.
	pub fn is_suspect(&self) -> bool {
		!self.diagnostics.is_empty()
	}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Normalizer {
	pub scope_policy: ScopePolicy,
}

impl Normalizer {
	pub fn normalize(&self, latex: &str) -> Result<Normalized, LogicError> {
		let (formula, diagnostics) = normalize_tokens(latex);
		if self.scope_policy == ScopePolicy::Reject {
			if let Some(diagnostic) = diagnostics.first() {
				return Err(LogicError::UnresolvableImplicationScope {
					formula: latex.to_owned(),
					arrow: diagnostic.arrow,
				});
			}
		}
		trace!(target: targets::NORMALIZE, "'{}' => '{}'", latex, formula);
		Ok(Normalized {
			formula,
			diagnostics,
		})
	}
}

/// Normalize with the degrading policy, dropping diagnostics.
pub fn normalize(latex: &str) -> String {
	normalize_tokens(latex).0
}
