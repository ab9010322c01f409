use crate::error::LogicError;
use crate::latex::Normalizer;
use crate::misc::log::targets;
use log::debug;
use plex::lexer;

/// One formula of a derivation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivationStep {
	/// Position in the derivation, from 1.
	pub index: usize,
	/// The segment as written, after cleaning.
	pub source: String,
	/// The native formula.
	pub formula: String,
	/// An implication in this step had to be degraded to a disjunction.
	pub suspect: bool,
}

#[derive(Clone, Debug, PartialEq)]
enum Piece {
	// \text{..} and friends, argument follows
	Annotation,
	// \begin{..}, \end{..}
	Environment,
	Spacing,
	LineBreak,
	MathDelimiter,
	Ampersand,
	Separator,
	LeftBrace,
	RightBrace,
	LeftParenthesis,
	RightParenthesis,
	Newline,
	Text(String),
}

lexer! {
	fn next_piece(text: 'a) -> Piece;

	r#"\\(text|textrm|textit|mbox|tag|intertext)"# => Piece::Annotation,
	r#"\\(begin|end)"# => Piece::Environment,
	r#"\\(quad|qquad)"# => Piece::Spacing,
	r#"\\[A-Za-z]+"# => Piece::Text(text.to_owned()),
	r#"\\\\"# => Piece::LineBreak,
	r#"\$\$"# => Piece::MathDelimiter,
	r#"\$"# => Piece::MathDelimiter,
	r#"\\\["# => Piece::MathDelimiter,
	r#"\\\]"# => Piece::MathDelimiter,
	r#"\\\("# => Piece::MathDelimiter,
	r#"\\\)"# => Piece::MathDelimiter,
	r#"\&"# => Piece::Ampersand,
	r#"=="# => Piece::Text(text.to_owned()),
	r#"="# => Piece::Separator,
	r#"\{"# => Piece::LeftBrace,
	r#"\}"# => Piece::RightBrace,
	r#"\("# => Piece::LeftParenthesis,
	r#"\)"# => Piece::RightParenthesis,
	r#"\n"# => Piece::Newline,
	r#"[^\\$&={}()\n]+"# => Piece::Text(text.to_owned()),
	r#"."# => Piece::Text(text.to_owned()),
}

fn lex(raw: &str) -> Vec<Piece> {
	let mut pieces = Vec::new();
	let mut remaining = raw;
	while let Some((piece, new_remaining)) = next_piece(remaining) {
		pieces.push(piece);
		remaining = new_remaining;
	}
	pieces
}

fn is_blank(piece: &Piece) -> bool {
	match piece {
		Piece::Text(text) => text.trim().is_empty(),
		_ => false,
	}
}

// Index just past the brace group starting at or after `from`, when one follows.
fn skip_argument(pieces: &[Piece], from: usize) -> usize {
	let mut open = from;
	while open < pieces.len() && is_blank(&pieces[open]) {
		open += 1;
	}
	if pieces.get(open) != Some(&Piece::LeftBrace) {
		return from;
	}
	let mut depth = 0usize;
	for (i, piece) in pieces.iter().enumerate().skip(open) {
		match piece {
			Piece::LeftBrace => depth += 1,
			Piece::RightBrace => {
				depth -= 1;
				if depth == 0 {
					return i + 1;
				}
			}
			_ => {}
		}
	}
	// unclosed, the annotation runs to the end
	pieces.len()
}

fn strip_presentation(pieces: Vec<Piece>) -> Vec<Piece> {
	let mut kept = Vec::with_capacity(pieces.len());
	let mut i = 0;
	while i < pieces.len() {
		match &pieces[i] {
			Piece::Annotation | Piece::Environment => {
				i = skip_argument(&pieces, i + 1);
				continue;
			}
			Piece::Spacing | Piece::MathDelimiter => {}
			Piece::LineBreak => kept.push(Piece::Newline),
			other => kept.push(other.clone()),
		}
		i += 1;
	}

	// alignment markers: `&` next to `=`, another `&` or a line boundary
	let boundary = |p: Option<&Piece>| {
		matches!(
			p,
			None | Some(Piece::Newline) | Some(Piece::Separator) | Some(Piece::Ampersand)
		)
	};
	let mut result = Vec::with_capacity(kept.len());
	for (i, piece) in kept.iter().enumerate() {
		if *piece == Piece::Ampersand {
			let before = kept[..i].iter().rev().find(|p| !is_blank(p));
			let after = kept[i + 1..].iter().find(|p| !is_blank(p));
			let alignment = boundary(before) || boundary(after);
			if alignment {
				continue;
			}
		}
		result.push(piece.clone());
	}
	result
}

fn piece_text(piece: &Piece) -> &str {
	match piece {
		Piece::Ampersand => "&",
		Piece::Separator => "=",
		Piece::LeftBrace => "{",
		Piece::RightBrace => "}",
		Piece::LeftParenthesis => "(",
		Piece::RightParenthesis => ")",
		Piece::Newline => "\n",
		Piece::Text(text) => text,
		_ => "",
	}
}

/// The derivation with presentation removed and blank lines dropped.
pub fn clean(raw: &str) -> String {
	let pieces = strip_presentation(lex(raw));
	let text: String = pieces.iter().map(piece_text).collect();
	text.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.collect::<Vec<_>>()
		.join("\n")
}

/// Segments between top-level `=` signs, trimmed, empty ones dropped.
pub fn split_segments(raw: &str) -> Vec<String> {
	let pieces = strip_presentation(lex(raw));
	let mut segments = Vec::new();
	let mut current = String::new();
	let mut depth = 0usize;
	for piece in &pieces {
		match piece {
			Piece::LeftBrace | Piece::LeftParenthesis => depth += 1,
			Piece::RightBrace | Piece::RightParenthesis => depth = depth.saturating_sub(1),
			Piece::Separator if depth == 0 => {
				segments.push(std::mem::take(&mut current));
				continue;
			}
			_ => {}
		}
		current.push_str(piece_text(piece));
	}
	segments.push(current);
	segments
		.into_iter()
		.map(|segment| segment.split_whitespace().collect::<Vec<_>>().join(" "))
		.filter(|segment| !segment.is_empty())
		.collect()
}

/// Split a derivation into its steps, normalizing each.
pub fn split_steps(raw: &str, normalizer: &Normalizer) -> Result<Vec<DerivationStep>, LogicError> {
	let steps = split_segments(raw)
		.into_iter()
		.enumerate()
		.map(|(i, source)| {
			let normalized = normalizer.normalize(&source)?;
			Ok(DerivationStep {
				index: i + 1,
				suspect: normalized.is_suspect(),
				formula: normalized.formula,
				source,
			})
		})
		.collect::<Result<Vec<_>, LogicError>>()?;
	debug!(target: targets::SPLIT, "{} steps", steps.len());
	Ok(steps)
}
