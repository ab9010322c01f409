/*!
Presentation of tables and equality reports.

Everything here reads the values produced by [truth_table](crate::truth_table) and
nothing in the core calls back into it.
*/

use crate::config::RenderStyle;
use crate::truth_table::{EqualityReport, TableOutcome, TruthTable};
use crossterm::style::Stylize;
use std::fmt::Write;

/// A native formula in LaTeX notation.
pub fn to_latex(formula: &str) -> String {
	let mut result = String::new();
	let mut chars = formula.chars().peekable();
	while let Some(c) = chars.next() {
		match c {
			'&' => result.push_str(" \\land "),
			'|' => result.push_str(" \\lor "),
			'!' => result.push_str("\\neg "),
			'=' => {
				if chars.peek() == Some(&'=') {
					chars.next();
				}
				result.push_str(" \\leftrightarrow ");
			}
			other => result.push(other),
		}
	}
	result.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn glyph(value: bool, style: RenderStyle) -> String {
	let plain = if value { "T" } else { "F" };
	match style {
		RenderStyle::Plain => plain.to_string(),
		RenderStyle::Colorized => {
			if value {
				plain.green().to_string()
			} else {
				plain.red().to_string()
			}
		}
		RenderStyle::MarkdownMath => {
			let colour = if value { "green" } else { "red" };
			format!("$\\color{{{}}}{{{}}}$", colour, plain)
		}
	}
}

fn headers(table: &TruthTable, style: RenderStyle) -> Vec<String> {
	let variables = table.variables.iter().map(|v| v.to_string());
	let formulas = table.formulas.iter().cloned();
	match style {
		RenderStyle::MarkdownMath => variables
			.chain(formulas)
			.map(|h| format!("${}$", to_latex(&h)))
			.collect(),
		_ => variables.chain(formulas).collect(),
	}
}

fn write_grid(out: &mut String, table: &TruthTable, style: RenderStyle, marks: &[String]) {
	let headers = headers(table, style);
	if style == RenderStyle::MarkdownMath {
		let _ = writeln!(out, "| {} |", headers.join(" | "));
		let rule: Vec<&str> = headers.iter().map(|_| ":-:").collect();
		let _ = writeln!(out, "|{}|", rule.join("|"));
		for (i, row) in table.rows.iter().enumerate() {
			let cells: Vec<String> = row
				.assignment
				.values()
				.chain(row.results.iter().copied())
				.map(|value| glyph(value, style))
				.collect();
			let _ = writeln!(out, "| {} |{}", cells.join(" | "), mark(marks, i));
		}
		return;
	}

	// glyphs are one column wide, pad before colouring
	let widths: Vec<usize> = headers.iter().map(|h| h.chars().count().max(1)).collect();
	let header_line: Vec<String> = headers
		.iter()
		.zip(&widths)
		.map(|(h, w)| format!("{:<w$}", h, w = *w))
		.collect();
	let _ = writeln!(out, "{}", header_line.join(" | ").trim_end());
	let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
	let _ = writeln!(out, "{}", rule.join("-+-"));
	for (i, row) in table.rows.iter().enumerate() {
		let cells: Vec<String> = row
			.assignment
			.values()
			.chain(row.results.iter().copied())
			.zip(&widths)
			.map(|(value, w)| format!("{}{}", glyph(value, style), " ".repeat(w - 1)))
			.collect();
		let _ = writeln!(out, "{}{}", cells.join(" | ").trim_end(), mark(marks, i));
	}
}

fn mark(marks: &[String], row: usize) -> &str {
	marks.get(row).map_or("", |m| m.as_str())
}

pub fn render_table(table: &TruthTable, style: RenderStyle) -> String {
	let mut out = String::new();
	write_grid(&mut out, table, style, &[]);
	out
}

pub fn render_outcome(outcome: &TableOutcome, style: RenderStyle) -> String {
	match outcome {
		TableOutcome::Table(table) => render_table(table, style),
		TableOutcome::NoExpressions => "No expressions to tabulate.\n".to_string(),
		TableOutcome::NoVariables => "No variables found, nothing to tabulate.\n".to_string(),
	}
}

pub fn render_equality(report: &EqualityReport, style: RenderStyle) -> String {
	let mut out = String::new();
	for step in &report.steps {
		let formula = match style {
			RenderStyle::MarkdownMath => format!("${}$", to_latex(&step.formula)),
			_ => step.formula.clone(),
		};
		let suspect = match (step.suspect, style) {
			(false, _) => String::new(),
			(true, RenderStyle::Colorized) => format!("  {}", "(suspect implication)".yellow()),
			(true, _) => "  (suspect implication)".to_string(),
		};
		let _ = writeln!(out, "{}. {}{}", step.index, formula, suspect);
	}
	let _ = writeln!(out);

	let table = match &report.table {
		Some(table) => table,
		None => {
			let _ = writeln!(out, "Fewer than two steps, nothing to compare.");
			return out;
		}
	};

	let marks: Vec<String> = report
		.mismatches
		.iter()
		.map(|mismatch| match (mismatch, style) {
			(false, _) => String::new(),
			(true, RenderStyle::Plain) => "  <- differs".to_string(),
			(true, RenderStyle::Colorized) => format!("  {}", "<- differs".red().bold()),
			(true, RenderStyle::MarkdownMath) => " $\\neq$".to_string(),
		})
		.collect();
	write_grid(&mut out, table, style, &marks);
	let _ = writeln!(out);

	let verdict = if report.all_equal {
		format!("All {} steps are equal.", report.steps.len())
	} else {
		format!(
			"Steps differ on {} of {} assignments.",
			report.mismatch_count,
			table.rows.len()
		)
	};
	match style {
		RenderStyle::Colorized if report.all_equal => {
			let _ = writeln!(out, "{}", verdict.as_str().green().bold());
		}
		RenderStyle::Colorized => {
			let _ = writeln!(out, "{}", verdict.as_str().red().bold());
		}
		RenderStyle::MarkdownMath => {
			let _ = writeln!(out, "**{}**", verdict);
		}
		RenderStyle::Plain => {
			let _ = writeln!(out, "{}", verdict);
		}
	}
	out
}
