/*!
Configuration of a run.

The core operations take only the parts they need (a [Normalizer](crate::latex::Normalizer)
reads the [ScopePolicy], the driver reads the variable limit); presentation reads the style.
*/

/// How an implication whose antecedent cannot be located is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ScopePolicy {
	#[default]
	/// Rewrite the arrow as a plain disjunction and record a diagnostic
	Degrade,
	/// Fail with `UnresolvableImplicationScope`
	Reject,
}

/// Output format for tables and equality reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RenderStyle {
	#[default]
	/// Aligned columns of T and F
	Plain,
	/// Terminal colours
	Colorized,
	/// Markdown table with LaTeX headers and coloured glyphs
	MarkdownMath,
}

pub mod defaults {
	/// Variable limit applied by the command line.
	pub const CLI_MAX_VARIABLES: usize = 16;
}

#[derive(Clone, Debug, Default)]
pub struct Config {
	pub style: RenderStyle,

	pub scope_policy: ScopePolicy,

	/// Refuse tables over more variables than this. `None` is unlimited.
	pub max_variables: Option<usize>,

	/// Normalize table formulas as LaTeX before evaluating them.
	pub latex: bool,
}

impl Config {
	pub fn normalizer(&self) -> crate::latex::Normalizer {
		crate::latex::Normalizer {
			scope_policy: self.scope_policy,
		}
	}
}
