use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use thiserror::Error;
use truthtab::config::{defaults, Config, RenderStyle, ScopePolicy};
use truthtab::derivation::split_steps;
use truthtab::render::{render_equality, render_outcome};
use truthtab::truth_table::{build_table, check_equality};
use truthtab::LogicError;

/// Truth tables for propositional formulas
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
	/// Output format
	#[arg(long, value_enum, default_value_t = RenderStyle::Plain, global = true)]
	style: RenderStyle,

	/// Fail when the antecedent of an implication cannot be found, instead of reading the arrow as a disjunction
	#[arg(long, global = true)]
	strict: bool,

	/// Refuse formulas over more variables than this
	#[arg(long, default_value_t = defaults::CLI_MAX_VARIABLES, global = true)]
	max_variables: usize,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Tabulate one or more formulas over their combined variables
	Table {
		/// Read the formulas as LaTeX
		#[arg(long)]
		latex: bool,

		#[arg(required = true)]
		formulas: Vec<String>,
	},
	/// Check that every step of a LaTeX derivation agrees with the first on every assignment
	Equal {
		/// Read the derivation from a file
		#[arg(short, long)]
		file: Option<PathBuf>,

		/// The derivation, read from stdin when neither this nor a file is given
		derivation: Option<String>,
	},
}

#[derive(Error, Debug)]
enum CliError {
	#[error("failed to read the derivation: {0}")]
	Io(#[from] std::io::Error),
	#[error(transparent)]
	Logic(#[from] LogicError),
}

fn read_derivation(file: &Option<PathBuf>, derivation: &Option<String>) -> Result<String, CliError> {
	match (file, derivation) {
		(Some(path), _) => Ok(std::fs::read_to_string(path)?),
		(None, Some(text)) => Ok(text.clone()),
		(None, None) => {
			let mut text = String::new();
			std::io::stdin().read_to_string(&mut text)?;
			Ok(text)
		}
	}
}

fn run(command: &Command, config: &Config) -> Result<i32, CliError> {
	let normalizer = config.normalizer();
	match command {
		Command::Table { formulas, .. } => {
			let formulas = if config.latex {
				let mut native = Vec::with_capacity(formulas.len());
				for formula in formulas {
					let normalized = normalizer.normalize(formula)?;
					if normalized.is_suspect() {
						eprintln!("warning: '{}' contains an implication read as a disjunction", formula);
					}
					native.push(normalized.formula);
				}
				native
			} else {
				formulas.clone()
			};
			let outcome = build_table(&formulas, config.max_variables)?;
			print!("{}", render_outcome(&outcome, config.style));
			Ok(0)
		}
		Command::Equal { file, derivation } => {
			let text = read_derivation(file, derivation)?;
			let steps = split_steps(&text, &normalizer)?;
			let report = check_equality(&steps, config.max_variables)?;
			print!("{}", render_equality(&report, config.style));
			Ok(if report.all_equal { 0 } else { 1 })
		}
	}
}

fn main() {
	env_logger::init();

	let args = Args::parse();
	let config = Config {
		style: args.style,
		scope_policy: match args.strict {
			true => ScopePolicy::Reject,
			false => ScopePolicy::Degrade,
		},
		max_variables: Some(args.max_variables),
		latex: matches!(args.command, Command::Table { latex: true, .. }),
	};

	let code = match run(&args.command, &config) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e}");
			2
		}
	};
	std::process::exit(code);
}
