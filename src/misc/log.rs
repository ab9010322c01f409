/*!
Targets for the `log` macros called throughout the library.

No logger is installed by the library, the binary uses `env_logger`.
*/

pub mod targets {
	/// Rewrites made while normalizing LaTeX input.
	pub const NORMALIZE: &str = "normalize";

	/// Cleaning and splitting of derivations.
	pub const SPLIT: &str = "split";

	pub const EVALUATE: &str = "evaluate";

	/// Table and equality construction.
	pub const TABLE: &str = "table";
}
