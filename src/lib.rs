/*!
Truth tables for propositional formulas, and row-wise checks of derivations.

Native formulas are built from uppercase variables, the constants `1` and `0`, and
(tightest first) `!`, `&`, `|` and `==` (or `=`), with parentheses for grouping.
LaTeX notation is rewritten into this form by [latex], and a multi-step derivation
is split into its steps by [derivation].

```rust
use truthtab::latex::normalize;
use truthtab::truth_table::{build_table, TableOutcome};

let formula = normalize("(A \\lor B) \\rightarrow C");
assert_eq!(formula, "!(A | B) | C");

match build_table(&[formula], None).unwrap() {
	TableOutcome::Table(table) => assert_eq!(table.rows.len(), 8),
	_ => unreachable!(),
}
```

The library logs through the `log` facade, see [misc::log::targets].
*/

pub mod assignment;
pub mod config;
pub mod derivation;
pub mod error;
pub mod latex;
pub mod misc;
pub mod prop_tree;
pub mod render;
pub mod symbol;
pub mod truth_table;

pub use error::LogicError;
