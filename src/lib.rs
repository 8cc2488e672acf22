pub mod export;
pub mod expr;
pub mod parsing;
pub mod proof;
pub mod rules;
pub mod session;
pub mod utils;

pub use crate::expr::{Expression, Notation};
pub use crate::parsing::{parse_expression, ParseError};
pub use crate::proof::{ProofError, ProofLog, ProofState, ProofStep};
pub use crate::rules::RuleBook;
pub use crate::session::Session;
