use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use log::debug;
use thiserror::Error;

use crate::expr::Expression;

pub mod equivalence;
pub mod inference;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum RuleCategory {
	/// Выводит новую формулу из одной или двух посылок.
	Inference,
	/// Переписывает одну формулу в равносильную.
	Equivalence,
}

impl fmt::Display for RuleCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			RuleCategory::Inference => "inference",
			RuleCategory::Equivalence => "equivalence",
		})
	}
}

/// Почему правило не применилось к посылкам.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum RuleError {
	#[error("expected a formula of the form `{expected}`, found {} `{found}`", .found.kind())]
	ShapeMismatch {
		expected: &'static str,
		found: Expression,
	},
	#[error("{reason}")]
	PreconditionFailed {
		reason: String,
	},
	#[error("expected {expected} premise(s), got {given}")]
	WrongArity {
		expected: usize,
		given: usize,
	},
}

impl RuleError {
	pub fn mismatch(expected: &'static str, found: &Expression) -> Self {
		RuleError::ShapeMismatch { expected, found: found.clone() }
	}

	pub fn precondition(reason: impl Into<String>) -> Self {
		RuleError::PreconditionFailed { reason: reason.into() }
	}
}

pub type RuleResult = Result<Expression, RuleError>;

/// Функция правила. Её вид задаёт арность правила.
#[derive(Clone, Copy)]
pub enum Handler {
	Unary(fn(&Expression) -> RuleResult),
	Binary(fn(&Expression, &Expression) -> RuleResult),
}

impl Handler {
	pub fn arity(&self) -> usize {
		match self {
			Handler::Unary(_) => 1,
			Handler::Binary(_) => 2,
		}
	}
}

impl fmt::Debug for Handler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Handler({})", self.arity())
	}
}

#[derive(Clone, Debug)]
pub struct Rule {
	pub name: &'static str,
	pub category: RuleCategory,
	pub handler: Handler,
	pub description: &'static str,
}

impl Rule {
	pub fn inference(name: &'static str, handler: Handler, description: &'static str) -> Self {
		Rule { name, category: RuleCategory::Inference, handler, description }
	}

	pub fn equivalence(name: &'static str, handler: fn(&Expression) -> RuleResult, description: &'static str) -> Self {
		Rule { name, category: RuleCategory::Equivalence, handler: Handler::Unary(handler), description }
	}

	pub fn arity(&self) -> usize {
		self.handler.arity()
	}

	pub fn apply(&self, premises: &[&Expression]) -> RuleResult {
		match (self.handler, premises) {
			(Handler::Unary(f), [a]) => f(a),
			(Handler::Binary(f), [a, b]) => f(a, b),
			_ => Err(RuleError::WrongArity { expected: self.arity(), given: premises.len() }),
		}
	}
}

#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("rule `{0}` does not exist")]
pub struct UnknownRule(pub String);

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ApplyRuleError {
	#[error(transparent)]
	UnknownRule(#[from] UnknownRule),
	#[error("rule `{rule}` is not applicable: {error}")]
	NotApplicable {
		rule: &'static str,
		error: RuleError,
	},
}

/// Таблица всех правил. Строится один раз и дальше не меняется.
#[derive(Clone, Debug)]
pub struct RuleBook(BTreeMap<&'static str, Rule>);

impl RuleBook {
	pub fn new() -> Self {
		RuleBook(
			inference::rules()
				.into_iter()
				.chain(equivalence::rules())
				.map(|rule| (rule.name, rule))
				.collect()
		)
	}

	pub fn get(&self, name: &str) -> Result<&Rule, UnknownRule> {
		self.0.get(name).ok_or_else(|| UnknownRule(name.to_string()))
	}

	/// Применить правило по имени. Опечатка в имени и неподходящие посылки различаются видом ошибки.
	pub fn apply(&self, name: &str, premises: &[&Expression]) -> Result<Expression, ApplyRuleError> {
		let rule = self.get(name)?;
		let result = rule.apply(premises).map_err(|error| ApplyRuleError::NotApplicable { rule: rule.name, error })?;
		debug!("{} applied to [{}]: {}", rule.name, premises.iter().join("; "), result);
		Ok(result)
	}

	pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.0.keys().copied()
	}

	pub fn rules(&self) -> impl Iterator<Item = &Rule> {
		self.0.values()
	}

	pub fn explain(&self, name: &str) -> Result<String, UnknownRule> {
		let rule = self.get(name)?;
		if rule.description.is_empty() {
			Ok(format!("No explanation available for rule `{}`", name))
		} else {
			Ok(rule.description.to_string())
		}
	}
}

impl Default for RuleBook {
	fn default() -> Self {
		Self::new()
	}
}
