use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use log::{debug, info};
use petgraph::{graph::NodeIndex, Direction, Graph};
use thiserror::Error;

use crate::expr::{ExprPathOwned, Expression, PositionError};
use crate::parsing::parse_reference;
use crate::rules::{ApplyRuleError, RuleBook};

/// Метка шага-допущения.
pub const ASSUMPTION: &str = "assumption";

/// Шаг доказательства. Номера посылок `premises` считаются с нуля.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProofStep {
	pub result: Expression,
	pub rule: String,
	pub premises: Vec<usize>,
}

impl ProofStep {
	pub fn assumption(result: Expression) -> Self {
		ProofStep {
			result,
			rule: ASSUMPTION.to_string(),
			premises: Vec::new(),
		}
	}

	pub fn is_assumption(&self) -> bool {
		self.premises.is_empty() && self.rule == ASSUMPTION
	}
}

impl fmt::Display for ProofStep {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.premises.is_empty() {
			write!(f, "{}\t\t({})", self.result, self.rule)
		} else {
			write!(
				f,
				"{}\t\t({} of {})",
				self.result,
				self.rule.replace('_', " "),
				self.premises.iter().map(|premise| premise + 1).join(", ")
			)
		}
	}
}

/// Ссылка на шаг или на часть его формулы: `2` или `2.left.right`. Номер шага считается с единицы.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Reference {
	pub step: usize,
	pub path: ExprPathOwned,
}

impl Reference {
	pub fn is_whole(&self) -> bool {
		self.path.as_path().is_empty()
	}
}

impl fmt::Display for Reference {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_whole() {
			write!(f, "{}", self.step)
		} else {
			write!(f, "{}.{}", self.step, self.path)
		}
	}
}

impl FromStr for Reference {
	type Err = peg::error::ParseError<peg::str::LineCol>;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		parse_reference(s)
	}
}

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ProofError {
	#[error(transparent)]
	Rule(#[from] ApplyRuleError),
	#[error("no targets specified")]
	NoTargets,
	#[error("subexpression target `{0}` must be the only target")]
	MixedTargets(String),
	#[error("malformed step reference `{0}`")]
	MalformedReference(String),
	#[error("step {step} does not exist, the proof has {count} steps")]
	StepOutOfRange {
		step: usize,
		count: usize,
	},
	#[error("step {step} has no subexpression at `{path}`")]
	PathNotFound {
		step: usize,
		path: ExprPathOwned,
	},
	#[error("nothing to undo")]
	NothingToUndo,
	#[error("step {step} is an assumption and cannot be deleted")]
	AssumptionProtected {
		step: usize,
	},
	#[error("step {step} is used by step(s) {}", join_steps(.dependents))]
	StepInUse {
		step: usize,
		dependents: Vec<usize>,
	},
}

fn join_steps(steps: &[usize]) -> String {
	steps.iter().join(", ")
}

/// Итог успешного `apply`: номер нового шага (с единицы) и достигнута ли цель.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Applied {
	pub step: usize,
	pub goal_reached: bool,
}

/// Состояние доказательства. Первые `assumptions.len()` шагов всегда являются допущениями.
#[derive(Clone, Debug)]
pub struct ProofState {
	/// Допущения, с которыми доказательство создано. К ним возвращает `reset`.
	initial: Vec<Expression>,
	assumptions: Vec<Expression>,
	goal: Option<Expression>,
	steps: Vec<ProofStep>,
	rules: RuleBook,
}

impl ProofState {
	pub fn new(assumptions: Vec<Expression>, goal: Option<Expression>) -> Self {
		let steps = assumptions.iter().cloned().map(ProofStep::assumption).collect();
		ProofState {
			initial: assumptions.clone(),
			assumptions,
			goal,
			steps,
			rules: RuleBook::new(),
		}
	}

	pub fn assumptions(&self) -> &[Expression] {
		&self.assumptions
	}

	pub fn goal(&self) -> Option<&Expression> {
		self.goal.as_ref()
	}

	pub fn steps(&self) -> &[ProofStep] {
		&self.steps
	}

	pub fn rules(&self) -> &RuleBook {
		&self.rules
	}

	/// Перевести номер шага с единицы в индекс.
	fn index_of(&self, step: usize) -> Result<usize, ProofError> {
		if step >= 1 && step <= self.steps.len() {
			Ok(step - 1)
		} else {
			Err(ProofError::StepOutOfRange { step, count: self.steps.len() })
		}
	}

	pub fn step(&self, step: usize) -> Result<&ProofStep, ProofError> {
		let index = self.index_of(step)?;
		Ok(&self.steps[index])
	}

	/// Применить правило. Цели это либо номера шагов, либо одна ссылка на подвыражение `n.path`.
	///
	/// При ошибке состояние не меняется.
	pub fn apply<S: AsRef<str>>(&mut self, rule: &str, targets: &[S]) -> Result<Applied, ProofError> {
		let references = targets
			.iter()
			.map(|target| {
				let target = target.as_ref();
				parse_reference(target).map_err(|_| ProofError::MalformedReference(target.to_string()))
			})
			.collect::<Result<Vec<_>, _>>()?;

		let step = match references.as_slice() {
			[] => return Err(ProofError::NoTargets),
			[single] if !single.is_whole() => self.rewrite_at(rule, single)?,
			several => {
				if let Some(path) = several.iter().find(|reference| !reference.is_whole()) {
					return Err(ProofError::MixedTargets(path.to_string()));
				}
				self.derive(rule, several)?
			},
		};

		debug!("step {}: {}", self.steps.len() + 1, step);
		self.steps.push(step);
		let goal_reached = self.is_complete();
		if goal_reached {
			info!("goal reached at step {}", self.steps.len());
		}
		Ok(Applied { step: self.steps.len(), goal_reached })
	}

	fn derive(&self, rule: &str, references: &[Reference]) -> Result<ProofStep, ProofError> {
		let indices = references
			.iter()
			.map(|reference| self.index_of(reference.step))
			.collect::<Result<Vec<_>, _>>()?;
		let premises: Vec<&Expression> = indices.iter().map(|&index| &self.steps[index].result).collect();
		let result = self.rules.apply(rule, &premises)?;
		Ok(ProofStep {
			result,
			rule: rule.to_string(),
			premises: indices,
		})
	}

	/// Переписать копию формулы шага в одном месте. Сам шаг не меняется.
	fn rewrite_at(&self, rule: &str, reference: &Reference) -> Result<ProofStep, ProofError> {
		let index = self.index_of(reference.step)?;
		let path = reference.path.as_path();
		let not_found = |error: PositionError| ProofError::PathNotFound {
			step: reference.step,
			path: ExprPathOwned(reference.path.cut_to_error(error).0.to_vec()),
		};

		let mut result = self.steps[index].result.clone();
		let rewritten = self.rules.apply(rule, &[result.get_ref(path).map_err(not_found)?])?;
		result.set(path, rewritten).map_err(not_found)?;

		Ok(ProofStep {
			result,
			rule: format!("{} at {}", rule, reference.path),
			premises: vec![index],
		})
	}

	/// Добавить допущение в конец блока допущений. Возвращает его номер с единицы.
	pub fn assume(&mut self, expr: Expression) -> usize {
		let boundary = self.assumptions.len();
		for step in &mut self.steps[boundary..] {
			for premise in &mut step.premises {
				if *premise >= boundary {
					*premise += 1;
				}
			}
		}
		self.steps.insert(boundary, ProofStep::assumption(expr.clone()));
		self.assumptions.push(expr);
		debug!("assumption {} added", boundary + 1);
		boundary + 1
	}

	/// Заменить цель, вернуть прежнюю.
	pub fn set_goal(&mut self, goal: Expression) -> Option<Expression> {
		debug!("goal set to {}", goal);
		self.goal.replace(goal)
	}

	pub fn undo(&mut self) -> Result<ProofStep, ProofError> {
		if self.steps.len() <= self.assumptions.len() {
			return Err(ProofError::NothingToUndo);
		}
		self.steps.pop().ok_or(ProofError::NothingToUndo)
	}

	/// Удалить шаг по номеру с единицы. Номера посылок у следующих шагов сдвигаются.
	pub fn delete(&mut self, step: usize) -> Result<ProofStep, ProofError> {
		let index = self.index_of(step)?;
		if index < self.assumptions.len() {
			return Err(ProofError::AssumptionProtected { step });
		}
		let dependents = self.dependents(step)?;
		if !dependents.is_empty() {
			return Err(ProofError::StepInUse { step, dependents });
		}

		let removed = self.steps.remove(index);
		for later in &mut self.steps[index..] {
			for premise in &mut later.premises {
				if *premise > index {
					*premise -= 1;
				}
			}
		}
		debug!("step {} deleted", step);
		Ok(removed)
	}

	/// Вернуться к допущениям, с которыми доказательство создано. Добавленные через `assume` допущения отбрасываются.
	pub fn reset(&mut self) {
		self.assumptions = self.initial.clone();
		self.steps = self.assumptions.iter().cloned().map(ProofStep::assumption).collect();
		debug!("proof reset to {} assumptions", self.assumptions.len());
	}

	/// Граф зависимостей: ребро идёт от посылки к шагу, который её использует.
	fn dependency_graph(&self) -> Graph<(), ()> {
		let mut graph = Graph::new();
		for _ in &self.steps {
			graph.add_node(());
		}
		for (index, step) in self.steps.iter().enumerate() {
			for &premise in &step.premises {
				graph.add_edge(NodeIndex::new(premise), NodeIndex::new(index), ());
			}
		}
		graph
	}

	/// Номера шагов (с единицы), которые используют шаг `step` как посылку.
	pub fn dependents(&self, step: usize) -> Result<Vec<usize>, ProofError> {
		let index = self.index_of(step)?;
		Ok(self
			.dependency_graph()
			.neighbors_directed(NodeIndex::new(index), Direction::Outgoing)
			.map(|node| node.index() + 1)
			.sorted()
			.dedup()
			.collect())
	}

	/// Результат последнего шага совпадает с целью.
	pub fn is_complete(&self) -> bool {
		match (&self.goal, self.steps.last()) {
			(Some(goal), Some(last)) => last.result == *goal,
			_ => false,
		}
	}

	pub fn log(&self) -> ProofLog<'_> {
		ProofLog {
			assumption_count: self.assumptions.len(),
			goal: self.goal.as_ref(),
			steps: &self.steps,
		}
	}
}

/// Доказательство только для чтения, например для экспорта.
#[derive(Clone, Copy, Debug)]
pub struct ProofLog<'a> {
	pub assumption_count: usize,
	pub goal: Option<&'a Expression>,
	pub steps: &'a [ProofStep],
}

impl<'a> ProofLog<'a> {
	pub fn assumptions(&self) -> impl Iterator<Item = (usize, &'a ProofStep)> {
		self.steps.iter().take(self.assumption_count).enumerate().map(|(index, step)| (index + 1, step))
	}

	/// Выведенные шаги вместе с их номерами во всём доказательстве.
	pub fn derived(&self) -> impl Iterator<Item = (usize, &'a ProofStep)> {
		let skip = self.assumption_count;
		self.steps.iter().enumerate().skip(skip).map(|(index, step)| (index + 1, step))
	}

	pub fn is_complete(&self) -> bool {
		match (self.goal, self.steps.last()) {
			(Some(goal), Some(last)) => last.result == *goal,
			_ => false,
		}
	}
}

impl fmt::Display for ProofLog<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "Proof Steps:")?;
		for (number, step) in self.steps.iter().enumerate() {
			writeln!(f, "  {}. {}", number + 1, step)?;
		}
		match self.goal {
			Some(goal) => write!(f, "Goal: {}", goal),
			None => write!(f, "Goal: not set"),
		}
	}
}
