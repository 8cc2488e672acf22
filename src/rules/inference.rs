//! Правила вывода: из одной или двух посылок получается новая формула.

use crate::expr::Expression::{self, *};
use super::{Handler, Rule, RuleError, RuleResult};

pub(super) fn rules() -> Vec<Rule> {
	vec![
		Rule::inference("modus_ponens", Handler::Binary(modus_ponens), "P → Q, P ⊢ Q\nIf an implication holds and its antecedent holds, its consequent holds."),
		Rule::inference("modus_tollens", Handler::Binary(modus_tollens), "P → Q, ¬Q ⊢ ¬P\nIf an implication holds and its consequent is false, its antecedent is false."),
		Rule::inference("hypothetical_syllogism", Handler::Binary(hypothetical_syllogism), "P → Q, Q → R ⊢ P → R\nImplications chain."),
		Rule::inference("disjunctive_syllogism", Handler::Binary(disjunctive_syllogism), "P ∨ Q, ¬P ⊢ Q\nIf one side of a disjunction is false, the other side holds."),
		Rule::inference("addition", Handler::Binary(addition), "P, Q ⊢ P ∨ Q\nAny formula Q may be added to P as a disjunct."),
		Rule::inference("simplification", Handler::Unary(simplification), "P ∧ Q ⊢ P\nThe left side of a conjunction holds."),
		Rule::inference("conjunction", Handler::Binary(conjunction), "P, Q ⊢ P ∧ Q\nTwo formulas that hold may be joined."),
		Rule::inference("resolution", Handler::Binary(resolution), "P ∨ Q, ¬P ∨ R ⊢ Q ∨ R\nComplementary disjuncts cancel out."),
	]
}

pub fn modus_ponens(implication: &Expression, premise: &Expression) -> RuleResult {
	match implication {
		Implies { left, right } if **left == *premise => Ok((**right).clone()),
		Implies { left, .. } => Err(RuleError::precondition(format!(
			"`{}` is not the antecedent of the implication, expected `{}`", premise, left
		))),
		other => Err(RuleError::mismatch("P → Q", other)),
	}
}

pub fn modus_tollens(implication: &Expression, negation: &Expression) -> RuleResult {
	match (implication, negation) {
		(Implies { left, right }, Not { operand }) => if operand == right {
			Ok(Not { operand: left.clone() })
		} else {
			Err(RuleError::precondition(format!(
				"`{}` does not negate the consequent `{}` of the implication", negation, right
			)))
		},
		(Implies { .. }, other) => Err(RuleError::mismatch("¬Q", other)),
		(other, _) => Err(RuleError::mismatch("P → Q", other)),
	}
}

pub fn hypothetical_syllogism(first: &Expression, second: &Expression) -> RuleResult {
	match (first, second) {
		(Implies { left: p, right: q1 }, Implies { left: q2, right: r }) => if q1 == q2 {
			Ok(Implies { left: p.clone(), right: r.clone() })
		} else {
			Err(RuleError::precondition(format!(
				"the consequent `{}` of the first implication is not the antecedent `{}` of the second", q1, q2
			)))
		},
		(Implies { .. }, other) => Err(RuleError::mismatch("Q → R", other)),
		(other, _) => Err(RuleError::mismatch("P → Q", other)),
	}
}

pub fn disjunctive_syllogism(disjunction: &Expression, negation: &Expression) -> RuleResult {
	match (disjunction, negation) {
		(Or { left, right }, Not { operand }) => if operand == left {
			Ok((**right).clone())
		} else {
			Err(RuleError::precondition(format!(
				"`{}` does not negate the left side `{}` of the disjunction", negation, left
			)))
		},
		(Or { .. }, other) => Err(RuleError::mismatch("¬P", other)),
		(other, _) => Err(RuleError::mismatch("P ∨ Q", other)),
	}
}

pub fn addition(premise: &Expression, addend: &Expression) -> RuleResult {
	Ok(Expression::or(premise.clone(), addend.clone()))
}

pub fn simplification(conjunction: &Expression) -> RuleResult {
	match conjunction {
		And { left, .. } => Ok((**left).clone()),
		other => Err(RuleError::mismatch("P ∧ Q", other)),
	}
}

pub fn conjunction(left: &Expression, right: &Expression) -> RuleResult {
	Ok(Expression::and(left.clone(), right.clone()))
}

pub fn resolution(first: &Expression, second: &Expression) -> RuleResult {
	match (first, second) {
		(Or { left: p, right: q }, Or { left: not_p, right: r }) => match &**not_p {
			Not { operand } if operand == p => Ok(Or { left: q.clone(), right: r.clone() }),
			Not { .. } => Err(RuleError::precondition(format!(
				"the left side `{}` of the second disjunction is not the negation of `{}`", not_p, p
			))),
			_ => Err(RuleError::mismatch("¬P ∨ R", second)),
		},
		(Or { .. }, other) => Err(RuleError::mismatch("¬P ∨ R", other)),
		(other, _) => Err(RuleError::mismatch("P ∨ Q", other)),
	}
}
