//! Равносильные преобразования одной формулы. Чаще всего применяются к подвыражению через путь.
//!
//! Несоответствие формы формулы образцу и невыполненное условие (например, неравные операнды) это разные ошибки: `RuleError::ShapeMismatch` и `RuleError::PreconditionFailed`.

use crate::expr::Expression::{self, *};
use super::{Rule, RuleError, RuleResult};

pub(super) fn rules() -> Vec<Rule> {
	vec![
		Rule::equivalence("commutative_and", commutative_and, "a ∧ b ⇔ b ∧ a"),
		Rule::equivalence("commutative_or", commutative_or, "a ∨ b ⇔ b ∨ a"),
		Rule::equivalence("associative_and", associative_and, "(a ∧ b) ∧ c ⇔ a ∧ (b ∧ c)"),
		Rule::equivalence("associative_and_inverse", associative_and_inverse, "a ∧ (b ∧ c) ⇔ (a ∧ b) ∧ c"),
		Rule::equivalence("associative_or", associative_or, "(a ∨ b) ∨ c ⇔ a ∨ (b ∨ c)"),
		Rule::equivalence("associative_or_inverse", associative_or_inverse, "a ∨ (b ∨ c) ⇔ (a ∨ b) ∨ c"),
		Rule::equivalence("distributive_and", distributive_and, "a ∧ (b ∨ c) ⇔ (a ∧ b) ∨ (a ∧ c)"),
		Rule::equivalence("distributive_and_inverse", distributive_and_inverse, "(a ∧ b) ∨ (a ∧ c) ⇔ a ∧ (b ∨ c)"),
		Rule::equivalence("distributive_or", distributive_or, "a ∨ (b ∧ c) ⇔ (a ∨ b) ∧ (a ∨ c)"),
		Rule::equivalence("distributive_or_inverse", distributive_or_inverse, "(a ∨ b) ∧ (a ∨ c) ⇔ a ∨ (b ∧ c)"),
		Rule::equivalence("idempotent", idempotent, "a ∧ a ⇔ a\na ∨ a ⇔ a"),
		Rule::equivalence("absorption_and", absorption_and, "a ∧ (a ∨ b) ⇔ a"),
		Rule::equivalence("absorption_or", absorption_or, "a ∨ (a ∧ b) ⇔ a"),
		Rule::equivalence("demorgan_and", demorgan_and, "¬(a ∧ b) ⇔ ¬a ∨ ¬b"),
		Rule::equivalence("demorgan_and_inverse", demorgan_and_inverse, "¬a ∨ ¬b ⇔ ¬(a ∧ b)"),
		Rule::equivalence("demorgan_or", demorgan_or, "¬(a ∨ b) ⇔ ¬a ∧ ¬b"),
		Rule::equivalence("demorgan_or_inverse", demorgan_or_inverse, "¬a ∧ ¬b ⇔ ¬(a ∨ b)"),
		Rule::equivalence("negation", negation, "¬¬a ⇔ a"),
		Rule::equivalence("negation_inverse", negation_inverse, "a ⇔ ¬¬a"),
		Rule::equivalence("identity_and", identity_and, "a ∧ T ⇔ a"),
		Rule::equivalence("identity_or", identity_or, "a ∨ F ⇔ a"),
		Rule::equivalence("domination_and", domination_and, "a ∧ F ⇔ F"),
		Rule::equivalence("domination_or", domination_or, "a ∨ T ⇔ T"),
		Rule::equivalence("contradiction", contradiction, "a ∧ ¬a ⇔ F"),
		Rule::equivalence("excluded_middle", excluded_middle, "a ∨ ¬a ⇔ T"),
		Rule::equivalence("material_implication", material_implication, "a → b ⇔ ¬a ∨ b"),
		Rule::equivalence("material_implication_inverse", material_implication_inverse, "¬a ∨ b ⇔ a → b"),
		Rule::equivalence("biconditional_elimination", biconditional_elimination, "a ↔ b ⇔ (a → b) ∧ (b → a)"),
		Rule::equivalence("biconditional_elimination_inverse", biconditional_elimination_inverse, "(a → b) ∧ (b → a) ⇔ a ↔ b"),
		Rule::equivalence("xor_decomposition", xor_decomposition, "a ⊕ b ⇔ (a ∨ b) ∧ ¬(a ∧ b)"),
		Rule::equivalence("xor_decomposition_inverse", xor_decomposition_inverse, "(a ∨ b) ∧ ¬(a ∧ b) ⇔ a ⊕ b"),
	]
}

fn equal_operands(a: &Expression, b: &Expression) -> Result<(), RuleError> {
	if a == b {
		Ok(())
	} else {
		Err(RuleError::precondition(format!("operands `{}` and `{}` are not equal", a, b)))
	}
}

pub fn commutative_and(expr: &Expression) -> RuleResult {
	match expr {
		And { left, right } => Ok(And { left: right.clone(), right: left.clone() }),
		other => Err(RuleError::mismatch("a ∧ b", other)),
	}
}

pub fn commutative_or(expr: &Expression) -> RuleResult {
	match expr {
		Or { left, right } => Ok(Or { left: right.clone(), right: left.clone() }),
		other => Err(RuleError::mismatch("a ∨ b", other)),
	}
}

pub fn associative_and(expr: &Expression) -> RuleResult {
	const FORM: &str = "(a ∧ b) ∧ c";
	match expr {
		And { left, right: c } => match &**left {
			And { left: a, right: b } => Ok(And {
				left: a.clone(),
				right: Box::new(And { left: b.clone(), right: c.clone() }),
			}),
			_ => Err(RuleError::mismatch(FORM, expr)),
		},
		other => Err(RuleError::mismatch(FORM, other)),
	}
}

pub fn associative_and_inverse(expr: &Expression) -> RuleResult {
	const FORM: &str = "a ∧ (b ∧ c)";
	match expr {
		And { left: a, right } => match &**right {
			And { left: b, right: c } => Ok(And {
				left: Box::new(And { left: a.clone(), right: b.clone() }),
				right: c.clone(),
			}),
			_ => Err(RuleError::mismatch(FORM, expr)),
		},
		other => Err(RuleError::mismatch(FORM, other)),
	}
}

pub fn associative_or(expr: &Expression) -> RuleResult {
	const FORM: &str = "(a ∨ b) ∨ c";
	match expr {
		Or { left, right: c } => match &**left {
			Or { left: a, right: b } => Ok(Or {
				left: a.clone(),
				right: Box::new(Or { left: b.clone(), right: c.clone() }),
			}),
			_ => Err(RuleError::mismatch(FORM, expr)),
		},
		other => Err(RuleError::mismatch(FORM, other)),
	}
}

pub fn associative_or_inverse(expr: &Expression) -> RuleResult {
	const FORM: &str = "a ∨ (b ∨ c)";
	match expr {
		Or { left: a, right } => match &**right {
			Or { left: b, right: c } => Ok(Or {
				left: Box::new(Or { left: a.clone(), right: b.clone() }),
				right: c.clone(),
			}),
			_ => Err(RuleError::mismatch(FORM, expr)),
		},
		other => Err(RuleError::mismatch(FORM, other)),
	}
}

pub fn distributive_and(expr: &Expression) -> RuleResult {
	const FORM: &str = "a ∧ (b ∨ c)";
	match expr {
		And { left: a, right } => match &**right {
			Or { left: b, right: c } => Ok(Or {
				left: Box::new(And { left: a.clone(), right: b.clone() }),
				right: Box::new(And { left: a.clone(), right: c.clone() }),
			}),
			_ => Err(RuleError::mismatch(FORM, expr)),
		},
		other => Err(RuleError::mismatch(FORM, other)),
	}
}

pub fn distributive_and_inverse(expr: &Expression) -> RuleResult {
	const FORM: &str = "(a ∧ b) ∨ (a ∧ c)";
	match expr {
		Or { left, right } => match (&**left, &**right) {
			(And { left: a1, right: b }, And { left: a2, right: c }) => {
				equal_operands(a1, a2)?;
				Ok(And {
					left: a1.clone(),
					right: Box::new(Or { left: b.clone(), right: c.clone() }),
				})
			},
			_ => Err(RuleError::mismatch(FORM, expr)),
		},
		other => Err(RuleError::mismatch(FORM, other)),
	}
}

pub fn distributive_or(expr: &Expression) -> RuleResult {
	const FORM: &str = "a ∨ (b ∧ c)";
	match expr {
		Or { left: a, right } => match &**right {
			And { left: b, right: c } => Ok(And {
				left: Box::new(Or { left: a.clone(), right: b.clone() }),
				right: Box::new(Or { left: a.clone(), right: c.clone() }),
			}),
			_ => Err(RuleError::mismatch(FORM, expr)),
		},
		other => Err(RuleError::mismatch(FORM, other)),
	}
}

pub fn distributive_or_inverse(expr: &Expression) -> RuleResult {
	const FORM: &str = "(a ∨ b) ∧ (a ∨ c)";
	match expr {
		And { left, right } => match (&**left, &**right) {
			(Or { left: a1, right: b }, Or { left: a2, right: c }) => {
				equal_operands(a1, a2)?;
				Ok(Or {
					left: a1.clone(),
					right: Box::new(And { left: b.clone(), right: c.clone() }),
				})
			},
			_ => Err(RuleError::mismatch(FORM, expr)),
		},
		other => Err(RuleError::mismatch(FORM, other)),
	}
}

pub fn idempotent(expr: &Expression) -> RuleResult {
	match expr {
		And { left, right } | Or { left, right } => {
			equal_operands(left, right)?;
			Ok((**left).clone())
		},
		other => Err(RuleError::mismatch("a ∧ a", other)),
	}
}

pub fn absorption_and(expr: &Expression) -> RuleResult {
	const FORM: &str = "a ∧ (a ∨ b)";
	match expr {
		And { left, right } => match &**right {
			Or { left: inner, .. } => {
				equal_operands(left, inner)?;
				Ok((**left).clone())
			},
			_ => Err(RuleError::mismatch(FORM, expr)),
		},
		other => Err(RuleError::mismatch(FORM, other)),
	}
}

pub fn absorption_or(expr: &Expression) -> RuleResult {
	const FORM: &str = "a ∨ (a ∧ b)";
	match expr {
		Or { left, right } => match &**right {
			And { left: inner, .. } => {
				equal_operands(left, inner)?;
				Ok((**left).clone())
			},
			_ => Err(RuleError::mismatch(FORM, expr)),
		},
		other => Err(RuleError::mismatch(FORM, other)),
	}
}

pub fn demorgan_and(expr: &Expression) -> RuleResult {
	const FORM: &str = "¬(a ∧ b)";
	match expr {
		Not { operand } => match &**operand {
			And { left, right } => Ok(Or {
				left: Box::new(Not { operand: left.clone() }),
				right: Box::new(Not { operand: right.clone() }),
			}),
			_ => Err(RuleError::mismatch(FORM, expr)),
		},
		other => Err(RuleError::mismatch(FORM, other)),
	}
}

pub fn demorgan_and_inverse(expr: &Expression) -> RuleResult {
	const FORM: &str = "¬a ∨ ¬b";
	match expr {
		Or { left, right } => match (&**left, &**right) {
			(Not { operand: a }, Not { operand: b }) => Ok(Not {
				operand: Box::new(And { left: a.clone(), right: b.clone() }),
			}),
			_ => Err(RuleError::mismatch(FORM, expr)),
		},
		other => Err(RuleError::mismatch(FORM, other)),
	}
}

pub fn demorgan_or(expr: &Expression) -> RuleResult {
	const FORM: &str = "¬(a ∨ b)";
	match expr {
		Not { operand } => match &**operand {
			Or { left, right } => Ok(And {
				left: Box::new(Not { operand: left.clone() }),
				right: Box::new(Not { operand: right.clone() }),
			}),
			_ => Err(RuleError::mismatch(FORM, expr)),
		},
		other => Err(RuleError::mismatch(FORM, other)),
	}
}

pub fn demorgan_or_inverse(expr: &Expression) -> RuleResult {
	const FORM: &str = "¬a ∧ ¬b";
	match expr {
		And { left, right } => match (&**left, &**right) {
			(Not { operand: a }, Not { operand: b }) => Ok(Not {
				operand: Box::new(Or { left: a.clone(), right: b.clone() }),
			}),
			_ => Err(RuleError::mismatch(FORM, expr)),
		},
		other => Err(RuleError::mismatch(FORM, other)),
	}
}

pub fn negation(expr: &Expression) -> RuleResult {
	const FORM: &str = "¬¬a";
	match expr {
		Not { operand } => match &**operand {
			Not { operand: inner } => Ok((**inner).clone()),
			_ => Err(RuleError::mismatch(FORM, expr)),
		},
		other => Err(RuleError::mismatch(FORM, other)),
	}
}

pub fn negation_inverse(expr: &Expression) -> RuleResult {
	Ok(Expression::not(Expression::not(expr.clone())))
}

pub fn identity_and(expr: &Expression) -> RuleResult {
	match expr {
		And { left, right } => match &**right {
			True => Ok((**left).clone()),
			other => Err(RuleError::precondition(format!("right operand `{}` is not `T`", other))),
		},
		other => Err(RuleError::mismatch("a ∧ T", other)),
	}
}

pub fn identity_or(expr: &Expression) -> RuleResult {
	match expr {
		Or { left, right } => match &**right {
			False => Ok((**left).clone()),
			other => Err(RuleError::precondition(format!("right operand `{}` is not `F`", other))),
		},
		other => Err(RuleError::mismatch("a ∨ F", other)),
	}
}

pub fn domination_and(expr: &Expression) -> RuleResult {
	match expr {
		And { right, .. } => match &**right {
			False => Ok(False),
			other => Err(RuleError::precondition(format!("right operand `{}` is not `F`", other))),
		},
		other => Err(RuleError::mismatch("a ∧ F", other)),
	}
}

pub fn domination_or(expr: &Expression) -> RuleResult {
	match expr {
		Or { right, .. } => match &**right {
			True => Ok(True),
			other => Err(RuleError::precondition(format!("right operand `{}` is not `T`", other))),
		},
		other => Err(RuleError::mismatch("a ∨ T", other)),
	}
}

fn negates(left: &Expression, operand: &Expression) -> Result<(), RuleError> {
	if *operand == *left {
		Ok(())
	} else {
		Err(RuleError::precondition(format!("`{}` is not the negation of `{}`", Expression::not(operand.clone()), left)))
	}
}

pub fn contradiction(expr: &Expression) -> RuleResult {
	const FORM: &str = "a ∧ ¬a";
	match expr {
		And { left, right } => match &**right {
			Not { operand } => {
				negates(left, operand)?;
				Ok(False)
			},
			_ => Err(RuleError::mismatch(FORM, expr)),
		},
		other => Err(RuleError::mismatch(FORM, other)),
	}
}

pub fn excluded_middle(expr: &Expression) -> RuleResult {
	const FORM: &str = "a ∨ ¬a";
	match expr {
		Or { left, right } => match &**right {
			Not { operand } => {
				negates(left, operand)?;
				Ok(True)
			},
			_ => Err(RuleError::mismatch(FORM, expr)),
		},
		other => Err(RuleError::mismatch(FORM, other)),
	}
}

pub fn material_implication(expr: &Expression) -> RuleResult {
	match expr {
		Implies { left, right } => Ok(Or {
			left: Box::new(Not { operand: left.clone() }),
			right: right.clone(),
		}),
		other => Err(RuleError::mismatch("a → b", other)),
	}
}

pub fn material_implication_inverse(expr: &Expression) -> RuleResult {
	const FORM: &str = "¬a ∨ b";
	match expr {
		Or { left, right } => match &**left {
			Not { operand } => Ok(Implies { left: operand.clone(), right: right.clone() }),
			_ => Err(RuleError::mismatch(FORM, expr)),
		},
		other => Err(RuleError::mismatch(FORM, other)),
	}
}

pub fn biconditional_elimination(expr: &Expression) -> RuleResult {
	match expr {
		Iff { left, right } => Ok(And {
			left: Box::new(Implies { left: left.clone(), right: right.clone() }),
			right: Box::new(Implies { left: right.clone(), right: left.clone() }),
		}),
		other => Err(RuleError::mismatch("a ↔ b", other)),
	}
}

pub fn biconditional_elimination_inverse(expr: &Expression) -> RuleResult {
	const FORM: &str = "(a → b) ∧ (b → a)";
	match expr {
		And { left, right } => match (&**left, &**right) {
			(Implies { left: a1, right: b1 }, Implies { left: b2, right: a2 }) => {
				equal_operands(a1, a2)?;
				equal_operands(b1, b2)?;
				Ok(Iff { left: a1.clone(), right: b1.clone() })
			},
			_ => Err(RuleError::mismatch(FORM, expr)),
		},
		other => Err(RuleError::mismatch(FORM, other)),
	}
}

pub fn xor_decomposition(expr: &Expression) -> RuleResult {
	match expr {
		Xor { left, right } => Ok(And {
			left: Box::new(Or { left: left.clone(), right: right.clone() }),
			right: Box::new(Not {
				operand: Box::new(And { left: left.clone(), right: right.clone() }),
			}),
		}),
		other => Err(RuleError::mismatch("a ⊕ b", other)),
	}
}

pub fn xor_decomposition_inverse(expr: &Expression) -> RuleResult {
	const FORM: &str = "(a ∨ b) ∧ ¬(a ∧ b)";
	match expr {
		And { left, right } => match (&**left, &**right) {
			(Or { left: a1, right: b1 }, Not { operand }) => match &**operand {
				And { left: a2, right: b2 } => {
					equal_operands(a1, a2)?;
					equal_operands(b1, b2)?;
					Ok(Xor { left: a1.clone(), right: b1.clone() })
				},
				_ => Err(RuleError::mismatch(FORM, expr)),
			},
			_ => Err(RuleError::mismatch(FORM, expr)),
		},
		other => Err(RuleError::mismatch(FORM, other)),
	}
}
