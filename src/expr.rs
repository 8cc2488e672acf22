use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use thiserror::Error;

/// Формула логики высказываний. Набор вариантов закрыт, каждый вариант сам объявляет свои дочерние слоты (см. `ExpressionKind::slots`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Expression {
	/// Пропозициональная переменная. В выражении выглядит как: `P`, `Q`, `rain`.
	Var {
		name: String
	},

	/// `¬a`
	Not {
		operand: Box<Expression>
	},

	/// `a ∧ b`
	And {
		left: Box<Expression>,
		right: Box<Expression>,
	},

	/// `a ∨ b`
	Or {
		left: Box<Expression>,
		right: Box<Expression>,
	},

	/// `a → b`
	Implies {
		left: Box<Expression>,
		right: Box<Expression>,
	},

	/// `a ↔ b`
	Iff {
		left: Box<Expression>,
		right: Box<Expression>,
	},

	/// `a ⊕ b`
	Xor {
		left: Box<Expression>,
		right: Box<Expression>,
	},

	/// Истина, `T`.
	True,

	/// Ложь, `F`.
	False,
}

/// Вид выражения без его содержимого.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Copy)]
pub enum ExpressionKind {
	Var,
	Not,
	And,
	Or,
	Implies,
	Iff,
	Xor,
	True,
	False,
}

impl From<&Expression> for ExpressionKind {
	fn from(expr: &Expression) -> Self {
		use Expression::*;

		match expr {
			Var { .. } => ExpressionKind::Var,
			Not { .. } => ExpressionKind::Not,
			And { .. } => ExpressionKind::And,
			Or { .. } => ExpressionKind::Or,
			Implies { .. } => ExpressionKind::Implies,
			Iff { .. } => ExpressionKind::Iff,
			Xor { .. } => ExpressionKind::Xor,
			True => ExpressionKind::True,
			False => ExpressionKind::False,
		}
	}
}

impl ExpressionKind {
	/// Слоты, в которые можно спуститься из выражения этого вида.
	pub fn slots(self) -> &'static [Slot] {
		use ExpressionKind::*;

		match self {
			Not => &[Slot::Operand],
			And | Or | Implies | Iff | Xor => &[Slot::Left, Slot::Right],
			Var | True | False => &[],
		}
	}

	/// Атомарные выражения при печати не оборачиваются в скобки.
	pub fn is_atomic(self) -> bool {
		use ExpressionKind::*;

		matches!(self, Var | Not | True | False)
	}
}

impl fmt::Display for ExpressionKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		use ExpressionKind::*;

		let name = match self {
			Var => "variable",
			Not => "negation",
			And => "conjunction",
			Or => "disjunction",
			Implies => "implication",
			Iff => "biconditional",
			Xor => "exclusive disjunction",
			True => "true",
			False => "false",
		};
		f.write_str(name)
	}
}

impl Expression {
	pub fn var(name: impl Into<String>) -> Self {
		Expression::Var { name: name.into() }
	}

	pub fn not(operand: Expression) -> Self {
		Expression::Not { operand: Box::new(operand) }
	}

	pub fn and(left: Expression, right: Expression) -> Self {
		Expression::And { left: Box::new(left), right: Box::new(right) }
	}

	pub fn or(left: Expression, right: Expression) -> Self {
		Expression::Or { left: Box::new(left), right: Box::new(right) }
	}

	pub fn implies(left: Expression, right: Expression) -> Self {
		Expression::Implies { left: Box::new(left), right: Box::new(right) }
	}

	pub fn iff(left: Expression, right: Expression) -> Self {
		Expression::Iff { left: Box::new(left), right: Box::new(right) }
	}

	pub fn xor(left: Expression, right: Expression) -> Self {
		Expression::Xor { left: Box::new(left), right: Box::new(right) }
	}

	pub fn kind(&self) -> ExpressionKind {
		ExpressionKind::from(self)
	}

	/// Оба операнда бинарной связки.
	pub fn operands(&self) -> Option<(&Expression, &Expression)> {
		use Expression::*;

		match self {
			And { left, right } |
			Or { left, right } |
			Implies { left, right } |
			Iff { left, right } |
			Xor { left, right } => Some((&**left, &**right)),

			Var { .. } |
			Not { .. } |
			True |
			False => None,
		}
	}

	fn operands_mut(&mut self) -> Option<(&mut Expression, &mut Expression)> {
		use Expression::*;

		match self {
			And { left, right } |
			Or { left, right } |
			Implies { left, right } |
			Iff { left, right } |
			Xor { left, right } => Some((&mut **left, &mut **right)),

			Var { .. } |
			Not { .. } |
			True |
			False => None,
		}
	}

	pub fn child(&self, slot: Slot) -> Option<&Expression> {
		match slot {
			Slot::Operand => match self {
				Expression::Not { operand } => Some(&**operand),
				_ => None,
			},
			Slot::Left => self.operands().map(|(left, _)| left),
			Slot::Right => self.operands().map(|(_, right)| right),
		}
	}

	pub fn child_mut(&mut self, slot: Slot) -> Option<&mut Expression> {
		match slot {
			Slot::Operand => match self {
				Expression::Not { operand } => Some(&mut **operand),
				_ => None,
			},
			Slot::Left => self.operands_mut().map(|(left, _)| left),
			Slot::Right => self.operands_mut().map(|(_, right)| right),
		}
	}

	/// Печать в заданной нотации.
	pub fn display_with<'a>(&'a self, notation: &'a Notation) -> Rendered<'a> {
		Rendered { expr: self, notation }
	}
}

/// Имя дочернего слота выражения.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Copy)]
pub enum Slot {
	/// Операнд отрицания.
	Operand,
	Left,
	Right,
}

impl fmt::Display for Slot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Slot::Operand => "operand",
			Slot::Left => "left",
			Slot::Right => "right",
		})
	}
}

#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("unknown slot `{0}`, expected `operand`, `left` or `right`")]
pub struct UnknownSlot(pub String);

impl FromStr for Slot {
	type Err = UnknownSlot;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"operand" | "negated" => Ok(Slot::Operand),
			"left" => Ok(Slot::Left),
			"right" => Ok(Slot::Right),
			other => Err(UnknownSlot(other.to_string())),
		}
	}
}

/// Путь к подвыражению.
#[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ExprPathOwned(pub Vec<Slot>);

/// Путь к подвыражению для передачи в функции. Аналог `[Slot]`.
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct ExprPath(pub [Slot]);

impl ExprPath {
	/// Создать ссылку на `ExprPath` из слайса слотов.
	pub fn from_slice(slice: &[Slot]) -> &Self {
		unsafe { &*(slice as *const [Slot] as *const ExprPath) }
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl Borrow<ExprPath> for ExprPathOwned {
	fn borrow(&self) -> &ExprPath {
		ExprPath::from_slice(self.0.borrow())
	}
}

impl ExprPathOwned {
	pub fn as_path(&self) -> &ExprPath {
		self.borrow()
	}

	/// Начало пути вплоть до слота, на котором спуск не удался.
	pub fn cut_to_error(&self, error: PositionError) -> &ExprPath {
		let end = (error.0 + 1).min(self.0.len());
		ExprPath::from_slice(&self.0[..end])
	}
}

impl fmt::Display for ExprPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0.iter().join("."))
	}
}

impl fmt::Display for ExprPathOwned {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(self.as_path(), f)
	}
}

/// Показывает на какой глубине пути не нашлось нужного слота.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Copy)]
pub struct PositionError(pub usize);

impl Expression {
	fn get_ref_inner<'a>(&'a self, position: &ExprPath, deep: usize) -> Result<&'a Self, PositionError> {
		match &position.0 {
			[start, tail @ ..] => self
				.child(*start)
				.ok_or(PositionError(deep))?
				.get_ref_inner(ExprPath::from_slice(tail), deep + 1),
			[] => Ok(self),
		}
	}

	/// Получить ссылку на внутреннюю часть выражения.
	pub fn get_ref<'a>(&'a self, position: &ExprPath) -> Result<&'a Self, PositionError> {
		self.get_ref_inner(position, 0)
	}

	fn get_mut_inner<'a>(&'a mut self, position: &ExprPath, deep: usize) -> Result<&'a mut Self, PositionError> {
		match &position.0 {
			[start, tail @ ..] => self
				.child_mut(*start)
				.ok_or(PositionError(deep))?
				.get_mut_inner(ExprPath::from_slice(tail), deep + 1),
			[] => Ok(self),
		}
	}

	/// Получить изменяемую ссылку на внутреннюю часть выражения.
	pub fn get_mut<'a>(&'a mut self, position: &ExprPath) -> Result<&'a mut Self, PositionError> {
		self.get_mut_inner(position, 0)
	}

	/// Заменить подвыражение по пути, остальное дерево не меняется. Возвращает старое подвыражение.
	pub fn set(&mut self, position: &ExprPath, value: Expression) -> Result<Expression, PositionError> {
		let place = self.get_mut(position)?;
		Ok(std::mem::replace(place, value))
	}

	/// Все непустые пути внутри выражения, в порядке обхода в глубину.
	pub fn paths(&self) -> Vec<ExprPathOwned> {
		fn process(expr: &Expression, current_position: &mut Vec<Slot>, storage: &mut Vec<ExprPathOwned>) {
			for &slot in expr.kind().slots() {
				if let Some(child) = expr.child(slot) {
					current_position.push(slot);
					storage.push(ExprPathOwned(current_position.clone()));
					process(child, current_position, storage);
					current_position.pop();
				}
			}
		}

		let mut storage = Vec::new();
		process(self, &mut Vec::new(), &mut storage);
		storage
	}
}

/// Символы, которыми печатается выражение.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notation {
	pub not: &'static str,
	pub and: &'static str,
	pub or: &'static str,
	pub implies: &'static str,
	pub iff: &'static str,
	pub xor: &'static str,
	pub truth: &'static str,
	pub falsity: &'static str,
	pub open: &'static str,
	pub close: &'static str,
}

impl Notation {
	pub const UNICODE: Notation = Notation {
		not: "¬",
		and: "∧",
		or: "∨",
		implies: "→",
		iff: "↔",
		xor: "⊕",
		truth: "T",
		falsity: "F",
		open: "(",
		close: ")",
	};

	/// Печатается только ASCII-символами, парсер читает её обратно.
	pub const ASCII: Notation = Notation {
		not: "!",
		and: "&",
		or: "|",
		implies: "->",
		iff: "<->",
		xor: "^",
		truth: "T",
		falsity: "F",
		open: "(",
		close: ")",
	};

	pub const LATEX: Notation = Notation {
		not: "\\lnot ",
		and: "\\land",
		or: "\\lor",
		implies: "\\rightarrow",
		iff: "\\leftrightarrow",
		xor: "\\oplus",
		truth: "\\top",
		falsity: "\\bot",
		open: "\\left(",
		close: "\\right)",
	};
}

impl Default for Notation {
	fn default() -> Self {
		Notation::UNICODE
	}
}

/// Выражение вместе с нотацией, реализует `Display`.
pub struct Rendered<'a> {
	expr: &'a Expression,
	notation: &'a Notation,
}

impl Rendered<'_> {
	fn child(&self, expr: &Expression, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let inner = expr.display_with(self.notation);
		if expr.kind().is_atomic() {
			write!(f, "{}", inner)
		} else {
			write!(f, "{}{}{}", self.notation.open, inner, self.notation.close)
		}
	}

	fn binary(&self, left: &Expression, symbol: &str, right: &Expression, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.child(left, f)?;
		write!(f, " {} ", symbol)?;
		self.child(right, f)
	}
}

impl fmt::Display for Rendered<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		use Expression::*;

		let n = self.notation;
		match self.expr {
			Var { name } => f.write_str(name),
			True => f.write_str(n.truth),
			False => f.write_str(n.falsity),
			Not { operand } => {
				f.write_str(n.not)?;
				self.child(operand, f)
			},
			And { left, right } => self.binary(left, n.and, right, f),
			Or { left, right } => self.binary(left, n.or, right, f),
			Implies { left, right } => self.binary(left, n.implies, right, f),
			Iff { left, right } => self.binary(left, n.iff, right, f),
			Xor { left, right } => self.binary(left, n.xor, right, f),
		}
	}
}

impl fmt::Display for Expression {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.display_with(&Notation::UNICODE), f)
	}
}

impl FromStr for Expression {
	type Err = crate::parsing::ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		crate::parsing::parse_expression(s)
	}
}
