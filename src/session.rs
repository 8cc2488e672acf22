//! Команды интерактивного режима и цикл их чтения.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use colored::Colorize;
use itertools::Itertools;
use log::debug;
use thiserror::Error;

use crate::export::{export_to_file, ExportError, ExportFormat};
use crate::expr::Expression;
use crate::parsing::{parse_command, parse_expression, ParseError};
use crate::proof::{ProofError, ProofState, ProofStep, Reference};
use crate::rules::{RuleCategory, UnknownRule};
use crate::utils::span::{peg_error_to_spanned, render_snippet};

/// Команда, как она записана пользователем. Выражения пока не разобраны.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
	Apply {
		rule: String,
		targets: Vec<String>,
	},
	Assume {
		expr: String,
	},
	Goal {
		expr: String,
	},
	Undo,
	Delete {
		step: usize,
	},
	Reset,
	List,
	Help {
		rule: Option<String>,
	},
	Export {
		format: String,
		path: PathBuf,
	},
	Show,
	Paths {
		step: usize,
	},
	Exit,
}

pub const HELP: &str = "\
Commands:
  apply <rule> <n>...      apply a rule to whole steps
  apply <rule> <n.path>    rewrite a subexpression of step n, e.g. 2.left.operand
  assume <expr>            add an assumption
  goal <expr>              replace the goal
  undo                     remove the last derived step
  delete <n>               remove a derived step that nothing depends on
  reset                    return to the initial assumptions
  list                     list all rules
  help [<rule>]            show this message or explain a rule
  export <txt|tex> <path>  write the proof to a file
  show                     print the proof
  paths <n>                list subexpression references of step n
  exit                     leave";

#[derive(Debug, Error)]
pub enum SessionError {
	#[error("invalid command: {error}")]
	Command {
		text: String,
		error: peg::error::ParseError<peg::str::LineCol>,
	},
	#[error("{error}")]
	Expression {
		text: String,
		error: ParseError,
	},
	#[error(transparent)]
	Proof(#[from] ProofError),
	#[error(transparent)]
	UnknownRule(#[from] UnknownRule),
	#[error(transparent)]
	Export(#[from] ExportError),
	#[error("expected exactly one formula, got {0}")]
	FormulaCount(usize),
	#[error(transparent)]
	Io(#[from] io::Error),
}

impl SessionError {
	/// Сообщение для пользователя. Синтаксические ошибки показываются подчёркнутыми в исходной строке.
	pub fn report(&self, color: bool) -> String {
		match self {
			SessionError::Command { text, error } => {
				let spanned = peg_error_to_spanned(error, text);
				let footer = format!("expected one of: {}", spanned.inner);
				render_snippet(text, &spanned.span, "invalid command", Some(&footer), color)
			},
			SessionError::Expression { text, error } => error.render_snippet(text, color),
			other if color => format!("{} {}", "✗".red().bold(), other),
			other => format!("✗ {}", other),
		}
	}
}

fn parse_formula(text: &str) -> Result<Expression, SessionError> {
	parse_expression(text).map_err(|error| SessionError::Expression { text: text.to_string(), error })
}

/// Список формул через запятую. Пустые элементы пропускаются.
pub fn parse_formula_list(line: &str) -> Result<Vec<Expression>, SessionError> {
	line.split(',')
		.map(str::trim)
		.filter(|part| !part.is_empty())
		.map(parse_formula)
		.collect()
}

/// Ровно одна формула.
pub fn parse_single_formula(line: &str) -> Result<Expression, SessionError> {
	let mut formulas = parse_formula_list(line)?;
	match formulas.len() {
		1 => Ok(formulas.remove(0)),
		count => Err(SessionError::FormulaCount(count)),
	}
}

/// Ответ на выполненную команду.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Reply {
	Applied {
		step: usize,
		entry: ProofStep,
		goal_reached: bool,
	},
	Assumed {
		step: usize,
		expr: Expression,
	},
	GoalSet {
		goal: Expression,
	},
	Undone {
		removed: ProofStep,
	},
	Deleted {
		step: usize,
		removed: ProofStep,
	},
	Reset,
	Rules(Vec<(RuleCategory, Vec<&'static str>)>),
	Help(String),
	Exported {
		format: ExportFormat,
		path: PathBuf,
	},
	Log(String),
	Paths {
		step: usize,
		references: Vec<(Reference, Expression)>,
	},
	Exit,
}

impl fmt::Display for Reply {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			// О достижении цели сообщает цикл чтения.
			Reply::Applied { step, entry, .. } => write!(f, "{}. {}", step, entry),
			Reply::Assumed { step, expr } => write!(f, "{}. {}\t\t(assumption)", step, expr),
			Reply::GoalSet { goal } => write!(f, "Goal: {}", goal),
			Reply::Undone { removed } => write!(f, "Undone: {}", removed),
			Reply::Deleted { step, removed } => write!(f, "Deleted step {}: {}", step, removed),
			Reply::Reset => write!(f, "Reset to the assumptions."),
			Reply::Rules(groups) => {
				let text = groups
					.iter()
					.map(|(category, names)| format!("{} rules:\n  {}", category, names.iter().join("\n  ")))
					.join("\n");
				f.write_str(&text)
			},
			Reply::Help(text) => f.write_str(text),
			Reply::Exported { format, path } => write!(f, "Exported as {} to {}", format, path.display()),
			Reply::Log(text) => f.write_str(text),
			Reply::Paths { step, references } => {
				if references.is_empty() {
					return write!(f, "Step {} has no subexpressions", step);
				}
				let text = references
					.iter()
					.map(|(reference, expr)| format!("{}\t{}", reference, expr))
					.join("\n");
				f.write_str(&text)
			},
			Reply::Exit => Ok(()),
		}
	}
}

pub struct Session {
	proof: ProofState,
	color: bool,
}

impl Session {
	pub fn new(proof: ProofState) -> Self {
		Session { proof, color: true }
	}

	pub fn with_color(mut self, color: bool) -> Self {
		self.color = color;
		self
	}

	pub fn proof(&self) -> &ProofState {
		&self.proof
	}

	/// Разобрать и выполнить одну строку. При ошибке доказательство не меняется.
	pub fn execute(&mut self, line: &str) -> Result<Reply, SessionError> {
		let command = parse_command(line).map_err(|error| SessionError::Command { text: line.to_string(), error })?;
		debug!("executing {:?}", command);
		self.run(command)
	}

	pub fn run(&mut self, command: Command) -> Result<Reply, SessionError> {
		Ok(match command {
			Command::Apply { rule, targets } => {
				let applied = self.proof.apply(&rule, &targets)?;
				let entry = self.proof.step(applied.step)?.clone();
				Reply::Applied { step: applied.step, entry, goal_reached: applied.goal_reached }
			},
			Command::Assume { expr } => {
				let expr = parse_formula(&expr)?;
				let step = self.proof.assume(expr.clone());
				Reply::Assumed { step, expr }
			},
			Command::Goal { expr } => {
				let goal = parse_formula(&expr)?;
				self.proof.set_goal(goal.clone());
				Reply::GoalSet { goal }
			},
			Command::Undo => Reply::Undone { removed: self.proof.undo()? },
			Command::Delete { step } => Reply::Deleted { step, removed: self.proof.delete(step)? },
			Command::Reset => {
				self.proof.reset();
				Reply::Reset
			},
			Command::List => {
				let groups = self.proof
					.rules()
					.rules()
					.map(|rule| (rule.category, rule.name))
					.into_group_map()
					.into_iter()
					.sorted()
					.collect();
				Reply::Rules(groups)
			},
			Command::Help { rule: None } => Reply::Help(HELP.to_string()),
			Command::Help { rule: Some(rule) } => Reply::Help(self.proof.rules().explain(&rule)?),
			Command::Export { format, path } => {
				let format: ExportFormat = format.parse()?;
				export_to_file(format, &self.proof.log(), &path)?;
				Reply::Exported { format, path }
			},
			Command::Show => Reply::Log(self.proof.log().to_string()),
			Command::Paths { step } => {
				let expr = &self.proof.step(step)?.result;
				let references = expr
					.paths()
					.into_iter()
					.filter_map(|path| {
						let part = expr.get_ref(path.as_path()).ok()?.clone();
						Some((Reference { step, path }, part))
					})
					.collect();
				Reply::Paths { step, references }
			},
			Command::Exit => Reply::Exit,
		})
	}

	/// Цикл чтения команд до `exit` или конца ввода.
	pub fn run_loop<R: BufRead, W: Write>(&mut self, input: R, output: &mut W, interactive: bool) -> io::Result<()> {
		writeln!(output, "{}", self.proof.log())?;
		if interactive {
			writeln!(output, "Type `help` for the list of commands.")?;
		}

		let mut lines = input.lines();
		loop {
			if interactive {
				write!(output, "{} ", ">>>".bold())?;
				output.flush()?;
			}
			let line = match lines.next() {
				Some(line) => line?,
				None => break,
			};
			if line.trim().is_empty() {
				continue;
			}

			match self.execute(&line) {
				Ok(Reply::Exit) => break,
				Ok(reply @ Reply::Applied { goal_reached: true, .. }) => {
					writeln!(output, "{}", reply)?;
					writeln!(output, "{}", self.mark("✓ Goal reached!"))?;
					writeln!(output, "{}", self.proof.log())?;
				},
				Ok(reply) => writeln!(output, "{}", reply)?,
				Err(err) => writeln!(output, "{}", err.report(self.color))?,
			}
		}
		Ok(())
	}

	fn mark(&self, text: &str) -> String {
		if self.color {
			text.green().bold().to_string()
		} else {
			text.to_string()
		}
	}
}

/// Спрашивать, пока не будет введено то, что разбирается. `None` если ввод закончился.
pub fn ask<R, W, T, F>(input: &mut R, output: &mut W, question: &str, color: bool, parse: F) -> io::Result<Option<T>>
where
	R: BufRead,
	W: Write,
	F: Fn(&str) -> Result<T, SessionError>,
{
	loop {
		write!(output, "{} ", question)?;
		output.flush()?;
		let mut line = String::new();
		if input.read_line(&mut line)? == 0 {
			return Ok(None);
		}
		match parse(line.trim()) {
			Ok(value) => return Ok(Some(value)),
			Err(err) => writeln!(output, "{}", err.report(color))?,
		}
	}
}

/// Допущения и цель для нового доказательства. Заданное в командной строке берётся как есть,
/// недостающее спрашивается. Цель спрашивается, только если не заданы и допущения.
/// `None` если ввод закончился.
pub fn setup<R: BufRead, W: Write>(
	input: &mut R,
	output: &mut W,
	assume: &[String],
	goal: Option<&str>,
	color: bool,
) -> Result<Option<(Vec<Expression>, Option<Expression>)>, SessionError> {
	let assumptions = if assume.is_empty() {
		match ask(input, output, "Assumptions (comma separated):", color, parse_formula_list)? {
			Some(assumptions) => assumptions,
			None => return Ok(None),
		}
	} else {
		assume.iter().map(|text| parse_single_formula(text)).collect::<Result<_, _>>()?
	};
	let goal = match goal {
		Some(text) => Some(parse_single_formula(text)?),
		None if assume.is_empty() => match ask(input, output, "Goal:", color, parse_single_formula)? {
			Some(goal) => Some(goal),
			None => return Ok(None),
		},
		None => None,
	};
	debug!("starting with {} assumptions, goal {:?}", assumptions.len(), goal);
	Ok(Some((assumptions, goal)))
}
