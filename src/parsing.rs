use std::fmt;
use std::ops::Range;

use log::trace;
use thiserror::Error;

use crate::expr::{Expression, ExprPathOwned, Slot};
use crate::proof::Reference;
use crate::session::Command;
use crate::utils::char_index::{char_index, get_char_range, CharIndex};
use crate::utils::span::{GlobalSpan, Spanned};

/// Лексема формулы.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Token {
	LParen,
	RParen,
	Not,
	And,
	Or,
	Implies,
	Iff,
	Xor,
	True,
	False,
	Var(String),
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		use Token::*;

		match self {
			LParen => f.write_str("("),
			RParen => f.write_str(")"),
			Not => f.write_str("¬"),
			And => f.write_str("∧"),
			Or => f.write_str("∨"),
			Implies => f.write_str("→"),
			Iff => f.write_str("↔"),
			Xor => f.write_str("⊕"),
			True => f.write_str("T"),
			False => f.write_str("F"),
			Var(name) => f.write_str(name),
		}
	}
}

/// Лексема вместе с текстом, которым она записана, и её положением в символах.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Lexeme {
	pub token: Token,
	pub text: String,
	pub span: GlobalSpan,
}

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum SyntaxError {
	#[error("unknown token `{found}`")]
	UnknownToken {
		found: String,
	},
	#[error("unexpected end of input, expected a variable, a constant or `(`")]
	UnexpectedEnd,
	#[error("expected `)`, found {}", describe_found(.found))]
	UnclosedParenthesis {
		found: Option<String>,
	},
	#[error("unexpected `{found}`, expected a variable, a constant or `(`")]
	UnexpectedToken {
		found: String,
	},
	#[error("unexpected `{found}` after the end of the formula")]
	TrailingToken {
		found: String,
	},
}

fn describe_found(found: &Option<String>) -> String {
	match found {
		Some(text) => format!("`{}`", text),
		None => "end of input".to_string(),
	}
}

impl SyntaxError {
	/// Ошибка на уровне лексем, а не грамматики.
	pub fn is_lexical(&self) -> bool {
		matches!(self, SyntaxError::UnknownToken { .. })
	}
}

pub type ParseError = Spanned<SyntaxError>;

// Порядок альтернатив в `kind()` это приоритет лексических правил: первое подошедшее побеждает.
peg::parser!(
	grammar parsing() for str {
		pub rule tokens() -> Vec<(Token, Range<usize>)>
			= list:(_ t:token() { t })* _ { list }

		rule token() -> (Token, Range<usize>)
			= start:position!() token:kind() end:position!() { (token, start..end) }

		rule kind() -> Token
			= "(" { Token::LParen }
			/ ")" { Token::RParen }
			/ ("¬" / "!" / "~" / "NOT") { Token::Not }
			/ ("∧" / "&" / "AND") { Token::And }
			/ ("∨" / "|" / "OR") { Token::Or }
			/ ("→" / "->" / "IMPLIES") { Token::Implies }
			/ ("↔" / "<->" / "IFF") { Token::Iff }
			/ ("⊕" / "^" / "XOR") { Token::Xor }
			/ ("TRUE" / "T") { Token::True }
			/ ("FALSE" / "F") { Token::False }
			/ name:identifier() { Token::Var(name) }

		pub rule reference() -> Reference
			= step:integer() path:("." s:slot() { s })* {
				Reference {
					step: step as usize,
					path: ExprPathOwned(path),
				}
			}

		rule slot() -> Slot
			= "left" { Slot::Left }
			/ "right" { Slot::Right }
			/ ("operand" / "negated") { Slot::Operand }

		pub rule command() -> Command
			= _ c:command_body() _ { c }

		rule command_body() -> Command
			= "apply" __ name:word() targets:(__ t:word() { t })* { Command::Apply { rule: name, targets } }
			/ "assume" __ expr:rest() { Command::Assume { expr } }
			/ "goal" __ expr:rest() { Command::Goal { expr } }
			/ "undo" { Command::Undo }
			/ "delete" __ step:integer() { Command::Delete { step: step as usize } }
			/ "reset" { Command::Reset }
			/ "list" { Command::List }
			/ "help" name:(__ r:word() { r })? { Command::Help { rule: name } }
			/ "export" __ format:word() __ path:rest() { Command::Export { format, path: path.into() } }
			/ "show" { Command::Show }
			/ "paths" __ step:integer() { Command::Paths { step: step as usize } }
			/ ("exit" / "quit") { Command::Exit }

		rule word() -> String
			= w:$((![' ' | '\t' | '\n' | '\r'] [_])+) { w.to_string() }

		rule rest() -> String
			= r:$([_]+) { r.trim().to_string() }

		rule integer() -> u64
			= n:$(['0'..='9']+) {? n.parse().map_err(|_| "number is too big") }

		rule identifier() -> String
			= n:$(['a'..='z' | 'A'..='Z' | '_'] ['a'..='z' | 'A'..='Z' | '_' | '0'..='9']*) {
				String::from(n)
			}

		rule _() = quiet!{[' ' | '\n' | '\t' | '\r']*}

		rule __() = quiet!{[' ' | '\n' | '\t' | '\r']+}
	}
);

/// Разбивает строку на лексемы. Положения переводятся из байтов в символы.
pub fn tokenize(text: &str) -> Result<Vec<Lexeme>, ParseError> {
	let tokens = parsing::tokens(text).map_err(|err| {
		let offset = err.location.offset;
		let position = char_index(text, offset).0;
		let found = text[offset..].chars().next().map(String::from).unwrap_or_default();
		Spanned::new(SyntaxError::UnknownToken { found }, GlobalSpan(position..position + 1))
	})?;

	let lexemes: Vec<Lexeme> = tokens
		.into_iter()
		.map(|(token, range)| {
			let text_of_token = text[range.clone()].to_string();
			let span = get_char_range(text, range)
				.map(|chars| chars.start.0..chars.end.0)
				.unwrap_or_default();
			Lexeme { token, text: text_of_token, span: GlobalSpan(span) }
		})
		.collect();
	trace!("tokens of `{}`: {:?}", text, lexemes.iter().map(|l| &l.token).collect::<Vec<_>>());
	Ok(lexemes)
}

/// Рекурсивный спуск, по одному уровню на приоритет: `↔`, `→`, `⊕`, `∨`, `∧`, `¬`, атом.
struct Parser<'a> {
	lexemes: &'a [Lexeme],
	position: usize,
	end: CharIndex,
}

type ParseResult = Result<Expression, ParseError>;

impl<'a> Parser<'a> {
	fn peek(&self) -> Option<&'a Lexeme> {
		self.lexemes.get(self.position)
	}

	fn advance(&mut self) {
		self.position += 1;
	}

	fn eat(&mut self, token: &Token) -> bool {
		match self.peek() {
			Some(lexeme) if lexeme.token == *token => {
				self.advance();
				true
			},
			_ => false,
		}
	}

	/// Левоассоциативная свёртка одного уровня бинарных связок.
	fn fold(
		&mut self,
		operator: &Token,
		next: fn(&mut Self) -> ParseResult,
		make: fn(Expression, Expression) -> Expression,
	) -> ParseResult {
		let mut node = next(self)?;
		while self.eat(operator) {
			node = make(node, next(self)?);
		}
		Ok(node)
	}

	fn iff(&mut self) -> ParseResult {
		self.fold(&Token::Iff, Self::implies, Expression::iff)
	}

	fn implies(&mut self) -> ParseResult {
		self.fold(&Token::Implies, Self::xor, Expression::implies)
	}

	fn xor(&mut self) -> ParseResult {
		self.fold(&Token::Xor, Self::or, Expression::xor)
	}

	fn or(&mut self) -> ParseResult {
		self.fold(&Token::Or, Self::and, Expression::or)
	}

	fn and(&mut self) -> ParseResult {
		self.fold(&Token::And, Self::not, Expression::and)
	}

	fn not(&mut self) -> ParseResult {
		if self.eat(&Token::Not) {
			Ok(Expression::not(self.not()?))
		} else {
			self.atom()
		}
	}

	fn atom(&mut self) -> ParseResult {
		let lexeme = match self.peek() {
			Some(lexeme) => lexeme,
			None => return Err(Spanned::new(SyntaxError::UnexpectedEnd, GlobalSpan::at(self.end.0))),
		};

		match &lexeme.token {
			Token::Var(name) => {
				self.advance();
				Ok(Expression::var(name.clone()))
			},
			Token::True => {
				self.advance();
				Ok(Expression::True)
			},
			Token::False => {
				self.advance();
				Ok(Expression::False)
			},
			Token::LParen => {
				self.advance();
				let inner = self.iff()?;
				self.close()?;
				Ok(inner)
			},
			_ => Err(Spanned::new(
				SyntaxError::UnexpectedToken { found: lexeme.text.clone() },
				lexeme.span.clone(),
			)),
		}
	}

	fn close(&mut self) -> Result<(), ParseError> {
		match self.peek() {
			Some(Lexeme { token: Token::RParen, .. }) => {
				self.advance();
				Ok(())
			},
			Some(other) => Err(Spanned::new(
				SyntaxError::UnclosedParenthesis { found: Some(other.text.clone()) },
				other.span.clone(),
			)),
			None => Err(Spanned::new(
				SyntaxError::UnclosedParenthesis { found: None },
				GlobalSpan::at(self.end.0),
			)),
		}
	}
}

/// Читает формулу целиком: лишние лексемы после неё считаются ошибкой.
pub fn parse_expression(text: &str) -> Result<Expression, ParseError> {
	let lexemes = tokenize(text)?;
	let mut parser = Parser {
		lexemes: &lexemes,
		position: 0,
		end: CharIndex(text.chars().count()),
	};
	let expression = parser.iff()?;
	match parser.peek() {
		Some(lexeme) => Err(Spanned::new(
			SyntaxError::TrailingToken { found: lexeme.text.clone() },
			lexeme.span.clone(),
		)),
		None => Ok(expression),
	}
}

pub fn parse_reference(text: &str) -> Result<Reference, peg::error::ParseError<peg::str::LineCol>> {
	parsing::reference(text)
}

/// Разбирает команду. Ключевое слово команды не зависит от регистра: `EXIT`, `Undo`.
///
/// Приводится к нижнему регистру только первое слово, и только ASCII, поэтому смещения в ошибках не сдвигаются.
pub fn parse_command(text: &str) -> Result<Command, peg::error::ParseError<peg::str::LineCol>> {
	let start = text.len() - text.trim_start().len();
	let end = text[start..]
		.find(char::is_whitespace)
		.map_or(text.len(), |length| start + length);
	let normalized = format!("{}{}{}", &text[..start], text[start..end].to_ascii_lowercase(), &text[end..]);
	parsing::command(&normalized)
}
