use propply::expr::{ExprPathOwned, Expression, Slot};
use propply::parsing::{parse_command, parse_expression, parse_reference, tokenize, SyntaxError, Token};
use propply::session::Command;

fn e(text: &str) -> Expression {
	parse_expression(text).unwrap()
}

fn var(name: &str) -> Expression {
	Expression::var(name)
}

fn error(text: &str) -> (SyntaxError, std::ops::Range<usize>) {
	let err = parse_expression(text).unwrap_err();
	(err.inner, err.span.0)
}

macro_rules! same {
	($a:expr, $b:expr) => {
		assert_eq!(e($a), e($b));
	};
}

#[test]
fn implication() {
	assert_eq!(e("P -> Q"), Expression::implies(var("P"), var("Q")));
}

#[test]
fn aliases() {
	same!("¬P ∧ Q", "!P & Q");
	same!("~P AND Q", "NOT P & Q");
	same!("P ∨ Q", "P OR Q");
	same!("P | Q", "P ∨ Q");
	same!("P → Q", "P IMPLIES Q");
	same!("P ↔ Q", "P <-> Q");
	same!("P IFF Q", "P <-> Q");
	same!("P ⊕ Q", "P ^ Q");
	same!("P XOR Q", "P ^ Q");
	same!("TRUE", "T");
	same!("FALSE", "F");
}

#[test]
fn precedence() {
	same!("A & B | C", "(A & B) | C");
	same!("A | B & C", "A | (B & C)");
	same!("A ^ B | C", "A ^ (B | C)");
	same!("A -> B ^ C", "A -> (B ^ C)");
	same!("A <-> B -> C", "A <-> (B -> C)");
	same!("!A & B", "(!A) & B");
	same!("!!A", "!(!A)");
}

#[test]
fn associativity() {
	same!("A -> B -> C", "(A -> B) -> C");
	same!("A & B & C", "(A & B) & C");
	same!("A | B | C", "(A | B) | C");
	same!("A <-> B <-> C", "(A <-> B) <-> C");
}

#[test]
fn constants() {
	assert_eq!(e("T & F"), Expression::and(Expression::True, Expression::False));
	assert_eq!(e("P | FALSE"), Expression::or(var("P"), Expression::False));
}

#[test]
fn identifiers() {
	assert_eq!(e("rain_1"), var("rain_1"));
	assert_eq!(e("  ( P )  "), var("P"));
	let tokens: Vec<Token> = tokenize("Tom").unwrap().into_iter().map(|lexeme| lexeme.token).collect();
	assert_eq!(tokens, vec![Token::True, Token::Var("om".to_string())]);
}

#[test]
fn errors() {
	assert_eq!(error("P & $"), (SyntaxError::UnknownToken { found: "$".to_string() }, 4..5));
	assert!(error("P & $").0.is_lexical());
	assert_eq!(error("P &"), (SyntaxError::UnexpectedEnd, 3..3));
	assert_eq!(error(""), (SyntaxError::UnexpectedEnd, 0..0));
	assert_eq!(error("(P & Q"), (SyntaxError::UnclosedParenthesis { found: None }, 6..6));
	assert_eq!(error("(P Q)"), (SyntaxError::UnclosedParenthesis { found: Some("Q".to_string()) }, 3..4));
	assert_eq!(error("& P"), (SyntaxError::UnexpectedToken { found: "&".to_string() }, 0..1));
	assert_eq!(error("P Q"), (SyntaxError::TrailingToken { found: "Q".to_string() }, 2..3));
	assert!(!error("P Q").0.is_lexical());
}

#[test]
fn spans_are_in_characters() {
	assert_eq!(error("¬¬ $"), (SyntaxError::UnknownToken { found: "$".to_string() }, 3..4));
	assert_eq!(error("P ∧ ∨"), (SyntaxError::UnexpectedToken { found: "∨".to_string() }, 4..5));
}

#[test]
fn display_parses_back() {
	for text in &["¬(P ∧ Q) ∨ R", "(P → Q) → R", "P ⊕ ¬¬T", "(A ↔ B) ∧ F"] {
		assert_eq!(e(text).to_string(), *text);
		same!(&e(text).to_string(), text);
	}
}

#[test]
fn references() {
	let reference = parse_reference("2.left.right").unwrap();
	assert_eq!(reference.step, 2);
	assert_eq!(reference.path, ExprPathOwned(vec![Slot::Left, Slot::Right]));
	assert_eq!(reference.to_string(), "2.left.right");

	assert_eq!(parse_reference("1.negated").unwrap().path, ExprPathOwned(vec![Slot::Operand]));
	assert!(parse_reference("3").unwrap().is_whole());
	assert!(parse_reference("1.").is_err());
	assert!(parse_reference("one").is_err());
	assert!(parse_reference("1.middle").is_err());
}

#[test]
fn commands() {
	assert_eq!(
		parse_command("apply modus_ponens 1 2").unwrap(),
		Command::Apply { rule: "modus_ponens".to_string(), targets: vec!["1".to_string(), "2".to_string()] }
	);
	assert_eq!(parse_command("  undo ").unwrap(), Command::Undo);
	assert_eq!(parse_command("delete 4").unwrap(), Command::Delete { step: 4 });
	assert_eq!(parse_command("assume P -> Q ").unwrap(), Command::Assume { expr: "P -> Q".to_string() });
	assert_eq!(parse_command("help").unwrap(), Command::Help { rule: None });
	assert_eq!(parse_command("help negation").unwrap(), Command::Help { rule: Some("negation".to_string()) });
	assert_eq!(
		parse_command("export tex proof.tex").unwrap(),
		Command::Export { format: "tex".to_string(), path: "proof.tex".into() }
	);
	assert_eq!(parse_command("paths 1").unwrap(), Command::Paths { step: 1 });
	assert_eq!(parse_command("quit").unwrap(), Command::Exit);
	assert!(parse_command("delete x").is_err());
	assert!(parse_command("frobnicate").is_err());
}

#[test]
fn command_keywords_ignore_case() {
	assert_eq!(parse_command("EXIT").unwrap(), Command::Exit);
	assert_eq!(parse_command("Undo").unwrap(), Command::Undo);
	assert_eq!(parse_command("  Delete 2").unwrap(), Command::Delete { step: 2 });
	assert_eq!(
		parse_command("APPLY modus_ponens 1 2").unwrap(),
		Command::Apply { rule: "modus_ponens".to_string(), targets: vec!["1".to_string(), "2".to_string()] }
	);
	assert_eq!(parse_command("Assume P AND Q").unwrap(), Command::Assume { expr: "P AND Q".to_string() });
	assert_eq!(parse_command("GOAL ¬P").unwrap(), Command::Goal { expr: "¬P".to_string() });
	assert_eq!(parse_command("Пусть P").unwrap_err().location.offset, 0);
	assert!(parse_command("FROBNICATE").is_err());
}

#[test]
fn slot_names() {
	assert_eq!("negated".parse::<Slot>(), Ok(Slot::Operand));
	assert_eq!("left".parse::<Slot>(), Ok(Slot::Left));
	assert!("middle".parse::<Slot>().is_err());
	assert_eq!(Slot::Operand.to_string(), "operand");
}
