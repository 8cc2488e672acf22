use std::fs;

use propply::export::{export_to_file, export_to_string, ExportError, ExportFormat};
use propply::expr::Expression;
use propply::parsing::parse_expression;
use propply::proof::{ProofError, ProofState};
use propply::rules::RuleCategory;
use propply::session::{ask, parse_formula_list, parse_single_formula, setup, Reply, Session, SessionError};

fn e(text: &str) -> Expression {
	parse_expression(text).unwrap()
}

fn session(assumptions: &[&str], goal: &str) -> Session {
	let proof = ProofState::new(assumptions.iter().map(|text| e(text)).collect(), Some(e(goal)));
	Session::new(proof).with_color(false)
}

#[test]
fn apply_command() {
	let mut session = session(&["P", "Q"], "P & Q");
	let reply = session.execute("apply conjunction 1 2").unwrap();
	assert_eq!(reply.to_string(), "3. P ∧ Q\t\t(conjunction of 1, 2)");
	match reply {
		Reply::Applied { step, entry, goal_reached } => {
			assert_eq!(step, 3);
			assert_eq!(entry.result, e("P & Q"));
			assert!(goal_reached);
		},
		other => panic!("unexpected reply {:?}", other),
	}
	assert!(session.proof().is_complete());
}

#[test]
fn errors_keep_the_proof() {
	let mut session = session(&["P", "Q"], "P & Q");

	let err = session.execute("frobnicate").unwrap_err();
	assert!(matches!(err, SessionError::Command { .. }));
	assert!(err.report(false).contains("invalid command"));

	let err = session.execute("assume P &").unwrap_err();
	assert!(matches!(err, SessionError::Expression { .. }));
	assert!(err.report(false).contains("unexpected end of input"));

	let err = session.execute("undo").unwrap_err();
	assert!(matches!(err, SessionError::Proof(ProofError::NothingToUndo)));
	assert_eq!(err.report(false), "✗ nothing to undo");

	assert!(matches!(session.execute("delete 1"), Err(SessionError::Proof(ProofError::AssumptionProtected { step: 1 }))));
	assert!(matches!(session.execute("help nope"), Err(SessionError::UnknownRule(_))));
	assert!(matches!(
		session.execute("export pdf proof.pdf"),
		Err(SessionError::Export(ExportError::UnknownFormat(_)))
	));

	assert_eq!(session.proof().steps().len(), 2);
}

#[test]
fn assume_goal_and_reset() {
	let mut session = session(&["P"], "P");
	assert_eq!(session.execute("assume Q -> R").unwrap(), Reply::Assumed { step: 2, expr: e("Q -> R") });
	assert_eq!(session.execute("goal R").unwrap(), Reply::GoalSet { goal: e("R") });
	session.execute("apply addition 1 2").unwrap();
	assert_eq!(session.execute("reset").unwrap(), Reply::Reset);
	assert_eq!(session.proof().steps().len(), 1);
	assert_eq!(session.proof().steps()[0].result, e("P"));
	assert_eq!(session.proof().goal(), Some(&e("R")));
}

#[test]
fn list_and_help() {
	let mut session = session(&["P"], "P");
	match session.execute("list").unwrap() {
		Reply::Rules(groups) => {
			assert_eq!(groups.len(), 2);
			assert_eq!(groups[0].0, RuleCategory::Inference);
			assert!(groups[0].1.contains(&"modus_ponens"));
			assert_eq!(groups[1].0, RuleCategory::Equivalence);
			assert!(groups[1].1.contains(&"demorgan_and"));
		},
		other => panic!("unexpected reply {:?}", other),
	}

	let help = session.execute("help").unwrap().to_string();
	assert!(help.contains("apply <rule>"));
	let explanation = session.execute("help resolution").unwrap().to_string();
	assert!(explanation.contains("⊢"));
}

#[test]
fn paths_command() {
	let mut session = session(&["!P & Q"], "Q");
	let reply = session.execute("paths 1").unwrap();
	assert_eq!(reply.to_string(), "1.left\t¬P\n1.left.operand\tP\n1.right\tQ");
	assert!(matches!(session.execute("paths 2"), Err(SessionError::Proof(ProofError::StepOutOfRange { .. }))));
}

#[test]
fn show_command() {
	let mut session = session(&["P"], "P | Q");
	let log = session.execute("show").unwrap().to_string();
	assert_eq!(log, "Proof Steps:\n  1. P\t\t(assumption)\nGoal: P ∨ Q");
}

#[test]
fn run_loop_stops_at_exit() {
	let mut session = session(&["P", "Q"], "Q & P");
	let script = "apply conjunction 1 2\n\nbogus\napply commutative_and 3\nexit\napply conjunction 1 1\n";
	let mut output = Vec::new();
	session.run_loop(script.as_bytes(), &mut output, false).unwrap();

	let output = String::from_utf8(output).unwrap();
	assert!(output.contains("3. P ∧ Q\t\t(conjunction of 1, 2)"));
	assert!(output.contains("invalid command"));
	assert_eq!(output.matches("Goal reached!").count(), 1);
	assert!(output.contains("✓ Goal reached!"));
	assert_eq!(session.proof().steps().len(), 4);
}

#[test]
fn asking_for_formulas() {
	let mut input = "P & , Q\nP, Q -> R,\n".as_bytes();
	let mut output = Vec::new();
	let formulas = ask(&mut input, &mut output, "Assumptions:", false, parse_formula_list).unwrap();
	assert_eq!(formulas, Some(vec![e("P"), e("Q -> R")]));
	let output = String::from_utf8(output).unwrap();
	assert_eq!(output.matches("Assumptions:").count(), 2);

	let mut input = "P, Q\n".as_bytes();
	let mut output = Vec::new();
	assert_eq!(ask(&mut input, &mut output, "Goal:", false, parse_single_formula).unwrap(), None);
	assert!(String::from_utf8(output).unwrap().contains("expected exactly one formula, got 2"));
}

fn finished_proof() -> ProofState {
	let mut proof = ProofState::new(vec![e("P"), e("Q")], Some(e("P & Q")));
	proof.apply("conjunction", &["1", "2"]).unwrap();
	proof
}

#[test]
fn text_export() {
	let proof = finished_proof();
	assert_eq!(
		export_to_string(ExportFormat::Text, &proof.log()),
		"ASSUMPTIONS:\n1: P\n2: Q\n\nGOAL: P ∧ Q\n\nPROOF STEPS:\n1. Conjunction of 1, 2\n3: P ∧ Q\n\nQED\n"
	);

	let unfinished = ProofState::new(vec![e("P")], None);
	assert_eq!(
		export_to_string(ExportFormat::Text, &unfinished.log()),
		"ASSUMPTIONS:\n1: P\n\nGOAL: not set\n\nPROOF STEPS:\n"
	);
}

#[test]
fn latex_export() {
	let mut proof = ProofState::new(vec![e("!!A | B")], None);
	proof.apply("negation", &["1.left"]).unwrap();
	let latex = export_to_string(ExportFormat::Latex, &proof.log());
	assert!(latex.starts_with("\\documentclass{article}"));
	assert!(latex.contains("\\lnot \\lnot A \\lor B\n\\label{eq:1}"));
	assert!(latex.contains("\\textbf{1}. Negation at left of \\ref{eq:1}"));
	assert!(latex.contains("A \\lor B\n\\label{eq:2}"));
	assert!(!latex.contains("QED"));
	assert!(latex.trim_end().ends_with("\\end{document}"));
}

#[test]
fn export_formats() {
	assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
	assert_eq!("text".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
	assert_eq!("tex".parse::<ExportFormat>().unwrap(), ExportFormat::Latex);
	assert_eq!("latex".parse::<ExportFormat>().unwrap(), ExportFormat::Latex);
	assert!(matches!("pdf".parse::<ExportFormat>(), Err(ExportError::UnknownFormat(format)) if format == "pdf"));
}

#[test]
fn export_command_writes_file() {
	let path = std::env::temp_dir().join(format!("propply-export-{}.txt", std::process::id()));
	let mut session = Session::new(finished_proof()).with_color(false);
	let reply = session.execute(&format!("export txt {}", path.display())).unwrap();
	assert_eq!(reply, Reply::Exported { format: ExportFormat::Text, path: path.clone() });

	let written = fs::read_to_string(&path).unwrap();
	assert_eq!(written, export_to_string(ExportFormat::Text, &session.proof().log()));
	fs::remove_file(&path).unwrap();

	let missing = std::env::temp_dir().join("propply-no-such-dir").join("proof.tex");
	assert!(matches!(
		export_to_file(ExportFormat::Latex, &session.proof().log(), &missing),
		Err(ExportError::Io(_))
	));
}

#[test]
fn setup_asks_only_for_missing() {
	let mut input = "P, P -> Q\n".as_bytes();
	let mut output = Vec::new();
	let (assumptions, goal) = setup(&mut input, &mut output, &[], Some("Q"), false).unwrap().unwrap();
	assert_eq!(assumptions, vec![e("P"), e("P -> Q")]);
	assert_eq!(goal, Some(e("Q")));
	let output = String::from_utf8(output).unwrap();
	assert!(output.contains("Assumptions"));
	assert!(!output.contains("Goal:"));

	let mut input = "".as_bytes();
	let mut output = Vec::new();
	let assume = vec!["P".to_string(), "Q".to_string()];
	let (assumptions, goal) = setup(&mut input, &mut output, &assume, Some("P & Q"), false).unwrap().unwrap();
	assert_eq!(assumptions, vec![e("P"), e("Q")]);
	assert_eq!(goal, Some(e("P & Q")));
	assert!(output.is_empty());

	let (_, goal) = setup(&mut input, &mut output, &assume, None, false).unwrap().unwrap();
	assert_eq!(goal, None);
	assert!(output.is_empty());

	let mut input = "P\nQ\n".as_bytes();
	let (assumptions, goal) = setup(&mut input, &mut output, &[], None, false).unwrap().unwrap();
	assert_eq!((assumptions, goal), (vec![e("P")], Some(e("Q"))));
	assert!(String::from_utf8(output).unwrap().contains("Goal:"));
}

#[test]
fn setup_rejects_bad_arguments() {
	let mut input = "P\n".as_bytes();
	let mut output = Vec::new();
	let err = setup(&mut input, &mut output, &[], Some("P &"), false).unwrap_err();
	assert!(matches!(err, SessionError::Expression { .. }));

	let mut input = "".as_bytes();
	assert!(setup(&mut input, &mut output, &[], Some("Q"), false).unwrap().is_none());
}
