//! Выгрузка доказательства в текст и в LaTeX. Экспортёры видят только `ProofLog`.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use itertools::Itertools;
use log::debug;
use thiserror::Error;

use crate::expr::Notation;
use crate::proof::ProofLog;

#[derive(Debug, Error)]
pub enum ExportError {
	#[error("unknown export format `{0}`, expected `txt` or `tex`")]
	UnknownFormat(String),
	#[error("cannot write the proof: {0}")]
	Io(#[from] io::Error),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExportFormat {
	Text,
	Latex,
}

impl FromStr for ExportFormat {
	type Err = ExportError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"txt" | "text" => Ok(ExportFormat::Text),
			"tex" | "latex" => Ok(ExportFormat::Latex),
			other => Err(ExportError::UnknownFormat(other.to_string())),
		}
	}
}

impl fmt::Display for ExportFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			ExportFormat::Text => "text",
			ExportFormat::Latex => "LaTeX",
		})
	}
}

impl ExportFormat {
	pub fn exporter(self) -> &'static dyn Exporter {
		match self {
			ExportFormat::Text => &TextExporter,
			ExportFormat::Latex => &LatexExporter,
		}
	}
}

pub trait Exporter {
	fn export(&self, log: &ProofLog<'_>, out: &mut dyn Write) -> io::Result<()>;
}

/// `modus_ponens at left` -> `Modus ponens at left`.
fn rule_title(rule: &str) -> String {
	let spaced = rule.replace('_', " ");
	let mut chars = spaced.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

pub struct TextExporter;

impl Exporter for TextExporter {
	fn export(&self, log: &ProofLog<'_>, out: &mut dyn Write) -> io::Result<()> {
		writeln!(out, "ASSUMPTIONS:")?;
		for (number, step) in log.assumptions() {
			writeln!(out, "{}: {}", number, step.result)?;
		}
		writeln!(out)?;
		match log.goal {
			Some(goal) => writeln!(out, "GOAL: {}", goal)?,
			None => writeln!(out, "GOAL: not set")?,
		}
		writeln!(out)?;

		writeln!(out, "PROOF STEPS:")?;
		for (position, (number, step)) in log.derived().enumerate() {
			writeln!(
				out,
				"{}. {} of {}",
				position + 1,
				rule_title(&step.rule),
				step.premises.iter().map(|premise| premise + 1).join(", ")
			)?;
			writeln!(out, "{}: {}", number, step.result)?;
			writeln!(out)?;
		}

		if log.is_complete() {
			writeln!(out, "QED")?;
		}
		Ok(())
	}
}

pub struct LatexExporter;

impl Exporter for LatexExporter {
	fn export(&self, log: &ProofLog<'_>, out: &mut dyn Write) -> io::Result<()> {
		let notation = &Notation::LATEX;

		writeln!(out, "\\documentclass{{article}}")?;
		writeln!(out, "\\usepackage{{amsmath}}")?;
		writeln!(out, "\\usepackage{{amssymb}}")?;
		writeln!(out, "\\begin{{document}}")?;

		writeln!(out, "\\section{{Assumptions}}")?;
		for (number, step) in log.assumptions() {
			write_equation(out, &step.result.display_with(notation), number)?;
		}
		if let Some(goal) = log.goal {
			writeln!(out, "\\textbf{{Goal}}: ${}$", goal.display_with(notation))?;
		}

		writeln!(out, "\\section{{Proof Steps}}")?;
		for (position, (number, step)) in log.derived().enumerate() {
			writeln!(
				out,
				"\\textbf{{{}}}. {} of {}",
				position + 1,
				rule_title(&step.rule),
				step.premises.iter().map(|premise| format!("\\ref{{eq:{}}}", premise + 1)).join(", ")
			)?;
			write_equation(out, &step.result.display_with(notation), number)?;
		}
		if log.is_complete() {
			writeln!(out, "\\hfill\\textbf{{QED}}")?;
		}

		writeln!(out, "\\end{{document}}")
	}
}

fn write_equation(out: &mut dyn Write, formula: &dyn fmt::Display, number: usize) -> io::Result<()> {
	writeln!(out, "\\begin{{equation}}")?;
	writeln!(out, "{}", formula)?;
	writeln!(out, "\\label{{eq:{}}}", number)?;
	writeln!(out, "\\end{{equation}}")
}

pub fn export_to_string(format: ExportFormat, log: &ProofLog<'_>) -> String {
	let mut buffer = Vec::new();
	// Запись в `Vec` не возвращает ошибок.
	let _ = format.exporter().export(log, &mut buffer);
	String::from_utf8_lossy(&buffer).into_owned()
}

pub fn export_to_file(format: ExportFormat, log: &ProofLog<'_>, path: &Path) -> Result<(), ExportError> {
	let mut file = BufWriter::new(File::create(path)?);
	format.exporter().export(log, &mut file)?;
	file.flush()?;
	debug!("proof exported as {} to {}", format, path.display());
	Ok(())
}
