use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use propply::session::{setup, Session, SessionError};
use propply::ProofState;

/// Interactive proof assistant for propositional logic.
#[derive(Parser, Debug)]
#[command(name = "propply", version, about, long_about = None)]
struct Cli {
	/// Assumption, may be given several times
	#[arg(short = 'a', long = "assume", value_name = "EXPR")]
	assume: Vec<String>,

	/// Formula to prove
	#[arg(short, long, value_name = "EXPR")]
	goal: Option<String>,

	/// Read commands from a file instead of the terminal
	#[arg(long, value_name = "FILE")]
	script: Option<PathBuf>,

	/// Disable colored output
	#[arg(long)]
	no_color: bool,
}

fn run(cli: Cli) -> Result<(), String> {
	let color = !cli.no_color;
	let report = |err: SessionError| err.report(color);
	let stdin = io::stdin();
	let mut input = stdin.lock();
	let mut output = io::stdout();

	let (assumptions, goal) = match setup(&mut input, &mut output, &cli.assume, cli.goal.as_deref(), color).map_err(report)? {
		Some(setup) => setup,
		None => return Ok(()),
	};

	let mut session = Session::new(ProofState::new(assumptions, goal)).with_color(color);
	let result = match &cli.script {
		Some(path) => {
			let file = File::open(path).map_err(|err| format!("can't read `{}`: {}", path.display(), err))?;
			session.run_loop(BufReader::new(file), &mut output, false)
		},
		None => session.run_loop(&mut input, &mut output, true),
	};
	result.map_err(|err| err.to_string())
}

fn main() {
	pretty_env_logger::init();
	let cli = Cli::parse();
	if cli.no_color {
		colored::control::set_override(false);
	}
	if let Err(err) = run(cli) {
		eprintln!("{} {}", "error:".red().bold(), err);
		std::process::exit(1);
	}
}
