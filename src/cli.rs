use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "minipascal", about = "Front end analyser for a small Pascal-like language.")]
pub struct Cli {
	#[command(subcommand)]
	pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
	/// Analyse a source file
	File { path: PathBuf },
	/// Analyse source read from standard input
	Stdin,
}
