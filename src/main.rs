use clap::Parser;
use minipascal::{cli::*, Analyser, Token};

fn main() {
	if let Err(e) = simple_logger::SimpleLogger::new().with_level(log::LevelFilter::Warn).env().init() {
		eprintln!("Failed init logger: {e}");
	}

	let analyser = Analyser::new();

	let result = match Cli::parse().mode {
		Mode::File { path } => analyser.run_file(&path),
		Mode::Stdin => analyser.run_stdin(),
	};

	match result {
		Ok(tokens) => report(&tokens),
		Err(e) => {
			eprintln!("{e}");
			std::process::exit(1);
		}
	}
}

fn report(tokens: &[Token]) {
	println!("{:<6} {:<20} {}", "line", "token", "classification");
	for token in tokens {
		println!("{token}");
	}
	println!("Success");
}
