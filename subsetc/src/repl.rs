use std::{io::Write, rc::Rc};

use subset_core::interpreter::prelude::Session;

use crate::ConsoleWarningEmitter;

const PROMPT: &str = "> ";

const HELP: &str = "\
.exit   leave the loop
.vars   list the session variables
.reset  drop every variable
.help   show this message";

/// Every line runs on the same session, so variables carry over.
pub fn start() -> std::io::Result<()> {
	ctrlc::set_handler(|| {
		println!();
		std::process::exit(0);
	})
	.map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;

	let stdin = std::io::stdin();
	let mut session = Session::with_warnings(Rc::new(ConsoleWarningEmitter));

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		match input.trim() {
			"" => {},
			".exit" => return Ok(()),
			".help" => println!("{HELP}"),
			".reset" => session.reset(),
			".vars" => {
				for (name, value) in session.environment().bindings() {
					println!("{} {name} = {value}", value.value_type());
				}
			},
			line => {
				let output = session.execute(line);

				if !output.is_empty() {
					println!("{output}");
				}
			}
		}
	}
}
