use std::env;

use subsh::core::config::SessionPaths;
use subsh::error::ShellError;
use subsh::flags::Flags;
use subsh::path::PathExpander;
use subsh::shell::{new_editor, Session, WrappedCommand};

fn main() -> Result<(), ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = flags.parse(&args) {
        println!("{}", e);
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("subsh {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let Some(name) = flags.command() else {
        let program = env::args().next().unwrap_or_else(|| "subsh".to_string());
        println!("usage:\t{} COMMAND", program);
        return Ok(());
    };

    if !flags.extra().is_empty() && !flags.is_set("quiet") {
        println!("ignoring extra arguments: {}", flags.extra().join(" "));
    }

    let command = match WrappedCommand::resolve(name) {
        Ok(command) => command,
        Err(e) => {
            println!("{}", e);
            return Ok(());
        }
    };

    let mut paths = SessionPaths::new()?;
    if let Some(config) = flags.get_value("config") {
        paths = paths.with_prompts_path(PathExpander::new().expand(config)?);
    }

    // Interrupts that arrive while no child is running must not end the
    // session; while one runs they are forwarded to it.
    ctrlc::set_handler(|| {})?;

    let editor = new_editor(&command.name)?;
    let mut session = Session::start(command, paths, &flags, editor);
    session.run()
}
