use std::io::{self, BufRead};
use tracing_subscriber::EnvFilter;
use vespene::engine::Engine;

mod vpi;
use vpi::command::parse_command;
use vpi::protocol::handle_command;

fn main() {
    // stdout carries the protocol, so logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    println!("Vespene - Macro Planner");

    let stdin = io::stdin();
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let input = match line {
            Ok(input) => input,
            Err(err) => {
                eprintln!("{}", err);
                break;
            }
        };

        if let Some(cmd) = parse_command(&input) {
            if let Err(err) = handle_command(&cmd, &mut engine) {
                if engine.options.strict_mode {
                    panic!("{:#}", err);
                } else {
                    eprintln!("{:#}", err);
                }
            }
        }
    }
}
