//! VPI protocol implementation

use anyhow::{bail, ensure, Context, Result};
use std::io::{self, Write};
use vespene::{
    ai::PlanStep,
    core::{Observation, Side},
    engine::{Engine, SearchOptions},
};

fn action_name(step: &PlanStep) -> &str {
    step.action.as_deref().unwrap_or("hold")
}

fn join_actions(steps: &[PlanStep]) -> String {
    steps.iter().map(action_name).collect::<Vec<_>>().join(",")
}

/// Handle a VPI command
pub fn handle_command(cmd: &str, engine: &mut Engine) -> Result<()> {
    let parts: Vec<&str> = cmd.split_whitespace().collect();

    if parts.is_empty() {
        return Ok(());
    }

    match parts[0] {
        "vpi" => {
            println!("id name Vespene");
            println!("option name strategy type combo default mcts var mcts var belief");
            println!("option name strictmode type check default false");
            println!("option name seed type string default none");
            println!("option name samples type spin default 3 min 1");
            println!("option name exploration type combo default zero var zero var infinite");
            println!("option name prune type check default true");
            println!("option name horizon type spin default 10 min 0");
            println!("vpiok");
            io::stdout().flush()?;
        }
        "isready" => {
            println!("readyok");
            io::stdout().flush()?;
        }
        "setoption" => {
            ensure!(
                parts.len() == 5 && parts[1] == "name" && parts[3] == "value",
                "invalid setoption command"
            );

            let option_name = parts[2];
            let option_value = parts[4];

            engine.set_option(option_name, option_value)?;
        }
        "position" => {
            ensure!(parts.len() == 2, "position command requires exactly 1 argument");

            match parts[1] {
                "startpos" => engine.set_startpos(),
                "clear" => engine.clear(),
                _ => bail!("invalid position command"),
            }
        }
        "observe" => {
            ensure!(parts.len() >= 3, "observe command requires a side and a record");

            if parts[1] == "file" {
                ensure!(parts.len() >= 4, "observe file requires a side and a path");

                let side: Side = parts[2].parse()?;
                let path = parts[3..].join(" ");
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("Cannot read {}", path))?;

                engine.observe(side, Observation::parse_history(&text)?)?;
            } else {
                let side: Side = parts[1].parse()?;
                let record: Observation = parts[2..].join(" ").parse()?;

                engine.observe(side, vec![record])?;
            }
        }
        "go" => {
            let args = parts[1..].join(" ");
            let search_options = args.parse::<SearchOptions>()?;

            let report = engine.go(&search_options)?;

            for step in report.steps.iter() {
                let category = step
                    .action
                    .as_deref()
                    .and_then(|action| engine.catalog.category_of(action))
                    .map_or("none".to_string(), |category| category.to_string());

                println!(
                    "info ply {} action {} category {} worth {:.2}",
                    step.depth,
                    action_name(step),
                    category,
                    step.worth
                );
            }

            println!("plan {}", join_actions(&report.steps));
            io::stdout().flush()?;
        }
        "reset" => {
            engine.reset()?;
        }
        "line" => {
            let line = engine.line()?;
            println!("line {}", join_actions(&line));
        }
        "display" => {
            println!("{}", engine.display());
        }
        "quit" => {
            std::process::exit(0);
        }
        cmd => {
            bail!("Unknown command: {}", cmd);
        }
    }

    Ok(())
}
