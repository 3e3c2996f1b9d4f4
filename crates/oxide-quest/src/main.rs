//! oxide-quest CLI
//!
//! Terminal front end for the SQL adventure game.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_quest::render::{render_rows, render_table};
use oxide_quest::{
    grade, resolve, Attempt, Catalog, ExecutionResult, Game, GameSession, LevelId, Verdict,
};

/// Learn SQL by answering questions about small themed databases.
#[derive(Parser)]
#[command(name = "oxide-quest")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available levels.
    Levels,

    /// Print every table of a level's dataset.
    Tables {
        /// Level to show (beginner, intermediate, expert).
        #[arg(short, long, env = "OXIDE_QUEST_LEVEL")]
        level: LevelId,
    },

    /// Play interactively.
    Play {
        /// Level to start on; chosen interactively if not specified.
        #[arg(short, long, env = "OXIDE_QUEST_LEVEL")]
        level: Option<LevelId>,
    },

    /// Resolve and grade one query against one task.
    Run {
        /// Level the task belongs to.
        #[arg(short, long, env = "OXIDE_QUEST_LEVEL")]
        level: LevelId,

        /// Task number, starting at 1.
        #[arg(short, long, default_value_t = 1)]
        task: usize,

        /// SQL to submit.
        #[arg(short, long)]
        query: String,
    },

    /// Check that every task's expected query passes its own grading.
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let catalog = Catalog::bundled();

    match cli.command {
        Commands::Levels => {
            let summaries = catalog.summaries();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                for s in &summaries {
                    println!("{:<13} {}", s.id, s.name);
                    println!("{:<13} {}", "", s.description);
                    println!(
                        "{:<13} {} tasks, up to {} points\n",
                        "", s.tasks, s.max_score
                    );
                }
            }
        }

        Commands::Tables { level } => {
            let level = catalog
                .level(level)
                .with_context(|| format!("level {level} is not bundled"))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&level.dataset)?);
            } else {
                for table in level.dataset.tables() {
                    println!("{}", render_table(table, None));
                }
            }
        }

        Commands::Run { level, task, query } => {
            let level = catalog
                .level(level)
                .with_context(|| format!("level {level} is not bundled"))?;
            let Some(task) = task.checked_sub(1).and_then(|i| level.task(i)) else {
                bail!("level {} has tasks 1 to {}", level.id, level.tasks.len());
            };

            let result = resolve(&query, &level.dataset);
            let verdict = grade(task, &query, &result);

            if cli.json {
                let output = json!({
                    "level": level.id,
                    "task": task.id,
                    "result": result_json(&result),
                    "verdict": verdict,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("Task {}: {}\n", task.id, task.question);
                print_result(&result);
                print_verdict(&verdict, verdict.is_correct.then(|| task.points()));
            }
        }

        Commands::Check => {
            let mut failures = Vec::new();
            for level in catalog.levels() {
                for task in &level.tasks {
                    let result = resolve(&task.expected_query, &level.dataset);
                    let verdict = grade(task, &task.expected_query, &result);
                    let rows_match = result.as_ref().ok() == Some(&task.expected_result);
                    if !verdict.is_correct || !rows_match {
                        failures.push(json!({
                            "level": level.id,
                            "task": task.id,
                            "query": task.expected_query,
                            "verdict": verdict,
                        }));
                    }
                }
            }

            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({ "failures": failures }))?
                );
            } else if failures.is_empty() {
                info!("All expected queries pass their own grading.");
            }
            if !failures.is_empty() {
                bail!("{} task(s) failed self-grading", failures.len());
            }
        }

        Commands::Play { level } => play(Game::bundled(), level)?,
    }

    Ok(())
}

fn result_json(result: &ExecutionResult) -> serde_json::Value {
    match result {
        Ok(rows) => json!({ "rows": rows }),
        Err(e) => json!({ "error": e, "message": e.to_string() }),
    }
}

fn print_result(result: &ExecutionResult) {
    match result {
        Ok(rows) => println!("{}", render_rows(rows)),
        Err(e) => println!("Error: {e}"),
    }
}

fn print_verdict(verdict: &Verdict, points: Option<u32>) {
    if verdict.is_correct {
        match points {
            Some(points) => println!("Correct! {} +{points} points", verdict.feedback),
            None => println!("Correct! {}", verdict.feedback),
        }
    } else {
        println!("{}", verdict.feedback);
        if let Some(suggestion) = &verdict.suggestion {
            println!("Suggestion: {suggestion}");
        }
    }
}

fn print_task(session: &GameSession<'_>) {
    let level = session.level();
    match session.task() {
        Some(task) => {
            println!(
                "\n[{}] Task {}/{} (score {})",
                level.title(),
                task.id,
                level.tasks.len(),
                session.score()
            );
            println!("{}", task.question);
        }
        None => println!(
            "\nLevel Completed! Total Score: {}",
            session.final_score().unwrap_or_else(|| session.score())
        ),
    }
}

fn print_levels(game: &Game) {
    for s in game.list_levels() {
        println!("  {:<13} {}", s.id, s.name);
    }
}

const PLAY_HELP: &str = "\
Type SQL to submit it for the current task. Commands:
  :hint          reveal the next hint
  :next          advance after a correct answer
  :reset         restart the level
  :tables        preview the level's tables
  :level <id>    switch level
  :levels        list levels
  :quit          leave";

fn play(mut game: Game, level: Option<LevelId>) -> anyhow::Result<()> {
    println!("oxide-quest: SQL Adventure Game");
    println!("{PLAY_HELP}");

    if let Some(level) = level {
        print_task(game.select_level(level)?);
    } else {
        println!("\nChoose a level with :level <id>");
        print_levels(&game);
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("quest> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let (command, arg) = input
            .split_once(char::is_whitespace)
            .map_or((input, ""), |(c, a)| (c, a.trim()));

        match command {
            ":quit" | ":exit" => break,
            ":help" => println!("{PLAY_HELP}"),
            ":levels" => print_levels(&game),
            ":level" => match game.switch_level(arg) {
                Ok(session) => print_task(session),
                Err(e) => {
                    println!("{e}");
                    print_levels(&game);
                }
            },
            ":tables" => match game.session() {
                Some(session) => {
                    for table in session.level().dataset.tables() {
                        println!("{}", render_table(table, Some(3)));
                    }
                }
                None => println!("No level selected."),
            },
            ":hint" => match game.reveal_hint() {
                Ok(Some(hint)) => println!("Hint: {hint}"),
                Ok(None) => println!("No more hints."),
                Err(e) => println!("{e}"),
            },
            ":next" => match game.advance() {
                Ok(session) => print_task(session),
                Err(e) => println!("{e}"),
            },
            ":reset" => match game.reset() {
                Ok(session) => print_task(session),
                Err(e) => println!("{e}"),
            },
            _ if command.starts_with(':') => println!("Unknown command: {command}"),
            _ => match game.submit_query(input) {
                Ok(Attempt {
                    result,
                    verdict,
                    points,
                }) => {
                    print_result(&result);
                    print_verdict(&verdict, points);
                    if points.is_some() {
                        println!("Type :next to continue.");
                    }
                }
                Err(e) => println!("{e}"),
            },
        }
    }

    Ok(())
}
