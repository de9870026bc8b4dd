use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing_subscriber::filter::EnvFilter;

use gradus_core::GradusError;
use gradus_core::completion::SamplingParams;
use gradus_core::engine::{EvaluationOutcome, MilestoneReady, Phase, ProgressionEngine};
use gradus_core::language::Language;
use gradus_infrastructure::{ConfigStorage, SecretStorage, WorkspacePlayground};
use gradus_interaction::GroqApiAgent;

/// Gradus - incremental coding exercises driven by a hosted LLM.
#[derive(Parser, Debug)]
#[command(name = "gradus")]
#[command(about = "Gradus - an incremental coding-exercise coach", long_about = None)]
#[command(version)]
struct Args {
    /// Workspace directory the playground file is written into
    #[arg(long, default_value = ".")]
    workspace: PathBuf,

    /// Exercise language (inferred from the goal when omitted)
    #[arg(long)]
    language: Option<String>,

    /// Learning goal; starts the session immediately instead of prompting
    #[arg(long)]
    topic: Option<String>,

    /// Model override (also settable via config.toml)
    #[arg(long)]
    model: Option<String>,
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: vec![
                "/check".to_string(),
                "/new".to_string(),
                "/retry".to_string(),
            ],
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

fn print_error(err: &GradusError) {
    eprintln!("{}", err.to_string().red());
}

fn print_milestone(ready: &MilestoneReady) {
    println!(
        "{}",
        format!(
            "Milestone {} written to {}",
            ready.index,
            ready.path.display()
        )
        .bright_blue()
    );
    println!(
        "{}",
        "Edit the file with your solution, then type /check.".bright_black()
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::debug!(?args, "starting gradus");

    // ===== Config gate =====
    // Missing file, malformed file and missing key each get their own
    // message, and in all three cases the session loop never starts.
    let secret = match SecretStorage::new() {
        Ok(storage) => storage,
        Err(e) => {
            print_error(&e.into());
            return Ok(());
        }
    };
    let api_key = match secret.api_key() {
        Ok(key) => key,
        Err(e) => {
            print_error(&e);
            eprintln!(
                "{}",
                format!(
                    "Put {{\"groqApiKey\": \"...\"}} into {} or set GROQ_API_KEY.",
                    secret.path().display()
                )
                .bright_black()
            );
            return Ok(());
        }
    };
    let app_config = match ConfigStorage::new().map(|storage| storage.load()) {
        Ok(Ok(config)) => config,
        Ok(Err(e)) => {
            print_error(&e.into());
            return Ok(());
        }
        Err(e) => {
            print_error(&e.into());
            return Ok(());
        }
    };

    // ===== Collaborators =====
    let mut agent = GroqApiAgent::new(api_key);
    if let Some(model) = args.model.or(app_config.model) {
        agent = agent.with_model(model);
    }

    let mut generation_params = SamplingParams::generation();
    if app_config.temperature.is_some() {
        generation_params.temperature = app_config.temperature;
    }
    if app_config.max_tokens.is_some() {
        generation_params.max_tokens = app_config.max_tokens;
    }

    let playground = match WorkspacePlayground::new(&args.workspace) {
        Ok(sink) => sink,
        Err(e) => {
            print_error(&e);
            return Ok(());
        }
    };

    let mut engine =
        ProgressionEngine::new(agent, playground).with_generation_params(generation_params);

    let explicit_language = args.language.as_deref().and_then(|name| {
        let parsed = Language::parse(name);
        if parsed.is_none() {
            println!(
                "{}",
                format!("Unknown language '{name}', inferring from the goal instead.").yellow()
            );
        }
        parsed
    });

    // ===== Session setup =====
    println!("{}", "=== Gradus ===".bright_magenta().bold());
    println!(
        "{}",
        "Describe what you want to learn to start. /check grades your solution, /new restarts, 'quit' exits."
            .bright_black()
    );
    println!();

    engine.start();

    if let Some(topic) = args.topic.as_deref() {
        match engine.supply_goal(topic, explicit_language).await {
            Ok(ready) => print_milestone(&ready),
            Err(e) => {
                print_error(&e);
                if engine.phase() == Phase::GeneratingMilestone {
                    println!("{}", "Type /retry to try generating again.".bright_black());
                }
            }
        }
    }

    // ===== Main REPL Loop =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    loop {
        let prompt = match engine.phase() {
            Phase::AwaitingGoal => "goal> ",
            _ => ">> ",
        };
        let readline = rl.readline(prompt);

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                match trimmed {
                    "/check" => {
                        if engine.phase() != Phase::AwaitingSolution {
                            println!(
                                "{}",
                                "Nothing to check yet - start a session first.".bright_black()
                            );
                            continue;
                        }
                        match engine.evaluate().await {
                            Ok(EvaluationOutcome::Rejected) => {
                                println!(
                                    "{}",
                                    "Not yet. Edit your solution and /check again.".yellow()
                                );
                            }
                            Ok(EvaluationOutcome::Advanced(ready)) => {
                                println!("{}", "PASS! Advancing.".bright_green());
                                print_milestone(&ready);
                            }
                            Ok(EvaluationOutcome::AdvancedPendingGeneration {
                                next_index,
                                error,
                            }) => {
                                println!(
                                    "{}",
                                    format!("PASS! You reached milestone {next_index}.")
                                        .bright_green()
                                );
                                print_error(&error);
                                println!(
                                    "{}",
                                    "Type /retry to generate the next exercise.".bright_black()
                                );
                            }
                            Err(e) => print_error(&e),
                        }
                    }
                    "/retry" => {
                        if engine.phase() != Phase::GeneratingMilestone {
                            println!("{}", "No failed generation to retry.".bright_black());
                            continue;
                        }
                        match engine.generate_milestone().await {
                            Ok(ready) => print_milestone(&ready),
                            Err(e) => print_error(&e),
                        }
                    }
                    "/new" => {
                        engine.start();
                        println!("{}", "What do you want to learn?".bright_blue());
                    }
                    goal if engine.phase() == Phase::AwaitingGoal => {
                        println!("{}", format!("> {}", goal).green());
                        match engine.supply_goal(goal, explicit_language).await {
                            Ok(ready) => print_milestone(&ready),
                            Err(e) => {
                                print_error(&e);
                                if engine.phase() == Phase::GeneratingMilestone {
                                    println!(
                                        "{}",
                                        "Type /retry to try generating again.".bright_black()
                                    );
                                }
                            }
                        }
                    }
                    _ => {
                        println!("{}", "Unknown command".bright_black());
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
