//! Akinator binary entry point.

use std::io::Write;
use std::process::ExitCode;

use akinator::cli::{self, Args};
use akinator::config::Config;
use akinator::{logging, Answer, AsyncAkinator, GameResult, Started};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Try 'akinator --help' for more information.");
            return ExitCode::from(2);
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }
    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let _ = logging::try_init_with(config.log_filter());
    info!("akinator v{}", env!("CARGO_PKG_VERSION"));

    match play(&config, &args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn show(result: &GameResult, args: &Args) {
    if args.json {
        println!("{}", result);
        return;
    }
    match result {
        GameResult::Started(started) => {
            println!("[{} | {:.0}%] {}", started.step + 1, started.progress_percent(), started.question)
        }
        GameResult::Guessed(guess) => {
            println!("I think of {}: {}", guess.name, guess.description);
            if !guess.photo_url.is_empty() {
                println!("{}", guess.photo_url);
            }
        }
        GameResult::Failed(failed) => println!("{}", failed.message),
    }
}

async fn play(config: &Config, args: &Args) -> akinator::Result<()> {
    let aki = AsyncAkinator::from_config(config)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let mut current: Started = match aki.start().await {
        GameResult::Started(started) => started,
        other => {
            show(&other, args);
            return Ok(());
        }
    };
    show(&GameResult::Started(current.clone()), args);

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };

        let result = match line.trim() {
            "" => continue,
            "q" | "quit" => return Ok(()),
            "b" | "back" => aki.back(current.game_id.as_str()).await,
            input => match input.parse::<Answer>() {
                Ok(answer) => aki.answer(current.game_id.as_str(), answer).await,
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            },
        };

        show(&result, args);
        match result {
            GameResult::Started(next) => current = next,
            GameResult::Guessed(_) => return Ok(()),
            // A rejected back or a transient error leaves the question in place
            GameResult::Failed(_) => {}
        }
    }
}
