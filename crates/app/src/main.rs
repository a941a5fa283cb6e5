mod config;
mod console;
mod logging;

use quiz_core::Clock;
use services::QuizSession;
use tokio::io::{AsyncBufReadExt, BufReader};

use config::{AppConfig, print_usage};
use console::{Console, ConsoleCommand, HELP, Reply};

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    let config = AppConfig::resolve(std::env::args().skip(1), |name| {
        std::env::var(name).ok()
    })
    .inspect_err(|_| print_usage())?;

    logging::init_logging(&config.log_filter);

    let key = config.load_answer_key()?;
    tracing::info!(
        questions = key.len(),
        source = ?config.key_source,
        "answer key loaded"
    );

    let mut console = Console::new(QuizSession::new(key), Clock::default_clock());
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<ConsoleCommand>() {
            Ok(command) => command,
            Err(err) => {
                println!("error: {err}");
                continue;
            }
        };

        match console.execute(command) {
            Ok(Reply::Print(text)) => println!("{text}"),
            Ok(Reply::Quit) => break,
            Err(err) => {
                tracing::warn!(error = %err, input = %line.trim(), "command rejected");
                println!("error: {err}");
            }
        }
    }

    tracing::info!("console closed");
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
