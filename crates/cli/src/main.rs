use std::io::{self, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};
use touchline_core::KnowledgeBase;
use touchline_engine::QueryEngine;
use touchline_observability::{init_tracing, AppMetrics};
use touchline_providers::{ApiFootballClient, NewsApiClient, ProviderConfig};

type Engine = QueryEngine<NewsApiClient, ApiFootballClient>;

#[derive(Debug, Parser)]
#[command(name = "touchline")]
#[command(about = "Touchline Concierge CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive chat loop
    Chat,
    /// Answer one question and exit
    Ask { question: String },
    /// Fetch the latest transfer-news digest
    News {
        #[arg(long, default_value_t = 3)]
        limit: usize,
    },
    /// Fetch the upcoming-fixtures digest
    Fixtures {
        #[arg(long, default_value_t = 3)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("touchline_cli");
    let cli = Cli::parse();

    let engine = build_engine()?;

    match cli.command {
        Command::Chat => run_chat(engine).await?,
        Command::Ask { question } => {
            println!("{}", engine.respond(&question).await?);
        }
        Command::News { limit } => {
            println!("{}", engine.news_digest(limit).await);
        }
        Command::Fixtures { limit } => {
            println!("{}", engine.fixtures_digest(limit).await);
        }
    }

    Ok(())
}

async fn run_chat(engine: Engine) -> Result<()> {
    println!("Touchline Concierge chat mode. type 'exit' to quit.");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }

        if message.is_empty() {
            continue;
        }

        let reply = engine.respond(message).await?;
        println!("\n{reply}\n");
    }

    Ok(())
}

fn build_engine() -> Result<Engine> {
    let metrics = AppMetrics::shared();
    let config = ProviderConfig::from_env();
    let http_client = config.build_http_client()?;

    Ok(QueryEngine::new(
        KnowledgeBase::with_default_facts(),
        NewsApiClient::new(http_client.clone(), config.clone()),
        ApiFootballClient::new(http_client, config),
        metrics,
    ))
}
