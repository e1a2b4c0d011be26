use ai_client::{Agent, Gemini, OpenAi};
use anyhow::Result;
use clap::Parser;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rednote_common::{Config, LlmProvider, ScrapeRequest};
use rednote_scout::collector::{Collector, CollectorConfig};
use rednote_scout::crew::Crew;
use rednote_scout::persist;
use rednote_scout::renderer::BrowserlessRenderer;

#[derive(Parser)]
#[command(name = "rednote")]
#[command(about = "Scrape viral Rednote posts for a topic, analyze them, and write new variations")]
#[command(version)]
struct Cli {
    /// Topic to analyze. Prompted for when omitted.
    #[arg(short, long)]
    topic: Option<String>,
}

fn rule() -> String {
    "=".repeat(60)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("rednote=info".parse()?))
        .init();

    let cli = Cli::parse();

    println!("{}", rule());
    println!("{}", style("Rednote Virality Agents - Content Creation System").bold());
    println!("{}", rule());
    println!();

    let topic = match cli.topic {
        Some(topic) => topic,
        None => match Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Enter the topic you want to analyze and create content for")
            .allow_empty(true)
            .interact_text()
        {
            Ok(topic) => topic,
            Err(e) => {
                println!("{} {e}", style("Error reading topic:").red());
                return Ok(());
            }
        },
    };
    let topic = topic.trim().to_string();

    if topic.is_empty() {
        println!("{}", style("Error: Topic cannot be empty.").red());
        return Ok(());
    }

    println!("\nStarting analysis for topic: '{topic}'");
    println!("This may take a few minutes...\n");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("\n{} {e}", style("Configuration Error:").red());
            println!("\nPlease ensure:");
            println!("1. You have created a .env file with your API key");
            println!("2. Set either OPENAI_API_KEY or GEMINI_API_KEY");
            println!("3. Optionally set LLM_PROVIDER to 'openai' or 'gemini'");
            return Ok(());
        }
    };
    config.log_redacted();
    println!("Using LLM provider: {}\n", config.llm.provider);

    let outcome = match config.llm.provider {
        LlmProvider::OpenAi => {
            run(OpenAi::new(&config.llm.api_key, &config.llm.model), &config, &topic).await
        }
        LlmProvider::Gemini => {
            run(Gemini::new(&config.llm.api_key, &config.llm.model), &config, &topic).await
        }
    };

    if let Err(e) = outcome {
        println!("\n{} {e:#}", style("Error during execution:").red());
        eprintln!("{e:?}");
    }
    Ok(())
}

async fn run<A: Agent>(agent: A, config: &Config, topic: &str) -> Result<()> {
    info!(agent = %agent.name(), "Assembling crew");
    let renderer =
        BrowserlessRenderer::new(&config.browserless_url, config.browserless_token.as_deref());
    let collector = Collector::new(
        renderer,
        CollectorConfig::builder()
            .cookies_path(config.cookies_path.clone())
            .output_dir(config.output_dir.clone())
            .build(),
    );
    let crew = Crew::new(agent, collector, config.llm.temperature);

    println!("{}", rule());
    println!("Starting crew execution...");
    println!("{}", rule());
    println!();

    let report = crew.kickoff(topic).await?;

    println!("\n{}", rule());
    println!("{}", style("FINAL RESULTS").bold());
    println!("{}", rule());
    println!("{}", report.variations);
    println!("{}", rule());

    let path = persist::write_result(
        &config.output_dir,
        &ScrapeRequest::new(topic),
        &report.variations,
    )?;
    println!("\nResults also saved to: {}", path.display());
    Ok(())
}
