//! wwt - WorkWithTokens from the terminal
//!
//! Drives the WorkWithTokens HTTP API: chat with token costs, embeddings,
//! word similarity, RAG and the fine-tuned model.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use dialoguer::{Input, Password};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use api::WwtClient;
use config::Config;
use workwithtokens::domain::services::pricing::{estimate_all, relative_bar_percent};
use workwithtokens::domain::RESERVED_FIELDS;

#[derive(Parser)]
#[command(name = "wwt")]
#[command(about = "WorkWithTokens CLI - tokens, embeddings and RAG", long_about = None)]
#[command(version)]
struct Cli {
    /// Server URL (overrides the configured one)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ChatProviderArg {
    Claude,
    Openai,
}

impl ChatProviderArg {
    fn as_str(self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Openai => "openai",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum EmbedProviderArg {
    Openai,
    Nomic,
}

impl EmbedProviderArg {
    fn as_str(self) -> &'static str {
        match self {
            Self::Openai => "openai",
            Self::Nomic => "nomic",
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Login and store the access token
    Login {
        /// Username (will prompt if not provided)
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Create a user
    Register {
        /// Username (will prompt if not provided)
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Forget the stored access token
    Logout,

    /// Ask for a structured answer and show its token cost
    Chat {
        /// Prompt text
        message: String,
        #[arg(short, long, value_enum, default_value = "claude")]
        provider: ChatProviderArg,
    },

    /// Show the model settings of a provider
    Model {
        #[arg(short, long, value_enum, default_value = "claude")]
        provider: ChatProviderArg,
    },

    /// Estimate costs offline for a token count
    Pricing {
        /// Prompt tokens
        #[arg(long, default_value = "0")]
        prompt: usize,
        /// Response tokens
        #[arg(long, default_value = "0")]
        response: usize,
    },

    /// Embed text into a vector
    Embed {
        text: String,
        #[arg(long, value_enum, default_value = "openai")]
        provider: EmbedProviderArg,
        /// Print the full vector instead of a preview
        #[arg(long)]
        full: bool,
    },

    /// Compare two words by embedding similarity
    Compare { word1: String, word2: String },

    /// Ask or grow the document store
    Rag {
        #[command(subcommand)]
        action: RagAction,
    },

    /// Query the fine-tuned model
    Ft {
        /// Question (will prompt if not provided)
        query: Option<String>,
    },

    /// Show current configuration
    Config {
        /// Set the server URL
        #[arg(long)]
        set_url: Option<String>,
    },
}

#[derive(Subcommand)]
enum RagAction {
    /// Ask a question over the uploaded documents
    Ask { question: String },
    /// Upload a document
    Upload { file: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load()?;
    if let Some(url) = cli.url {
        config.base_url = url;
    }

    match cli.command {
        Commands::Login { username } => cmd_login(config, username).await,
        Commands::Register { username } => cmd_register(&config, username).await,
        Commands::Logout => cmd_logout(config),
        Commands::Chat { message, provider } => cmd_chat(&config, &message, provider).await,
        Commands::Model { provider } => cmd_model(&config, provider).await,
        Commands::Pricing { prompt, response } => {
            print_cost_table(prompt, response);
            Ok(())
        }
        Commands::Embed {
            text,
            provider,
            full,
        } => cmd_embed(&config, &text, provider, full).await,
        Commands::Compare { word1, word2 } => cmd_compare(&config, &word1, &word2).await,
        Commands::Rag { action } => cmd_rag(&config, action).await,
        Commands::Ft { query } => cmd_ft(&config, query).await,
        Commands::Config { set_url } => cmd_config(config, set_url),
    }
}

// ============================================
// Command Implementations
// ============================================

fn prompt_credentials(username: Option<String>, confirm: bool) -> Result<(String, String)> {
    let username = match username {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .context("Failed to read username")?,
    };

    let mut password = Password::new().with_prompt("Password");
    if confirm {
        password = password.with_confirmation("Confirm password", "Passwords do not match");
    }
    let password = password.interact().context("Failed to read password")?;

    Ok((username, password))
}

fn authed_client(config: &Config) -> Result<WwtClient> {
    Ok(WwtClient::new(&config.base_url, Some(config.token()?)))
}

async fn cmd_login(mut config: Config, username: Option<String>) -> Result<()> {
    let client = WwtClient::new(&config.base_url, None);

    print!("Testing connection... ");
    match client.health().await {
        Ok(true) => println!("{}", "OK".green()),
        _ => {
            println!("{}", "Failed".red());
            bail!("Could not reach WorkWithTokens at {}", config.base_url);
        }
    }

    let (username, password) = prompt_credentials(username, false)?;
    let resp = client.login(&username, &password).await?;

    let token = match (resp.success, resp.access_token) {
        (true, Some(token)) => token,
        _ => bail!("{}", resp.message),
    };

    config.set_session(resp.username.unwrap_or(username), token);
    config.save()?;

    println!(
        "{} Logged in as {} (token saved to {:?})",
        "✓".green(),
        config.username.as_deref().unwrap_or_default().cyan(),
        Config::config_path()?
    );

    Ok(())
}

async fn cmd_register(config: &Config, username: Option<String>) -> Result<()> {
    let (username, password) = prompt_credentials(username, true)?;

    let client = WwtClient::new(&config.base_url, None);
    let user = client.register(&username, &password).await?;

    println!(
        "{} {} ({} #{})",
        "✓".green(),
        user.message,
        user.username.cyan(),
        user.user_id
    );
    println!("\n{}", "Log in with:".dimmed());
    println!("  wwt login -u {}", user.username);

    Ok(())
}

fn cmd_logout(mut config: Config) -> Result<()> {
    if config.clear_session() {
        config.save()?;
        println!("{} Logged out", "✓".green());
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

async fn cmd_chat(config: &Config, message: &str, provider: ChatProviderArg) -> Result<()> {
    let client = authed_client(config)?;
    let mut answer = client.chat(message, provider.as_str()).await?;

    let prompt_tokens = take_count(&mut answer, RESERVED_FIELDS[0]);
    let response_tokens = take_count(&mut answer, RESERVED_FIELDS[1]);
    let total_tokens = take_count(&mut answer, RESERVED_FIELDS[2]);

    print_answer(&answer);

    println!(
        "\n{} {} prompt + {} response = {} tokens",
        "Tokens:".bold(),
        prompt_tokens,
        response_tokens,
        total_tokens.to_string().green()
    );

    println!();
    print_cost_table(prompt_tokens, response_tokens);

    Ok(())
}

fn take_count(answer: &mut Map<String, Value>, key: &str) -> usize {
    answer
        .remove(key)
        .and_then(|v| v.as_u64())
        .unwrap_or_default() as usize
}

fn print_answer(answer: &Map<String, Value>) {
    if let Some(error) = answer.get("error").and_then(Value::as_str) {
        println!("{} {}", "✗".red(), error.red());
        if let Some(raw) = answer.get("raw").and_then(Value::as_str) {
            println!("  {}", truncate_string(raw, 200).dimmed());
        }
        return;
    }

    for (key, value) in answer {
        let value = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        println!("  {} {}", format!("{}:", key).cyan(), value);
    }
}

/// Estimated cost on every catalog model, with log-scaled bars
fn print_cost_table(prompt_tokens: usize, response_tokens: usize) {
    let estimates = estimate_all(prompt_tokens, response_tokens);
    let max_cost = estimates
        .iter()
        .map(|e| e.total_cost)
        .fold(0.0_f64, f64::max);

    println!(
        "{} ({} prompt / {} response tokens)",
        "Estimated cost:".bold(),
        prompt_tokens,
        response_tokens
    );
    for estimate in estimates {
        let width = relative_bar_percent(estimate.total_cost, max_cost) / 5;
        println!(
            "  {:<18} ${:>10.6}  {}",
            estimate.name,
            estimate.total_cost,
            "█".repeat(width as usize).yellow()
        );
    }
}

async fn cmd_model(config: &Config, provider: ChatProviderArg) -> Result<()> {
    let client = authed_client(config)?;
    let settings = client.model(provider.as_str()).await?;

    println!("{}", provider.as_str().bold());
    println!("  Model: {}", settings.model.cyan());
    println!("  Temperature: {}", settings.temperature);
    println!("  Max tokens: {}", settings.max_tokens);

    Ok(())
}

async fn cmd_embed(
    config: &Config,
    text: &str,
    provider: EmbedProviderArg,
    full: bool,
) -> Result<()> {
    let client = authed_client(config)?;
    let embedding = client.embed(provider.as_str(), text).await?;

    println!(
        "{} {} dimensions ({})",
        "✓".green(),
        embedding.length.to_string().cyan(),
        provider.as_str()
    );

    let shown = if full {
        &embedding.vector[..]
    } else {
        &embedding.vector[..embedding.vector.len().min(8)]
    };
    let values: Vec<String> = shown.iter().map(|v| format!("{:.4}", v)).collect();
    let ellipsis = if shown.len() < embedding.vector.len() {
        ", ..."
    } else {
        ""
    };
    println!("  [{}{}]", values.join(", "), ellipsis);

    Ok(())
}

async fn cmd_compare(config: &Config, word1: &str, word2: &str) -> Result<()> {
    let client = authed_client(config)?;
    let comparison = client.compare(word1, word2).await?;

    println!(
        "{} vs {}: {}",
        comparison.word1.cyan(),
        comparison.word2.cyan(),
        comparison.similarity.green().bold()
    );
    println!("  {}", comparison.similarity_explanation);

    Ok(())
}

async fn cmd_rag(config: &Config, action: RagAction) -> Result<()> {
    let client = authed_client(config)?;

    match action {
        RagAction::Ask { question } => {
            let resp = client.rag_ask(&question).await?;
            let answer = resp.answer;

            let source = match (answer.from_data, answer.from_ai) {
                (true, true) => "documents + model",
                (true, false) => "documents",
                (false, true) => "model",
                (false, false) => "unknown",
            };

            println!("{} {}", "Q:".bold(), resp.query);
            println!("{} {}", "A:".bold(), answer.answer);
            println!(
                "  {}",
                format!("source: {}, tokens: {}", source, answer.tokens).dimmed()
            );
        }

        RagAction::Upload { file } => {
            let path = Path::new(&file);
            let bytes = fs::read(path).with_context(|| format!("Failed to read file: {}", file))?;
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("upload");

            let upload = client.rag_upload(file_name, bytes).await?;

            println!(
                "{} {} added to {} [{}]",
                "✓".green(),
                upload.file_name.cyan(),
                upload.vector_store_id.dimmed(),
                upload.status
            );
            println!("  {} files in store", upload.file_count);
        }
    }

    Ok(())
}

async fn cmd_ft(config: &Config, query: Option<String>) -> Result<()> {
    let client = authed_client(config)?;

    let query = match query {
        Some(q) => q,
        None => Input::new()
            .with_prompt("Query")
            .interact_text()
            .context("Failed to read input")?,
    };

    let answer = client.fine_tune(&query).await?;

    println!("  {} {}", "English:".cyan(), answer.answer_in_english);
    println!("  {} {}", "Romanian:".cyan(), answer.answer_in_romanian);
    println!("  {} {}", "Hebrew:".cyan(), answer.translate_to_hebrew);
    println!(
        "  {} {}",
        "Slang:".cyan(),
        if answer.is_it_slang {
            "yes".yellow()
        } else {
            "no".normal()
        }
    );

    Ok(())
}

/// Truncate string safely for UTF-8 (by char count, not bytes)
fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    } else {
        s.to_string()
    }
}

fn cmd_config(mut config: Config, set_url: Option<String>) -> Result<()> {
    if let Some(url) = set_url {
        config.base_url = url;
        config.save()?;
        println!("{} Server URL set to {}", "✓".green(), config.base_url);
    }

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);
    println!(
        "  User: {}",
        config.username.as_deref().unwrap_or("None").cyan()
    );
    println!(
        "  Access Token: {}",
        if config.access_token.is_some() {
            "Set".green()
        } else {
            "Not set".red()
        }
    );

    Ok(())
}
