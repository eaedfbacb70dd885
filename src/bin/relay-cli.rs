use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Query a running topic relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the robot's topics through the relay
    Topics,
    /// Show which rosbridge the relay talks to
    Config,
    /// Check that the relay is up
    Health,
}

impl Commands {
    fn path(&self) -> &'static str {
        match self {
            Commands::Topics => "/api/topics",
            Commands::Config => "/api/robot_config",
            Commands::Health => "/healthz",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let url = format!("{}{}", cli.url.trim_end_matches('/'), cli.command.path());
    let res = client.get(url).send().await?;

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    if let Some(error) = json.get("error").and_then(Value::as_str) {
        eprintln!("Bridge error: {}", error);
    }
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
