use clap::{Parser, Subcommand};
use serde_json::Value;

use gatehouse::auth::{decide, IdentityClaim, RedirectDecision};

#[derive(Parser)]
#[command(name = "gatehouse-cli")]
#[command(about = "Management CLI for the gatehouse site server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:4321")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check server health
    Health,
    /// Run the database status query and print the report
    DbTest,
    /// Evaluate the auth redirect policy locally
    Decide {
        /// Request path, e.g. /sign-in
        #[arg(short, long)]
        path: String,
        /// Signed-in user id; omit for an anonymous request
        #[arg(long)]
        user: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::DbTest => {
            let res = client.get(format!("{}/api/database", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Decide { path, user } => {
            let claim = match user {
                Some(id) if !id.trim().is_empty() => IdentityClaim::Present(id),
                _ => IdentityClaim::Absent,
            };
            match decide(&claim, &path) {
                RedirectDecision::PassThrough => println!("pass-through"),
                RedirectDecision::RedirectTo(target) => println!("302 Location: {target}"),
            }
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
