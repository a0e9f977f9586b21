use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "echo-cli")]
#[command(about = "Send requests to a request-echo server and print the description", long_about = None)]
struct Cli {
    /// Base URL including the route prefix.
    #[arg(short, long, default_value = "http://localhost:8000/api/py")]
    url: String,

    /// Extra request header, as `name:value`. Repeatable.
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe a GET request
    Get {
        /// Query parameter, as `key=value`. Repeatable.
        #[arg(short, long = "query", value_parser = parse_query)]
        query: Vec<(String, String)>,
    },
    /// Describe a POST request carrying a body
    Post {
        /// Request body, sent verbatim.
        #[arg(short, long, default_value = "")]
        data: String,
    },
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected name:value, got '{raw}'"))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

fn parse_query(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw.split_once('=').unwrap_or((raw, ""));
    Ok((key.to_string(), value.to_string()))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let endpoint = format!("{}/hello", cli.url.trim_end_matches('/'));

    let mut headers = HeaderMap::new();
    for (name, value) in &cli.headers {
        headers.append(
            HeaderName::from_bytes(name.as_bytes())?,
            HeaderValue::from_str(value)?,
        );
    }

    let res = match cli.command {
        Commands::Get { query } => {
            client.get(&endpoint)
                .headers(headers)
                .query(&query)
                .send()
                .await?
        }
        Commands::Post { data } => {
            client.post(&endpoint)
                .headers(headers)
                .body(data)
                .send()
                .await?
        }
    };
    print_response(res).await
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
