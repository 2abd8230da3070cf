//! One-shot submission client: posts a single contact message to a running
//! postbox-server and reports the outcome. No retry.

#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::print_stdout, clippy::print_stderr)]

use anyhow::bail;
use clap::Parser;
use serde_json::json;

#[derive(Debug, Parser)]
#[command(version, about = "Send one contact submission to a postbox-server")]
struct Cli {
    /// Contact endpoint of the target server
    #[arg(long, env = "POSTBOX_URL", default_value = "http://127.0.0.1:3000/api/contact")]
    url: String,

    /// Your name
    #[arg(long)]
    name: String,

    /// Your email address (used for the reply)
    #[arg(long)]
    email: String,

    /// The message body
    #[arg(long)]
    message: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let body = json!({
        "name": cli.name,
        "email": cli.email,
        "message": cli.message,
    });

    let response = match reqwest::Client::new().post(&cli.url).json(&body).send().await {
        Ok(response) => response,
        Err(e) => bail!("Network error, submission not sent: {e}"),
    };

    let status = response.status();
    let payload: serde_json::Value = response.json().await.unwrap_or_default();

    if let Some(error) = payload.get("error").and_then(serde_json::Value::as_str) {
        bail!("Submission failed ({status}): {error}");
    }
    if !status.is_success() {
        bail!("Submission failed ({status})");
    }

    if payload.get("saved").is_some() {
        println!("Message saved to the server's local contact log (no mail provider configured).");
    } else {
        println!("Message sent, thanks for reaching out!");
    }
    Ok(())
}
