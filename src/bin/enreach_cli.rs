//! enreach-cli: EnreachVoice 命令行工具：查看分类、转录、录音与分类方案
//!
//! Usage:
//!   enreach-cli classification <call-id>           Pretty-printed call classification
//!   enreach-cli transcript <id> [--no-wait]         Fetch a transcript
//!   enreach-cli recording <id> [--dir <path>]       Download a recording as mp3
//!   enreach-cli schemas                             List classification schemas

use anyhow::{bail, Context};
use enreachvoice::{EnreachClient, SchemaListOptions};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("enreachvoice=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "classification" => cmd_classification(&args[2..]).await,
        "transcript" => cmd_transcript(&args[2..]).await,
        "recording" => cmd_recording(&args[2..]).await,
        "schemas" => cmd_schemas().await,
        "version" | "--version" | "-V" => {
            println!("enreach-cli {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        r#"enreach-cli - EnreachVoice command line tool

USAGE:
    enreach-cli <COMMAND> [OPTIONS]

COMMANDS:
    classification <call-id>          Show a call classification with TagsPretty
    transcript <id> [--no-wait]       Fetch a transcript (waits while Pending by default)
    recording <id> [--dir <path>]     Download a recording to <path>/<id>.mp3
    schemas                           List classification schemas with groups and tags
    version                           Show version information
    help                              Show this help message

ENVIRONMENT:
    ENREACH_USERNAME                  User email address (required)
    ENREACH_SECRET_KEY                API secret key
    ENREACH_PASSWORD                  Password, used when no secret key is set
    ENREACH_DISCOVERY_URL             Discovery service URL override
    ENREACH_API_ENDPOINT              Skip discovery and use this endpoint
    RUST_LOG                          Log filter (default enreachvoice=info)"#
    );
}

async fn connect() -> anyhow::Result<EnreachClient> {
    let username = std::env::var("ENREACH_USERNAME").context("ENREACH_USERNAME is not set")?;
    let mut builder = EnreachClient::builder().username(username);
    if let Ok(password) = std::env::var("ENREACH_PASSWORD") {
        builder = builder.password(password);
    }
    // ENREACH_SECRET_KEY and the discovery/endpoint overrides are read by the builder itself.
    Ok(builder.build().await?)
}

fn positional<'a>(args: &'a [String], what: &str) -> anyhow::Result<&'a str> {
    match args.first() {
        Some(v) if !v.starts_with("--") => Ok(v.as_str()),
        _ => bail!("missing <{what}> argument"),
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn cmd_classification(args: &[String]) -> anyhow::Result<()> {
    let call_id = positional(args, "call-id")?;
    let client = connect().await?;
    match client.get_call_classification_pretty(call_id).await? {
        Some(classification) => print_json(&classification),
        None => {
            eprintln!("No classification found for call {call_id}");
            Ok(())
        }
    }
}

async fn cmd_transcript(args: &[String]) -> anyhow::Result<()> {
    let transcript_id = positional(args, "transcript-id")?;
    let wait = !args.iter().any(|a| a == "--no-wait");
    let client = connect().await?;
    let transcript = client.get_transcript(transcript_id, wait).await?;
    print_json(&transcript)
}

async fn cmd_recording(args: &[String]) -> anyhow::Result<()> {
    let recording_id = positional(args, "recording-id")?;
    let dir = flag_value(args, "--dir").unwrap_or(".");
    let client = connect().await?;
    let path = client.get_recording_file(recording_id, dir).await?;
    println!("{}", path.display());
    Ok(())
}

async fn cmd_schemas() -> anyhow::Result<()> {
    let client = connect().await?;
    let options = SchemaListOptions {
        include_children: true,
        ..Default::default()
    };
    let schemas = client
        .classifications()
        .get_classification_schemas(&options)
        .await?;
    print_json(&schemas)
}
