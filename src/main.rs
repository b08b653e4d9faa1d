use log::{error, info};
use recipe_import::{ImportError, ParseMode, RecipeImporter};
use std::env;
use std::process::ExitCode;
use tokio::io::AsyncReadExt;

const USAGE: &str = "Usage: recipe-import [--legacy] <text|website|video> <input>

  text     recipe text, or - to read it from stdin
  website  URL of a recipe page
  video    video URL or id

Configuration is read from config.toml and RECIPE_IMPORT__* variables.";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let legacy = match args.iter().position(|a| a == "--legacy") {
        Some(pos) => {
            args.remove(pos);
            true
        }
        None => false,
    };

    let (Some(kind), Some(input)) = (args.first(), args.get(1)) else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    match run(kind, input, legacy).await {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Import failed: {:?}", e.kind());
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(kind: &str, input: &str, legacy: bool) -> Result<String, ImportError> {
    let builder = RecipeImporter::builder();
    let builder = match kind {
        "text" if input == "-" => builder.text(read_stdin().await?),
        "text" => builder.text(input),
        "website" => builder.website(input),
        "video" => builder.video(input),
        other => {
            return Err(ImportError::Builder(format!(
                "Unknown source '{}', expected text, website or video",
                other
            )))
        }
    };
    let mode = if legacy {
        ParseMode::Legacy
    } else {
        ParseMode::Structured
    };

    let outcome = builder.mode(mode).build().await?;
    info!(
        "Parsed '{}' with {} finding(s)",
        outcome.recipe.recipe_name(),
        outcome.report.errors.len()
    );

    serde_json::to_string_pretty(&outcome)
        .map_err(|e| ImportError::Builder(format!("Failed to serialize result: {}", e)))
}

async fn read_stdin() -> Result<String, ImportError> {
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .map_err(|e| ImportError::Builder(format!("Failed to read stdin: {}", e)))?;
    Ok(text)
}
