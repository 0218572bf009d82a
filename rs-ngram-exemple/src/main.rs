use std::io::{self, BufRead, Write};
use std::path::Path;

use clap::Parser;
use log::{info, warn};
use rs_ngram_core::io::{load_dataset, SAMPLE_CORPUS};
use rs_ngram_core::{train_folder, NGramModel, DEFAULT_ORDER};

/// Interactive next-word prediction demo.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Corpus file, or folder of `.txt` corpus files
    #[arg(short, long, default_value = "data/data.txt")]
    data: String,

    /// Maximum n-gram order
    #[arg(short = 'n', long, default_value_t = DEFAULT_ORDER)]
    order: usize,

    /// Number of suggestions shown per phrase
    #[arg(short = 'k', long, default_value_t = 6)]
    top_k: usize,
}

/// Builds the model from a folder, a file, or the built-in sample corpus.
fn build_model(data: &str, order: usize) -> Result<NGramModel, Box<dyn std::error::Error>> {
    if Path::new(data).is_dir() {
        return Ok(train_folder(data, order)?);
    }

    let mut model = NGramModel::new(order)?;
    let training_text = match load_dataset(data) {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            warn!("No dataset found, falling back to small sample for demo");
            SAMPLE_CORPUS.to_owned()
        }
    };
    model.train(&training_text);
    Ok(model)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    info!("Loading dataset and training model...");
    let model = build_model(&cli.data, cli.order)?;
    info!(
        "Training complete (order {}, vocabulary size {})",
        model.order(),
        model.vocabulary().len()
    );
    println!("--- N-Gram Autocomplete Demo ---");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("\nEnter phrase (or 'exit'): ");
        io::stdout().flush()?;

        // End of input behaves like 'exit'
        let Some(line) = lines.next() else { break };
        let phrase = line?;
        if phrase.trim().eq_ignore_ascii_case("exit") {
            break;
        }

        let predictions = model.predict(&phrase, cli.top_k);
        if predictions.is_empty() {
            println!("  (no suggestions)");
        } else {
            println!("Suggestions:");
            for prediction in predictions {
                println!("  {}  ({:.2})", prediction.token, prediction.score);
            }
        }
    }

    Ok(())
}
