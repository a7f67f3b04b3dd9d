// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and prints results. All work is
// delegated to Layer 2 (application).
//
//   1. `train`    — runs the training pipeline, writes artifacts
//   2. `classify` — predicts the category of one page
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{ClassifyArgs, Commands, TrainArgs};

use crate::application::{
    classify_use_case::ClassifyUseCase,
    train_use_case::TrainUseCase,
};

#[derive(Parser, Debug)]
#[command(
    name = "site-classifier",
    version,
    about = "Train a BiLSTM that sorts websites into categories from their title and URL."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)    => run_train(args),
            Commands::Classify(args) => run_classify(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    let use_case = TrainUseCase::new(args.into());
    let report   = use_case.execute()?;

    println!("\nTest loss:     {:.4}", report.test_loss);
    println!("Test accuracy: {:.4}", report.test_accuracy);
    println!("Categories:    {}", report.categories.join(", "));
    Ok(())
}

fn run_classify(args: ClassifyArgs) -> Result<()> {
    let use_case = ClassifyUseCase::new(&args.model_dir);
    let result   = use_case.classify(&args.title, &args.url)?;

    println!(
        "{} ({:.1}% confidence, {})",
        result.prediction.category,
        result.prediction.confidence * 100.0,
        result.source,
    );
    Ok(())
}
