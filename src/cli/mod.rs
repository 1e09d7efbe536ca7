// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `train`   — trains the model and exports the mobile bundle
//   2. `predict` — loads the bundle and suggests next words
//   3. `publish` — uploads the bundle to a delivery service

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PredictArgs, PublishArgs, TrainArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "review-next-word",
    version = "0.1.0",
    about = "Train a next-word LSTM on review text, export a mobile bundle, publish it."
)]
pub struct Cli {
    /// The subcommand to run (train, predict or publish)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)   => Self::run_train(args),
            Commands::Predict(args) => Self::run_predict(args),
            Commands::Publish(args) => Self::run_publish(args),
        }
    }

    /// Handles the `train` subcommand.
    /// Converts CLI args into a TrainConfig and hands off to Layer 2.
    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training on reviews in: {}", args.reviews);

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        println!("Training complete. Bundle exported.");
        Ok(())
    }

    /// Handles the `predict` subcommand.
    /// Loads the exported bundle and prints the ranked suggestions.
    fn run_predict(args: PredictArgs) -> Result<()> {
        use crate::application::predict_use_case::PredictUseCase;
        use crate::domain::traits::WordSuggester;

        // Build the use case from the artifacts written during training
        let use_case = PredictUseCase::new(args.artifacts_dir.clone(), args.top_k)?;

        let suggestions = use_case.suggest(&args.seed_text)?;

        println!("\nSeed: {}", args.seed_text);
        for (rank, s) in suggestions.iter().enumerate() {
            println!("  {}. {:<20} {:>5.1}%", rank + 1, s.token, s.probability * 100.0);
        }
        Ok(())
    }

    /// Handles the `publish` subcommand.
    /// Uploads the bundle and prints the receipt from the service.
    fn run_publish(args: PublishArgs) -> Result<()> {
        use crate::application::publish_use_case::PublishUseCase;

        let deliver = args.deliver;
        let use_case = PublishUseCase::new(args.into());
        let receipt = use_case.execute()?;

        println!("Upload complete. Bundle id: {}", receipt.id);
        if let Some(version) = &receipt.version {
            println!("Version: {}", version);
        }
        if deliver {
            println!("Delivery to registered devices triggered.");
        }
        Ok(())
    }
}
