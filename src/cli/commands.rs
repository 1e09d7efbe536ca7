// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `train`, `predict`, `publish`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)

use clap::{Args, Subcommand, ValueEnum};

use crate::application::publish_use_case::PublishConfig;
use crate::application::train_use_case::TrainConfig;
use crate::infra::publisher::Access;

/// The three top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the next-word model on a CSV of reviews
    Train(TrainArgs),

    /// Suggest next words for a seed phrase using the exported bundle
    Predict(PredictArgs),

    /// Upload the exported bundle to a delivery service
    Publish(PublishArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// CSV file of reviews, or an http(s) URL to download it from
    #[arg(long, default_value = "data/reviews.csv")]
    pub reviews: String,

    /// Name of the CSV column holding the review text
    #[arg(long, default_value = "text")]
    pub text_column: String,

    /// Fraction of the reviews to keep (seeded random sample).
    /// 1.0 trains on the full corpus.
    #[arg(long, default_value_t = 0.25)]
    pub sample_frac: f64,

    /// RNG seed for the corpus sample
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Directory for checkpoints, metrics and the exported bundle
    #[arg(long, default_value = "artifacts")]
    pub artifacts_dir: String,

    /// Tokens per training window; the last one is the prediction target
    #[arg(long, default_value_t = 11)]
    pub window_len: usize,

    /// Number of windows processed together in one forward pass
    #[arg(long, default_value_t = 128)]
    pub batch_size: usize,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 50)]
    pub epochs: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Width of the learned word-embedding vectors
    #[arg(long, default_value_t = 10)]
    pub d_embed: usize,

    /// Number of LSTM hidden units
    #[arg(long, default_value_t = 50)]
    pub d_hidden: usize,

    /// Width of the fully connected layer between the LSTM and the output
    #[arg(long, default_value_t = 50)]
    pub d_dense: usize,

    /// Continue from the checkpoint in --artifacts-dir instead of starting
    /// fresh. Reuses the saved vocabulary, so pass the same corpus flags.
    #[arg(long)]
    pub resume: bool,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            reviews:       a.reviews,
            text_column:   a.text_column,
            sample_frac:   a.sample_frac,
            seed:          a.seed,
            artifacts_dir: a.artifacts_dir,
            window_len:    a.window_len,
            batch_size:    a.batch_size,
            epochs:        a.epochs,
            lr:            a.lr,
            d_embed:       a.d_embed,
            d_hidden:      a.d_hidden,
            d_dense:       a.d_dense,
            resume:        a.resume,
        }
    }
}

/// All arguments for the `predict` command
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Seed phrase to continue
    #[arg(long)]
    pub seed_text: String,

    /// How many ranked suggestions to print
    #[arg(long, default_value_t = 3)]
    pub top_k: usize,

    /// Directory holding the bundle exported by `train`
    #[arg(long, default_value = "artifacts")]
    pub artifacts_dir: String,
}

/// All arguments for the `publish` command
#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Base URL of the delivery service API
    #[arg(long)]
    pub endpoint: String,

    /// Bundle name shown in the delivery console
    #[arg(long, default_value = "NextWord")]
    pub name: String,

    /// Tag to attach to the upload (repeat the flag for several)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Who may fetch the bundle once uploaded
    #[arg(long, value_enum, default_value = "private")]
    pub access: AccessArg,

    /// Push the uploaded bundle to registered devices
    #[arg(long)]
    pub deliver: bool,

    /// Directory holding the bundle exported by `train`
    #[arg(long, default_value = "artifacts")]
    pub artifacts_dir: String,
}

/// CLI-facing mirror of the publisher's access level
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum AccessArg {
    Private,
    Public,
}

impl From<AccessArg> for Access {
    fn from(a: AccessArg) -> Self {
        match a {
            AccessArg::Private => Access::Private,
            AccessArg::Public  => Access::Public,
        }
    }
}

impl From<PublishArgs> for PublishConfig {
    fn from(a: PublishArgs) -> Self {
        PublishConfig {
            artifacts_dir: a.artifacts_dir,
            endpoint:      a.endpoint,
            name:          a.name,
            tags:          a.tags,
            access:        a.access.into(),
            deliver:       a.deliver,
        }
    }
}
