// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `train` and `classify`, and all
// their flags. Defaults mirror TrainConfig::default().
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::train_use_case::TrainConfig;
use crate::data::{normalizer::CharRule, splitter::SplitStrategy};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the site classifier on the built-in site list
    Train(TrainArgs),

    /// Predict the category of a page from its title and URL
    Classify(ClassifyArgs),
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Directory the model, vocabulary, categories and plot are written to
    #[arg(long, default_value = "model")]
    pub output_dir: String,

    /// Maximum number of passes over the training split
    #[arg(long, default_value_t = 100)]
    pub epochs: usize,

    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Initial Adam learning rate; halved when validation loss plateaus
    #[arg(long, default_value_t = 1e-3)]
    pub learning_rate: f64,

    /// Tokens per input sequence (longer texts keep their last tokens)
    #[arg(long, default_value_t = 100)]
    pub max_length: usize,

    /// Keep only this many most frequent words
    #[arg(long, default_value_t = 10_000)]
    pub max_vocab_size: usize,

    /// Share of examples held out for validation and the final test
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Seed for the split, weight init, dropout and batch shuffling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Split randomly instead of per category
    #[arg(long)]
    pub no_stratify: bool,

    /// Treat non-ASCII letters (e.g. CJK titles) as punctuation
    #[arg(long)]
    pub ascii_tokens: bool,

    /// Skip writing training_history.png
    #[arg(long)]
    pub no_plot: bool,
}

/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            output_dir:     a.output_dir,
            epochs:         a.epochs,
            batch_size:     a.batch_size,
            learning_rate:  a.learning_rate,
            max_length:     a.max_length,
            max_vocab_size: a.max_vocab_size,
            test_fraction:  a.test_fraction,
            seed:           a.seed,
            split:          if a.no_stratify { SplitStrategy::Random } else { SplitStrategy::Stratified },
            char_rule:      if a.ascii_tokens { CharRule::Ascii } else { CharRule::Unicode },
            render_plot:    !a.no_plot,
            ..TrainConfig::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Page title
    #[arg(long)]
    pub title: String,

    /// Page URL
    #[arg(long)]
    pub url: String,

    /// Directory written by `train`
    #[arg(long, default_value = "model")]
    pub model_dir: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn parse(args: &[&str]) -> Commands {
        Cli::try_parse_from(args.iter().copied()).unwrap().command
    }

    #[test]
    fn test_train_defaults_match_config() {
        let Commands::Train(args) = parse(&["site-classifier", "train"]) else {
            panic!("expected train");
        };
        let cfg: TrainConfig = args.into();
        let def = TrainConfig::default();
        assert_eq!(cfg.output_dir, def.output_dir);
        assert_eq!(cfg.epochs, def.epochs);
        assert_eq!(cfg.batch_size, def.batch_size);
        assert_eq!(cfg.max_length, def.max_length);
        assert_eq!(cfg.max_vocab_size, def.max_vocab_size);
        assert_eq!(cfg.seed, def.seed);
        assert_eq!(cfg.split, SplitStrategy::Stratified);
        assert_eq!(cfg.char_rule, CharRule::Unicode);
        assert!(cfg.render_plot);
    }

    #[test]
    fn test_train_flags() {
        let Commands::Train(args) = parse(&[
            "site-classifier", "train", "--epochs", "3", "--no-stratify",
            "--ascii-tokens", "--no-plot", "--output-dir", "out",
        ]) else {
            panic!("expected train");
        };
        let cfg: TrainConfig = args.into();
        assert_eq!(cfg.epochs, 3);
        assert_eq!(cfg.output_dir, "out");
        assert_eq!(cfg.split, SplitStrategy::Random);
        assert_eq!(cfg.char_rule, CharRule::Ascii);
        assert!(!cfg.render_plot);
    }

    #[test]
    fn test_classify_requires_title_and_url() {
        assert!(Cli::try_parse_from(["site-classifier", "classify", "--title", "x"]).is_err());
        let Commands::Classify(args) = parse(&[
            "site-classifier", "classify", "--title", "BBC", "--url", "https://bbc.com",
        ]) else {
            panic!("expected classify");
        };
        assert_eq!(args.model_dir, "model");
    }
}
