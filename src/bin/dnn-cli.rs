//! Trains the built-in tasks and runs stored models.
//!
//! Run with: cargo run --bin dnn-cli -- train --task and --out models/and_gate.json

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dnn::datasets::Task;
use dnn::feedforward::{Hyperparams, Model, Network};
use rand::{rngs::StdRng, SeedableRng};

#[derive(Parser)]
#[command(name = "dnn-cli")]
#[command(about = "Feedforward sigmoid network: train on built-in tasks, predict from stored models")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Train a fresh network on a built-in task
    Train {
        /// basic, not, and, or, equals, odd or add
        #[arg(short, long)]
        task: Task,

        /// Layer sizes, overriding the task's default geometry
        #[arg(short, long, value_delimiter = ',')]
        layers: Option<Vec<usize>>,

        /// Number of online training steps
        #[arg(short, long)]
        steps: Option<usize>,

        /// Seed for initial parameters and sample selection
        #[arg(long)]
        seed: Option<u64>,

        /// JSON file with hyper-parameters
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long)]
        learning_rate: Option<f64>,

        #[arg(long)]
        momentum: Option<f64>,

        /// Where to write the trained model
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Restore a model and print its outputs for one input
    Predict {
        /// Model file written by `train`
        #[arg(short, long)]
        model: PathBuf,

        /// Comma separated input values
        #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
        input: Vec<f64>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Args::parse().command {
        Command::Train {
            task,
            layers,
            steps,
            seed,
            config,
            learning_rate,
            momentum,
            out,
        } => {
            let mut params = match config {
                Some(path) => Hyperparams::from_file(&path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?,
                None => Hyperparams::default(),
            };
            if let Some(learning_rate) = learning_rate {
                params.learning_rate = learning_rate;
            }
            if let Some(momentum) = momentum {
                params.momentum = momentum;
            }

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let layers = layers.unwrap_or_else(|| task.layer_sizes().to_vec());
            let steps = steps.unwrap_or_else(|| task.default_steps());
            train(task, &layers, steps, params, &mut rng, out)
        }
        Command::Predict { model, input } => predict(model, &input),
    }
}

fn train(
    task: Task,
    layers: &[usize],
    steps: usize,
    params: Hyperparams,
    rng: &mut StdRng,
    out: Option<PathBuf>,
) -> Result<()> {
    let samples = task.samples();
    let mut net = Network::with_rng(layers, params, rng)?;

    log::info!("training {} on {:?} for {} steps", task, layers, steps);
    let cost = net.train_random(&samples, steps, rng)?;
    let accuracy = net.accuracy(&samples)?;
    log::info!("mean cost {:.6}, accuracy {:.1}%", cost, accuracy * 100.0);

    for sample in samples.iter().take(16) {
        println!("{:?} -> {:?}", sample.input, net.predict(&sample.input)?);
    }

    if let Some(path) = out {
        net.export_model()
            .save(&path)
            .with_context(|| format!("Failed to write model {}", path.display()))?;
        log::info!("model written to {}", path.display());
    }
    Ok(())
}

fn predict(path: PathBuf, input: &[f64]) -> Result<()> {
    let model = Model::load(&path)
        .with_context(|| format!("Failed to load model {}", path.display()))?;
    let mut net = Network::from_model(&model)?;
    println!("{:?}", net.predict(input)?);
    Ok(())
}
