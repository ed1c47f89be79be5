//! Online training on the logic gates and parity.

use dnn::datasets::{self, Task};
use dnn::feedforward::{Hyperparams, Network, Sample};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Trains like the gate scripts do: one uniformly drawn example per step.
fn train_online(layers: &[usize], samples: &[Sample], steps: usize, seed: u64) -> Network {
    let mut rng = StdRng::seed_from_u64(seed);
    let params = Hyperparams {
        learning_rate: 0.3,
        ..Hyperparams::default()
    };
    let mut net = Network::with_rng(layers, params, &mut rng).unwrap();

    for _ in 0..steps {
        let Sample { input, output } = &samples[rng.gen_range(0..samples.len())];
        net.train(input, output).unwrap();
    }
    net
}

fn rounded(net: &mut Network, input: &[f64]) -> f64 {
    net.predict(input).unwrap()[0].round()
}

#[test]
fn learns_not_gate() {
    let mut net = train_online(&[1, 5, 5, 1], &Task::Not.samples(), 20_000, 42);

    assert_eq!(rounded(&mut net, &[0.0]), 1.0);
    assert_eq!(rounded(&mut net, &[1.0]), 0.0);
}

#[test]
fn learns_and_gate() {
    let mut net = train_online(&[2, 5, 5, 1], &Task::And.samples(), 30_000, 7);

    assert_eq!(rounded(&mut net, &[0.0, 0.0]), 0.0);
    assert_eq!(rounded(&mut net, &[0.0, 1.0]), 0.0);
    assert_eq!(rounded(&mut net, &[1.0, 0.0]), 0.0);
    assert_eq!(rounded(&mut net, &[1.0, 1.0]), 1.0);
}

#[test]
fn learns_or_gate_through_train_random() {
    let samples = Task::Or.samples();
    let mut rng = StdRng::seed_from_u64(3);
    let mut net = Network::with_rng(&[2, 5, 5, 1], Hyperparams::default(), &mut rng).unwrap();

    net.train_random(&samples, 30_000, &mut rng).unwrap();
    assert_eq!(net.accuracy(&samples).unwrap(), 1.0);
}

#[test]
fn learns_equals_gate_with_two_hidden_neurons() {
    let samples = Task::Equals.samples();

    // XNOR on two hidden units has local minima, some seeds stall in them.
    let solved = (0..10).any(|seed| {
        let mut net = train_online(&[2, 2, 1], &samples, 50_000, seed);
        net.accuracy(&samples).unwrap() == 1.0
    });
    assert!(solved);
}

#[test]
fn parity_generalizes_from_a_tenth_of_the_numbers() {
    let all = Task::Odd.samples();
    let mut rng = StdRng::seed_from_u64(11);
    let seen = datasets::subset(&all, 0.1, &mut rng);
    assert!(seen.len() < all.len() / 5);

    let mut net = train_online(&[10, 5, 1], &seen, 100_000, 11);
    for sample in &all {
        assert_eq!(rounded(&mut net, &sample.input), sample.output[0], "{:?}", sample.input);
    }
}
