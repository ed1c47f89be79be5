//! Small built-in learning tasks: logic gates, parity and one-hot addition.

use std::{fmt, str::FromStr};

use rand::{seq::SliceRandom, Rng};

use crate::feedforward::Sample;

/// A named training task with a suggested geometry and training length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// NOT on a network without hidden layers.
    Basic,
    Not,
    And,
    Or,
    /// XNOR: 1 when both inputs are equal.
    Equals,
    /// Parity of a 10-bit number.
    Odd,
    /// Sum of two digits, both inputs and output one-hot over `0..=9`.
    Add,
}

impl Task {
    pub const ALL: [Task; 7] = [
        Task::Basic,
        Task::Not,
        Task::And,
        Task::Or,
        Task::Equals,
        Task::Odd,
        Task::Add,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Task::Basic => "basic",
            Task::Not => "not",
            Task::And => "and",
            Task::Or => "or",
            Task::Equals => "equals",
            Task::Odd => "odd",
            Task::Add => "add",
        }
    }

    pub fn layer_sizes(self) -> &'static [usize] {
        match self {
            Task::Basic => &[1, 1],
            Task::Not => &[1, 5, 5, 1],
            Task::And | Task::Or => &[2, 5, 5, 1],
            Task::Equals => &[2, 2, 1],
            Task::Odd => &[10, 5, 1],
            Task::Add => &[10, 5, 5, 10],
        }
    }

    pub fn default_steps(self) -> usize {
        match self {
            Task::Basic | Task::Not | Task::And | Task::Or => 10_000,
            Task::Equals | Task::Odd => 100_000,
            Task::Add => 1_000_000,
        }
    }

    pub fn samples(self) -> Vec<Sample> {
        match self {
            Task::Basic | Task::Not => gate(1, |bits| !bits[0]),
            Task::And => gate(2, |bits| bits[0] && bits[1]),
            Task::Or => gate(2, |bits| bits[0] || bits[1]),
            Task::Equals => gate(2, |bits| bits[0] == bits[1]),
            Task::Odd => gate(10, |bits| bits[9]),
            Task::Add => one_hot_sums(),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTask(pub String);

impl fmt::Display for UnknownTask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names: Vec<&str> = Task::ALL.iter().map(|t| t.name()).collect();
        write!(
            f,
            "Unknown task {:?}, expected one of: {}",
            self.0,
            names.join(", ")
        )
    }
}

impl std::error::Error for UnknownTask {}

impl FromStr for Task {
    type Err = UnknownTask;

    fn from_str(s: &str) -> Result<Task, UnknownTask> {
        Task::ALL
            .iter()
            .copied()
            .find(|task| task.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTask(s.to_owned()))
    }
}

fn bit(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Truth table of a boolean function over `width` inputs, most significant bit first.
fn gate<F: Fn(&[bool]) -> bool>(width: usize, f: F) -> Vec<Sample> {
    (0..1usize << width)
        .map(|n| {
            let bits: Vec<bool> = (0..width).rev().map(|i| n >> i & 1 == 1).collect();
            Sample::new(
                bits.iter().map(|&b| bit(b)).collect(),
                vec![bit(f(&bits))],
            )
        })
        .collect()
}

/// Every pair `i + j <= 9`, marked as ones at `i` and `j`, with a single one at `i + j`.
fn one_hot_sums() -> Vec<Sample> {
    let mut samples = Vec::new();
    for i in 0..=9 {
        for j in 0..=9 - i {
            let mut input = vec![0.0; 10];
            let mut output = vec![0.0; 10];
            input[i] = 1.0;
            input[j] = 1.0;
            output[i + j] = 1.0;
            samples.push(Sample::new(input, output));
        }
    }
    samples
}

/// Draws `fraction` of the samples without repetition, keeping at least one.
///
/// Training on the subset and scoring on the full set shows whether a network
/// generalizes instead of memorizing.
pub fn subset<R: Rng + ?Sized>(samples: &[Sample], fraction: f64, rng: &mut R) -> Vec<Sample> {
    let amount = ((samples.len() as f64 * fraction).round() as usize)
        .max(1)
        .min(samples.len());
    samples.choose_multiple(rng, amount).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gates_have_full_truth_tables() {
        let and = Task::And.samples();
        assert_eq!(and.len(), 4);
        assert_eq!(and[3], Sample::new(vec![1.0, 1.0], vec![1.0]));
        assert!(and[..3].iter().all(|s| s.output == vec![0.0]));

        let not = Task::Not.samples();
        assert_eq!(not[0], Sample::new(vec![0.0], vec![1.0]));
        assert_eq!(not[1], Sample::new(vec![1.0], vec![0.0]));

        let equals = Task::Equals.samples();
        let outputs: Vec<f64> = equals.iter().map(|s| s.output[0]).collect();
        assert_eq!(outputs, vec![1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn parity_follows_lowest_bit() {
        let odd = Task::Odd.samples();
        assert_eq!(odd.len(), 1024);
        assert_eq!(odd[5].input, vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0]);
        assert_eq!(odd[5].output, vec![1.0]);
        assert_eq!(odd[6].output, vec![0.0]);
    }

    #[test]
    fn sums_are_one_hot() {
        let add = Task::Add.samples();
        assert_eq!(add.len(), 55);
        for sample in &add {
            assert_eq!(sample.output.iter().filter(|&&v| v == 1.0).count(), 1);
            let ones = sample.input.iter().filter(|&&v| v == 1.0).count();
            assert!(ones == 1 || ones == 2);
        }
    }

    #[test]
    fn samples_fit_default_geometry() {
        for &task in Task::ALL.iter() {
            let sizes = task.layer_sizes();
            for sample in task.samples() {
                assert_eq!(sample.input.len(), sizes[0], "{}", task);
                assert_eq!(sample.output.len(), sizes[sizes.len() - 1], "{}", task);
            }
        }
    }

    #[test]
    fn subset_is_seeded_and_distinct() {
        use rand::{rngs::StdRng, SeedableRng};

        let odd = Task::Odd.samples();
        let a = subset(&odd, 0.1, &mut StdRng::seed_from_u64(5));
        let b = subset(&odd, 0.1, &mut StdRng::seed_from_u64(5));
        assert_eq!(a.len(), 102);
        assert_eq!(a, b);
        for (i, sample) in a.iter().enumerate() {
            assert!(odd.contains(sample));
            assert!(!a[i + 1..].contains(sample));
        }

        let not = Task::Not.samples();
        assert_eq!(subset(&not, 0.0, &mut StdRng::seed_from_u64(0)).len(), 1);
        assert_eq!(subset(&not, 3.0, &mut StdRng::seed_from_u64(0)).len(), 2);
    }

    #[test]
    fn parses_names() {
        assert_eq!("AND".parse::<Task>(), Ok(Task::And));
        assert_eq!("equals".parse::<Task>(), Ok(Task::Equals));
        assert!("xor".parse::<Task>().is_err());
        for &task in Task::ALL.iter() {
            assert_eq!(task.to_string().parse::<Task>(), Ok(task));
        }
    }
}
