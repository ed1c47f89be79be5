use rand::{distributions::Uniform, prelude::Distribution, Rng};

use super::error::{SizeMismatch, TrainError};
use super::net::Network;

/// A training example: an input vector and the output the network should produce for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub input: Vec<f64>,
    pub output: Vec<f64>,
}

impl Sample {
    pub fn new(input: Vec<f64>, output: Vec<f64>) -> Sample {
        Sample { input, output }
    }
}

impl Network {
    /// Calculates cost function of an output values given the desired values.
    /// Implements the formula:
    /// `sum((outputs - targets)^2)`
    ///
    /// # Returns
    /// * `Ok(f64)` if `outputs` and `targets` have the same size;
    /// * `SizeMismatch` otherwise.
    ///
    /// # Examples
    /// ```
    /// # use dnn::feedforward::Network;
    /// let outputs = [10.0; 1000];
    /// let targets = [10.25; 1000];
    /// let cost = Network::calc_cost(&outputs, &targets).unwrap();
    /// assert_eq!(cost, 62.5);
    /// ```
    pub fn calc_cost(outputs: &[f64], targets: &[f64]) -> Result<f64, SizeMismatch> {
        SizeMismatch::check(outputs.len(), targets.len())?;

        Ok(outputs
            .iter()
            .zip(targets.iter())
            .map(|(&a, &b)| (a - b) * (a - b))
            .sum())
    }

    /// Checks every sample against the network geometry.
    fn check_samples(&self, samples: &[Sample]) -> Result<(), TrainError> {
        let geometry = self.geometry();
        let (inputs_len, outputs_len) = (geometry[0], geometry[geometry.len() - 1]);

        for (i, sample) in samples.iter().enumerate() {
            if sample.input.len() != inputs_len {
                return Err(TrainError::WrongSampleInputsCount {
                    sample: i,
                    expected: inputs_len,
                    got: sample.input.len(),
                });
            }
            if sample.output.len() != outputs_len {
                return Err(TrainError::WrongSampleTargetsCount {
                    sample: i,
                    expected: outputs_len,
                    got: sample.output.len(),
                });
            }
        }
        Ok(())
    }

    /// Performs `steps` online training steps, each on a sample drawn uniformly
    /// from `samples`. Every sample is checked before the first step.
    ///
    /// # Returns
    /// * The average cost (see `Network::calc_cost`) over all steps, measured
    /// before each step's update;
    /// * `Err(TrainError)` if `samples` is empty or a sample has the wrong size.
    ///
    /// # Examples
    /// ```
    /// # use dnn::feedforward::{Network, Sample};
    /// let mut net = Network::new(&[1, 5, 1]).unwrap();
    /// let samples = [
    ///     Sample::new(vec![0.0], vec![1.0]),
    ///     Sample::new(vec![1.0], vec![0.0]),
    /// ];
    /// let cost = net.train_random(&samples, 100, &mut rand::thread_rng()).unwrap();
    /// assert!(cost >= 0.0);
    /// ```
    pub fn train_random<R: Rng + ?Sized>(
        &mut self,
        samples: &[Sample],
        steps: usize,
        rng: &mut R,
    ) -> Result<f64, TrainError> {
        if samples.is_empty() {
            return Err(TrainError::EmptySelection);
        }
        self.check_samples(samples)?;
        if steps == 0 {
            return Ok(0.0);
        }

        let report_every = (steps / 10).max(1);
        let indices_between = Uniform::from(0..samples.len());

        let mut costs_sum = 0.0;
        let mut window_sum = 0.0;
        for step in 0..steps {
            let sample = &samples[indices_between.sample(rng)];
            let cost = self.train_step(&sample.input, &sample.output)?;
            log::trace!("step {}: cost {}", step, cost);

            costs_sum += cost;
            window_sum += cost;
            if (step + 1) % report_every == 0 {
                log::info!(
                    "step {}/{}: mean cost {:.6}",
                    step + 1,
                    steps,
                    window_sum / report_every as f64
                );
                window_sum = 0.0;
            }
        }

        Ok(costs_sum / steps as f64)
    }

    /// Share of `samples` for which every rounded output equals the target.
    pub fn accuracy(&mut self, samples: &[Sample]) -> Result<f64, TrainError> {
        if samples.is_empty() {
            return Err(TrainError::EmptySelection);
        }
        self.check_samples(samples)?;

        let mut hits = 0;
        for sample in samples {
            let outputs = self.predict(&sample.input)?;
            if outputs
                .iter()
                .zip(&sample.output)
                .all(|(o, t)| o.round() == t.round())
            {
                hits += 1;
            }
        }

        Ok(hits as f64 / samples.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedforward::Hyperparams;
    use rand::{rngs::StdRng, SeedableRng};

    fn not_gate() -> Vec<Sample> {
        vec![
            Sample::new(vec![0.0], vec![1.0]),
            Sample::new(vec![1.0], vec![0.0]),
        ]
    }

    #[test]
    fn cost_size_mismatch() {
        assert_eq!(
            Network::calc_cost(&[1.0, 2.0], &[1.0]),
            Err(SizeMismatch {
                expected: 2,
                got: 1
            })
        );
        assert_eq!(Network::calc_cost(&[1.0, 2.0], &[0.0, 4.0]), Ok(5.0));
    }

    #[test]
    fn bad_samples_are_rejected_before_training() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut net = Network::with_rng(&[1, 3, 1], Hyperparams::default(), &mut rng).unwrap();
        let before = net.export_model();

        let mut samples = not_gate();
        samples.push(Sample::new(vec![0.0, 1.0], vec![1.0]));
        assert_eq!(
            net.train_random(&samples, 10, &mut rng),
            Err(TrainError::WrongSampleInputsCount {
                sample: 2,
                expected: 1,
                got: 2
            })
        );

        samples[2] = Sample::new(vec![0.0], vec![]);
        assert!(matches!(
            net.train_random(&samples, 10, &mut rng),
            Err(TrainError::WrongSampleTargetsCount { sample: 2, .. })
        ));
        assert_eq!(
            net.train_random(&[], 10, &mut rng),
            Err(TrainError::EmptySelection)
        );

        assert_eq!(net.export_model(), before);
    }

    #[test]
    fn training_lowers_cost() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut net = Network::with_rng(&[1, 5, 5, 1], Hyperparams::default(), &mut rng).unwrap();

        let early = net.train_random(&not_gate(), 500, &mut rng).unwrap();
        net.train_random(&not_gate(), 20_000, &mut rng).unwrap();
        let late = net.train_random(&not_gate(), 500, &mut rng).unwrap();

        assert!(late < early, "cost went from {} to {}", early, late);
        assert_eq!(net.accuracy(&not_gate()), Ok(1.0));
    }
}
