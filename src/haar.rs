//! Multi-level Haar wavelet transform with streaming coefficient emission.
//! no_std + alloc compatible
//!
//! Each level consumes the current source of length `L`, writes `L/2`
//! averages followed by `L/2` details into the destination, emits the
//! details as they are computed and swaps the two buffers. When a single
//! value remains it is emitted as the final scaling coefficient.
//!
//! ```text
//! a0 a1 a2 a3 a4 a5 a6 a7
//!  \ /   \ /   \ /   \ /
//!  s0    s1    s2    s3   d0 d1 d2 d3   <- d* emitted, s* carried down
//! ```

extern crate alloc;
use alloc::vec::Vec;
use core::f64::consts::SQRT_2;
use core::mem;

use crate::error::HaarError;
use crate::input::is_power_of_two;
use crate::sink::CoefficientSink;

/// Progress of a single engine invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Buffers allocated, nothing emitted yet.
    Init,
    /// A decomposition level finished; `level` counts from 1 at the finest
    /// scale and `details` is the number of coefficients it emitted.
    Leveling { level: u32, details: usize },
    /// The final average has been emitted.
    Finalized,
}

/// One-shot Haar decomposition over a pair of ping-pong buffers.
#[derive(Debug)]
pub struct HaarEngine {
    buffers: [Vec<f64>; 2],
    source: usize,
    len: usize,
    level: u32,
    emitted: usize,
    stage: Stage,
}

impl HaarEngine {
    /// Take ownership of `samples` and allocate the auxiliary buffer.
    ///
    /// # Errors
    /// [`HaarError::InvalidSize`] if the length is zero or not a power of two,
    /// [`HaarError::BufferAllocation`] if the auxiliary buffer cannot be obtained.
    pub fn new(samples: Vec<f64>) -> Result<Self, HaarError> {
        let n = samples.len();
        if !is_power_of_two(n) {
            return Err(HaarError::InvalidSize { length: n });
        }
        let aux = allocate_aux(n)?;
        Ok(Self {
            buffers: [samples, aux],
            source: 0,
            len: n,
            level: 0,
            emitted: 0,
            stage: Stage::Init,
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Length of the source the next level will consume.
    pub fn working_len(&self) -> usize {
        self.len
    }

    /// Coefficients emitted so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    fn roles(&mut self) -> (&[f64], &mut [f64]) {
        let (first, second) = self.buffers.split_at_mut(1);
        if self.source == 0 {
            (first[0].as_slice(), second[0].as_mut_slice())
        } else {
            (second[0].as_slice(), first[0].as_mut_slice())
        }
    }

    /// Advance by one level, or emit the final average once a single value
    /// remains. After [`Stage::Finalized`] further calls do nothing.
    pub fn step<S: CoefficientSink + ?Sized>(&mut self, sink: &mut S) -> Result<Stage, HaarError> {
        if self.stage == Stage::Finalized {
            return Ok(Stage::Finalized);
        }

        if self.len < 2 {
            sink.emit(self.buffers[self.source][0])?;
            self.emitted += 1;
            self.stage = Stage::Finalized;
            crate::vlog!(trace, "haar finalized after {} coefficients", self.emitted);
            return Ok(self.stage);
        }

        let len = self.len;
        let half = len / 2;
        let (src, dst) = self.roles();
        let (src, dst) = (&src[..len], &mut dst[..len]);

        for i in 0..half {
            dst[i] = (src[2 * i] + src[2 * i + 1]) / SQRT_2;
        }
        let mut emitted = 0;
        for i in 0..half {
            let detail = (src[2 * i] - src[2 * i + 1]) / SQRT_2;
            dst[half + i] = detail;
            if let Err(err) = sink.emit(detail) {
                self.emitted += emitted;
                return Err(err);
            }
            emitted += 1;
        }

        self.emitted += emitted;
        self.source ^= 1;
        self.len = half;
        self.level += 1;
        self.stage = Stage::Leveling {
            level: self.level,
            details: half,
        };
        crate::vlog!(trace, "haar level {}: {} details, {} averages carried", self.level, half, half);
        Ok(self.stage)
    }

    /// Run every remaining level and the final emission.
    /// Returns the total number of coefficients emitted.
    pub fn run<S: CoefficientSink + ?Sized>(mut self, sink: &mut S) -> Result<usize, HaarError> {
        while self.step(sink)? != Stage::Finalized {}
        Ok(self.emitted)
    }
}

fn allocate_aux(n: usize) -> Result<Vec<f64>, HaarError> {
    let mut aux = Vec::new();
    aux.try_reserve_exact(n)
        .map_err(|_| HaarError::BufferAllocation {
            bytes: n.saturating_mul(mem::size_of::<f64>()),
        })?;
    aux.resize(n, 0.0);
    Ok(aux)
}

/// Number of decomposition levels for a power-of-two length `n`.
pub fn level_count(n: usize) -> u32 {
    n.trailing_zeros()
}

/// Transform `samples`, streaming every coefficient to `sink`.
pub fn forward<S: CoefficientSink + ?Sized>(samples: Vec<f64>, sink: &mut S) -> Result<usize, HaarError> {
    HaarEngine::new(samples)?.run(sink)
}

/// Transform `samples` and collect the coefficients in emission order.
pub fn forward_to_vec(samples: &[f64]) -> Result<Vec<f64>, HaarError> {
    let mut out = Vec::with_capacity(samples.len());
    forward(samples.to_vec(), &mut |v: f64| out.push(v))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const EPS: f64 = 1e-12;

    #[test]
    fn pair_emits_detail_then_average() {
        let out = forward_to_vec(&[1.0, 0.0]).unwrap();
        assert_eq!(out.len(), 2);
        assert!((out[0] - 1.0 / SQRT_2).abs() < EPS);
        assert!((out[1] - 1.0 / SQRT_2).abs() < EPS);
    }

    #[test]
    fn single_sample_passes_through_unchanged() {
        assert_eq!(forward_to_vec(&[-3.25]).unwrap(), vec![-3.25]);
    }

    #[test]
    fn engine_rejects_non_power_of_two() {
        assert_eq!(
            HaarEngine::new(vec![1.0, 2.0, 3.0]).unwrap_err(),
            HaarError::InvalidSize { length: 3 }
        );
        assert_eq!(
            HaarEngine::new(Vec::new()).unwrap_err(),
            HaarError::InvalidSize { length: 0 }
        );
    }

    #[test]
    fn stages_follow_level_order() {
        let mut engine = HaarEngine::new(vec![4.0, 2.0, 5.0, 5.0, 1.0, 1.0, 0.0, 2.0]).unwrap();
        let mut seen = Vec::new();
        let mut sink = |v: f64| seen.push(v);
        assert_eq!(engine.stage(), Stage::Init);
        assert_eq!(
            engine.step(&mut sink).unwrap(),
            Stage::Leveling { level: 1, details: 4 }
        );
        assert_eq!(engine.working_len(), 4);
        assert_eq!(
            engine.step(&mut sink).unwrap(),
            Stage::Leveling { level: 2, details: 2 }
        );
        assert_eq!(
            engine.step(&mut sink).unwrap(),
            Stage::Leveling { level: 3, details: 1 }
        );
        assert_eq!(engine.step(&mut sink).unwrap(), Stage::Finalized);
        assert_eq!(engine.step(&mut sink).unwrap(), Stage::Finalized);
        assert_eq!(engine.emitted(), 8);
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn first_level_details_are_scaled_differences() {
        let out = forward_to_vec(&[4.0, 2.0, 5.0, 5.0]).unwrap();
        assert!((out[0] - 2.0 / SQRT_2).abs() < EPS);
        assert!(out[1].abs() < EPS);
        // second level: averages 6/√2 and 10/√2
        assert!((out[2] - (-4.0 / 2.0)).abs() < EPS);
        assert!((out[3] - 16.0 / 2.0).abs() < EPS);
    }

    #[test]
    fn sink_errors_stop_the_transform() {
        struct Failing(usize);
        impl CoefficientSink for Failing {
            fn emit(&mut self, _value: f64) -> Result<(), HaarError> {
                if self.0 == 0 {
                    return Err(HaarError::InvalidArguments {
                        message: "sink closed".into(),
                    });
                }
                self.0 -= 1;
                Ok(())
            }
        }
        let mut sink = Failing(2);
        let mut engine = HaarEngine::new(vec![1.0; 8]).unwrap();
        assert!(engine.step(&mut sink).is_err());
        assert_eq!(engine.emitted(), 2);
    }

    #[test]
    fn aux_allocation_failure_is_reported() {
        assert_eq!(
            allocate_aux(usize::MAX).unwrap_err(),
            HaarError::BufferAllocation { bytes: usize::MAX }
        );
        assert_eq!(allocate_aux(4).unwrap(), vec![0.0; 4]);
    }

    #[test]
    fn level_count_is_log2() {
        assert_eq!(level_count(1), 0);
        assert_eq!(level_count(2), 1);
        assert_eq!(level_count(1024), 10);
    }
}
