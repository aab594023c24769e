//! End-to-end run: read samples, validate, transform into a text sink.

use std::io::{BufRead, Write};

use crate::error::HaarError;
use crate::haar::{level_count, HaarEngine};
use crate::input::SampleBuffer;
use crate::sink::{CoefficientSink, OutputFormat, TextSink};

/// What a completed run processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub samples: usize,
    pub levels: u32,
    pub coefficients: usize,
}

/// Read samples from `input`, transform them and write the coefficients to
/// `output` followed by a newline.
///
/// Coefficients are written as they are produced, so output already written
/// stays in place if a later step fails.
pub fn run<R: BufRead, W: Write>(
    input: R,
    output: W,
    format: &OutputFormat,
) -> Result<Summary, HaarError> {
    let mut buffer = SampleBuffer::initialize()?;
    let read = buffer.read(input)?;
    crate::vlog!(debug, "read {} samples (capacity {})", read, buffer.capacity());

    buffer.validate()?;
    let samples = buffer.len();
    let levels = level_count(samples);
    crate::vlog!(debug, "validated {} samples, {} levels", samples, levels);

    let engine = HaarEngine::new(buffer.into_samples())?;
    let mut sink = TextSink::new(output, *format);
    let coefficients = engine.run(&mut sink)?;
    sink.finish()?;
    crate::vlog!(debug, "wrote {} coefficients", coefficients);

    Ok(Summary {
        samples,
        levels,
        coefficients,
    })
}
