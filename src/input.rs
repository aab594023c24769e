//! Input buffer: growable sample storage, text token reader and size validation.
//! no_std + alloc compatible; `read` over a `BufRead` requires `std`.

extern crate alloc;
use alloc::vec::Vec;
use core::mem;

use crate::error::HaarError;

/// Number of values the buffer can hold right after [`SampleBuffer::initialize`].
pub const MIN_CAPACITY: usize = 512;

const SAMPLE_BYTES: usize = mem::size_of::<f64>();

/// How a scan over a chunk of text ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// Every token in the text was numeric.
    Exhausted,
    /// No number starts at the scan position; no further values should be read.
    Stopped,
}

/// Ordered, exclusively owned sequence of samples awaiting transformation.
///
/// Capacity starts at [`MIN_CAPACITY`] and doubles whenever an append finds
/// the buffer full.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f64>,
}

impl SampleBuffer {
    /// Allocate storage for [`MIN_CAPACITY`] values with length zero.
    pub fn initialize() -> Result<Self, HaarError> {
        Self::with_capacity(MIN_CAPACITY)
    }

    /// Allocate storage for `capacity` values with length zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, HaarError> {
        let mut samples = Vec::new();
        samples
            .try_reserve_exact(capacity)
            .map_err(|_| HaarError::Allocation {
                bytes: capacity.saturating_mul(SAMPLE_BYTES),
            })?;
        Ok(Self { samples })
    }

    /// Append one value, doubling the capacity first if the buffer is full.
    pub fn push(&mut self, value: f64) -> Result<(), HaarError> {
        if self.samples.len() == self.samples.capacity() {
            let doubled = self.samples.capacity().saturating_mul(2).max(MIN_CAPACITY);
            self.grow_to(doubled)?;
        }
        self.samples.push(value);
        Ok(())
    }

    /// Ensure room for `capacity` values in total.
    ///
    /// On failure the existing allocation and its contents are left untouched.
    fn grow_to(&mut self, capacity: usize) -> Result<(), HaarError> {
        let additional = capacity.saturating_sub(self.samples.len());
        self.samples
            .try_reserve_exact(additional)
            .map_err(|_| HaarError::Reallocation {
                bytes: capacity.saturating_mul(SAMPLE_BYTES),
            })
    }

    /// Append every number in `text`, stopping at the first spot where no
    /// number starts. As with `scanf("%lf")`, scanning resumes right after
    /// the last character consumed, so `"1-2"` yields `1` and `-2` while
    /// `"4x"` yields `4` and then stops.
    pub fn extend_from_text(&mut self, text: &str) -> Result<Scan, HaarError> {
        for token in text.split(is_c_space).filter(|t| !t.is_empty()) {
            let mut rest = token;
            while !rest.is_empty() {
                match parse_token(rest) {
                    Token::Complete(value) => {
                        self.push(value)?;
                        rest = "";
                    }
                    Token::Partial(value, end) => {
                        self.push(value)?;
                        rest = &rest[end..];
                    }
                    Token::Invalid => return Ok(Scan::Stopped),
                }
            }
        }
        Ok(Scan::Exhausted)
    }

    /// Read samples from `reader` until end of input or the first spot where
    /// no number starts, with the scanning rules of [`Self::extend_from_text`]. Returns the number of values appended.
    #[cfg(feature = "std")]
    pub fn read<R: std::io::BufRead>(&mut self, mut reader: R) -> Result<usize, HaarError> {
        let before = self.samples.len();
        let mut line = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            let text = alloc::string::String::from_utf8_lossy(&line);
            if self.extend_from_text(&text)? == Scan::Stopped {
                crate::vlog!(debug, "non-numeric token, input reading stopped");
                break;
            }
        }
        Ok(self.samples.len() - before)
    }

    /// Reject lengths that are zero or not an exact power of two.
    pub fn validate(&self) -> Result<(), HaarError> {
        if is_power_of_two(self.samples.len()) {
            Ok(())
        } else {
            Err(HaarError::InvalidSize {
                length: self.samples.len(),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.samples.capacity()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    /// Hand the samples over to the transform engine.
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}

impl From<Vec<f64>> for SampleBuffer {
    fn from(samples: Vec<f64>) -> Self {
        Self { samples }
    }
}

/// Power-of-two test that walks from the least significant bit upward:
/// any set bit met before the last one disqualifies the length.
pub fn is_power_of_two(length: usize) -> bool {
    if length == 0 {
        return false;
    }
    let mut n = length;
    while n != 1 {
        if n & 1 == 1 {
            return false;
        }
        n >>= 1;
    }
    true
}

/// Separators recognised by C's `isspace`, vertical tab included.
fn is_c_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

enum Token {
    Complete(f64),
    /// Value of the longest numeric prefix and its byte length.
    Partial(f64, usize),
    Invalid,
}

fn parse_token(token: &str) -> Token {
    if let Ok(value) = token.parse::<f64>() {
        return Token::Complete(value);
    }
    // longest numeric prefix wins
    for (end, _) in token.char_indices().rev() {
        if end == 0 {
            break;
        }
        if let Ok(value) = token[..end].parse::<f64>() {
            return Token::Partial(value, end);
        }
    }
    Token::Invalid
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn initialize_reserves_minimum_capacity() {
        let buf = SampleBuffer::initialize().unwrap();
        assert!(buf.is_empty());
        assert!(buf.capacity() >= MIN_CAPACITY);
    }

    #[test]
    fn impossible_initial_allocation_is_reported() {
        let err = SampleBuffer::with_capacity(usize::MAX).unwrap_err();
        assert_eq!(
            err,
            HaarError::Allocation {
                bytes: usize::MAX
            }
        );
    }

    #[test]
    fn push_doubles_capacity_when_full() {
        let mut buf = SampleBuffer::initialize().unwrap();
        let start = buf.capacity();
        for i in 0..=start {
            buf.push(i as f64).unwrap();
        }
        assert_eq!(buf.len(), start + 1);
        assert!(buf.capacity() >= start * 2);
        assert_eq!(buf.as_slice()[start], start as f64);
    }

    #[test]
    fn failed_growth_keeps_previous_contents() {
        let mut buf = SampleBuffer::from(vec![1.0, 2.0, 3.0]);
        let err = buf.grow_to(usize::MAX / 4).unwrap_err();
        assert!(matches!(err, HaarError::Reallocation { .. }));
        assert_eq!(buf.as_slice(), &[1.0, 2.0, 3.0]);
        buf.push(4.0).unwrap();
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn power_of_two_walk_matches_std() {
        for n in 0..4100usize {
            assert_eq!(is_power_of_two(n), n.is_power_of_two(), "n = {}", n);
        }
        assert!(is_power_of_two(1 << (usize::BITS - 1)));
        assert!(!is_power_of_two(usize::MAX));
    }

    #[test]
    fn partial_token_contributes_prefix() {
        assert!(matches!(parse_token("4x"), Token::Partial(v, 1) if v == 4.0));
        assert!(matches!(parse_token("-2.5e1abc"), Token::Partial(v, 6) if v == -25.0));
        assert!(matches!(parse_token("1-2"), Token::Partial(v, 1) if v == 1.0));
        assert!(matches!(parse_token("abc"), Token::Invalid));
        assert!(matches!(parse_token("1e3"), Token::Complete(v) if v == 1000.0));
    }

    #[test]
    fn non_finite_spellings_are_accepted() {
        assert!(matches!(parse_token("inf"), Token::Complete(v) if v == f64::INFINITY));
        assert!(matches!(parse_token("-Infinity"), Token::Complete(v) if v == f64::NEG_INFINITY));
        assert!(matches!(parse_token("NaN"), Token::Complete(v) if v.is_nan()));
    }
}
