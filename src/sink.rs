//! Emission capabilities for transform coefficients.
//!
//! The engine only needs something that accepts one `f64` at a time in
//! emission order. Closures qualify through a blanket implementation;
//! [`TextSink`] renders coefficients as space-separated decimals.

use crate::error::HaarError;

/// Receiver of coefficients in emission order.
pub trait CoefficientSink {
    /// Accept the next coefficient.
    fn emit(&mut self, value: f64) -> Result<(), HaarError>;

    /// Signal that the last coefficient has been emitted.
    fn finish(&mut self) -> Result<(), HaarError> {
        Ok(())
    }
}

impl<F: FnMut(f64)> CoefficientSink for F {
    fn emit(&mut self, value: f64) -> Result<(), HaarError> {
        self(value);
        Ok(())
    }
}

/// Default number of fractional digits, matching C's `%lf`.
pub const DEFAULT_PRECISION: usize = 6;

/// Largest precision the command line accepts.
pub const MAX_PRECISION: usize = 17;

/// Text rendering options for [`TextSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputFormat {
    /// Digits after the decimal point.
    pub precision: usize,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

#[cfg(feature = "std")]
pub use self::text::{format_value, TextSink};

#[cfg(feature = "std")]
mod text {
    use super::{CoefficientSink, OutputFormat};
    use crate::error::HaarError;
    use std::io::Write;
    use std::string::String;

    /// Render a coefficient the way C's `printf("%.*f")` does, including its
    /// `inf` / `nan` spellings.
    pub fn format_value(value: f64, precision: usize) -> String {
        if value.is_nan() {
            return if value.is_sign_negative() { "-nan" } else { "nan" }.into();
        }
        if value.is_infinite() {
            return if value < 0.0 { "-inf" } else { "inf" }.into();
        }
        std::format!("{:.*}", precision, value)
    }

    /// Writes coefficients separated by single spaces and a newline on finish.
    ///
    /// Whether a separator is due is tracked per sink, so several sinks can
    /// be used independently within one process.
    pub struct TextSink<W: Write> {
        writer: W,
        format: OutputFormat,
        written: usize,
    }

    impl<W: Write> TextSink<W> {
        pub fn new(writer: W, format: OutputFormat) -> Self {
            Self {
                writer,
                format,
                written: 0,
            }
        }

        /// Number of coefficients written so far.
        pub fn written(&self) -> usize {
            self.written
        }

        pub fn into_inner(self) -> W {
            self.writer
        }
    }

    impl<W: Write> CoefficientSink for TextSink<W> {
        fn emit(&mut self, value: f64) -> Result<(), HaarError> {
            if self.written > 0 {
                self.writer.write_all(b" ")?;
            }
            self.writer
                .write_all(format_value(value, self.format.precision).as_bytes())?;
            self.written += 1;
            Ok(())
        }

        fn finish(&mut self) -> Result<(), HaarError> {
            self.writer.write_all(b"\n")?;
            self.writer.flush()?;
            Ok(())
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use std::vec::Vec;

    fn render(values: &[f64], format: OutputFormat) -> std::string::String {
        let mut sink = TextSink::new(Vec::new(), format);
        for &v in values {
            sink.emit(v).unwrap();
        }
        sink.finish().unwrap();
        std::string::String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn separator_only_between_values() {
        assert_eq!(
            render(&[1.0, -0.5, 2.0], OutputFormat::default()),
            "1.000000 -0.500000 2.000000\n"
        );
    }

    #[test]
    fn counts_written_values() {
        let mut sink = TextSink::new(Vec::new(), OutputFormat::default());
        sink.emit(1.0).unwrap();
        sink.emit(2.0).unwrap();
        assert_eq!(sink.written(), 2);
    }

    #[test]
    fn empty_stream_is_a_bare_newline() {
        assert_eq!(render(&[], OutputFormat::default()), "\n");
    }

    #[test]
    fn precision_is_configurable() {
        assert_eq!(render(&[0.1234], OutputFormat { precision: 2 }), "0.12\n");
        assert_eq!(render(&[3.0], OutputFormat { precision: 0 }), "3\n");
    }

    #[test]
    fn non_finite_values_use_c_spellings() {
        assert_eq!(format_value(f64::INFINITY, 6), "inf");
        assert_eq!(format_value(f64::NEG_INFINITY, 6), "-inf");
        assert_eq!(format_value(f64::NAN, 6), "nan");
        assert_eq!(format_value(-f64::NAN, 6), "-nan");
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        let mut sink = |v: f64| seen.push(v);
        sink.emit(1.5).unwrap();
        sink.finish().unwrap();
        assert_eq!(seen, [1.5]);
    }
}
