//! Line-oriented diagnostic logs of detected element structures.
use crate::element::FiniteElement;
use crate::quadrature::Quadrature1d;
use crate::shape_info::{ElementType, ShapeInfo};
use crate::Real;
use eyre::WrapErr;
use log::info;
use std::fmt::Display;
use std::io;
use std::io::Write;

/// The prefix used by [`DiagnosticLog::new`].
pub const DEFAULT_PREFIX: &str = "sumfact";

/// Writes prefixed diagnostic lines of the form `prefix::message` to a writer.
///
/// Every line is also emitted through [`log::info!`].
#[derive(Debug)]
pub struct DiagnosticLog<W> {
    writer: W,
    prefix: String,
}

impl<W: Write> DiagnosticLog<W> {
    pub fn new(writer: W) -> Self {
        Self::with_prefix(writer, DEFAULT_PREFIX)
    }

    pub fn with_prefix(writer: W, prefix: impl Into<String>) -> Self {
        Self {
            writer,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Writes a single line.
    pub fn log_line(&mut self, message: impl Display) -> io::Result<()> {
        info!("{message}");
        writeln!(self.writer, "{}::{message}", self.prefix)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Classifies every base element of `fe` with the given quadrature and logs the detected
/// type codes, one line per base element.
///
/// Returns the detected types in base element order.
pub fn log_detected_element_types<T, W, F, const D: usize>(
    log: &mut DiagnosticLog<W>,
    fe: &F,
    quadrature: &impl Quadrature1d<T>,
) -> eyre::Result<Vec<ElementType>>
where
    T: Real,
    W: Write,
    F: FiniteElement<T, D> + ?Sized,
{
    let mut detected = Vec::with_capacity(fe.num_base_elements());
    for i in 0..fe.num_base_elements() {
        let shape_info = ShapeInfo::<T>::new::<D, F>(quadrature, fe, i)
            .wrap_err_with(|| format!("Failed to classify base element {i} of {}", fe.name()))?;
        let base_name = fe
            .base_element(i)
            .map(|base| base.name())
            .unwrap_or_default();
        let element_type = shape_info.element_type();
        log.log_line(format_args!(
            "Detected shape info type for {base_name}: {}",
            element_type.code()
        ))?;
        detected.push(element_type);
    }
    Ok(detected)
}
