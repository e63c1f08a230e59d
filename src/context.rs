use crate::constants::DEFAULT_DIV_PRECISION;
use crate::error::Error;

use std::sync::RwLock;

/// Rendering format for [`BigDecimal::format`](crate::BigDecimal::format) and
/// for [`Display`](core::fmt::Display) through the default [`Context`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Decimal notation while the leading digit sits below `10^6`, scientific
    /// notation above that.
    Auto,
    /// Plain `[-]INT.FRAC` notation, however large the value.
    Decimal,
    /// `[-]d.ddd...eEXP` notation with a single digit ahead of the point.
    Scientific,
    /// Decimal notation rounded to the given number of fractional digits and
    /// zero padded back up to exactly that many.
    DecimalPlaces(u32),
    /// Scientific notation rounded to the given number of mantissa digits
    /// after the point and zero padded back up to exactly that many.
    ScientificPlaces(u32),
}

/// Post-operation canonicalization policy.
///
/// Applied after addition, subtraction, multiplication and division to
/// suppress long runs of trailing noise digits, e.g. the tail produced by a
/// truncated division or by a float that was converted through its shortest
/// decimal rendering. Scanning partitions from least to most significant:
///
/// * a run of `N` consecutive zero partitions is dropped together with
///   everything below it — the value is exact at the retained precision;
/// * a run of `N` consecutive all-nines partitions is dropped likewise and
///   the retained portion is incremented by one unit just above the run.
///
/// Digit level rounding ([`floor_at`](crate::BigDecimal::floor_at) and
/// friends) is never followed by this policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Approximation {
    /// Keep every computed partition.
    None,
    /// Collapse on a single qualifying partition.
    Round1,
    /// Collapse on a run of two qualifying partitions.
    #[default]
    Round2,
    /// Collapse on a run of three qualifying partitions.
    Round3,
}

impl Approximation {
    /// Run length that triggers a collapse, if the policy collapses at all.
    pub(crate) fn run_length(self) -> Option<usize> {
        match self {
            Approximation::None => None,
            Approximation::Round1 => Some(1),
            Approximation::Round2 => Some(2),
            Approximation::Round3 => Some(3),
        }
    }
}

/// Explicit configuration for arithmetic and formatting.
///
/// Every arithmetic entry point has a `*_with` variant taking the policy as a
/// value, so behavior can be reasoned about locally. The process-wide default
/// behind [`default_context`] exists as a convenience layer for the operator
/// impls and [`Display`](core::fmt::Display) only.
///
/// # Example
///
/// ```
/// use bigdec::{BigDecimal, Context, Format};
///
/// let ctx = Context::new().with_div_precision(20).unwrap();
/// let quarter = BigDecimal::from(10).div_with(&BigDecimal::from(4), &ctx).unwrap();
/// assert_eq!("2.5", quarter.format(Format::Decimal));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Context {
    format: Format,
    approximation: Approximation,
    div_precision: u32,
}

impl Context {
    /// The context used when nothing was configured: [`Format::Auto`],
    /// [`Approximation::Round2`] and 100 digits of division precision.
    pub const fn new() -> Self {
        Context {
            format: Format::Auto,
            approximation: Approximation::Round2,
            div_precision: DEFAULT_DIV_PRECISION,
        }
    }

    /// Rendering format used by [`Display`](core::fmt::Display).
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Canonicalization policy applied after arithmetic.
    pub const fn approximation(&self) -> Approximation {
        self.approximation
    }

    /// Maximum number of decimal digits computed by a division.
    pub const fn div_precision(&self) -> u32 {
        self.div_precision
    }

    /// Returns a copy rendering with the given format.
    pub const fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Returns a copy applying the given canonicalization policy.
    pub const fn with_approximation(mut self, approximation: Approximation) -> Self {
        self.approximation = approximation;
        self
    }

    /// Returns a copy dividing to the given number of decimal digits.
    ///
    /// A precision of zero digits is rejected with [`Error::InvalidPrecision`].
    pub fn with_div_precision(mut self, precision: u32) -> Result<Self, Error> {
        if precision == 0 {
            return Err(Error::InvalidPrecision);
        }
        self.div_precision = precision;
        Ok(self)
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new()
    }
}

static DEFAULT_CONTEXT: RwLock<Context> = RwLock::new(Context::new());

fn read_default() -> Context {
    *DEFAULT_CONTEXT.read().unwrap_or_else(|e| e.into_inner())
}

fn write_default(apply: impl FnOnce(&mut Context)) {
    let mut guard = DEFAULT_CONTEXT.write().unwrap_or_else(|e| e.into_inner());
    apply(&mut guard);
}

/// Returns the process-wide default context.
///
/// Read at the moment an operator or `Display` call executes; explicit
/// `*_with` calls never consult it.
pub fn default_context() -> Context {
    read_default()
}

/// Replaces the process-wide default context.
pub fn set_default_context(context: Context) {
    write_default(|ctx| *ctx = context);
}

/// Sets the format used by `Display` and `to_string`.
pub fn set_default_format(format: Format) {
    write_default(|ctx| ctx.format = format);
}

/// Sets the canonicalization policy applied after operator arithmetic.
pub fn set_default_approximation(approximation: Approximation) {
    write_default(|ctx| ctx.approximation = approximation);
}

/// Sets the number of decimal digits computed by operator division.
///
/// A precision of zero digits is rejected with [`Error::InvalidPrecision`]
/// and the previous precision is retained.
pub fn set_default_div_precision(precision: u32) -> Result<(), Error> {
    if precision == 0 {
        return Err(Error::InvalidPrecision);
    }
    write_default(|ctx| ctx.div_precision = precision);
    Ok(())
}
