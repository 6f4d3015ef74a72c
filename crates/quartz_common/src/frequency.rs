//! Frequency values with unit parsing, display, and ratio scaling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A clock frequency stored as an exact number of Hertz.
///
/// Clock-tree arithmetic is integral: every node's output is its input
/// frequency scaled by a small multiplier/divisor ratio, computed by
/// [`scale`](Frequency::scale) through a 128-bit intermediate so the
/// multiplication cannot overflow before the division.
///
/// Supports parsing from strings like "8MHz", "32.768KHz", "1GHz", and
/// bare numeric values (interpreted as Hz). Displays using the most
/// appropriate unit for readability.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Frequency(u64);

impl Frequency {
    /// The zero frequency: a disabled or unconnected clock output.
    pub const ZERO: Frequency = Frequency(0);

    /// Creates a frequency from a value in Hertz.
    pub const fn from_hz(hz: u64) -> Self {
        Self(hz)
    }

    /// Returns the frequency in Hertz.
    pub const fn hz(self) -> u64 {
        self.0
    }

    /// Returns the frequency in kilohertz.
    pub fn khz(self) -> f64 {
        self.0 as f64 / 1_000.0
    }

    /// Returns the frequency in megahertz.
    pub fn mhz(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Returns the frequency in gigahertz.
    pub fn ghz(self) -> f64 {
        self.0 as f64 / 1_000_000_000.0
    }

    /// Applies a multiplier/divisor ratio to this frequency.
    ///
    /// The product `hz * multiplier` is formed in 128 bits before the
    /// truncating division, so the multiplication cannot overflow and
    /// no precision is lost for non-integral ratios (dividing first
    /// would truncate too early). Saturates at `u64::MAX` if the final
    /// value does not fit in 64 bits.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is zero.
    pub fn scale(self, multiplier: u32, divisor: u32) -> Frequency {
        let wide = u128::from(self.0) * u128::from(multiplier) / u128::from(divisor);
        Frequency(u64::try_from(wide).unwrap_or(u64::MAX))
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({self})")
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hz = self.0;
        let (factor, unit) = if hz >= 1_000_000_000 {
            (1_000_000_000, "GHz")
        } else if hz >= 1_000_000 {
            (1_000_000, "MHz")
        } else if hz >= 1_000 {
            (1_000, "KHz")
        } else {
            return write!(f, "{hz}Hz");
        };
        let whole = hz / factor;
        let frac = hz % factor;
        if frac == 0 {
            write!(f, "{whole}{unit}")
        } else {
            // Exact decimal expansion: every frequency is a whole number
            // of Hz, so the fraction terminates within the unit's width.
            let decimals = factor.ilog10() as usize;
            let digits = format!("{frac:0decimals$}");
            write!(f, "{whole}.{}{unit}", digits.trim_end_matches('0'))
        }
    }
}

/// Error type for parsing frequency strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFrequencyError {
    /// The input string that failed to parse.
    pub input: String,
}

impl fmt::Display for ParseFrequencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid frequency: '{}'", self.input)
    }
}

impl std::error::Error for ParseFrequencyError {}

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseFrequencyError {
            input: s.to_string(),
        };

        let lower = s.to_ascii_lowercase();
        let (num, factor) = if let Some(num) = lower.strip_suffix("ghz") {
            (num, 1_000_000_000u64)
        } else if let Some(num) = lower.strip_suffix("mhz") {
            (num, 1_000_000)
        } else if let Some(num) = lower.strip_suffix("khz") {
            (num, 1_000)
        } else if let Some(num) = lower.strip_suffix("hz") {
            (num, 1)
        } else {
            (lower.as_str(), 1)
        };
        let num = num.trim();

        // Pure integer arithmetic so every representable frequency
        // parses exactly; a fractional part finer than 1 Hz is invalid.
        let (whole, frac) = num.split_once('.').unwrap_or((num, ""));
        let decimals = factor.ilog10() as usize;
        if frac.len() > decimals || (whole.is_empty() && frac.is_empty()) {
            return Err(err());
        }
        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| err())?
        };
        let frac_hz = if frac.is_empty() {
            0
        } else {
            if !frac.bytes().all(|b| b.is_ascii_digit()) {
                return Err(err());
            }
            let digits: u64 = frac.parse().map_err(|_| err())?;
            digits * factor / 10u64.pow(frac.len() as u32)
        };
        let hz = whole
            .checked_mul(factor)
            .and_then(|hz| hz.checked_add(frac_hz))
            .ok_or_else(err)?;
        Ok(Frequency(hz))
    }
}
