use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;
const NICE_MAX_ITERATIONS: usize = 10;

/// Linear mapping from a numeric domain to a pixel range.
///
/// The mapping is monotone and may be inverted (`range.0 > range.1`), which
/// is how y scales place larger values higher on screen. A degenerate domain
/// maps every value to the middle of the range instead of dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }
        Ok(Self { domain, range })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.range
    }

    pub fn with_domain(self, domain: (f64, f64)) -> ChartResult<Self> {
        Self::new(domain, self.range)
    }

    pub fn with_range(self, range: (f64, f64)) -> ChartResult<Self> {
        Self::new(self.domain, range)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain.0 == self.domain.1
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d0 == d1 {
            return (r0 + r1) / 2.0;
        }
        r0 + domain_fraction(value, d0, d1) * (r1 - r0)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r0 == r1 {
            return d0 * 0.5 + d1 * 0.5;
        }
        let t = (pixel - r0) / (r1 - r0);
        if (d1 - d0).is_finite() {
            d0 + t * (d1 - d0)
        } else {
            // Endpoints have opposite signs; the weighted sum stays finite inside the range.
            d0 * (1.0 - t) + d1 * t
        }
    }

    /// Expands the domain outward to multiples of a 1/2/5 tick step.
    ///
    /// The result always contains the original domain. Degenerate domains are
    /// returned unchanged, and rounding stops at the last finite bounds when the
    /// next step would overflow `f64`.
    #[must_use]
    pub fn nice(self, count: usize) -> Self {
        let (d0, d1) = self.domain;
        let reversed = d1 < d0;
        let (mut start, mut stop) = if reversed { (d1, d0) } else { (d0, d1) };
        if start == stop || count == 0 {
            return self;
        }

        let mut previous_step = None;
        for _ in 0..NICE_MAX_ITERATIONS {
            let step = tick_increment(start, stop, count as f64);
            if !step.is_finite() || previous_step == Some(step) {
                break;
            }
            let (next_start, next_stop) = if step > 0.0 {
                ((start / step).floor() * step, (stop / step).ceil() * step)
            } else if step < 0.0 {
                ((start * step).ceil() / step, (stop * step).floor() / step)
            } else {
                break;
            };
            if !next_start.is_finite() || !next_stop.is_finite() {
                break;
            }
            start = next_start;
            stop = next_stop;
            previous_step = Some(step);
        }

        let domain = if reversed { (stop, start) } else { (start, stop) };
        Self { domain, ..self }
    }

    /// Returns roughly `count` round tick values inside the domain, in domain order.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        if count == 0 {
            return Vec::new();
        }
        if d0 == d1 {
            return vec![d0];
        }

        let reversed = d1 < d0;
        let (start, stop) = if reversed { (d1, d0) } else { (d0, d1) };
        let Some((i1, i2, increment)) = tick_spec(start, stop, count as f64) else {
            return Vec::new();
        };
        if i2 < i1 {
            return Vec::new();
        }

        let n = (i2 - i1) as usize + 1;
        let mut ticks: Vec<f64> = (0..n)
            .map(|offset| {
                let index = (i1 + offset as i64) as f64;
                if increment < 0.0 {
                    index / -increment
                } else {
                    index * increment
                }
            })
            .collect();
        if reversed {
            ticks.reverse();
        }
        ticks
    }

    /// Absolute distance between consecutive ticks for `count`.
    #[must_use]
    pub fn tick_step(self, count: usize) -> f64 {
        let (d0, d1) = self.domain;
        if count == 0 || d0 == d1 {
            return 0.0;
        }
        let (start, stop) = if d1 < d0 { (d1, d0) } else { (d0, d1) };
        let increment = tick_increment(start, stop, count as f64);
        if increment < 0.0 {
            1.0 / -increment
        } else {
            increment
        }
    }
}

/// Position of `value` inside `[d0, d1]` as a fraction, without overflowing
/// when the span exceeds `f64::MAX`.
fn domain_fraction(value: f64, d0: f64, d1: f64) -> f64 {
    let span = d1 - d0;
    if span.is_finite() {
        (value - d0) / span
    } else {
        (value * 0.5 - d0 * 0.5) / (d1 * 0.5 - d0 * 0.5)
    }
}

fn raw_step(start: f64, stop: f64, count: f64) -> f64 {
    let count = count.max(0.0);
    let step = (stop - start) / count;
    if step.is_finite() {
        step
    } else {
        stop / count - start / count
    }
}

fn step_factor(error: f64) -> f64 {
    if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    }
}

/// Tick increment for `[start, stop]`; negative values encode `1 / |inc|`
/// so sub-unit steps stay exact.
fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    let step = raw_step(start, stop, count);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = step_factor(error);
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    let step = raw_step(start, stop, count);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = step_factor(error);

    let (mut i1, mut i2, increment);
    if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        i1 = (start * inc).round();
        i2 = (stop * inc).round();
        if i1 / inc < start {
            i1 += 1.0;
        }
        if i2 / inc > stop {
            i2 -= 1.0;
        }
        increment = -inc;
    } else {
        let inc = 10f64.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
        increment = inc;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    if !i1.is_finite() || !i2.is_finite() {
        return None;
    }
    Some((i1 as i64, i2 as i64, increment))
}
