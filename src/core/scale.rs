use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Monotonic, invertible mapping between a numeric domain and a pixel range.
///
/// The range may be inverted (`range_start > range_end`), which is how y
/// scales map larger values to smaller pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() || domain.0 == domain.1 {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-degenerate".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Maps a domain value to its pixel coordinate.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    /// Maps a pixel coordinate back to its domain value.
    ///
    /// A collapsed range (zero-width plot after clamping) inverts to the
    /// domain start rather than dividing by zero.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Round tick values inside the domain, at a 1/2/5-decade step sized for
    /// roughly `count` ticks.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        if count == 0 {
            return Vec::new();
        }

        let (lo, hi) = ordered(self.domain_start, self.domain_end);
        if lo == hi {
            return vec![lo];
        }

        let step = nice_tick_step(hi - lo, count);
        if !step.is_finite() || step <= 0.0 {
            return vec![lo];
        }

        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|index| index as f64 * step).collect()
    }

    /// [`Self::ticks`] with the domain-end edge kept uncrowded.
    ///
    /// The final tick is dropped when the gap left between it and the domain
    /// end is smaller than half of one tick step, unless it sits exactly on
    /// the boundary.
    #[must_use]
    pub fn truncated_ticks(self, count: usize) -> Vec<f64> {
        let mut ticks = self.ticks(count);
        if ticks.len() < 2 {
            return ticks;
        }

        let (_, hi) = ordered(self.domain_start, self.domain_end);
        let step = ticks[1] - ticks[0];
        let last = ticks[ticks.len() - 1];
        let gap = hi - last;
        if gap > 0.0 && gap < step * 0.5 {
            ticks.pop();
        }
        ticks
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Largest of 1, 2, 5 times a power of ten that yields at least `count`
/// intervals over `span`.
fn nice_tick_step(span: f64, count: usize) -> f64 {
    let raw = span / count.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    // Thresholds are sqrt(50), sqrt(10), sqrt(2): round to the nearest
    // 1/2/5 step in log space.
    let factor = if residual >= 7.071 {
        10.0
    } else if residual >= 3.162 {
        5.0
    } else if residual >= 1.414 {
        2.0
    } else {
        1.0
    };
    magnitude * factor
}

#[cfg(test)]
mod tests {
    use super::LinearScale;

    #[test]
    fn map_and_invert_round_trip() {
        let scale = LinearScale::new((0.0, 10.0), (0.0, 500.0)).expect("valid scale");
        let pixel = scale.map(2.5);
        assert!((pixel - 125.0).abs() <= 1e-9);
        assert!((scale.invert(pixel) - 2.5).abs() <= 1e-9);
    }

    #[test]
    fn inverted_range_maps_larger_values_to_smaller_pixels() {
        let scale = LinearScale::new((0.0, 100.0), (400.0, 0.0)).expect("valid scale");
        assert!(scale.map(80.0) < scale.map(20.0));
        assert!((scale.map(0.0) - 400.0).abs() <= 1e-9);
        assert!((scale.map(100.0) - 0.0).abs() <= 1e-9);
    }

    #[test]
    fn collapsed_range_inverts_without_dividing_by_zero() {
        let scale = LinearScale::new((0.0, 10.0), (0.0, 0.0)).expect("valid scale");
        assert_eq!(scale.invert(0.0), 0.0);
    }

    #[test]
    fn ticks_land_on_round_values_inside_the_domain() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 500.0)).expect("valid scale");
        let ticks = scale.ticks(5);
        assert_eq!(ticks, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn ticks_stay_inside_an_offset_domain() {
        let scale = LinearScale::new((13.2, 47.8), (0.0, 500.0)).expect("valid scale");
        for tick in scale.ticks(6) {
            assert!((13.2..=47.8).contains(&tick), "tick {tick} outside domain");
        }
    }

    #[test]
    fn truncated_ticks_drop_a_crowded_final_tick() {
        // Ticks at step 20 end at 80; the domain end 81 leaves a gap of 1,
        // well under half a step, so 80 is dropped.
        let scale = LinearScale::new((0.0, 81.0), (0.0, 500.0)).expect("valid scale");
        assert_eq!(scale.truncated_ticks(5), vec![0.0, 20.0, 40.0, 60.0]);
    }

    #[test]
    fn truncated_ticks_keep_a_boundary_tick() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 500.0)).expect("valid scale");
        assert_eq!(
            scale.truncated_ticks(5),
            vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]
        );
    }
}
