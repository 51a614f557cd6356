//! Domain-to-pixel scales for the chart layouts.
//!
//! Three scales cover everything the two charts need: a linear scale for
//! values, a calendar scale for the day axis and a band scale for the
//! participant axis. Tick generation follows the usual 1/2/5 step ladder.

use chrono::NaiveDate;

// ── LinearScale ───────────────────────────────────────────────────────────────

/// Affine mapping from a numeric domain onto a pixel range.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Round tick values covering the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        if d1 <= d0 || count == 0 {
            return Vec::new();
        }
        let step = tick_step(d0, d1, count);
        let mut ticks = Vec::new();
        let mut value = (d0 / step).ceil() * step;
        while value <= d1 + step * 1e-9 {
            ticks.push(value);
            value += step;
        }
        ticks
    }
}

/// Tick spacing on the 1/2/5 ladder, like every charting library does it.
fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start) / count.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    // Thresholds are sqrt(50), sqrt(10), sqrt(2).
    let factor = if residual >= 7.07 {
        10.0
    } else if residual >= 3.16 {
        5.0
    } else if residual >= 1.41 {
        2.0
    } else {
        1.0
    };
    factor * magnitude
}

// ── CalendarScale ─────────────────────────────────────────────────────────────

/// Linear mapping from a calendar-day interval onto a pixel range.
#[derive(Debug, Clone, Copy)]
pub struct CalendarScale {
    domain: (NaiveDate, NaiveDate),
    range: (f64, f64),
}

impl CalendarScale {
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, day: NaiveDate) -> f64 {
        let span = (self.domain.1 - self.domain.0).num_days();
        let (r0, r1) = self.range;
        if span == 0 {
            return (r0 + r1) / 2.0;
        }
        let offset = (day - self.domain.0).num_days() as f64;
        r0 + offset / span as f64 * (r1 - r0)
    }

    /// Roughly `count` evenly spaced day ticks across the domain, endpoints
    /// included.
    pub fn ticks(&self, count: usize) -> Vec<NaiveDate> {
        let span = (self.domain.1 - self.domain.0).num_days();
        if span <= 0 || count == 0 {
            return vec![self.domain.0];
        }
        let steps = count.min(span as usize);
        let mut ticks = Vec::with_capacity(steps + 1);
        for i in 0..=steps {
            let offset = span * i as i64 / steps as i64;
            ticks.push(self.domain.0 + chrono::Days::new(offset as u64));
        }
        ticks
    }

    /// Number of days covered by the domain.
    pub fn span_days(&self) -> i64 {
        (self.domain.1 - self.domain.0).num_days()
    }
}

// ── BandScale ─────────────────────────────────────────────────────────────────

/// Ordinal scale placing one padded band per category along a pixel range.
#[derive(Debug, Clone)]
pub struct BandScale {
    categories: Vec<String>,
    range: (f64, f64),
    padding: f64,
}

impl BandScale {
    pub fn new(categories: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        Self {
            categories,
            range,
            padding,
        }
    }

    /// Start position of the band for `category`, if present.
    pub fn map(&self, category: &str) -> Option<f64> {
        let index = self.categories.iter().position(|c| c == category)?;
        Some(self.start() + self.step() * index as f64)
    }

    /// Width of each band.
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    fn step(&self) -> f64 {
        let n = self.categories.len() as f64;
        let span = self.range.1 - self.range.0;
        // Inner and outer padding share one ratio, outer on both ends.
        span / (n + self.padding).max(1.0)
    }

    fn start(&self) -> f64 {
        let n = self.categories.len() as f64;
        let span = self.range.1 - self.range.0;
        let used = self.step() * (n - self.padding);
        self.range.0 + (span - used) / 2.0
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
