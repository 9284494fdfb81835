//! Qualitative palette for sunburst branches

use std::f64::consts::PI;
use std::fmt;

use indexmap::IndexMap;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Rgb {
    /// Create a color from components.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn from_unit(r: f64, g: f64, b: f64) -> Self {
        let channel = |v: f64| {
            if v.is_finite() {
                v.clamp(0.0, 255.0).round() as u8
            } else {
                0
            }
        };
        Self::new(channel(r), channel(g), channel(b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Cyclical "less angry" rainbow over cubehelix space; `t` wraps to `[0, 1]`.
pub fn rainbow(t: f64) -> Rgb {
    let t = if (0.0..=1.0).contains(&t) {
        t
    } else {
        t - t.floor()
    };
    let ts = (t - 0.5).abs();
    cubehelix(360.0 * t - 100.0, 1.5 - 1.5 * ts, 0.8 - 0.9 * ts)
}

fn cubehelix(h: f64, s: f64, l: f64) -> Rgb {
    const A: f64 = -0.14861;
    const B: f64 = 1.78277;
    const C: f64 = -0.29227;
    const D: f64 = -0.90649;
    const E: f64 = 1.97294;

    let h = (h + 120.0) * PI / 180.0;
    let a = s * l * (1.0 - l);
    let (sin_h, cos_h) = h.sin_cos();
    Rgb::from_unit(
        255.0 * (l + a * (A * cos_h + B * sin_h)),
        255.0 * (l + a * (C * cos_h + D * sin_h)),
        255.0 * (l + a * (E * cos_h)),
    )
}

/// `n` evenly spaced samples of `interpolator` over `[0, 1]`.
pub fn quantize(interpolator: impl Fn(f64) -> Rgb, n: usize) -> Vec<Rgb> {
    match n {
        0 => Vec::new(),
        1 => vec![interpolator(0.0)],
        _ => (0..n)
            .map(|i| interpolator(i as f64 / (n - 1) as f64))
            .collect(),
    }
}

/// Maps keys to colors in order of first use, cycling through the range.
#[derive(Debug, Clone, Default)]
pub struct OrdinalScale {
    range: Vec<Rgb>,
    domain: IndexMap<String, usize>,
}

impl OrdinalScale {
    /// Scale over the given colors.
    pub fn new(range: Vec<Rgb>) -> Self {
        Self {
            range,
            domain: IndexMap::new(),
        }
    }

    /// Rainbow scale sized for `branches` top-level branches.
    ///
    /// The rainbow is cyclical, so one extra sample keeps the first and last
    /// branch from sharing a color.
    pub fn rainbow_for(branches: usize) -> Self {
        Self::new(quantize(rainbow, branches + 1))
    }

    /// Color for `key`, registering it on first use.
    pub fn color(&mut self, key: &str) -> Option<Rgb> {
        if self.range.is_empty() {
            return None;
        }
        let next = self.domain.len();
        let slot = *self.domain.entry(key.to_string()).or_insert(next);
        Some(self.range[slot % self.range.len()])
    }

    /// Keys seen so far, in order.
    pub fn domain(&self) -> impl Iterator<Item = &str> {
        self.domain.keys().map(String::as_str)
    }
}
