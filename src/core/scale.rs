use serde::{Deserialize, Serialize};

use crate::core::scale_arithmetic::{ceil_eps, compare_eps, divide_interval, floor_eps};
use crate::core::tick_table::TickTable;
use crate::core::types::AutoScale;
use crate::error::{ScaleError, ScaleResult};

/// Upper bound on major ticks produced by the linear divider.
pub const MAX_LINEAR_MAJOR_TICKS: usize = 10_000;

const DEFAULT_BASE: u32 = 10;
const ZERO_SNAP_EPS: f64 = 1.0e-12;

/// Generic autoscale behaviours shared by the linear and calendar engines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleAttributes {
    pub lower_margin: f64,
    pub upper_margin: f64,
    pub reference: f64,
    pub include_reference: bool,
    pub symmetric: bool,
    pub floating: bool,
    pub inverted: bool,
}

impl Default for ScaleAttributes {
    fn default() -> Self {
        Self {
            lower_margin: 0.0,
            upper_margin: 0.0,
            reference: 0.0,
            include_reference: false,
            symmetric: false,
            floating: false,
            inverted: false,
        }
    }
}

impl ScaleAttributes {
    #[must_use]
    pub fn with_margins(mut self, lower: f64, upper: f64) -> Self {
        self.lower_margin = lower;
        self.upper_margin = upper;
        self
    }

    #[must_use]
    pub fn with_reference(mut self, reference: f64, include: bool) -> Self {
        self.reference = reference;
        self.include_reference = include;
        self
    }

    #[must_use]
    pub fn with_symmetric(mut self, symmetric: bool) -> Self {
        self.symmetric = symmetric;
        self
    }

    #[must_use]
    pub fn with_floating(mut self, floating: bool) -> Self {
        self.floating = floating;
        self
    }

    #[must_use]
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    pub fn validate(&self) -> ScaleResult<()> {
        for (name, margin) in [
            ("lower_margin", self.lower_margin),
            ("upper_margin", self.upper_margin),
        ] {
            if !margin.is_finite() || margin < 0.0 {
                return Err(ScaleError::InvalidConfig(format!(
                    "{name} must be finite and >= 0, got {margin}"
                )));
            }
        }
        if !self.reference.is_finite() {
            return Err(ScaleError::InvalidConfig(format!(
                "reference must be finite, got {}",
                self.reference
            )));
        }
        Ok(())
    }

    /// Normalizes `[x1, x2]` and applies margins, symmetry around the
    /// reference, reference inclusion and zero-width expansion, in that order.
    #[must_use]
    pub fn padded_interval(&self, x1: f64, x2: f64) -> (f64, f64) {
        let mut min = x1.min(x2) - self.lower_margin;
        let mut max = x1.max(x2) + self.upper_margin;

        if self.symmetric {
            let delta = (self.reference - max).abs().max((self.reference - min).abs());
            min = self.reference - delta;
            max = self.reference + delta;
        }
        if self.include_reference {
            min = min.min(self.reference);
            max = max.max(self.reference);
        }
        if max - min == 0.0 {
            return expand_degenerate(min);
        }
        (min, max)
    }

    /// Swaps the bounds and negates the step when the scale is inverted.
    #[must_use]
    pub fn oriented(&self, x1: f64, x2: f64, step_size: f64) -> AutoScale {
        if self.inverted {
            AutoScale {
                x1: x2,
                x2: x1,
                step_size: -step_size,
            }
        } else {
            AutoScale { x1, x2, step_size }
        }
    }
}

/// Interval of width `|value|` centred on `value` (`[-0.5, 0.5]` around 0),
/// kept inside the finite range.
fn expand_degenerate(value: f64) -> (f64, f64) {
    let delta = if value == 0.0 { 0.5 } else { (0.5 * value).abs() };
    if f64::MAX - delta < value {
        (f64::MAX - delta, f64::MAX)
    } else if -f64::MAX + delta > value {
        (-f64::MAX, -f64::MAX + delta)
    } else {
        (value - delta, value + delta)
    }
}

/// Divider for plain numeric intervals using base-10 "nice" steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScaleEngine {
    attributes: ScaleAttributes,
    base: u32,
}

impl Default for LinearScaleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearScaleEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            attributes: ScaleAttributes::default(),
            base: DEFAULT_BASE,
        }
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: ScaleAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Sets the step base; values below 2 fall back to 2.
    #[must_use]
    pub fn with_base(mut self, base: u32) -> Self {
        self.base = base.max(2);
        self
    }

    #[must_use]
    pub fn attributes(&self) -> ScaleAttributes {
        self.attributes
    }

    pub fn set_attributes(&mut self, attributes: ScaleAttributes) {
        self.attributes = attributes;
    }

    #[must_use]
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Pads `[x1, x2]` per the attributes and picks a nice step for
    /// `max_num_steps` steps; the bounds snap to step multiples unless floating.
    #[must_use]
    pub fn auto_scale(&self, max_num_steps: i32, x1: f64, x2: f64) -> AutoScale {
        let (mut min, mut max) = self.attributes.padded_interval(x1, x2);
        let step_size = divide_interval(max - min, max_num_steps.max(1), self.base);
        if !self.attributes.floating && step_size != 0.0 {
            (min, max) = align(min, max, step_size);
        }
        self.attributes.oriented(min, max, step_size)
    }

    /// Divides `[x1, x2]` into major/medium/minor ticks.
    ///
    /// A non-zero `step_size` is used as the major step; otherwise one is
    /// derived from `max_major_steps`. Descending input yields an inverted table.
    #[must_use]
    pub fn divide_scale(
        &self,
        x1: f64,
        x2: f64,
        max_major_steps: i32,
        max_minor_steps: i32,
        step_size: f64,
    ) -> TickTable {
        let min = x1.min(x2);
        let max = x1.max(x2);
        let width = max - min;
        if !(width > 0.0) || !width.is_finite() {
            return TickTable::new(x1, x2);
        }

        let mut step = step_size.abs();
        if step == 0.0 {
            step = divide_interval(width, max_major_steps.max(1), self.base);
        }
        if step == 0.0 {
            return TickTable::new(x1, x2);
        }

        let (lower, upper) = align(min, max, step);
        let major = build_major_ticks(lower, upper, step);
        let (medium, minor) = if max_minor_steps > 0 {
            self.build_minor_ticks(&major, max_minor_steps, step)
        } else {
            (Vec::new(), Vec::new())
        };

        let strip = |ticks: Vec<f64>| -> Vec<f64> {
            ticks
                .into_iter()
                .filter(|tick| {
                    compare_eps(*tick, min, width).is_ge() && compare_eps(*tick, max, width).is_le()
                })
                .map(|tick| if compare_eps(tick, 0.0, step).is_eq() { 0.0 } else { tick })
                .collect()
        };

        // near the f64 precision limit consecutive ticks can collapse
        let mut table = TickTable::with_ticks(min, max, strip(major), strip(medium), strip(minor));
        table.normalize();
        if x1 > x2 { table.inverted() } else { table }
    }

    /// Minor step splitting `step_size` into at most `max_minor_steps`
    /// parts, or half the step when the nice step does not fit evenly.
    #[must_use]
    pub fn minor_step_size(&self, step_size: f64, max_minor_steps: i32) -> f64 {
        let min_step = divide_interval(step_size, max_minor_steps, self.base);
        if min_step != 0.0 {
            let num_ticks = (step_size / min_step).abs().ceil() - 1.0;
            if compare_eps((num_ticks + 1.0) * min_step.abs(), step_size.abs(), step_size).is_gt()
            {
                return 0.5 * step_size;
            }
        }
        min_step
    }

    fn build_minor_ticks(
        &self,
        major: &[f64],
        max_minor_steps: i32,
        step_size: f64,
    ) -> (Vec<f64>, Vec<f64>) {
        let min_step = self.minor_step_size(step_size, max_minor_steps);
        if min_step == 0.0 {
            return (Vec::new(), Vec::new());
        }

        let num_ticks = ((step_size / min_step).abs().ceil() as i64 - 1).max(0);
        let medium_index = (num_ticks % 2 == 1).then_some(num_ticks / 2);

        let mut medium = Vec::new();
        let mut minor = Vec::new();
        for &tick in major {
            let mut value = tick;
            for k in 0..num_ticks {
                value += min_step;
                if Some(k) == medium_index {
                    medium.push(value);
                } else {
                    minor.push(value);
                }
            }
        }
        (medium, minor)
    }
}

/// Rounds `[min, max]` outwards to multiples of `step_size`, keeping a bound
/// that already sits on a multiple within a tolerance relative to the step.
fn align(min: f64, max: f64, step_size: f64) -> (f64, f64) {
    let mut lower = min;
    let mut upper = max;

    if -f64::MAX + step_size <= lower {
        let x = floor_eps(lower, step_size);
        if x.abs() <= ZERO_SNAP_EPS || compare_eps(lower, x, step_size).is_ne() {
            lower = x;
        }
    }
    if f64::MAX - step_size >= upper {
        let x = ceil_eps(upper, step_size);
        if x.abs() <= ZERO_SNAP_EPS || compare_eps(upper, x, step_size).is_ne() {
            upper = x;
        }
    }
    (lower, upper)
}

fn build_major_ticks(lower: f64, upper: f64, step_size: f64) -> Vec<f64> {
    let count = ((upper - lower) / step_size).round();
    let num_ticks = if count.is_finite() {
        (count as usize).saturating_add(1).min(MAX_LINEAR_MAJOR_TICKS)
    } else {
        MAX_LINEAR_MAJOR_TICKS
    };

    let mut ticks = Vec::with_capacity(num_ticks);
    ticks.push(lower);
    for i in 1..num_ticks.saturating_sub(1) {
        ticks.push(lower + i as f64 * step_size);
    }
    ticks.push(upper);
    ticks
}
