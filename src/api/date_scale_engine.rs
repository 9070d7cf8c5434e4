use chrono::Weekday;
use tracing::{debug, warn};

use crate::core::calendar_width::interval_width;
use crate::core::scale_arithmetic::divide_interval;
use crate::core::step_size::{select_major_step, select_minor_step};
use crate::core::tick_ladder::align_date;
use crate::core::{
    AutoScale, CalendarInstant, Granularity, IntervalClassifier, LinearScaleEngine,
    ScaleAttributes, StepPlan, TickLadderBuilder, TickTable, TimeBasis, Week0Type,
};
use crate::error::ScaleResult;

use super::{AxisLabelLocale, DateScaleEngineConfig, format_tick_label, label_granularity};

/// Tick table of one division plus the step plan that produced it.
///
/// `plan` is `None` when the division is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleDivision {
    pub ticks: TickTable,
    pub plan: Option<StepPlan>,
}

impl ScaleDivision {
    fn empty(x1: f64, x2: f64) -> Self {
        Self {
            ticks: TickTable::new(x1, x2),
            plan: None,
        }
    }

    #[must_use]
    pub fn granularity(&self) -> Option<Granularity> {
        self.plan.map(|plan| plan.granularity)
    }
}

/// Scale engine dividing time values (milliseconds since 1970 UTC) along
/// calendar units.
///
/// Divisions never fail: unrepresentable or degenerate intervals produce an
/// empty table and calendar overflow truncates the ladder.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DateScaleEngine {
    config: DateScaleEngineConfig,
}

impl DateScaleEngine {
    #[must_use]
    pub fn new(time_basis: TimeBasis) -> Self {
        Self {
            config: DateScaleEngineConfig::new(time_basis),
        }
    }

    pub fn with_config(config: DateScaleEngineConfig) -> ScaleResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> DateScaleEngineConfig {
        self.config
    }

    #[must_use]
    pub fn time_basis(&self) -> TimeBasis {
        self.config.time_basis
    }

    pub fn set_time_basis(&mut self, time_basis: TimeBasis) {
        self.config.time_basis = time_basis;
    }

    #[must_use]
    pub fn max_weeks(&self) -> i32 {
        self.config.max_weeks
    }

    /// Negative values are clamped to 0.
    pub fn set_max_weeks(&mut self, max_weeks: i32) {
        self.config.max_weeks = max_weeks.max(0);
    }

    #[must_use]
    pub fn week0_type(&self) -> Week0Type {
        self.config.week0
    }

    pub fn set_week0_type(&mut self, week0: Week0Type) {
        self.config.week0 = week0;
    }

    #[must_use]
    pub fn locale(&self) -> AxisLabelLocale {
        self.config.locale
    }

    pub fn set_locale(&mut self, locale: AxisLabelLocale) {
        self.config.locale = locale;
    }

    #[must_use]
    pub fn attributes(&self) -> ScaleAttributes {
        self.config.attributes
    }

    pub fn set_attributes(&mut self, attributes: ScaleAttributes) {
        self.config.attributes = attributes;
    }

    #[must_use]
    pub fn week_start(&self) -> Weekday {
        self.config.locale.first_day_of_week()
    }

    /// Converts a time value to a calendar instant in the engine's basis.
    pub fn to_instant(&self, value: f64) -> ScaleResult<CalendarInstant> {
        CalendarInstant::from_time_value(value, self.config.time_basis)
    }

    /// Granularity used to label `[x1, x2]` with at most `max_major_steps` steps.
    pub fn classify(&self, x1: f64, x2: f64, max_major_steps: i32) -> ScaleResult<Granularity> {
        self.classifier()
            .classify(x1, x2, max_major_steps, self.config.time_basis)
    }

    /// Divides `[x1, x2]` into calendar-aligned ticks.
    ///
    /// A non-zero `step_size` only limits the number of major steps to
    /// `ceil(|x2 - x1| / step_size)`, since calendar units are not equidistant.
    /// Ticks are clipped to the interval; descending input yields an inverted
    /// table and a negated step.
    #[must_use]
    pub fn divide_scale(
        &self,
        x1: f64,
        x2: f64,
        max_major_steps: i32,
        max_minor_steps: i32,
        step_size: f64,
    ) -> TickTable {
        self.divide(x1, x2, max_major_steps, max_minor_steps, step_size)
            .ticks
    }

    /// Like [`Self::divide_scale`], also returning the chosen [`StepPlan`].
    #[must_use]
    pub fn divide(
        &self,
        x1: f64,
        x2: f64,
        max_major_steps: i32,
        max_minor_steps: i32,
        step_size: f64,
    ) -> ScaleDivision {
        let max_minor_steps = max_minor_steps.max(0);
        if !x1.is_finite() || !x2.is_finite() {
            warn!(x1, x2, "non-finite scale interval, returning empty division");
            return ScaleDivision::empty(x1, x2);
        }

        let min = x1.min(x2);
        let max = x1.max(x2);
        let basis = self.config.time_basis;
        let (from, to) = match (
            CalendarInstant::from_time_value(min, basis),
            CalendarInstant::from_time_value(max, basis),
        ) {
            (Ok(from), Ok(to)) => (from, to),
            (Err(err), _) | (_, Err(err)) => {
                warn!(error = %err, x1, x2, "scale interval not representable, returning empty division");
                return ScaleDivision::empty(x1, x2);
            }
        };
        if from == to {
            debug!(x1, x2, "empty scale interval");
            return ScaleDivision::empty(x1, x2);
        }

        let max_major_steps = hinted_major_steps(max - min, max_major_steps.max(1), step_size);
        let granularity = self
            .classifier()
            .classify_instants(&from, &to, max_major_steps);

        let (ticks, plan) = if granularity == Granularity::Millisecond {
            self.divide_linear(x1, x2, max_major_steps, max_minor_steps, step_size)
        } else {
            let week_start = self.week_start();
            let min_date = from.floor(granularity, week_start);
            let max_date = to.ceil(granularity, week_start);
            let (ticks, plan) =
                self.build_scale_division(&min_date, &max_date, max_major_steps, max_minor_steps, granularity);
            let ticks = ticks.bounded(min, max);
            if x1 > x2 {
                (ticks.inverted(), plan.inverted())
            } else {
                (ticks, plan)
            }
        };

        debug!(
            ?granularity,
            major_step = plan.major_step,
            minor_step = plan.minor_step,
            major = ticks.major().len(),
            medium = ticks.medium().len(),
            minor = ticks.minor().len(),
            "divided time scale"
        );
        ScaleDivision {
            ticks,
            plan: Some(plan),
        }
    }

    /// Pads `[x1, x2]` per the scale attributes and picks a calendar step for
    /// `max_num_steps` steps (values below 1 mean 2).
    ///
    /// Unless floating, the bounds are aligned to multiples of the step. The
    /// returned step size is in (nominal) milliseconds.
    #[must_use]
    pub fn auto_scale(&self, max_num_steps: i32, x1: f64, x2: f64) -> AutoScale {
        let attributes = self.config.attributes;
        let (mut min, mut max) = attributes.padded_interval(x1, x2);
        let max_num_steps = if max_num_steps < 1 { 2 } else { max_num_steps };
        let basis = self.config.time_basis;

        let mut step_size = 0.0;
        match (
            CalendarInstant::from_time_value(min, basis),
            CalendarInstant::from_time_value(max, basis),
        ) {
            (Ok(from), Ok(to)) => {
                let granularity = self
                    .classifier()
                    .classify_instants(&from, &to, max_num_steps);
                let width = interval_width(&from, &to, granularity);
                let step_width = major_step(width, granularity, max_num_steps);

                if step_width != 0.0 && !attributes.floating {
                    match (
                        self.align(&from, step_width, granularity, false),
                        self.align(&to, step_width, granularity, true),
                    ) {
                        (Ok(lower), Ok(upper)) => {
                            min = lower.to_time_value();
                            max = upper.to_time_value();
                        }
                        (Err(err), _) | (_, Err(err)) => {
                            debug!(error = %err, "autoscale alignment out of range, keeping padded bounds");
                        }
                    }
                }
                step_size = step_width * granularity.millis();
                debug!(?granularity, step_width, min, max, "autoscaled time interval");
            }
            (Err(err), _) | (_, Err(err)) => {
                warn!(error = %err, x1, x2, "autoscale interval not representable");
            }
        }

        attributes.oriented(min, max, step_size)
    }

    /// Labels for the major ticks of `table`, using the coarsest granularity
    /// every major tick is aligned to.
    #[must_use]
    pub fn tick_labels(&self, table: &TickTable) -> Vec<String> {
        let basis = self.config.time_basis;
        let granularity = label_granularity(table, basis, self.week_start());
        table
            .major()
            .iter()
            .map(|value| format_tick_label(*value, granularity, basis, self.config.locale))
            .collect()
    }

    fn classifier(&self) -> IntervalClassifier {
        IntervalClassifier::new(self.config.max_weeks, self.week_start())
    }

    fn align(
        &self,
        instant: &CalendarInstant,
        step: f64,
        granularity: Granularity,
        up: bool,
    ) -> ScaleResult<CalendarInstant> {
        align_date(instant, step, granularity, up, self.week_start(), self.config.week0)
    }

    fn divide_linear(
        &self,
        x1: f64,
        x2: f64,
        max_major_steps: i32,
        max_minor_steps: i32,
        step_size: f64,
    ) -> (TickTable, StepPlan) {
        let linear = LinearScaleEngine::new().with_attributes(self.config.attributes);
        let ticks = linear.divide_scale(x1, x2, max_major_steps, max_minor_steps, step_size);

        let major_step = if step_size != 0.0 {
            step_size.abs()
        } else {
            divide_interval((x2 - x1).abs(), max_major_steps, linear.base())
        };
        let minor_step = if max_minor_steps > 0 {
            linear.minor_step_size(major_step, max_minor_steps)
        } else {
            0.0
        };
        let plan = StepPlan::new(Granularity::Millisecond, major_step, minor_step);
        (ticks, if x1 > x2 { plan.inverted() } else { plan })
    }

    fn build_scale_division(
        &self,
        min_date: &CalendarInstant,
        max_date: &CalendarInstant,
        max_major_steps: i32,
        max_minor_steps: i32,
        granularity: Granularity,
    ) -> (TickTable, StepPlan) {
        let width = interval_width(min_date, max_date, granularity);
        let step = major_step(width, granularity, max_major_steps);
        let minor_step = select_minor_step(step, max_minor_steps, granularity);
        let plan = StepPlan::new(granularity, step, minor_step);

        let start = self
            .align(min_date, step, granularity, false)
            .or_else(|err| {
                debug!(error = %err, ?granularity, "aligning down underflows, aligning up");
                self.align(min_date, step, granularity, true)
            });
        let start = match start {
            Ok(start) => start,
            Err(err) => {
                warn!(error = %err, ?granularity, "cannot align scale start, returning empty ladder");
                return (
                    TickTable::new(min_date.to_time_value(), max_date.to_time_value()),
                    plan,
                );
            }
        };

        let ticks = TickLadderBuilder::new(plan, max_minor_steps).build(&start, max_date);
        (ticks, plan)
    }
}

/// Major step in units of `granularity`; month and year steps are whole units.
fn major_step(width: f64, granularity: Granularity, max_major_steps: i32) -> f64 {
    let step = select_major_step(width, granularity, max_major_steps);
    let step = match granularity {
        Granularity::Month | Granularity::Year => step.round(),
        _ => step,
    };
    if step > 0.0 { step } else { 1.0 }
}

fn hinted_major_steps(width: f64, max_major_steps: i32, step_size: f64) -> i32 {
    if step_size == 0.0 {
        return max_major_steps;
    }
    let steps = (width / step_size).abs().ceil();
    if steps.is_finite() {
        steps.clamp(1.0, f64::from(i32::MAX)) as i32
    } else {
        max_major_steps
    }
}
