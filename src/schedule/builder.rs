//! Structured schedule value edited in builder mode.
//!
//! The builder only covers the subset of cron that has a widget: each field
//! is "every", a single value, a range, or a short list. Everything else is
//! edited as raw text.

use super::complexity::{MAX_BUILDER_LIST_LEN, is_complex};
use super::field::{CronField, parse_number};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum BuilderField {
    Every,
    At(u32),
    Range(u32, u32),
    List(Vec<u32>),
}

impl BuilderField {
    fn parse(token: &str, field: CronField) -> Option<Self> {
        let (min, max) = field.range();
        let in_range = |v: u32| (min..=max).contains(&v);

        if token == "*" || token == "?" {
            return Some(Self::Every);
        }
        if token.contains('/') {
            return None;
        }
        if token.contains(',') {
            if field == CronField::DayOfWeek || token.contains('-') {
                return None;
            }
            let values: Vec<u32> = token
                .split(',')
                .map(|p| parse_number(p.trim()).filter(|v| in_range(*v)))
                .collect::<Option<_>>()?;
            if values.len() > MAX_BUILDER_LIST_LEN {
                return None;
            }
            return Some(Self::List(values));
        }
        if let Some((a, b)) = token.split_once('-') {
            let (a, b) = (parse_number(a)?, parse_number(b)?);
            return (in_range(a) && in_range(b) && a <= b).then_some(Self::Range(a, b));
        }
        parse_number(token).filter(|v| in_range(*v)).map(Self::At)
    }
}

impl fmt::Display for BuilderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Every => f.write_str("*"),
            Self::At(v) => write!(f, "{}", v),
            Self::Range(a, b) => write!(f, "{}-{}", a, b),
            Self::List(values) => {
                let parts: Vec<String> = values.iter().map(u32::to_string).collect();
                f.write_str(&parts.join(","))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleBuilder {
    pub minute: BuilderField,
    pub hour: BuilderField,
    pub day_of_month: BuilderField,
    pub month: BuilderField,
    pub day_of_week: BuilderField,
}

impl Default for ScheduleBuilder {
    /// Daily at midnight.
    fn default() -> Self {
        Self::daily_at(0, 0)
    }
}

impl ScheduleBuilder {
    pub fn daily_at(hour: u32, minute: u32) -> Self {
        Self {
            minute: BuilderField::At(minute),
            hour: BuilderField::At(hour),
            day_of_month: BuilderField::Every,
            month: BuilderField::Every,
            day_of_week: BuilderField::Every,
        }
    }

    pub fn weekdays_at(hour: u32, minute: u32) -> Self {
        Self {
            day_of_week: BuilderField::Range(1, 5),
            ..Self::daily_at(hour, minute)
        }
    }

    /// `weekday` is 0-7 with Sunday as 0 or 7.
    pub fn weekly_on(weekday: u32, hour: u32, minute: u32) -> Self {
        Self {
            day_of_week: BuilderField::At(weekday),
            ..Self::daily_at(hour, minute)
        }
    }

    pub fn monthly_on(day: u32, hour: u32, minute: u32) -> Self {
        Self {
            day_of_month: BuilderField::At(day),
            ..Self::daily_at(hour, minute)
        }
    }

    /// Read a simple 5-field expression. `None` when the builder has no
    /// widget for it.
    pub fn from_cron(expr: &str) -> Option<Self> {
        if is_complex(expr) {
            return None;
        }
        let fields: Vec<&str> = expr.split_whitespace().collect();
        let [minute, hour, day_of_month, month, day_of_week] = fields[..] else {
            return None;
        };

        Some(Self {
            minute: BuilderField::parse(minute, CronField::Minute)?,
            hour: BuilderField::parse(hour, CronField::Hour)?,
            day_of_month: BuilderField::parse(day_of_month, CronField::DayOfMonth)?,
            month: BuilderField::parse(month, CronField::Month)?,
            day_of_week: BuilderField::parse(day_of_week, CronField::DayOfWeek)?,
        })
    }

    /// Always a complete 5-field expression.
    pub fn to_cron(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.minute, self.hour, self.day_of_month, self.month, self.day_of_week
        )
    }

    pub fn field_mut(&mut self, field: CronField) -> Option<&mut BuilderField> {
        match field {
            CronField::Minute => Some(&mut self.minute),
            CronField::Hour => Some(&mut self.hour),
            CronField::DayOfMonth => Some(&mut self.day_of_month),
            CronField::Month => Some(&mut self.month),
            CronField::DayOfWeek => Some(&mut self.day_of_week),
            CronField::Second => None,
        }
    }
}
