//! Plain-English rendering of cron expressions.
//!
//! Produces summaries such as "At 09:00 AM, Monday through Friday" or
//! "Every 15 minutes, between 09:00 AM and 05:59 PM". Expressions are
//! assumed to have passed validation; unusual shapes fall back to quoting
//! the raw field.

use super::field::parse_number;

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Shape of a single field, as far as the wording cares.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Shape {
    Any,
    Value(u32),
    Range(u32, u32),
    List(Vec<u32>),
    Step { start: Option<u32>, every: u32 },
    Other,
}

impl Shape {
    fn parse(field: &str) -> Self {
        if field == "*" || field == "?" {
            return Self::Any;
        }
        if let Some((base, step)) = field.split_once('/') {
            let Some(every) = parse_number(step) else {
                return Self::Other;
            };
            return match base {
                "*" => Self::Step { start: None, every },
                _ => match parse_number(base) {
                    Some(start) => Self::Step {
                        start: Some(start),
                        every,
                    },
                    None => Self::Other,
                },
            };
        }
        if field.contains(',') {
            let values: Option<Vec<u32>> = field.split(',').map(|p| parse_number(p.trim())).collect();
            return values.map_or(Self::Other, Self::List);
        }
        if let Some((a, b)) = field.split_once('-') {
            return match (parse_number(a), parse_number(b)) {
                (Some(a), Some(b)) => Self::Range(a, b),
                _ => Self::Other,
            };
        }
        parse_number(field).map_or(Self::Other, Self::Value)
    }
}

/// Describe a 5- or 6-field expression. Other inputs are echoed back.
pub fn describe(expr: &str) -> String {
    let fields: Vec<&str> = expr.split_whitespace().collect();
    let (second, rest) = match fields.len() {
        6 => (Some(fields[0]), &fields[1..]),
        5 => (None, &fields[..]),
        _ => return expr.trim().to_string(),
    };
    let (minute, hour, dom, month, dow) = (rest[0], rest[1], rest[2], rest[3], rest[4]);

    let mut parts = vec![describe_time(second, minute, hour)];
    parts.extend(describe_day_of_month(dom));
    parts.extend(describe_day_of_week(dow));
    parts.extend(describe_month(month));
    parts.join(", ")
}

fn describe_time(second: Option<&str>, minute: &str, hour: &str) -> String {
    let second_shape = second.map(Shape::parse);
    let minute_shape = Shape::parse(minute);
    let hour_shape = Shape::parse(hour);

    let fixed_second = match &second_shape {
        None => Some(0),
        Some(Shape::Value(s)) => Some(*s),
        Some(_) => None,
    };

    // Fixed clock times: "At 09:00 AM" / "At 09:00 AM and 05:00 PM".
    if let (Some(s), Shape::Value(m)) = (fixed_second, &minute_shape) {
        match &hour_shape {
            Shape::Value(h) => return format!("At {}", clock(*h, *m, s)),
            Shape::List(hours) => {
                let times: Vec<String> = hours.iter().map(|h| clock(*h, *m, s)).collect();
                return format!("At {}", join_words(&times));
            }
            _ => {}
        }
    }

    let mut parts = Vec::new();
    if let Some(shape) = &second_shape {
        if let Some(text) = describe_sub_unit(shape, second.unwrap_or_default(), "second", "minute") {
            parts.push(text);
        }
    }
    let minute_text = if matches!(second_shape, Some(Shape::Any)) && minute_shape == Shape::Any {
        None
    } else {
        describe_sub_unit(&minute_shape, minute, "minute", "hour")
    };
    parts.extend(minute_text);
    parts.extend(describe_hours(&hour_shape, hour));

    if parts.is_empty() {
        return "Every minute".to_string();
    }
    capitalize(&parts.join(", "))
}

/// Seconds within a minute or minutes within an hour.
fn describe_sub_unit(shape: &Shape, raw: &str, unit: &str, parent: &str) -> Option<String> {
    let text = match shape {
        Shape::Any => format!("every {}", unit),
        Shape::Value(0) if unit == "second" => return None,
        Shape::Value(v) => format!("at {} {} past the {}", v, plural(*v, unit), parent),
        Shape::Range(a, b) => format!("{}s {} through {} past the {}", unit, a, b, parent),
        Shape::List(values) => {
            let values: Vec<String> = values.iter().map(u32::to_string).collect();
            format!("at {} {}s past the {}", join_words(&values), unit, parent)
        }
        Shape::Step { start: None, every } => format!("every {} {}", every, plural(*every, unit)),
        Shape::Step {
            start: Some(start),
            every,
        } => format!(
            "every {} {}, starting at {} {}s past the {}",
            every,
            plural(*every, unit),
            start,
            unit,
            parent
        ),
        Shape::Other => format!("at {}s {}", unit, raw),
    };
    Some(text)
}

fn describe_hours(shape: &Shape, raw: &str) -> Option<String> {
    let text = match shape {
        Shape::Any => return None,
        Shape::Value(h) => format!("between {} and {}", clock(*h, 0, 0), clock(*h, 59, 0)),
        Shape::Range(a, b) => format!("between {} and {}", clock(*a, 0, 0), clock(*b, 59, 0)),
        Shape::List(hours) => {
            let hours: Vec<String> = hours.iter().map(|h| clock(*h, 0, 0)).collect();
            format!("during the hours starting at {}", join_words(&hours))
        }
        Shape::Step { start: None, every } => format!("every {} {}", every, plural(*every, "hour")),
        Shape::Step {
            start: Some(start),
            every,
        } => format!(
            "every {} {}, starting at {}",
            every,
            plural(*every, "hour"),
            clock(*start, 0, 0)
        ),
        Shape::Other => format!("at hours {}", raw),
    };
    Some(text)
}

fn describe_day_of_month(raw: &str) -> Option<String> {
    let text = match Shape::parse(raw) {
        Shape::Any => return None,
        Shape::Value(d) => format!("on day {} of the month", d),
        Shape::Range(a, b) => format!("between day {} and {} of the month", a, b),
        Shape::List(days) => {
            let days: Vec<String> = days.iter().map(u32::to_string).collect();
            format!("on day {} of the month", join_words(&days))
        }
        Shape::Step { start: None, every } => format!("every {} {}", every, plural(every, "day")),
        Shape::Step {
            start: Some(start),
            every,
        } => format!(
            "every {} {}, starting on day {} of the month",
            every,
            plural(every, "day"),
            start
        ),
        Shape::Other => format!("on days {} of the month", raw),
    };
    Some(text)
}

fn describe_day_of_week(raw: &str) -> Option<String> {
    let text = match Shape::parse(raw) {
        Shape::Any => return None,
        Shape::Value(d) => format!("only on {}", weekday(d)),
        Shape::Range(a, b) => format!("{} through {}", weekday(a), weekday(b)),
        Shape::List(days) => {
            let days: Vec<String> = days.iter().map(|d| weekday(*d).to_string()).collect();
            format!("only on {}", join_words(&days))
        }
        Shape::Step { start: None, every } => {
            format!("every {} days of the week", every)
        }
        Shape::Step {
            start: Some(start),
            every,
        } => format!(
            "every {} days of the week, starting on {}",
            every,
            weekday(start)
        ),
        Shape::Other => format!("on weekdays {}", raw),
    };
    Some(text)
}

fn describe_month(raw: &str) -> Option<String> {
    let text = match Shape::parse(raw) {
        Shape::Any => return None,
        Shape::Value(m) => format!("only in {}", month(m)),
        Shape::Range(a, b) => format!("{} through {}", month(a), month(b)),
        Shape::List(months) => {
            let months: Vec<String> = months.iter().map(|m| month(*m).to_string()).collect();
            format!("only in {}", join_words(&months))
        }
        Shape::Step { start: None, every } => format!("every {} {}", every, plural(every, "month")),
        Shape::Step {
            start: Some(start),
            every,
        } => format!(
            "every {} {}, {} through December",
            every,
            plural(every, "month"),
            month(start)
        ),
        Shape::Other => format!("in months {}", raw),
    };
    Some(text)
}

/// 12-hour clock with zero padding: `09:00 AM`, `05:30:15 PM`.
fn clock(hour: u32, minute: u32, second: u32) -> String {
    let (h12, suffix) = match hour % 24 {
        0 => (12, "AM"),
        h @ 1..=11 => (h, "AM"),
        12 => (12, "PM"),
        h => (h - 12, "PM"),
    };
    if second == 0 {
        format!("{:02}:{:02} {}", h12, minute, suffix)
    } else {
        format!("{:02}:{:02}:{:02} {}", h12, minute, second, suffix)
    }
}

fn weekday(day: u32) -> &'static str {
    WEEKDAYS[(day % 7) as usize]
}

fn month(month: u32) -> &'static str {
    MONTHS[(month.clamp(1, 12) - 1) as usize]
}

fn plural(n: u32, unit: &str) -> String {
    if n == 1 {
        unit.to_string()
    } else {
        format!("{}s", unit)
    }
}

/// "a", "a and b", "a, b, and c".
fn join_words(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [one] => one.clone(),
        [a, b] => format!("{} and {}", a, b),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
