//! Decide whether the structured builder can represent an expression.

use std::collections::HashSet;

/// Longest plain comma list the builder offers. Tunable; nothing else
/// depends on the exact value.
pub const MAX_BUILDER_LIST_LEN: usize = 5;

/// True when the expression needs raw-text editing.
///
/// Malformed input (not 5 or 6 fields) is not complex; validation reports it.
pub fn is_complex(expr: &str) -> bool {
    let fields: Vec<&str> = expr.split_whitespace().collect();
    match fields.len() {
        6 => true,
        5 => {
            fields.iter().any(|field| is_complex_field(field))
                || is_weekday_list(fields[4])
        }
        _ => false,
    }
}

fn is_complex_field(field: &str) -> bool {
    if field.contains('/') {
        return true;
    }
    if field.contains(',') && field.contains('-') {
        return true;
    }
    if field.contains(',') {
        let distinct: HashSet<&str> = field.split(',').map(str::trim).collect();
        return distinct.len() > MAX_BUILDER_LIST_LEN;
    }
    false
}

/// `1-5` reads as "weekdays"; `1,3,5` has no builder widget.
fn is_weekday_list(field: &str) -> bool {
    field.contains(',') && !field.contains('-')
}
