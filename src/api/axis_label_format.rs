/// Number of fraction digits needed to tell apart ticks spaced `step` apart.
#[must_use]
pub fn tick_label_precision(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 {
        return 0;
    }
    // Decimal exponent from scientific notation; exact where `log10` is not.
    let scientific = format!("{step:e}");
    let exponent = scientific
        .rsplit_once('e')
        .and_then(|(_, exponent)| exponent.parse::<i32>().ok())
        .unwrap_or(0);
    usize::try_from(-exponent).unwrap_or(0)
}

/// Formats an axis tick value with fixed precision derived from the tick step
/// and comma thousands grouping, e.g. `12,500` or `0.25`.
#[must_use]
pub fn format_tick_label(value: f64, step: f64) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }

    let precision = tick_label_precision(step);
    let text = format!("{:.precision$}", value.abs());
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let is_zero = text.bytes().all(|byte| byte == b'0' || byte == b'.');
    let mut out = String::with_capacity(text.len() + integer.len() / 3 + 1);
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
