pub(super) const AXIS_X_TARGET_SPACING_PX: f64 = 90.0;
pub(super) const AXIS_Y_TARGET_SPACING_PX: f64 = 48.0;

pub(super) fn axis_tick_target_count(
    axis_span_px: f64,
    target_spacing_px: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return min_ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return min_ticks;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(min_ticks, max_ticks)
}

/// Rounds `span / (count - 1)` up to 1, 2, 2.5 or 5 times a power of ten.
pub(super) fn nice_step(span: f64, target_count: usize) -> f64 {
    if !span.is_finite() || span <= 0.0 {
        return 1.0;
    }
    let intervals = target_count.saturating_sub(1).max(1) as f64;
    let raw = span / intervals;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 2.5 {
        2.5
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Multiples of a nice step inside `range`, endpoints included when they land
/// on the grid.
pub(super) fn nice_ticks(range: (f64, f64), target_count: usize) -> (Vec<f64>, f64) {
    let (low, high) = if range.0 <= range.1 {
        range
    } else {
        (range.1, range.0)
    };
    let step = nice_step(high - low, target_count);
    let tolerance = step * 1e-9;
    let mut ticks = Vec::new();
    let mut index = (low / step - 1e-9).ceil();
    loop {
        let value = index * step;
        if value > high + tolerance || ticks.len() > 1_000 {
            break;
        }
        ticks.push(if value.abs() <= tolerance { 0.0 } else { value });
        index += 1.0;
    }
    (ticks, step)
}

pub(super) fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step.is_finite() && step > 0.0 {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    // 2.5-based steps need one digit more than their magnitude suggests.
    let decimals = if (step / 10f64.powi(-(decimals as i32)) - 2.5).abs() <= 1e-9 {
        decimals + 1
    } else {
        decimals
    };
    format!("{value:.decimals$}")
}
