//! Text charts for the console walkthroughs

/// Render a series as a text line chart
///
/// The series is resampled to `width` columns by averaging each bucket; NaN
/// values are ignored. Each row is labelled with the value at its centre.
pub fn line_chart(values: &[f64], height: usize, width: usize) -> String {
    let height = height.max(2);
    let width = width.max(1);

    let columns = resample(values, width);
    let finite: Vec<f64> = columns.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return "(no data)\n".to_string();
    }

    let lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = if hi > lo { hi - lo } else { 1.0 };

    let row_of = |v: f64| {
        let scaled = (v - lo) / span * (height - 1) as f64;
        (height - 1) - scaled.round() as usize
    };

    let mut grid = vec![vec![' '; columns.len()]; height];
    for (col, &v) in columns.iter().enumerate() {
        if v.is_finite() {
            grid[row_of(v)][col] = '*';
        }
    }

    let mut out = String::new();
    for (row, cells) in grid.iter().enumerate() {
        let label = hi - span * row as f64 / (height - 1) as f64;
        out.push_str(&format!("{:>9.2} |", label));
        out.extend(cells.iter());
        out.push('\n');
    }
    out.push_str(&format!("{:>9} +{}\n", "", "-".repeat(columns.len())));
    out
}

/// Average `values` into at most `width` buckets
fn resample(values: &[f64], width: usize) -> Vec<f64> {
    if values.len() <= width {
        return values.to_vec();
    }
    (0..width)
        .map(|b| {
            let start = b * values.len() / width;
            let end = ((b + 1) * values.len() / width).max(start + 1);
            let bucket: Vec<f64> = values[start..end]
                .iter()
                .copied()
                .filter(|v| v.is_finite())
                .collect();
            if bucket.is_empty() {
                f64::NAN
            } else {
                bucket.iter().sum::<f64>() / bucket.len() as f64
            }
        })
        .collect()
}

/// Horizontal bar chart, one row per value; negative bars grow leftwards
pub fn bar_chart(values: &[f64], name: &str, max_width: usize) -> String {
    let mut result = format!("\n{} (n={}):\n", name, values.len());
    result.push_str(&"-".repeat(max_width * 2 + 20));
    result.push('\n');

    let max_val = values
        .iter()
        .filter(|x| x.is_finite())
        .map(|x| x.abs())
        .fold(0.0, f64::max);
    let max_val = if max_val > 0.0 { max_val } else { 1.0 };

    for (i, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            result.push_str(&format!("{:>4} | {:>8} |\n", i, "-"));
            continue;
        }
        let bar_len = ((value.abs() / max_val) * max_width as f64).round() as usize;
        let (left, right) = if value >= 0.0 {
            (" ".repeat(max_width), "#".repeat(bar_len))
        } else {
            (
                format!("{}{}", " ".repeat(max_width - bar_len), "#".repeat(bar_len)),
                String::new(),
            )
        };
        result.push_str(&format!("{:>4} | {:>8.3} |{}|{}\n", i, value, left, right));
    }

    result
}
