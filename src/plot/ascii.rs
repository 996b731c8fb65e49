//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - dataset points: `o`
//! - line through consecutive points: `-`

use crate::domain::ResponseDataset;

/// Render one dataset: a header line with ranges followed by the grid.
pub fn render_dataset_plot(dataset: &ResponseDataset, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let pairs = dataset.pairs();
    let (x_min, x_max) = x_range(&pairs).unwrap_or_else(|| {
        let x = pairs.first().map(|p| p.0).unwrap_or(0.0);
        (x - 1.0, x + 1.0)
    });
    let (y_min, y_max) = y_range(&pairs).unwrap_or_else(|| {
        let y = pairs.first().map(|p| p.1).unwrap_or(0.0);
        (y - 1.0, y + 1.0)
    });
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw the line first (so points can overlay).
    draw_curve(&mut grid, &pairs, x_min, x_max, y_min, y_max);
    for &(x, y) in &pairs {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = 'o';
    }

    let meta = &dataset.meta;
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {} | x=[{x_min:.2}, {x_max:.2}] {} | y=[{y_min:.2}, {y_max:.2}] {}\n",
        dataset.kind().display_name(),
        meta.unit_x,
        meta.unit_y,
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

/// Render several datasets one after another, separated by a blank line.
pub fn render_plots<'a>(
    datasets: impl IntoIterator<Item = &'a ResponseDataset>,
    width: usize,
    height: usize,
) -> String {
    datasets
        .into_iter()
        .map(|ds| render_dataset_plot(ds, width, height))
        .collect::<Vec<_>>()
        .join("\n")
}

fn x_range(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &(x, _) in points {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn y_range(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &(_, y) in points {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, '-');
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssayKind, DataPoint, DatasetMeta};

    #[test]
    fn plot_golden_snapshot_small() {
        let ds = ResponseDataset {
            meta: DatasetMeta::for_kind(AssayKind::Antibacterial),
            points: vec![DataPoint { x: 0.0, y: 0.0 }, DataPoint { x: 10.0, y: 10.0 }],
        };

        let txt = render_dataset_plot(&ds, 10, 5);
        let expected = concat!(
            "Plot: Antibacterial Activity | x=[0.00, 10.00] µg/ml | y=[-0.50, 10.50] mm\n",
            "        -o\n",
            "      --  \n",
            "    --    \n",
            "  --      \n",
            "o-        \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn single_point_dataset_renders() {
        let ds = ResponseDataset {
            meta: DatasetMeta::for_kind(AssayKind::Antioxidant),
            points: vec![DataPoint { x: 50.0, y: 40.0 }],
        };
        let txt = render_dataset_plot(&ds, 12, 6);
        assert_eq!(txt.lines().count(), 7);
        let markers: usize = txt.lines().skip(1).map(|l| l.matches('o').count()).sum();
        assert_eq!(markers, 1);
    }
}
