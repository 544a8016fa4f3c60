/*!
Reporting stage: fits a quadratic to (size, time) measurements and
renders an ASCII scatter chart of the points against the fitted curve.
*/

/// `a + b·x + c·x²`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Quadratic {
    pub fn eval(&self, x: f64) -> f64 {
        self.a + self.b * x + self.c * x * x
    }

    /// Least-squares fit through the 3×3 normal equations.
    /// Returns `None` when the system is singular, e.g. fewer than three
    /// distinct x values.
    pub fn fit(points: &[(f64, f64)]) -> Option<Quadratic> {
        let mut s = [0.0f64; 5];
        let mut t = [0.0f64; 3];

        for &(x, y) in points {
            let mut power = 1.0;
            for k in 0..5 {
                s[k] += power;
                if k < 3 {
                    t[k] += power * y;
                }
                power *= x;
            }
        }

        let solution = solve3([
            [s[0], s[1], s[2], t[0]],
            [s[1], s[2], s[3], t[1]],
            [s[2], s[3], s[4], t[2]],
        ])?;

        Some(Quadratic {
            a: solution[0],
            b: solution[1],
            c: solution[2],
        })
    }
}

impl std::fmt::Display for Quadratic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3e} + {:.3e}·x + {:.3e}·x²", self.a, self.b, self.c)
    }
}

/// Gaussian elimination with partial pivoting on an augmented 3×4 system.
fn solve3(mut m: [[f64; 4]; 3]) -> Option<[f64; 3]> {
    for col in 0..3 {
        let mut pivot = col;
        for row in col + 1..3 {
            if m[row][col].abs() > m[pivot][col].abs() {
                pivot = row;
            }
        }
        if m[pivot][col].abs() < 1e-12 {
            return None;
        }
        m.swap(col, pivot);

        for row in col + 1..3 {
            let factor = m[row][col] / m[col][col];
            for k in col..4 {
                m[row][k] -= factor * m[col][k];
            }
        }
    }

    let mut solution = [0.0f64; 3];
    for row in (0..3).rev() {
        let mut acc = m[row][3];
        for k in row + 1..3 {
            acc -= m[row][k] * solution[k];
        }
        solution[row] = acc / m[row][row];
    }

    Some(solution)
}

/// Renders measured points (`o`) and the fitted curve (`*`) on a
/// `width` × `height` character grid with simple axis labels.
pub fn scatter_chart(
    points: &[(f64, f64)],
    curve: &Quadratic,
    width: usize,
    height: usize,
) -> String {
    assert!(width >= 2 && height >= 2);

    let x_min = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let x_max = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let x_span = if x_max > x_min { x_max - x_min } else { 1.0 };

    let y_max = points
        .iter()
        .map(|p| p.1)
        .chain((0..width).map(|col| {
            curve.eval(x_min + x_span * col as f64 / (width - 1) as f64)
        }))
        .fold(0.0f64, f64::max);
    let y_span = if y_max > 0.0 { y_max } else { 1.0 };

    let to_row = |y: f64| -> Option<usize> {
        if y < 0.0 || y > y_span {
            return None;
        }
        let scaled = (y / y_span * (height - 1) as f64).round() as usize;
        Some(height - 1 - scaled.min(height - 1))
    };

    let mut grid = vec![vec![' '; width]; height];

    for col in 0..width {
        let x = x_min + x_span * col as f64 / (width - 1) as f64;
        if let Some(row) = to_row(curve.eval(x)) {
            grid[row][col] = '*';
        }
    }

    for &(x, y) in points {
        let col = ((x - x_min) / x_span * (width - 1) as f64).round() as usize;
        if let Some(row) = to_row(y) {
            grid[row][col.min(width - 1)] = 'o';
        }
    }

    let mut chart = format!("time 0 .. {:.6}s\n", y_max);
    for row in grid {
        chart.push('|');
        chart.extend(row);
        chart.push('\n');
    }
    chart.push('+');
    chart.extend(std::iter::repeat('-').take(width));
    chart.push('\n');
    chart.push_str(&format!("size {} .. {}\n", x_min, x_max));

    chart
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_quadratic_coefficients() {
        let points: Vec<(f64, f64)> = (0..6)
            .map(|i| {
                let x = i as f64;
                (x, 1.0 + 2.0 * x + 3.0 * x * x)
            })
            .collect();

        let fitted = Quadratic::fit(&points).unwrap();

        assert!((fitted.a - 1.0).abs() < 1e-6);
        assert!((fitted.b - 2.0).abs() < 1e-6);
        assert!((fitted.c - 3.0).abs() < 1e-6);
    }

    #[test]
    fn too_few_distinct_sizes_yield_no_fit() {
        assert!(Quadratic::fit(&[]).is_none());
        assert!(Quadratic::fit(&[(1.0, 2.0), (1.0, 3.0)]).is_none());
    }

    #[test]
    fn chart_marks_points_and_curve() {
        let points = vec![(0.0, 0.1), (5.0, 0.5), (10.0, 2.0)];
        let curve = Quadratic::fit(&points).unwrap();

        let chart = scatter_chart(&points, &curve, 40, 10);

        assert!(chart.contains('o'));
        assert!(chart.contains('*'));
        assert!(chart.contains("size 0 .. 10"));
    }
}
