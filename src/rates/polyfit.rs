//! Least-squares polynomial fitting
//!
//! Abscissae are mapped affinely onto [-1, 1] before the Vandermonde matrix is
//! built, which keeps degree-10 fits over ages 0..120 well conditioned. The
//! normal equations are never formed; faer solves the system by pivoted QR.

use faer::linalg::solvers::{ColPivQr, SolveLstsq};
use faer::Mat;
use thiserror::Error;

/// Errors raised while fitting a polynomial
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("x has {x} points but y has {y}")]
    LengthMismatch { x: usize, y: usize },

    #[error("A degree {degree} fit needs more than {degree} points, but only {points} were given")]
    InsufficientPoints { points: usize, degree: usize },

    #[error("Fit data contains a non-finite value")]
    NonFinite,

    #[error("All abscissae are equal ({0}); the fit domain is degenerate")]
    DegenerateDomain(f64),

    #[error("The design matrix is rank deficient (numerical rank {0})")]
    RankDeficient(usize),
}

/// A fitted polynomial in the power basis over a mapped domain
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    /// Coefficients in increasing power of the mapped variable
    coefficients: Vec<f64>,
    /// (min, max) of the fit abscissae; mapped onto [-1, 1]
    domain: (f64, f64),
}

impl Polynomial {
    /// Ordinary least-squares fit of a degree `degree` polynomial to `(x, y)`
    pub fn fit(x: &[f64], y: &[f64], degree: usize) -> Result<Self, FitError> {
        if x.len() != y.len() {
            return Err(FitError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        let terms = degree + 1;
        if x.len() < terms {
            return Err(FitError::InsufficientPoints {
                points: x.len(),
                degree,
            });
        }
        if x.iter().chain(y).any(|v| !v.is_finite()) {
            return Err(FitError::NonFinite);
        }

        let (lo, hi) = x
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if degree > 0 && hi <= lo {
            return Err(FitError::DegenerateDomain(lo));
        }
        let domain = (lo, hi);

        let coefficients = solve_least_squares(x, y, terms, domain)?;

        Ok(Self {
            coefficients,
            domain,
        })
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Coefficients in the mapped variable `(2x - min - max) / (max - min)`
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Evaluate at `x` by Horner's rule
    pub fn eval(&self, x: f64) -> f64 {
        let z = map_to_unit(x, self.domain);
        self.coefficients.iter().rev().fold(0.0, |acc, c| acc * z + c)
    }

    pub fn eval_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.eval(x)).collect()
    }
}

/// `n` evenly spaced points from `start` to `end`, both included
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

fn map_to_unit(x: f64, (lo, hi): (f64, f64)) -> f64 {
    if hi > lo {
        (2.0 * x - lo - hi) / (hi - lo)
    } else {
        0.0
    }
}

/// Minimize |Ax - b| over the mapped Vandermonde matrix with faer's column-pivoted QR
fn solve_least_squares(
    x: &[f64],
    y: &[f64],
    terms: usize,
    domain: (f64, f64),
) -> Result<Vec<f64>, FitError> {
    let rows = x.len();
    let design = Mat::from_fn(rows, terms, |i, k| map_to_unit(x[i], domain).powi(k as i32));
    let qr = ColPivQr::new(design.as_ref());

    // Pivoting orders |R[k, k]| decreasingly, so the first negligible one is the rank
    let r = qr.R();
    let tolerance = r[(0, 0)].abs() * f64::EPSILON * rows as f64;
    if let Some(rank) = (0..terms).find(|&k| r[(k, k)].abs() <= tolerance) {
        return Err(FitError::RankDeficient(rank));
    }

    let mut rhs = Mat::from_fn(rows, 1, |i, _| y[i]);
    qr.solve_lstsq_in_place(rhs.as_mut());
    Ok((0..terms).map(|k| rhs[(k, 0)]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_exact_quadratic_recovered() {
        let x = linspace(-3.0, 7.0, 11);
        let y: Vec<f64> = x.iter().map(|v| 2.0 - 0.5 * v + 0.25 * v * v).collect();

        let poly = Polynomial::fit(&x, &y, 2).unwrap();
        assert_eq!(poly.degree(), 2);
        for (xi, yi) in x.iter().zip(&y) {
            assert_abs_diff_eq!(poly.eval(*xi), *yi, epsilon = 1e-10);
        }
        assert_abs_diff_eq!(poly.eval(10.0), 2.0 - 5.0 + 25.0, epsilon = 1e-9);
    }

    #[test]
    fn test_least_squares_line_through_noise() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.1, 1.9, 3.1, 3.9];
        let poly = Polynomial::fit(&x, &y, 1).unwrap();
        assert_relative_eq!(poly.eval(0.0), 1.06, epsilon = 1e-12);
        assert_relative_eq!(poly.eval(3.0), 3.94, epsilon = 1e-12);
    }

    #[test]
    fn test_degree_ten_over_wide_domain_is_stable() {
        let x: Vec<f64> = (0..120).map(|a| a as f64).collect();
        let y: Vec<f64> = x.iter().map(|a| 1.0 - 0.0002 - 0.00003 * (0.09 * *a).exp()).collect();

        let poly = Polynomial::fit(&x, &y, 10).unwrap();
        for age in [15.0, 40.0, 75.0] {
            let exact = 1.0 - 0.0002 - 0.00003 * (0.09_f64 * age).exp();
            assert_abs_diff_eq!(poly.eval(age), exact, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_fit_errors() {
        assert_eq!(
            Polynomial::fit(&[1.0, 2.0], &[1.0], 1),
            Err(FitError::LengthMismatch { x: 2, y: 1 })
        );
        assert_eq!(
            Polynomial::fit(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], 4),
            Err(FitError::InsufficientPoints { points: 3, degree: 4 })
        );
        assert_eq!(
            Polynomial::fit(&[1.0, f64::NAN], &[1.0, 2.0], 1),
            Err(FitError::NonFinite)
        );
        assert_eq!(
            Polynomial::fit(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0], 1),
            Err(FitError::DegenerateDomain(2.0))
        );
        // Repeated abscissae leave too few distinct points for a quadratic
        assert_eq!(
            Polynomial::fit(&[0.0, 0.0, 1.0, 1.0], &[1.0, 1.0, 2.0, 2.0], 2),
            Err(FitError::RankDeficient(2))
        );
    }

    #[test]
    fn test_linspace_endpoints() {
        let grid = linspace(15.0, 75.0, 60);
        assert_eq!(grid.len(), 60);
        assert_eq!(grid[0], 15.0);
        assert_eq!(grid[59], 75.0);
        assert_relative_eq!(grid[1] - grid[0], 60.0 / 59.0, epsilon = 1e-12);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
