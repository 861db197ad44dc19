//! Derivative-free local search (Nelder–Mead downhill simplex)
//!
//! Standard coefficients: reflection α = 1, expansion γ = 2,
//! contraction ρ = 0.5, shrink σ = 0.5.

use std::fmt;

const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Simplex tuning.
///
/// # Defaults
///
/// - `initial_step`: 0.5 (offset of each non-base vertex along one axis)
/// - `tolerance`: 1e-6 (stop when worst − best falls below this)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NelderMeadOptions {
    pub initial_step: f64,
    pub tolerance: f64,
}

impl Default for NelderMeadOptions {
    fn default() -> Self {
        Self {
            initial_step: 0.5,
            tolerance: 1e-6,
        }
    }
}

impl NelderMeadOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn initial_step(mut self, step: f64) -> Self {
        self.initial_step = step;
        self
    }

    #[inline]
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Why a local search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Convergence {
    /// The simplex values spread less than the tolerance.
    Spread,
    /// The iteration budget ran out first.
    MaxIterations,
}

impl Convergence {
    pub fn as_str(self) -> &'static str {
        match self {
            Convergence::Spread => "converged (spread)",
            Convergence::MaxIterations => "max iterations",
        }
    }
}

impl fmt::Display for Convergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one local search.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalMinimum {
    pub x: Vec<f64>,
    pub value: f64,
    pub convergence: Convergence,
    pub iterations: usize,
}

struct Vertex {
    x: Vec<f64>,
    value: f64,
}

/// `a + t (b - a)`
fn lerp(a: &[f64], b: &[f64], t: f64) -> Vec<f64> {
    a.iter().zip(b).map(|(&a, &b)| a + t * (b - a)).collect()
}

/// Minimize `f` starting from the simplex built around `x0`.
///
/// Vertex 0 is `x0`; vertex `i` is `x0` with coordinate `i - 1` moved by
/// `options.initial_step`. At most `max_iterations` simplex updates are made.
///
/// ```
/// use spread_engine::{minimize, Convergence, NelderMeadOptions};
///
/// let f = |x: &[f64]| (x[0] - 1.0).powi(2) + (x[1] + 2.0).powi(2);
/// let min = minimize(f, &[0.0, 0.0], &NelderMeadOptions::default(), 500);
/// assert_eq!(min.convergence, Convergence::Spread);
/// assert!((min.x[0] - 1.0).abs() < 1e-2);
/// ```
pub fn minimize<F>(
    mut f: F,
    x0: &[f64],
    options: &NelderMeadOptions,
    max_iterations: usize,
) -> LocalMinimum
where
    F: FnMut(&[f64]) -> f64,
{
    let dim = x0.len();
    let mut simplex: Vec<Vertex> = Vec::with_capacity(dim + 1);
    simplex.push(Vertex {
        value: f(x0),
        x: x0.to_vec(),
    });
    for i in 0..dim {
        let mut x = x0.to_vec();
        x[i] += options.initial_step;
        simplex.push(Vertex { value: f(&x), x });
    }

    let mut convergence = Convergence::MaxIterations;
    let mut iterations = max_iterations;

    for iteration in 0..max_iterations {
        simplex.sort_by(|a, b| a.value.total_cmp(&b.value));

        let best = simplex[0].value;
        let worst = simplex[dim].value;
        if dim == 0 || worst - best < options.tolerance {
            convergence = Convergence::Spread;
            iterations = iteration;
            break;
        }

        let mut centroid = vec![0.0; dim];
        for vertex in &simplex[..dim] {
            for (c, &v) in centroid.iter_mut().zip(&vertex.x) {
                *c += v;
            }
        }
        for c in &mut centroid {
            *c /= dim as f64;
        }

        // reflection: c + α (c - x_worst)
        let reflected = lerp(&centroid, &simplex[dim].x, -REFLECT);
        let f_reflected = f(&reflected);

        if f_reflected < best {
            let expanded = lerp(&centroid, &reflected, EXPAND);
            let f_expanded = f(&expanded);
            simplex[dim] = if f_expanded < f_reflected {
                Vertex {
                    x: expanded,
                    value: f_expanded,
                }
            } else {
                Vertex {
                    x: reflected,
                    value: f_reflected,
                }
            };
            continue;
        }

        if f_reflected < simplex[dim - 1].value {
            simplex[dim] = Vertex {
                x: reflected,
                value: f_reflected,
            };
            continue;
        }

        // Contract toward the centroid from whichever of reflected/worst is better
        let from = if f_reflected < worst {
            &reflected
        } else {
            &simplex[dim].x
        };
        let contracted = lerp(&centroid, from, CONTRACT);
        let f_contracted = f(&contracted);
        if f_contracted < worst {
            simplex[dim] = Vertex {
                x: contracted,
                value: f_contracted,
            };
            continue;
        }

        // shrink
        let anchor = simplex[0].x.clone();
        for vertex in &mut simplex[1..] {
            vertex.x = lerp(&anchor, &vertex.x, SHRINK);
            vertex.value = f(&vertex.x);
        }
    }

    simplex.sort_by(|a, b| a.value.total_cmp(&b.value));
    let Vertex { x, value } = simplex.swap_remove(0);
    LocalMinimum {
        x,
        value,
        convergence,
        iterations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadratic_bowl() {
        let f = |x: &[f64]| {
            x.iter()
                .enumerate()
                .map(|(i, v)| (v - i as f64).powi(2))
                .sum::<f64>()
        };
        let options = NelderMeadOptions::new().tolerance(1e-12);
        let min = minimize(f, &[3.0, -2.0, 5.0], &options, 2000);
        assert_eq!(min.convergence, Convergence::Spread);
        for (i, v) in min.x.iter().enumerate() {
            assert!((v - i as f64).abs() < 1e-3, "coordinate {i}: {v}");
        }
        assert!(min.value < 1e-6);
    }

    #[test]
    fn test_rosenbrock_makes_progress() {
        let f = |x: &[f64]| (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2);
        let start = [-1.2, 1.0];
        let options = NelderMeadOptions::new().tolerance(1e-14);
        let min = minimize(f, &start, &options, 5000);
        assert!(min.value < 1e-3, "value {}", min.value);
        assert!((min.x[0] - 1.0).abs() < 0.1 && (min.x[1] - 1.0).abs() < 0.2);
    }

    #[test]
    fn test_iteration_budget() {
        let mut calls = 0;
        let f = |x: &[f64]| {
            calls += 1;
            x[0].abs() + x[1].abs()
        };
        let options = NelderMeadOptions::new().tolerance(0.0);
        let min = minimize(f, &[10.0, 10.0], &options, 10);
        assert_eq!(min.convergence, Convergence::MaxIterations);
        assert_eq!(min.iterations, 10);
        // 3 initial vertices, then at most 1 + 1 + 2 evaluations per iteration
        assert!(calls <= 3 + 10 * 4);
    }

    #[test]
    fn test_flat_function_converges_immediately() {
        let min = minimize(|_| 1.0, &[0.0, 0.0, 0.0], &NelderMeadOptions::default(), 100);
        assert_eq!(min.convergence, Convergence::Spread);
        assert_eq!(min.iterations, 0);
        assert_eq!(min.value, 1.0);
    }

    #[test]
    fn test_never_worse_than_start() {
        let f = |x: &[f64]| (x[0] * 3.0).sin() + x[1].powi(2);
        let x0 = [0.4, 0.7];
        let min = minimize(f, &x0, &NelderMeadOptions::default(), 50);
        assert!(min.value <= f(&x0));
    }

    #[test]
    fn test_convergence_labels() {
        assert_eq!(Convergence::Spread.to_string(), "converged (spread)");
        assert_eq!(Convergence::MaxIterations.to_string(), "max iterations");
    }
}
