//! Derivative-free minimisation.

/// Nelder-Mead configuration.
#[derive(Debug, Clone, Copy)]
pub struct NelderMeadConfig {
    pub max_iter: usize,
    /// Converged when the objective spread across the simplex drops below
    /// `tolerance * (1 + |f_best|)` and the simplex is no wider than `sqrt(x_tolerance)`.
    pub tolerance: f64,
    /// ...or when every vertex lies within this distance of the best one.
    pub x_tolerance: f64,
    pub initial_step: f64,
    pub reflection: f64,
    pub expansion: f64,
    pub contraction: f64,
    pub shrink: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-10,
            x_tolerance: 1e-9,
            initial_step: 0.1,
            reflection: 1.0,
            expansion: 2.0,
            contraction: 0.5,
            shrink: 0.5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NelderMeadResult {
    pub optimal_point: Vec<f64>,
    pub optimal_value: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Minimise `f` starting from `initial`. Optional per-coordinate `(lower, upper)` bounds are
/// enforced by clamping every trial point. Non-finite objective values count as +∞.
pub fn nelder_mead<F>(
    f: F,
    initial: &[f64],
    bounds: Option<&[(f64, f64)]>,
    config: NelderMeadConfig,
) -> NelderMeadResult
where
    F: Fn(&[f64]) -> f64,
{
    let n = initial.len();
    let clamp = |x: &mut Vec<f64>| {
        if let Some(b) = bounds {
            for (xi, &(lo, hi)) in x.iter_mut().zip(b) {
                *xi = xi.clamp(lo, hi);
            }
        }
    };
    let eval = |x: &[f64]| {
        let v = f(x);
        if v.is_finite() { v } else { f64::INFINITY }
    };

    let mut start = initial.to_vec();
    clamp(&mut start);

    if n == 0 {
        let value = eval(&start);
        return NelderMeadResult {
            optimal_point: start,
            optimal_value: value,
            iterations: 0,
            converged: true,
        };
    }

    // Initial simplex: the start point plus one step along each axis.
    // A step that would be swallowed by a bound goes the other way instead.
    let mut simplex: Vec<(Vec<f64>, f64)> = Vec::with_capacity(n + 1);
    simplex.push((start.clone(), eval(&start)));
    for i in 0..n {
        let mut vertex = start.clone();
        vertex[i] += config.initial_step;
        clamp(&mut vertex);
        if (vertex[i] - start[i]).abs() < config.initial_step * 0.5 {
            vertex[i] = start[i] - config.initial_step;
            clamp(&mut vertex);
        }
        let value = eval(&vertex);
        simplex.push((vertex, value));
    }

    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        simplex.sort_by(|a, b| a.1.total_cmp(&b.1));

        let best = simplex[0].1;
        let worst = simplex[n].1;
        let f_spread = (worst - best).abs();
        let x_spread = simplex[1..]
            .iter()
            .flat_map(|(v, _)| v.iter().zip(&simplex[0].0).map(|(a, b)| (a - b).abs()))
            .fold(0.0, f64::max);

        // Equal values on either side of a minimum are not convergence on their own.
        let f_settled = best.is_finite()
            && f_spread <= config.tolerance * (1.0 + best.abs())
            && x_spread <= config.x_tolerance.sqrt();

        if f_settled || x_spread <= config.x_tolerance {
            converged = true;
            break;
        }
        iterations += 1;

        // Centroid of all but the worst vertex.
        let mut centroid = vec![0.0; n];
        for (vertex, _) in &simplex[..n] {
            for (c, x) in centroid.iter_mut().zip(vertex) {
                *c += x / n as f64;
            }
        }

        let towards = |coef: f64, from: &[f64]| -> Vec<f64> {
            let mut p: Vec<f64> = centroid
                .iter()
                .zip(from)
                .map(|(c, x)| c + coef * (c - x))
                .collect();
            clamp(&mut p);
            p
        };

        let worst_point = simplex[n].0.clone();
        let reflected = towards(config.reflection, &worst_point);
        let f_reflected = eval(&reflected);

        if f_reflected < simplex[0].1 {
            let expanded = towards(config.reflection * config.expansion, &worst_point);
            let f_expanded = eval(&expanded);
            simplex[n] = if f_expanded < f_reflected {
                (expanded, f_expanded)
            } else {
                (reflected, f_reflected)
            };
            continue;
        }

        if f_reflected < simplex[n - 1].1 {
            simplex[n] = (reflected, f_reflected);
            continue;
        }

        // Contraction: outside if the reflection beat the worst point, inside otherwise.
        let (contracted, f_contracted) = if f_reflected < simplex[n].1 {
            let p = towards(config.reflection * config.contraction, &worst_point);
            let v = eval(&p);
            (p, v)
        } else {
            let p = towards(-config.contraction, &worst_point);
            let v = eval(&p);
            (p, v)
        };

        if f_contracted < simplex[n].1.min(f_reflected) {
            simplex[n] = (contracted, f_contracted);
            continue;
        }

        // Shrink everything towards the best vertex.
        let best_point = simplex[0].0.clone();
        for (vertex, value) in simplex.iter_mut().skip(1) {
            for (x, b) in vertex.iter_mut().zip(&best_point) {
                *x = b + config.shrink * (*x - b);
            }
            clamp(vertex);
            *value = eval(vertex);
        }
    }

    simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
    let (optimal_point, optimal_value) = simplex.swap_remove(0);

    NelderMeadResult {
        optimal_point,
        optimal_value,
        iterations,
        converged,
    }
}
