/// tolerance of every "is this value effectively zero/one" comparison
pub const DEPS: f64 = 1e-9;

/// |x| < DEPS
pub fn is_zero(x: f64) -> bool {
    x.abs() < DEPS
}

/// |x - 1| < DEPS
pub fn is_one(x: f64) -> bool {
    (x - 1.0).abs() < DEPS
}

/// n! as a float, 0! = 1
pub fn factorial(n: usize) -> f64 {
    (1..=n).fold(1.0, |acc, i| acc * i as f64)
}

/// `num_values` evenly spaced points from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, num_values: usize) -> Vec<f64> {
    if num_values == 1 {
        return vec![start];
    }
    let step = (end - start) / (num_values as f64 - 1.0);
    (0..num_values).map(|i| start + i as f64 * step).collect()
}

/// centered finite difference (f(x+h) - f(x-h)) / 2h at every point of `x_values`
pub fn numerical_derivative<F>(f: F, x_values: &[f64], h: f64) -> Vec<f64>
where
    F: Fn(f64) -> f64,
{
    x_values
        .iter()
        .map(|&x| (f(x + h) - f(x - h)) / (2.0 * h))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tolerances() {
        assert!(is_zero(1e-10));
        assert!(!is_zero(1e-8));
        assert!(is_one(1.0 + 1e-10));
        assert!(!is_one(0.999));
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0), 1.0);
        assert_eq!(factorial(1), 1.0);
        assert_eq!(factorial(5), 120.0);
    }

    #[test]
    fn test_linspace() {
        let points = linspace(-1.0, 1.0, 5);
        assert_eq!(points.len(), 5);
        assert_relative_eq!(points[0], -1.0);
        assert_relative_eq!(points[2], 0.0);
        assert_relative_eq!(points[4], 1.0);
        assert_eq!(linspace(3.0, 4.0, 1), vec![3.0]);
    }

    #[test]
    fn test_numerical_derivative_of_square() {
        let d = numerical_derivative(|x| x * x, &[1.0, 2.0], 1e-5);
        assert_relative_eq!(d[0], 2.0, epsilon = 1e-6);
        assert_relative_eq!(d[1], 4.0, epsilon = 1e-6);
    }
}
