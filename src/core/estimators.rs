//! This module contains everything related to estimators.
use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Everything that needs to be updated.
pub trait Updateable<T> {
    /// Update this estimator with `value`.
    fn update(&mut self, value: T);
}

/// Ordinary least-squares fit of a straight line $y = m x + c$.
///
/// The fit only keeps the running sums
///
/// $$ \sum x_i, \quad \sum y_i, \quad \sum x_i^2, \quad \sum x_i y_i $$
///
/// together with the number of points $N$, so that two fits over disjoint point sets can be
/// combined with `+`. The slope is
///
/// $$ m = \frac{N \sum x_i y_i - \sum x_i \sum y_i}{N \sum x_i^2 - \left( \sum x_i \right)^2} $$
///
/// which is `nan` or infinite if all $x_i$ coincide or a point is non-finite.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LinearFit<T> {
    sum_x: T,
    sum_y: T,
    sum_xx: T,
    sum_xy: T,
    points: usize,
}

impl<T: Float> Default for LinearFit<T> {
    fn default() -> Self {
        Self {
            sum_x: T::zero(),
            sum_y: T::zero(),
            sum_xx: T::zero(),
            sum_xy: T::zero(),
            points: 0,
        }
    }
}

impl<T: Float> Add for LinearFit<T> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            sum_x: self.sum_x + other.sum_x,
            sum_y: self.sum_y + other.sum_y,
            sum_xx: self.sum_xx + other.sum_xx,
            sum_xy: self.sum_xy + other.sum_xy,
            points: self.points + other.points,
        }
    }
}

impl<T: Float + AddAssign> AddAssign for LinearFit<T> {
    fn add_assign(&mut self, other: Self) {
        self.sum_x += other.sum_x;
        self.sum_y += other.sum_y;
        self.sum_xx += other.sum_xx;
        self.sum_xy += other.sum_xy;
        self.points += other.points;
    }
}

impl<T: Float + AddAssign> Updateable<(T, T)> for LinearFit<T> {
    fn update(&mut self, (x, y): (T, T)) {
        self.sum_x += x;
        self.sum_y += y;
        self.sum_xx += x * x;
        self.sum_xy += x * y;
        self.points += 1;
    }
}

impl<T: Float> LinearFit<T> {
    /// Returns the number of points that entered the fit.
    pub fn points(&self) -> usize {
        self.points
    }

    /// Returns the slope, $m$, of the fitted line.
    pub fn slope(&self) -> T {
        let n = self.count();
        (n * self.sum_xy - self.sum_x * self.sum_y) / (n * self.sum_xx - self.sum_x * self.sum_x)
    }

    /// Returns the intercept, $c$, of the fitted line.
    pub fn intercept(&self) -> T {
        (self.sum_y - self.slope() * self.sum_x) / self.count()
    }

    fn count(&self) -> T {
        // a fit with more points than `T` can count is not meaningful anyway
        T::from(self.points).unwrap_or_else(T::infinity)
    }
}
