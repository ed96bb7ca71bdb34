//! Piecewise-linear tabulated functions.
//!
//! - [`Tabulated1D`]: one-dimensional, strictly increasing x
//! - [`UniformXTabulated2D`]: columns over x, each with its own y samples
//!   (the layout of PVTO / PVTG style tables)
//! - [`UniformTabulated2D`]: regular grid, bilinear interpolation

use crate::error::{PvtError, PvtResult};
use bo_core::Real;

/// One-dimensional piecewise-linear function.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tabulated1D {
    xs: Vec<Real>,
    ys: Vec<Real>,
}

impl Tabulated1D {
    /// Build from sample arrays. Samples are sorted by x; duplicate x values
    /// are rejected.
    pub fn from_samples(xs: &[Real], ys: &[Real]) -> PvtResult<Self> {
        if xs.len() != ys.len() {
            return Err(PvtError::invalid_table(format!(
                "x and y sample counts differ ({} vs {})",
                xs.len(),
                ys.len()
            )));
        }
        Self::from_pairs(xs.iter().copied().zip(ys.iter().copied()))
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (Real, Real)>) -> PvtResult<Self> {
        let mut pairs: Vec<(Real, Real)> = pairs.into_iter().collect();
        if pairs.is_empty() {
            return Err(PvtError::invalid_table(
                "tabulated function needs at least one sample",
            ));
        }
        if pairs.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(PvtError::invalid_table("non-finite sample value"));
        }
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        if let Some(w) = pairs.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(PvtError::invalid_table(format!(
                "duplicate x value {} in tabulated function",
                w[0].0
            )));
        }
        let (xs, ys) = pairs.into_iter().unzip();
        Ok(Self { xs, ys })
    }

    pub fn num_samples(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn xs(&self) -> &[Real] {
        &self.xs
    }

    pub fn ys(&self) -> &[Real] {
        &self.ys
    }

    pub fn x_min(&self) -> Real {
        self.xs.first().copied().unwrap_or(Real::NAN)
    }

    pub fn x_max(&self) -> Real {
        self.xs.last().copied().unwrap_or(Real::NAN)
    }

    /// `true` if `x` lies inside the sampled range.
    pub fn applies(&self, x: Real) -> bool {
        !self.xs.is_empty() && self.x_min() <= x && x <= self.x_max()
    }

    /// Evaluate at `x`. Outside the sampled range the end segments are
    /// extended linearly when `extrapolate` is set.
    pub fn eval(&self, x: Real, extrapolate: bool) -> PvtResult<Real> {
        self.check(x, extrapolate)?;
        if self.xs.len() == 1 {
            return Ok(self.ys[0]);
        }
        let i = self.segment(x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        let alpha = (x - x0) / (x1 - x0);
        Ok(y0 + alpha * (y1 - y0))
    }

    /// Slope of the segment containing `x`.
    pub fn eval_derivative(&self, x: Real, extrapolate: bool) -> PvtResult<Real> {
        self.check(x, extrapolate)?;
        if self.xs.len() == 1 {
            return Ok(0.0);
        }
        let i = self.segment(x);
        Ok((self.ys[i + 1] - self.ys[i]) / (self.xs[i + 1] - self.xs[i]))
    }

    fn check(&self, x: Real, extrapolate: bool) -> PvtResult<()> {
        if self.xs.is_empty() {
            return Err(PvtError::invalid_table("tabulated function is empty"));
        }
        if !extrapolate && !self.applies(x) {
            return Err(PvtError::OutOfRange {
                what: "tabulated function argument",
                value: x,
                min: self.x_min(),
                max: self.x_max(),
            });
        }
        Ok(())
    }

    /// Index of the segment used for `x`, clamped to the end segments.
    fn segment(&self, x: Real) -> usize {
        segment_index(&self.xs, x)
    }
}

/// Clamped segment index into a sorted axis with at least two entries.
fn segment_index(axis: &[Real], x: Real) -> usize {
    let n = axis.len();
    debug_assert!(n >= 2);
    let upper = axis.partition_point(|&xi| xi <= x);
    upper.saturating_sub(1).min(n - 2)
}

/// How the y axis is shifted when blending two neighbouring columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationPolicy {
    /// Plain interpolation at constant y.
    #[default]
    Vertical,
    /// Follow the offset between the first samples of the columns
    /// (saturated point at the low end, e.g. PVTO).
    LeftExtreme,
    /// Follow the offset between the last samples of the columns
    /// (saturated point at the high end, e.g. PVTG).
    RightExtreme,
}

/// Two-dimensional function over columns of unevenly sampled y values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UniformXTabulated2D {
    xs: Vec<Real>,
    columns: Vec<Vec<(Real, Real)>>,
    policy: InterpolationPolicy,
}

impl UniformXTabulated2D {
    pub fn new(policy: InterpolationPolicy) -> Self {
        Self {
            xs: Vec::new(),
            columns: Vec::new(),
            policy,
        }
    }

    pub fn policy(&self) -> InterpolationPolicy {
        self.policy
    }

    pub fn num_x(&self) -> usize {
        self.xs.len()
    }

    pub fn xs(&self) -> &[Real] {
        &self.xs
    }

    /// `(y, value)` samples of column `i`, sorted by y.
    pub fn column(&self, i: usize) -> PvtResult<&[(Real, Real)]> {
        self.columns
            .get(i)
            .map(Vec::as_slice)
            .ok_or_else(|| PvtError::invalid_table(format!("column {i} does not exist")))
    }

    /// Add a column at one end of the x axis. Returns its index.
    pub fn append_x_pos(&mut self, x: Real) -> PvtResult<usize> {
        if !x.is_finite() {
            return Err(PvtError::invalid_table("non-finite x sample"));
        }
        match (self.xs.first(), self.xs.last()) {
            (_, None) => {
                self.xs.push(x);
                self.columns.push(Vec::new());
                Ok(0)
            }
            (_, Some(&last)) if x > last => {
                self.xs.push(x);
                self.columns.push(Vec::new());
                Ok(self.xs.len() - 1)
            }
            (Some(&first), _) if x < first => {
                self.xs.insert(0, x);
                self.columns.insert(0, Vec::new());
                Ok(0)
            }
            _ => Err(PvtError::invalid_table(format!(
                "x sample {x} must be added at one of the ends of the table"
            ))),
        }
    }

    /// Add a sample to column `i` at one end of its y axis. Returns the
    /// sample index inside the column.
    pub fn append_sample_point(&mut self, i: usize, y: Real, value: Real) -> PvtResult<usize> {
        if !y.is_finite() || !value.is_finite() {
            return Err(PvtError::invalid_table("non-finite table sample"));
        }
        let column = self
            .columns
            .get_mut(i)
            .ok_or_else(|| PvtError::invalid_table(format!("column {i} does not exist")))?;
        match (column.first(), column.last()) {
            (_, None) => {
                column.push((y, value));
                Ok(0)
            }
            (_, Some(&(last, _))) if y > last => {
                column.push((y, value));
                Ok(column.len() - 1)
            }
            (Some(&(first, _)), _) if y < first => {
                column.insert(0, (y, value));
                Ok(0)
            }
            _ => Err(PvtError::invalid_table(format!(
                "y sample {y} must be added at one of the ends of column {i}"
            ))),
        }
    }

    /// New table with the same sample positions and `f(a, b)` as values.
    pub fn zip_with(
        &self,
        other: &UniformXTabulated2D,
        f: impl Fn(Real, Real) -> Real,
    ) -> PvtResult<Self> {
        if self.xs != other.xs || self.columns.len() != other.columns.len() {
            return Err(PvtError::invalid_table("tables have different x samples"));
        }
        let mut columns = Vec::with_capacity(self.columns.len());
        for (a, b) in self.columns.iter().zip(&other.columns) {
            if a.len() != b.len() || a.iter().zip(b).any(|(sa, sb)| sa.0 != sb.0) {
                return Err(PvtError::invalid_table("tables have different y samples"));
            }
            columns.push(a.iter().zip(b).map(|(sa, sb)| (sa.0, f(sa.1, sb.1))).collect());
        }
        Ok(Self {
            xs: self.xs.clone(),
            columns,
            policy: self.policy,
        })
    }

    /// `true` if `(x, y)` lies inside the sampled region.
    pub fn applies(&self, x: Real, y: Real) -> bool {
        let (Some(&x_min), Some(&x_max)) = (self.xs.first(), self.xs.last()) else {
            return false;
        };
        if !(x_min <= x && x <= x_max) {
            return false;
        }
        let Some((y_min, y_max)) = self.y_range_at(x) else {
            return false;
        };
        y_min <= y && y <= y_max
    }

    /// Interpolated y range of the table at `x`.
    fn y_range_at(&self, x: Real) -> Option<(Real, Real)> {
        let bounds = |i: usize| -> Option<(Real, Real)> {
            let c = self.columns.get(i)?;
            Some((c.first()?.0, c.last()?.0))
        };
        if self.xs.len() == 1 {
            return bounds(0);
        }
        let i = segment_index(&self.xs, x);
        let alpha = (x - self.xs[i]) / (self.xs[i + 1] - self.xs[i]);
        let (lo0, hi0) = bounds(i)?;
        let (lo1, hi1) = bounds(i + 1)?;
        Some((
            lo0 * (1.0 - alpha) + lo1 * alpha,
            hi0 * (1.0 - alpha) + hi1 * alpha,
        ))
    }

    pub fn eval(&self, x: Real, y: Real, extrapolate: bool) -> PvtResult<Real> {
        let (Some(&x_min), Some(&x_max)) = (self.xs.first(), self.xs.last()) else {
            return Err(PvtError::invalid_table("two-dimensional table is empty"));
        };
        if !extrapolate && !self.applies(x, y) {
            if !(x_min <= x && x <= x_max) {
                return Err(PvtError::OutOfRange {
                    what: "table x argument",
                    value: x,
                    min: x_min,
                    max: x_max,
                });
            }
            let (min, max) = self.y_range_at(x).unwrap_or((Real::NAN, Real::NAN));
            return Err(PvtError::OutOfRange {
                what: "table y argument",
                value: y,
                min,
                max,
            });
        }
        if self.xs.len() == 1 {
            return self.eval_column(0, y);
        }

        let i = segment_index(&self.xs, x);
        let alpha = (x - self.xs[i]) / (self.xs[i + 1] - self.xs[i]);
        let (c0, c1) = (self.column(i)?, self.column(i + 1)?);
        let shift = match self.policy {
            InterpolationPolicy::Vertical => 0.0,
            InterpolationPolicy::LeftExtreme => match (c0.first(), c1.first()) {
                (Some(a), Some(b)) => b.0 - a.0,
                _ => 0.0,
            },
            InterpolationPolicy::RightExtreme => match (c0.last(), c1.last()) {
                (Some(a), Some(b)) => b.0 - a.0,
                _ => 0.0,
            },
        };
        let y0 = y - alpha * shift;
        let y1 = y + (1.0 - alpha) * shift;
        let s0 = self.eval_column(i, y0)?;
        let s1 = self.eval_column(i + 1, y1)?;
        Ok(s0 * (1.0 - alpha) + s1 * alpha)
    }

    /// Linear interpolation (or extension) along column `i`.
    fn eval_column(&self, i: usize, y: Real) -> PvtResult<Real> {
        let column = self.column(i)?;
        match column.len() {
            0 => Err(PvtError::invalid_table(format!("column {i} has no samples"))),
            1 => Ok(column[0].1),
            n => {
                let upper = column.partition_point(|s| s.0 <= y);
                let j = upper.saturating_sub(1).min(n - 2);
                let (ya, va) = column[j];
                let (yb, vb) = column[j + 1];
                let beta = (y - ya) / (yb - ya);
                Ok(va + beta * (vb - va))
            }
        }
    }
}

/// Regular grid over `[x_min, x_max] × [y_min, y_max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformTabulated2D {
    x_min: Real,
    x_max: Real,
    nx: usize,
    y_min: Real,
    y_max: Real,
    ny: usize,
    /// Samples stored x-major: `samples[i * ny + j]`.
    samples: Vec<Real>,
}

impl UniformTabulated2D {
    /// Sample `f` on an `nx × ny` grid.
    pub fn from_fn(
        (x_min, x_max, nx): (Real, Real, usize),
        (y_min, y_max, ny): (Real, Real, usize),
        mut f: impl FnMut(Real, Real) -> PvtResult<Real>,
    ) -> PvtResult<Self> {
        if nx < 2 || ny < 2 || !(x_max > x_min) || !(y_max > y_min) {
            return Err(PvtError::invalid_table(
                "uniform grid needs at least two samples per axis and a non-empty range",
            ));
        }
        let mut samples = Vec::with_capacity(nx * ny);
        for i in 0..nx {
            let x = x_min + (x_max - x_min) * i as Real / (nx - 1) as Real;
            for j in 0..ny {
                let y = y_min + (y_max - y_min) * j as Real / (ny - 1) as Real;
                samples.push(f(x, y)?);
            }
        }
        Ok(Self {
            x_min,
            x_max,
            nx,
            y_min,
            y_max,
            ny,
            samples,
        })
    }

    pub fn x_range(&self) -> (Real, Real) {
        (self.x_min, self.x_max)
    }

    pub fn y_range(&self) -> (Real, Real) {
        (self.y_min, self.y_max)
    }

    pub fn applies(&self, x: Real, y: Real) -> bool {
        self.x_min <= x && x <= self.x_max && self.y_min <= y && y <= self.y_max
    }

    pub fn eval(&self, x: Real, y: Real, extrapolate: bool) -> PvtResult<Real> {
        if !extrapolate {
            if !(self.x_min <= x && x <= self.x_max) {
                return Err(PvtError::OutOfRange {
                    what: "grid x argument",
                    value: x,
                    min: self.x_min,
                    max: self.x_max,
                });
            }
            if !(self.y_min <= y && y <= self.y_max) {
                return Err(PvtError::OutOfRange {
                    what: "grid y argument",
                    value: y,
                    min: self.y_min,
                    max: self.y_max,
                });
            }
        }
        let (i, fx) = Self::locate(x, self.x_min, self.x_max, self.nx);
        let (j, fy) = Self::locate(y, self.y_min, self.y_max, self.ny);
        let s = |i: usize, j: usize| self.samples[i * self.ny + j];
        Ok(s(i, j) * (1.0 - fx) * (1.0 - fy)
            + s(i + 1, j) * fx * (1.0 - fy)
            + s(i, j + 1) * (1.0 - fx) * fy
            + s(i + 1, j + 1) * fx * fy)
    }

    /// Cell index and fractional position (unclamped outside the grid).
    fn locate(v: Real, lo: Real, hi: Real, n: usize) -> (usize, Real) {
        let pos = (v - lo) / (hi - lo) * (n - 1) as Real;
        let cell = if pos.is_nan() {
            0
        } else {
            (pos.floor().max(0.0) as usize).min(n - 2)
        };
        (cell, pos - cell as Real)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bo_core::{Tolerances, nearly_equal};

    fn tol() -> Tolerances {
        Tolerances::default()
    }

    #[test]
    fn one_d_interpolates_and_extrapolates() {
        let f = Tabulated1D::from_samples(&[3.0, 1.0, 2.0], &[30.0, 10.0, 15.0]).unwrap();
        assert_eq!(f.xs(), &[1.0, 2.0, 3.0]);
        assert!(nearly_equal(f.eval(1.5, false).unwrap(), 12.5, tol()));
        assert!(nearly_equal(f.eval(4.0, true).unwrap(), 45.0, tol()));
        assert!(nearly_equal(f.eval(0.0, true).unwrap(), 5.0, tol()));
        assert!(nearly_equal(f.eval_derivative(2.5, false).unwrap(), 15.0, tol()));
    }

    #[test]
    fn one_d_out_of_range_reports_bounds() {
        let f = Tabulated1D::from_samples(&[1.0, 2.0], &[1.0, 2.0]).unwrap();
        match f.eval(5.0, false) {
            Err(PvtError::OutOfRange {
                value, min, max, ..
            }) => {
                assert_eq!(value, 5.0);
                assert_eq!(min, 1.0);
                assert_eq!(max, 2.0);
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn one_d_rejects_duplicates_and_empty() {
        assert!(Tabulated1D::from_samples(&[1.0, 1.0], &[1.0, 2.0]).is_err());
        assert!(Tabulated1D::from_samples(&[], &[]).is_err());
        assert!(Tabulated1D::from_samples(&[1.0], &[1.0, 2.0]).is_err());
        assert!(Tabulated1D::default().eval(1.0, true).is_err());
    }

    #[test]
    fn one_d_single_sample_is_constant() {
        let f = Tabulated1D::from_samples(&[1.0], &[7.0]).unwrap();
        assert_eq!(f.eval(100.0, true).unwrap(), 7.0);
        assert_eq!(f.eval_derivative(100.0, true).unwrap(), 0.0);
    }

    fn two_column_table(policy: InterpolationPolicy) -> UniformXTabulated2D {
        let mut t = UniformXTabulated2D::new(policy);
        let i0 = t.append_x_pos(0.0).unwrap();
        t.append_sample_point(i0, 10.0, 1.0).unwrap();
        t.append_sample_point(i0, 20.0, 2.0).unwrap();
        let i1 = t.append_x_pos(1.0).unwrap();
        t.append_sample_point(i1, 20.0, 3.0).unwrap();
        t.append_sample_point(i1, 30.0, 4.0).unwrap();
        t
    }

    #[test]
    fn two_d_vertical_blend() {
        let t = two_column_table(InterpolationPolicy::Vertical);
        // column 0 at y=20 -> 2.0, column 1 at y=20 -> 3.0
        assert!(nearly_equal(t.eval(0.5, 20.0, true).unwrap(), 2.5, tol()));
    }

    #[test]
    fn two_d_left_extreme_follows_first_samples() {
        let t = two_column_table(InterpolationPolicy::LeftExtreme);
        // shift = 10, at alpha = 0.5 the first samples line sits at y = 15
        assert!(nearly_equal(t.eval(0.5, 15.0, false).unwrap(), 2.0, tol()));
        // nodes are reproduced exactly
        assert!(nearly_equal(t.eval(0.0, 10.0, false).unwrap(), 1.0, tol()));
        assert!(nearly_equal(t.eval(1.0, 30.0, false).unwrap(), 4.0, tol()));
    }

    #[test]
    fn two_d_right_extreme_follows_last_samples() {
        let t = two_column_table(InterpolationPolicy::RightExtreme);
        assert!(nearly_equal(t.eval(0.5, 25.0, false).unwrap(), 3.0, tol()));
    }

    #[test]
    fn two_d_append_rejects_interior_points() {
        let mut t = two_column_table(InterpolationPolicy::Vertical);
        assert!(t.append_x_pos(0.5).is_err());
        assert!(t.append_sample_point(0, 15.0, 1.5).is_err());
        assert!(t.append_sample_point(5, 15.0, 1.5).is_err());
        assert_eq!(t.append_x_pos(-1.0).unwrap(), 0);
        assert_eq!(t.append_sample_point(1, 5.0, 0.5).unwrap(), 0);
    }

    #[test]
    fn two_d_out_of_range() {
        let t = two_column_table(InterpolationPolicy::Vertical);
        assert!(matches!(
            t.eval(2.0, 20.0, false),
            Err(PvtError::OutOfRange { .. })
        ));
        assert!(matches!(
            t.eval(0.5, 100.0, false),
            Err(PvtError::OutOfRange { .. })
        ));
        assert!(t.eval(0.5, 100.0, true).is_ok());
    }

    #[test]
    fn two_d_zip_with() {
        let a = two_column_table(InterpolationPolicy::LeftExtreme);
        let b = a.zip_with(&a, |u, v| u * v).unwrap();
        assert_eq!(b.column(1).unwrap(), &[(20.0, 9.0), (30.0, 16.0)]);
        assert_eq!(b.policy(), InterpolationPolicy::LeftExtreme);
        let other = UniformXTabulated2D::new(InterpolationPolicy::Vertical);
        assert!(a.zip_with(&other, |u, _| u).is_err());
    }

    #[test]
    fn uniform_grid_is_exact_for_bilinear_functions() {
        let f = |x: Real, y: Real| 1.0 + 2.0 * x + 3.0 * y + 0.5 * x * y;
        let g = UniformTabulated2D::from_fn((0.0, 10.0, 11), (-5.0, 5.0, 6), |x, y| Ok(f(x, y)))
            .unwrap();
        for &(x, y) in &[(0.3, 0.7), (9.9, -4.9), (5.0, 0.0)] {
            assert!(nearly_equal(g.eval(x, y, false).unwrap(), f(x, y), tol()));
        }
        assert!(g.eval(11.0, 0.0, false).is_err());
        assert!(nearly_equal(g.eval(11.0, 0.0, true).unwrap(), f(11.0, 0.0), tol()));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn interpolation_stays_within_sample_bounds(
            ys in prop::collection::vec(-1e3_f64..1e3_f64, 2..12),
            t in 0.0_f64..1.0_f64,
        ) {
            let xs: Vec<Real> = (0..ys.len()).map(|i| i as Real).collect();
            let f = Tabulated1D::from_samples(&xs, &ys).unwrap();
            let x = t * f.x_max();
            let v = f.eval(x, false).unwrap();
            let lo = ys.iter().copied().fold(Real::INFINITY, Real::min);
            let hi = ys.iter().copied().fold(Real::NEG_INFINITY, Real::max);
            prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9);
        }

        #[test]
        fn nodes_are_reproduced(ys in prop::collection::vec(-1e3_f64..1e3_f64, 2..12)) {
            let xs: Vec<Real> = (0..ys.len()).map(|i| 0.5 * i as Real).collect();
            let f = Tabulated1D::from_samples(&xs, &ys).unwrap();
            for (x, y) in xs.iter().zip(&ys) {
                prop_assert!((f.eval(*x, false).unwrap() - y).abs() <= 1e-9 * (1.0 + y.abs()));
            }
        }
    }
}
