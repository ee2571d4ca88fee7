//! Immutable 2D affine transforms.
//!
//! A transform `(a, b, c, d, e, f)` maps a point as
//! `x' = a·x + c·y + e`, `y' = b·x + d·y + f`. Every operation returns a new
//! value; nothing mutates in place.

use super::constants::SINGULAR_DETERMINANT_EPS;
use super::error::CoreError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineTransform {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn translate(dx: f64, dy: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, dx, dy)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation by `angle` radians, counter-clockwise as displayed in
    /// y-down image coordinates: `(1, 0)` maps to `(cos, -sin)`.
    ///
    /// This is the linear part of [`AffineTransform::rotation_scale_2d`] at
    /// unit scale, so an eye-line angle measured with `atan2(dy, dx)` levels
    /// the line when passed to either. A y-up convention mapping `(1, 0)` to
    /// `(cos, sin)` is `rotate(-angle)`.
    pub fn rotate(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, -sin, sin, cos, 0.0, 0.0)
    }

    /// `x' = x + sx·y`, `y' = sy·x + y`.
    pub fn shear(sx: f64, sy: f64) -> Self {
        Self::new(1.0, sy, sx, 1.0, 0.0, 0.0)
    }

    /// Rotation by `angle` and uniform scaling by `scale` about `(center_x, center_y)`.
    ///
    /// The center is a fixed point of the result. Same convention as OpenCV's
    /// `getRotationMatrix2D`, with the angle in radians.
    pub fn rotation_scale_2d(center_x: f64, center_y: f64, angle: f64, scale: f64) -> Self {
        let alpha = scale * angle.cos();
        let beta = scale * angle.sin();
        Self::new(
            alpha,
            -beta,
            beta,
            alpha,
            (1.0 - alpha) * center_x - beta * center_y,
            beta * center_x + (1.0 - alpha) * center_y,
        )
    }

    /// Transform equivalent to applying `self`, then `other`.
    pub fn compose(&self, other: &AffineTransform) -> Self {
        Self::new(
            other.a * self.a + other.c * self.b,
            other.b * self.a + other.d * self.b,
            other.a * self.c + other.c * self.d,
            other.b * self.c + other.d * self.d,
            other.a * self.e + other.c * self.f + other.e,
            other.b * self.e + other.d * self.f + other.f,
        )
    }

    pub fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Applies only the linear part; translation is ignored.
    pub fn transform_vector(&self, x: f64, y: f64) -> (f64, f64) {
        (self.a * x + self.c * y, self.b * x + self.d * y)
    }

    pub fn adjust_translation(&self, dx: f64, dy: f64) -> Self {
        Self {
            e: self.e + dx,
            f: self.f + dy,
            ..*self
        }
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Inverse mapping, as needed for inverse-warp sampling.
    pub fn inverse(&self) -> Result<Self, CoreError> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_DETERMINANT_EPS {
            return Err(CoreError::SingularTransform { determinant: det });
        }
        let a = self.d / det;
        let b = -self.b / det;
        let c = -self.c / det;
        let d = self.a / det;
        Ok(Self::new(
            a,
            b,
            c,
            d,
            -(a * self.e + c * self.f),
            -(b * self.e + d * self.f),
        ))
    }

    /// Uniform scale factor, exact for similarity transforms.
    pub fn scale_factor(&self) -> f64 {
        self.determinant().abs().sqrt()
    }

    /// Rotation angle in the same convention as [`AffineTransform::rotate`].
    /// Meaningful for similarity transforms only.
    pub fn rotation(&self) -> f64 {
        self.c.atan2(self.a)
    }

    /// Row-major 2×3 matrix `[[a, c, e], [b, d, f]]`.
    pub fn as_array(&self) -> [[f64; 3]; 2] {
        [[self.a, self.c, self.e], [self.b, self.d, self.f]]
    }

    /// The six coefficients in `(a, b, c, d, e, f)` order.
    pub fn coefficients(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    pub fn translation(&self) -> (f64, f64) {
        (self.e, self.f)
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
