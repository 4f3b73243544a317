//! Uniform values and the declared-type dispatch that uploads them.
//!
//! [`UniformValue`] is a closed enum with one variant per value-carrying
//! uniform type; vector and matrix payloads are `glam` types. [`apply`]
//! matches the declared [`UniformType`] against the supplied value and picks
//! the context setter:
//!
//! | declared          | setter                                   |
//! |-------------------|------------------------------------------|
//! | `bool`, `float`   | `uniform_1_f32` (bool as 1.0 / 0.0)      |
//! | `vecN`            | `uniform_N_f32_slice`                    |
//! | `bvecN`           | `uniform_N_f32_slice` (1.0 / 0.0)        |
//! | `int`, `sampler2D`| `uniform_1_i32`                          |
//! | `ivecN`           | `uniform_N_i32_slice`                    |
//! | `matN`            | `uniform_matrix_N_f32_slice`, column-major |
//!
//! A `vec4` value is also accepted for a `mat2` uniform and read as the
//! column-major matrix, since both are four floats. Any other mismatch is
//! logged and nothing is set.

use crate::context::GraphicsContext;
use crate::types::UniformType;
use glam::{BVec2, BVec3, BVec4, IVec2, IVec3, IVec4, Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    BVec2(BVec2),
    BVec3(BVec3),
    BVec4(BVec4),
    IVec2(IVec2),
    IVec3(IVec3),
    IVec4(IVec4),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat2(Mat2),
    Mat3(Mat3),
    Mat4(Mat4),
}

impl UniformValue {
    /// The uniform type this value naturally fills.
    pub fn natural_type(&self) -> UniformType {
        match self {
            UniformValue::Bool(_) => UniformType::Bool,
            UniformValue::Int(_) => UniformType::Int,
            UniformValue::Float(_) => UniformType::Float,
            UniformValue::BVec2(_) => UniformType::BVec2,
            UniformValue::BVec3(_) => UniformType::BVec3,
            UniformValue::BVec4(_) => UniformType::BVec4,
            UniformValue::IVec2(_) => UniformType::IVec2,
            UniformValue::IVec3(_) => UniformType::IVec3,
            UniformValue::IVec4(_) => UniformType::IVec4,
            UniformValue::Vec2(_) => UniformType::Vec2,
            UniformValue::Vec3(_) => UniformType::Vec3,
            UniformValue::Vec4(_) => UniformType::Vec4,
            UniformValue::Mat2(_) => UniformType::Mat2,
            UniformValue::Mat3(_) => UniformType::Mat3,
            UniformValue::Mat4(_) => UniformType::Mat4,
        }
    }
}

fn unit(b: bool) -> f32 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Uploads `value` to `location` using the setter for `declared`.
///
/// Returns `false` (after logging a warning naming `name`) when the value
/// does not fit the declared type; the draw carries on without it.
pub fn apply<C: GraphicsContext>(
    ctx: &C,
    location: &C::UniformLocation,
    name: &str,
    declared: UniformType,
    value: &UniformValue,
) -> bool {
    match (declared, value) {
        (UniformType::Bool, UniformValue::Bool(b)) => ctx.uniform_1_f32(location, unit(*b)),
        (UniformType::Float, UniformValue::Float(x)) => ctx.uniform_1_f32(location, *x),
        (UniformType::Int | UniformType::Sampler2D, UniformValue::Int(x)) => {
            ctx.uniform_1_i32(location, *x)
        }
        (UniformType::Vec2, UniformValue::Vec2(v)) => {
            ctx.uniform_2_f32_slice(location, &v.to_array())
        }
        (UniformType::Vec3, UniformValue::Vec3(v)) => {
            ctx.uniform_3_f32_slice(location, &v.to_array())
        }
        (UniformType::Vec4, UniformValue::Vec4(v)) => {
            ctx.uniform_4_f32_slice(location, &v.to_array())
        }
        (UniformType::BVec2, UniformValue::BVec2(v)) => {
            ctx.uniform_2_f32_slice(location, &[unit(v.x), unit(v.y)])
        }
        (UniformType::BVec3, UniformValue::BVec3(v)) => {
            ctx.uniform_3_f32_slice(location, &[unit(v.x), unit(v.y), unit(v.z)])
        }
        (UniformType::BVec4, UniformValue::BVec4(v)) => {
            ctx.uniform_4_f32_slice(location, &[unit(v.x), unit(v.y), unit(v.z), unit(v.w)])
        }
        (UniformType::IVec2, UniformValue::IVec2(v)) => {
            ctx.uniform_2_i32_slice(location, &v.to_array())
        }
        (UniformType::IVec3, UniformValue::IVec3(v)) => {
            ctx.uniform_3_i32_slice(location, &v.to_array())
        }
        (UniformType::IVec4, UniformValue::IVec4(v)) => {
            ctx.uniform_4_i32_slice(location, &v.to_array())
        }
        (UniformType::Mat2, UniformValue::Mat2(m)) => {
            ctx.uniform_matrix_2_f32_slice(location, &m.to_cols_array())
        }
        (UniformType::Mat2, UniformValue::Vec4(v)) => {
            ctx.uniform_matrix_2_f32_slice(location, &v.to_array())
        }
        (UniformType::Mat3, UniformValue::Mat3(m)) => {
            ctx.uniform_matrix_3_f32_slice(location, &m.to_cols_array())
        }
        (UniformType::Mat4, UniformValue::Mat4(m)) => {
            ctx.uniform_matrix_4_f32_slice(location, &m.to_cols_array())
        }
        (declared, value) => {
            log::warn!(
                "failed to set uniform '{name}': declared {declared}, got a {} value",
                value.natural_type()
            );
            return false;
        }
    }
    true
}

macro_rules! from_value {
    ($($src:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$src> for UniformValue {
                fn from(v: $src) -> Self {
                    UniformValue::$variant(v.into())
                }
            }
        )*
    };
}

from_value! {
    bool => Bool,
    i32 => Int,
    f32 => Float,
    BVec2 => BVec2,
    BVec3 => BVec3,
    BVec4 => BVec4,
    IVec2 => IVec2,
    IVec3 => IVec3,
    IVec4 => IVec4,
    Vec2 => Vec2,
    Vec3 => Vec3,
    Vec4 => Vec4,
    Mat2 => Mat2,
    Mat3 => Mat3,
    Mat4 => Mat4,
    [f32; 2] => Vec2,
    [f32; 3] => Vec3,
    [f32; 4] => Vec4,
    [i32; 2] => IVec2,
    [i32; 3] => IVec3,
    [i32; 4] => IVec4,
    [bool; 2] => BVec2,
    [bool; 3] => BVec3,
    [bool; 4] => BVec4,
}

impl From<[f32; 9]> for UniformValue {
    fn from(cols: [f32; 9]) -> Self {
        UniformValue::Mat3(Mat3::from_cols_array(&cols))
    }
}

impl From<[f32; 16]> for UniformValue {
    fn from(cols: [f32; 16]) -> Self {
        UniformValue::Mat4(Mat4::from_cols_array(&cols))
    }
}
