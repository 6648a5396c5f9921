//! Simplex noise in 2D and 3D with closed-form gradients.
//!
//! Each lattice corner contributes `t⁴ (g · d)` with `t = 0.5 - |d|²`, where
//! `d` is the offset from the corner and `g` its hashed gradient direction.
//! Both the kernel and its first derivative reach zero at `|d|² = 0.5`, which
//! is inside the neighbouring simplices, so value and gradient are continuous
//! across cell boundaries.

use glam::{IVec2, IVec3, Vec2, Vec3};

use super::NoiseSample;

/// Squared support radius of a corner kernel
const KERNEL_RADIUS_SQ: f32 = 0.5;

/// Skew factor for 2D: (sqrt(3) - 1) / 2
const F2: f32 = 0.366_025_42;
/// Unskew factor for 2D: (3 - sqrt(3)) / 6
const G2: f32 = 0.211_324_87;
const F3: f32 = 1.0 / 3.0;
const G3: f32 = 1.0 / 6.0;

/// Output normalisation for the 0.5 kernel radius: peaks land just inside
/// [-1, 1] (about 0.998 in 2D and 0.989 in 3D)
const SCALE_2D: f32 = 70.0;
const SCALE_3D: f32 = 76.0;

/// Perlin's reference permutation of 0..=255.
///
/// Lattice coordinates are hashed through this table with wrap-around, so it
/// tiles every 256 cells along each axis.
pub const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

const GRADIENTS_2D: [Vec2; 8] = [
    Vec2::new(1.0, 1.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(-1.0, -1.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(0.0, -1.0),
];

/// Midpoints of the cube edges
const GRADIENTS_3D: [Vec3; 12] = [
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(-1.0, 1.0, 0.0),
    Vec3::new(1.0, -1.0, 0.0),
    Vec3::new(-1.0, -1.0, 0.0),
    Vec3::new(1.0, 0.0, 1.0),
    Vec3::new(-1.0, 0.0, 1.0),
    Vec3::new(1.0, 0.0, -1.0),
    Vec3::new(-1.0, 0.0, -1.0),
    Vec3::new(0.0, 1.0, 1.0),
    Vec3::new(0.0, -1.0, 1.0),
    Vec3::new(0.0, 1.0, -1.0),
    Vec3::new(0.0, -1.0, -1.0),
];

#[inline]
fn perm(i: i32) -> i32 {
    // Masking wraps negative coordinates the same way rem_euclid(256) would
    PERMUTATION[(i & 255) as usize] as i32
}

#[inline]
fn gradient_2d(corner: IVec2) -> Vec2 {
    let hash = perm(corner.x.wrapping_add(perm(corner.y)));
    GRADIENTS_2D[(hash & 7) as usize]
}

#[inline]
fn gradient_3d(corner: IVec3) -> Vec3 {
    let hash = perm(corner.x.wrapping_add(perm(corner.y.wrapping_add(perm(corner.z)))));
    GRADIENTS_3D[(hash % 12) as usize]
}

/// Contribution of one corner: value `t⁴ (g·d)` and its derivative
/// `t⁴ g - 8 t³ (g·d) d`.
#[inline]
fn corner_2d(offset: Vec2, gradient: Vec2) -> (f32, Vec2) {
    let t = KERNEL_RADIUS_SQ - offset.length_squared();
    if t <= 0.0 {
        return (0.0, Vec2::ZERO);
    }
    let t2 = t * t;
    let t4 = t2 * t2;
    let gd = gradient.dot(offset);
    (t4 * gd, t4 * gradient - 8.0 * t2 * t * gd * offset)
}

#[inline]
fn corner_3d(offset: Vec3, gradient: Vec3) -> (f32, Vec3) {
    let t = KERNEL_RADIUS_SQ - offset.length_squared();
    if t <= 0.0 {
        return (0.0, Vec3::ZERO);
    }
    let t2 = t * t;
    let t4 = t2 * t2;
    let gd = gradient.dot(offset);
    (t4 * gd, t4 * gradient - 8.0 * t2 * t * gd * offset)
}

/// 2D simplex noise with analytic gradient.
///
/// Values lie within `[-1, 1]`. Non-finite input yields NaN.
pub fn simplex_2d(p: Vec2) -> NoiseSample<Vec2> {
    // Skew into the simplex lattice and find the containing cell
    let s = (p.x + p.y) * F2;
    let cell = (p + Vec2::splat(s)).floor();
    let t = (cell.x + cell.y) * G2;
    let d0 = p - (cell - Vec2::splat(t));

    // Which of the two triangles of the rhombus we are in
    let step = if d0.x > d0.y { IVec2::X } else { IVec2::Y };

    let d1 = d0 - step.as_vec2() + Vec2::splat(G2);
    let d2 = d0 - Vec2::ONE + Vec2::splat(2.0 * G2);

    // `as` saturates, and NaN maps to 0, so hashing never goes out of bounds
    let base = IVec2::new(cell.x as i32, cell.y as i32);

    let corners = [
        corner_2d(d0, gradient_2d(base)),
        corner_2d(d1, gradient_2d(base.wrapping_add(step))),
        corner_2d(d2, gradient_2d(base.wrapping_add(IVec2::ONE))),
    ];

    let (value, gradient) = corners
        .iter()
        .fold((0.0_f32, Vec2::ZERO), |(v, g), (cv, cg)| (v + cv, g + *cg));

    NoiseSample {
        value: SCALE_2D * value,
        gradient: SCALE_2D * gradient,
    }
}

/// 3D simplex noise with analytic gradient.
///
/// Values lie within `[-1, 1]`. Non-finite input yields NaN.
pub fn simplex_3d(p: Vec3) -> NoiseSample<Vec3> {
    let s = (p.x + p.y + p.z) * F3;
    let cell = (p + Vec3::splat(s)).floor();
    let t = (cell.x + cell.y + cell.z) * G3;
    let d0 = p - (cell - Vec3::splat(t));

    // Rank the offset components to pick the tetrahedron
    let (first, second) = if d0.x >= d0.y {
        if d0.y >= d0.z {
            (IVec3::X, IVec3::new(1, 1, 0))
        } else if d0.x >= d0.z {
            (IVec3::X, IVec3::new(1, 0, 1))
        } else {
            (IVec3::Z, IVec3::new(1, 0, 1))
        }
    } else if d0.y < d0.z {
        (IVec3::Z, IVec3::new(0, 1, 1))
    } else if d0.x < d0.z {
        (IVec3::Y, IVec3::new(0, 1, 1))
    } else {
        (IVec3::Y, IVec3::new(1, 1, 0))
    };

    let d1 = d0 - first.as_vec3() + Vec3::splat(G3);
    let d2 = d0 - second.as_vec3() + Vec3::splat(2.0 * G3);
    let d3 = d0 - Vec3::ONE + Vec3::splat(3.0 * G3);

    let base = IVec3::new(cell.x as i32, cell.y as i32, cell.z as i32);

    let corners = [
        corner_3d(d0, gradient_3d(base)),
        corner_3d(d1, gradient_3d(base.wrapping_add(first))),
        corner_3d(d2, gradient_3d(base.wrapping_add(second))),
        corner_3d(d3, gradient_3d(base.wrapping_add(IVec3::ONE))),
    ];

    let (value, gradient) = corners
        .iter()
        .fold((0.0_f32, Vec3::ZERO), |(v, g), (cv, cg)| (v + cv, g + *cg));

    NoiseSample {
        value: SCALE_3D * value,
        gradient: SCALE_3D * gradient,
    }
}
