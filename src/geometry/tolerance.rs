// Centralized tolerances for the schematic network pipeline.
// Units are schematic pixels unless stated otherwise.

pub const EPS_DENOM: f32 = 1e-4; // intersection determinant guard
pub const EPS_PARAM: f32 = 1e-3; // parametric slack at segment ends
pub const MIN_PROJ_LEN: f32 = 1.0; // point-on-segment rejects shorter segments

pub const ON_SEGMENT_TOL: f32 = 3.0; // detector acceptance distance
pub const MERGE_TOL: f32 = 5.0; // junction merge radius, split dedup, min length

pub const TR_DEFAULT: f32 = 100.0;
pub const TR_EPS: f32 = 1e-6; // propagation change threshold
pub const MAX_PASSES: u32 = 10; // propagation ceiling; cycles do not converge

// Display sentinels written into Segment::passability per endpoint class.
pub const PASS_START: u8 = 5;
pub const PASS_END: u8 = 10;
pub const PASS_MIDDLE: u8 = 0;

#[inline]
pub fn near_zero(x: f32, eps: f32) -> bool {
    x.abs() <= eps
}

#[inline]
pub fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}
