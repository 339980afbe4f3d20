// Bounds applied to coordinates and dimensions arriving from the UI layer,
// before anything enters the pipeline.

pub const COORD_MIN: f32 = -1_000_000.0;
pub const COORD_MAX: f32 = 1_000_000.0;
pub const DIM_MAX: f32 = 100_000.0;
pub const WIDTH_MAX: f32 = 1_000.0;

#[inline]
pub fn in_coord_bounds(x: f32) -> bool {
    x.is_finite() && x >= COORD_MIN && x <= COORD_MAX
}

#[inline]
pub fn in_dim_bounds(d: f32) -> bool {
    d.is_finite() && d > 0.0 && d <= DIM_MAX
}

#[inline]
pub fn in_width_bounds(w: f32) -> bool {
    w.is_finite() && w > 0.0 && w <= WIDTH_MAX
}
