//! Joint angle geometry.

/// Interior angle at `vertex` between the rays toward `a` and `c`, in degrees.
///
/// Computed from the dot product of the two limb vectors with the cosine
/// clamped to [-1, 1] before `acos`. If either limb vector has zero length
/// the angle is reported as 0.0 rather than an error; downstream validity
/// checks treat a 0.0 reading as "could not measure".
pub fn angle_at(a: (f32, f32), vertex: (f32, f32), c: (f32, f32)) -> f32 {
    let va_x = a.0 - vertex.0;
    let va_y = a.1 - vertex.1;
    let vc_x = c.0 - vertex.0;
    let vc_y = c.1 - vertex.1;

    let mag_va = (va_x * va_x + va_y * va_y).sqrt();
    let mag_vc = (vc_x * vc_x + vc_y * vc_y).sqrt();

    if mag_va == 0.0 || mag_vc == 0.0 {
        return 0.0;
    }

    let dot = va_x * vc_x + va_y * vc_y;
    let cos_angle = (dot / (mag_va * mag_vc)).clamp(-1.0, 1.0);

    cos_angle.acos().to_degrees()
}
