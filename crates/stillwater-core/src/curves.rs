//! Interpolation curves shared by LOD, quality transitions, and fades

use crate::types::Color;

/// Linear interpolation between two floats
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear interpolation between two RGB colors
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    Color {
        r: lerp_f32(a.r, b.r, t),
        g: lerp_f32(a.g, b.g, t),
        b: lerp_f32(a.b, b.b, t),
    }
}

/// Hermite smoothstep, clamped to [0, 1] outside the edge range
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_f32_endpoints() {
        assert!((lerp_f32(0.0, 10.0, 0.0) - 0.0).abs() < 1e-6);
        assert!((lerp_f32(0.0, 10.0, 1.0) - 10.0).abs() < 1e-6);
        assert!((lerp_f32(0.0, 10.0, 0.5) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn lerp_color_midpoint() {
        let white = Color::WHITE;
        let black = Color::new(0.0, 0.0, 0.0);
        let mid = lerp_color(white, black, 0.5);
        for c in &mid.to_array() {
            assert!((*c - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn smoothstep_clamps_and_eases() {
        assert_eq!(smoothstep(0.4, 0.5, 0.0), 0.0);
        assert_eq!(smoothstep(0.4, 0.5, 1.0), 1.0);
        let mid = smoothstep(0.0, 1.0, 0.5);
        assert!((mid - 0.5).abs() < 1e-6);
        // Monotone within the edge range
        assert!(smoothstep(0.0, 1.0, 0.3) < smoothstep(0.0, 1.0, 0.6));
    }
}
