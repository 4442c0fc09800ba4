use crate::game::Quadrant;
use crate::traits::render::Color;

/// Window background.
pub const BACKGROUND: Color = Color::new(0xaa as f32 / 255.0, 0xb0 as f32 / 255.0, 0x78 as f32 / 255.0, 1.0);

/// Outline ring drawn around the field.
pub const OUTLINE: Color = Color::new(0x66 as f32 / 255.0, 0x66 as f32 / 255.0, 0x66 as f32 / 255.0, 200.0 / 255.0);

/// Resting colours, indexed by `Quadrant::index()`.
pub const QUADRANT_COLORS: [Color; Quadrant::COUNT] = [
    Color::new(1.0, 0.3, 0.3, 1.0), // Down - red
    Color::new(0.3, 1.0, 0.3, 1.0), // Left - green
    Color::new(0.3, 0.3, 1.0, 1.0), // Up - blue
    Color::new(1.0, 1.0, 0.3, 1.0), // Right - yellow
];

/// Lit colours, indexed by `Quadrant::index()`.
pub const HIGHLIGHT_COLORS: [Color; Quadrant::COUNT] = [
    Color::new(1.0, 0.6, 0.6, 1.0),
    Color::new(0.6, 1.0, 0.6, 1.0),
    Color::new(0.6, 0.6, 1.0, 1.0),
    Color::new(1.0, 1.0, 0.6, 1.0),
];

pub fn quadrant_color(quadrant: Quadrant, lit: bool) -> Color {
    if lit {
        HIGHLIGHT_COLORS[quadrant.index()]
    } else {
        QUADRANT_COLORS[quadrant.index()]
    }
}

/// Convert Color to wgpu::Color.
pub fn color_to_wgpu(c: Color) -> wgpu::Color {
    wgpu::Color {
        r: c.r as f64,
        g: c.g as f64,
        b: c.b as f64,
        a: c.a as f64,
    }
}

/// Create orthographic projection matrix for 2D rendering.
/// Top-left origin, Y-down coordinate system.
pub fn ortho_projection(width: f32, height: f32) -> [[f32; 4]; 4] {
    [
        [2.0 / width, 0.0, 0.0, 0.0],
        [0.0, -2.0 / height, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [-1.0, 1.0, 0.0, 1.0],
    ]
}
