use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use anyhow::Result;
use tracing::{error, warn};

use crate::game::{Quadrant, RenderCommand};
use crate::render::arena::{ArenaScope, ScratchArena};
use crate::render::color::{BACKGROUND, OUTLINE, quadrant_color};
use crate::render::config::PlayFieldConfig;
use crate::traits::{Color, RenderBackend, Vertex};
use crate::util::GameError;

/// Angular span of a quadrant, centred on its direction (y-down screen).
pub fn quadrant_angles(quadrant: Quadrant) -> (f32, f32) {
    let start = quadrant.index() as f32 * FRAC_PI_2 + FRAC_PI_4;
    (start, start + FRAC_PI_2)
}

/// Triangle fan for one sector: centre plus `segments + 1` arc points.
#[allow(clippy::too_many_arguments)]
pub fn push_sector(
    scope: &mut ArenaScope<'_>,
    cx: f32,
    cy: f32,
    radius: f32,
    start_angle: f32,
    end_angle: f32,
    segments: u16,
    color: Color,
) -> Result<(), GameError> {
    let segments = u32::from(segments);
    scope.reserve(segments as usize + 2, 3 * segments as usize)?;

    let base = scope.base_index();
    scope.push_vertex(Vertex::new(cx, cy, color));
    for i in 0..=segments {
        let t = i as f32 / segments as f32;
        let angle = start_angle + t * (end_angle - start_angle);
        scope.push_vertex(Vertex::new(
            cx + radius * angle.cos(),
            cy + radius * angle.sin(),
            color,
        ));
    }
    for i in 0..segments {
        scope.push_triangle(base, base + 1 + i, base + 2 + i);
    }
    Ok(())
}

/// Closed ring `width` pixels thick whose outer edge sits on `radius`.
pub fn push_ring(
    scope: &mut ArenaScope<'_>,
    cx: f32,
    cy: f32,
    radius: f32,
    width: f32,
    segments: u16,
    color: Color,
) -> Result<(), GameError> {
    let segments = u32::from(segments);
    scope.reserve(2 * segments as usize, 6 * segments as usize)?;

    let inner = (radius - width).max(0.0);
    let base = scope.base_index();
    for i in 0..segments {
        let angle = i as f32 / segments as f32 * TAU;
        let (sin, cos) = angle.sin_cos();
        scope.push_vertex(Vertex::new(cx + inner * cos, cy + inner * sin, color));
        scope.push_vertex(Vertex::new(cx + radius * cos, cy + radius * sin, color));
    }
    for i in 0..segments {
        let next = (i + 1) % segments;
        let (i0, o0) = (base + 2 * i, base + 2 * i + 1);
        let (i1, o1) = (base + 2 * next, base + 2 * next + 1);
        scope.push_triangle(i0, o0, o1);
        scope.push_triangle(i0, o1, i1);
    }
    Ok(())
}

/// Per-frame geometry counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub vertices: usize,
    pub indices: usize,
    /// Pieces dropped because the arena was full.
    pub skipped: usize,
}

/// Draws a [`RenderCommand`] onto any [`RenderBackend`].
pub struct PlayFieldRenderer {
    config: PlayFieldConfig,
    arena: ScratchArena,
    last_status: String,
}

impl PlayFieldRenderer {
    pub fn new(config: PlayFieldConfig) -> Result<Self, GameError> {
        let arena = ScratchArena::with_capacity(config.scratch_vertex_capacity)?;
        Ok(Self {
            config,
            arena,
            last_status: String::new(),
        })
    }

    pub fn config(&self) -> &PlayFieldConfig {
        &self.config
    }

    pub fn arena(&self) -> &ScratchArena {
        &self.arena
    }

    /// Render one frame. Geometry that does not fit the arena is logged and
    /// skipped; backend failures are returned.
    pub fn render<R: RenderBackend>(
        &mut self,
        backend: &mut R,
        command: &RenderCommand,
    ) -> Result<FrameStats> {
        backend.begin_frame()?;
        backend.clear(BACKGROUND)?;

        let status = command.status_text();
        if status != self.last_status {
            backend.set_status_text(&status)?;
            self.last_status = status;
        }

        let mut stats = FrameStats::default();
        if command.phase.shows_play_field() {
            let (width, height) = backend.screen_size();
            let cx = width as f32 * 0.5;
            let cy = height as f32 * 0.5;
            let radius = self.config.radius_for(width, height);

            let mut scope = self.arena.scope();
            for quadrant in Quadrant::ALL {
                let (start, end) = quadrant_angles(quadrant);
                let color = quadrant_color(quadrant, command.highlights.is_lit(quadrant));
                if let Err(e) = push_sector(
                    &mut scope,
                    cx,
                    cy,
                    radius,
                    start,
                    end,
                    self.config.segments_per_quadrant,
                    color,
                ) {
                    error!(%quadrant, "sector skipped: {e}");
                    stats.skipped += 1;
                }
            }
            if let Err(e) = push_ring(
                &mut scope,
                cx,
                cy,
                radius,
                self.config.outline_width,
                self.config.outline_segments,
                OUTLINE,
            ) {
                error!("outline skipped: {e}");
                stats.skipped += 1;
            }

            stats.vertices = scope.vertices().len();
            stats.indices = scope.indices().len();
            if !scope.is_empty() {
                if let Err(e) = backend.draw_geometry(scope.vertices(), scope.indices()) {
                    warn!("draw failed: {e:#}");
                }
            }
        }

        backend.end_frame()?;
        Ok(stats)
    }
}
