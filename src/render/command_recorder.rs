use anyhow::{Result, anyhow};

use crate::traits::render::{Color, RenderBackend, Vertex};

/// Recorded draw command for testing.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginFrame,
    EndFrame,
    Clear(Color),
    DrawGeometry {
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
    },
    SetStatusText(String),
}

/// A mock RenderBackend that records draw commands for snapshot testing.
/// Does not require a GPU.
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
    screen_width: u32,
    screen_height: u32,
    fail_draws: bool,
}

impl CommandRecorder {
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            commands: Vec::new(),
            screen_width,
            screen_height,
            fail_draws: false,
        }
    }

    /// Make every following `draw_geometry` call fail.
    pub fn set_fail_draws(&mut self, fail: bool) {
        self.fail_draws = fail;
    }

    /// Get all recorded commands.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Clear recorded commands.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn frame_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::EndFrame))
            .count()
    }

    pub fn geometry_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::DrawGeometry { .. }))
            .count()
    }

    /// Every status line set so far, oldest first.
    pub fn status_history(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::SetStatusText(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_status(&self) -> Option<&str> {
        self.status_history().last().copied()
    }
}

impl RenderBackend for CommandRecorder {
    fn begin_frame(&mut self) -> Result<()> {
        self.commands.push(DrawCommand::BeginFrame);
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        self.commands.push(DrawCommand::EndFrame);
        Ok(())
    }

    fn clear(&mut self, color: Color) -> Result<()> {
        self.commands.push(DrawCommand::Clear(color));
        Ok(())
    }

    fn draw_geometry(&mut self, vertices: &[Vertex], indices: &[u32]) -> Result<()> {
        if self.fail_draws {
            return Err(anyhow!("draw rejected by recorder"));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(anyhow!(
                "index {bad} out of range for {} vertices",
                vertices.len()
            ));
        }
        self.commands.push(DrawCommand::DrawGeometry {
            vertices: vertices.to_vec(),
            indices: indices.to_vec(),
        });
        Ok(())
    }

    fn set_status_text(&mut self, text: &str) -> Result<()> {
        self.commands.push(DrawCommand::SetStatusText(text.to_string()));
        Ok(())
    }

    fn screen_size(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }
}
