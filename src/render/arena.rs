use tracing::trace;

use crate::traits::Vertex;
use crate::util::GameError;

/// Preallocated vertex and index storage reused by every frame.
///
/// Geometry is only written through an [`ArenaScope`], which hands the space
/// back when it drops. Requests beyond the fixed capacity fail with
/// [`GameError::Allocation`] instead of growing the buffers.
pub struct ScratchArena {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    vertex_capacity: usize,
    index_capacity: usize,
    high_water: usize,
}

impl ScratchArena {
    /// Reserve room for `vertex_capacity` vertices and three indices each.
    pub fn with_capacity(vertex_capacity: usize) -> Result<Self, GameError> {
        let index_capacity = vertex_capacity.saturating_mul(3);
        let mut vertices = Vec::new();
        vertices
            .try_reserve_exact(vertex_capacity)
            .map_err(|_| GameError::Allocation {
                requested: vertex_capacity,
                capacity: 0,
            })?;
        let mut indices = Vec::new();
        indices
            .try_reserve_exact(index_capacity)
            .map_err(|_| GameError::Allocation {
                requested: index_capacity,
                capacity: 0,
            })?;

        Ok(Self {
            vertices,
            indices,
            vertex_capacity,
            index_capacity,
            high_water: 0,
        })
    }

    /// Open a scope for one render operation.
    pub fn scope(&mut self) -> ArenaScope<'_> {
        ArenaScope { arena: self }
    }

    pub fn vertex_capacity(&self) -> usize {
        self.vertex_capacity
    }

    /// Most vertices any scope has used so far.
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}

/// Geometry written during one render operation. Released on drop.
pub struct ArenaScope<'a> {
    arena: &'a mut ScratchArena,
}

impl ArenaScope<'_> {
    /// Check that `vertices` and `indices` more entries fit.
    pub fn reserve(&self, vertices: usize, indices: usize) -> Result<(), GameError> {
        let arena = &*self.arena;
        let wanted = arena.vertices.len().saturating_add(vertices);
        if wanted > arena.vertex_capacity {
            return Err(GameError::Allocation {
                requested: wanted,
                capacity: arena.vertex_capacity,
            });
        }
        let wanted = arena.indices.len().saturating_add(indices);
        if wanted > arena.index_capacity {
            return Err(GameError::Allocation {
                requested: wanted,
                capacity: arena.index_capacity,
            });
        }
        Ok(())
    }

    /// Index the next pushed vertex will get.
    pub fn base_index(&self) -> u32 {
        u32::try_from(self.arena.vertices.len()).unwrap_or(u32::MAX)
    }

    pub fn push_vertex(&mut self, vertex: Vertex) {
        self.arena.vertices.push(vertex);
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.arena.indices.extend_from_slice(&[a, b, c]);
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.arena.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.arena.indices
    }

    pub fn is_empty(&self) -> bool {
        self.arena.indices.is_empty()
    }
}

impl Drop for ArenaScope<'_> {
    fn drop(&mut self) {
        let used = self.arena.vertices.len();
        self.arena.high_water = self.arena.high_water.max(used);
        trace!(vertices = used, indices = self.arena.indices.len(), "arena scope released");
        self.arena.vertices.clear();
        self.arena.indices.clear();
    }
}
