// Agent transform storage for the flocking kernel.
// One flat, index-stable slot per agent. No entity graph: an agent *is* its index.

use glam::{Mat4, Quat, Vec3};

/// Position, orientation and scale of one agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentTransform {
    pub position: Vec3,
    /// Always a unit quaternion after a tick.
    pub orientation: Quat,
    /// Carried through the kernel unmodified.
    pub scale: Vec3,
}

impl Default for AgentTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl AgentTransform {
    pub fn new(position: Vec3, orientation: Quat, scale: Vec3) -> Self {
        Self { position, orientation, scale }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Default::default() }
    }

    /// Local +Z expressed in world space.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::Z
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.orientation * Vec3::X
    }

    /// TRS matrix (scale, then rotate, then translate).
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.orientation, self.position)
    }

    /// True when every component is finite and the orientation is unit length.
    pub fn is_valid(&self) -> bool {
        self.position.is_finite()
            && self.scale.is_finite()
            && self.orientation.is_finite()
            && self.orientation.is_normalized()
    }
}

/// Flat array of agent transforms, indexed by agent id.
///
/// Owned by the simulation. Presentation only ever sees it through `&self`
/// between ticks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformBuffer {
    slots: Vec<AgentTransform>,
}

impl TransformBuffer {
    pub fn new(slots: Vec<AgentTransform>) -> Self {
        Self { slots }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { slots: Vec::with_capacity(capacity) }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AgentTransform> {
        self.slots.get(index)
    }

    pub fn as_slice(&self) -> &[AgentTransform] {
        &self.slots
    }

    pub fn as_mut_slice(&mut self) -> &mut [AgentTransform] {
        &mut self.slots
    }

    pub fn push(&mut self, transform: AgentTransform) {
        self.slots.push(transform);
    }

    /// Drop every agent at index `len` and above.
    pub fn truncate(&mut self, len: usize) {
        self.slots.truncate(len);
    }

    /// Overwrite this buffer with `other`, reusing the allocation.
    pub fn copy_from(&mut self, other: &TransformBuffer) {
        self.slots.clear();
        self.slots.extend_from_slice(&other.slots);
    }

    /// Fill `out` with one column-major TRS matrix per agent, ready for an
    /// instance buffer upload. `out` is cleared first.
    pub fn model_matrices(&self, out: &mut Vec<[[f32; 4]; 4]>) {
        out.clear();
        out.extend(self.slots.iter().map(|t| t.model_matrix().to_cols_array_2d()));
    }
}
