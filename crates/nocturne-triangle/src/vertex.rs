use bytemuck::{Pod, Zeroable};

/// Interleaved vertex as uploaded: position then color, tightly packed.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PackedVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl PackedVertex {
    pub const STRIDE: i32 = core::mem::size_of::<PackedVertex>() as i32;

    pub const POSITION_OFFSET: i32 = core::mem::offset_of!(PackedVertex, position) as i32;
    pub const POSITION_COMPONENTS: i32 = 3;

    pub const COLOR_OFFSET: i32 = core::mem::offset_of!(PackedVertex, color) as i32;
    pub const COLOR_COMPONENTS: i32 = 4;
}

/// The one triangle: red, green and blue corners, fully opaque.
pub(crate) const TRIANGLE: [PackedVertex; 3] = [
    PackedVertex {
        position: [-0.5, -0.5, 0.0],
        color: [1.0, 0.0, 0.0, 1.0],
    },
    PackedVertex {
        position: [0.5, -0.5, 0.0],
        color: [0.0, 1.0, 0.0, 1.0],
    },
    PackedVertex {
        position: [0.0, 0.5, 0.0],
        color: [0.0, 0.0, 1.0, 1.0],
    },
];
