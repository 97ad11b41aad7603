//! This crate defines the core content of Plat City, such as [`Material`], the [`VoxelChunk`]
//! buffer that lots draw into, and the plat grid coordinates.

mod material;
pub use material::*;

mod chunk;
pub use chunk::*;

mod pos;
pub use pos::*;
