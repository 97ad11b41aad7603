use bytemuck::{Contiguous, NoUninit, Zeroable};

/// A material identifier.
///
/// This enumeration defines the materials that can be written into a
/// [`VoxelChunk`](crate::VoxelChunk). Each variant is a single byte, which is exactly what ends
/// up in the buffer handed back to the host.
///
/// # Remarks
///
/// Mapping those identifiers to the block catalog of a specific game engine is the job of the
/// host. The only guarantee made here is that [`Material::Air`] is zero.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Contiguous, NoUninit)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Material {
    #[default]
    Air,
    Bedrock,
    Stone,
    Dirt,
    Grass,
    Water,
    Cistern,
    Fence,
    Column,
    Pavement,
    Asphalt,
    Curb,
    Wall,
    Glass,
    Floor,
    Roof,
    Ladder,
    TrapDoor,
    Lamp,
}

// SAFETY:
//  The material with ID 0 is `Material::Air`, which is valid.
unsafe impl Zeroable for Material {}

impl Material {
    /// The total number of [`Material`] instances.
    pub const COUNT: usize = <Self as Contiguous>::MAX_VALUE as usize + 1;

    /// Converts a raw material byte back into a [`Material`].
    ///
    /// Returns `None` if the byte does not name a known material.
    #[inline]
    pub fn from_u8(id: u8) -> Option<Self> {
        <Self as Contiguous>::from_integer(id)
    }

    /// Returns the raw byte of this material.
    #[inline]
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Returns an iterator over every known material, in ID order.
    pub fn iter_all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT as u8).filter_map(Self::from_u8)
    }

    /// Returns the [`MaterialInfo`] instance associated with this [`Material`].
    #[inline]
    pub fn info(self) -> &'static MaterialInfo {
        const fn solid(name: &'static str) -> MaterialInfo {
            MaterialInfo { name, solid: true }
        }

        const fn soft(name: &'static str) -> MaterialInfo {
            MaterialInfo { name, solid: false }
        }

        const INFOS: [MaterialInfo; Material::COUNT] = [
            soft("air"),
            solid("bedrock"),
            solid("stone"),
            solid("dirt"),
            solid("grass"),
            soft("water"),
            solid("cistern"),
            solid("fence"),
            solid("column"),
            solid("pavement"),
            solid("asphalt"),
            solid("curb"),
            solid("wall"),
            solid("glass"),
            solid("floor"),
            solid("roof"),
            soft("ladder"),
            soft("trap_door"),
            solid("lamp"),
        ];

        &INFOS[self as usize]
    }

    /// Returns whether the material blocks movement and vegetation.
    #[inline]
    pub fn is_solid(self) -> bool {
        self.info().solid
    }
}

/// Stores static information about a material.
///
/// An instance of this type can be obtained by calling the [`info`] method of a
/// [`Material`].
///
/// [`info`]: Material::info
#[derive(Debug)]
pub struct MaterialInfo {
    /// A short, lowercase name for the material.
    pub name: &'static str,
    /// Whether the material is solid.
    pub solid: bool,
}
