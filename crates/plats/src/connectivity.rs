use std::sync::OnceLock;

use crate::LotKind;

/// Marks which lots belong to the same connected region.
///
/// Two lots are connected when they share the same *non-zero* key. Connected lots suppress
/// the walls they would otherwise draw between each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ConnectivityKey(u64);

impl ConnectivityKey {
    /// The key of lots that never connect to anything.
    pub const NONE: Self = Self(0);

    /// Creates a new [`ConnectivityKey`] from its raw value.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value of the key.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns whether this key connects to anything at all.
    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }

    /// Returns whether a lot with this key connects to a lot with the `other` key.
    #[inline]
    pub const fn connects_to(self, other: Self) -> bool {
        self.0 != 0 && self.0 == other.0
    }
}

/// The connectivity keys shared by every lot of a merging kind.
///
/// Lots of a merging kind ([`Park`] and [`Street`]) all carry the same key, so that adjacent
/// parks read as a single green space and streets as a single network. The first lot of a kind
/// to be constructed decides the key.
///
/// [`Park`]: LotKind::Park
/// [`Street`]: LotKind::Street
#[derive(Debug, Default)]
pub struct Connectivity {
    parks: OnceLock<ConnectivityKey>,
    streets: OnceLock<ConnectivityKey>,
}

impl Connectivity {
    /// Returns the key shared by every lot of the provided kind.
    ///
    /// `candidate` is used if no lot of that kind has decided the key yet. Callers are expected
    /// to always draw a candidate, even when it ends up unused, so that their random stream does
    /// not depend on construction order.
    ///
    /// Returns `None` for kinds that do not merge with their neighbors.
    pub fn shared_key(&self, kind: LotKind, candidate: u64) -> Option<ConnectivityKey> {
        debug_assert!(candidate != 0, "a shared key must be non-zero");

        let cell = match kind {
            LotKind::Park => &self.parks,
            LotKind::Street => &self.streets,
            LotKind::Building | LotKind::Empty => return None,
        };

        Some(*cell.get_or_init(|| ConnectivityKey::new(candidate)))
    }

    /// Returns the key decided for the provided kind so far, if any.
    pub fn get(&self, kind: LotKind) -> Option<ConnectivityKey> {
        match kind {
            LotKind::Park => self.parks.get().copied(),
            LotKind::Street => self.streets.get().copied(),
            LotKind::Building | LotKind::Empty => None,
        }
    }
}
