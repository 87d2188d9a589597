use core::num::NonZero;

#[cfg(test)]
type RawSize = u16;
#[cfg(not(test))]
type RawSize = u32;

/// A subtree size, always at least 1.
///
/// Every allocated node roots a subtree containing at least itself, so the
/// count is stored as `NonZero` and shares the arena handle's niche: a node
/// carries its size in the same 4 bytes a link would take. Absent children
/// contribute 0 and are handled at the accessor level, never stored.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Size(NonZero<RawSize>);

impl Size {
    pub(crate) const MAX: usize = RawSize::MAX as usize;
    pub(crate) const ONE: Self = Self::from_usize(1);

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size >= 1, "`Size::from_usize()` - `size` < 1!");
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        Self(NonZero::new(size as RawSize).unwrap())
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0.get() as usize
    }
}
