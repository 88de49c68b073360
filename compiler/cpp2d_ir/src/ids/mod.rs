//! Node identities.
//!
//! Every node category lives in its own arena and is addressed by a `u32`
//! index. Ids are `Copy + Hash + Eq` and are the keys of every identity-keyed
//! table in the translator (overrides, class info, renames).

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Sentinel for "no node".
            pub const INVALID: $name = $name(u32::MAX);

            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            #[inline]
            pub const fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, concat!(stringify!($name), "({})"), self.0)
                } else {
                    write!(f, concat!(stringify!($name), "::INVALID"))
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }
    };
}

define_id!(
    /// Index into the declaration arena.
    DeclId
);

define_id!(
    /// Index into the statement/expression arena.
    StmtId
);

define_id!(
    /// Interned type. Structurally equal types share one id.
    TypeId
);

define_id!(
    /// Index into the template argument arena.
    TemplateArgId
);

/// Convert an arena length into the next id index.
///
/// Arenas never exceed `u32::MAX - 1` entries; the last value is the sentinel.
#[inline]
pub(crate) fn next_index(len: usize) -> u32 {
    match u32::try_from(len) {
        Ok(index) if index != u32::MAX => index,
        _ => panic!("arena exceeded {} nodes", u32::MAX - 1),
    }
}

#[cfg(test)]
mod tests;
