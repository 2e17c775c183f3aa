//! Opal type representation
//!
//! Types are interned in a [`TypeTable`] and referred to by [`TypeId`]
//! handles, so type equality is handle equality.

mod reserved;
mod table;
mod ty;

pub use reserved::is_reserved;
pub use table::{Compatibility, TypeTable};
pub use ty::{IntType, Mutability, Type, TypeId};
