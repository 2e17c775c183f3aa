//! Canonical type descriptors

/// Handle to an interned type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    // Pre-interned types, in the order `TypeTable::new` inserts them
    pub const ERROR: TypeId = TypeId(0);
    pub const VOID: TypeId = TypeId(1);
    pub const BOOL: TypeId = TypeId(2);
    pub const CHAR: TypeId = TypeId(3);
    pub const STRING: TypeId = TypeId(4);
    pub const U8: TypeId = TypeId(5);
    pub const I8: TypeId = TypeId(6);
    pub const U16: TypeId = TypeId(7);
    pub const I16: TypeId = TypeId(8);
    pub const U32: TypeId = TypeId(9);
    pub const I32: TypeId = TypeId(10);

    /// Handle of a primitive integer type
    pub fn of_int(int: IntType) -> TypeId {
        match (int.bits, int.signed) {
            (8, false) => TypeId::U8,
            (8, true) => TypeId::I8,
            (16, false) => TypeId::U16,
            (16, true) => TypeId::I16,
            (32, false) => TypeId::U32,
            _ => TypeId::I32,
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A fixed-width integer type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntType {
    pub bits: u8, // 8, 16, 32
    pub signed: bool,
}

impl IntType {
    pub const U8: IntType = IntType { bits: 8, signed: false };
    pub const I8: IntType = IntType { bits: 8, signed: true };
    pub const U16: IntType = IntType { bits: 16, signed: false };
    pub const I16: IntType = IntType { bits: 16, signed: true };
    pub const U32: IntType = IntType { bits: 32, signed: false };
    pub const I32: IntType = IntType { bits: 32, signed: true };

    pub const ALL: [IntType; 6] = [
        IntType::U8,
        IntType::I8,
        IntType::U16,
        IntType::I16,
        IntType::U32,
        IntType::I32,
    ];

    pub fn min(self) -> i64 {
        if self.signed {
            -(1i64 << (self.bits - 1))
        } else {
            0
        }
    }

    pub fn max(self) -> i64 {
        if self.signed {
            (1i64 << (self.bits - 1)) - 1
        } else {
            (1i64 << self.bits) - 1
        }
    }

    pub fn contains(self, value: i128) -> bool {
        value >= i128::from(self.min()) && value <= i128::from(self.max())
    }

    pub fn name(self) -> &'static str {
        match (self.bits, self.signed) {
            (8, false) => "u8",
            (8, true) => "i8",
            (16, false) => "u16",
            (16, true) => "i16",
            (32, false) => "u32",
            _ => "i32",
        }
    }
}

/// Mutability of a binding or of a reference target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mutability {
    #[default]
    Immutable,
    Mutable,
}

impl Mutability {
    pub fn from_mut(mutable: bool) -> Self {
        if mutable {
            Mutability::Mutable
        } else {
            Mutability::Immutable
        }
    }

    pub fn is_mutable(self) -> bool {
        self == Mutability::Mutable
    }
}

/// Structural type descriptor; the interning key of the type table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Type of a failed binding or expression
    Error,
    /// Return type of a function without `-> T`
    Void,
    Bool,
    Char,
    /// Fat string reference: length plus pointer to characters
    StringRef,
    Int(IntType),
    Array { element: TypeId, size: u32 },
    Reference { target: TypeId, mutability: Mutability },
    /// Parameter names and anonymity are not part of the type
    Function { params: Vec<TypeId>, ret: TypeId },
}

impl Type {
    pub fn is_int(&self) -> bool {
        matches!(self, Type::Int(_))
    }

    /// Types a constant may have
    pub fn is_scalar(&self) -> bool {
        matches!(self, Type::Int(_) | Type::Bool | Type::Char)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_ranges() {
        assert_eq!((IntType::U8.min(), IntType::U8.max()), (0, 255));
        assert_eq!((IntType::I8.min(), IntType::I8.max()), (-128, 127));
        assert_eq!((IntType::U16.min(), IntType::U16.max()), (0, 65535));
        assert_eq!((IntType::I16.min(), IntType::I16.max()), (-32768, 32767));
        assert_eq!((IntType::U32.min(), IntType::U32.max()), (0, 4_294_967_295));
        assert_eq!((IntType::I32.min(), IntType::I32.max()), (-2_147_483_648, 2_147_483_647));
    }

    #[test]
    fn test_contains() {
        assert!(IntType::U8.contains(255));
        assert!(!IntType::U8.contains(256));
        assert!(!IntType::U8.contains(-1));
        assert!(IntType::I8.contains(-128));
        assert!(!IntType::I8.contains(128));
    }

    #[test]
    fn test_int_ids_match_names() {
        for int in IntType::ALL {
            let id = TypeId::of_int(int);
            assert!(id.index() >= TypeId::U8.index() && id.index() <= TypeId::I32.index());
        }
        assert_eq!(TypeId::of_int(IntType::I16), TypeId::I16);
        assert_eq!(IntType::U32.name(), "u32");
    }
}
