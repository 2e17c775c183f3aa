//! Type interning and compatibility

use super::ty::{IntType, Mutability, Type, TypeId};
use crate::common::TypeErrorKind;
use std::collections::HashMap;

/// Result of comparing a found type against an expected one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compatibility {
    Equal,
    /// Not equal, but a value of the found type may be used (`^mut T` as `^T`)
    AssignableTo,
    Incompatible,
}

impl Compatibility {
    pub fn is_ok(self) -> bool {
        self != Compatibility::Incompatible
    }
}

/// Deduplicating store of every type in a compilation unit
#[derive(Debug)]
pub struct TypeTable {
    types: Vec<Type>,
    interned: HashMap<Type, TypeId>,
}

impl TypeTable {
    pub fn new() -> Self {
        let mut table = Self {
            types: Vec::new(),
            interned: HashMap::new(),
        };

        // Order must match the TypeId constants
        table.intern(Type::Error);
        table.intern(Type::Void);
        table.intern(Type::Bool);
        table.intern(Type::Char);
        table.intern(Type::StringRef);
        for int in IntType::ALL {
            table.intern(Type::Int(int));
        }

        table
    }

    /// Return the canonical handle for `ty`, inserting it if new
    pub fn intern(&mut self, ty: Type) -> TypeId {
        if let Some(&id) = self.interned.get(&ty) {
            return id;
        }
        let id = TypeId(self.types.len() as u32);
        self.types.push(ty.clone());
        self.interned.insert(ty, id);
        id
    }

    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    // ==================== Constructors ====================

    pub fn array(&mut self, element: TypeId, size: u32) -> TypeId {
        self.intern(Type::Array { element, size })
    }

    pub fn reference(&mut self, target: TypeId, mutability: Mutability) -> TypeId {
        self.intern(Type::Reference { target, mutability })
    }

    pub fn function(&mut self, params: Vec<TypeId>, ret: TypeId) -> TypeId {
        self.intern(Type::Function { params, ret })
    }

    /// Resolve a primitive type name
    ///
    /// `void` resolves to [`TypeId::VOID`]; callers decide whether it is
    /// allowed where it appears.
    pub fn named(&self, name: &str) -> Result<TypeId, TypeErrorKind> {
        let id = match name {
            "bool" => TypeId::BOOL,
            "char" => TypeId::CHAR,
            "string" => TypeId::STRING,
            "void" => TypeId::VOID,
            "u8" => TypeId::U8,
            "i8" => TypeId::I8,
            "u16" => TypeId::U16,
            "i16" => TypeId::I16,
            "u32" => TypeId::U32,
            "i32" => TypeId::I32,
            "str" => {
                return Err(TypeErrorKind::InvalidType {
                    name: name.to_string(),
                    reason: "unsized character sequences cannot be stored; use string".to_string(),
                });
            }
            "true" | "false" => {
                return Err(TypeErrorKind::ReservedIdentifier { name: name.to_string() });
            }
            _ => {
                return Err(TypeErrorKind::UndeclaredIdentifier { name: name.to_string() });
            }
        };
        Ok(id)
    }

    // ==================== Queries ====================

    pub fn as_int(&self, id: TypeId) -> Option<IntType> {
        match self.get(id) {
            Type::Int(int) => Some(*int),
            _ => None,
        }
    }

    pub fn is_int(&self, id: TypeId) -> bool {
        self.get(id).is_int()
    }

    /// Directed compatibility: can a value of type `found` be used where
    /// `expected` is required?
    pub fn compatibility(&self, found: TypeId, expected: TypeId) -> Compatibility {
        if found == expected || found == TypeId::ERROR || expected == TypeId::ERROR {
            return Compatibility::Equal;
        }

        // ^mut T -> ^T, top level only
        if let (
            Type::Reference { target: from, mutability: Mutability::Mutable },
            Type::Reference { target: to, mutability: Mutability::Immutable },
        ) = (self.get(found), self.get(expected))
        {
            if from == to {
                return Compatibility::AssignableTo;
            }
        }

        Compatibility::Incompatible
    }

    /// Render a type in Opal syntax
    pub fn display(&self, id: TypeId) -> String {
        match self.get(id) {
            Type::Error => "{error}".to_string(),
            Type::Void => "void".to_string(),
            Type::Bool => "bool".to_string(),
            Type::Char => "char".to_string(),
            Type::StringRef => "string".to_string(),
            Type::Int(int) => int.name().to_string(),
            Type::Array { element, size } => format!("[{}, {}]", self.display(*element), size),
            Type::Reference { target, mutability } => match mutability {
                Mutability::Mutable => format!("^mut {}", self.display(*target)),
                Mutability::Immutable => format!("^{}", self.display(*target)),
            },
            Type::Function { params, ret } => {
                let params: Vec<String> = params.iter().map(|p| self.display(*p)).collect();
                if *ret == TypeId::VOID {
                    format!("def({})", params.join(", "))
                } else {
                    format!("def({}) -> {}", params.join(", "), self.display(*ret))
                }
            }
        }
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives_are_preinterned() {
        let table = TypeTable::new();
        assert_eq!(table.get(TypeId::BOOL), &Type::Bool);
        assert_eq!(table.get(TypeId::STRING), &Type::StringRef);
        assert_eq!(table.get(TypeId::U16), &Type::Int(IntType::U16));
        assert_eq!(table.get(TypeId::I32), &Type::Int(IntType::I32));
    }

    #[test]
    fn test_structural_interning() {
        let mut table = TypeTable::new();
        let a = table.array(TypeId::U8, 4);
        let b = table.array(TypeId::U8, 4);
        let c = table.array(TypeId::U8, 3);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let f = table.function(vec![TypeId::U8], TypeId::U8);
        let g = table.function(vec![TypeId::U8], TypeId::U8);
        let h = table.function(vec![TypeId::U8], TypeId::VOID);
        assert_eq!(f, g);
        assert_ne!(f, h);
    }

    #[test]
    fn test_reference_compatibility() {
        let mut table = TypeTable::new();
        let shared = table.reference(TypeId::U8, Mutability::Immutable);
        let unique = table.reference(TypeId::U8, Mutability::Mutable);

        assert_ne!(shared, unique);
        assert_eq!(table.compatibility(unique, shared), Compatibility::AssignableTo);
        assert_eq!(table.compatibility(shared, unique), Compatibility::Incompatible);
        assert_eq!(table.compatibility(shared, shared), Compatibility::Equal);
    }

    #[test]
    fn test_reference_rule_is_top_level_only() {
        let mut table = TypeTable::new();
        let shared = table.reference(TypeId::U8, Mutability::Immutable);
        let unique = table.reference(TypeId::U8, Mutability::Mutable);
        let ref_to_unique = table.reference(unique, Mutability::Immutable);
        let ref_to_shared = table.reference(shared, Mutability::Immutable);

        assert_eq!(table.compatibility(ref_to_unique, ref_to_shared), Compatibility::Incompatible);
    }

    #[test]
    fn test_no_integer_widening() {
        let table = TypeTable::new();
        assert_eq!(table.compatibility(TypeId::U8, TypeId::U16), Compatibility::Incompatible);
        assert_eq!(table.compatibility(TypeId::ERROR, TypeId::U16), Compatibility::Equal);
    }

    #[test]
    fn test_named_lookup() {
        let table = TypeTable::new();
        assert_eq!(table.named("u8"), Ok(TypeId::U8));
        assert!(matches!(table.named("str"), Err(TypeErrorKind::InvalidType { .. })));
        assert!(matches!(table.named("true"), Err(TypeErrorKind::ReservedIdentifier { .. })));
        assert!(matches!(table.named("u64"), Err(TypeErrorKind::UndeclaredIdentifier { .. })));
    }

    #[test]
    fn test_display() {
        let mut table = TypeTable::new();
        let arr = table.array(TypeId::U8, 4);
        let r = table.reference(arr, Mutability::Mutable);
        let f = table.function(vec![r, TypeId::BOOL], TypeId::I16);
        let p = table.function(vec![], TypeId::VOID);

        assert_eq!(table.display(arr), "[u8, 4]");
        assert_eq!(table.display(r), "^mut [u8, 4]");
        assert_eq!(table.display(f), "def(^mut [u8, 4], bool) -> i16");
        assert_eq!(table.display(p), "def()");
    }
}
