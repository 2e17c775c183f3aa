//! Names that can never be bound by a declaration

use std::collections::HashSet;
use std::sync::LazyLock;

static RESERVED: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "true", "false", "bool", "char", "u8", "i8", "u16", "i16", "u32", "i32", "str", "string",
        "void",
    ]
    .into_iter()
    .collect()
});

/// Whether `name` is a literal or primitive type name
pub fn is_reserved(name: &str) -> bool {
    RESERVED.contains(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_names() {
        for name in ["true", "false", "u8", "i32", "str", "string", "void", "char", "bool"] {
            assert!(is_reserved(name), "{} should be reserved", name);
        }
        assert!(!is_reserved("x"));
        assert!(!is_reserved("u64"));
        assert!(!is_reserved("True"));
    }
}
