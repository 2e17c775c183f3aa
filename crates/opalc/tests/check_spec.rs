//! Behavioural tests for the Opal type checker.
//!
//! Programs are parsed from source text and checked with `check_module`.
//! Valid programs must produce no diagnostics; invalid ones are matched on
//! the error kind and, where it matters, the rendered message.

use opal_sema::frontend::Parser;
use opal_sema::frontend::ast::Module;
use opal_sema::sema::ConstValue;
use opal_sema::types::{IntType, Mutability};
use opal_sema::{check_module, Analysis, TypeId, TypeTable};
use pretty_assertions::assert_eq;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse(src: &str) -> Module {
    Parser::new(src).parse_module().expect("parse failed")
}

fn analyze(src: &str) -> (Module, Analysis) {
    let module = parse(src);
    let analysis = check_module(&module);
    (module, analysis)
}

fn codes(src: &str) -> Vec<&'static str> {
    analyze(src).1.error_codes()
}

fn messages(src: &str) -> Vec<String> {
    analyze(src).1.errors.iter().map(|e| e.to_string()).collect()
}

fn assert_no_errors(src: &str) {
    let errs = messages(src);
    assert!(
        errs.is_empty(),
        "expected no type errors, got:\n  {}",
        errs.join("\n  ")
    );
}

fn assert_error_containing(src: &str, snippet: &str) {
    let errs = messages(src);
    assert!(
        errs.iter().any(|e| e.contains(snippet)),
        "expected error containing {:?}, got:\n  {}",
        snippet,
        if errs.is_empty() {
            "<no errors>".to_string()
        } else {
            errs.join("\n  ")
        }
    );
}

// ---------------------------------------------------------------------------
// Type table
// ---------------------------------------------------------------------------

#[test]
fn structural_types_are_interned_once() {
    let mut table = TypeTable::new();
    let a = table.array(TypeId::U8, 3);
    let b = table.array(TypeId::U8, 3);
    let c = table.array(TypeId::U8, 4);
    assert_eq!(a, b);
    assert_ne!(a, c);

    let shared = table.reference(TypeId::U8, Mutability::Immutable);
    let unique = table.reference(TypeId::U8, Mutability::Mutable);
    assert_ne!(shared, unique);

    let f = table.function(vec![TypeId::U8], TypeId::BOOL);
    let g = table.function(vec![TypeId::U8], TypeId::BOOL);
    assert_eq!(f, g);
}

#[test]
fn mutable_reference_coerces_to_shared() {
    assert_no_errors("def main() { let mut x: u8 = 1; let p: ^u8 = &x; let q: ^mut u8 = &x; let r: ^u8 = q; }");
    assert_eq!(
        codes("def main() { let x: u8 = 1; let p: ^u8 = &x; let q: ^mut u8 = p; }"),
        vec!["TypeMismatch"]
    );
}

#[test]
fn coercion_is_top_level_only() {
    assert_eq!(
        codes("def main() { let mut x: u8 = 1; let q: ^mut u8 = &x; let a: [^mut u8, 1] = [q]; let b: [^u8, 1] = a; }"),
        vec!["TypeMismatch"]
    );
}

// ---------------------------------------------------------------------------
// Literals and constants
// ---------------------------------------------------------------------------

#[test]
fn unsigned_literal_ranges() {
    assert_no_errors("let a: u8 = 255; let b: u16 = 65535; let c: u32 = 4294967295;");
    assert_eq!(codes("let a: u8 = 256;"), vec!["LiteralOutOfRange"]);
    assert_eq!(codes("let a: u8 = -1;"), vec!["LiteralOutOfRange"]);
    assert_error_containing("let a: u8 = 256;", "literal 256 is out of range for u8");
}

#[test]
fn signed_literal_ranges() {
    assert_no_errors("let a: i8 = 127; let b: i8 = -128; let c: i32 = -2147483648;");
    assert_eq!(codes("let a: i8 = 128;"), vec!["LiteralOutOfRange"]);
    assert_eq!(codes("let a: i16 = -32769;"), vec!["LiteralOutOfRange"]);
}

#[test]
fn literal_without_context_is_ambiguous() {
    assert_eq!(codes("let a = 5;"), vec!["AmbiguousLiteralType"]);
    assert_no_errors("let a = true; let b = 'c';");
}

#[test]
fn constants_are_evaluated_in_any_order() {
    let (module, analysis) = analyze("const A: u8 = B; const B: u8 = 2;");
    assert!(!analysis.has_errors(), "{:?}", analysis.errors);
    assert_eq!(
        analysis.const_values.get(&module.items[0].id()),
        Some(&ConstValue::Int(2, IntType::U8))
    );
}

#[test]
fn circular_constants() {
    assert_eq!(codes("const A: u8 = A;"), vec!["CircularConstantDefinition"]);
    assert_eq!(
        codes("const A: u8 = B + 1; const B: u8 = A;"),
        vec!["CircularConstantDefinition"]
    );
}

#[test]
fn constant_folding_is_checked() {
    assert_no_errors("const A: u8 = 200 + 55; const B: i8 = -100 - 28; const C: bool = A > 3 && !false;");
    assert_eq!(codes("const A: u8 = 200 + 56;"), vec!["ArithmeticOverflow"]);
    assert_eq!(codes("const A: u8 = 0; const B: u8 = 7 / A;"), vec!["DivisionByZero"]);
}

#[test]
fn constants_cannot_read_variables() {
    assert_eq!(
        codes("let x: u8 = 1; const A: u8 = x;"),
        vec!["NotAConstantExpression"]
    );
}

#[test]
fn failed_constant_is_reported_once() {
    assert_eq!(
        codes("const A: u8 = 300; const B: u8 = A; def main() { let x: u8 = A; }"),
        vec!["LiteralOutOfRange"]
    );
}

// ---------------------------------------------------------------------------
// Identifiers and initialization
// ---------------------------------------------------------------------------

#[test]
fn reserved_names_cannot_be_declared() {
    assert_eq!(codes("let true: bool = false;"), vec!["ReservedIdentifier"]);
    assert_eq!(codes("def f(u8: u8) {}"), vec!["ReservedIdentifier"]);
}

#[test]
fn str_is_not_a_value_type() {
    assert_error_containing("let s: str = \"x\";", "invalid type 'str'");
    assert_no_errors("let s: string = \"x\";");
}

#[test]
fn void_only_in_return_position() {
    assert_no_errors("def f() -> void { } def main() { f(); }");
    assert_eq!(codes("let x: void = 1;"), vec!["InvalidType"]);
    assert_eq!(codes("def f() {} def main() { let x = f(); }"), vec!["InvalidType"]);
}

#[test]
fn globals_must_be_initialized_in_order() {
    assert_eq!(
        codes("let a: u8 = b; let b: u8 = 1;"),
        vec!["UseBeforeInitialization"]
    );
    assert_error_containing("let a: u8 = a;", "'a' is used before it is initialized");
}

#[test]
fn function_bodies_see_every_module_variable() {
    assert_no_errors("def get() -> u8 { return G; } let G: u8 = 1;");
    assert_no_errors("let G: u8 = 1; def get() -> u8 { return G; }");
    assert_no_errors("let A: u8 = get(); def get() -> u8 { return G; } let G: u8 = 1;");
}

#[test]
fn parameters_share_the_body_scope() {
    assert_eq!(
        codes("def f(x: u8) { let x: bool = true; }"),
        vec!["DuplicateDeclaration"]
    );
    assert_no_errors("def f(x: u8) { if true { let x: bool = true; } }");
}

#[test]
fn functions_are_hoisted() {
    assert_no_errors("def main() { let v: u8 = later(x: 1); } def later(x: u8) -> u8 { return x; }");
}

#[test]
fn inner_scopes_shadow_outer_ones() {
    assert_no_errors("let x: u8 = 1; def main() { let x: bool = true; if x { let x: i8 = -1; } }");
    assert_eq!(
        codes("def main() { let x: u8 = 1; { let y: u8 = x; } let z: u8 = y; }"),
        vec!["UndeclaredIdentifier"]
    );
}

// ---------------------------------------------------------------------------
// Mutability
// ---------------------------------------------------------------------------

#[test]
fn immutable_variable_assignment() {
    assert_eq!(
        codes("def main() { let x: u8 = 1; x = 2; }"),
        vec!["ImmutableAssignment"]
    );
    assert_no_errors("def main() { let mut x: u8 = 1; x = 2; }");
}

#[test]
fn assignment_through_references() {
    assert_no_errors("def set(p: ^mut u8) { p^ = 7; }");
    assert_eq!(
        codes("def set(p: ^u8) { p^ = 7; }"),
        vec!["ImmutableTargetAssignment"]
    );
    assert_error_containing("def set(p: ^u8) { p^ = 7; }", "cannot assign through '^u8'");
}

#[test]
fn mutable_reference_variable_does_not_make_target_mutable() {
    assert_eq!(
        codes("def main() { let x: u8 = 1; let mut p: ^u8 = &x; p^ = 2; }"),
        vec!["ImmutableTargetAssignment"]
    );
    assert_no_errors("def main() { let x: u8 = 1; let y: u8 = 2; let mut p: ^u8 = &x; p = &y; }");
}

#[test]
fn mutable_parameters() {
    assert_eq!(
        codes("def f(x: u8) { x = 1; } def g(mut x: u8) { x = 1; }"),
        vec!["ImmutableAssignment"]
    );
}

// ---------------------------------------------------------------------------
// Functions, lambdas and calls
// ---------------------------------------------------------------------------

#[test]
fn function_and_lambda_assignable_to_function_type() {
    assert_no_errors(
        "def f(x: u8) -> u8 { return x; }
         def main() {
             let p: def(u8) -> u8 = f;
             let q: def(u8) -> u8 = (x: u8) -> u8 => x;
             let a: u8 = p(5);
             let b: u8 = q(a);
         }",
    );
}

#[test]
fn named_arguments() {
    assert_no_errors("def f(x: u8) {} def main() { f(x: 5); }");
    assert_eq!(
        codes("def f(x: u8) {} def main() { f(5); }"),
        vec!["MissingArgument"]
    );
    assert_no_errors("def f(anon x: u8) {} def main() { f(5); }");
    assert_error_containing(
        "def f(x: u8) {} def main() { f(5); }",
        "missing argument for parameter 'x' of 'f'",
    );
}

#[test]
fn argument_types_are_checked() {
    assert_eq!(
        codes("def f(x: u8, flag: bool) {} def main() { f(x: 300, flag: true); f(flag: 1, x: 1); }"),
        vec!["LiteralOutOfRange", "TypeMismatch"]
    );
}

#[test]
fn call_result_type() {
    assert_eq!(
        codes("def f() -> i16 { return -1; } def main() { let a: i16 = f(); let b: u8 = f(); }"),
        vec!["TypeMismatch"]
    );
}

// ---------------------------------------------------------------------------
// Arrays
// ---------------------------------------------------------------------------

#[test]
fn array_literal_size() {
    assert_no_errors("let a: [u8, 2] = [5, 6];");
    assert_eq!(codes("let a: [u8, 2] = [5, 6, 7];"), vec!["ArraySizeMismatch"]);
}

#[test]
fn array_size_from_constant() {
    let (module, analysis) = analyze("const N: u8 = 2 + 1; let a: [i8, N] = [1, -2, 3];");
    assert!(!analysis.has_errors(), "{:?}", analysis.errors);

    let ty = analysis.decl_type(module.items[1].id()).unwrap();
    assert_eq!(analysis.types.display(ty), "[i8, 3]");
}

#[test]
fn array_size_must_be_constant() {
    assert_eq!(
        codes("let n: u8 = 2; let a: [u8, n] = [1, 2];"),
        vec!["InvalidGenericArgument"]
    );
    assert_eq!(codes("let a: [u8, true] = [1];"), vec!["InvalidGenericArgument"]);
}

#[test]
fn array_size_must_not_be_negative() {
    assert_eq!(codes("let a: [u8, -1] = [];"), vec!["InvalidGenericArgument"]);
    assert_eq!(
        codes("const N: i8 = -1; let a: [u8, N] = [];"),
        vec!["InvalidGenericArgument"]
    );
    assert_error_containing("const N: i8 = -1; let a: [u8, N] = [];", "array size -1 is negative");
}

// ---------------------------------------------------------------------------
// Error recovery
// ---------------------------------------------------------------------------

#[test]
fn independent_errors_are_all_reported() {
    let src = "
        let a: u8 = 256;
        let b: bool = 1;
        def main() {
            let c: u8 = true;
            let d: u8 = a;
            undefined = 1;
        }
    ";
    assert_eq!(
        codes(src),
        vec!["LiteralOutOfRange", "TypeMismatch", "TypeMismatch", "UndeclaredIdentifier"]
    );
}

#[test]
fn diagnostics_carry_spans() {
    let src = "let a: u8 = 256;";
    let (_, analysis) = analyze(src);
    let span = analysis.errors[0].span;
    assert_eq!(&src[span.start..span.end], "256");
}
