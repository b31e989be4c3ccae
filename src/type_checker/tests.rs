//! Unit tests for the type checker.
//!
//! This module contains tests for:
//! - The symbol table's scope chain
//! - The operator and assignment coercion tables
//! - Type annotation and cast insertion
//! - Every semantic error

use crate::{
    ast::{
        ast::Program,
        expressions::{Expr, ExprKind},
        statements::Stmt,
        types::Type,
    },
    errors::errors::{Error, ErrorImpl, ErrorKind},
    lexer::tokens::{Token, TokenKind},
    parser::parser::parse_source,
};

use super::{
    coercion::{assignment_coercion, binary_operand_casts, binary_result_type, Coercion},
    symbols::{FunctionSymbol, Symbol, SymbolTable, VariableSymbol},
    type_checker::{type_check, TypeChecker},
};

fn name(value: &str) -> Token {
    Token {
        kind: TokenKind::Identifier,
        value: value.to_string(),
        ..Token::default()
    }
}

fn variable(value: &str, ty: Type) -> VariableSymbol {
    VariableSymbol {
        name: name(value),
        ty,
    }
}

fn checked(source: &str) -> Program {
    let mut program = parse_source(source, "test.pas").expect("source should parse");
    if let Err(error) = type_check(&mut program) {
        panic!("type check failed: {}", error);
    }
    program
}

fn check_err(source: &str) -> Error {
    let mut program = parse_source(source, "test.pas").expect("source should parse");
    type_check(&mut program).expect_err("type check should fail")
}

fn first_assigned_value(program: &Program) -> &Expr {
    match &program.block.body.body[0] {
        Stmt::Assign(assign) => &assign.value,
        other => panic!("expected an assignment, found {:?}", other),
    }
}

fn cast_target(expr: &Expr) -> Option<Type> {
    match &expr.kind {
        ExprKind::TypeCast(_) => expr.ty,
        _ => None,
    }
}

// Symbol table

#[test]
fn test_find_walks_outward() {
    let mut table = SymbolTable::new();
    table.insert_variable(variable("x", Type::Integer));

    table.enter_scope();
    table.insert_variable(variable("y", Type::Real));

    assert!(matches!(table.find("x", false), Some(Symbol::Variable(v)) if v.ty == Type::Integer));
    assert!(table.find("x", true).is_none());
    assert!(table.find("y", true).is_some());
    assert!(table.find("z", false).is_none());
}

#[test]
fn test_restore_discards_inner_scope() {
    let mut table = SymbolTable::new();
    table.insert_variable(variable("x", Type::Integer));
    assert_eq!(table.depth(), 1);

    let saved = table.enter_scope();
    table.insert_variable(variable("x", Type::String));
    let inner = table.enter_scope();
    assert_eq!(table.depth(), 3);
    assert!(matches!(table.find("x", false), Some(Symbol::Variable(v)) if v.ty == Type::String));

    table.restore(inner);
    table.restore(saved);
    assert_eq!(table.depth(), 1);
    assert!(matches!(table.find("x", false), Some(Symbol::Variable(v)) if v.ty == Type::Integer));

    // A new sibling scope starts empty
    table.enter_scope();
    assert!(table.find("x", true).is_none());
}

#[test]
fn test_functions_share_the_namespace() {
    let mut table = SymbolTable::new();
    table.insert_function(FunctionSymbol {
        name: name("f"),
        params: vec![Type::Integer],
        return_type: Type::Void,
    });

    let symbol = table.find("f", true).expect("f should resolve");
    assert!(matches!(symbol, Symbol::Function(f) if f.params == vec![Type::Integer]));
    assert!(matches!(symbol, Symbol::Function(f) if f.name.value == "f"));
}

// Coercion tables

#[test]
fn test_arithmetic_result_types() {
    use TokenKind::{Minus, Plus, Slash, Star};

    for operator in [Plus, Minus, Star, Slash] {
        assert_eq!(binary_result_type(operator, Type::Integer, Type::Integer), Type::Integer);
        assert_eq!(binary_result_type(operator, Type::Real, Type::Real), Type::Real);
        assert_eq!(binary_result_type(operator, Type::Integer, Type::Real), Type::Real);
        assert_eq!(binary_result_type(operator, Type::Real, Type::Integer), Type::Real);
        assert_eq!(binary_result_type(operator, Type::Boolean, Type::Integer), Type::Error);
    }
}

#[test]
fn test_mod_requires_integers() {
    assert_eq!(binary_result_type(TokenKind::Mod, Type::Integer, Type::Integer), Type::Integer);
    assert_eq!(binary_result_type(TokenKind::Mod, Type::Real, Type::Integer), Type::Error);
}

#[test]
fn test_string_concatenation() {
    assert_eq!(binary_result_type(TokenKind::Plus, Type::String, Type::Integer), Type::String);
    assert_eq!(binary_result_type(TokenKind::Plus, Type::Char, Type::String), Type::String);
    assert_eq!(binary_result_type(TokenKind::Minus, Type::String, Type::String), Type::Error);
    assert_eq!(
        binary_operand_casts(Type::String, Type::Integer),
        (None, Some(Type::String))
    );
    assert_eq!(
        binary_operand_casts(Type::Char, Type::String),
        (Some(Type::String), None)
    );
}

#[test]
fn test_relational_result_types() {
    let less = TokenKind::Less;

    assert_eq!(binary_result_type(less, Type::Integer, Type::Real), Type::Boolean);
    assert_eq!(binary_result_type(less, Type::String, Type::String), Type::Boolean);
    assert_eq!(binary_result_type(less, Type::Char, Type::Char), Type::Boolean);
    assert_eq!(binary_result_type(less, Type::Boolean, Type::Boolean), Type::Error);
    // Mixed char and string is not promoted for comparisons
    assert_eq!(binary_result_type(less, Type::Char, Type::String), Type::Error);
}

#[test]
fn test_equality_result_types() {
    let equals = TokenKind::Equals;

    assert_eq!(binary_result_type(equals, Type::Boolean, Type::Boolean), Type::Boolean);
    assert_eq!(binary_result_type(equals, Type::Real, Type::Integer), Type::Boolean);
    assert_eq!(binary_result_type(TokenKind::NotEquals, Type::Char, Type::Char), Type::Boolean);
    assert_eq!(binary_result_type(equals, Type::Boolean, Type::Integer), Type::Error);
}

#[test]
fn test_logical_result_types() {
    assert_eq!(binary_result_type(TokenKind::And, Type::Boolean, Type::Boolean), Type::Boolean);
    assert_eq!(binary_result_type(TokenKind::Or, Type::Integer, Type::Integer), Type::Integer);
    assert_eq!(binary_result_type(TokenKind::And, Type::Integer, Type::Boolean), Type::Error);
    assert_eq!(binary_result_type(TokenKind::Or, Type::Real, Type::Real), Type::Error);
}

#[test]
fn test_assignment_coercions() {
    assert_eq!(assignment_coercion(Type::Integer, Type::Integer), Coercion::Exact);
    assert_eq!(assignment_coercion(Type::Integer, Type::Real), Coercion::Cast(Type::Real));
    assert_eq!(assignment_coercion(Type::Char, Type::Integer), Coercion::Cast(Type::Integer));
    assert_eq!(assignment_coercion(Type::Char, Type::String), Coercion::Cast(Type::String));
    assert_eq!(assignment_coercion(Type::Real, Type::Integer), Coercion::Invalid);
    assert_eq!(assignment_coercion(Type::String, Type::Char), Coercion::Invalid);
    assert_eq!(assignment_coercion(Type::Boolean, Type::Integer), Coercion::Invalid);
}

// Analysis

#[test]
fn test_literals_are_typed() {
    let program = checked(
        "program T; var i: integer; r: real; b: boolean; s: string; c: char;
         begin i := 1; r := 1.5; b := true; s := 'text'; c := 'x' end.",
    );

    let expected = [Type::Integer, Type::Real, Type::Boolean, Type::String, Type::Char];
    for (stmt, ty) in program.block.body.iter().zip(expected) {
        match stmt {
            Stmt::Assign(assign) => assert_eq!(assign.value.ty, Some(ty)),
            other => panic!("expected an assignment, found {:?}", other),
        }
    }
}

#[test]
fn test_mixed_arithmetic_casts_integer_side() {
    let program = checked("program T; var r: real; i: integer; begin r := i * 2.5 end.");
    let value = first_assigned_value(&program);

    assert_eq!(value.ty, Some(Type::Real));
    match &value.kind {
        ExprKind::Binary { left, right, .. } => {
            assert_eq!(cast_target(left), Some(Type::Real));
            assert!(matches!(&left.kind, ExprKind::TypeCast(inner) if inner.ty == Some(Type::Integer)));
            assert!(!right.is_cast());
        }
        other => panic!("expected a binary expression, found {:?}", other),
    }
}

#[test]
fn test_assignment_inserts_cast() {
    let program = checked("program T; var r: real; begin r := 3 end.");
    let value = first_assigned_value(&program);

    assert_eq!(cast_target(value), Some(Type::Real));
}

#[test]
fn test_char_widening() {
    let program = checked("program T; var i: integer; s: string; begin i := 'a'; s := 'b' end.");

    for stmt in program.block.body.iter() {
        match stmt {
            Stmt::Assign(assign) => assert!(assign.value.is_cast()),
            other => panic!("expected an assignment, found {:?}", other),
        }
    }
}

#[test]
fn test_string_concatenation_casts() {
    let program = checked("program T; var s: string; begin s := 'n = ' + 42 end.");
    let value = first_assigned_value(&program);

    assert_eq!(value.ty, Some(Type::String));
    match &value.kind {
        ExprKind::Binary { left, right, .. } => {
            assert!(!left.is_cast());
            assert_eq!(cast_target(right), Some(Type::String));
        }
        other => panic!("expected a binary expression, found {:?}", other),
    }
}

#[test]
fn test_unary_keeps_operand_type() {
    let program = checked("program T; var b: boolean; r: real; begin b := not b; r := -r end.");
    let value = first_assigned_value(&program);

    assert_eq!(value.ty, Some(Type::Boolean));
}

#[test]
fn test_invalid_assignment() {
    let error = check_err("program T; var i: integer; begin i := 2.5 end.");

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::InvalidType {
            expected: Type::Integer,
            received: Type::Real,
        }
    );
    assert_eq!(error.kind(), ErrorKind::Semantic);
    assert_eq!(error.get_position().column, 34);
}

#[test]
fn test_invalid_operands_at_operator() {
    let error = check_err("program T; var b: boolean; begin b := b + 1 end.");

    assert!(matches!(
        error.get_impl(),
        ErrorImpl::InvalidOperands { operator, left: Type::Boolean, right: Type::Integer } if operator == "+"
    ));
    assert_eq!(error.get_position().column, 41);
}

#[test]
fn test_duplicate_declaration() {
    let error = check_err("program T; var x: integer; x: real; begin end.");

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::NameAlreadyExists {
            name: "x".to_string()
        }
    );
}

#[test]
fn test_duplicate_across_kinds() {
    let error = check_err("program T; const x = 1; var x: integer; begin end.");
    assert!(matches!(error.get_impl(), ErrorImpl::NameAlreadyExists { .. }));

    let error = check_err("program T; procedure p(a: integer); var a: real; begin end; begin end.");
    assert!(matches!(error.get_impl(), ErrorImpl::NameAlreadyExists { name } if name == "a"));
}

#[test]
fn test_shadowing_in_nested_block() {
    let source = "program T; var x: integer;
        procedure p(); var x: string; begin x := 'inner' end;
        begin x := 1 end.";
    let program = checked(source);

    assert_eq!(first_assigned_value(&program).ty, Some(Type::Integer));
}

#[test]
fn test_inner_names_do_not_leak() {
    let error = check_err(
        "program T; procedure p(); var local: integer; begin local := 1 end; begin local := 2 end.",
    );

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnknownVariable {
            name: "local".to_string()
        }
    );
}

#[test]
fn test_constants() {
    let program = checked("program T; const limit = 10; var r: real; begin r := limit end.");

    assert_eq!(cast_target(first_assigned_value(&program)), Some(Type::Real));

    let error = check_err("program T; const limit = 10; begin limit := 2 end.");
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::ConstantAssignment {
            name: "limit".to_string()
        }
    );
}

#[test]
fn test_function_call_coerces_arguments() {
    let source = "program T; var r: real;
        function half(x: real): real; begin half := x / 2 end;
        begin r := half(3) end.";
    let program = checked(source);
    let value = first_assigned_value(&program);

    assert_eq!(value.ty, Some(Type::Real));
    match &value.kind {
        ExprKind::FnCall { args, .. } => assert_eq!(cast_target(&args[0]), Some(Type::Real)),
        other => panic!("expected a call, found {:?}", other),
    }
}

#[test]
fn test_recursive_function() {
    checked(
        "program T; function fact(n: integer): integer;
         begin if n <= 1 then fact := 1 else fact := n * fact(n - 1) end;
         begin writeln(fact(5)) end.",
    );
}

#[test]
fn test_argument_type_mismatch() {
    let error = check_err(
        "program T; procedure p(b: boolean); begin end; begin p(1) end.",
    );

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::InvalidType {
            expected: Type::Boolean,
            received: Type::Integer,
        }
    );
}

#[test]
fn test_unknown_function() {
    let error = check_err("program T; var x: integer; begin x := f(1) end.");
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::FunctionNotFound {
            name: "f".to_string()
        }
    );

    // A variable is not callable
    let error = check_err("program T; var x: integer; begin x(1) end.");
    assert!(matches!(error.get_impl(), ErrorImpl::FunctionNotFound { .. }));
}

#[test]
fn test_read_targets_must_be_variables() {
    checked("program T; var a, b: integer; begin read(a, b) end.");

    let error = check_err("program T; var a: integer; begin read(a, missing) end.");
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnknownReadTarget {
            name: "missing".to_string()
        }
    );
}

#[test]
fn test_for_loop() {
    let program = checked("program T; var r: real; begin for r := 1 to 10 do writeln(r) end.");

    match &program.block.body.body[0] {
        Stmt::For(for_stmt) => {
            assert_eq!(cast_target(&for_stmt.start), Some(Type::Real));
            assert_eq!(cast_target(&for_stmt.end), Some(Type::Real));
        }
        other => panic!("expected a for loop, found {:?}", other),
    }

    let error = check_err("program T; begin for i := 1 to 10 do writeln(i) end.");
    assert!(matches!(error.get_impl(), ErrorImpl::UnknownVariable { name } if name == "i"));
}

#[test]
fn test_control_flow_is_visited() {
    let error = check_err(
        "program T; var i: integer; begin while i < 10 do repeat i := i + 1 until y end.",
    );

    assert!(matches!(error.get_impl(), ErrorImpl::UnknownVariable { name } if name == "y"));
}

#[test]
fn test_scope_is_restored_after_error() {
    let mut checker = TypeChecker::new();
    let mut program = parse_source(
        "program T; procedure p(); begin q() end; begin end.",
        "test.pas",
    )
    .expect("source should parse");

    assert!(checker.analyze(&mut program).is_err());
    assert_eq!(checker.symbols().depth(), 1);
}

#[test]
fn test_reanalysis_keeps_types() {
    let mut program = parse_source(
        "program T; var r: real; begin r := 1 + 2.0 end.",
        "test.pas",
    )
    .expect("source should parse");

    type_check(&mut program).expect("first analysis should succeed");
    let first = program.clone();
    type_check(&mut program).expect("second analysis should succeed");

    assert_eq!(program, first);
}

#[test]
fn test_long_sum() {
    let terms = vec!["1"; 1000].join(" + ");
    let source = format!("program T; var n: integer; begin n := {} end.", terms);

    let program = checked(&source);
    assert_eq!(first_assigned_value(&program).ty, Some(Type::Integer));
}
