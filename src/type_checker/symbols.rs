//! Lexical scopes for name resolution.
//!
//! Scopes form a parent-linked chain rooted at a scope that lives for the whole
//! analysis. The chain is stored as a stack: a scope only refers to its parent
//! by index, for lookup, and is dropped when its block ends.

use std::collections::HashMap;

use crate::{ast::types::Type, lexer::tokens::Token};

#[derive(Debug, Clone, PartialEq)]
pub struct VariableSymbol {
    pub name: Token,
    pub ty: Type,
}

/// A named constant; `ty` is the type of its value expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantSymbol {
    pub name: Token,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSymbol {
    pub name: Token,
    pub params: Vec<Type>,
    /// `Type::Void` for procedures.
    pub return_type: Type,
}

/// The declaration a name resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Symbol<'a> {
    Variable(&'a VariableSymbol),
    Constant(&'a ConstantSymbol),
    Function(&'a FunctionSymbol),
}

#[derive(Debug, Default)]
pub struct Scope {
    parent: Option<usize>,
    variables: HashMap<String, VariableSymbol>,
    constants: HashMap<String, ConstantSymbol>,
    functions: HashMap<String, FunctionSymbol>,
}

impl Scope {
    fn get(&self, name: &str) -> Option<Symbol<'_>> {
        if let Some(variable) = self.variables.get(name) {
            Some(Symbol::Variable(variable))
        } else if let Some(constant) = self.constants.get(name) {
            Some(Symbol::Constant(constant))
        } else {
            self.functions.get(name).map(Symbol::Function)
        }
    }
}

#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    current: usize,
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}

impl SymbolTable {
    /// Creates a table holding only the root scope.
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![Scope::default()],
            current: 0,
        }
    }

    /// Number of scopes on the chain from the current scope to the root.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut scope = &self.scopes[self.current];
        while let Some(parent) = scope.parent {
            depth += 1;
            scope = &self.scopes[parent];
        }
        depth
    }

    /// Opens a child of the current scope and makes it current.
    ///
    /// Returns the scope that was current before, for [`SymbolTable::restore`].
    pub fn enter_scope(&mut self) -> usize {
        let saved = self.current;
        self.scopes.push(Scope {
            parent: Some(saved),
            ..Scope::default()
        });
        self.current = self.scopes.len() - 1;
        saved
    }

    /// Makes `saved` current again and discards every scope opened after it.
    pub fn restore(&mut self, saved: usize) {
        self.current = saved;
        self.scopes.truncate(saved + 1);
    }

    /// Resolves `name`, nearest enclosing scope first.
    ///
    /// With `current_scope_only` the search stops at the current scope.
    pub fn find(&self, name: &str, current_scope_only: bool) -> Option<Symbol<'_>> {
        let mut index = Some(self.current);
        while let Some(current) = index {
            let scope = &self.scopes[current];
            if let Some(symbol) = scope.get(name) {
                return Some(symbol);
            }
            if current_scope_only {
                return None;
            }
            index = scope.parent;
        }

        None
    }

    // Insertion never checks for duplicates; callers `find` first.

    pub fn insert_variable(&mut self, variable: VariableSymbol) {
        self.scopes[self.current]
            .variables
            .insert(variable.name.value.clone(), variable);
    }

    pub fn insert_constant(&mut self, constant: ConstantSymbol) {
        self.scopes[self.current]
            .constants
            .insert(constant.name.value.clone(), constant);
    }

    pub fn insert_function(&mut self, function: FunctionSymbol) {
        self.scopes[self.current]
            .functions
            .insert(function.name.value.clone(), function);
    }
}
