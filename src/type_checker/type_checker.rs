use tracing::debug;

use crate::{
    ast::{
        ast::{Block, ConstDecl, Declarations, FuncProcDecl, Program, VarDecl},
        expressions::{Expr, ExprKind},
        statements::{AssignStmt, ForStmt, Stmt},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{
    coercion::{assignment_coercion, binary_operand_casts, binary_result_type, Coercion},
    symbols::{ConstantSymbol, FunctionSymbol, Symbol, SymbolTable, VariableSymbol},
};

// Errors are built out of line to keep the recursive checker frames small.

#[cold]
fn error_at(token: &Token, error: ErrorImpl) -> Error {
    Error::new(error, token.span.start.clone())
}

#[cold]
fn unknown_variable(name: &Token) -> Error {
    error_at(
        name,
        ErrorImpl::UnknownVariable {
            name: name.value.clone(),
        },
    )
}

#[cold]
fn invalid_operands(operator: &Token, left: Type, right: Type) -> Error {
    error_at(
        operator,
        ErrorImpl::InvalidOperands {
            operator: operator.value.clone(),
            left,
            right,
        },
    )
}

/// Walks a parsed program, resolving names and annotating every expression
/// with its type.
///
/// Implicit conversions are made explicit by wrapping operands in
/// `ExprKind::TypeCast` nodes. The first violation ends the analysis.
#[derive(Debug, Default)]
pub struct TypeChecker {
    symbols: SymbolTable,
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker {
            symbols: SymbolTable::new(),
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn analyze(&mut self, program: &mut Program) -> Result<(), Error> {
        debug!(program = %program.name.value, "type checking program");
        self.check_block(&mut program.block, &[])
    }

    /// Runs `f` inside a fresh child scope.
    ///
    /// The caller's scope is current again afterwards, whether `f` failed or not.
    fn within_scope<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let saved = self.symbols.enter_scope();
        debug!(depth = self.symbols.depth(), "entered scope");

        let result = f(self);

        self.symbols.restore(saved);
        debug!(depth = self.symbols.depth(), "left scope");
        result
    }

    /// Checks a block in its own scope, with `params` declared first.
    fn check_block(&mut self, block: &mut Block, params: &[VarDecl]) -> Result<(), Error> {
        self.within_scope(|checker| {
            for param in params {
                checker.declare_variable(param)?;
            }
            checker.check_declarations(&mut block.declarations)?;
            for stmt in block.body.iter_mut() {
                checker.check_stmt(stmt)?;
            }
            Ok(())
        })
    }

    fn check_declarations(&mut self, declarations: &mut Declarations) -> Result<(), Error> {
        for constant in declarations.consts.iter_mut() {
            self.declare_constant(constant)?;
        }
        for variable in declarations.vars.iter() {
            self.declare_variable(variable)?;
        }
        for function in declarations.funcs.iter_mut() {
            self.declare_function(function)?;
        }

        Ok(())
    }

    /// Fails when `name` is already declared in the current scope.
    fn ensure_new_name(&self, name: &Token) -> Result<(), Error> {
        if self.symbols.find(&name.value, true).is_some() {
            return Err(error_at(
                name,
                ErrorImpl::NameAlreadyExists {
                    name: name.value.clone(),
                },
            ));
        }

        Ok(())
    }

    fn declare_variable(&mut self, variable: &VarDecl) -> Result<(), Error> {
        self.ensure_new_name(&variable.name)?;
        debug!(name = %variable.name.value, ty = %variable.ty, "declared variable");

        self.symbols.insert_variable(VariableSymbol {
            name: variable.name.clone(),
            ty: variable.ty,
        });
        Ok(())
    }

    fn declare_constant(&mut self, constant: &mut ConstDecl) -> Result<(), Error> {
        self.ensure_new_name(&constant.name)?;
        let ty = self.check_expr(&mut constant.value)?;
        debug!(name = %constant.name.value, %ty, "declared constant");

        self.symbols.insert_constant(ConstantSymbol {
            name: constant.name.clone(),
            ty,
        });
        Ok(())
    }

    /// Declares the routine before checking its body so the body can call it
    /// and assign its result.
    fn declare_function(&mut self, function: &mut FuncProcDecl) -> Result<(), Error> {
        self.ensure_new_name(&function.name)?;
        debug!(
            name = %function.name.value,
            params = function.params.len(),
            return_type = %function.return_type,
            "declared routine"
        );

        self.symbols.insert_function(FunctionSymbol {
            name: function.name.clone(),
            params: function.params.iter().map(|param| param.ty).collect(),
            return_type: function.return_type,
        });
        self.check_block(&mut function.block, &function.params)
    }

    fn check_stmt(&mut self, stmt: &mut Stmt) -> Result<Type, Error> {
        match stmt {
            Stmt::Compound(compound) => {
                for stmt in compound.iter_mut() {
                    self.check_stmt(stmt)?;
                }
            }
            Stmt::Assign(assign) => self.check_assign(assign)?,
            Stmt::Write(write) => {
                for arg in write.args.iter_mut() {
                    self.check_expr(arg)?;
                }
            }
            Stmt::Read(read) => {
                for target in read.targets.iter() {
                    if !matches!(self.symbols.find(&target.value, false), Some(Symbol::Variable(_))) {
                        return Err(error_at(
                            target,
                            ErrorImpl::UnknownReadTarget {
                                name: target.value.clone(),
                            },
                        ));
                    }
                }
            }
            Stmt::If(if_stmt) => {
                self.check_expr(&mut if_stmt.condition)?;
                self.check_stmt(&mut if_stmt.then_body)?;
                if let Some(else_body) = if_stmt.else_body.as_mut() {
                    self.check_stmt(else_body)?;
                }
            }
            Stmt::While(while_stmt) => {
                self.check_expr(&mut while_stmt.condition)?;
                self.check_stmt(&mut while_stmt.body)?;
            }
            Stmt::RepeatUntil(repeat) => {
                for stmt in repeat.body.iter_mut() {
                    self.check_stmt(stmt)?;
                }
                self.check_expr(&mut repeat.condition)?;
            }
            Stmt::For(for_stmt) => self.check_for(for_stmt)?,
            Stmt::Call(call) => {
                self.check_call(&call.name, &mut call.args)?;
            }
        }

        Ok(Type::Void)
    }

    fn check_assign(&mut self, assign: &mut AssignStmt) -> Result<(), Error> {
        let target = match self.symbols.find(&assign.name.value, false) {
            Some(Symbol::Variable(variable)) => variable.ty,
            Some(Symbol::Function(function)) => function.return_type,
            Some(Symbol::Constant(_)) => {
                return Err(error_at(
                    &assign.name,
                    ErrorImpl::ConstantAssignment {
                        name: assign.name.value.clone(),
                    },
                ))
            }
            None => return Err(unknown_variable(&assign.name)),
        };

        self.check_expr(&mut assign.value)?;
        coerce(&assign.name, &mut assign.value, target)
    }

    fn check_for(&mut self, for_stmt: &mut ForStmt) -> Result<(), Error> {
        let ty = match self.symbols.find(&for_stmt.variable.value, false) {
            Some(Symbol::Variable(variable)) => variable.ty,
            _ => return Err(unknown_variable(&for_stmt.variable)),
        };

        self.check_expr(&mut for_stmt.start)?;
        coerce(&for_stmt.variable, &mut for_stmt.start, ty)?;
        self.check_expr(&mut for_stmt.end)?;
        coerce(&for_stmt.variable, &mut for_stmt.end, ty)?;
        self.check_stmt(&mut for_stmt.body)?;
        Ok(())
    }

    /// Resolves the callee, checks arity and coerces each argument to its
    /// parameter's type. Shared by call statements and call expressions.
    fn check_call(&mut self, name: &Token, args: &mut [Expr]) -> Result<Type, Error> {
        let (params, return_type) = match self.symbols.find(&name.value, false) {
            Some(Symbol::Function(function)) => {
                (function.params.clone(), function.return_type)
            }
            _ => {
                return Err(error_at(
                    name,
                    ErrorImpl::FunctionNotFound {
                        name: name.value.clone(),
                    },
                ))
            }
        };

        if args.len() != params.len() {
            return Err(error_at(
                name,
                ErrorImpl::ArgumentCountMismatch {
                    function: name.value.clone(),
                    expected: params.len(),
                    received: args.len(),
                },
            ));
        }

        for (arg, param) in args.iter_mut().zip(params) {
            self.check_expr(arg)?;
            coerce(name, arg, param)?;
        }

        Ok(return_type)
    }

    pub fn check_expr(&mut self, expr: &mut Expr) -> Result<Type, Error> {
        let ty = match &mut expr.kind {
            ExprKind::Literal(token) => literal_type(token.kind),
            ExprKind::Identifier(name) => match self.symbols.find(&name.value, false) {
                Some(Symbol::Variable(variable)) => variable.ty,
                Some(Symbol::Constant(constant)) => constant.ty,
                _ => return Err(unknown_variable(name)),
            },
            ExprKind::Unary { operand, .. } => self.check_expr(operand)?,
            ExprKind::Binary {
                operator,
                left,
                right,
            } => {
                let left_type = self.check_expr(left)?;
                let right_type = self.check_expr(right)?;

                let ty = binary_result_type(operator.kind, left_type, right_type);
                if ty == Type::Error {
                    return Err(invalid_operands(operator, left_type, right_type));
                }

                let (left_cast, right_cast) = binary_operand_casts(left_type, right_type);
                if let Some(target) = left_cast {
                    left.wrap_in_cast(target);
                }
                if let Some(target) = right_cast {
                    right.wrap_in_cast(target);
                }
                ty
            }
            ExprKind::FnCall { name, args } => self.check_call(name, args)?,
            ExprKind::TypeCast(inner) => {
                self.check_expr(inner)?;
                expr.ty.unwrap_or(Type::Error)
            }
        };

        expr.ty = Some(ty);
        Ok(ty)
    }
}

fn literal_type(kind: TokenKind) -> Type {
    match kind {
        TokenKind::IntegerLiteral => Type::Integer,
        TokenKind::RealLiteral => Type::Real,
        TokenKind::BooleanLiteral => Type::Boolean,
        TokenKind::StringLiteral => Type::String,
        TokenKind::CharLiteral => Type::Char,
        _ => Type::Error,
    }
}

/// Converts an already checked `expr` to `target`, inserting a cast node when
/// needed. Failures are reported at `token`.
fn coerce(token: &Token, expr: &mut Expr, target: Type) -> Result<(), Error> {
    let source = expr.ty.unwrap_or(Type::Error);

    match assignment_coercion(source, target) {
        Coercion::Exact => Ok(()),
        Coercion::Cast(target) => {
            expr.wrap_in_cast(target);
            Ok(())
        }
        Coercion::Invalid => Err(error_at(
            token,
            ErrorImpl::InvalidType {
                expected: target,
                received: source,
            },
        )),
    }
}

/// Type checks `program` in place with a fresh symbol table.
pub fn type_check(program: &mut Program) -> Result<(), Error> {
    TypeChecker::new().analyze(program)
}
