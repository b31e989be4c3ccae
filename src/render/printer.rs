use crate::{
    ast::{
        ast::{Block, Declarations, FuncProcDecl, Program, VarDecl},
        expressions::{Expr, ExprKind},
        statements::{CompoundStmt, Stmt},
    },
    lexer::tokens::TokenKind,
};

const INDENT: &str = "   ";

/// Renders a program back to Pascal source.
///
/// Binary expressions are fully parenthesized and synthesized casts are left
/// out, so parsing the output yields a tree of the same shape as `program`.
pub fn print_program(program: &Program) -> String {
    let mut printer = Printer::default();
    printer.write(&format!("program {};", program.name.value));
    printer.block(&program.block);
    printer.write(".");
    printer.output.push('\n');
    printer.output
}

/// Renders a single expression on one line.
pub fn print_expr(expr: &Expr) -> String {
    let mut printer = Printer::default();
    printer.expr(expr);
    printer.output
}

#[derive(Default)]
struct Printer {
    output: String,
    indent: usize,
}

impl Printer {
    /// Continues the current line.
    fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    /// Starts a new line at the current indentation.
    fn line(&mut self, text: &str) {
        self.output.push('\n');
        self.output.push_str(&INDENT.repeat(self.indent));
        self.output.push_str(text);
    }

    fn indented(&mut self, f: impl FnOnce(&mut Self)) {
        self.indent += 1;
        f(self);
        self.indent -= 1;
    }

    fn block(&mut self, block: &Block) {
        self.declarations(&block.declarations);
        self.compound(&block.body);
    }

    fn declarations(&mut self, declarations: &Declarations) {
        if !declarations.consts.is_empty() {
            self.line("const");
            self.indented(|printer| {
                for constant in &declarations.consts {
                    printer.line(&format!("{} = ", constant.name.value));
                    printer.expr(&constant.value);
                    printer.write(";");
                }
            });
        }

        if !declarations.vars.is_empty() {
            self.line("var");
            self.indented(|printer| {
                // Neighbouring declarations of one type share a line
                for group in declarations.vars.chunk_by(|a, b| a.ty == b.ty) {
                    printer.line(&format!("{} : {};", names(group), group[0].ty));
                }
            });
        }

        for function in &declarations.funcs {
            self.function(function);
        }
    }

    fn function(&mut self, function: &FuncProcDecl) {
        self.output.push('\n');

        let keyword = if function.is_procedure() {
            "procedure"
        } else {
            "function"
        };
        let params = function
            .params
            .iter()
            .map(|param| format!("{}: {}", param.name.value, param.ty))
            .collect::<Vec<String>>()
            .join("; ");

        self.line(&format!("{} {} ({})", keyword, function.name.value, params));
        if !function.is_procedure() {
            self.write(&format!(" : {}", function.return_type));
        }
        self.write(";");

        self.block(&function.block);
        self.write(";");
    }

    fn compound(&mut self, compound: &CompoundStmt) {
        self.line("begin");
        self.indented(|printer| printer.stmt_list(&compound.body));
        self.line("end");
    }

    /// Statements joined by `;`.
    fn stmt_list(&mut self, stmts: &[Stmt]) {
        for (i, stmt) in stmts.iter().enumerate() {
            if i > 0 {
                self.write(";");
            }
            self.stmt(stmt);
        }
    }

    fn nested_stmt(&mut self, stmt: &Stmt) {
        self.indented(|printer| printer.stmt(stmt));
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Compound(compound) => self.compound(compound),
            Stmt::Assign(assign) => {
                self.line(&format!("{} := ", assign.name.value));
                self.expr(&assign.value);
            }
            Stmt::Write(write) => {
                self.line(if write.newline { "writeln" } else { "write" });
                self.args(&write.args);
            }
            Stmt::Read(read) => {
                let targets = read
                    .targets
                    .iter()
                    .map(|target| target.value.as_str())
                    .collect::<Vec<&str>>()
                    .join(", ");
                self.line(&format!("read ({})", targets));
            }
            Stmt::If(if_stmt) => {
                self.line("if ");
                self.expr(&if_stmt.condition);
                self.write(" then");
                if if_stmt.else_body.is_some() && ends_in_open_if(&if_stmt.then_body) {
                    // Keeps the `else` from binding to the inner `if`
                    self.indented(|printer| {
                        printer.line("begin");
                        printer.nested_stmt(&if_stmt.then_body);
                        printer.line("end");
                    });
                } else {
                    self.nested_stmt(&if_stmt.then_body);
                }
                if let Some(else_body) = &if_stmt.else_body {
                    self.line("else");
                    self.nested_stmt(else_body);
                }
            }
            Stmt::While(while_stmt) => {
                self.line("while ");
                self.expr(&while_stmt.condition);
                self.write(" do");
                self.nested_stmt(&while_stmt.body);
            }
            Stmt::RepeatUntil(repeat) => {
                self.line("repeat");
                self.indented(|printer| printer.stmt_list(&repeat.body));
                self.line("until ");
                self.expr(&repeat.condition);
            }
            Stmt::For(for_stmt) => {
                self.line(&format!("for {} := ", for_stmt.variable.value));
                self.expr(&for_stmt.start);
                self.write(if for_stmt.ascending { " to " } else { " downto " });
                self.expr(&for_stmt.end);
                self.write(" do");
                self.nested_stmt(&for_stmt.body);
            }
            Stmt::Call(call) => {
                self.line(&call.name.value);
                self.args(&call.args);
            }
        }
    }

    fn args(&mut self, args: &[Expr]) {
        self.write(" (");
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.expr(arg);
        }
        self.write(")");
    }

    fn expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Literal(token) => match token.kind {
                TokenKind::StringLiteral | TokenKind::CharLiteral => {
                    self.write(&format!("'{}'", token.value.replace('\'', "''")))
                }
                _ => self.write(&token.value),
            },
            ExprKind::Identifier(name) => self.write(&name.value),
            ExprKind::Unary { operator, operand } => {
                if operator.kind == TokenKind::Not {
                    self.write("not ");
                } else {
                    self.write(&operator.value);
                }
                self.expr(operand);
            }
            ExprKind::Binary {
                operator,
                left,
                right,
            } => {
                self.write("(");
                self.expr(left);
                self.write(&format!(" {} ", operator.value));
                self.expr(right);
                self.write(")");
            }
            ExprKind::FnCall { name, args } => {
                self.write(&name.value);
                self.args(args);
            }
            ExprKind::TypeCast(inner) => self.expr(inner),
        }
    }
}

/// True when `stmt` ends in an `if` without an `else`, which would claim a
/// following `else` on re-parse.
fn ends_in_open_if(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::If(if_stmt) => match &if_stmt.else_body {
            Some(else_body) => ends_in_open_if(else_body),
            None => true,
        },
        Stmt::While(while_stmt) => ends_in_open_if(&while_stmt.body),
        Stmt::For(for_stmt) => ends_in_open_if(&for_stmt.body),
        _ => false,
    }
}

fn names(vars: &[VarDecl]) -> String {
    vars.iter()
        .map(|var| var.name.value.as_str())
        .collect::<Vec<&str>>()
        .join(", ")
}
