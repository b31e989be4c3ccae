use crate::ast::{
    ast::{Block, FuncProcDecl, Program},
    expressions::{Expr, ExprKind},
    statements::Stmt,
};

/// Dumps a program as indented XML.
///
/// Expression elements carry a `Type` attribute once the type checker has
/// annotated them; synthesized conversions appear as `TypeCast` elements.
pub fn program_to_xml(program: &Program) -> String {
    let mut writer = XmlWriter::default();
    writer.open("Program", &[("Name", program.name.value.clone())]);
    writer.block(&program.block);
    writer.close("Program");
    writer.output
}

/// Dumps a single expression tree.
pub fn expr_to_xml(expr: &Expr) -> String {
    let mut writer = XmlWriter::default();
    writer.expr(expr);
    writer.output
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

type Attributes<'a> = &'a [(&'a str, String)];

#[derive(Default)]
struct XmlWriter {
    output: String,
    depth: usize,
}

impl XmlWriter {
    fn tag(&mut self, name: &str, attributes: Attributes, self_closing: bool) {
        self.output.push_str(&"  ".repeat(self.depth));
        self.output.push('<');
        self.output.push_str(name);
        for (key, value) in attributes {
            self.output
                .push_str(&format!(" {}=\"{}\"", key, escape(value)));
        }
        self.output.push_str(if self_closing { "/>\n" } else { ">\n" });
    }

    fn open(&mut self, name: &str, attributes: Attributes) {
        self.tag(name, attributes, false);
        self.depth += 1;
    }

    fn close(&mut self, name: &str) {
        self.depth -= 1;
        self.output.push_str(&"  ".repeat(self.depth));
        self.output.push_str(&format!("</{}>\n", name));
    }

    fn leaf(&mut self, name: &str, attributes: Attributes) {
        self.tag(name, attributes, true);
    }

    fn block(&mut self, block: &Block) {
        self.open("Block", &[]);

        let declarations = &block.declarations;
        if !declarations.is_empty() {
            self.open("Declarations", &[]);
            for constant in &declarations.consts {
                self.open("Const", &[("Name", constant.name.value.clone())]);
                self.expr(&constant.value);
                self.close("Const");
            }
            for var in &declarations.vars {
                self.leaf(
                    "Var",
                    &[("Name", var.name.value.clone()), ("Type", var.ty.to_string())],
                );
            }
            for function in &declarations.funcs {
                self.function(function);
            }
            self.close("Declarations");
        }

        self.open("Compound", &[]);
        for stmt in block.body.iter() {
            self.stmt(stmt);
        }
        self.close("Compound");

        self.close("Block");
    }

    fn function(&mut self, function: &FuncProcDecl) {
        let name = if function.is_procedure() {
            "Procedure"
        } else {
            "Function"
        };
        self.open(
            name,
            &[
                ("Name", function.name.value.clone()),
                ("ReturnType", function.return_type.to_string()),
            ],
        );
        for param in &function.params {
            self.leaf(
                "Param",
                &[("Name", param.name.value.clone()), ("Type", param.ty.to_string())],
            );
        }
        self.block(&function.block);
        self.close(name);
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Compound(compound) => {
                self.open("Compound", &[]);
                for stmt in compound.iter() {
                    self.stmt(stmt);
                }
                self.close("Compound");
            }
            Stmt::Assign(assign) => {
                self.open("Assign", &[("Name", assign.name.value.clone())]);
                self.expr(&assign.value);
                self.close("Assign");
            }
            Stmt::Write(write) => {
                self.open("Write", &[("NewLine", write.newline.to_string())]);
                for arg in &write.args {
                    self.expr(arg);
                }
                self.close("Write");
            }
            Stmt::Read(read) => {
                self.open("Read", &[]);
                for target in &read.targets {
                    self.leaf("Target", &[("Name", target.value.clone())]);
                }
                self.close("Read");
            }
            Stmt::If(if_stmt) => {
                self.open("If", &[]);
                self.expr(&if_stmt.condition);
                self.open("Then", &[]);
                self.stmt(&if_stmt.then_body);
                self.close("Then");
                if let Some(else_body) = &if_stmt.else_body {
                    self.open("Else", &[]);
                    self.stmt(else_body);
                    self.close("Else");
                }
                self.close("If");
            }
            Stmt::While(while_stmt) => {
                self.open("While", &[]);
                self.expr(&while_stmt.condition);
                self.stmt(&while_stmt.body);
                self.close("While");
            }
            Stmt::RepeatUntil(repeat) => {
                self.open("Repeat", &[]);
                for stmt in &repeat.body {
                    self.stmt(stmt);
                }
                self.open("Until", &[]);
                self.expr(&repeat.condition);
                self.close("Until");
                self.close("Repeat");
            }
            Stmt::For(for_stmt) => {
                let direction = if for_stmt.ascending { "to" } else { "downto" };
                self.open(
                    "For",
                    &[
                        ("Var", for_stmt.variable.value.clone()),
                        ("Direction", direction.to_string()),
                    ],
                );
                self.expr(&for_stmt.start);
                self.expr(&for_stmt.end);
                self.stmt(&for_stmt.body);
                self.close("For");
            }
            Stmt::Call(call) => {
                self.open("Call", &[("Name", call.name.value.clone())]);
                for arg in &call.args {
                    self.expr(arg);
                }
                self.close("Call");
            }
        }
    }

    fn expr(&mut self, expr: &Expr) {
        let mut attributes = match &expr.kind {
            ExprKind::Literal(token) => vec![("Value", token.value.clone())],
            ExprKind::Identifier(name) | ExprKind::FnCall { name, .. } => {
                vec![("Name", name.value.clone())]
            }
            ExprKind::Unary { operator, .. } | ExprKind::Binary { operator, .. } => {
                vec![("Op", format!("{:?}", operator.kind))]
            }
            ExprKind::TypeCast(_) => vec![],
        };
        if let Some(ty) = expr.ty {
            attributes.push(("Type", ty.to_string()));
        }

        match &expr.kind {
            ExprKind::Literal(_) => self.leaf("Literal", &attributes),
            ExprKind::Identifier(_) => self.leaf("Ident", &attributes),
            ExprKind::Unary { operand, .. } => {
                self.open("Unary", &attributes);
                self.expr(operand);
                self.close("Unary");
            }
            ExprKind::Binary { left, right, .. } => {
                self.open("Binary", &attributes);
                self.expr(left);
                self.expr(right);
                self.close("Binary");
            }
            ExprKind::FnCall { args, .. } => {
                self.open("FnCall", &attributes);
                for arg in args {
                    self.expr(arg);
                }
                self.close("FnCall");
            }
            ExprKind::TypeCast(inner) => {
                self.open("TypeCast", &attributes);
                self.expr(inner);
                self.close("TypeCast");
            }
        }
    }
}
