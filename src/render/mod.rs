// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Go source rendering
//!
//! Prints synthesized declarations the way `gofmt` would lay them out: tab
//! indentation, struct fields aligned per group, imports sorted by path, a
//! blank line between declarations and before a trailing `return`.

use crate::model::ImportSpec;
use crate::pipeline::GeneratedFile;
use crate::synth::{Decl, Expr, Field, FuncDecl, FuncTypeDecl, Stmt, StructDecl};

/// Comment marking files as generated
pub const GENERATED_HEADER: &str = "// Code generated by fakegen. DO NOT EDIT.";

/// Renderer for generated files
#[derive(Debug, Clone)]
pub struct Renderer {
    header: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self { header: true }
    }
}

impl Renderer {
    /// Create a renderer that writes the generated-code header
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to write the generated-code header
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Render a complete file
    pub fn render_file(&self, file: &GeneratedFile) -> String {
        let mut printer = Printer::default();
        if self.header {
            printer.line(GENERATED_HEADER);
            printer.blank();
        }
        printer.line(&format!("package {}", file.package));

        if !file.imports.is_empty() {
            printer.blank();
            render_imports(&mut printer, &file.imports);
        }

        for decl in &file.decls {
            printer.blank();
            render_decl_into(&mut printer, decl);
        }

        printer.finish()
    }

    /// Render a single declaration
    pub fn render_decl(&self, decl: &Decl) -> String {
        let mut printer = Printer::default();
        render_decl_into(&mut printer, decl);
        printer.finish()
    }
}

/// Render a complete file with the default settings
pub fn render_file(file: &GeneratedFile) -> String {
    Renderer::new().render_file(file)
}

#[derive(Debug, Default)]
struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push('\t');
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn finish(self) -> String {
        self.out
    }
}

fn render_imports(printer: &mut Printer, imports: &[ImportSpec]) {
    let mut sorted: Vec<&ImportSpec> = imports.iter().collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.alias.cmp(&b.alias)));
    sorted.dedup();

    if let [only] = sorted.as_slice() {
        printer.line(&format!("import {}", import_spec(only)));
        return;
    }

    printer.line("import (");
    printer.indent += 1;
    for import in sorted {
        printer.line(&import_spec(import));
    }
    printer.indent -= 1;
    printer.line(")");
}

fn import_spec(import: &ImportSpec) -> String {
    match &import.alias {
        Some(alias) => format!("{alias} \"{}\"", import.path),
        None => format!("\"{}\"", import.path),
    }
}

fn render_decl_into(printer: &mut Printer, decl: &Decl) {
    match decl {
        Decl::Struct(decl) => render_struct(printer, decl),
        Decl::FuncType(decl) => render_func_type(printer, decl),
        Decl::Func(decl) => render_func(printer, decl),
    }
}

fn render_struct(printer: &mut Printer, decl: &StructDecl) {
    if decl.fields().next().is_none() {
        printer.line(&format!("type {} struct{{}}", decl.name));
        return;
    }

    printer.line(&format!("type {} struct {{", decl.name));
    printer.indent += 1;
    let groups = decl.groups.iter().filter(|group| !group.is_empty());
    for (index, group) in groups.enumerate() {
        if index > 0 {
            printer.blank();
        }
        let width = group.iter().map(|field| field.name.len()).max().unwrap_or(0);
        for field in group {
            printer.line(&format!("{:<width$} {}", field.name, field.ty));
        }
    }
    printer.indent -= 1;
    printer.line("}");
}

fn render_func_type(printer: &mut Printer, decl: &FuncTypeDecl) {
    let params: Vec<String> = decl.params.iter().map(ToString::to_string).collect();
    let results: Vec<Field> = decl
        .results
        .iter()
        .map(|ty| Field::new("", ty.clone()))
        .collect();
    printer.line(&format!(
        "type {} func({}){}",
        decl.name,
        params.join(", "),
        result_list(&results)
    ));
}

fn render_func(printer: &mut Printer, decl: &FuncDecl) {
    let receiver = decl
        .receiver
        .as_ref()
        .map(|receiver| format!("({}) ", field(receiver)))
        .unwrap_or_default();
    let params: Vec<String> = decl.params.iter().map(field).collect();

    printer.line(&format!(
        "func {receiver}{}({}){} {{",
        decl.name,
        params.join(", "),
        result_list(&decl.results)
    ));
    printer.indent += 1;
    render_block(printer, &decl.body);
    printer.indent -= 1;
    printer.line("}");
}

fn render_block(printer: &mut Printer, body: &[Stmt]) {
    for (index, stmt) in body.iter().enumerate() {
        if index > 0 && matches!(stmt, Stmt::Return(_)) {
            printer.blank();
        }
        render_stmt(printer, stmt);
    }
}

fn render_stmt(printer: &mut Printer, stmt: &Stmt) {
    match stmt {
        Stmt::Define { names, value } => {
            printer.line(&format!("{} := {}", names.join(", "), expr(value)));
        }
        Stmt::Assign { target, value } => {
            printer.line(&format!("{} = {}", expr(target), expr(value)));
        }
        Stmt::Increment(target) => printer.line(&format!("{}++", expr(target))),
        Stmt::Expr(value) => printer.line(&expr(value)),
        Stmt::Return(values) if values.is_empty() => printer.line("return"),
        Stmt::Return(values) => printer.line(&format!("return {}", expr_list(values))),
        Stmt::If { cond, then } => {
            printer.line(&format!("if {} {{", expr(cond)));
            printer.indent += 1;
            render_block(printer, then);
            printer.indent -= 1;
            printer.line("}");
        }
        Stmt::Range { value, over, body } => {
            printer.line(&format!("for _, {value} := range {} {{", expr(over)));
            printer.indent += 1;
            render_block(printer, body);
            printer.indent -= 1;
            printer.line("}");
        }
    }
}

fn field(field: &Field) -> String {
    if field.name.is_empty() {
        field.ty.to_string()
    } else {
        format!("{} {}", field.name, field.ty)
    }
}

/// Result list including its leading space, empty when there are no results
fn result_list(results: &[Field]) -> String {
    match results {
        [] => String::new(),
        [only] if only.name.is_empty() => format!(" {}", only.ty),
        _ => {
            let fields: Vec<String> = results.iter().map(field).collect();
            format!(" ({})", fields.join(", "))
        }
    }
}

fn expr_list(values: &[Expr]) -> String {
    values.iter().map(expr).collect::<Vec<_>>().join(", ")
}

fn expr(value: &Expr) -> String {
    match value {
        Expr::Ident(name) => name.clone(),
        Expr::Selector { base, field } => format!("{}.{field}", expr(base)),
        Expr::Index { base, index } => format!("{}[{}]", expr(base), expr(index)),
        Expr::Call { func, args } => format!("{}({})", expr(func), expr_list(args)),
        Expr::Int(value) => value.to_string(),
        Expr::Bool(value) => value.to_string(),
        Expr::Not(operand) => format!("!{}", expr(operand)),
        Expr::AddressOf(operand) => format!("&{}", expr(operand)),
        Expr::Composite(ty) => format!("{ty}{{}}"),
        Expr::Make(ty) => format!("make({ty})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeExpr;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_struct_alignment() {
        let decl = Decl::Struct(StructDecl {
            name: "RunnerRunMethod".to_string(),
            groups: vec![
                vec![Field::new("DistanceArg", TypeExpr::named("int"))],
                vec![
                    Field::new("Called", TypeExpr::named("bool")),
                    Field::new("ErrResult", TypeExpr::named("error")),
                ],
            ],
        });
        assert_eq!(
            Renderer::new().render_decl(&decl),
            "type RunnerRunMethod struct {\n\tDistanceArg int\n\n\tCalled    bool\n\tErrResult error\n}\n"
        );
    }

    #[test]
    fn test_empty_struct() {
        let decl = Decl::Struct(StructDecl {
            name: "Nothing".to_string(),
            groups: vec![vec![]],
        });
        assert_eq!(
            Renderer::new().render_decl(&decl),
            "type Nothing struct{}\n"
        );
    }

    #[test]
    fn test_func_type() {
        let decl = Decl::FuncType(FuncTypeDecl {
            name: "RunnerRunFunc".to_string(),
            params: vec![TypeExpr::named("RunnerRunMethod")],
            results: vec![TypeExpr::named("RunnerRunMethod")],
        });
        assert_eq!(
            Renderer::new().render_decl(&decl),
            "type RunnerRunFunc func(RunnerRunMethod) RunnerRunMethod\n"
        );
    }

    #[test]
    fn test_blank_line_before_trailing_return() {
        let decl = Decl::Func(FuncDecl {
            receiver: None,
            name: "NewClock".to_string(),
            params: vec![],
            results: vec![Field::new("", TypeExpr::pointer(TypeExpr::named("Clock")))],
            body: vec![
                Stmt::define(
                    ["fake"],
                    Expr::address_of(Expr::Composite(TypeExpr::named("Clock"))),
                ),
                Stmt::Return(vec![Expr::ident("fake")]),
            ],
        });
        assert_eq!(
            Renderer::new().render_decl(&decl),
            "func NewClock() *Clock {\n\tfake := &Clock{}\n\n\treturn fake\n}\n"
        );
    }

    #[test]
    fn test_imports() {
        let mut printer = Printer::default();
        render_imports(
            &mut printer,
            &[
                ImportSpec::new("time"),
                ImportSpec::aliased("app", "example.com/app/v2"),
                ImportSpec::new("sync"),
            ],
        );
        assert_eq!(
            printer.finish(),
            "import (\n\tapp \"example.com/app/v2\"\n\t\"sync\"\n\t\"time\"\n)\n"
        );

        let mut single = Printer::default();
        render_imports(&mut single, &[ImportSpec::new("sync")]);
        assert_eq!(single.finish(), "import \"sync\"\n");
    }
}
