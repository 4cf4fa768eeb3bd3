//! Contract extraction across declaration files

use fakegen::diagnostics::DiagnosticCode;
use fakegen::{
    Contract, FakegenError, GenerationContext, GeneratorConfig, ImportSpec, TypeExpr, ValueName,
    extract, parse_unit, resolve_contract,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn units(sources: &[(&str, &str)]) -> Vec<fakegen::ast::SourceUnit> {
    sources
        .iter()
        .map(|(name, source)| parse_unit(name, source).expect("source parses"))
        .collect()
}

fn method_names(contract: &Contract) -> Vec<&str> {
    contract.methods.iter().map(|m| m.name.as_str()).collect()
}

fn contract<'a>(contracts: &'a [Contract], name: &str) -> &'a Contract {
    contracts
        .iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| panic!("no contract {name}"))
}

const SHAPES: &str = r#"package shapes

type Area interface {
	Area() float64
}

type Perimeter interface {
	Perimeter() float64
}

// Shape combines both measures.
type Shape interface {
	Name() string
	Area
	Scale(factor float64)
	Perimeter
}
"#;

#[test]
fn test_embedded_methods_are_spliced_in_place() {
    let mut ctx = GenerationContext::default();
    let package = extract(&units(&[("shapes.go", SHAPES)]), &mut ctx).unwrap();

    let shape = contract(&package.contracts, "Shape");
    assert_eq!(
        method_names(shape),
        vec!["Name", "Area", "Scale", "Perimeter"]
    );
    assert!(ctx.diagnostics.is_empty());
}

#[test]
fn test_contract_order_follows_units_then_declarations() {
    let mut ctx = GenerationContext::default();
    let package = extract(
        &units(&[
            ("z.go", "package p\n\ntype Zed interface { Z() }\n"),
            ("a.go", "package p\n\ntype Beta interface { B() }\ntype Alpha interface { A() }\n"),
        ]),
        &mut ctx,
    )
    .unwrap();

    let names: Vec<&str> = package.contracts.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Beta", "Alpha", "Zed"]);
}

#[test]
fn test_embedding_across_files() {
    let mut ctx = GenerationContext::default();
    let package = extract(
        &units(&[
            (
                "store.go",
                "package store\n\ntype Store interface {\n\tReadWriter\n\tClose() error\n}\n",
            ),
            (
                "rw.go",
                "package store\n\ntype ReadWriter interface {\n\tReader\n\tWrite([]byte) (int, error)\n}\n\ntype Reader interface {\n\tRead([]byte) (int, error)\n}\n",
            ),
        ]),
        &mut ctx,
    )
    .unwrap();

    let store = contract(&package.contracts, "Store");
    assert_eq!(method_names(store), vec!["Read", "Write", "Close"]);
    assert_eq!(package.contracts.len(), 3);
}

#[test]
fn test_cyclic_embedding_skips_only_the_cycle() {
    let source = r#"package loop

type A interface {
	B
	DoA()
}

type B interface {
	A
	DoB()
}

type C interface {
	DoC()
}
"#;
    let mut ctx = GenerationContext::default();
    let package = extract(&units(&[("loop.go", source)]), &mut ctx).unwrap();

    let names: Vec<&str> = package.contracts.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["C"]);

    let cycles: Vec<&str> = ctx
        .diagnostics
        .with_code(&DiagnosticCode::CyclicEmbedding)
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(
        cycles,
        vec![
            "A embeds itself through A -> B -> A",
            "B embeds itself through B -> A -> B"
        ]
    );
    assert!(ctx.has_errors());
}

#[test]
fn test_self_embedding_is_a_cycle() {
    let mut ctx = GenerationContext::default();
    let package = extract(
        &units(&[("self.go", "package p\n\ntype Me interface {\n\tMe\n}\n")]),
        &mut ctx,
    )
    .unwrap();
    assert!(package.contracts.is_empty());
    assert_eq!(
        ctx.diagnostics.diagnostics()[0].message,
        "Me embeds itself through Me -> Me"
    );
}

#[rstest]
#[case::foreign_package("io.Reader")]
#[case::undeclared("Missing")]
fn test_unresolved_embeddings_warn(#[case] embedded: &str) {
    let source = format!(
        "package p\n\nimport \"io\"\n\ntype T interface {{\n\t{embedded}\n\tDo()\n}}\n"
    );
    let mut ctx = GenerationContext::default();
    let package = extract(&units(&[("t.go", source.as_str())]), &mut ctx).unwrap();

    assert_eq!(method_names(&package.contracts[0]), vec!["Do"]);
    assert_eq!(
        ctx.diagnostics
            .with_code(&DiagnosticCode::UnresolvedEmbedding)
            .count(),
        1
    );
    assert!(!ctx.has_errors());
}

#[test]
fn test_package_errors() {
    let mut ctx = GenerationContext::default();
    let mixed = units(&[
        ("a.go", "package one\n"),
        ("b.go", "package two\n"),
    ]);
    assert_eq!(
        extract(&mixed, &mut ctx).unwrap_err(),
        FakegenError::AmbiguousPackage {
            packages: vec!["one".to_string(), "two".to_string()],
        }
    );
    assert_eq!(
        extract(&[], &mut ctx).unwrap_err(),
        FakegenError::NoDeclarations
    );
}

#[test]
fn test_package_types_use_source_import() {
    let source = r#"package billing

import (
	"context"
	money "example.com/lib/currency"
)

type Invoice struct {
	Total money.Amount
}

type Biller interface {
	Bill(ctx context.Context, invoice *Invoice) (money.Amount, error)
}
"#;
    let config = GeneratorConfig::default().with_source_import("example.com/app/billing");
    let mut ctx = GenerationContext::new(config);
    let package = extract(&units(&[("billing.go", source)]), &mut ctx).unwrap();
    let biller = &package.contracts[0];

    assert_eq!(
        biller.methods[0].args[1].ty,
        TypeExpr::pointer(TypeExpr::qualified("billing", "Invoice"))
    );
    assert_eq!(
        biller.imports,
        vec![
            ImportSpec::new("context"),
            ImportSpec::new("example.com/app/billing"),
            ImportSpec::aliased("money", "example.com/lib/currency"),
        ]
    );
    assert!(ctx.diagnostics.is_empty());
}

#[test]
fn test_extracted_values_resolve() {
    let source = "package p\n\ntype T interface {\n\tCopy(dst, src []byte, n int) (int, error)\n}\n";
    let mut ctx = GenerationContext::default();
    let package = extract(&units(&[("t.go", source)]), &mut ctx).unwrap();
    let resolved = resolve_contract(&package.contracts[0]).unwrap();
    let copy = &resolved.methods[0];

    let args: Vec<Option<String>> = copy.args.iter().map(|v| v.ident()).collect();
    assert_eq!(
        args,
        vec![Some("dst".into()), Some("src".into()), Some("n".into())]
    );
    assert_eq!(copy.rets[0].name, ValueName::Derived("intResult".to_string()));
    assert_eq!(copy.rets[1].ident().as_deref(), Some("errResult"));
}
