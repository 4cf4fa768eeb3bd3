//! Rendered output of generated fakes

mod common;

use common::{RUNNER_SOURCE, generate_one};
use fakegen::{GeneratorConfig, Renderer, from_sources, render_file};
use pretty_assertions::assert_eq;
use rstest::rstest;

const RUNNER_GOLDEN: &str = include_str!("fixtures/runner.go.golden");

#[test]
fn test_runner_matches_golden_file() {
    let file = generate_one(RUNNER_SOURCE, "Runner");
    assert_eq!(render_file(&file), RUNNER_GOLDEN);
}

#[test]
fn test_header_can_be_disabled() {
    let file = generate_one(RUNNER_SOURCE, "Runner");
    let text = Renderer::new().with_header(false).render_file(&file);
    assert!(text.starts_with("package fake\n"));
    assert_eq!(text, RUNNER_GOLDEN.replacen("// Code generated by fakegen. DO NOT EDIT.\n\n", "", 1));
}

#[test]
fn test_custom_package_clause() {
    let output = from_sources(
        &[("runner.go", RUNNER_SOURCE)],
        GeneratorConfig::default().with_package("runnerfake"),
    )
    .unwrap();
    let text = render_file(&output.files[0]);
    assert!(text.contains("\npackage runnerfake\n"));
}

const STORE_A: &str = r#"package store

import "context"

type Store interface {
	Reader
	Put(ctx context.Context, key string, value []byte) error
}
"#;

const STORE_B: &str = r#"package store

import (
	"context"
	"io"
)

type Reader interface {
	Get(context.Context, string) ([]byte, error)
	Stream(key string) io.Reader
}
"#;

fn render_all(sources: &[(&str, &str)]) -> Vec<(String, String)> {
    let output = from_sources(sources, GeneratorConfig::default()).unwrap();
    assert!(!output.has_errors());
    output.render(&Renderer::new())
}

#[test]
fn test_output_is_independent_of_unit_order() {
    let forward = render_all(&[("a.go", STORE_A), ("b.go", STORE_B)]);
    let backward = render_all(&[("b.go", STORE_B), ("a.go", STORE_A)]);
    assert_eq!(forward, backward);

    let again = render_all(&[("a.go", STORE_A), ("b.go", STORE_B)]);
    assert_eq!(forward, again);
}

#[test]
fn test_flattened_contract_rendering() {
    let rendered = render_all(&[("a.go", STORE_A), ("b.go", STORE_B)]);
    let names: Vec<&str> = rendered.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["store.go", "reader.go"]);

    let store = &rendered[0].1;
    assert!(store.contains("import (\n\t\"context\"\n\t\"io\"\n\t\"sync\"\n)\n"));
    assert!(store.contains(
        "func (fake *Store) Get(contextArg context.Context, stringArg string) (byteArrResult []byte, errResult error) {"
    ));
    assert!(store.contains(
        "func (fake *Store) Put(ctxArg context.Context, keyArg string, valueArg []byte) (errResult error) {"
    ));
    assert!(store.contains("func (fake *Store) StreamGetArgs() (keyArg string) {"));

    let get = store.find("func (fake *Store) Get(").unwrap();
    let stream = store.find("func (fake *Store) Stream(").unwrap();
    let put = store.find("func (fake *Store) Put(").unwrap();
    assert!(get < stream && stream < put);
}

#[rstest]
#[case::no_results(
    "Close()",
    "func (fake *Thing) Close() {\n\tfake.closeMutex.Lock()\n"
)]
#[case::variadic(
    "Log(format string, args ...interface{})",
    "func (fake *Thing) Log(formatArg string, argsArg ...interface{}) {"
)]
#[case::repeated_types(
    "Swap(string, string) (string, string)",
    "func (fake *Thing) Swap(stringArg1 string, stringArg2 string) (stringResult1 string, stringResult2 string) {"
)]
#[case::array_keeps_length(
    "Sum(data []byte) [32]byte",
    "func (fake *Thing) Sum(dataArg []byte) (byteArrResult [32]byte) {"
)]
#[case::map_and_pointer(
    "Index(map[string]*Item) int",
    "func (fake *Thing) Index(itemMapArg map[string]*Item) (intResult int) {"
)]
fn test_method_signatures(#[case] method: &str, #[case] expected: &str) {
    let source = format!("package thing\n\ntype Thing interface {{\n\t{method}\n}}\n");
    let file = generate_one(&source, "Thing");
    let text = render_file(&file);
    assert!(text.contains(expected), "missing {expected:?} in:\n{text}");
}

#[test]
fn test_no_argument_getter_has_no_results() {
    let source = "package thing\n\ntype Thing interface {\n\tClose() error\n}\n";
    let text = render_file(&generate_one(source, "Thing"));
    assert!(text.contains(
        "func (fake *Thing) CloseGetArgs() {\n\tfake.closeMutex.RLock()\n\tfake.closeMutex.RUnlock()\n}\n"
    ));
    assert!(text.contains("type ThingCloseMethod struct {\n\tCalled    bool\n\tErrResult error\n}\n"));
}
