use criterion::{Criterion, criterion_group, criterion_main};
use fakegen::parser::Tokenizer;
use fakegen::{GeneratorConfig, Renderer, from_sources, parse_unit};
use std::hint::black_box;

const STORE: &str = r#"package store

import (
	"context"
	"io"
	"time"
)

type Reader interface {
	Get(ctx context.Context, key string) ([]byte, error)
	Stream(context.Context, string) (io.ReadCloser, error)
}

type Writer interface {
	Put(ctx context.Context, key string, value []byte, ttl time.Duration) error
	Delete(context.Context, ...string) (int, error)
}

type Store interface {
	Reader
	Writer
	Keys(prefix string) map[string]time.Time
	Close() error
}
"#;

fn benchmark_tokenizer(c: &mut Criterion) {
    c.bench_function("tokenizer", |b| {
        b.iter(|| {
            let mut tokenizer = Tokenizer::new(black_box(STORE));
            black_box(tokenizer.tokenize_all())
        })
    });
}

fn benchmark_parser(c: &mut Criterion) {
    c.bench_function("parse_unit", |b| {
        b.iter(|| black_box(parse_unit("store.go", black_box(STORE))))
    });
}

fn benchmark_pipeline(c: &mut Criterion) {
    let sources = [("store.go", STORE)];

    c.bench_function("generate", |b| {
        b.iter(|| black_box(from_sources(black_box(&sources), GeneratorConfig::default())))
    });

    let renderer = Renderer::new();
    c.bench_function("generate_and_render", |b| {
        b.iter(|| {
            let output = from_sources(black_box(&sources), GeneratorConfig::default());
            black_box(output.map(|output| output.render(&renderer)))
        })
    });
}

criterion_group!(
    benches,
    benchmark_tokenizer,
    benchmark_parser,
    benchmark_pipeline
);
criterion_main!(benches);
