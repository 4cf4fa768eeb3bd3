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

//! Test fake generation for Go interfaces
//!
//! Reads Go interface declarations and synthesizes thread-safe, inspectable
//! fakes for them: every call is recorded, results can be configured for all
//! calls or per call, and arguments can be read back.
//!
//! ```
//! use fakegen::{GeneratorConfig, from_sources, render_file};
//!
//! let source = "package clock\n\ntype Clock interface {\n\tNow() int64\n}\n";
//! let output = from_sources(&[("clock.go", source)], GeneratorConfig::default()).unwrap();
//! let text = render_file(&output.files[0]);
//! assert!(text.contains("func (fake *Clock) Now() (int64Result int64) {"));
//! ```

// Syntax and parsing
pub mod ast;
pub mod parser;

// Contract model and generation stages
pub mod extractor;
pub mod model;
pub mod naming;
pub mod resolver;
pub mod synth;

// Output
pub mod render;

// Run plumbing
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod pipeline;

pub use config::{DEFAULT_PACKAGE, GeneratorConfig};
pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticReport, Severity};
pub use error::{FakegenError, Result};
pub use extractor::{Package, extract};
pub use model::{Contract, ImportSpec, Method, Role, TypeExpr, Value, ValueName};
pub use parser::{ParseError, parse_unit};
pub use pipeline::{GeneratedFile, GenerationContext, GenerationOutput, from_sources, generate};
pub use render::{Renderer, render_file};
pub use resolver::resolve_contract;
pub use synth::{Decl, synthesize};
