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

//! Recursive-descent parser for Go declaration files
//!
//! The parser understands the package clause, imports and `type`
//! declarations. Interface bodies are parsed member by member; struct
//! bodies, functions, variables and constants are skipped by bracket
//! balancing so that ordinary package files can be fed in unchanged.

use super::error::{ParseError, ParseResult};
use super::lexer::TokenStream;
use super::span::{LineIndex, Spanned};
use super::tokenizer::{Token, Tokenizer};
use crate::ast::{
    DeclKind, InterfaceMember, MethodSig, Param, SourceUnit, TypeDecl, TypeRef, TypeSyntax,
};
use crate::model::ImportSpec;

/// One comma-separated entry of a parameter list before Go's naming rule
/// has been applied
#[derive(Debug)]
enum ParamEntry {
    /// Lone identifier: a type in an unnamed list, a name in a named one
    Bare(String),
    /// `name Type`
    Named(String, TypeSyntax),
    /// A type that cannot be a name
    Type(TypeSyntax),
}

/// Declaration parser over a token stream
pub struct DeclParser<'input> {
    source: &'input str,
    tokens: TokenStream<'input>,
    lines: LineIndex,
}

impl<'input> DeclParser<'input> {
    /// Tokenize a source text and create a parser for it
    pub fn new(source: &'input str) -> ParseResult<Self> {
        let tokens = Tokenizer::new(source).tokenize_all()?;
        Ok(Self {
            source,
            tokens: TokenStream::new(tokens, source.len()),
            lines: LineIndex::new(source),
        })
    }

    /// Parse a whole file
    pub fn parse_source_unit(&mut self, name: &str) -> ParseResult<SourceUnit> {
        self.skip_semicolons();
        self.tokens.expect(Token::Package)?;
        let package = self.tokens.expect_identifier()?.value;
        self.expect_terminator()?;

        let mut unit = SourceUnit::new(name, package);

        loop {
            self.skip_semicolons();
            if !self.tokens.check(Token::Import) {
                break;
            }
            self.parse_import_decl(&mut unit.imports)?;
        }

        while let Some(token) = self.tokens.peek() {
            match token.value {
                Token::Semicolon => {
                    self.tokens.next();
                }
                Token::Type => self.parse_type_decl(&mut unit.decls)?,
                Token::Func | Token::Var | Token::Const => {
                    self.tokens.next();
                    self.tokens.skip_balanced()?;
                    self.expect_terminator()?;
                }
                other => {
                    return Err(ParseError::UnexpectedToken {
                        token: other.to_string(),
                        position: token.start,
                    });
                }
            }
        }

        Ok(unit)
    }

    fn skip_semicolons(&mut self) {
        while self.tokens.eat(Token::Semicolon) {}
    }

    /// Accept the end of a declaration: a `;`, a closing `)` or `}` left for
    /// the enclosing group, or the end of input
    fn expect_terminator(&mut self) -> ParseResult<()> {
        if self.tokens.eat(Token::Semicolon)
            || self.tokens.is_eof()
            || self.tokens.check(Token::RightParen)
            || self.tokens.check(Token::RightBrace)
        {
            return Ok(());
        }
        Err(self.tokens.error_expected("';' or newline"))
    }

    /// Parse `fn` once, or once per entry of a parenthesized group
    fn parse_grouped<T>(
        &mut self,
        out: &mut Vec<T>,
        mut parse: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<()> {
        if !self.tokens.eat(Token::LeftParen) {
            out.push(parse(self)?);
            return self.expect_terminator();
        }
        loop {
            self.skip_semicolons();
            if self.tokens.eat(Token::RightParen) {
                break;
            }
            out.push(parse(self)?);
            self.expect_terminator()?;
            if self.tokens.is_eof() {
                return Err(self.tokens.error_expected("')'"));
            }
        }
        self.expect_terminator()
    }

    fn parse_import_decl(&mut self, imports: &mut Vec<ImportSpec>) -> ParseResult<()> {
        self.tokens.expect(Token::Import)?;
        self.parse_grouped(imports, Self::parse_import_spec)
    }

    fn parse_import_spec(&mut self) -> ParseResult<ImportSpec> {
        let alias = match self.tokens.peek().map(|t| t.value) {
            Some(Token::Identifier(alias)) => {
                self.tokens.next();
                Some(alias.to_string())
            }
            Some(Token::Dot) => {
                self.tokens.next();
                Some(".".to_string())
            }
            _ => None,
        };
        let path = match self.tokens.peek().map(|t| t.value) {
            Some(Token::String(path)) => {
                self.tokens.next();
                path
            }
            _ => return Err(self.tokens.error_expected("import path")),
        };
        Ok(match alias {
            Some(alias) => ImportSpec::aliased(alias, path),
            None => ImportSpec::new(path),
        })
    }

    fn parse_type_decl(&mut self, decls: &mut Vec<TypeDecl>) -> ParseResult<()> {
        self.tokens.expect(Token::Type)?;
        self.parse_grouped(decls, Self::parse_type_spec)
    }

    fn parse_type_spec(&mut self) -> ParseResult<TypeDecl> {
        let name = self.tokens.expect_identifier()?;
        let position = self.lines.position(name.start);

        let generic = self.tokens.check(Token::LeftBracket)
            && matches!(self.tokens.peek_ahead(1), Some(Token::Identifier(_)))
            && !matches!(self.tokens.peek_ahead(2), Some(Token::RightBracket));
        if generic {
            self.skip_group()?;
        }

        self.tokens.eat(Token::Assign);

        let kind = match self.tokens.peek().map(|t| t.value) {
            Some(Token::Interface) if generic => {
                self.tokens.next();
                self.skip_group()?;
                DeclKind::Unsupported {
                    construct: "generic interface".to_string(),
                }
            }
            Some(Token::Interface) => self.parse_interface_body()?,
            Some(Token::Struct) => {
                self.tokens.next();
                self.skip_group()?;
                DeclKind::Struct
            }
            Some(_) => {
                self.tokens.skip_balanced()?;
                DeclKind::Other
            }
            None => return Err(self.tokens.error_expected("type")),
        };

        Ok(TypeDecl::other(name.value, kind).at(position))
    }

    /// Consume an opening bracket and everything through its matching close
    fn skip_group(&mut self) -> ParseResult<()> {
        let close = match self.tokens.next().map(|t| t.value) {
            Some(Token::LeftParen) => Token::RightParen,
            Some(Token::LeftBracket) => Token::RightBracket,
            Some(Token::LeftBrace) => Token::RightBrace,
            _ => return Err(self.tokens.error_expected("opening bracket")),
        };
        self.tokens.skip_balanced()?;
        // A `;` at depth zero inside braces separates fields; keep going
        while self.tokens.eat(Token::Semicolon) {
            self.tokens.skip_balanced()?;
        }
        self.tokens.expect(close)?;
        Ok(())
    }

    /// Parse an interface body. A body holding type-set elements or generic
    /// embeddings is skipped and reported as unsupported.
    fn parse_interface_body(&mut self) -> ParseResult<DeclKind> {
        self.tokens.expect(Token::Interface)?;
        self.tokens.expect(Token::LeftBrace)?;

        let mut members = Vec::new();
        loop {
            self.skip_semicolons();
            if self.tokens.eat(Token::RightBrace) {
                break;
            }
            if let Some(construct) = self.type_set_element() {
                self.skip_rest_of_body()?;
                return Ok(DeclKind::Unsupported {
                    construct: construct.to_string(),
                });
            }
            members.push(self.parse_interface_member()?);
            if !self.tokens.eat(Token::Semicolon) && !self.tokens.check(Token::RightBrace) {
                return Err(self.tokens.error_expected("';' or '}'"));
            }
        }
        Ok(DeclKind::Interface(members))
    }

    /// Classify a member that makes the interface a type set rather than a
    /// method set
    fn type_set_element(&self) -> Option<&'static str> {
        let first = self.tokens.peek().map(|t| t.value)?;
        let Token::Identifier(_) = first else {
            return match first {
                Token::Tilde
                | Token::Star
                | Token::LeftBracket
                | Token::Map
                | Token::Chan
                | Token::Func
                | Token::Struct
                | Token::Interface => Some("type constraint"),
                _ => None,
            };
        };

        let after_name = match self.tokens.peek_ahead(1) {
            Some(Token::Dot) => self.tokens.peek_ahead(3),
            other => other,
        };
        match after_name {
            Some(Token::Pipe) => Some("type constraint"),
            Some(Token::LeftBracket) => Some("generic embedding"),
            _ => None,
        }
    }

    /// Skip the remaining members of an interface body and its closing brace
    fn skip_rest_of_body(&mut self) -> ParseResult<()> {
        self.tokens.skip_balanced()?;
        while self.tokens.eat(Token::Semicolon) {
            self.tokens.skip_balanced()?;
        }
        self.tokens.expect(Token::RightBrace)?;
        Ok(())
    }

    fn parse_interface_member(&mut self) -> ParseResult<InterfaceMember> {
        let start = self.tokens.offset();
        if self.tokens.peek_ahead(1) == Some(Token::LeftParen) {
            return self.parse_method().map(InterfaceMember::Method);
        }

        let first = self.tokens.expect_identifier()?;
        let mut reference = TypeRef::local(first.value);
        if self.tokens.eat(Token::Dot) {
            let name = self.tokens.expect_identifier()?;
            reference = TypeRef::qualified(first.value, name.value);
        }
        reference.position = self.lines.position(start);
        Ok(InterfaceMember::Embedded(reference))
    }

    fn parse_method(&mut self) -> ParseResult<MethodSig> {
        let name = self.tokens.expect_identifier()?;
        let params = self.parse_parameters(true)?;

        let results = match self.tokens.peek().map(|t| t.value) {
            Some(Token::LeftParen) => self.parse_parameters(false)?,
            Some(Token::Semicolon | Token::RightBrace) | None => Vec::new(),
            Some(_) => vec![Param::unnamed(self.parse_type()?)],
        };

        let mut method = MethodSig::new(name.value, params, results);
        method.position = self.lines.position(name.start);
        Ok(method)
    }

    /// Parse a parenthesized parameter or result list
    fn parse_parameters(&mut self, variadic_allowed: bool) -> ParseResult<Vec<Param>> {
        self.tokens.expect(Token::LeftParen)?;

        let mut entries = Vec::new();
        while !self.tokens.check(Token::RightParen) {
            entries.push(self.parse_param_entry()?);
            if !self.tokens.eat(Token::Comma) {
                break;
            }
        }
        self.tokens.expect(Token::RightParen)?;

        let params = Self::apply_naming_rule(entries)?;

        let last = params.len().saturating_sub(1);
        for (index, (param, position)) in params.iter().enumerate() {
            if param.ty.is_variadic() && (!variadic_allowed || index != last) {
                return Err(ParseError::UnexpectedToken {
                    token: "'...' outside the final parameter".to_string(),
                    position: *position,
                });
            }
        }

        Ok(params.into_iter().map(|(param, _)| param).collect())
    }

    fn parse_param_entry(&mut self) -> ParseResult<Spanned<ParamEntry>> {
        let start = self.tokens.offset();
        let entry = match (self.tokens.peek().map(|t| t.value), self.tokens.peek_ahead(1)) {
            (Some(Token::Identifier(name)), Some(Token::Comma | Token::RightParen)) => {
                self.tokens.next();
                ParamEntry::Bare(name.to_string())
            }
            (Some(Token::Identifier(_)), Some(Token::Dot)) => ParamEntry::Type(self.parse_type()?),
            (Some(Token::Identifier(name)), _) => {
                self.tokens.next();
                ParamEntry::Named(name.to_string(), self.parse_parameter_type()?)
            }
            _ => ParamEntry::Type(self.parse_parameter_type()?),
        };
        Ok(Spanned::new(entry, start, self.tokens.offset()))
    }

    /// Apply Go's rule: if any entry is `name Type`, every entry is named and
    /// lone identifiers share the type of the next named entry
    fn apply_naming_rule(
        entries: Vec<Spanned<ParamEntry>>,
    ) -> ParseResult<Vec<(Param, usize)>> {
        fn name_of(name: String) -> Option<String> {
            (name != "_").then_some(name)
        }

        let named = entries
            .iter()
            .any(|entry| matches!(entry.value, ParamEntry::Named(..)));

        if !named {
            return Ok(entries
                .into_iter()
                .map(|entry| {
                    let ty = match entry.value {
                        ParamEntry::Bare(name) => TypeSyntax::name(name),
                        ParamEntry::Type(ty) | ParamEntry::Named(_, ty) => ty,
                    };
                    (Param::unnamed(ty), entry.start)
                })
                .collect());
        }

        let mut params = Vec::with_capacity(entries.len());
        let mut pending: Vec<(String, usize)> = Vec::new();
        for entry in entries {
            match entry.value {
                ParamEntry::Bare(name) => pending.push((name, entry.start)),
                ParamEntry::Named(name, ty) => {
                    for (pending_name, start) in pending.drain(..) {
                        params.push((
                            Param {
                                name: name_of(pending_name),
                                ty: ty.clone(),
                            },
                            start,
                        ));
                    }
                    params.push((
                        Param {
                            name: name_of(name),
                            ty,
                        },
                        entry.start,
                    ));
                }
                ParamEntry::Type(ty) => {
                    return Err(ParseError::ExpectedToken {
                        expected: "parameter name".to_string(),
                        found: format!("type {ty}"),
                        position: entry.start,
                    });
                }
            }
        }

        if let Some((name, start)) = pending.into_iter().next() {
            return Err(ParseError::ExpectedToken {
                expected: "parameter type".to_string(),
                found: format!("identifier '{name}'"),
                position: start,
            });
        }

        Ok(params)
    }

    /// Parse a parameter type, which may be variadic
    fn parse_parameter_type(&mut self) -> ParseResult<TypeSyntax> {
        if self.tokens.eat(Token::Ellipsis) {
            return Ok(TypeSyntax::variadic(self.parse_type()?));
        }
        self.parse_type()
    }

    /// Wrap everything consumed since `start` as an unsupported type
    fn unsupported_since(&self, start: usize, construct: &str) -> TypeSyntax {
        let text = self.source[start..self.tokens.offset()].trim();
        TypeSyntax::unsupported(construct, text)
    }

    /// Skip a channel direction arrow (`<-`)
    fn skip_arrow(&mut self) {
        while self
            .tokens
            .consume_if(|token| matches!(token, Token::Operator("<" | "-")))
            .is_some()
        {}
    }

    /// Check whether the current token can begin a type
    fn at_type_start(&self) -> bool {
        matches!(
            self.tokens.peek().map(|t| t.value),
            Some(
                Token::Identifier(_)
                    | Token::Star
                    | Token::LeftBracket
                    | Token::LeftParen
                    | Token::Map
                    | Token::Func
                    | Token::Chan
                    | Token::Interface
                    | Token::Struct
                    | Token::Operator("<")
            )
        )
    }

    /// Parse a type in a signature.
    ///
    /// Valid types outside the supported shapes are consumed whole and
    /// returned as [`TypeSyntax::Unsupported`], so only the contracts that
    /// use them are affected.
    fn parse_type(&mut self) -> ParseResult<TypeSyntax> {
        let start = self.tokens.offset();
        let Some(token) = self.tokens.peek().map(|t| t.value) else {
            return Err(self.tokens.error_expected("type"));
        };

        match token {
            Token::Identifier(name) => {
                self.tokens.next();
                let ty = if self.tokens.eat(Token::Dot) {
                    TypeSyntax::qualified(name, self.tokens.expect_identifier()?.value)
                } else {
                    TypeSyntax::name(name)
                };
                if self.tokens.check(Token::LeftBracket) {
                    self.skip_group()?;
                    return Ok(self.unsupported_since(start, "generic type instantiation"));
                }
                Ok(ty)
            }
            Token::LeftBracket => {
                self.tokens.next();
                if self.tokens.eat(Token::RightBracket) {
                    return Ok(TypeSyntax::slice(self.parse_type()?));
                }
                let len_start = self.tokens.offset();
                self.tokens.skip_balanced()?;
                let len = self.source[len_start..self.tokens.offset()].trim().to_string();
                self.tokens.expect(Token::RightBracket)?;
                Ok(TypeSyntax::Array {
                    len,
                    element: Box::new(self.parse_type()?),
                })
            }
            Token::Star => {
                self.tokens.next();
                Ok(TypeSyntax::pointer(self.parse_type()?))
            }
            Token::Map => {
                self.tokens.next();
                self.tokens.expect(Token::LeftBracket)?;
                let key = self.parse_type()?;
                self.tokens.expect(Token::RightBracket)?;
                Ok(TypeSyntax::map(key, self.parse_type()?))
            }
            Token::LeftParen => {
                self.tokens.next();
                let ty = self.parse_type()?;
                self.tokens.expect(Token::RightParen)?;
                Ok(ty)
            }
            Token::Interface | Token::Struct => {
                let keyword = if token == Token::Interface {
                    "interface"
                } else {
                    "struct"
                };
                self.tokens.next();
                if self.tokens.check(Token::LeftBrace)
                    && self.tokens.peek_ahead(1) == Some(Token::RightBrace)
                {
                    self.tokens.next();
                    self.tokens.next();
                    return Ok(TypeSyntax::name(format!("{keyword}{{}}")));
                }
                self.skip_group()?;
                Ok(self.unsupported_since(start, &format!("inline {keyword} type")))
            }
            Token::Func => {
                self.tokens.next();
                self.skip_group()?;
                if self.tokens.check(Token::LeftParen) {
                    self.skip_group()?;
                } else if self.at_type_start() {
                    self.parse_type()?;
                }
                Ok(self.unsupported_since(start, "function type"))
            }
            Token::Chan | Token::Operator("<") => {
                self.skip_arrow();
                self.tokens.expect(Token::Chan)?;
                self.skip_arrow();
                self.parse_type()?;
                Ok(self.unsupported_since(start, "channel type"))
            }
            _ => Err(self.tokens.error_expected("type")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> ParseResult<SourceUnit> {
        DeclParser::new(source)?.parse_source_unit("test.go")
    }

    fn method(source: &str) -> ParseResult<MethodSig> {
        let unit = parse(&format!("package a\ntype T interface {{\n{source}\n}}\n"))?;
        match &unit.decls[0].kind {
            DeclKind::Interface(members) => match &members[0] {
                InterfaceMember::Method(method) => Ok(method.clone()),
                other => panic!("expected method, got {other:?}"),
            },
            other => panic!("expected interface, got {other:?}"),
        }
    }

    fn int() -> TypeSyntax {
        TypeSyntax::name("int")
    }

    #[test]
    fn test_named_parameter_groups() {
        let sig = method("Run(a, b int, s ...string) (d time.Duration, err error)").unwrap();
        assert_eq!(
            sig.params,
            vec![
                Param::named("a", int()),
                Param::named("b", int()),
                Param::named("s", TypeSyntax::variadic(TypeSyntax::name("string"))),
            ]
        );
        assert_eq!(
            sig.results,
            vec![
                Param::named("d", TypeSyntax::qualified("time", "Duration")),
                Param::named("err", TypeSyntax::name("error")),
            ]
        );
    }

    #[test]
    fn test_unnamed_parameters() {
        let sig = method("Do(string, []byte, map[string]*bytes.Buffer) error").unwrap();
        assert_eq!(
            sig.params,
            vec![
                Param::unnamed(TypeSyntax::name("string")),
                Param::unnamed(TypeSyntax::slice(TypeSyntax::name("byte"))),
                Param::unnamed(TypeSyntax::map(
                    TypeSyntax::name("string"),
                    TypeSyntax::pointer(TypeSyntax::qualified("bytes", "Buffer")),
                )),
            ]
        );
        assert_eq!(sig.results, vec![Param::unnamed(TypeSyntax::name("error"))]);
    }

    #[test]
    fn test_blank_names_are_unnamed() {
        let sig = method("Put(_ string, v [4]int)").unwrap();
        assert_eq!(sig.params[0], Param::unnamed(TypeSyntax::name("string")));
        assert_eq!(
            sig.params[1],
            Param::named(
                "v",
                TypeSyntax::Array {
                    len: "4".to_string(),
                    element: Box::new(int()),
                }
            )
        );
        assert!(sig.results.is_empty());
    }

    #[test]
    fn test_empty_interface_parameter() {
        let sig = method("Encode(v interface{}) ([]byte, error)").unwrap();
        assert_eq!(sig.params[0], Param::named("v", TypeSyntax::name("interface{}")));
    }

    #[test]
    fn test_mixed_parameters_rejected() {
        assert!(matches!(
            method("Run(a int, string)"),
            Err(ParseError::ExpectedToken { .. })
        ));
        assert!(matches!(
            method("Run(s ...string, d int)"),
            Err(ParseError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn test_unsupported_types_are_kept_opaque() {
        let sig = method("Watch(fn func(string) error, n int)").unwrap();
        assert_eq!(
            sig.params,
            vec![
                Param::named(
                    "fn",
                    TypeSyntax::unsupported("function type", "func(string) error")
                ),
                Param::named("n", int()),
            ]
        );

        for (source, construct, text) in [
            ("Listen() <-chan int", "channel type", "<-chan int"),
            ("Send(chan<- string)", "channel type", "chan<- string"),
            ("Opts(o struct{ A int })", "inline struct type", "struct{ A int }"),
            ("Get() List[int]", "generic type instantiation", "List[int]"),
            ("Hook() func()", "function type", "func()"),
        ] {
            let sig = method(source).unwrap();
            let ty = &sig.params.iter().chain(&sig.results).next().unwrap().ty;
            assert_eq!(ty, &TypeSyntax::unsupported(construct, text), "{source}");
        }
    }

    #[test]
    fn test_unit_structure() {
        let source = r#"// Package a does things.
package a

import (
	"time"
	b "bytes"
)

import "net/http"

const Limit = 10

var (
	x = map[string]int{"a": 1}
)

type (
	Base interface {
		Close() error
	}
	Config struct {
		Name string
		Deps []Base
	}
	ID int
)

type Runner interface {
	Base
	http.Handler
	Run(distance int) time.Duration
}

func (c Config) Validate() error {
	if c.Name == "" {
		return nil
	}
	return nil
}
"#;
        let unit = parse(source).unwrap();
        assert_eq!(unit.package, "a");
        assert_eq!(
            unit.imports,
            vec![
                ImportSpec::new("time"),
                ImportSpec::aliased("b", "bytes"),
                ImportSpec::new("net/http"),
            ]
        );
        let names: Vec<_> = unit.decls.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Base", "Config", "ID", "Runner"]);
        assert_eq!(unit.decls[1].kind, DeclKind::Struct);
        assert_eq!(unit.decls[2].kind, DeclKind::Other);

        let runner = unit.decl("Runner").unwrap();
        assert_eq!(runner.position.to_display(), (28, 6));
        let members = runner.members().unwrap();
        assert_eq!(members.len(), 3);
        assert!(matches!(&members[0], InterfaceMember::Embedded(r) if r.to_string() == "Base"));
        assert!(
            matches!(&members[1], InterfaceMember::Embedded(r) if r.to_string() == "http.Handler")
        );
    }

    #[test]
    fn test_generic_declarations() {
        let unit = parse("package a\ntype Set[T comparable] map[T]struct{}\n").unwrap();
        assert_eq!(unit.decls[0].kind, DeclKind::Other);

        let source = r#"package a

type Getter[T any] interface {
	Get() T
}

type Number interface {
	~int | ~float64
}

type Stringish interface {
	fmt.Stringer | ~string
	Len() int
}

type Lister interface {
	Base[int]
}

type Closer interface {
	Close() error
}
"#;
        let unit = parse(source).unwrap();
        let kinds: Vec<(&str, &DeclKind)> = unit
            .decls
            .iter()
            .map(|decl| (decl.name.as_str(), &decl.kind))
            .collect();
        let unsupported = |construct: &str| DeclKind::Unsupported {
            construct: construct.to_string(),
        };
        assert_eq!(kinds[0], ("Getter", &unsupported("generic interface")));
        assert_eq!(kinds[1], ("Number", &unsupported("type constraint")));
        assert_eq!(kinds[2], ("Stringish", &unsupported("type constraint")));
        assert_eq!(kinds[3], ("Lister", &unsupported("generic embedding")));
        assert_eq!(unit.decls[4].members().map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_missing_package_clause() {
        assert!(matches!(
            parse("type A interface{}"),
            Err(ParseError::ExpectedToken { .. })
        ));
    }
}
