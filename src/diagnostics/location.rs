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

//! Source location tracking for diagnostics

use serde::Serialize;
use std::fmt;

/// A position in source text (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number (0-indexed, in UTF-8 bytes)
    pub column: usize,
}

impl Position {
    /// Create a new position
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Create a position from a byte offset in the source text
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let mut line = 0;
        let mut column = 0;

        for (current_offset, ch) in source.char_indices() {
            if current_offset >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 0;
            } else {
                column += ch.len_utf8();
            }
        }

        Self { line, column }
    }

    /// Convert to 1-indexed position for display
    pub fn to_display(&self) -> (usize, usize) {
        (self.line + 1, self.column + 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (line, col) = self.to_display();
        write!(f, "{line}:{col}")
    }
}

/// Source location information
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SourceLocation {
    /// Position of the offending construct
    pub position: Position,
    /// Declaration file or unit name (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// The source line at this location (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_line: Option<String>,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(position: Position) -> Self {
        Self {
            position,
            file_path: None,
            source_line: None,
        }
    }

    /// Create with file path
    pub fn with_file(position: Position, file_path: impl Into<String>) -> Self {
        Self {
            position,
            file_path: Some(file_path.into()),
            source_line: None,
        }
    }

    /// Attach the source line the position points into
    pub fn with_source_line(mut self, source: &str) -> Self {
        self.source_line = source.lines().nth(self.position.line).map(str::to_string);
        self
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file_path {
            Some(path) => write!(f, "{path}:{}", self.position),
            None => write!(f, "{}", self.position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_from_offset() {
        let source = "package a\n\ntype B interface{}";
        assert_eq!(Position::from_offset(source, 0), Position::new(0, 0));
        assert_eq!(Position::from_offset(source, 8), Position::new(0, 8));
        assert_eq!(Position::from_offset(source, 11), Position::new(2, 0));
        assert_eq!(Position::from_offset(source, 16), Position::new(2, 5));
    }

    #[test]
    fn test_location_display() {
        let location = SourceLocation::with_file(Position::new(2, 5), "runner.go");
        assert_eq!(location.to_string(), "runner.go:3:6");
        assert_eq!(SourceLocation::new(Position::new(0, 0)).to_string(), "1:1");
    }

    #[test]
    fn test_source_line() {
        let source = "package a\ntype B interface{}";
        let location = SourceLocation::new(Position::new(1, 5)).with_source_line(source);
        assert_eq!(location.source_line.as_deref(), Some("type B interface{}"));
    }
}
