// Copyright 2025 The Fancy Regex Authors.
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! Recognition of regex sources that a plain string operation can replace.
//!
//! The classifiers look at the text of a pattern, not at input data. They
//! only accept runs of ASCII word and space characters, which are literals
//! in any regex, around the exact anchor and wildcard combinations below:
//!
//! | source            | shape                 |
//! |-------------------|-----------------------|
//! | `^lit` or `^lit.*`| [`Shape::StartsWith`] |
//! | `lit$` or `.*lit$`| [`Shape::EndsWith`]   |
//! | `lit` (or empty)  | [`Shape::Substring`]  |
//!
//! A source can't fit two shapes: the first needs a leading `^`, the second
//! a trailing `$`, and the third neither, and `^`/`$` are not literal
//! characters.

use std::sync::LazyLock;

use regex_automata::meta::Regex as RaRegex;

// Same characters as RE2's ASCII `\w` and `\s`.
macro_rules! literal_class {
    () => {
        r"[0-9A-Za-z_\t\n\x0C\r ]"
    };
}

/// Capture group of the starts-with classifier holding the prefix.
pub const STARTS_WITH_LITERAL_GROUP: usize = 1;
/// Capture group of the ends-with classifier holding the optional leading
/// `.*`, which is discarded.
pub const ENDS_WITH_WILDCARD_GROUP: usize = 1;
/// Capture group of the ends-with classifier holding the suffix.
pub const ENDS_WITH_LITERAL_GROUP: usize = 2;

static STARTS_WITH_SHAPE: LazyLock<RaRegex> =
    LazyLock::new(|| shape_regex(concat!(r"^\^(", literal_class!(), r"+)(?:\.\*)?$")));

static ENDS_WITH_SHAPE: LazyLock<RaRegex> =
    LazyLock::new(|| shape_regex(concat!(r"^(\.\*)?(", literal_class!(), r"+)\$$")));

static IS_SUBSTR_SHAPE: LazyLock<RaRegex> =
    LazyLock::new(|| shape_regex(concat!(r"^", literal_class!(), r"*$")));

fn shape_regex(pattern: &str) -> RaRegex {
    RaRegex::new(pattern).expect("shape classifier should compile")
}

/// A pattern recognized as equivalent to a string operation, with the
/// literal operand of that operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// `starts_with(input, prefix)`
    StartsWith(String),
    /// `ends_with(input, suffix)`
    EndsWith(String),
    /// `is_substr(input, pattern)`
    Substring(String),
}

impl Shape {
    /// Name of the function implementing this shape.
    pub fn function_name(&self) -> &'static str {
        match self {
            Shape::StartsWith(_) => crate::STARTS_WITH,
            Shape::EndsWith(_) => crate::ENDS_WITH,
            Shape::Substring(_) => crate::IS_SUBSTR,
        }
    }

    /// The literal operand.
    pub fn literal(&self) -> &str {
        match self {
            Shape::StartsWith(s) | Shape::EndsWith(s) | Shape::Substring(s) => s,
        }
    }

    pub fn into_literal(self) -> String {
        match self {
            Shape::StartsWith(s) | Shape::EndsWith(s) | Shape::Substring(s) => s,
        }
    }
}

fn capture_group(re: &RaRegex, pattern: &str, group: usize) -> Option<String> {
    let mut caps = re.create_captures();
    re.captures(pattern, &mut caps);
    if !caps.is_match() {
        return None;
    }
    caps.get_group(group)
        .map(|span| pattern[span.range()].to_string())
}

/// Classify the source of a regex, tried in the order starts-with,
/// ends-with, substring.
pub fn classify(pattern: &str) -> Option<Shape> {
    if let Some(prefix) = capture_group(&STARTS_WITH_SHAPE, pattern, STARTS_WITH_LITERAL_GROUP) {
        return Some(Shape::StartsWith(prefix));
    }
    if let Some(suffix) = capture_group(&ENDS_WITH_SHAPE, pattern, ENDS_WITH_LITERAL_GROUP) {
        return Some(Shape::EndsWith(suffix));
    }
    if IS_SUBSTR_SHAPE.is_match(pattern) {
        return Some(Shape::Substring(pattern.to_string()));
    }
    None
}
