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

//! Compiled patterns taken from the literal argument of a matching function.

use std::fmt;

use regex_automata::meta::Regex as RaRegex;
use regex_automata::util::syntax;

use crate::error::{ArgumentError, Error, PatternError, Result};
use crate::expr::{DataType, FunctionNode, LiteralValue};
use crate::like::{sql_like_to_regex, DEFAULT_ESCAPE, MAX_LIKE_PATTERN_LEN};

const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);

/// A compiled pattern together with the source it was compiled from.
///
/// Holders built from SQL LIKE patterns have the same type; only their
/// source differs, being the translated regex rather than the LIKE string.
///
/// A holder is immutable and cheap to clone, and can be shared between
/// threads evaluating different batches.
#[derive(Clone)]
pub struct PatternHolder {
    pattern: String,
    regex: RaRegex,
}

impl fmt::Debug for PatternHolder {
    /// Shows the pattern source.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

impl PatternHolder {
    /// Compile a regex pattern with default options.
    pub fn new(pattern: &str) -> Result<PatternHolder> {
        HolderBuilder::new().build(pattern)
    }

    /// Compile the regex held by the second argument of `node`.
    pub fn from_node(node: &FunctionNode) -> Result<PatternHolder> {
        HolderBuilder::new().build_from_node(node)
    }

    /// Translate a SQL LIKE pattern and compile it, using `\` as escape.
    pub fn from_sql_like(sql_pattern: &str) -> Result<PatternHolder> {
        HolderBuilder::new().build_sql_like(sql_pattern)
    }

    /// Translate and compile the LIKE pattern held by the second argument
    /// of `node`.
    pub fn from_sql_like_node(node: &FunctionNode) -> Result<PatternHolder> {
        HolderBuilder::new().build_sql_like_from_node(node)
    }

    /// Check that `node` has exactly two arguments, the second of them a
    /// string or binary literal.
    pub fn validate_arguments(node: &FunctionNode) -> Result<()> {
        let children = node.children();
        if children.len() != 2 {
            return Err(Error::invalid_argument(
                node.name(),
                ArgumentError::WrongArity(children.len()),
            ));
        }
        let literal = match children[1].as_literal() {
            Some(literal) => literal,
            None => {
                return Err(Error::invalid_argument(
                    node.name(),
                    ArgumentError::NotLiteral,
                ))
            }
        };
        if !literal.return_type().is_string_like() {
            return Err(Error::invalid_argument(
                node.name(),
                ArgumentError::NotString(literal.return_type()),
            ));
        }
        Ok(())
    }

    /// Returns the pattern literal of `node` verbatim.
    pub fn extract_pattern(node: &FunctionNode) -> Result<String> {
        Self::validate_arguments(node)?;
        let literal = node.children()[1]
            .as_literal()
            .ok_or_else(|| Error::invalid_argument(node.name(), ArgumentError::NotLiteral))?;
        match (literal.return_type(), literal.value()) {
            (DataType::Utf8, LiteralValue::Utf8(s)) => Ok(s.clone()),
            (DataType::Binary, LiteralValue::Binary(bytes)) => String::from_utf8(bytes.clone())
                .map_err(|_| Error::invalid_argument(node.name(), ArgumentError::NonUtf8Literal)),
            (_, LiteralValue::Null) => Err(Error::invalid_argument(
                node.name(),
                ArgumentError::NullLiteral,
            )),
            _ => Err(Error::invalid_argument(
                node.name(),
                ArgumentError::PayloadMismatch,
            )),
        }
    }

    /// Returns the source of the compiled pattern.
    ///
    /// For holders built from LIKE patterns this is the translated regex.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Return true if the pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Configuration for building a [`PatternHolder`].
///
/// # Examples
///
/// ```
/// use pattern_shortcut::HolderBuilder;
///
/// let holder = HolderBuilder::new()
///     .like_escape(Some('#'))
///     .build_sql_like("100#%%")
///     .unwrap();
/// assert!(holder.is_match("100% sure"));
/// assert!(!holder.is_match("1000"));
/// ```
#[derive(Debug, Clone)]
pub struct HolderBuilder {
    dot_matches_new_line: bool,
    size_limit: usize,
    like_escape: Option<char>,
}

impl Default for HolderBuilder {
    fn default() -> Self {
        HolderBuilder {
            dot_matches_new_line: false,
            size_limit: DEFAULT_SIZE_LIMIT,
            like_escape: Some(DEFAULT_ESCAPE),
        }
    }
}

impl HolderBuilder {
    pub fn new() -> HolderBuilder {
        HolderBuilder::default()
    }

    /// Let `.` in regex patterns match `\n`.
    ///
    /// LIKE patterns ignore this and always let their wildcards match `\n`.
    pub fn dot_matches_new_line(&mut self, yes: bool) -> &mut Self {
        self.dot_matches_new_line = yes;
        self
    }

    /// Approximate size limit, in bytes, of the compiled pattern.
    pub fn size_limit(&mut self, limit: usize) -> &mut Self {
        self.size_limit = limit;
        self
    }

    /// Escape character for LIKE patterns; `None` disables escaping.
    pub fn like_escape(&mut self, escape: Option<char>) -> &mut Self {
        self.like_escape = escape;
        self
    }

    /// Compile a regex pattern.
    pub fn build(&self, pattern: &str) -> Result<PatternHolder> {
        self.compile(pattern, self.dot_matches_new_line)
    }

    /// Compile the regex held by the second argument of `node`.
    pub fn build_from_node(&self, node: &FunctionNode) -> Result<PatternHolder> {
        let pattern = PatternHolder::extract_pattern(node)?;
        self.build(&pattern)
    }

    /// Translate a SQL LIKE pattern to a regex and compile it.
    pub fn build_sql_like(&self, sql_pattern: &str) -> Result<PatternHolder> {
        if sql_pattern.len() > MAX_LIKE_PATTERN_LEN {
            return Err(Error::invalid_pattern(
                sql_pattern,
                PatternError::TooLong(sql_pattern.len()),
            ));
        }
        let pattern = sql_like_to_regex(sql_pattern, self.like_escape)?;
        self.compile(&pattern, true)
    }

    /// Translate and compile the LIKE pattern held by the second argument
    /// of `node`.
    pub fn build_sql_like_from_node(&self, node: &FunctionNode) -> Result<PatternHolder> {
        let pattern = PatternHolder::extract_pattern(node)?;
        self.build_sql_like(&pattern)
    }

    fn compile(&self, pattern: &str, dot_matches_new_line: bool) -> Result<PatternHolder> {
        let regex = RaRegex::builder()
            .syntax(syntax::Config::new().dot_matches_new_line(dot_matches_new_line))
            .configure(RaRegex::config().nfa_size_limit(Some(self.size_limit)))
            .build(pattern)
            .map_err(|e| Error::invalid_pattern(pattern, PatternError::Regex(e)))?;
        Ok(PatternHolder {
            pattern: pattern.to_string(),
            regex,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use matches::assert_matches;

    use super::*;
    use crate::expr::{FieldNode, LiteralNode, Node, NodeRef};

    fn field() -> NodeRef {
        Arc::new(FieldNode::new("in", DataType::Utf8).into())
    }

    fn regexp_matches(children: Vec<NodeRef>) -> FunctionNode {
        FunctionNode::new("regexp_matches", children, DataType::Boolean)
    }

    fn literal(data_type: DataType, value: LiteralValue) -> NodeRef {
        Arc::new(Node::Literal(LiteralNode::new(data_type, value)))
    }

    #[test]
    fn extract_string_literal_verbatim() {
        let node = regexp_matches(vec![field(), Arc::new(LiteralNode::utf8("^a.*b$").into())]);
        assert_eq!(PatternHolder::extract_pattern(&node).unwrap(), "^a.*b$");
    }

    #[test]
    fn extract_binary_literal() {
        let node = regexp_matches(vec![
            field(),
            literal(DataType::Binary, LiteralValue::Binary(b"xy z".to_vec())),
        ]);
        assert_eq!(PatternHolder::extract_pattern(&node).unwrap(), "xy z");
    }

    #[test]
    fn wrong_arity() {
        for n in [0, 1, 3] {
            let children = (0..n).map(|_| field()).collect();
            let node = regexp_matches(children);
            assert_matches!(
                PatternHolder::validate_arguments(&node),
                Err(Error::InvalidArgument { reason: ArgumentError::WrongArity(m), .. }) if m == n
            );
        }
    }

    #[test]
    fn second_argument_not_literal() {
        let node = regexp_matches(vec![field(), field()]);
        assert_matches!(
            PatternHolder::validate_arguments(&node),
            Err(Error::InvalidArgument { reason: ArgumentError::NotLiteral, .. })
        );
    }

    #[test]
    fn second_argument_not_string() {
        let node = regexp_matches(vec![field(), literal(DataType::Int32, LiteralValue::Int32(1))]);
        assert_matches!(
            PatternHolder::validate_arguments(&node),
            Err(Error::InvalidArgument {
                reason: ArgumentError::NotString(DataType::Int32),
                ..
            })
        );
    }

    #[test]
    fn null_and_mismatched_literals() {
        let node = regexp_matches(vec![field(), literal(DataType::Utf8, LiteralValue::Null)]);
        assert_matches!(
            PatternHolder::extract_pattern(&node),
            Err(Error::InvalidArgument { reason: ArgumentError::NullLiteral, .. })
        );

        let node = regexp_matches(vec![field(), literal(DataType::Utf8, LiteralValue::Int64(3))]);
        assert_matches!(
            PatternHolder::extract_pattern(&node),
            Err(Error::InvalidArgument { reason: ArgumentError::PayloadMismatch, .. })
        );

        let node = regexp_matches(vec![
            field(),
            literal(DataType::Binary, LiteralValue::Binary(vec![0xff, 0xfe])),
        ]);
        assert_matches!(
            PatternHolder::extract_pattern(&node),
            Err(Error::InvalidArgument { reason: ArgumentError::NonUtf8Literal, .. })
        );
    }

    #[test]
    fn payload_disagrees_with_declared_type() {
        let node = regexp_matches(vec![
            field(),
            literal(DataType::Utf8, LiteralValue::Binary(b"abc".to_vec())),
        ]);
        assert_matches!(
            PatternHolder::extract_pattern(&node),
            Err(Error::InvalidArgument { reason: ArgumentError::PayloadMismatch, .. })
        );

        let node = regexp_matches(vec![
            field(),
            literal(DataType::Binary, LiteralValue::Utf8("abc".to_string())),
        ]);
        assert_matches!(
            PatternHolder::extract_pattern(&node),
            Err(Error::InvalidArgument { reason: ArgumentError::PayloadMismatch, .. })
        );
    }

    #[test]
    fn from_node_propagates_argument_error() {
        let node = regexp_matches(vec![field()]);
        assert_matches!(
            PatternHolder::from_node(&node),
            Err(Error::InvalidArgument { reason: ArgumentError::WrongArity(1), .. })
        );
        assert_matches!(
            PatternHolder::from_sql_like_node(&node),
            Err(Error::InvalidArgument { reason: ArgumentError::WrongArity(1), .. })
        );
    }

    #[test]
    fn from_node_propagates_pattern_error() {
        let node = regexp_matches(vec![field(), Arc::new(LiteralNode::utf8("a(b").into())]);
        assert_matches!(
            PatternHolder::from_node(&node),
            Err(Error::InvalidPattern { ref pattern, reason: PatternError::Regex(_) }) if pattern == "a(b"
        );

        let node = FunctionNode::new(
            "like",
            vec![field(), Arc::new(LiteralNode::utf8("ab\\").into())],
            DataType::Boolean,
        );
        assert_matches!(
            PatternHolder::from_sql_like_node(&node),
            Err(Error::InvalidPattern { reason: PatternError::TrailingEscape, .. })
        );
    }

    #[test]
    fn from_node() {
        let node = regexp_matches(vec![field(), Arc::new(LiteralNode::utf8("^ab.*").into())]);
        let holder = PatternHolder::from_node(&node).unwrap();
        assert_eq!(holder.as_str(), "^ab.*");
        assert!(holder.is_match("abc"));

        let holder = HolderBuilder::new()
            .dot_matches_new_line(true)
            .build_from_node(&node)
            .unwrap();
        assert_eq!(holder.as_str(), "^ab.*");
    }

    #[test]
    fn from_sql_like_node() {
        let node = FunctionNode::new(
            "like",
            vec![field(), Arc::new(LiteralNode::utf8("a_c%").into())],
            DataType::Boolean,
        );
        let holder = PatternHolder::from_sql_like_node(&node).unwrap();
        assert_eq!(holder.as_str(), "^a.c");
        assert!(holder.is_match("abcdef"));
        assert!(!holder.is_match("xabc"));

        let holder = HolderBuilder::new()
            .like_escape(Some('#'))
            .build_sql_like_from_node(&node)
            .unwrap();
        assert_eq!(holder.as_str(), "^a.c");
    }

    #[test]
    fn sql_like_too_long() {
        let pattern = "a".repeat(MAX_LIKE_PATTERN_LEN + 1);
        assert_matches!(
            HolderBuilder::new().build_sql_like(&pattern),
            Err(Error::InvalidPattern { reason: PatternError::TooLong(n), .. })
                if n == MAX_LIKE_PATTERN_LEN + 1
        );
        assert!(HolderBuilder::new()
            .build_sql_like(&"a".repeat(MAX_LIKE_PATTERN_LEN))
            .is_ok());
    }

    #[test]
    fn error_names_function() {
        let node = FunctionNode::new("like", vec![field()], DataType::Boolean);
        let err = PatternHolder::validate_arguments(&node).unwrap_err();
        assert_eq!(err.to_string(), "'like' function requires two parameters, got 1");
    }

    #[test]
    fn invalid_regex() {
        assert_matches!(
            PatternHolder::new("a(b"),
            Err(Error::InvalidPattern { ref pattern, reason: PatternError::Regex(_) }) if pattern == "a(b"
        );
    }

    #[test]
    fn size_limit_exceeded() {
        let result = HolderBuilder::new().size_limit(10).build(r"\w{50}");
        assert_matches!(
            result,
            Err(Error::InvalidPattern { reason: PatternError::Regex(_), .. })
        );
    }

    #[test]
    fn dot_new_line_option() {
        let holder = PatternHolder::new("a.b").unwrap();
        assert!(!holder.is_match("a\nb"));
        let holder = HolderBuilder::new().dot_matches_new_line(true).build("a.b").unwrap();
        assert!(holder.is_match("a\nb"));
    }

    #[test]
    fn as_str_debug() {
        let holder = PatternHolder::new("^ab.*").unwrap();
        assert_eq!(holder.as_str(), "^ab.*");
        assert_eq!(format!("{:?}", holder), "^ab.*");
    }
}
