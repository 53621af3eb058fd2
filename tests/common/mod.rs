#![allow(dead_code)]

use std::sync::Arc;

use pattern_shortcut::expr::{DataType, FieldNode, FunctionNode, LiteralNode, LiteralValue, Node};
use pattern_shortcut::{PatternHolder, ENDS_WITH, IS_SUBSTR, LIKE, REGEXP_MATCHES, STARTS_WITH};

pub fn build(name: &str, pattern: &str) -> FunctionNode {
    let field: Node = FieldNode::new("in", DataType::Utf8).into();
    let pattern: Node = LiteralNode::utf8(pattern).into();
    FunctionNode::new(name, vec![Arc::new(field), Arc::new(pattern)], DataType::Boolean)
}

pub fn build_regexp_matches(pattern: &str) -> FunctionNode {
    build(REGEXP_MATCHES, pattern)
}

pub fn build_like(pattern: &str) -> FunctionNode {
    build(LIKE, pattern)
}

#[cfg_attr(feature = "track_caller", track_caller)]
pub fn holder(pattern: &str) -> PatternHolder {
    let result = PatternHolder::new(pattern);
    assert!(
        result.is_ok(),
        "Expected pattern '{}' to compile, got {:?}",
        pattern,
        result.err()
    );
    result.unwrap()
}

#[cfg_attr(feature = "track_caller", track_caller)]
pub fn like_holder(pattern: &str) -> PatternHolder {
    let result = PatternHolder::from_sql_like(pattern);
    assert!(
        result.is_ok(),
        "Expected LIKE pattern '{}' to compile, got {:?}",
        pattern,
        result.err()
    );
    result.unwrap()
}

/// Evaluate a (possibly rewritten) matching node against `text` the way
/// the runtime would.
pub fn eval(node: &FunctionNode, text: &str) -> bool {
    let literal = match node.children()[1].as_literal().map(|l| l.value()) {
        Some(LiteralValue::Utf8(s)) => s.as_str(),
        other => panic!("unexpected pattern argument {:?}", other),
    };
    match node.name() {
        STARTS_WITH => text.starts_with(literal),
        ENDS_WITH => text.ends_with(literal),
        IS_SUBSTR => text.contains(literal),
        REGEXP_MATCHES => holder(literal).is_match(text),
        LIKE => like_holder(literal).is_match(text),
        name => panic!("unexpected function {}", name),
    }
}
