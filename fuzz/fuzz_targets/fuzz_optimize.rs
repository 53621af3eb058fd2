#![no_main]

#[macro_use]
extern crate libfuzzer_sys;
extern crate pattern_shortcut;

use std::sync::Arc;

use pattern_shortcut::expr::{DataType, FieldNode, FunctionNode, LiteralNode, Node};
use pattern_shortcut::{try_optimize, try_optimize_like};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let field: Node = FieldNode::new("in", DataType::Utf8).into();
        let pattern: Node = LiteralNode::utf8(s).into();
        let children = vec![Arc::new(field), Arc::new(pattern)];
        let _ = try_optimize(&FunctionNode::new("regexp_matches", children.clone(), DataType::Boolean));
        let _ = try_optimize_like(&FunctionNode::new("like", children, DataType::Boolean));
    }
});
