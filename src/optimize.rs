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

//! Rewriting of pattern matching function nodes.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::expr::{DataType, FunctionNode, LiteralNode, LiteralValue, Node, NodeRef};
use crate::holder::HolderBuilder;
use crate::shape::{self, Shape};
use crate::{LIKE, REGEXP_MATCHES};

/// Syntax of the pattern argument of a matching function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /// A regex, as taken by `regexp_matches`
    Regex,
    /// A SQL LIKE pattern
    SqlLike,
}

/// Replaces pattern matches by `starts_with`, `ends_with` or `is_substr`
/// where the pattern allows it.
///
/// Rewriting is best effort: a node whose pattern can't be compiled, or
/// doesn't have one of the recognized shapes, is returned unchanged and
/// left for the rest of the compiler to accept or reject.
#[derive(Debug, Clone, Default)]
pub struct Optimizer {
    builder: HolderBuilder,
}

impl Optimizer {
    /// Optimizer compiling patterns with the options of `builder`.
    pub fn new(builder: HolderBuilder) -> Optimizer {
        Optimizer { builder }
    }

    /// Try to rewrite a `regexp_matches` node.
    pub fn try_optimize(&self, node: &FunctionNode) -> FunctionNode {
        self.try_optimize_syntax(node, Syntax::Regex)
    }

    /// Try to rewrite a `like` node.
    pub fn try_optimize_like(&self, node: &FunctionNode) -> FunctionNode {
        self.try_optimize_syntax(node, Syntax::SqlLike)
    }

    /// Try to rewrite `node`, reading its pattern with `syntax`.
    pub fn try_optimize_syntax(&self, node: &FunctionNode, syntax: Syntax) -> FunctionNode {
        let holder = match syntax {
            Syntax::Regex => self.builder.build_from_node(node),
            Syntax::SqlLike => self.builder.build_sql_like_from_node(node),
        };
        let holder = match holder {
            Ok(holder) => holder,
            Err(e) => {
                trace!(function = node.name(), error = %e, "pattern not optimizable");
                return node.clone();
            }
        };
        match shape::classify(holder.as_str()) {
            Some(shape) => replace(node, shape),
            None => {
                trace!(function = node.name(), pattern = holder.as_str(), "no shape");
                node.clone()
            }
        }
    }

    /// Rewrite every `regexp_matches` and `like` node of a tree, children
    /// first. Subtrees without a rewrite are shared with the input.
    pub fn rewrite(&self, node: &NodeRef) -> NodeRef {
        let function = match node.as_function() {
            Some(function) => function,
            None => return node.clone(),
        };

        let children: Vec<NodeRef> = function
            .children()
            .iter()
            .map(|child| self.rewrite(child))
            .collect();
        let children_changed = children
            .iter()
            .zip(function.children())
            .any(|(new, old)| !Arc::ptr_eq(new, old));
        let rebuilt;
        let function = if children_changed {
            rebuilt = FunctionNode::new(function.name(), children, function.return_type());
            &rebuilt
        } else {
            function
        };

        let syntax = match function.name() {
            REGEXP_MATCHES => Some(Syntax::Regex),
            LIKE => Some(Syntax::SqlLike),
            _ => None,
        };
        match syntax {
            Some(syntax) => {
                let optimized = self.try_optimize_syntax(function, syntax);
                if optimized == *function && !children_changed {
                    node.clone()
                } else {
                    Arc::new(optimized.into())
                }
            }
            None if children_changed => Arc::new(function.clone().into()),
            None => node.clone(),
        }
    }
}

/// Try to rewrite a `regexp_matches` node with default options.
pub fn try_optimize(node: &FunctionNode) -> FunctionNode {
    Optimizer::default().try_optimize(node)
}

/// Try to rewrite a `like` node with default options.
pub fn try_optimize_like(node: &FunctionNode) -> FunctionNode {
    Optimizer::default().try_optimize_like(node)
}

// The holder was built from `node`, so it has two children and the second
// one is a string-like literal.
fn replace(node: &FunctionNode, shape: Shape) -> FunctionNode {
    let literal_type = node.children()[1].return_type();
    let function = shape.function_name();
    debug!(
        from = node.name(),
        to = function,
        literal = shape.literal(),
        "rewrote pattern match"
    );
    let value = match literal_type {
        DataType::Binary => LiteralValue::Binary(shape.into_literal().into_bytes()),
        _ => LiteralValue::Utf8(shape.into_literal()),
    };
    let literal: Node = LiteralNode::new(literal_type, value).into();
    FunctionNode::new(
        function,
        vec![node.children()[0].clone(), Arc::new(literal)],
        node.return_type(),
    )
}
