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

//! Expression nodes as seen by the rewrite pass.
//!
//! Nodes are immutable. Children are shared through [`NodeRef`], so a
//! rewritten node can reuse the subtrees of the node it replaces.

use std::fmt;
use std::sync::Arc;

/// Shared handle to an immutable node.
pub type NodeRef = Arc<Node>;

/// Declared type of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean,
    Int32,
    Int64,
    Float64,
    Utf8,
    Binary,
}

impl DataType {
    /// Whether a literal of this type can carry a pattern.
    pub fn is_string_like(self) -> bool {
        matches!(self, DataType::Utf8 | DataType::Binary)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            DataType::Boolean => "bool",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::Float64 => "double",
            DataType::Utf8 => "string",
            DataType::Binary => "binary",
        })
    }
}

/// Value held by a literal node.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Float64(f64),
    Utf8(String),
    Binary(Vec<u8>),
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LiteralValue::Null => f.write_str("null"),
            LiteralValue::Boolean(v) => write!(f, "{}", v),
            LiteralValue::Int32(v) => write!(f, "{}", v),
            LiteralValue::Int64(v) => write!(f, "{}", v),
            LiteralValue::Float64(v) => write!(f, "{}", v),
            LiteralValue::Utf8(v) => f.write_str(v),
            LiteralValue::Binary(v) => f.write_str(&String::from_utf8_lossy(v)),
        }
    }
}

/// A reference to an input column.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldNode {
    name: String,
    data_type: DataType,
}

impl FieldNode {
    pub fn new(name: &str, data_type: DataType) -> FieldNode {
        FieldNode {
            name: name.to_string(),
            data_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn return_type(&self) -> DataType {
        self.data_type
    }
}

/// A compile-time constant with its declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralNode {
    data_type: DataType,
    value: LiteralValue,
}

impl LiteralNode {
    pub fn new(data_type: DataType, value: LiteralValue) -> LiteralNode {
        LiteralNode { data_type, value }
    }

    /// A `string` literal.
    pub fn utf8(value: &str) -> LiteralNode {
        LiteralNode::new(DataType::Utf8, LiteralValue::Utf8(value.to_string()))
    }

    pub fn return_type(&self) -> DataType {
        self.data_type
    }

    pub fn value(&self) -> &LiteralValue {
        &self.value
    }
}

/// Application of a named function to child expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionNode {
    name: String,
    children: Vec<NodeRef>,
    return_type: DataType,
}

impl FunctionNode {
    pub fn new(name: &str, children: Vec<NodeRef>, return_type: DataType) -> FunctionNode {
        FunctionNode {
            name: name.to_string(),
            children,
            return_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    pub fn return_type(&self) -> DataType {
        self.return_type
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Field(FieldNode),
    Literal(LiteralNode),
    Function(FunctionNode),
}

impl Node {
    pub fn return_type(&self) -> DataType {
        match self {
            Node::Field(field) => field.return_type(),
            Node::Literal(literal) => literal.return_type(),
            Node::Function(function) => function.return_type(),
        }
    }

    pub fn as_literal(&self) -> Option<&LiteralNode> {
        match self {
            Node::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionNode> {
        match self {
            Node::Function(function) => Some(function),
            _ => None,
        }
    }
}

impl From<FieldNode> for Node {
    fn from(node: FieldNode) -> Node {
        Node::Field(node)
    }
}

impl From<LiteralNode> for Node {
    fn from(node: LiteralNode) -> Node {
        Node::Literal(node)
    }
}

impl From<FunctionNode> for Node {
    fn from(node: FunctionNode) -> Node {
        Node::Function(node)
    }
}

impl fmt::Display for FieldNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}) {}", self.data_type, self.name)
    }
}

impl fmt::Display for LiteralNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(const {}) {}", self.data_type, self.value)
    }
}

impl fmt::Display for FunctionNode {
    /// Renders as `bool starts_with((string) in, (const string) abc)`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}(", self.return_type, self.name)?;
        for (i, child) in self.children.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", child)?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Field(field) => fmt::Display::fmt(field, f),
            Node::Literal(literal) => fmt::Display::fmt(literal, f),
            Node::Function(function) => fmt::Display::fmt(function, f),
        }
    }
}
