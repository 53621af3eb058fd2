// Copyright 2016 The Fancy Regex Authors.
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

/*!
Compile-time shortcuts for pattern matching predicates.

A query engine evaluating `regexp_matches(col, pattern)` or
`like(col, pattern)` runs a regex for every row. Many patterns are really
a prefix, suffix or substring test. This crate recognizes them while the
expression is compiled and swaps in `starts_with`, `ends_with` or
`is_substr`, which don't need a regex at all.

# Example

```rust
use std::sync::Arc;

use pattern_shortcut::expr::{DataType, FieldNode, FunctionNode, LiteralNode, Node};
use pattern_shortcut::try_optimize_like;

let column: Node = FieldNode::new("name", DataType::Utf8).into();
let pattern: Node = LiteralNode::utf8("%son").into();
let like = FunctionNode::new("like", vec![Arc::new(column), Arc::new(pattern)], DataType::Boolean);

let optimized = try_optimize_like(&like);
assert_eq!(optimized.to_string(), "bool ends_with((string) name, (const string) son)");
```

Patterns that don't fit keep their node, and the compiled pattern stays
available through [`PatternHolder`]:

```rust
use pattern_shortcut::PatternHolder;

let holder = PatternHolder::from_sql_like("J_n%s").unwrap();
assert_eq!(holder.as_str(), "^J.n.*s$");
assert!(holder.is_match("Jensens"));
assert!(holder.is_match("Janssons"));
// third character must be `n`
assert!(!holder.is_match("Johnsons"));
```

# Shapes

Only patterns made of ASCII word and space characters are rewritten, so
the replacement accepts exactly the strings the pattern does:

| regex             | LIKE     | rewritten to              |
|-------------------|----------|---------------------------|
| `^abc` / `^abc.*` | `abc%`   | `starts_with(col, "abc")` |
| `abc$` / `.*abc$` | `%abc`   | `ends_with(col, "abc")`   |
| `abc`             | `%abc%`  | `is_substr(col, "abc")`   |

Anything else, including patterns that fail to compile, is left alone.
*/

#![deny(missing_debug_implementations)]

pub mod expr;
pub mod shape;

mod error;
mod holder;
mod like;
mod optimize;

pub use crate::error::{ArgumentError, Error, PatternError, Result};
pub use crate::holder::{HolderBuilder, PatternHolder};
pub use crate::like::{sql_like_to_regex, DEFAULT_ESCAPE, MAX_LIKE_PATTERN_LEN};
pub use crate::optimize::{try_optimize, try_optimize_like, Optimizer, Syntax};

/// Name of the regex matching function.
pub const REGEXP_MATCHES: &str = "regexp_matches";
/// Name of the SQL LIKE function.
pub const LIKE: &str = "like";
/// Name of the prefix test a pattern can be rewritten to.
pub const STARTS_WITH: &str = "starts_with";
/// Name of the suffix test a pattern can be rewritten to.
pub const ENDS_WITH: &str = "ends_with";
/// Name of the substring test a pattern can be rewritten to.
pub const IS_SUBSTR: &str = "is_substr";
