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

//! Translation of SQL LIKE patterns to regexes.

use crate::error::{Error, PatternError, Result};

/// Escape character used by LIKE patterns unless configured otherwise.
pub const DEFAULT_ESCAPE: char = '\\';

/// Longest LIKE pattern, in bytes, that will be translated.
pub const MAX_LIKE_PATTERN_LEN: usize = 8 << 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    AnyMany,
    AnyOne,
    Char(char),
}

fn tokenize(sql_pattern: &str, escape: Option<char>) -> Result<Vec<Token>> {
    let mut tokens = Vec::with_capacity(sql_pattern.len());
    let mut chars = sql_pattern.chars();
    while let Some(c) = chars.next() {
        let token = match c {
            c if Some(c) == escape => match chars.next() {
                Some(e) if e == '%' || e == '_' || Some(e) == escape => Token::Char(e),
                Some(e) => {
                    return Err(Error::invalid_pattern(
                        sql_pattern,
                        PatternError::InvalidEscape(e),
                    ))
                }
                None => {
                    return Err(Error::invalid_pattern(
                        sql_pattern,
                        PatternError::TrailingEscape,
                    ))
                }
            },
            '%' => Token::AnyMany,
            '_' => Token::AnyOne,
            c => Token::Char(c),
        };
        tokens.push(token);
    }
    Ok(tokens)
}

/// Convert a SQL LIKE pattern to an equivalent regex for unanchored search.
///
/// `%` becomes `.*` and `_` becomes `.`; every other character matches
/// itself. Leading and trailing runs of `%` are dropped instead, leaving
/// that end of the regex unanchored, so `%abc%` gives `abc` and `abc%`
/// gives `^abc`. With an `escape` character, an escaped `%`, `_` or escape
/// matches literally.
///
/// The resulting `.` must be compiled so it also matches `\n`.
pub fn sql_like_to_regex(sql_pattern: &str, escape: Option<char>) -> Result<String> {
    let tokens = tokenize(sql_pattern, escape)?;

    let start = tokens
        .iter()
        .position(|&t| t != Token::AnyMany)
        .unwrap_or(tokens.len());
    let end = tokens
        .iter()
        .rposition(|&t| t != Token::AnyMany)
        .map_or(start, |ix| ix + 1);
    let body = &tokens[start..end];

    let mut re = String::with_capacity(2 * sql_pattern.len() + 2);
    if tokens.first() != Some(&Token::AnyMany) {
        re.push('^');
    }
    for token in body {
        match *token {
            Token::AnyMany => re.push_str(".*"),
            Token::AnyOne => re.push('.'),
            Token::Char(c) => push_quoted(&mut re, c),
        }
    }
    if tokens.last() != Some(&Token::AnyMany) {
        re.push('$');
    }
    Ok(re)
}

fn push_quoted(buf: &mut String, c: char) {
    if regex_syntax::is_meta_character(c) {
        buf.push('\\');
    }
    buf.push(c);
}
