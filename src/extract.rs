//! Test declaration extraction for JavaScript and TypeScript sources.
//!
//! `describe("name", ...)` opens a suite and `it("name", ...)` adds a test to
//! the innermost open suite. The `.only` / `.skip` variants count as well.
//! Only literal names are recognised; anything computed is searched through
//! as if it were ordinary code.

use crate::suite::{Suite, Test};
use std::str::Chars;
use thiserror::Error;
use tree_sitter::Node;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to load the {dialect:?} grammar: {source}")]
    Language {
        dialect: Dialect,
        #[source]
        source: tree_sitter::LanguageError,
    },
    #[error("parser produced no syntax tree")]
    NoTree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    JavaScript,
    TypeScript,
    Tsx,
}

impl Dialect {
    /// Picks the grammar from the file extension of a path or URL.
    pub fn from_origin(origin: &str) -> Self {
        let path = origin.split(|c: char| c == '?' || c == '#').next().unwrap_or(origin);
        let file = path.rsplit('/').next().unwrap_or(path);
        let ext = file.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
        match ext.as_deref() {
            Some("ts" | "mts" | "cts") => Dialect::TypeScript,
            Some("tsx") => Dialect::Tsx,
            _ => Dialect::JavaScript,
        }
    }

    fn language(self) -> tree_sitter::Language {
        match self {
            Dialect::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Describe,
    It,
}

fn keyword(name: &str) -> Option<Keyword> {
    match name {
        "describe" => Some(Keyword::Describe),
        "it" => Some(Keyword::It),
        _ => None,
    }
}

fn callee_keyword(callee: Node, src: &[u8]) -> Option<Keyword> {
    match callee.kind() {
        "identifier" => keyword(callee.utf8_text(src).ok()?),
        "member_expression" => {
            let object = callee.child_by_field_name("object")?;
            let property = callee.child_by_field_name("property")?;
            if object.kind() != "identifier" {
                return None;
            }
            match property.utf8_text(src).ok()? {
                "only" | "skip" => keyword(object.utf8_text(src).ok()?),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Exactly `len` hex digits; leaves `chars` untouched when they are not there.
fn take_hex(chars: &mut Chars, len: usize) -> Option<u32> {
    let mut look = chars.clone();
    let mut value = 0;
    for _ in 0..len {
        value = value * 16 + look.next()?.to_digit(16)?;
    }
    *chars = look;
    Some(value)
}

/// `{H..}` as used by `\u{1F600}`.
fn take_braced_hex(chars: &mut Chars) -> Option<u32> {
    let mut look = chars.clone();
    if look.next()? != '{' {
        return None;
    }
    let mut value: u32 = 0;
    let mut digits = 0;
    loop {
        match look.next()? {
            '}' if digits > 0 => break,
            c => {
                value = value.checked_mul(16)?.checked_add(c.to_digit(16)?)?;
                digits += 1;
            }
        }
    }
    if value > 0x10FFFF {
        return None;
    }
    *chars = look;
    Some(value)
}

/// Legacy octal escape: `\0` to `\377`.
fn take_octal(first: char, chars: &mut Chars) -> u32 {
    let mut value = first as u32 - '0' as u32;
    let max_len = if value <= 3 { 3 } else { 2 };
    for _ in 1..max_len {
        let mut look = chars.clone();
        match look.next().and_then(|c| c.to_digit(8)) {
            Some(digit) => {
                value = value * 8 + digit;
                *chars = look;
            }
            None => break,
        }
    }
    value
}

/// Decoded text built from UTF-16 style code points, pairing surrogates.
struct Decoded {
    out: String,
    high: Option<u32>,
}

impl Decoded {
    fn push(&mut self, cp: u32) {
        if let Some(high) = self.high.take() {
            if (0xDC00..=0xDFFF).contains(&cp) {
                let joined = 0x10000 + ((high - 0xD800) << 10) + (cp - 0xDC00);
                self.out.push(char::from_u32(joined).unwrap_or(char::REPLACEMENT_CHARACTER));
                return;
            }
            self.out.push(char::REPLACEMENT_CHARACTER);
        }
        if (0xD800..=0xDBFF).contains(&cp) {
            self.high = Some(cp);
            return;
        }
        self.out.push(char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER));
    }

    fn finish(mut self) -> String {
        if self.high.take().is_some() {
            self.out.push(char::REPLACEMENT_CHARACTER);
        }
        self.out
    }
}

fn unescape(raw: &str) -> String {
    let mut decoded = Decoded { out: String::with_capacity(raw.len()), high: None };
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c as u32);
            continue;
        }
        let Some(escaped) = chars.next() else { break };
        match escaped {
            'n' => decoded.push('\n' as u32),
            't' => decoded.push('\t' as u32),
            'r' => decoded.push('\r' as u32),
            'b' => decoded.push(0x08),
            'f' => decoded.push(0x0C),
            'v' => decoded.push(0x0B),
            '0'..='7' => decoded.push(take_octal(escaped, &mut chars)),
            'x' => match take_hex(&mut chars, 2) {
                Some(cp) => decoded.push(cp),
                None => decoded.push('x' as u32),
            },
            'u' => match take_braced_hex(&mut chars).or_else(|| take_hex(&mut chars, 4)) {
                Some(cp) => decoded.push(cp),
                None => decoded.push('u' as u32),
            },
            // line continuations
            '\r' => {
                let mut look = chars.clone();
                if look.next() == Some('\n') {
                    chars = look;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => decoded.push(other as u32),
        }
    }
    decoded.finish()
}

fn literal_text(node: Node, src: &[u8]) -> Option<String> {
    match node.kind() {
        "string" => {}
        "template_string" => {
            let mut cursor = node.walk();
            if node.named_children(&mut cursor).any(|c| c.kind() == "template_substitution") {
                return None;
            }
        }
        _ => return None,
    }
    let raw = node.utf8_text(src).ok()?;
    let inner = raw.get(1..raw.len().checked_sub(1)?)?;
    Some(unescape(inner))
}

/// The declaration a call expression makes, if it is one.
fn declaration(call: Node, src: &[u8]) -> Option<(Keyword, String)> {
    let kw = callee_keyword(call.child_by_field_name("function")?, src)?;
    let args = call.child_by_field_name("arguments")?;
    let mut cursor = args.walk();
    let first = args.named_children(&mut cursor).find(|n| n.kind() != "comment")?;
    Some((kw, literal_text(first, src)?))
}

fn collect(node: Node, src: &[u8], parent: &mut Suite) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "call_expression" {
            match declaration(child, src) {
                Some((Keyword::Describe, name)) => {
                    let mut suite = Suite::new(name);
                    collect(child, src, &mut suite);
                    parent.suites.push(suite);
                    continue;
                }
                Some((Keyword::It, name)) => {
                    parent.tests.push(Test::new(name));
                    continue;
                }
                None => {}
            }
        }
        collect(child, src, parent);
    }
}

/// Parses `source` and returns an unnamed suite holding every top-level
/// `describe` and `it` found in it, nested as declared.
pub fn extract_suites(source: &str, dialect: Dialect) -> Result<Suite, ExtractError> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&dialect.language())
        .map_err(|source| ExtractError::Language { dialect, source })?;
    let tree = parser.parse(source, None).ok_or(ExtractError::NoTree)?;
    let mut root = Suite::empty();
    collect(tree.root_node(), source.as_bytes(), &mut root);
    Ok(root)
}
