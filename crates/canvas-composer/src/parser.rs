//! Turning stylesheet text into rule descriptors.
//!
//! [`CssParser`] is the seam the composer parses through; editors with a
//! full CSS engine plug their own implementation in. [`BasicCssParser`]
//! understands the subset the composer renders:
//!
//! - compound class/id selectors (`.btn.primary`, `#main.row`), optionally
//!   followed by a pseudo-state (`.btn:hover`)
//! - comma-separated selector lists, expanded to one rule per selector
//! - `@media (max-width: <width>) { ... }` blocks
//! - `/* comments */`
//!
//! Separators inside quoted strings, parentheses and brackets belong to the
//! value, so `url(data:image/png;base64,...)` and `content: "a;b"` survive.

use std::collections::BTreeMap;

use canvas_model::{RuleDescriptor, Selector};

use crate::error::ParseError;

/// Parses stylesheet text into descriptors.
pub trait CssParser {
    fn parse_css(&self, css: &str) -> Result<Vec<RuleDescriptor>, ParseError>;
}

/// Parser for the rule subset produced by [`crate::render_css`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicCssParser;

impl CssParser for BasicCssParser {
    fn parse_css(&self, css: &str) -> Result<Vec<RuleDescriptor>, ParseError> {
        let source = blank_comments(css)?;
        let mut cursor = Cursor::new(&source);
        let mut rules = Vec::new();

        loop {
            cursor.skip_whitespace();
            match cursor.peek() {
                None => break,
                Some('@') => parse_media_block(&mut cursor, &mut rules)?,
                Some(_) => parse_rule(&mut cursor, "", &mut rules)?,
            }
        }

        tracing::debug!(rules = rules.len(), "Parsed stylesheet");
        Ok(rules)
    }
}

/// Replace comments with spaces so byte offsets stay valid.
///
/// `/*` inside a quoted string is left alone.
fn blank_comments(css: &str) -> Result<String, ParseError> {
    let mut out = String::with_capacity(css.len());
    let mut quote = None;
    let mut escaped = false;
    let mut index = 0;

    while let Some(c) = css[index..].chars().next() {
        if quote.is_none() && !escaped && css[index..].starts_with("/*") {
            let Some(end) = css[index + 2..].find("*/") else {
                return Err(ParseError::new(index, "unterminated comment"));
            };
            let comment_len = 2 + end + 2;
            out.extend(std::iter::repeat_n(' ', comment_len));
            index += comment_len;
            continue;
        }

        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if quote == Some(c) {
            quote = None;
        } else if quote.is_none() && matches!(c, '"' | '\'') {
            quote = Some(c);
        }
        out.push(c);
        index += c.len_utf8();
    }
    Ok(out)
}

/// Byte index of the first of `stops` outside quotes, parentheses and brackets.
fn find_top_level(text: &str, stops: &[char]) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote = None;
    let mut escaped = false;

    for (index, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(' | '[') => depth += 1,
            (None, ')' | ']') if depth > 0 => depth -= 1,
            (None, c) if depth == 0 && stops.contains(&c) => return Some(index),
            _ => {}
        }
    }
    None
}

/// Split `text` on `separator` where it appears at the top level.
fn split_top_level(text: &str, separator: char) -> impl Iterator<Item = &str> {
    let mut rest = Some(text);
    std::iter::from_fn(move || {
        let current = rest?;
        match find_top_level(current, &[separator]) {
            Some(index) => {
                rest = Some(&current[index + separator.len_utf8()..]);
                Some(&current[..index])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Consume up to, not including, the first top-level of `stops` (or to the end).
    fn take_until(&mut self, stops: &[char]) -> &'a str {
        let rest = self.rest();
        let len = find_top_level(rest, stops).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }
}

fn parse_media_block(
    cursor: &mut Cursor<'_>,
    rules: &mut Vec<RuleDescriptor>,
) -> Result<(), ParseError> {
    let start = cursor.pos;
    cursor.eat('@');
    let prelude = cursor.take_until(&['{', '}', ';']).trim();
    if !cursor.eat('{') {
        return Err(ParseError::new(start, "expected '{' after at-rule prelude"));
    }

    let split = prelude
        .find(|c: char| c.is_whitespace() || c == '(')
        .unwrap_or(prelude.len());
    let (keyword, condition) = prelude.split_at(split);
    if !keyword.eq_ignore_ascii_case("media") {
        return Err(ParseError::new(
            start,
            format!("unsupported at-rule '@{keyword}'"),
        ));
    }
    let width = max_width(condition).ok_or_else(|| {
        ParseError::new(
            start,
            format!("unsupported media query '{}'", condition.trim()),
        )
    })?;

    loop {
        cursor.skip_whitespace();
        match cursor.peek() {
            None => return Err(ParseError::new(start, "unterminated @media block")),
            Some('}') => {
                cursor.eat('}');
                return Ok(());
            }
            Some('@') => {
                return Err(ParseError::new(
                    cursor.pos,
                    "nested at-rules are not supported",
                ));
            }
            Some(_) => parse_rule(cursor, width, rules)?,
        }
    }
}

/// Extract `W` from a lone `(max-width: W)` feature.
fn max_width(condition: &str) -> Option<&str> {
    let inner = condition.trim().strip_prefix('(')?.strip_suffix(')')?;
    if inner.contains(['(', ')']) {
        return None;
    }
    let (feature, value) = inner.split_once(':')?;
    let value = value.trim();
    let valid = feature.trim().eq_ignore_ascii_case("max-width")
        && !value.is_empty()
        && !value.contains(':');
    valid.then_some(value)
}

fn parse_rule(
    cursor: &mut Cursor<'_>,
    width: &str,
    rules: &mut Vec<RuleDescriptor>,
) -> Result<(), ParseError> {
    let start = cursor.pos;
    let prelude = cursor.take_until(&['{', '}']);
    if !cursor.eat('{') {
        return Err(ParseError::new(start, "expected '{' after selector"));
    }

    let body_start = cursor.pos;
    let body = cursor.take_until(&['}', '{']);
    if !cursor.eat('}') {
        return Err(ParseError::new(body_start, "unterminated rule block"));
    }

    let style = parse_declarations(body, body_start)?;
    for part in prelude.split(',') {
        let (selectors, state) = parse_compound(part.trim(), start)?;
        rules.push(RuleDescriptor {
            selectors,
            state,
            max_width: width.to_string(),
            style: style.clone(),
        });
    }
    Ok(())
}

fn parse_compound(text: &str, offset: usize) -> Result<(Vec<Selector>, String), ParseError> {
    if text.is_empty() {
        return Err(ParseError::new(offset, "empty selector"));
    }
    if text.contains(|c: char| c.is_whitespace() || matches!(c, '>' | '+' | '~' | '[' | '*' | '(')) {
        return Err(ParseError::new(
            offset,
            format!("unsupported selector '{text}': combinators and attribute selectors are not supported"),
        ));
    }

    let (compound, state) = match text.split_once(':') {
        Some((compound, state)) => (compound, state),
        None => (text, ""),
    };
    if text.contains(':') && state.is_empty() {
        return Err(ParseError::new(offset, format!("empty pseudo-state in '{text}'")));
    }
    if !compound.starts_with(['.', '#']) {
        return Err(ParseError::new(
            offset,
            format!("unsupported selector '{text}': only class and id selectors are supported"),
        ));
    }

    let mut selectors = Vec::new();
    let mut token_start = 0;
    for (index, c) in compound.char_indices().skip(1) {
        if c == '.' || c == '#' {
            selectors.push(parse_token(&compound[token_start..index], offset)?);
            token_start = index;
        }
    }
    selectors.push(parse_token(&compound[token_start..], offset)?);

    Ok((selectors, state.to_string()))
}

fn parse_token(token: &str, offset: usize) -> Result<Selector, ParseError> {
    Selector::parse(token).map_err(|e| ParseError::new(offset, e.to_string()))
}

fn parse_declarations(body: &str, offset: usize) -> Result<BTreeMap<String, String>, ParseError> {
    let mut style = BTreeMap::new();
    for declaration in split_top_level(body, ';') {
        let declaration = declaration.trim();
        if declaration.is_empty() {
            continue;
        }
        let Some((property, value)) = declaration.split_once(':') else {
            return Err(ParseError::new(
                offset,
                format!("invalid declaration '{declaration}'"),
            ));
        };
        let (property, value) = (property.trim(), value.trim());
        if property.is_empty() || value.is_empty() {
            return Err(ParseError::new(
                offset,
                format!("invalid declaration '{declaration}'"),
            ));
        }
        style.insert(property.to_string(), value.to_string());
    }
    Ok(style)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(css: &str) -> Vec<RuleDescriptor> {
        BasicCssParser.parse_css(css).unwrap()
    }

    #[test]
    fn test_simple_rule() {
        let rules = parse(".btn{color:red; background : blue }");
        assert_eq!(
            rules,
            vec![
                RuleDescriptor::new(vec![Selector::class("btn")])
                    .with_style("color", "red")
                    .with_style("background", "blue")
            ]
        );
    }

    #[test]
    fn test_compound_selector_and_state() {
        let rules = parse("#main.row.wide:hover{margin:0;}");
        assert_eq!(rules.len(), 1);
        assert_eq!(
            rules[0].selectors,
            vec![Selector::id("main"), Selector::class("row"), Selector::class("wide")]
        );
        assert_eq!(rules[0].state, "hover");
    }

    #[test]
    fn test_selector_list_expands() {
        let rules = parse(".a, .b:focus { top: 0 }");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].selectors, vec![Selector::class("a")]);
        assert_eq!(rules[1].state, "focus");
        assert_eq!(rules[1].style, rules[0].style);
    }

    #[test]
    fn test_media_block() {
        let rules = parse(
            ".a{color:red;}\n@media (max-width: 480px){\n.a{color:blue;}\n.b:hover{color:green;}\n}",
        );
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].max_width, "");
        assert_eq!(rules[1].max_width, "480px");
        assert_eq!(rules[2].max_width, "480px");
        assert_eq!(rules[2].state, "hover");
    }

    #[test]
    fn test_comments_are_ignored() {
        let rules = parse("/* header */ .a { /* inline */ color: red; }");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].style.get("color").map(String::as_str), Some("red"));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("  \n /* nothing */ ").is_empty());
    }

    #[test]
    fn test_empty_block_keeps_rule() {
        let rules = parse(".a{}");
        assert_eq!(rules.len(), 1);
        assert!(rules[0].style.is_empty());
    }

    #[test]
    fn test_errors() {
        let parser = BasicCssParser;
        for css in [
            ".a{color:red;",
            ".a color:red;}",
            "{color:red}",
            "div{color:red}",
            ".a .b{color:red}",
            ".a{color}",
            ".a:{color:red}",
            "@font-face{font-family:x}",
            "@media print{.a{color:red}}",
            "@media (max-width: 480px){.a{color:red}",
            "/* open",
            ".a{.b{color:red}}",
            "@media (max-width: 480px) and (orientation: landscape){.a{color:red}}",
            "@media (max-width: 480px), (min-width: 900px){.a{color:red}}",
            "@media (max-width: a:b){.a{color:red}}",
            ".a{background:url(x.png;}",
            ".a{content:\"open}",
        ] {
            assert!(parser.parse_css(css).is_err(), "expected error for {css:?}");
        }
    }

    #[test]
    fn test_separators_inside_values() {
        let rules = parse(
            ".hero{background-image:url(data:image/png;base64,AAAA);content:\"a;b}\";top:0}",
        );
        assert_eq!(rules.len(), 1);
        let style = &rules[0].style;
        assert_eq!(
            style.get("background-image").map(String::as_str),
            Some("url(data:image/png;base64,AAAA)")
        );
        assert_eq!(style.get("content").map(String::as_str), Some("\"a;b}\""));
        assert_eq!(style.get("top").map(String::as_str), Some("0"));
    }

    #[test]
    fn test_comment_markers_inside_strings() {
        let rules = parse(".a{content:'/* not a comment */';font-family:\"x\\\"y\"}");
        let style = &rules[0].style;
        assert_eq!(
            style.get("content").map(String::as_str),
            Some("'/* not a comment */'")
        );
        assert_eq!(style.get("font-family").map(String::as_str), Some("\"x\\\"y\""));
    }

    #[test]
    fn test_max_width_condition() {
        assert_eq!(max_width("(max-width: 480px)"), Some("480px"));
        assert_eq!(max_width(" (MAX-WIDTH:768px) "), Some("768px"));
        assert_eq!(max_width("(max-width: 480px) and (orientation: landscape)"), None);
        assert_eq!(max_width("(min-width: 480px)"), None);
        assert_eq!(max_width("(max-width: )"), None);
        assert_eq!(max_width("(max-width: a:b)"), None);
    }

    #[test]
    fn test_error_offset_points_at_rule() {
        let err = BasicCssParser.parse_css(".a{top:0}\n.b .c{top:0}").unwrap_err();
        assert_eq!(err.offset, 10);
        assert!(err.message.contains("unsupported selector"));
    }
}
