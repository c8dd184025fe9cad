/**
 * Desugaring of bracketed character classes into plain alternations:
 *
 *  - ranges:        ['a'-'c']            => a|b|c
 *  - literal sets:  ['abc']              => a|b|c
 *  - special sets:  ['+''\t'' ']         => PLUS|TAB|WHITESPACE
 *
 * Anything that doesn't look like one of these is left alone.
 */

use std::iter::Peekable;
use std::ops::Range;
use std::str::Chars;
use yk_regex_parse::{render, unescape, Symbol, Token};
use crate::definition::Definitions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassForm {
    Range,
    Literal,
    Special,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    Quoted{
        text: String,
        escaped: bool,
    },
    Range(char, char),
}

pub fn classify(class: &str) -> Option<ClassForm> {
    parse_class(class).map(|items| form_of(&items))
}

fn form_of(items: &[Item]) -> ClassForm {
    if items.iter().any(|i| matches!(i, Item::Range(..))) {
        ClassForm::Range
    }
    else if items.len() > 1 || items.iter().any(|i| matches!(i, Item::Quoted{ escaped: true, .. })) {
        ClassForm::Special
    }
    else {
        ClassForm::Literal
    }
}

/// Rewrites a single class (brackets included) into an alternation. Members
/// come out unquoted, so a single letter is indistinguishable from a
/// reference to a definition of the same name.
pub fn convert_class(class: &str) -> Option<String> {
    let items = parse_class(class)?;
    let form = form_of(&items);
    let mut alternatives: Vec<String> = Vec::new();
    for item in &items {
        match item {
            Item::Range(start, end) => {
                alternatives.extend((*start..=*end).map(|c| Symbol::literal(c).to_string()));
            },
            Item::Quoted{ text, .. } if form == ClassForm::Special => {
                alternatives.push(special_item(text));
            },
            Item::Quoted{ text, .. } => {
                alternatives.extend(text.chars().map(|c| Symbol::literal(c).to_string()));
            },
        }
    }
    Some(alternatives.join("|"))
}

/// A single reserved character becomes its name, anything else is kept as
/// literal text.
fn special_item(text: &str) -> String {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Symbol::literal(c).to_string(),
        _ => {
            let tokens: Vec<Token> = text.chars().map(|c| Token::Symbol(Symbol::Char(c))).collect();
            render(&tokens)
        },
    }
}

/**
 * Class parsing.
 */

fn parse_class(class: &str) -> Option<Vec<Item>> {
    let inner = class.strip_prefix('[')?.strip_suffix(']')?;
    let mut chars = inner.chars().peekable();
    let mut items = Vec::new();
    loop {
        skip_whitespace(&mut chars);
        match chars.next() {
            None => break,
            Some('\'') => {
                let (text, escaped) = read_quoted(&mut chars)?;
                skip_whitespace(&mut chars);
                if chars.peek() == Some(&'-') {
                    chars.next();
                    skip_whitespace(&mut chars);
                    if chars.next() != Some('\'') {
                        return None;
                    }
                    let (end, _) = read_quoted(&mut chars)?;
                    let (start, end) = (single_char(&text)?, single_char(&end)?);
                    if start > end {
                        return None;
                    }
                    items.push(Item::Range(start, end));
                }
                else {
                    items.push(Item::Quoted{ text, escaped });
                }
            },
            Some(_) => return None,
        }
    }
    if items.is_empty() {
        None
    }
    else {
        Some(items)
    }
}

/// Reads up to and including the closing quote. Empty items are rejected.
fn read_quoted(chars: &mut Peekable<Chars<'_>>) -> Option<(String, bool)> {
    let mut text = String::new();
    let mut escaped = false;
    loop {
        match chars.next()? {
            '\'' => break,
            '\\' => {
                text.push(unescape(chars.next()?));
                escaped = true;
            },
            c => text.push(c),
        }
    }
    if text.is_empty() {
        None
    }
    else {
        Some((text, escaped))
    }
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.peek().map_or(false, |c| c.is_whitespace()) {
        chars.next();
    }
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/**
 * Whole regexes.
 */

/// Byte ranges of the bracketed classes in a regex, quotes and escapes
/// taken into account.
fn class_spans(regex: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut in_literal = false;
    let mut start = None;
    let mut chars = regex.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => { chars.next(); },
            '\'' => in_literal = !in_literal,
            _ if in_literal => { },
            '[' if start.is_none() => start = Some(i),
            ']' => if let Some(s) = start.take() {
                spans.push(s..(i + 1));
            },
            _ => { },
        }
    }
    spans
}

/// Rewrites every recognized class in a regex. A regex that is exactly one
/// class becomes a bare alternation, embedded classes are parenthesized.
pub fn convert_regex(regex: &str) -> String {
    let spans = class_spans(regex);
    let whole = match spans.as_slice() {
        [only] => regex[..only.start].trim().is_empty() && regex[only.end..].trim().is_empty(),
        _ => false,
    };
    if whole {
        let class = regex.trim();
        return match convert_class(class) {
            Some(alternation) => alternation,
            None => {
                log::debug!("passing through unrecognized character class `{}`", class);
                regex.to_string()
            },
        };
    }

    let mut result = String::with_capacity(regex.len());
    let mut last = 0;
    for span in spans {
        result.push_str(&regex[last..span.start]);
        let class = &regex[span.clone()];
        match convert_class(class) {
            Some(alternation) => {
                result.push('(');
                result.push_str(&alternation);
                result.push(')');
            },
            None => {
                log::debug!("passing through unrecognized character class `{}`", class);
                result.push_str(class);
            },
        }
        last = span.end;
    }
    result.push_str(&regex[last..]);
    result
}

pub fn desugar_definitions(definitions: &mut Definitions) {
    for (identifier, regex) in definitions.regexes_mut() {
        let converted = convert_regex(regex);
        if converted != *regex {
            log::debug!("desugared `{}`: {} => {}", identifier, regex, converted);
            *regex = converted;
        }
    }
}

// Tests ///////////////////////////////////////////////////////////////////////
