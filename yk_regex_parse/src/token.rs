/**
 * The token alphabet of regex text.
 *
 * Regex text is a flat string, but every rewrite works on tokens so that
 * escaped characters and reserved symbolic names survive intact.
 */

use std::fmt;

pub const EPSILON: char = 'ϵ';
pub const CONCAT: char = '·';

/// Characters with a reserved symbolic name. Character classes write these
/// as their name, and the tokenizer reads a name back as a single symbol.
const RESERVED: &[(char, &str)] = &[
    (' ', "WHITESPACE"),
    ('\t', "TAB"),
    ('\n', "NEWLINE"),
    ('\r', "CARRIAGE_RETURN"),
    ('+', "PLUS"),
    ('-', "MINUS"),
    ('*', "TIMES"),
    ('/', "DIV"),
    ('(', "LPAREN"),
    (')', "RPAREN"),
    ('|', "PIPE"),
    ('?', "QUESTION"),
    ('.', "DOT"),
    ('=', "EQUALS"),
    (';', "SEMICOLON"),
    (',', "COMMA"),
    ('<', "LT"),
    ('>', "GT"),
    ('{', "LBRACE"),
    ('}', "RBRACE"),
    ('[', "LBRACKET"),
    (']', "RBRACKET"),
    ('^', "CARET"),
    ('\'', "QUOTE"),
    ('"', "DQUOTE"),
    ('\\', "BACKSLASH"),
];

pub fn reserved_name(c: char) -> Option<&'static str> {
    RESERVED.iter().find(|(r, _)| *r == c).map(|(_, name)| *name)
}

fn reserved_word(word: &str) -> Option<&'static str> {
    RESERVED.iter().find(|(_, name)| *name == word).map(|(_, name)| *name)
}

/// Characters that make up identifiers and reserved names.
pub fn is_word_char(c: char) -> bool {
    c != EPSILON && (c.is_alphanumeric() || c == '_')
}

/// Resolves the character after a backslash.
pub fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        's' => ' ',
        c => c,
    }
}

fn is_special(c: char) -> bool {
    c == EPSILON || c == CONCAT || c.is_whitespace() || "()|*+?\\'".contains(c)
}

/**
 * Symbols, operators and tokens.
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Char(char),
    Named(&'static str),
    Epsilon,
}

impl Symbol {
    /// The symbol standing for the character `c`, using its reserved name
    /// if it has one.
    pub fn literal(c: char) -> Self {
        match reserved_name(c) {
            Some(name) => Symbol::Named(name),
            None => Symbol::Char(c),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Symbol::Named(name) => f.write_str(name),
            Symbol::Epsilon => write!(f, "{}", EPSILON),
            Symbol::Char('\n') => f.write_str("\\n"),
            Symbol::Char('\t') => f.write_str("\\t"),
            Symbol::Char('\r') => f.write_str("\\r"),
            Symbol::Char(' ') => f.write_str("\\s"),
            Symbol::Char(c) if is_special(c) => write!(f, "\\{}", c),
            Symbol::Char(c) => write!(f, "{}", c),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Alternation,
    Concatenation,
    Star,
    Plus,
    Optional,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '|' => Some(Operator::Alternation),
            CONCAT => Some(Operator::Concatenation),
            '*' => Some(Operator::Star),
            '+' => Some(Operator::Plus),
            '?' => Some(Operator::Optional),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Operator::Alternation => '|',
            Operator::Concatenation => CONCAT,
            Operator::Star => '*',
            Operator::Plus => '+',
            Operator::Optional => '?',
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            Operator::Star | Operator::Plus | Operator::Optional => 3,
            Operator::Concatenation => 2,
            Operator::Alternation => 1,
        }
    }

    pub fn is_unary(self) -> bool {
        self.precedence() == 3
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Symbol(Symbol),
    Operator(Operator),
    LeftParen,
    RightParen,
}

impl Token {
    /// True if an operand can end right before this token ends.
    pub fn ends_operand(&self) -> bool {
        match self {
            Token::Symbol(_) | Token::RightParen => true,
            Token::Operator(op) => op.is_unary(),
            Token::LeftParen => false,
        }
    }

    /// True if an operand starts with this token.
    pub fn starts_operand(&self) -> bool {
        matches!(self, Token::Symbol(_) | Token::LeftParen)
    }
}

impl From<Symbol> for Token {
    fn from(symbol: Symbol) -> Self {
        Token::Symbol(symbol)
    }
}

impl From<Operator> for Token {
    fn from(op: Operator) -> Self {
        Token::Operator(op)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Symbol(s) => write!(f, "{}", s),
            Token::Operator(op) => write!(f, "{}", op),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
        }
    }
}

/**
 * Text to tokens and back.
 */

pub fn tokenize(text: &str) -> Vec<Token> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '(' => tokens.push(Token::LeftParen),
            ')' => tokens.push(Token::RightParen),
            '\\' => match chars.get(i + 1) {
                Some(&e) => {
                    tokens.push(Token::Symbol(Symbol::Char(unescape(e))));
                    i += 1;
                },
                None => tokens.push(Token::Symbol(Symbol::Char('\\'))),
            },
            '\'' => {
                // Quoted run of literal characters, up to the closing quote
                i += 1;
                while i < chars.len() && chars[i] != '\'' {
                    if chars[i] == '\\' && i + 1 < chars.len() {
                        i += 1;
                        tokens.push(Token::Symbol(Symbol::Char(unescape(chars[i]))));
                    }
                    else {
                        tokens.push(Token::Symbol(Symbol::Char(chars[i])));
                    }
                    i += 1;
                }
            },
            EPSILON => tokens.push(Token::Symbol(Symbol::Epsilon)),
            c if c.is_whitespace() => { },
            c => {
                if let Some(op) = Operator::from_char(c) {
                    tokens.push(Token::Operator(op));
                }
                else if let Some((name, len)) = reserved_word_at(&chars, i) {
                    tokens.push(Token::Symbol(Symbol::Named(name)));
                    i += len - 1;
                }
                else {
                    tokens.push(Token::Symbol(Symbol::Char(c)));
                }
            },
        }
        i += 1;
    }
    tokens
}

/// A reserved name only counts as a whole word.
fn reserved_word_at(chars: &[char], start: usize) -> Option<(&'static str, usize)> {
    if start > 0 && is_word_char(chars[start - 1]) {
        return None;
    }
    let len = chars[start..].iter().take_while(|c| is_word_char(**c)).count();
    if len == 0 {
        return None;
    }
    let word: String = chars[start..(start + len)].iter().collect();
    reserved_word(&word).map(|name| (name, len))
}

/// Writes tokens back as regex text that tokenizes to the same tokens.
pub fn render(tokens: &[Token]) -> String {
    let spelled = spelled_names(tokens);
    let mut result = String::new();
    let mut last_named = false;
    for (i, token) in tokens.iter().enumerate() {
        let text = match token {
            Token::Symbol(Symbol::Char(c)) if spelled.contains(&i) => escape_letter(*c),
            _ => token.to_string(),
        };
        let named = matches!(token, Token::Symbol(Symbol::Named(_)));
        let glued = match (result.chars().last(), text.chars().next()) {
            (Some(prev), Some(next)) => is_word_char(prev) && is_word_char(next) && (named || last_named),
            _ => false,
        };
        if glued {
            result.push(' ');
        }
        result.push_str(&text);
        last_named = named;
    }
    result
}

fn plain_word_char(token: &Token) -> bool {
    match token {
        Token::Symbol(Symbol::Char(c)) => is_word_char(*c),
        _ => false,
    }
}

/// Start indices of the runs of plain characters that would read back as a
/// reserved name.
fn spelled_names(tokens: &[Token]) -> Vec<usize> {
    let mut result = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let len = tokens[i..].iter().take_while(|t| plain_word_char(t)).count();
        if len == 0 {
            i += 1;
            continue;
        }
        let word: String = tokens[i..(i + len)].iter().map(|t| t.to_string()).collect();
        if reserved_word(&word).is_some() {
            result.push(i);
        }
        i += len;
    }
    result
}

/// An escaped first letter keeps the rest of the word from reading as a name,
/// since a name must not follow a word character.
fn escape_letter(c: char) -> String {
    if unescape(c) == c {
        format!("\\{}", c)
    }
    else {
        format!("'{}'", c)
    }
}

// Tests ///////////////////////////////////////////////////////////////////////
