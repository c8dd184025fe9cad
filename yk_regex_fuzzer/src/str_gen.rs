/**
 * Regex generation strategies.
 */

use std::ops::Range;
use crate::rnd::*;

pub trait StringGenStrategy {
    fn generate(&self) -> String;
}

/**
 * Random string from a charset. Mostly produces broken regexes, which is
 * the point.
 */

pub struct RandomStringGenerator {
    len: Range<usize>,
    charset: Vec<char>,
}

impl RandomStringGenerator {
    pub fn with_len_and_charset(len: Range<usize>, charset: &str) -> Self {
        Self{ len, charset: charset.chars().collect() }
    }
}

impl StringGenStrategy for RandomStringGenerator {
    fn generate(&self) -> String {
        rand_string(&self.len, &self.charset)
    }
}

/**
 * Structured generator, that only produces well-formed regexes.
 */

pub struct RegexGenerator {
    depth: usize,
    alphabet: Vec<char>,
}

impl RegexGenerator {
    pub fn with_depth_and_alphabet(depth: usize, alphabet: &str) -> Self {
        Self{ depth, alphabet: alphabet.chars().collect() }
    }

    fn literal(&self) -> String {
        sample(&self.alphabet).map(|c| c.to_string()).unwrap_or_else(|| "a".into())
    }

    fn quantifier() -> char {
        *sample(&['*', '+', '?']).unwrap_or(&'*')
    }

    fn expression(&self, depth: usize) -> String {
        if depth == 0 {
            return self.literal();
        }
        match rand_range(&(0..6)) {
            0 => format!("{}|{}", self.expression(depth - 1), self.expression(depth - 1)),
            1 | 2 => format!("{}{}", self.expression(depth - 1), self.expression(depth - 1)),
            3 => format!("({}){}", self.expression(depth - 1), Self::quantifier()),
            4 => format!("{}{}", self.literal(), Self::quantifier()),
            _ => self.literal(),
        }
    }
}

impl StringGenStrategy for RegexGenerator {
    fn generate(&self) -> String {
        self.expression(self.depth)
    }
}

#[cfg(test)]
mod str_gen_tests {
    use super::*;
    use yk_regex_parse::parse;

    #[test]
    fn structured_regexes_always_parse() {
        set_seed(7);
        let gen = RegexGenerator::with_depth_and_alphabet(4, "abc");
        for _ in 0..200 {
            let regex = gen.generate();
            assert!(parse(&regex).is_ok(), "failed to parse {}", regex);
        }
    }
}
