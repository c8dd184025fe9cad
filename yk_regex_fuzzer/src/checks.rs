/**
 * Properties every regex has to satisfy, whether it is well-formed or not.
 */

use yk_regex_parse::{
    build, desugar_quantifiers, insert_explicit_concatenation, to_postfix, tokenize,
    validate_parentheses, Token,
};

pub trait PropertyCheck {
    fn name(&self) -> &'static str;
    fn check(&self, regex: &str) -> Result<(), String>;
}

/**
 * Parenthesis validation agrees with counting over every prefix.
 */

pub struct ParenthesesCheck;

impl PropertyCheck for ParenthesesCheck {
    fn name(&self) -> &'static str {
        "parentheses"
    }

    fn check(&self, regex: &str) -> Result<(), String> {
        let mut depth = 0i64;
        let mut ok = true;
        for c in regex.chars() {
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => { },
            }
            ok &= depth >= 0;
        }
        let expected = ok && depth == 0;
        if validate_parentheses(regex) == expected {
            Ok(())
        }
        else {
            Err(format!("expected balanced = {}", expected))
        }
    }
}

/**
 * Inserting concatenation a second time changes nothing.
 */

pub struct IdempotenceCheck;

impl PropertyCheck for IdempotenceCheck {
    fn name(&self) -> &'static str {
        "concatenation idempotence"
    }

    fn check(&self, regex: &str) -> Result<(), String> {
        let once = insert_explicit_concatenation(regex);
        let twice = insert_explicit_concatenation(&once);
        if once == twice {
            Ok(())
        }
        else {
            Err(format!("{} became {}", once, twice))
        }
    }
}

/**
 * Every literal of the desugared infix form shows up exactly once in the
 * postfix form.
 */

pub struct LiteralCheck;

fn sorted_symbols<'a, I>(tokens: I) -> Vec<String> where I : IntoIterator<Item = &'a Token> {
    let mut result: Vec<String> = tokens.into_iter()
        .filter(|t| matches!(t, Token::Symbol(_)))
        .map(|t| t.to_string())
        .collect();
    result.sort();
    result
}

impl PropertyCheck for LiteralCheck {
    fn name(&self) -> &'static str {
        "literal preservation"
    }

    fn check(&self, regex: &str) -> Result<(), String> {
        let (desugared, postfix) = match (desugar_quantifiers(&tokenize(regex)), to_postfix(regex)) {
            (Ok(desugared), Ok(postfix)) => (desugared, postfix),
            _ => return Ok(()),
        };
        let infix = sorted_symbols(&desugared);
        let output = sorted_symbols(postfix.tokens());
        if infix == output {
            Ok(())
        }
        else {
            Err(format!("infix literals {:?}, postfix literals {:?}", infix, output))
        }
    }
}

/**
 * A built tree agrees with its postfix form, and writing it back out as
 * infix text gives the same tree again.
 */

pub struct TreeCheck;

impl PropertyCheck for TreeCheck {
    fn name(&self) -> &'static str {
        "tree consistency"
    }

    fn check(&self, regex: &str) -> Result<(), String> {
        let postfix = match to_postfix(regex) {
            Ok(postfix) => postfix,
            Err(_) => return Ok(()),
        };
        let symbols = postfix.tokens().iter().filter(|t| matches!(t, Token::Symbol(_))).count();
        let tree = match build(postfix) {
            Ok(tree) => tree,
            Err(_) => return Ok(()),
        };
        if tree.leaf_count() != symbols {
            return Err(format!("{} leaves for {} symbols", tree.leaf_count(), symbols));
        }
        let infix = tree.to_string();
        match to_postfix(&infix).and_then(build) {
            Ok(again) if again == tree => Ok(()),
            Ok(again) => Err(format!("{} rebuilt as {}", infix, again)),
            Err(e) => Err(format!("{} does not rebuild: {}", infix, e)),
        }
    }
}

/**
 * Runs a collection of checks.
 */

pub struct CheckSuite {
    checks: Vec<Box<dyn PropertyCheck>>,
}

impl CheckSuite {
    pub fn new() -> Self {
        Self{ checks: Vec::new() }
    }

    pub fn add<C>(&mut self, c: C) where C : PropertyCheck + 'static {
        self.checks.push(Box::new(c));
    }

    /// Names and messages of the failed checks.
    pub fn run(&self, regex: &str) -> Vec<(&'static str, String)> {
        self.checks.iter()
            .filter_map(|c| c.check(regex).err().map(|e| (c.name(), e)))
            .collect()
    }
}

impl Default for CheckSuite {
    fn default() -> Self {
        let mut suite = Self::new();
        suite.add(ParenthesesCheck);
        suite.add(IdempotenceCheck);
        suite.add(LiteralCheck);
        suite.add(TreeCheck);
        suite
    }
}

#[cfg(test)]
mod checks_tests {
    use super::*;

    #[test]
    fn known_regexes_pass() {
        let suite = CheckSuite::default();
        for regex in &["a(b|c)*", "a?+", "(a|b)?c+", "a|b)", "+a", "a|", "", "((x|y)*z?)+"] {
            let failed = suite.run(regex);
            assert!(failed.is_empty(), "checks failed for {}: {:?}", regex, failed);
        }
    }
}
