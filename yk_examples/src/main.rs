
extern crate yk_lexspec;

use std::io::{self, BufRead};
use clap::Parser;
use yk_lexspec::{compile_spec, Config};

/// Reads a lexical specification from stdin and prints the postfix form of
/// every `let` definition.
#[derive(Parser, Debug)]
#[command(name = "yk_examples", version, about)]
struct Args {
    /// Substitution passes before definitions are reported as cyclic.
    #[arg(long)]
    max_passes: Option<usize>,

    /// Length a definition may grow to during substitution.
    #[arg(long)]
    max_regex_len: Option<usize>,

    /// Also print the syntax tree of each definition.
    #[arg(long)]
    tree: bool,
}

/**
 * Ingestion: comments, whitespace and blank lines.
 */

/// Drops `(* ... *)` comments (which may span lines), collapses runs of
/// whitespace and skips lines left empty.
fn clean_lines<I>(lines: I) -> Vec<String> where I : IntoIterator<Item = String> {
    let mut result = Vec::new();
    let mut in_comment = false;
    for line in lines {
        let mut text = String::with_capacity(line.len());
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            match (in_comment, c, chars.peek().copied()) {
                (false, '(', Some('*')) => {
                    chars.next();
                    in_comment = true;
                },
                (true, '*', Some(')')) => {
                    chars.next();
                    in_comment = false;
                    text.push(' ');
                },
                (true, _, _) => { },
                (false, c, _) => text.push(c),
            }
        }
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !collapsed.is_empty() {
            result.push(collapsed);
        }
    }
    result
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut config = Config::default();
    if let Some(passes) = args.max_passes {
        config = config.with_max_passes(passes);
    }
    if let Some(len) = args.max_regex_len {
        config = config.with_max_regex_len(len);
    }

    let stdin = io::stdin();
    let lines = match stdin.lock().lines().collect::<Result<Vec<_>, _>>() {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("error: failed to read the specification: {}", e);
            std::process::exit(2);
        },
    };

    let report = compile_spec(clean_lines(lines), &config);
    for compiled in &report.compiled {
        println!("{}: {}", compiled.identifier, compiled.postfix);
        if args.tree {
            println!("    {} (depth {}, {} leaves)",
                compiled.tree, compiled.tree.depth(), compiled.tree.leaf_count());
        }
    }
    for fault in &report.faults {
        eprintln!("error: {}", fault);
    }
    if !report.is_ok() {
        std::process::exit(1);
    }
}

#[cfg(test)]
mod examples_tests {
    use super::*;

    fn owned(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn strips_comments_and_blank_lines() {
        let cleaned = clean_lines(owned(&[
            "(* header",
            "   still a comment *)",
            "",
            "let   digit =  ['0'-'9']   (* trailing *)",
            "let x = a",
        ]));
        assert_eq!(cleaned, vec!["let digit = ['0'-'9']", "let x = a"]);
    }

    #[test]
    fn comment_between_tokens_separates_them() {
        assert_eq!(clean_lines(owned(&["let a(* c *)= b"])), vec!["let a = b"]);
    }
}
