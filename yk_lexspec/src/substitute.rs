/**
 * Inlining of definitions that reference other definitions, repeated until
 * a fixed point is reached.
 */

use std::collections::HashSet;
use std::ops::Range;
use yk_regex_parse::is_word_char;
use crate::config::Config;
use crate::definition::Definitions;
use crate::error::{DefinitionError, Fault, Stage};

/// Byte ranges of the whole words in a regex. Quoted literals and escaped
/// characters are not words.
fn words(regex: &str) -> Vec<Range<usize>> {
    let mut result = Vec::new();
    let mut in_literal = false;
    let mut start = None;
    let mut chars = regex.char_indices();
    while let Some((i, c)) = chars.next() {
        if !in_literal && is_word_char(c) {
            start.get_or_insert(i);
            continue;
        }
        if let Some(s) = start.take() {
            result.push(s..i);
        }
        match c {
            '\\' => { chars.next(); },
            '\'' => in_literal = !in_literal,
            _ => { },
        }
    }
    if let Some(s) = start {
        result.push(s..regex.len());
    }
    result
}

/// Occurrences of `identifier` in `regex` as a whole word.
pub fn references(regex: &str, identifier: &str) -> Vec<Range<usize>> {
    words(regex).into_iter().filter(|r| &regex[r.clone()] == identifier).collect()
}

/// The other definitions a regex refers to.
fn dependencies(definitions: &Definitions, identifier: &str, regex: &str) -> Vec<String> {
    let mut result: Vec<String> = words(regex).into_iter()
        .map(|r| &regex[r])
        .filter(|w| *w != identifier && definitions.contains(w))
        .map(String::from)
        .collect();
    result.sort();
    result.dedup();
    result
}

fn splice(regex: &str, found: &[Range<usize>], replacement: &str) -> String {
    let mut result = String::with_capacity(regex.len() + found.len() * (replacement.len() + 2));
    let mut last = 0;
    for r in found {
        result.push_str(&regex[last..r.start]);
        result.push('(');
        result.push_str(replacement);
        result.push(')');
        last = r.end;
    }
    result.push_str(&regex[last..]);
    result
}

/**
 * Passes.
 */

struct Pass {
    replaced: usize,
    overflow: Option<String>,
}

fn run_pass(definitions: &mut Definitions, max_len: usize) -> Pass {
    let mut replaced = 0;
    for definer in 0..definitions.len() {
        for target in 0..definitions.len() {
            if definer == target {
                continue;
            }
            let (definer_id, rewritten, count) = match (definitions.get_index(definer), definitions.get_index(target)) {
                (Some((definer_id, current)), Some((identifier, body))) => {
                    let found = references(current, identifier);
                    if found.is_empty() {
                        continue;
                    }
                    (definer_id.to_string(), splice(current, &found, body), found.len())
                },
                _ => continue,
            };
            let too_long = rewritten.len() > max_len;
            if let Some(regex) = definitions.regex_at_mut(definer) {
                *regex = rewritten;
            }
            replaced += count;
            if too_long {
                return Pass{ replaced, overflow: Some(definer_id) };
            }
        }
    }
    Pass{ replaced, overflow: None }
}

/// One full pass over every (definer, target) pair, returning the number of
/// references replaced. Zero means the definitions are at a fixed point.
pub fn substitution_pass(definitions: &mut Definitions) -> usize {
    run_pass(definitions, usize::MAX).replaced
}

/// Definitions on a reference cycle, or depending on one.
fn cyclic_identifiers(definitions: &Definitions) -> Vec<String> {
    let deps: Vec<(&str, Vec<String>)> = definitions.iter()
        .map(|(identifier, regex)| (identifier, dependencies(definitions, identifier, regex)))
        .collect();

    // Everything resolvable gets resolved eventually, whatever is left over
    // can never be
    let mut resolved: HashSet<&str> = HashSet::new();
    loop {
        let before = resolved.len();
        for (identifier, ds) in &deps {
            if !resolved.contains(identifier) && ds.iter().all(|d| resolved.contains(d.as_str())) {
                resolved.insert(*identifier);
            }
        }
        if resolved.len() == before {
            break;
        }
    }

    deps.iter()
        .filter(|(identifier, _)| !resolved.contains(identifier))
        .map(|(identifier, _)| identifier.to_string())
        .collect()
}

/// Definitions that still reference another definition.
fn unresolved(definitions: &Definitions) -> Vec<String> {
    definitions.iter()
        .filter(|(identifier, regex)| !dependencies(definitions, identifier, regex).is_empty())
        .map(|(identifier, _)| identifier.to_string())
        .collect()
}

/// `identifier` and everything referring to it, directly or not.
fn dependents(definitions: &Definitions, identifier: String) -> Vec<String> {
    let mut result = vec![identifier];
    loop {
        let found: Vec<String> = definitions.iter()
            .filter(|(candidate, _)| !result.iter().any(|r| r == candidate))
            .filter(|(candidate, regex)| dependencies(definitions, candidate, regex).iter().any(|d| result.contains(d)))
            .map(|(candidate, _)| candidate.to_string())
            .collect();
        if found.is_empty() {
            break;
        }
        result.extend(found);
    }
    result
}

fn fail(definitions: &mut Definitions, identifiers: Vec<String>, faults: &mut Vec<Fault>) {
    for identifier in identifiers {
        if definitions.remove(&identifier).is_none() {
            continue;
        }
        let error = DefinitionError::CyclicDefinition{ identifier: identifier.clone() };
        log::warn!("{}", error);
        faults.push(Fault::new(&identifier, Stage::Substitution, error));
    }
}

/// Inlines references until no definition refers to another one. Definitions
/// that can't get there are removed and reported as faults.
pub fn substitute_definitions(definitions: &mut Definitions, config: &Config) -> Vec<Fault> {
    let mut faults = Vec::new();
    let cyclic = cyclic_identifiers(definitions);
    fail(definitions, cyclic, &mut faults);

    let ceiling = config.pass_ceiling(definitions.len());
    let mut passes = 0;
    loop {
        let pass = run_pass(definitions, config.max_regex_len);
        if pass.replaced == 0 {
            log::debug!("substitution reached a fixed point after {} pass(es)", passes);
            break;
        }
        passes += 1;
        log::debug!("substitution pass {} replaced {} reference(s)", passes, pass.replaced);

        if let Some(identifier) = pass.overflow {
            log::warn!("`{}` grew past {} bytes during substitution", identifier, config.max_regex_len);
            let overflowed = dependents(definitions, identifier);
            fail(definitions, overflowed, &mut faults);
            continue;
        }
        if passes >= ceiling {
            let stuck = unresolved(definitions);
            if !stuck.is_empty() {
                log::warn!("substitution stopped after {} pass(es)", passes);
            }
            fail(definitions, stuck, &mut faults);
            break;
        }
    }
    faults
}

// Tests ///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod substitute_tests {
    use super::*;

    fn defs(pairs: &[(&str, &str)]) -> Definitions {
        pairs.iter().cloned().collect()
    }

    fn cyclic(identifier: &str) -> Fault {
        Fault::new(
            identifier,
            Stage::Substitution,
            DefinitionError::CyclicDefinition{ identifier: identifier.into() })
    }

    #[test]
    fn one_pass_then_stable() {
        let mut d = defs(&[("digit", "0|1"), ("number", "digit+")]);
        assert_eq!(substitution_pass(&mut d), 1);
        assert_eq!(d, defs(&[("digit", "0|1"), ("number", "(0|1)+")]));
        assert_eq!(substitution_pass(&mut d), 0);
    }

    #[test]
    fn matches_whole_words_only() {
        assert_eq!(references("digits|digit|xdigit", "digit"), vec![7..12]);
        assert!(references("'digit'|\\digit", "digit").is_empty());
        assert_eq!(references("(digit)*", "digit"), vec![1..6]);
    }

    #[test]
    fn longer_identifier_is_not_touched() {
        let mut d = defs(&[("id", "x"), ("identifier", "id|y"), ("other", "identifier")]);
        let faults = substitute_definitions(&mut d, &Config::default());
        assert!(faults.is_empty());
        assert_eq!(d, defs(&[("id", "x"), ("identifier", "(x)|y"), ("other", "((x)|y)")]));
    }

    #[test]
    fn self_reference_is_left_alone() {
        let mut d = defs(&[("a", "a|b")]);
        assert!(substitute_definitions(&mut d, &Config::default()).is_empty());
        assert_eq!(d.get("a"), Some("a|b"));
    }

    #[test]
    fn cycle_terminates_with_faults() {
        let mut d = defs(&[("a", "b"), ("b", "a")]);
        let faults = substitute_definitions(&mut d, &Config::default());
        assert_eq!(faults, vec![cyclic("a"), cyclic("b")]);
        assert!(d.is_empty());
    }

    #[test]
    fn dependents_of_a_cycle_fail_too() {
        let mut d = defs(&[("a", "b"), ("b", "a"), ("c", "a|x"), ("d", "x|y")]);
        let faults = substitute_definitions(&mut d, &Config::default());
        assert_eq!(faults, vec![cyclic("a"), cyclic("b"), cyclic("c")]);
        assert_eq!(d, defs(&[("d", "x|y")]));
    }

    #[test]
    fn chain_needing_several_passes() {
        let mut d = defs(&[("c", "b"), ("a", "x"), ("b", "a")]);
        assert_eq!(substitution_pass(&mut d), 2);
        assert_eq!(d.get("c"), Some("(a)"));
        assert_eq!(substitution_pass(&mut d), 1);
        assert_eq!(substitution_pass(&mut d), 0);
        assert_eq!(d, defs(&[("c", "((x))"), ("a", "x"), ("b", "(x)")]));
    }

    #[test]
    fn pass_ceiling_fails_unresolved() {
        let mut d = defs(&[("c", "b"), ("a", "x"), ("b", "a")]);
        let faults = substitute_definitions(&mut d, &Config::new().with_max_passes(1));
        assert_eq!(faults, vec![cyclic("c")]);
        assert_eq!(d, defs(&[("a", "x"), ("b", "(x)")]));
    }

    #[test]
    fn length_ceiling_fails_the_grown_definition() {
        let mut d = defs(&[("a", "0123456789"), ("b", "a|a")]);
        let faults = substitute_definitions(&mut d, &Config::new().with_max_regex_len(10));
        assert_eq!(faults, vec![cyclic("b")]);
        assert_eq!(d, defs(&[("a", "0123456789")]));
    }

    #[test]
    fn length_ceiling_spares_independent_definitions() {
        let mut d = defs(&[
            ("c", "b"),
            ("a", "x"),
            ("b", "a"),
            ("big", "0123456789"),
            ("huge", "big|big"),
        ]);
        let faults = substitute_definitions(&mut d, &Config::new().with_max_regex_len(10));
        assert_eq!(faults, vec![cyclic("huge")]);
        assert_eq!(d, defs(&[("c", "((x))"), ("a", "x"), ("b", "(x)"), ("big", "0123456789")]));
    }

    #[test]
    fn length_ceiling_fails_dependents_of_the_grown_definition() {
        let mut d = defs(&[("a", "0123456789"), ("b", "a|a"), ("c", "b"), ("e", "c|y"), ("f", "y")]);
        let faults = substitute_definitions(&mut d, &Config::new().with_max_regex_len(10));
        assert_eq!(faults, vec![cyclic("b"), cyclic("c"), cyclic("e")]);
        assert_eq!(d, defs(&[("a", "0123456789"), ("f", "y")]));
    }

    #[test]
    fn dependents_of_a_self_reference_hit_the_pass_ceiling() {
        // `c` inlines `a|x`, whose `a` is again a reference to `a`
        let mut d = defs(&[("a", "a|x"), ("c", "a")]);
        let faults = substitute_definitions(&mut d, &Config::default());
        assert_eq!(faults, vec![cyclic("c")]);
        assert_eq!(d, defs(&[("a", "a|x")]));
    }
}
