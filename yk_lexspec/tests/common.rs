
use yk_lexspec::{compile_spec, Config, Report};

/// Splits a literal specification into cleaned lines.
pub fn lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

pub fn compile(text: &str) -> Report {
    compile_spec(lines(text), &Config::default())
}
