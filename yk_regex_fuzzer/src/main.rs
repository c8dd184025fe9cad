
extern crate yk_regex_parse;
extern crate rand;

mod rnd;
mod str_gen;
mod checks;

use clap::Parser;
use rnd::*;
use str_gen::*;
use checks::CheckSuite;

/// Feeds random regexes through normalization and tree building, checking
/// the properties that must hold for every input.
#[derive(Parser, Debug)]
#[command(name = "yk_regex_fuzzer", version, about)]
struct Args {
    /// Number of regexes to generate.
    #[arg(short = 'n', long, default_value_t = 10_000)]
    iterations: usize,

    /// Seed of the generator, taken from the system time if missing.
    #[arg(long)]
    seed: Option<u64>,

    /// Nesting depth of the structured generator.
    #[arg(long, default_value_t = 4)]
    depth: usize,

    /// Generate unstructured noise over the regex alphabet instead of
    /// well-formed regexes.
    #[arg(long)]
    noise: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    set_seed(args.seed.unwrap_or_else(seed_from_system_time));
    log::info!("fuzzing with seed {}", current_seed());

    let gen: Box<dyn StringGenStrategy> = if args.noise {
        Box::new(RandomStringGenerator::with_len_and_charset(0..16, "abc()|*+?ϵ"))
    }
    else {
        Box::new(RegexGenerator::with_depth_and_alphabet(args.depth, "abcd"))
    };
    let suite = CheckSuite::default();

    let mut failures = 0;
    for _ in 0..args.iterations {
        let regex = gen.generate();
        for (check, message) in suite.run(&regex) {
            failures += 1;
            log::error!("{} failed for `{}`: {}", check, regex, message);
        }
    }

    println!("{} regexes, {} failure(s), seed {}", args.iterations, failures, current_seed());
    if failures > 0 {
        std::process::exit(1);
    }
}
