//! The classic accumulator demo: print the max of the given integers, or
//! their sum with --sum.  Negative integers work without any quoting.
//!
//! Try: cargo run --example accumulator -- 1 -2 3 4 --sum
use clap::{Arg, ArgAction, Command};
use negarg_parser::{neg_int, NegativeCommand};

fn main() {
    let matches = NegativeCommand::new(
        Command::new("accumulate")
            .about("Process some integers.")
            .arg(
                Arg::new("integers")
                    .num_args(1..)
                    .required(true)
                    .value_parser(neg_int)
                    .help("an integer for the accumulator"),
            )
            .arg(
                Arg::new("sum")
                    .long("sum")
                    .action(ArgAction::SetTrue)
                    .help("sum the integers (default: find the max)"),
            ),
    )
    .get_matches();

    let integers: Vec<i64> = matches
        .get_many::<i64>("integers")
        .unwrap()
        .copied()
        .collect();
    let result = if matches.get_flag("sum") {
        integers.iter().sum::<i64>()
    } else {
        *integers.iter().max().unwrap()
    };
    println!("{}", result);
}
