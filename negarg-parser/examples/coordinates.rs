//! Reads a world coordinate pair where the declination routinely starts
//! with a minus sign, e.g. --dec -62:50:02 for Proxima Centauri.
use clap::{Arg, Command};
use negarg_parser::{neg_string, NegativeCommand};

fn main() {
    let matches = NegativeCommand::new(
        Command::new("coordinates")
            .arg(
                Arg::new("ra")
                    .long("ra")
                    .required(true)
                    .help("right ascension, e.g. 14:29:43"),
            )
            .arg(
                Arg::new("dec")
                    .long("dec")
                    .required(true)
                    .value_parser(neg_string)
                    .help("declination, e.g. -62:50:02"),
            ),
    )
    .get_matches();

    println!("ra:  {}", matches.get_one::<String>("ra").unwrap());
    println!("dec: {}", matches.get_one::<String>("dec").unwrap());
}
