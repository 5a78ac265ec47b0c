//! Shows the backslash escaping scheme round-tripping whatever you pass.
//!
//! Try: cargo run --example escaping -- '-2' '\-1' '-o'
use negarg_parser::negative_number_escaper;

fn main() {
    let escaper = negative_number_escaper();
    for raw in std::env::args().skip(1) {
        let escaped = escaper.escape(&raw);
        let restored = escaper.unescape(&escaped);
        println!("{:?} -> {:?} -> {:?}", raw, escaped, restored);
        assert_eq!(restored, raw);
    }
}
