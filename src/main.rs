use anyhow::Result;
use rill::{bench, repl};

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        None => repl::start(),
        Some("bench") => bench::run(),
        Some(other) => {
            eprintln!("unknown argument '{}'", other);
            eprintln!("usage: rill [bench]");
            std::process::exit(2);
        }
    }
}
