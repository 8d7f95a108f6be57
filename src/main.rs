use rank_trees::driver::{self, Engine};
use rank_trees::DriverError;
use std::io::{self, BufWriter, Write};

// usage: rank_trees [splay|treap|fhq] < commands
fn main() {
    if let Err(err) = try_main() {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), DriverError> {
    let engine = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<Engine>()?,
        None => Engine::default(),
    };

    let stdin = io::stdin();
    let commands = driver::read_commands(stdin.lock())?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let res = driver::run_engine(engine, &commands, &mut out);
    out.flush()?;
    res
}
