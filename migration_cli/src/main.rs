//! Migration script
//!

#![deny(missing_docs)]

use std::io;

use migration_lib::Program;

fn main() {
    let program = Program::new(
        std::env::args(),
        io::stdin().lock(),
        io::stdout().lock(),
        io::stderr(),
    );
    std::process::exit(program.run());
}
