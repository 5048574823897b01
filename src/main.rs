use blender_init::{cli, logger::Logger};
use std::env::args;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut logger = Logger::new_real();
    let behavior = cli::parse(args().skip(1));
    cli::execute(behavior, &mut logger)
}
