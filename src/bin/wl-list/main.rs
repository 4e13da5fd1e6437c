use std::io;
use workload_gen::args::Args;
use workload_gen::catalog::GENERATORS;
use workload_gen::format::{DefaultHeaderFormat, Printer};

fn main() {
    env_logger::init();
    let args = Args::from_env();
    let printer = Printer::new(DefaultHeaderFormat::new());
    if args.bool_flag("--full", false) {
        printer
            .print_full(&mut io::stdout(), GENERATORS)
            .expect("write stdout");
    } else {
        printer
            .print_summary_lines(&mut io::stdout(), GENERATORS)
            .expect("write stdout");
    }
}
