use std::process;
use workload_gen::args::Args;
use workload_gen::cpu;

fn main() {
    env_logger::init();
    let args = Args::from_env();
    let config = match cpu::Config::from_args(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };
    cpu::run(&config);
}
