use std::process;
use workload_gen::args::Args;
use workload_gen::io_wait;

fn main() {
    env_logger::init();
    let args = Args::from_env();
    let config = match io_wait::Config::from_args(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };
    let mut file = config.open().expect("open workload file");
    io_wait::run(&config, &mut file).expect("write workload file");
}
