mod batch;
mod cli_app;

use std::io::Write;

fn init_logging(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn main() {
    let args = cli_app::parse_args();
    init_logging(args.verbosity);

    if let Err(e) = batch::run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
