use clap::Parser;

mod args;
mod report;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = args::Args::parse();
    let mut out = std::io::stdout().lock();
    report::run(&args.command, &mut out)
}
