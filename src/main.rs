use std::io;
use structopt::StructOpt;

mod stack;

mod menu;
use menu::Menu;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "dynstack",
    about = "Drives a dynamically growing stack of integers from an interactive menu."
)]
struct Opt {
    /// Enables trace log level
    #[structopt(short, long)]
    trace: bool,

    /// Enables info log level
    #[structopt(short, long)]
    info: bool,

    /// Don't list the available commands before each prompt
    #[structopt(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();

    let log_level = if opt.trace {
        log::Level::Trace
    } else if opt.info {
        log::Level::Info
    } else {
        log::Level::Warn
    };

    simple_logger::init_with_level(log_level)?;

    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut menu = Menu::new(stdin.lock(), stdout.lock(), opt.quiet);
    menu.run()
}
