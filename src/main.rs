use anyhow::Result;
use clap::{App, load_yaml};
use env_logger::Builder;
use jemallocator::Jemalloc;
use log::info;
use log::LevelFilter::*;
use pcapsieve::command::{compare, filter, stats};

#[global_allocator]
static ALLOC: Jemalloc = Jemalloc;

fn main() -> Result<()> {
    let yaml = load_yaml!("args.yml");
    let ver  = env!("CARGO_PKG_VERSION");
    let args = App::from_yaml(&yaml).version(ver).get_matches();

    let (module, level) = match args.occurrences_of("verbose") {
        0 => (Some(module_path!()), Info),
        1 => (Some(module_path!()), Debug),
        2 => (Some(module_path!()), Trace),
        _ => (None,                 Trace),
    };
    Builder::from_default_env().filter(module, level).init();

    info!("initializing pcapsieve {}", ver);

    match args.subcommand() {
        ("stats",   Some(args)) => stats(args),
        ("compare", Some(args)) => compare(args),
        ("filter",  Some(args)) => filter(args),
        _                       => Ok(()),
    }
}
