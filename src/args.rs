use std::path::PathBuf;
use std::str::FromStr;
use anyhow::Result;
use clap::ArgMatches;
use log::info;
use regex::Regex;

pub fn opt<T: FromStr>(arg: Option<&str>) -> Result<Option<T>> {
    Ok(arg.map(|s| T::from_str(s).map_err(|_| {
        let msg  = format!("invalid argument value '{}'", s);
        let kind = clap::ErrorKind::InvalidValue;
        clap::Error::with_description(&msg, kind)
    })).transpose()?)
}

pub fn file(arg: Option<&str>) -> Result<PathBuf> {
    let path = PathBuf::from(arg.unwrap_or_default());
    if !path.is_file() {
        let msg  = format!("invalid argument '{}': no such file", path.display());
        let kind = clap::ErrorKind::InvalidValue;
        return Err(clap::Error::with_description(&msg, kind).into());
    }
    Ok(path)
}

pub fn exclude(args: &ArgMatches) -> Result<Regex> {
    let exclude = args.values_of("exclude").map(|vs| {
        vs.map(String::from).collect::<Vec<_>>().join("|")
    }).unwrap_or_else(|| "^$".to_string());
    Ok(Regex::new(&exclude)?)
}

pub fn paths(args: &ArgMatches, name: &str, exclude: &Regex) -> Vec<PathBuf> {
    args.values_of(name).into_iter().flatten().filter_map(|path| {
        if exclude.is_match(path) {
            info!("candidate {} excluded", path);
            return None;
        }
        Some(PathBuf::from(path))
    }).collect()
}
