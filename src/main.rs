extern crate clap;
extern crate pretty_env_logger;
extern crate serde_json;
extern crate serde_yaml;
extern crate termcolor;
extern crate tokio;

#[macro_use]
mod color;

use cc_extractor::{
    browser::chromium::Chromium,
    report::{Console, Quiet},
    ContestExtractor, ContestMetadata, Options,
};
use clap::{crate_description, crate_name, Arg, ArgMatches, Command};
use pretty_env_logger::init_timed;
use std::{io::Write, process::exit, str::FromStr, time::Duration};
use termcolor::{ColorChoice, StandardStream};

fn is_number<T: FromStr>(value: &str) -> Result<(), String> {
    value
        .parse::<T>()
        .map(|_| ())
        .map_err(|_| format!("expected a number, got \"{}\"", value))
}
fn number<T: FromStr>(app: &ArgMatches, name: &str) -> Option<T> {
    app.value_of(name).and_then(|v| v.parse().ok())
}

fn options(app: &ArgMatches) -> Options {
    let mut ret = Options::default();
    if let Some(n) = number(app, "workers") {
        ret.workers = n;
    }
    if let Some(secs) = number(app, "timeout") {
        ret.wait_timeout = Duration::from_secs(secs);
    }
    ret.link_attempts = number(app, "attempts");
    ret
}

fn render(meta: &ContestMetadata, format: &str) -> Result<String, String> {
    match format {
        "json" => serde_json::to_string_pretty(meta).map_err(|e| e.to_string()),
        _ => serde_yaml::to_string(meta).map_err(|e| e.to_string()),
    }
}

#[tokio::main]
async fn main() {
    init_timed();
    let app = Command::new(crate_name!())
        .about(crate_description!())
        .version(get_version!("version"))
        .long_version(get_version!("long_version"))
        .arg(
            Arg::new("link")
                .required(true)
                .help("Contest link, https://www.codechef.com/<contest>[?...]"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .takes_value(true)
                .possible_values(["yaml", "json"])
                .default_value("yaml")
                .help("Output format of the metadata"),
        )
        .arg(
            Arg::new("workers")
                .long("workers")
                .short('j')
                .takes_value(true)
                .validator(is_number::<usize>)
                .help("Problems extracted at once"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .takes_value(true)
                .validator(is_number::<u64>)
                .help("Seconds to wait for a page element"),
        )
        .arg(
            Arg::new("attempts")
                .long("attempts")
                .takes_value(true)
                .validator(is_number::<u32>)
                .help("Give up after this many empty problem listings"),
        )
        .arg(
            Arg::new("chrome")
                .long("chrome")
                .takes_value(true)
                .help("Path to the chrome executable"),
        )
        .arg(
            Arg::new("no-sandbox")
                .long("no-sandbox")
                .help("Launch chrome with --no-sandbox"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only print the metadata"),
        )
        .get_matches();

    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let mut launcher = Chromium::new().no_sandbox(app.is_present("no-sandbox"));
    if let Some(path) = app.value_of("chrome") {
        launcher = launcher.executable(path);
    }
    let link = app.value_of("link").unwrap_or_default();
    let extractor = ContestExtractor::new(link, launcher).with_options(options(&app));
    let quiet = app.is_present("quiet");
    let extractor = if quiet {
        extractor.with_reporter(Quiet)
    } else {
        extractor.with_reporter(Console::stderr(ColorChoice::Auto))
    };

    match extractor.extract_meta_data().await {
        Ok(meta) => match render(&meta, app.value_of("format").unwrap_or("yaml")) {
            Ok(text) => {
                println!("{}", text);
                if !quiet {
                    write_ok!(
                        &mut stderr,
                        "Success",
                        "Extracted {} problems of {}",
                        meta.len(),
                        meta.contest_code
                    );
                }
            }
            Err(e) => {
                write_error!(&mut stderr, "Error", "Error writing metadata: {}", e);
                exit(1);
            }
        },
        Err(e) => {
            write_error!(&mut stderr, "Fail", "{}", e);
            exit(1);
        }
    }
}
