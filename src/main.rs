use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

use vitals::commands;

fn cli() -> Command {
    let metric_arg = Arg::new("metric")
        .help("Metric name (lcp, cls, inp, ttfb)")
        .required(true)
        .index(1);
    let value_arg = Arg::new("value")
        .help("Metric value (milliseconds, or a score for cls)")
        .required(true)
        .allow_negative_numbers(true)
        .value_parser(clap::value_parser!(f64))
        .index(2);

    Command::new("vitals")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Watch Core Web Vitals react to a deliberately slow page")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("Use this config file instead of the default location")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(Command::new("version").about("Shows version information"))
        .subcommand(
            Command::new("watch")
                .about("Run the demo page and watch its metrics")
                .arg(
                    Arg::new("image-delay")
                        .long("image-delay")
                        .value_name("MS")
                        .help("Delay before the hero image loads")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("skeleton")
                        .long("skeleton")
                        .help("Reserve the image's space so nothing shifts")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("ttfb")
                        .long("ttfb")
                        .value_name("MS")
                        .help("Simulated time to first byte")
                        .value_parser(clap::value_parser!(u64).range(1..)),
                )
                .arg(
                    Arg::new("query")
                        .long("query")
                        .value_name("QUERY")
                        .help("Demo query string, e.g. '?imageDelay=3000&skeleton=true'"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print one JSON line per metric change instead of the TUI")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("duration")
                        .long("duration")
                        .value_name("SECS")
                        .help("How long to watch in JSON mode [default: 10]")
                        .value_parser(clap::value_parser!(u64))
                        .requires("json"),
                )
                .arg(
                    Arg::new("click")
                        .long("click")
                        .value_name("MS")
                        .help("Schedule a slow interaction (JSON mode, one per second)")
                        .value_parser(clap::value_parser!(u64))
                        .action(ArgAction::Append)
                        .requires("json"),
                ),
        )
        .subcommand(
            Command::new("thresholds")
                .about("Show or change the 'good' thresholds")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("show").about("Show configured thresholds"))
                .subcommand(
                    Command::new("set")
                        .about("Set the threshold of one metric")
                        .arg(metric_arg.clone())
                        .arg(value_arg.clone()),
                )
                .subcommand(
                    Command::new("reset")
                        .about("Restore default thresholds")
                        .arg(
                            Arg::new("yes")
                                .short('y')
                                .long("yes")
                                .help("Do not ask for confirmation")
                                .action(ArgAction::SetTrue),
                        ),
                ),
        )
        .subcommand(
            Command::new("classify")
                .about("Classify a single metric value")
                .arg(metric_arg)
                .arg(value_arg)
                .arg(
                    Arg::new("threshold")
                        .long("threshold")
                        .value_name("T")
                        .help("Threshold to use instead of the configured one")
                        .value_parser(clap::value_parser!(f64)),
                ),
        )
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let default_level = match matches.subcommand() {
        Some(("watch", sub)) if !sub.get_flag("json") => log::LevelFilter::Warn,
        _ => log::LevelFilter::Info,
    };
    vitals::init_logging(default_level);

    if matches.get_flag("version") {
        return commands::version();
    }

    dispatch(&matches)
}

fn dispatch(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("version", _)) => commands::version(),
        Some(("watch", sub_matches)) => commands::watch(sub_matches),
        Some(("thresholds", sub_matches)) => commands::thresholds::execute(sub_matches),
        Some(("classify", sub_matches)) => commands::classify(sub_matches),
        _ => {
            println!("Welcome to vitals!");
            println!("Use 'vitals --help' for more information.");
            Ok(())
        }
    }
}
