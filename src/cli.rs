use clap::{crate_authors, crate_description, crate_version, Arg, ArgAction, ArgMatches, Command};
use pretty_env_logger::env_logger::Builder;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::process::exit;

use dnsflip::definitions::{ConfigModel, Site};
use dnsflip::ns1::Ns1;
use dnsflip::service::{list_applications, Flipper};
use dnsflip::Config;

fn set_logger_level(b: &mut Builder) {
    let mut b = b;
    if env::var("RUST_LOG").is_err() {
        b = b.filter_level(log::LevelFilter::Info)
    }
    b.init();
}

fn setup_logger() {
    // Adapted from env_logger examples. <3 Systemd support
    match std::env::var("RUST_LOG_STYLE") {
        Ok(s) if s == "SYSTEMD" => {
            let builder = &mut pretty_env_logger::env_logger::builder();
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "<{}>{}: {}",
                    match record.level() {
                        log::Level::Error => 3,
                        log::Level::Warn => 4,
                        log::Level::Info => 6,
                        log::Level::Debug => 7,
                        log::Level::Trace => 7,
                    },
                    record.target(),
                    record.args()
                )
            });
            set_logger_level(builder);
        }
        _ => {
            let builder = &mut pretty_env_logger::formatted_builder();
            set_logger_level(builder);
        }
    };
}

fn check_command() -> Command {
    Command::new("check")
        .about("Check the A and CNAME records of a domain")
        .arg(
            Arg::new("fqdn")
                .required(true)
                .help("Fully qualified domain name to check"),
        )
}

fn flip_command() -> Command {
    Command::new("flip")
        .about("Flip one record to new values")
        .arg(
            Arg::new("fqdn")
                .required(true)
                .help("Fully qualified domain name to flip"),
        )
        .arg(
            Arg::new("record_type")
                .required(true)
                .help("Record type (e.g. A, CNAME)"),
        )
        .arg(Arg::new("zone").required(true).help("Zone name"))
        .arg(
            Arg::new("new_values")
                .required(true)
                .num_args(1..)
                .help("New values for the record, separated by spaces"),
        )
}

fn flip_app_command() -> Command {
    Command::new("flip_app")
        .visible_alias("flip-app")
        .about("Flip the records of an application from a definition file")
        .long_about(
            "Flip DNS records for an application based on a definition file. \
             Use --list to show the available applications without flipping.\n\n\
             Options take the --file form (or -f); the older single-dash -file form is no longer accepted.",
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Path to the file containing the flip definitions"),
        )
        .arg(
            Arg::new("app")
                .short('a')
                .long("app")
                .help("Application name"),
        )
        .arg(
            Arg::new("site")
                .short('s')
                .long("site")
                .value_parser(["primary", "secondary"])
                .help("Site to flip to"),
        )
        .arg(
            Arg::new("list")
                .action(ArgAction::SetTrue)
                .short('l')
                .long("list")
                .help("List available applications, or the detail of --app"),
        )
}

fn load_service() -> Flipper<Ns1> {
    match Config::populate_from_env().and_then(Config::get_service) {
        Ok(s) => s,
        Err(err) => {
            println!("{err}");
            exit(2);
        }
    }
}

fn check(args: &ArgMatches) {
    let Some(fqdn) = args.get_one::<String>("fqdn") else {
        return;
    };

    match load_service().check(fqdn) {
        Ok(records) if records.is_empty() => println!("No A or CNAME records found for {fqdn}\n"),
        Ok(records) => {
            for record in records {
                println!("{record}\n");
            }
        }
        Err(err) => {
            println!("{err}");
            exit(1);
        }
    }
}

fn flip(args: &ArgMatches) {
    let (Some(fqdn), Some(kind), Some(zone)) = (
        args.get_one::<String>("fqdn"),
        args.get_one::<String>("record_type"),
        args.get_one::<String>("zone"),
    ) else {
        return;
    };
    let values: Vec<String> = args
        .get_many::<String>("new_values")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();

    match load_service().flip_one(fqdn, kind, zone, &values) {
        Ok(()) => println!("Flipped {fqdn} {kind} in zone {zone} to {}", values.join(", ")),
        Err(err) => println!("An error occurred while flipping the record for {fqdn}: {err}"),
    }
}

fn flip_app(args: &ArgMatches) {
    let file = args.get_one::<PathBuf>("file");
    let app = args.get_one::<String>("app");
    let site = args.get_one::<String>("site");
    let list = args.get_flag("list");

    if file.is_none() && app.is_none() && site.is_none() && !list {
        println!("Please provide additional arguments for the flip_app action or use the --list option.");
        flip_app_command().print_help().ok();
        exit(1);
    }

    let Some(file) = file else {
        println!("Error: --file is required.");
        exit(1);
    };

    let model = match ConfigModel::from_file(file) {
        Ok(model) => model,
        Err(err) => {
            println!("{err}");
            exit(1);
        }
    };

    if list {
        match app {
            Some(app) => match load_service().list_application_detail(&model, app) {
                Ok(detail) => println!("\n{detail}\n"),
                Err(err) => {
                    println!("\n{err}");
                    exit(1);
                }
            },
            None => println!("{}", list_applications(&model)),
        }
        return;
    }

    let (Some(app), Some(site)) = (app, site) else {
        println!("Error: --app and --site are required unless --list is specified.");
        exit(1);
    };
    let site: Site = match site.parse() {
        Ok(site) => site,
        Err(err) => {
            println!("{err}");
            exit(1);
        }
    };

    if model.get(app).is_none() {
        println!("\nApplication '{app}' not found in the configuration file.");
        exit(1);
    }

    match load_service().flip_app(&model, app, site) {
        Ok(report) => println!("{report}"),
        Err(err) => {
            println!("\n{err}");
            exit(1);
        }
    }
}

pub(crate) fn main() {
    let cli = Command::new("dnsflip")
        .about(format!(
            "{}\n{} {}",
            crate_description!(),
            "Provider credentials are read from the environment:",
            "set DNSFLIP_NS1__API_KEY to the key, or to @/path/to/keyfile.",
        ))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(flip_command())
        .subcommand(flip_app_command())
        .version(crate_version!())
        .author(crate_authors!("\n"));

    let args = cli.get_matches();

    setup_logger();

    match args.subcommand() {
        Some(("check", sub)) => check(sub),
        Some(("flip", sub)) => flip(sub),
        Some(("flip_app", sub)) => flip_app(sub),
        _ => unreachable!("subcommand is required"),
    }
}
