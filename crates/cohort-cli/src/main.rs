use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use cohort_cli::commands::cluster::{
    format_table, load_pipeline_config, parse_addition, run_cluster, ClusterArgs,
};
use cohort_cli::commands::session::Session;
use cohort_clustering::config::PipelineConfig;
use cohort_clustering::io::write_roster_csv;
use cohort_clustering::pipeline::MIN_OBSERVATIONS;
use cohort_clustering::records::RecordStore;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("COHORT_LOG", "error,cohort=info"))
        .init();

    let matches = Command::new("cohort")
        .version(clap::crate_version!())
        .author("Justin Sing <justincsing@gmail.com>")
        .about("Group students by GPA and activity with Ward hierarchical clustering")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("cluster")
                .about("Cluster a roster into four labelled groups")
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .help("Roster CSV with gpa and activity columns. Defaults to the built-in sample.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("add")
                        .short('a')
                        .long("add")
                        .help("Add a student as GPA,ACTIVITY. May be repeated.")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .action(ArgAction::Append)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("empty")
                        .long("empty")
                        .help("Start from an empty roster instead of the sample.")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("input"),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("Path to a JSON pipeline configuration file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output_file")
                        .short('o')
                        .long("output")
                        .help("Path to write the clustering result as JSON")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("report")
                        .short('r')
                        .long("report")
                        .help("Path to write the HTML report")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("sample").about("Print the built-in 10-student sample as CSV"),
        )
        .subcommand(
            Command::new("session")
                .about("Edit a roster interactively and re-run the clustering")
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .help("Roster CSV to start from. Defaults to the built-in sample.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("Path to a JSON pipeline configuration file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Written by {author-with-newline}Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    let outcome = match matches.subcommand() {
        Some(("cluster", sub_m)) => handle_cluster(sub_m),
        Some(("sample", _)) => handle_sample(),
        Some(("session", sub_m)) => handle_session(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    };

    if let Err(e) = outcome {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn config_from_matches(matches: &ArgMatches) -> Result<PipelineConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            log::info!("Using config: {:?}", path);
            load_pipeline_config(path)
        }
        None => Ok(PipelineConfig::default()),
    }
}

fn handle_cluster(matches: &ArgMatches) -> Result<()> {
    let config = config_from_matches(matches)?;
    let additions = matches
        .get_many::<String>("add")
        .unwrap_or_default()
        .map(|value| parse_addition(value))
        .collect::<Result<Vec<_>>>()?;

    let args = ClusterArgs {
        input: matches.get_one::<PathBuf>("input").cloned(),
        empty: matches.get_flag("empty"),
        additions,
        output: matches.get_one::<PathBuf>("output_file").cloned(),
        report: matches.get_one::<PathBuf>("report").cloned(),
    };

    match run_cluster(&args, &config)? {
        Some(result) => print!("{}", format_table(&result)),
        None => println!("Need at least {} students to analyse!", MIN_OBSERVATIONS),
    }
    Ok(())
}

fn handle_sample() -> Result<()> {
    let store = RecordStore::default();
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    write_roster_csv(&mut writer, store.all())?;
    writer.flush()?;
    Ok(())
}

fn handle_session(matches: &ArgMatches) -> Result<()> {
    let config = config_from_matches(matches)?;
    let store = match matches.get_one::<PathBuf>("input") {
        Some(path) => {
            cohort_cli::util::validate_csv_file(path)?;
            cohort_clustering::io::read_roster_csv(path)?
        }
        None => RecordStore::default(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    Session::new(store, config).run(stdin.lock(), &mut out)
}
