use clap::{App, Arg, ArgMatches, SubCommand};
use dualnbt::{Endian, Mode, Opts};
use env_logger::Env;
use log::{error, info};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn parse_mode(mode: Option<&str>) -> Result<Mode> {
    match mode {
        Some("disk") | None => Ok(Mode::Disk),
        Some("network") => Ok(Mode::Network),
        Some(other) => Err(format!("unknown mode {:?}, expected disk or network", other).into()),
    }
}

fn endian(args: &ArgMatches) -> Endian {
    if args.is_present("little-endian") {
        Endian::Little
    } else {
        Endian::Big
    }
}

fn dump(args: &ArgMatches) -> Result<()> {
    let path = args.value_of("file").ok_or("no input file")?;
    let mode = if args.is_present("network") {
        Mode::Network
    } else {
        Mode::Disk
    };
    let opts = Opts::new().mode(mode).endian(endian(args));

    let data = std::fs::read(path)?;
    let doc = dualnbt::from_bytes(&data, opts)?;

    if args.is_present("json") {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("{:#?}", doc);
    }
    Ok(())
}

fn convert(args: &ArgMatches) -> Result<()> {
    let input = args.value_of("in").ok_or("no input file")?;
    let output = args.value_of("out").ok_or("no output file")?;
    let from = parse_mode(args.value_of("from"))?;
    let to = parse_mode(args.value_of("to"))?;
    let endian = endian(args);

    let data = std::fs::read(input)?;
    let doc = dualnbt::from_bytes(&data, Opts::new().mode(from).endian(endian))?;
    let out = dualnbt::to_bytes(&doc, Opts::new().mode(to).endian(endian))?;
    std::fs::write(output, &out)?;

    info!(
        "converted {} ({} bytes, {:?}) to {} ({} bytes, {:?})",
        input,
        data.len(),
        from,
        output,
        out.len(),
        to
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let little_endian = Arg::with_name("little-endian")
        .long("little-endian")
        .takes_value(false)
        .required(false);

    let matches = App::new("nbt")
        .subcommand(
            SubCommand::with_name("dump")
                .arg(Arg::with_name("file").takes_value(true).required(true))
                .arg(
                    Arg::with_name("network")
                        .long("network")
                        .takes_value(false)
                        .required(false),
                )
                .arg(little_endian.clone())
                .arg(
                    Arg::with_name("json")
                        .long("json")
                        .takes_value(false)
                        .required(false),
                ),
        )
        .subcommand(
            SubCommand::with_name("convert")
                .arg(Arg::with_name("in").takes_value(true).required(true))
                .arg(Arg::with_name("out").takes_value(true).required(true))
                .arg(
                    Arg::with_name("from")
                        .long("from")
                        .takes_value(true)
                        .possible_values(&["disk", "network"])
                        .default_value("disk"),
                )
                .arg(
                    Arg::with_name("to")
                        .long("to")
                        .takes_value(true)
                        .possible_values(&["disk", "network"])
                        .default_value("network"),
                )
                .arg(little_endian),
        )
        .get_matches();

    match matches.subcommand() {
        ("dump", Some(args)) => dump(args)?,
        ("convert", Some(args)) => convert(args)?,
        _ => error!("{}", matches.usage()),
    };

    Ok(())
}
