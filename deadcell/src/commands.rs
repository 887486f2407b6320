use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("deadcell")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("deadcell")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("check")
                .about(
                    "Check every URL found in a spreadsheet and report the broken ones, \
                with the cell each one came from.",
                )
                .arg(
                    arg!(-f --"file" <PATH>)
                        .required(true)
                        .help("Path to the spreadsheet (xlsx, xls, xlsb, ods)"),
                )
                .arg(
                    arg!(-s --"sheet" <NAME>)
                        .required(false)
                        .help("Sheet to scan (default: first sheet)"),
                )
                .arg(
                    arg!(-t --"threads" <NUM_WORKERS>)
                        .required(false)
                        .help("The number of concurrent URL probes. 1 checks strictly in order.")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("8"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Per-request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("5"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-F --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, csv, markdown")
                        .value_parser(["text", "json", "csv", "markdown"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            command!("list")
                .about("List the URL candidates in a spreadsheet without probing them")
                .arg(
                    arg!(-f --"file" <PATH>)
                        .required(true)
                        .help("Path to the spreadsheet (xlsx, xls, xlsb, ods)"),
                )
                .arg(
                    arg!(-s --"sheet" <NAME>)
                        .required(false)
                        .help("Sheet to scan (default: first sheet)"),
                ),
        )
}
