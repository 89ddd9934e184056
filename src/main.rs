use std::io;

use clap::Parser;

use xdpsieve::cli::{Cli, ReplayArgs};
use xdpsieve::classify::Program;
use xdpsieve::error::SieveError;
use xdpsieve::output;
use xdpsieve::pcap;
use xdpsieve::replay;

/// Exit codes: 1 bad configuration, 2 unreadable input, 3 output failure,
/// 4 anything else.
fn exit_code(err: &SieveError) -> i32 {
    match err {
        SieveError::Config(_) => 1,
        SieveError::Input(_) | SieveError::Pcap(_) | SieveError::LinkType(_) => 2,
        SieveError::Output(_) | SieveError::Serialization(_) => 3,
        SieveError::Fatal(_) => 4,
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| run(cli)));

    match result {
        Ok(Ok(())) => std::process::exit(0),
        Ok(Err(e)) => {
            eprintln!("error: {e}");
            std::process::exit(exit_code(&e));
        }
        Err(_) => {
            eprintln!("error: fatal: unexpected panic");
            std::process::exit(4);
        }
    }
}

fn run(cli: Cli) -> Result<(), SieveError> {
    let (program, args) = cli.resolve();
    let config = args.dissect_config()?;

    log::info!(
        "{program}: replaying {} (vlan depth {}, ext chain {}, headroom {})",
        args.input.display(),
        config.vlan_max_depth(),
        config.ipv6_ext_max_chain(),
        args.headroom
    );

    let capture = pcap::open_pcap(&args.input)?;
    if capture.frames.is_empty() {
        log::warn!("{} contains no frames", args.input.display());
    }

    let outcome = replay::replay(program, &capture, config, args.headroom);

    if let Some(path) = &args.output {
        write_forwarded(&args, program, path, capture.nanosecond, &outcome)?;
    }

    output::write_report(&outcome, args.format, &mut io::stdout().lock())
}

fn write_forwarded(
    args: &ReplayArgs,
    program: Program,
    path: &std::path::Path,
    nanosecond: bool,
    outcome: &replay::ReplayOutcome,
) -> Result<(), SieveError> {
    let mut writer = pcap::create_pcap(path, nanosecond)?;
    for frame in &outcome.forwarded {
        writer.write_frame(frame)?;
    }
    let written = writer.written();
    writer.finish()?;
    log::info!(
        "{program}: wrote {written} of {} frames from {} to {}",
        outcome.reports.len(),
        args.input.display(),
        path.display()
    );
    Ok(())
}
