//! Main entry point for the gz2zip CLI application.
//!
//! Converts one gzip file and writes the ZIP archive to standard output.
//! Any error ends the run with a diagnostic and a nonzero exit status; whatever
//! was already written to stdout at that point must be discarded.

use std::fs::File;
use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use gz2zip::{BufferedCopy, Cli, ConvertOptions, Converter, SpliceCopy};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut errlog = stderrlog::new();
    errlog.verbosity(cli.log_level()).quiet(cli.quiet);
    errlog.init()?;

    let mut input = File::open(&cli.file)
        .with_context(|| format!("file open error: {}", cli.file.display()))?;
    let mut output = io::stdout().lock();

    let options = ConvertOptions { verify: cli.verify };
    let result = if cli.copy {
        Converter::with_options(BufferedCopy::new(), options).convert(&mut input, &mut output)
    } else {
        Converter::with_options(SpliceCopy::new(), options).convert(&mut input, &mut output)
    };
    let conversion = result.with_context(|| format!("couldn't convert {}", cli.file.display()))?;

    debug!("layout: {:?}", conversion.layout);
    Ok(())
}
