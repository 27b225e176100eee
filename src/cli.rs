use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "gz2zip")]
#[command(version)]
#[command(about = "Repackage a gzip file as a ZIP archive without recompressing it", long_about = None)]
#[command(after_help = "The archive is written to standard output.\n\nExamples:\n  \
  gz2zip notes.txt.gz > notes.zip          convert to a file\n  \
  gz2zip data.gz | ssh host 'cat > d.zip'  stream the archive over a pipe")]
pub struct Cli {
    /// gzip file to convert
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Inflate the payload and check it against the gzip trailer first
    #[arg(long)]
    pub verify: bool,

    /// Always copy through a buffer instead of splicing
    #[arg(long)]
    pub copy: bool,

    /// Pass multiple times for additional verbosity (info, debug, trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Silence log output
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Verbosity for the stderr logger. Warnings are shown by default.
    pub fn log_level(&self) -> usize {
        self.verbose as usize + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_file() {
        let cli = Cli::try_parse_from(["gz2zip", "in.gz"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("in.gz"));
        assert!(!cli.verify && !cli.copy);
        assert_eq!(cli.log_level(), 1);

        assert!(Cli::try_parse_from(["gz2zip"]).is_err());
        assert!(Cli::try_parse_from(["gz2zip", "a.gz", "b.gz"]).is_err());
    }

    #[test]
    fn flags() {
        let cli = Cli::try_parse_from(["gz2zip", "--verify", "--copy", "-vv", "in.gz"]).unwrap();
        assert!(cli.verify && cli.copy);
        assert_eq!(cli.log_level(), 3);

        assert!(Cli::try_parse_from(["gz2zip", "-q", "-v", "in.gz"]).is_err());
    }

    #[test]
    fn definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
