use std::path::PathBuf;

use clap::Parser;

/// validgen - generate Valid() methods for Go structs from struct tags
#[derive(Parser, Debug)]
#[command(name = "validgen")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Example: validgen --type Pill,Order models/pill.go")]
pub struct Cli {
    /// Go source file declaring the structs
    pub file: PathBuf,

    /// Comma-separated struct names to generate for
    #[arg(short = 't', long = "type", value_name = "A,B", required_unless_present = "dump")]
    pub types: Option<String>,

    /// Output file (default: <dir>/<stem>_validgen.go)
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Config file (default: validgen.toml next to FILE, then the user config)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Struct-tag key holding the constraints
    #[arg(long, value_name = "KEY")]
    pub tag: Option<String>,

    /// Name of the generated method
    #[arg(long, value_name = "NAME")]
    pub method: Option<String>,

    /// Suffix for the default output file name
    #[arg(long, value_name = "SUFFIX")]
    pub suffix: Option<String>,

    /// Print the generated code instead of writing it
    #[arg(long, conflicts_with = "check")]
    pub stdout: bool,

    /// Exit non-zero and print a diff if the output file is stale
    #[arg(long)]
    pub check: bool,

    /// Print the parsed declarations as JSON and exit
    #[arg(long, conflicts_with_all = ["stdout", "check"])]
    pub dump: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_minimal() {
        let cli = Cli::try_parse_from(["validgen", "--type", "Pill", "pill.go"]).unwrap();
        assert_eq!(cli.types.as_deref(), Some("Pill"));
        assert_eq!(cli.file, PathBuf::from("pill.go"));
        assert!(cli.out.is_none());
        assert!(!cli.stdout && !cli.check && !cli.dump);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_parse_all_options() {
        let cli = Cli::try_parse_from([
            "validgen",
            "-t",
            "A,B",
            "--out",
            "gen.go",
            "--config",
            "v.toml",
            "--tag",
            "validate",
            "--method",
            "Validate",
            "--suffix",
            "_v.go",
            "--check",
            "-vv",
            "src.go",
        ])
        .unwrap();
        assert_eq!(cli.types.as_deref(), Some("A,B"));
        assert_eq!(cli.out, Some(PathBuf::from("gen.go")));
        assert_eq!(cli.config, Some(PathBuf::from("v.toml")));
        assert_eq!(cli.tag.as_deref(), Some("validate"));
        assert_eq!(cli.method.as_deref(), Some("Validate"));
        assert_eq!(cli.suffix.as_deref(), Some("_v.go"));
        assert!(cli.check);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_requires_type_unless_dump() {
        assert!(Cli::try_parse_from(["validgen", "pill.go"]).is_err());
        let cli = Cli::try_parse_from(["validgen", "--dump", "pill.go"]).unwrap();
        assert!(cli.dump);
        assert!(cli.types.is_none());
    }

    #[test]
    fn test_cli_requires_file() {
        assert!(Cli::try_parse_from(["validgen", "--type", "A"]).is_err());
    }

    #[test]
    fn test_cli_stdout_conflicts_with_check() {
        assert!(Cli::try_parse_from(["validgen", "-t", "A", "--stdout", "--check", "a.go"]).is_err());
    }
}
