use crate::difficulty::Difficulty;
use lexopt::{Arg, Parser, ValueExt};
use std::path::PathBuf;

pub(crate) static USAGE: &str = "\
Usage: powersnake [<options>]

Play Snake in your terminal

Options:
  -c, --config <path>       Read configuration from the given file
  -d, --difficulty <level>  Preselect \"easy\", \"medium\", or \"hard\"
      --log-file <path>     Append diagnostic logs to the given file
  -h, --help                Show this help and exit
  -V, --version             Show the program version and exit
";

/// What the command line asked for
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Invocation {
    Run(Arguments),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Arguments {
    pub(crate) config: Option<PathBuf>,
    pub(crate) difficulty: Option<Difficulty>,
    pub(crate) log_file: Option<PathBuf>,
}

impl Invocation {
    pub(crate) fn from_parser(mut parser: Parser) -> Result<Invocation, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('d') | Arg::Long("difficulty") => {
                    args.difficulty = Some(parser.value()?.parse()?);
                }
                Arg::Long("log-file") => {
                    args.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Invocation::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Invocation::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Invocation::Run(args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Result<Invocation, lexopt::Error> {
        Invocation::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn no_args() {
        assert_eq!(parse(&[]).unwrap(), Invocation::Run(Arguments::default()));
    }

    #[test]
    fn all_options() {
        assert_eq!(
            parse(&[
                "--config",
                "cfg.toml",
                "-d",
                "hard",
                "--log-file=snake.log"
            ])
            .unwrap(),
            Invocation::Run(Arguments {
                config: Some(PathBuf::from("cfg.toml")),
                difficulty: Some(Difficulty::Hard),
                log_file: Some(PathBuf::from("snake.log")),
            })
        );
    }

    #[rstest]
    #[case(&["-h"], Invocation::Help)]
    #[case(&["--help"], Invocation::Help)]
    #[case(&["-V"], Invocation::Version)]
    #[case(&["-d", "easy", "--version"], Invocation::Version)]
    fn info_flags(#[case] args: &[&str], #[case] inv: Invocation) {
        assert_eq!(parse(args).unwrap(), inv);
    }

    #[rstest]
    #[case(&["--difficulty", "extreme"])]
    #[case(&["--difficulty"])]
    #[case(&["--frobnicate"])]
    #[case(&["stray"])]
    fn invalid(#[case] args: &[&str]) {
        assert!(parse(args).is_err());
    }
}
