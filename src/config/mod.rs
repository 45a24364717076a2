use structopt::StructOpt;

use std::time::Duration;

pub mod args;

use self::args::Args;

#[derive(Debug)]
pub struct Config {
    pub args: Args,
}

impl Config {
    pub fn from_args() -> Self {
        Self {
            args: Args::from_args(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.args.base_url
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.args.timeout)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn it_reads_flags() {
        let config = Config {
            args: Args::from_iter(&[
                "mensa-mcp",
                "--base-url",
                "http://localhost:8080/v2",
                "--timeout",
                "5",
            ]),
        };
        assert_eq!(config.base_url(), "http://localhost:8080/v2");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn it_rejects_invalid_timeouts() {
        let res = Args::from_iter_safe(&["mensa-mcp", "--timeout", "soon"]);
        assert!(res.is_err());
    }
}
