use clap::Parser;

use crate::config::{Api, Config, Search};

#[derive(Parser, Debug)]
#[command(version, about = "Typeahead search against the storefront products API")]
pub(crate) struct CliArgs {
    /// Storefront API base URL (default: "http://localhost:3000")
    #[arg(long, env = "SS_API_BASE_URL")]
    pub(crate) api_base_url: Option<String>,

    /// Bearer token sent with every search request
    #[arg(long, env = "SS_API_TOKEN")]
    pub(crate) api_token: Option<String>,

    /// Request timeout in sec, 0 disables it (default: 10)
    #[arg(long, env = "SS_API_TIMEOUT")]
    pub(crate) timeout: Option<u64>,

    /// Quiet period before a query is sent, in ms (default: 350)
    #[arg(long, env = "SS_DEBOUNCE_MS")]
    pub(crate) debounce_ms: Option<u64>,

    /// Delay before a blurred dropdown closes, in ms (default: 200)
    #[arg(long, env = "SS_BLUR_GRACE_MS")]
    pub(crate) blur_grace_ms: Option<u64>,

    /// Results per lookup (default: 8)
    #[arg(short, long, env = "SS_LIMIT")]
    pub(crate) limit: Option<usize>,

    /// Config file path (default: "config.toml")
    #[arg(short, long, env = "SS_CONFIG")]
    pub(crate) config: Option<String>,

    /// Look up a single query, print its routes and exit
    #[arg(long)]
    pub(crate) once: Option<String>,
}

impl CliArgs {
    pub fn as_config(&self) -> Config {
        Config {
            api: Api {
                base_url: self.api_base_url.clone(),
                token: self.api_token.clone(),
                timeout: self.timeout,
            },
            search: Search {
                debounce_ms: self.debounce_ms,
                blur_grace_ms: self.blur_grace_ms,
                limit: self.limit,
            },
        }
    }
}

pub(crate) const HELP: &str = "\
Type to search, each line replaces the whole input. An empty line clears it.
  :focus      focus the input
  :blur       blur the input
  :down       pointer down on the results
  :select N   choose result N
  :quit       exit
Start a line with '::' to search for text beginning with ':'.";

/// One line of interactive input.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Line {
    Input(String),
    Focus,
    Blur,
    PointerDown,
    Select(usize),
    Quit,
    Unknown(String),
}

impl Line {
    pub(crate) fn parse(line: &str) -> Self {
        if let Some(literal) = line.strip_prefix("::") {
            return Line::Input(format!(":{literal}"));
        }

        let Some(command) = line.strip_prefix(':') else {
            return Line::Input(line.to_string());
        };

        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some("focus"), None, None) => Line::Focus,
            (Some("blur"), None, None) => Line::Blur,
            (Some("down"), None, None) => Line::PointerDown,
            (Some("quit"), None, None) | (Some("q"), None, None) => Line::Quit,
            (Some("select"), Some(index), None) => match index.parse() {
                Ok(index) => Line::Select(index),
                Err(_) => Line::Unknown(line.to_string()),
            },
            _ => Line::Unknown(line.to_string()),
        }
    }
}
