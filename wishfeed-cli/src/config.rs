use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::{
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
};
use wishfeed_common::synthesize::ReplyContentStyle;
use wishfeed_store::discovery::DEFAULT_URL_PREFIX;

pub const ENV_PREFIX: &str = "WISHFEED_";

#[derive(Parser, Debug)]
#[command(
    name = "wishfeed",
    about = "Attach media files to the posts of a wish feed",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    /// Only reconcile the post with this id; pass ids named like a subcommand after `--`
    pub post_id: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Clone, Eq, PartialEq, Debug)]
pub enum Command {
    /// Print which posts and replies carry media, without changing anything
    Verify,
    /// Serve the post collection as JSON
    Serve,
}

/// Settings read from `WISHFEED_`-prefixed environment variables.
#[derive(Clone, Eq, PartialEq, Debug, Deserialize)]
#[serde(default)]
pub struct Env {
    pub posts_file: PathBuf,
    pub media_root: PathBuf,
    pub media_url_prefix: String,
    pub reply_content: ReplyContentStyle,
    pub server_address: IpAddr,
    pub server_port: u16,
    pub cache_ttl_seconds: u64,
}

impl Default for Env {
    fn default() -> Self {
        Self {
            posts_file: PathBuf::from("src/data/tweets.json"),
            media_root: PathBuf::from("public/img"),
            media_url_prefix: DEFAULT_URL_PREFIX.to_owned(),
            reply_content: ReplyContentStyle::Empty,
            server_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            server_port: 3000,
            cache_ttl_seconds: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{Cli, Command, Env};
    use clap::Parser;
    use std::path::PathBuf;
    use wishfeed_common::synthesize::ReplyContentStyle;

    #[test]
    fn command_line() {
        let cli = Cli::try_parse_from(["wishfeed"]).unwrap();
        assert_eq!((cli.post_id, cli.command), (None, None));

        let cli = Cli::try_parse_from(["wishfeed", "32"]).unwrap();
        assert_eq!((cli.post_id.as_deref(), cli.command), (Some("32"), None));

        let cli = Cli::try_parse_from(["wishfeed", "verify"]).unwrap();
        assert_eq!((cli.post_id, cli.command), (None, Some(Command::Verify)));

        assert!(Cli::try_parse_from(["wishfeed", "1", "2"]).is_err());
    }

    #[test]
    fn post_ids_named_like_subcommands() {
        let cli = Cli::try_parse_from(["wishfeed", "serve"]).unwrap();
        assert_eq!((cli.post_id, cli.command), (None, Some(Command::Serve)));

        for id in ["serve", "verify"] {
            let cli = Cli::try_parse_from(["wishfeed", "--", id]).unwrap();
            assert_eq!((cli.post_id.as_deref(), cli.command), (Some(id), None));
        }
    }

    #[test]
    fn env_from_variables() {
        let env: Env = envy::from_iter([
            ("posts_file".to_owned(), "data/posts.json".to_owned()),
            ("reply_content".to_owned(), "continued".to_owned()),
            ("server_port".to_owned(), "8080".to_owned()),
        ])
        .unwrap();

        assert_eq!(env.posts_file, PathBuf::from("data/posts.json"));
        assert_eq!(env.reply_content, ReplyContentStyle::Continued);
        assert_eq!(env.server_port, 8080);
        assert_eq!(env.media_root, Env::default().media_root);
    }
}
