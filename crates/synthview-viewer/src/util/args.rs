use anyhow::Result;
use std::ffi::OsString;
use synthview_core::PathId;

use crate::util::config::ViewerConfig;

/// Command-line overrides on top of the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub server: Option<String>,
    pub separator: Option<char>,
    pub node: Option<PathId>,
    /// Write the merged config back to the config file.
    pub save: bool,
}

impl CliArgs {
    pub fn apply(&self, cfg: &mut ViewerConfig) {
        if let Some(server) = &self.server {
            cfg.server_url = server.clone();
        }
        if let Some(sep) = self.separator {
            cfg.path_separator = sep;
        }
    }
}

pub fn parse_args() -> Result<CliArgs> {
    parse_args_from(std::env::args_os().skip(1))
}

fn parse_args_from<I>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        if arg == "--server" {
            let Some(url) = args.next() else {
                anyhow::bail!("--server expects a url");
            };
            out.server = Some(url.to_string_lossy().into_owned());
        } else if arg == "--separator" {
            let Some(value) = args.next() else {
                anyhow::bail!("--separator expects a single character");
            };
            let value = value.to_string_lossy();
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => out.separator = Some(c),
                _ => anyhow::bail!("invalid separator: {value} (expected one character)"),
            }
        } else if arg == "--node" {
            let Some(id) = args.next() else {
                anyhow::bail!("--node expects a node id");
            };
            out.node = Some(PathId(id.to_string_lossy().into_owned()));
        } else if arg == "--save" {
            out.save = true;
        } else {
            anyhow::bail!("unknown argument: {:?}", arg);
        }
    }

    Ok(out)
}
