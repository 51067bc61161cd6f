use anyhow::{bail, Context, Result};
use synthview_core::PathId;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(PathId),
    Child(usize),
    Up,
    Children,
    Point { row: usize, column: usize },
    Reload,
    Tree,
    Timeline,
    History,
    Stats,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  select <id>         select a synthesis node
  child <n> | up      move to option <n> of the node, or back to its parent
  options             list options of the selected node
  point <row> <col>   select a timeline point
  reload              refetch tree and timelines
  tree | timeline | history | stats
  quit";

impl Command {
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let cmd = match head {
            "select" | "s" => {
                let id = words.next().context("select expects a node id")?;
                Command::Select(PathId::from(id))
            }
            "child" | "c" => {
                let n = words.next().context("child expects an option number")?;
                Command::Child(n.parse().with_context(|| format!("bad option number: {n}"))?)
            }
            "up" | "u" => Command::Up,
            "options" | "o" => Command::Children,
            "point" | "p" => {
                let row = words.next().context("point expects <row> <col>")?;
                let column = words.next().context("point expects <row> <col>")?;
                Command::Point {
                    row: row.parse().with_context(|| format!("bad row: {row}"))?,
                    column: column.parse().with_context(|| format!("bad column: {column}"))?,
                }
            }
            "reload" | "r" => Command::Reload,
            "tree" => Command::Tree,
            "timeline" | "t" => Command::Timeline,
            "history" | "h" => Command::History,
            "stats" => Command::Stats,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => bail!("unknown command: {other}"),
        };
        if let Some(extra) = words.next() {
            bail!("unexpected argument: {extra}");
        }
        Ok(Some(cmd))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(
            Command::parse("select -:2:1").unwrap(),
            Some(Command::Select(PathId::from("-:2:1")))
        );
        assert_eq!(
            Command::parse("  p 3 14 ").unwrap(),
            Some(Command::Point { row: 3, column: 14 })
        );
        assert_eq!(Command::parse("child 2").unwrap(), Some(Command::Child(2)));
        assert_eq!(Command::parse("up").unwrap(), Some(Command::Up));
        assert_eq!(Command::parse("o").unwrap(), Some(Command::Children));
        assert_eq!(Command::parse("q").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(Command::parse("point 1").is_err());
        assert!(Command::parse("point a 2").is_err());
        assert!(Command::parse("select").is_err());
        assert!(Command::parse("child").is_err());
        assert!(Command::parse("child -1").is_err());
        assert!(Command::parse("tree now").is_err());
        assert!(Command::parse("zoom").is_err());
    }
}
