use anyhow::Result;
use crossbeam_channel::{Receiver, Sender};
use std::io::BufRead;
use std::time::Duration;
use synthview_core::PathId;
use synthview_viewer::command::{Command, HELP};
use synthview_viewer::graph::metrics::TreeStats;
use synthview_viewer::graph::{PathCodec, Redraw};
use synthview_viewer::net::{Fetcher, HttpBackend};
use synthview_viewer::render;
use synthview_viewer::util::{args, config};
use synthview_viewer::{Effects, ViewerError, ViewerState};
use tracing_subscriber::EnvFilter;

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn spawn_stdin_reader(tx: Sender<String>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}

fn print_tree(st: &ViewerState) {
    match st.selection.tree() {
        Some(tree) => print_lines(render::render_tree(tree)),
        None => println!("Empty graph"),
    }
}

fn print_timeline(st: &ViewerState) {
    print_lines(render::render_timelines(&st.timelines));
    if !st.timelines.highlight.is_empty() {
        print_lines(render::render_detail(&st.timelines));
    }
}

fn show(st: &ViewerState, fx: &Effects) {
    match &fx.tree {
        Some(Redraw::Full) => print_tree(st),
        Some(Redraw::Nodes(ids)) => {
            let ids: Vec<&str> = ids.iter().map(PathId::as_str).collect();
            println!("updated: {}", ids.join(", "));
        }
        None => {}
    }
    if fx.timeline && st.timelines.loaded {
        print_timeline(st);
    }
}

fn dispatch(fetcher: &Fetcher, fx: Effects) -> Effects {
    for req in fx.fetch.iter().cloned() {
        fetcher.submit(req);
    }
    fx
}

fn navigate(res: Result<Effects, ViewerError>, st: &ViewerState, fetcher: &Fetcher) {
    match res {
        Ok(fx) => {
            let fx = dispatch(fetcher, fx);
            show(st, &fx);
        }
        Err(e) => println!("internal error: {e}"),
    }
}

/// Returns `false` once the user asked to quit.
fn handle_line(line: &str, st: &mut ViewerState, fetcher: &Fetcher, reverse: bool) -> bool {
    let cmd = match Command::parse(line) {
        Ok(Some(cmd)) => cmd,
        Ok(None) => return true,
        Err(e) => {
            println!("{e:#}");
            return true;
        }
    };
    match cmd {
        Command::Select(id) => {
            let res = st.on_selection_changed(id);
            navigate(res, st, fetcher);
        }
        Command::Child(n) => navigate(st.select_child(n), st, fetcher),
        Command::Up => navigate(st.select_parent(), st, fetcher),
        Command::Children => {
            let current = st.selection.selected().cloned().unwrap_or_else(PathId::root);
            match st.selection.tree() {
                Some(tree) => print_lines(render::render_children(tree, &current)),
                None => println!("Empty graph"),
            }
        }
        Command::Point { row, column } => match st.select_point(row, column) {
            Ok(fx) => show(st, &fx),
            Err(e) => println!("{e}"),
        },
        Command::Reload => {
            dispatch(fetcher, st.reload());
        }
        Command::Tree => print_tree(st),
        Command::Timeline => print_timeline(st),
        Command::History => match (st.selection.tree(), st.selection.selected()) {
            (Some(tree), Some(id)) => print_lines(render::render_history(tree, id, reverse)),
            _ => println!("History: NOTHING"),
        },
        Command::Stats => match st.selection.tree() {
            Some(tree) => print_lines(render::render_stats(&TreeStats::collect(tree))),
            None => println!("Empty graph"),
        },
        Command::Help => println!("{HELP}"),
        Command::Quit => return false,
    }
    true
}

fn run(
    st: &mut ViewerState,
    fetcher: &Fetcher,
    net_rx: &Receiver<synthview_viewer::net::Incoming>,
    cmd_rx: &Receiver<String>,
    reverse: bool,
) {
    loop {
        crossbeam_channel::select! {
            recv(net_rx) -> msg => {
                let Ok(inc) = msg else { return };
                let fx = st.apply(inc);
                show(st, &fx);
            }
            recv(cmd_rx) -> line => {
                let Ok(line) = line else { return };
                if !handle_line(&line, st, fetcher, reverse) {
                    return;
                }
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = args::parse_args()?;
    let mut cfg = config::load_or_default();
    cli.apply(&mut cfg);
    init_tracing(&cfg.log_filter);

    if cli.save {
        let path = config::save(&cfg)?;
        tracing::info!(path = %path.display(), "viewer config saved");
    }

    tracing::info!(
        server = %cfg.server_url,
        separator = %cfg.path_separator,
        "synthview starting"
    );

    let (net_tx, net_rx) = crossbeam_channel::unbounded();
    let backend = HttpBackend::new(
        &cfg.server_url,
        Duration::from_millis(cfg.request_timeout_ms),
    )?;
    let fetcher = Fetcher::new(backend, net_tx)?;

    let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded();
    spawn_stdin_reader(cmd_tx);

    let mut st = ViewerState::new(PathCodec::new(cfg.path_separator));
    let start = cli.node.clone().unwrap_or_else(PathId::root);
    match st.on_selection_changed(start) {
        Ok(fx) => {
            dispatch(&fetcher, fx);
        }
        Err(e) => anyhow::bail!("initial selection failed: {e}"),
    }
    println!("{HELP}");

    run(&mut st, &fetcher, &net_rx, &cmd_rx, cfg.history_reverse);
    Ok(())
}
