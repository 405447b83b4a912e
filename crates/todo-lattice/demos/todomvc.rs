//! Todo Lattice Console Demo
//!
//! Drives a TodoMVC window through its headless view models from stdin and
//! prints the window after every command.
//!
//! Run with: cargo run -p todo-lattice --example todomvc [-- config.toml]
//!
//! Set `RUST_LOG=todo_lattice=trace` to watch events and re-renders.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use todo_lattice::prelude::*;
use todo_lattice::StoreDebug;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
commands:
  add <text>        add a todo
  done <n>          mark row n done
  undone <n>        mark row n not done
  edit <n>          start editing row n (double click)
  text <n> <text>   commit new text for row n
  delete <n>        delete row n
  all               toggle mark-all
  clear             clear completed
  filter <name>     all | active | completed
  style <name>      switch GUI style
  list              dump the store
  help              show this text
  quit              exit";

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let state = Arc::new(AppState::with_config(&config, ThemeStyles::default())?);
    let app = TodoApp::new(state);

    println!("{HELP}\n");
    print!("{}", app.render());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "quit" | "exit" => break,
            "help" => {
                println!("{HELP}");
                continue;
            }
            "list" => {
                print!("{}", StoreDebug::new().with_ids(true).format(app.state()));
                continue;
            }
            _ => {}
        }

        if let Err(message) = run(&app, command, rest) {
            println!("error: {message}");
        }
        print!("{}", app.render());
    }

    Ok(())
}

fn run(app: &TodoApp, command: &str, rest: &str) -> std::result::Result<(), String> {
    match command {
        "add" => {
            app.input()
                .submit(rest)
                .ok_or_else(|| "nothing to add".to_string())?;
        }
        "done" | "undone" => {
            let id = row(app, rest)?;
            app.list().toggle(id, command == "done");
        }
        "edit" => {
            let id = row(app, rest)?;
            if !app.list().on_double_click(id) {
                return Err("row is already being edited".into());
            }
        }
        "text" => {
            let (n, text) = rest.split_once(' ').unwrap_or((rest, ""));
            let id = row(app, n)?;
            if !app.list().commit_edit(id, text) {
                return Err("text must not be blank".into());
            }
        }
        "delete" => {
            let id = row(app, rest)?;
            app.list().delete(id);
        }
        "all" => app.mark_all().toggle(),
        "clear" => app.footer().clear_completed(),
        "filter" => {
            let filter: Filter = rest.parse().map_err(|e: TodoError| e.to_string())?;
            app.footer().filters().click(filter);
        }
        "style" => app.style_menu().trigger(rest.trim()).map_err(|e| e.to_string())?,
        other => return Err(format!("unknown command `{other}`, try `help`")),
    }
    Ok(())
}

/// Resolve a 1-based row number to a todo handle.
fn row(app: &TodoApp, n: &str) -> std::result::Result<TodoId, String> {
    let index: usize = n
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a row number", n.trim()))?;
    index
        .checked_sub(1)
        .and_then(|i| app.list().rows().get(i).map(|row| row.id))
        .ok_or_else(|| format!("no row {index}"))
}
