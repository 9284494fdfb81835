//! Interactive session over both views

use std::fs;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use beerburst::{ListView, Sunburst, SunburstConfig, Taxonomy, Toggle, ZoomOutcome};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

const HELP: &str = "\
Commands:
  zoom NAME    zoom the chart into NAME
  out          click the center circle (zoom out one level)
  step MS      advance the running transition by MS milliseconds
  finish       jump to the end of the running transition
  toggle NAME  expand or collapse NAME in the list
  list         print the list outline
  svg [FILE]   print the chart SVG, or write it to FILE
  focus        show the focused node and the transition state
  help         show this help
  quit         leave the session";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Zoom(String),
    Out,
    Step(Duration),
    Finish,
    Toggle(String),
    List,
    Svg(Option<String>),
    Focus,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let name = |what: &str| {
            if rest.is_empty() {
                bail!("'{}' needs a description name", what);
            }
            Ok(rest.to_string())
        };

        Ok(match word {
            "zoom" | "z" => Command::Zoom(name("zoom")?),
            "out" | "o" => Command::Out,
            "step" | "s" => {
                let ms: u64 = rest
                    .parse()
                    .with_context(|| format!("'{}' is not a number of milliseconds", rest))?;
                Command::Step(Duration::from_millis(ms))
            }
            "finish" | "f" => Command::Finish,
            "toggle" | "t" => Command::Toggle(name("toggle")?),
            "list" | "l" => Command::List,
            "svg" => Command::Svg((!rest.is_empty()).then(|| rest.to_string())),
            "focus" => Command::Focus,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("Unknown command '{}' (try 'help')", other),
        })
    }
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq)]
enum Reply {
    Print(String),
    Quit,
}

/// Both views over one taxonomy.
struct Session {
    taxonomy: Taxonomy,
    list: ListView,
    chart: Sunburst,
}

impl Session {
    fn new(taxonomy: Taxonomy, config: SunburstConfig) -> Self {
        let chart = Sunburst::from_taxonomy(&taxonomy, config);
        Self {
            taxonomy,
            list: ListView::new(),
            chart,
        }
    }

    fn execute(&mut self, command: Command) -> Result<Reply> {
        debug!(?command, "shell command");
        let text = match command {
            Command::Zoom(name) => {
                let outcome = self.chart.click_name(&name)?;
                self.describe_zoom(outcome, &name)
            }
            Command::Out => {
                let outcome = self.chart.click_center();
                self.describe_zoom(outcome, "center")
            }
            Command::Step(dt) => {
                if self.chart.advance(dt) {
                    format!("transition at {:.0}%", self.chart.progress() * 100.0)
                } else {
                    "transition finished".to_string()
                }
            }
            Command::Finish => {
                self.chart.finish();
                "transition finished".to_string()
            }
            Command::Toggle(name) => match self.list.toggle_name(&self.taxonomy, &name)? {
                Toggle::Expanded => format!("expanded {}", name),
                Toggle::Collapsed => format!("collapsed {}", name),
                Toggle::Leaf => format!("{} has no children", name),
            },
            Command::List => self
                .list
                .build(&self.taxonomy)
                .map(|list| list.to_outline().trim_end().to_string())
                .unwrap_or_else(|| "(no descriptions)".to_string()),
            Command::Svg(None) => self.chart.to_svg().trim_end().to_string(),
            Command::Svg(Some(path)) => {
                let svg = self.chart.to_svg();
                fs::write(&path, &svg).with_context(|| format!("Failed to write {}", path))?;
                format!("wrote {} bytes to {}", svg.len(), path)
            }
            Command::Focus => {
                let hierarchy = self.chart.hierarchy();
                let state = if self.chart.is_animating() {
                    format!("animating, {:.0}%", self.chart.progress() * 100.0)
                } else {
                    "at rest".to_string()
                };
                format!(
                    "focus: {}\ncenter: {}\n{}",
                    hierarchy.path(self.chart.focus()),
                    hierarchy.path(self.chart.center()),
                    state
                )
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Print(text))
    }

    fn describe_zoom(&self, outcome: ZoomOutcome, clicked: &str) -> String {
        match outcome {
            ZoomOutcome::Zoomed { focus, center } => {
                let hierarchy = self.chart.hierarchy();
                format!(
                    "zooming to {} (center: {})",
                    hierarchy.path(focus),
                    hierarchy.get(center).name
                )
            }
            ZoomOutcome::Ignored => format!("{} is a leaf; nothing to zoom into", clicked),
        }
    }
}

/// Run the read-eval-print loop until `quit` or end of input.
pub fn run(taxonomy: Taxonomy, config: SunburstConfig) -> Result<()> {
    let mut session = Session::new(taxonomy, config);
    let mut editor = DefaultEditor::new().context("Failed to start line editor")?;

    println!("beerburst {} (type 'help' for commands)", beerburst::VERSION);
    loop {
        match editor.readline("beerburst> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                recorded(editor.add_history_entry(line.as_str()));
                match Command::parse(&line).and_then(|command| session.execute(command)) {
                    Ok(Reply::Print(text)) => println!("{}", text),
                    Ok(Reply::Quit) => break,
                    Err(err) => eprintln!("error: {:#}", err),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("Failed to read input"),
        }
    }
    Ok(())
}

/// Whether a history entry was kept; failures are logged and otherwise ignored.
fn recorded(result: rustyline::Result<bool>) -> bool {
    match result {
        Ok(kept) => kept,
        Err(err) => {
            debug!(%err, "could not record history entry");
            false
        }
    }
}
