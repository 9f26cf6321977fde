//! Command-line glue around the finder: settings, running, printing.

pub mod args;
pub mod display;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub use args::{Args, ColorChoice};
use display::{component_to_string, snapshot_to_string};

use crate::scc::{self, Graph};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub input: Option<PathBuf>,
    pub trace: bool,
    pub color: bool,
}

impl Settings {
    pub fn from_args(args: &Args, is_tty: bool) -> Settings {
        Settings {
            input: args.input.clone().filter(|path| path != Path::new("-")),
            trace: args.trace,
            color: args.color.enabled(is_tty),
        }
    }
}

pub fn run<W: Write>(graph: &Graph<String>, settings: &Settings, out: &mut W) -> io::Result<()> {
    let components = if settings.trace {
        let mut trace = scc::trace(graph);
        for (step, snapshot) in trace.by_ref().enumerate() {
            writeln!(out, "{}", snapshot_to_string(step, &snapshot, settings.color))?;
        }
        trace.into_components()
    } else {
        scc::find_components(graph)
    };

    for (n, component) in components.iter().enumerate() {
        writeln!(out, "component {n}: {}", component_to_string(component))?;
    }
    writeln!(
        out,
        "{} vertices, {} components",
        graph.all_vertices().len(),
        components.len()
    )
}
