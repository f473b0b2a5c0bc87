use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use mdweave::{RenderOptions, render};
use rayon::prelude::*;

#[derive(Parser)]
#[command(about = "Render markup documents to HTML")]
struct Cli {
    /// Write each input's HTML next to it instead of printing to stdout
    #[arg(long = "write", requires = "files")]
    write: bool,
    /// Omit the embedded stylesheet
    #[arg(long = "bare")]
    bare: bool,
    /// Documents to render
    files: Vec<PathBuf>,
}

impl Cli {
    fn options(&self) -> RenderOptions {
        RenderOptions {
            include_css: !self.bare,
        }
    }
}

fn render_file(path: &Path, options: RenderOptions) -> anyhow::Result<String> {
    let source =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let rendered =
        render(&source, options).with_context(|| format!("rendering {}", path.display()))?;
    Ok(rendered.full_html)
}

/// Entry point for the command-line renderer.
///
/// With no files, reads a document from standard input and prints its HTML.
/// With files, prints each rendered document to standard output, or, with
/// `--write`, emits a sibling `.html` file per input. Conversions share no
/// state, so `--write` processes the file list in parallel.
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.files.is_empty() {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        println!("{}", render(&input, cli.options())?.full_html);
        return Ok(());
    }

    if cli.write {
        cli.files
            .par_iter()
            .try_for_each(|path| -> anyhow::Result<()> {
                let html = render_file(path, cli.options())?;
                let target = path.with_extension("html");
                fs::write(&target, html)
                    .with_context(|| format!("writing {}", target.display()))?;
                Ok(())
            })?;
        return Ok(());
    }

    for path in &cli.files {
        println!("{}", render_file(path, cli.options())?);
    }

    Ok(())
}
