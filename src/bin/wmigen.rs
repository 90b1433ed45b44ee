//! Generate WMI class bindings from a DSL input file.
//!
//! Usage:
//!   wmigen [--input FILE] [--output-dir DIR] [--prefix NAME] [--check]
//!
//! Without options the paths follow the build-system layout: when `srcdir` is
//! set the input is `$srcdir/hyperv/hyperv_wmi_generator.input` and output goes
//! to `$srcdir/hyperv`, otherwise both live in the current directory.
//!
//! Writes `<prefix>.generated.typedef`, `<prefix>.generated.h` and
//! `<prefix>.generated.c`. Nothing is written if the input has an error.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const INPUT_FILE_NAME: &str = "hyperv_wmi_generator.input";

#[derive(Parser)]
#[command(name = "wmigen")]
#[command(about = "Generate WMI class bindings from a class DSL", long_about = None)]
struct Cli {
    /// DSL input file
    #[arg(short, long, env = "WMIGEN_INPUT")]
    input: Option<PathBuf>,

    /// Directory the generated files are written to
    #[arg(short, long, env = "WMIGEN_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// File name prefix of the generated files
    #[arg(short, long, default_value = "hyperv_wmi_classes")]
    prefix: String,

    /// Generate and report, but do not write any file
    #[arg(long, default_value_t = false)]
    check: bool,

    /// Source tree root used to locate default paths
    #[arg(long, env = "srcdir", hide = true)]
    srcdir: Option<PathBuf>,
}

impl Cli {
    fn input_path(&self) -> PathBuf {
        match (&self.input, &self.srcdir) {
            (Some(path), _) => path.clone(),
            (None, Some(srcdir)) => srcdir.join("hyperv").join(INPUT_FILE_NAME),
            (None, None) => PathBuf::from(INPUT_FILE_NAME),
        }
    }

    fn output_dir(&self) -> PathBuf {
        match (&self.output_dir, &self.srcdir) {
            (Some(dir), _) => dir.clone(),
            (None, Some(srcdir)) => srcdir.join("hyperv"),
            (None, None) => PathBuf::from("."),
        }
    }
}

fn display_generated(path: &Path) -> String {
    let shown = path.strip_prefix(".").unwrap_or(path);
    format!("  GEN      {}", shown.display())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let input = cli.input_path();
    let src = std::fs::read_to_string(&input)
        .with_context(|| format!("reading {}", input.display()))?;

    let registry =
        wmigen::build(&src).with_context(|| format!("parsing {}", input.display()))?;
    tracing::info!(
        input = %input.display(),
        classes = registry.len(),
        variants = registry.variant_count(),
        "parsed class definitions"
    );
    let sources = wmigen::emit(&registry);

    if cli.check {
        for (suffix, contents) in sources.artifacts() {
            tracing::info!(artifact = suffix, bytes = contents.len(), "check only, not written");
        }
        return Ok(());
    }

    let out_dir = cli.output_dir();
    let written = sources
        .write_to(&out_dir, &cli.prefix)
        .with_context(|| format!("writing generated files to {}", out_dir.display()))?;
    for path in &written {
        println!("{}", display_generated(path));
    }
    Ok(())
}
