use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cadence", version)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the compositions of a project.
    Info(InfoArgs),
    /// Report schedule gaps, overlaps and uncovered tails.
    Lint(LintArgs),
    /// Print the render tree of one frame as JSON.
    Frame(FrameArgs),
    /// Print a fingerprint per frame of a range.
    Digest(DigestArgs),
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct LintArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Exit with an error when any issue is found.
    #[arg(long)]
    deny: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Composition id; the first composition when absent.
    #[arg(long)]
    id: Option<String>,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Write JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Indent the JSON.
    #[arg(long)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct DigestArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Composition id; the first composition when absent.
    #[arg(long)]
    id: Option<String>,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last frame (exclusive); the composition duration when absent.
    #[arg(long)]
    end: Option<u64>,

    /// Evaluate frames on a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Pool size.
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per parallel batch.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Info(args) => cmd_info(args),
        Command::Lint(args) => cmd_lint(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Digest(args) => cmd_digest(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn read_project(path: &Path) -> anyhow::Result<cadence::Project> {
    cadence::Project::from_path(path)
        .with_context(|| format!("load project '{}'", path.display()))
}

fn load_registry(path: &Path) -> anyhow::Result<cadence::Registry> {
    read_project(path)?
        .into_registry()
        .with_context(|| format!("build compositions from '{}'", path.display()))
}

fn pick_id(registry: &cadence::Registry, id: Option<String>) -> anyhow::Result<String> {
    match id {
        Some(id) => Ok(id),
        None => registry
            .compositions()
            .into_iter()
            .next()
            .map(|m| m.id)
            .context("project has no compositions"),
    }
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let registry = load_registry(&args.in_path)?;
    let mut out = std::io::stdout().lock();
    for meta in registry.compositions() {
        writeln!(
            out,
            "{}\t{} frames\t{}/{} fps\t{}x{}\t{:.2}s",
            meta.id,
            meta.duration_in_frames,
            meta.fps.num,
            meta.fps.den,
            meta.width,
            meta.height,
            meta.duration_secs()
        )?;
    }
    Ok(())
}

fn cmd_lint(args: LintArgs) -> anyhow::Result<()> {
    let project = read_project(&args.in_path)?;
    let mut out = std::io::stdout().lock();
    let mut total = 0usize;
    for def in &project.compositions {
        let issues = def
            .composer()
            .lint()
            .with_context(|| format!("lint composition '{}'", def.id))?;
        for issue in &issues {
            writeln!(out, "{}: {issue}", def.id)?;
        }
        total += issues.len();
    }
    if total == 0 {
        writeln!(out, "no schedule issues")?;
    } else if args.deny {
        anyhow::bail!("{total} schedule issue(s)");
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let registry = load_registry(&args.in_path)?;
    let id = pick_id(&registry, args.id)?;
    let tree = registry.render(&id, args.frame)?;
    let json = if args.pretty {
        tree.to_json_pretty()?
    } else {
        tree.to_json()?
    };

    match args.out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&path, json)
                .with_context(|| format!("write render tree '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => writeln!(std::io::stdout().lock(), "{json}")?,
    }
    Ok(())
}

fn cmd_digest(args: DigestArgs) -> anyhow::Result<()> {
    let registry = load_registry(&args.in_path)?;
    let id = pick_id(&registry, args.id)?;
    let end = match args.end {
        Some(end) => end,
        None => registry.get(&id)?.meta().duration_in_frames,
    };
    let range =
        cadence::FrameRange::new(cadence::FrameIndex(args.start), cadence::FrameIndex(end))?;
    let threading = cadence::RenderThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };

    let trees = registry.render_range(&id, range, &threading)?;
    let mut out = std::io::stdout().lock();
    for tree in &trees {
        let fp = cadence::fingerprint_tree(tree)?;
        writeln!(out, "{}\t{fp}", tree.frame.0)?;
    }
    Ok(())
}
