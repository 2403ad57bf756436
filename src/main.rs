use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use objsize_shim::report::display_diff;
use objsize_shim::{
    builtin_rules, check_all, patch_all, ConsoleReporter, FileReader, FsFiles, Mode,
    RecordingWriter, TargetList,
};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

const ROOT_ENV: &str = "OBJSIZE_SHIM_ROOT";

#[derive(Parser)]
#[command(name = "objsize-shim")]
#[command(
    about = "Comment out ObjectSizeCalculator usage so the index builds on Java 9+",
    long_about = None
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Patch the target files (default when no command is given)
    Apply {
        /// Project root the target paths are relative to
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Dry run - show what would be changed without modifying files
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show unified diff of changes
        #[arg(short, long)]
        diff: bool,
    },

    /// Report which target files still need patching, without writing
    Status {
        /// Project root the target paths are relative to
        #[arg(short, long)]
        root: Option<PathBuf>,
    },

    /// List the built-in rules in application order
    Rules,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => cmd_apply(None, false, false),

        Some(Commands::Apply {
            root,
            dry_run,
            diff,
        }) => cmd_apply(root, dry_run, diff),

        Some(Commands::Status { root }) => cmd_status(root),

        Some(Commands::Rules) => cmd_rules(),
    }
}

/// Resolve the project root.
///
/// Priority order:
/// 1. Explicit --root flag
/// 2. OBJSIZE_SHIM_ROOT environment variable
/// 3. Current directory
fn resolve_root(cli_root: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = cli_root {
        return Ok(path.canonicalize()?);
    }

    if let Ok(env_path) = env::var(ROOT_ENV) {
        let path = PathBuf::from(&env_path);
        if path.exists() {
            return Ok(path.canonicalize()?);
        }
        eprintln!(
            "{}",
            format!("Warning: {ROOT_ENV} is set but path doesn't exist: {env_path}").yellow()
        );
    }

    Ok(env::current_dir()?)
}

fn cmd_apply(root: Option<PathBuf>, dry_run: bool, show_diff: bool) -> Result<()> {
    let root = resolve_root(root)?;
    let targets = TargetList::builtin();
    let rules = builtin_rules()?;
    let files = FsFiles::new(&root);

    println!("Project root: {}", root.display());
    println!("Targets: {}", targets.len());
    println!();

    // Capture contents before patching, for diff output.
    let mut contents_before: HashMap<PathBuf, String> = HashMap::new();
    if show_diff {
        for path in targets.iter() {
            if let Ok(Some(text)) = files.read(path) {
                contents_before.insert(path.to_path_buf(), text);
            }
        }
    }

    let (writer, mode) = if dry_run {
        println!("{}", "[DRY RUN - no files will be written]".cyan());
        (RecordingWriter::discard(), Mode::DryRun)
    } else {
        (RecordingWriter::forward(&files), Mode::Apply)
    };

    let mut reporter = ConsoleReporter::new(mode);
    let summary = patch_all(&targets, &rules, &files, &writer, &mut reporter);

    if show_diff {
        for (path, after) in writer.into_written() {
            if let Some(before) = contents_before.get(&path) {
                display_diff(&path, before, &after);
            }
        }
    }

    if summary.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_status(root: Option<PathBuf>) -> Result<()> {
    let root = resolve_root(root)?;
    let targets = TargetList::builtin();
    let rules = builtin_rules()?;
    let files = FsFiles::new(&root);

    println!("{}", "Patch Status Report".bold());
    println!("Project root: {}", root.display());
    println!();

    let mut reporter = ConsoleReporter::new(Mode::Status);
    let summary = check_all(&targets, &rules, &files, &mut reporter);

    if summary.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_rules() -> Result<()> {
    let rules = builtin_rules()?;
    for (idx, rule) in rules.iter().enumerate() {
        println!("{}. {}", idx + 1, rule.id.bold());
        println!("   {}", rule.description);
        println!("   {}", rule.pattern.to_string().dimmed());
    }
    Ok(())
}
