//! Command-line interface for sloppy.

use clap::{ArgAction, Parser, Subcommand};
use colored::*;
use globset::GlobSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::Config;
use crate::lang::Language;
use crate::report;
use crate::rules::{Catalog, Severity};
use crate::scan::{Resolver, ScanError, Scanner, SourceFile};
use crate::score;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Directories never descended into.
const SKIPPED_DIRS: &[&str] = &[
    "node_modules",
    "vendor",
    "__pycache__",
    "target",
    "venv",
    "dist",
    "build",
];

/// Detect sloppy code: hedging comments, debug noise, leaked idioms.
///
/// Sloppy scans Python, Go, JavaScript and TypeScript sources for textual
/// smells typical of low-quality or AI-generated code. Every rule is scoped
/// to the languages it was written for.
#[derive(Parser)]
#[command(name = "sloppy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan files or directories for sloppy patterns
    #[command(visible_alias = "check")]
    Scan(ScanArgs),
    /// List the available rules
    Rules(RulesArgs),
}

/// Arguments for the scan command.
#[derive(Parser)]
pub struct ScanArgs {
    /// Path to scan (file or directory)
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty, json, or sarif
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Only scan these languages (repeatable)
    #[arg(short, long = "language")]
    pub languages: Vec<Language>,

    /// Skip rules below this severity
    #[arg(long)]
    pub min_severity: Option<Severity>,

    /// Exit non-zero when a finding at or above this severity remains
    #[arg(long)]
    pub fail_on: Option<Severity>,

    /// Disable a rule by identifier (repeatable)
    #[arg(short, long = "disable")]
    pub disabled: Vec<String>,

    /// Worker threads (default: available parallelism)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Show suppressed findings in output
    #[arg(long)]
    pub show_suppressed: bool,
}

/// Arguments for the rules command.
#[derive(Parser)]
pub struct RulesArgs {
    /// Only list rules that run on this language
    #[arg(short, long)]
    pub language: Option<Language>,
}

/// Load the config for a scan: explicit path, else discovery, else defaults.
fn load_config(args: &ScanArgs, root: &Path) -> anyhow::Result<Config> {
    let search_dir = if root.is_dir() {
        root.to_path_buf()
    } else {
        root.parent().map(Path::to_path_buf).unwrap_or_default()
    };

    let path = args.config.clone().or_else(|| Config::discover(&search_dir));
    let mut config = match &path {
        Some(p) => {
            info!(config = %p.display(), "loading config");
            Config::parse_file(p)?
        }
        None => Config::default(),
    };

    // Command-line flags override the file.
    config.disabled_rules.extend(args.disabled.iter().cloned());
    if !args.languages.is_empty() {
        config.languages = args.languages.clone();
    }
    if args.min_severity.is_some() {
        config.min_severity = args.min_severity;
    }
    if args.fail_on.is_some() {
        config.fail_on = args.fail_on;
    }
    if args.jobs.is_some() {
        config.jobs = args.jobs;
    }

    Ok(config)
}

/// Collect candidate files under `root` with their detected language.
pub fn collect_files(
    root: &Path,
    config: &Config,
    excluded: &GlobSet,
) -> anyhow::Result<Vec<(PathBuf, Language)>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            !name.starts_with('.') && !SKIPPED_DIRS.contains(&name.as_ref())
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(lang) = Language::from_path(path) else {
            continue;
        };
        if !config.includes_language(lang) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if excluded.is_match(relative) || excluded.is_match(path) {
            debug!(file = %path.display(), "excluded by config");
            continue;
        }

        files.push((path.to_path_buf(), lang));
    }

    Ok(files)
}

/// Read each file into a scanner input. Unreadable files become scan errors.
fn load_sources(files: Vec<(PathBuf, Option<Language>)>) -> (Vec<SourceFile>, Vec<ScanError>) {
    let mut sources = Vec::with_capacity(files.len());
    let mut errors = Vec::new();

    for (path, lang) in files {
        let id = path.to_string_lossy().to_string();
        match std::fs::read_to_string(&path) {
            Ok(text) => sources.push(SourceFile {
                id,
                language: lang.map(|l| l.as_str().to_string()),
                text,
            }),
            Err(e) => errors.push(ScanError::Unreadable {
                file: id,
                reason: e.to_string(),
            }),
        }
    }

    (sources, errors)
}

/// Run the scan command.
pub fn run_scan(args: &ScanArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" && args.format != "sarif" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty', 'json', or 'sarif'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let catalog = Catalog::builtin()?;

    let abs_path = match args.path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let config = load_config(args, &abs_path)?;
    if let Err(e) = config.validate(&catalog) {
        eprintln!("Error: invalid config: {}", e);
        return Ok(EXIT_ERROR);
    }

    let candidates: Vec<(PathBuf, Option<Language>)> = if abs_path.is_dir() {
        let excluded = config.exclusion_set()?;
        collect_files(&abs_path, &config, &excluded)?
            .into_iter()
            .map(|(p, l)| (p, Some(l)))
            .collect()
    } else {
        vec![(abs_path.clone(), Language::from_path(&abs_path))]
    };

    if candidates.is_empty() {
        eprintln!("Warning: no files to scan");
        return Ok(EXIT_SUCCESS);
    }

    let (sources, read_errors) = load_sources(candidates);
    info!(
        files = sources.len(),
        unreadable = read_errors.len(),
        "collected files"
    );

    let resolver = Resolver::new(&catalog, &config.rule_filter());
    info!(
        rules = resolver.active_rule_count(),
        catalog = catalog.len(),
        "resolved active rules"
    );
    let scanner = Scanner::new(resolver).jobs(config.jobs);
    let mut outcome = scanner.scan(&sources);
    outcome.errors.extend(read_errors);

    let slop = score::calculate(&outcome);
    let path_str = args.path.to_string_lossy().to_string();

    match args.format.as_str() {
        "json" => report::write_json(&path_str, &outcome, &slop)?,
        "sarif" => report::write_sarif(&abs_path, &outcome, &catalog)?,
        _ => report::write_pretty(&path_str, &outcome, &slop, args.show_suppressed),
    }

    if outcome.has_at_least(config.fail_threshold()) {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the rules command.
pub fn run_rules(args: &RulesArgs) -> anyhow::Result<i32> {
    let catalog = Catalog::builtin()?;

    let rules = match args.language {
        Some(lang) => catalog.by_language(lang),
        None => catalog.all(),
    };

    println!("Available rules ({}):", rules.len());
    println!("{}", "  (i = case-insensitive pattern)".dimmed());
    println!();

    for rule in rules {
        let severity = match rule.severity() {
            Severity::High => "high  ".red(),
            Severity::Medium => "medium".yellow(),
            Severity::Low => "low   ".blue(),
        };
        let case = if rule.is_case_insensitive() { "i" } else { " " };
        println!(
            "  {:<28} {} {:<14} {:<22} {} {}",
            rule.id(),
            severity,
            rule.axis().as_str(),
            rule.applicability().to_string(),
            case.dimmed(),
            rule.message().dimmed()
        );
    }

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collect_files_by_extension() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::write(root.join("src/app.py"), "x = 1\n").unwrap();
        std::fs::write(root.join("src/main.go"), "package main\n").unwrap();
        std::fs::write(root.join("src/ui.tsx"), "export {}\n").unwrap();
        std::fs::write(root.join("src/notes.txt"), "hi\n").unwrap();
        std::fs::write(root.join("node_modules/pkg/index.js"), "var x = 1\n").unwrap();
        std::fs::write(root.join(".git/hook.py"), "x = 1\n").unwrap();

        let files = collect_files(root, &Config::default(), &GlobSet::empty()).unwrap();
        let found: Vec<(String, Language)> = files
            .iter()
            .map(|(p, l)| (p.file_name().unwrap().to_string_lossy().to_string(), *l))
            .collect();

        assert_eq!(
            found,
            vec![
                ("app.py".to_string(), Language::Python),
                ("main.go".to_string(), Language::Go),
                ("ui.tsx".to_string(), Language::TypeScript),
            ]
        );
    }

    #[test]
    fn test_collect_files_respects_config() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std::fs::create_dir_all(root.join("generated")).unwrap();
        std::fs::write(root.join("a.py"), "x = 1\n").unwrap();
        std::fs::write(root.join("b.go"), "package b\n").unwrap();
        std::fs::write(root.join("generated/c.py"), "x = 1\n").unwrap();

        let config = Config {
            languages: vec![Language::Python],
            excluded_paths: vec!["generated/**".to_string()],
            ..Default::default()
        };
        let excluded = config.exclusion_set().unwrap();
        let files = collect_files(root, &config, &excluded).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].0.ends_with("a.py"));
    }

    #[test]
    fn test_load_sources_records_unreadable() {
        let temp = TempDir::new().unwrap();
        let good = temp.path().join("ok.py");
        std::fs::write(&good, "x = 1\n").unwrap();
        let missing = temp.path().join("gone.py");

        let (sources, errors) = load_sources(vec![
            (good, Some(Language::Python)),
            (missing, Some(Language::Python)),
        ]);

        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].language.as_deref(), Some("python"));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].file().ends_with("gone.py"));
    }

    #[test]
    fn test_cli_parses_scan_flags() {
        let cli = Cli::try_parse_from([
            "sloppy", "-v", "scan", "src", "--format", "json", "-l", "go", "-l", "python",
            "--min-severity", "medium", "--disable", "go_todo_comment", "--jobs", "2",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.format, "json");
                assert_eq!(args.languages, vec![Language::Go, Language::Python]);
                assert_eq!(args.min_severity, Some(Severity::Medium));
                assert_eq!(args.disabled, vec!["go_todo_comment"]);
                assert_eq!(args.jobs, Some(2));
            }
            Commands::Rules(_) => panic!("expected scan"),
        }
    }
}
