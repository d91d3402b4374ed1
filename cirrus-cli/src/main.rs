use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Deserialize;
use similar::{ChangeTag, TextDiff};

use backup_stack::{STACK_NAME, build_stack};
use cirrus_core::context::Context;
use cirrus_core::stack::Stack;
use cirrus_core::synth::{Synthesizer, Template};

#[derive(Parser)]
#[command(name = "cirrus")]
#[command(about = "Defines and synthesizes the backup-runner stack", long_about = None)]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true, default_value = "cirrus.json")]
    config: PathBuf,

    /// Context overrides (e.g., -c email=ops@example.com)
    #[arg(short = 'c', long = "context", global = true, value_name = "KEY=VALUE")]
    context: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize the deployment template
    Synth {
        /// Output directory for the template
        #[arg(long, default_value = "out")]
        out: PathBuf,
    },
    /// Validate the stack definition without writing anything
    Validate,
    /// List the resource nodes in declaration order
    Ls,
    /// Show the diff against the previously synthesized template
    Diff {
        /// Directory holding the previous template
        #[arg(long, default_value = "out")]
        out: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = load_context(&cli.config, &cli.context).and_then(|ctx| match cli.command {
        Commands::Synth { out } => run_synth(&ctx, &out),
        Commands::Validate => run_validate(&ctx),
        Commands::Ls => run_ls(&ctx),
        Commands::Diff { out } => run_diff(&ctx, &out),
    });

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Shape of cirrus.json
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    context: HashMap<String, String>,
}

/// Build the context from the config file plus -c overrides
fn load_context(config_path: &Path, overrides: &[String]) -> Result<Context, String> {
    let mut ctx = Context::new();

    if config_path.exists() {
        let content = fs::read_to_string(config_path)
            .map_err(|e| format!("Failed to read {}: {}", config_path.display(), e))?;
        let config: ConfigFile = serde_json::from_str(&content)
            .map_err(|e| format!("Invalid config {}: {}", config_path.display(), e))?;

        if let Some(region) = config.region {
            ctx.set("region", cirrus_aws::normalize_region(&region));
        }
        for (key, value) in config.context {
            ctx.set(key, value);
        }
    }

    for entry in overrides {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| format!("Invalid context override '{}', expected KEY=VALUE", entry))?;
        ctx.set(key, value);
    }

    Ok(ctx)
}

fn build(ctx: &Context) -> Result<Stack, String> {
    build_stack(ctx).map_err(|e| e.to_string())
}

fn synthesize(stack: &Stack) -> Result<Template, String> {
    Synthesizer::new(cirrus_aws::catalog())
        .synth(stack)
        .map_err(|e| e.to_string())
}

fn template_path(out: &Path) -> PathBuf {
    out.join(format!("{}.template.json", STACK_NAME))
}

fn run_synth(ctx: &Context, out: &Path) -> Result<(), String> {
    let stack = build(ctx)?;
    let template = synthesize(&stack)?;
    let rendered = template.to_json_pretty().map_err(|e| e.to_string())?;

    fs::create_dir_all(out).map_err(|e| format!("Failed to create {}: {}", out.display(), e))?;
    let path = template_path(out);
    fs::write(&path, rendered).map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;

    println!(
        "{}",
        format!(
            "Synthesized {} resources ({}) to {}",
            stack.len(),
            stack.region(),
            path.display()
        )
        .green()
    );
    Ok(())
}

fn run_validate(ctx: &Context) -> Result<(), String> {
    let stack = build(ctx)?;
    synthesize(&stack)?;

    println!(
        "{}",
        format!("Configuration valid: {} resources", stack.len()).green()
    );
    Ok(())
}

fn run_ls(ctx: &Context) -> Result<(), String> {
    let stack = build(ctx)?;
    for resource in stack.resources() {
        println!("{}", resource.id);
    }
    Ok(())
}

fn run_diff(ctx: &Context, out: &Path) -> Result<(), String> {
    let stack = build(ctx)?;
    let template = synthesize(&stack)?;
    let rendered = template.to_json_pretty().map_err(|e| e.to_string())?;

    let path = template_path(out);
    let previous = fs::read_to_string(&path)
        .map_err(|e| format!("No previous template at {} ({}). Run synth first.", path.display(), e))?;

    if previous == rendered {
        println!("{}", "No changes. Template is up-to-date.".green());
        return Ok(());
    }

    let diff = TextDiff::from_lines(&previous, &rendered);
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-".red(),
            ChangeTag::Insert => "+".green(),
            ChangeTag::Equal => " ".normal(),
        };
        print!("{}{}", sign, change);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn context_overrides_win_over_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("cirrus.json");
        let mut file = fs::File::create(&config_path).unwrap();
        write!(
            file,
            r#"{{"region": "us-east-1", "context": {{"email": "changeme@localhost"}}}}"#
        )
        .unwrap();

        let overrides = vec!["email=ops@example.com".to_string()];
        let ctx = load_context(&config_path, &overrides).unwrap();

        assert_eq!(ctx.get("email"), Some("ops@example.com"));
        assert_eq!(ctx.get("region"), Some("us-east-1"));
    }

    #[test]
    fn missing_config_file_is_fine() {
        let ctx = load_context(Path::new("does-not-exist.json"), &[]).unwrap();
        assert_eq!(ctx.get("email"), None);
    }

    #[test]
    fn malformed_override_is_rejected() {
        let err = load_context(Path::new("does-not-exist.json"), &["email".to_string()])
            .unwrap_err();
        assert!(err.contains("KEY=VALUE"));
    }

    #[test]
    fn synth_writes_template_file() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new().with("email", "ops@example.com");

        run_synth(&ctx, dir.path()).unwrap();

        let written = fs::read_to_string(template_path(dir.path())).unwrap();
        assert!(written.contains("AWS::SNS::Topic"));
        assert!(written.contains("ops@example.com"));
    }

    #[test]
    fn validate_rejects_placeholder_email() {
        let ctx = Context::new().with("email", backup_stack::PLACEHOLDER_EMAIL);
        assert!(run_validate(&ctx).is_err());
    }
}
