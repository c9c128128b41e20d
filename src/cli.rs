//! Minimal CLI: scene JSON → (builder code | AST dump)
//!
//! All I/O lives here; the compiler core never touches the filesystem and
//! never prints.

use std::path::PathBuf;

use anyhow::{bail, Context as _};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::ast;
use crate::codegen::{self, GeneratorOptions};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// compile scene documents into fluent builder source code
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// validate a scene document and emit builder source code
    Generate(GenerateOut),
    /// validate a scene document and print its tree dump
    Dump(DumpOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// identifier of the in-scope receiver variable
    #[arg(long, default_value = "builder")]
    receiver: String,

    /// leave out the start/end banner comments
    #[arg(long, default_value_t = false)]
    no_markers: bool,

    /// include descriptive comments before scope-opening statements
    #[arg(long, default_value_t = false)]
    comments: bool,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DumpOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Generate(target) => {
                let options = GeneratorOptions {
                    include_section_markers: !target.no_markers,
                    receiver_name: target.receiver.clone(),
                    include_comments: target.comments,
                };

                let mut chunks = Vec::new();
                for (source_path, source) in target.input_settings.load()? {
                    let tree = ast::from_json(&source).with_context(|| {
                        format!("failed to compile `{}`", source_path.display())
                    })?;
                    let generated = codegen::generate(&tree, &options)?;
                    for warning in &generated.warnings {
                        eprintln!("{} {warning}", "warning:".yellow().bold());
                    }
                    chunks.push(generated.code);
                }
                let output = chunks.join("\n");

                match target.out.as_ref() {
                    Some(out) => {
                        if let Some(parent) = out.parent() {
                            std::fs::create_dir_all(parent)?;
                        }
                        std::fs::write(out, &output)?;
                    }
                    None => println!("{output}"),
                }
                Ok(())
            }
            Command::Dump(target) => {
                for (source_path, source) in target.input_settings.load()? {
                    let tree = ast::from_json(&source).with_context(|| {
                        format!("failed to compile `{}`", source_path.display())
                    })?;
                    print!("{}", tree.root.to_display_string(0));
                }
                Ok(())
            }
        }
    }
}

impl InputSettings {
    fn load(&self) -> anyhow::Result<Vec<(PathBuf, String)>> {
        let mut out = Vec::new();
        for source_path in resolve_file_path_patterns(&self.input)? {
            let source = std::fs::read_to_string(&source_path).with_context(|| {
                format!("failed to read source file `{}`", source_path.display())
            })?;
            out.push((source_path, source));
        }
        Ok(out)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            // Treat as a literal path
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
