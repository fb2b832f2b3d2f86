use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jstatic::ast::AstPrinter;
use jstatic::parser::parse_java;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "jstatic")]
#[command(about = "Promotes non-overridable Java methods that touch no instance state to static")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report methods that can be made static, without modifying anything
    Check {
        /// Java files or directories to analyze
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
    },

    /// Rewrite eligible methods to static
    Fix {
        /// Java files or directories to rewrite
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Write changes back to the files instead of stdout
        #[arg(short, long)]
        write: bool,
    },

    /// Parse a file and print the reconstructed source
    Parse {
        /// Input .java file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Check { paths } => check(paths),
        Commands::Fix { paths, write } => fix(paths, *write),
        Commands::Parse { input } => parse(input),
    }
}

/// Expand files and directories into the list of .java files to process
fn java_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry.with_context(|| format!("walking {}", path.display()))?;
                if entry.file_type().is_file()
                    && entry.path().extension().map(|e| e == "java").unwrap_or(false)
                {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn check(paths: &[PathBuf]) -> Result<()> {
    let mut findings = 0usize;
    for file in java_files(paths)? {
        let source =
            fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
        let ast = match parse_java(&source) {
            Ok(ast) => ast,
            Err(e) => {
                eprintln!("{}: {}", file.display(), e);
                continue;
            }
        };
        for promotion in jstatic::analyze(&ast) {
            println!(
                "{}:{}: {}.{} can be static",
                file.display(),
                promotion.line,
                promotion.class_name,
                promotion.method_name
            );
            findings += 1;
        }
    }
    if findings > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn fix(paths: &[PathBuf], write: bool) -> Result<()> {
    for file in java_files(paths)? {
        let source =
            fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
        let mut ast = match parse_java(&source) {
            Ok(ast) => ast,
            Err(e) => {
                eprintln!("{}: {}", file.display(), e);
                continue;
            }
        };
        let promoted = jstatic::rewrite(&mut ast);
        let output = AstPrinter::new().print(&ast);
        if write {
            if promoted > 0 {
                fs::write(&file, &output)
                    .with_context(|| format!("writing {}", file.display()))?;
                println!("{}: {} methods promoted", file.display(), promoted);
            }
        } else {
            print!("{}", output);
        }
    }
    Ok(())
}

fn parse(input: &Path) -> Result<()> {
    let source =
        fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let ast = parse_java(&source).with_context(|| format!("parsing {}", input.display()))?;
    print!("{}", AstPrinter::new().print(&ast));
    Ok(())
}
