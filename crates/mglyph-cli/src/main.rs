//! mglyphc: matrix glyph configuration compiler.

mod emit;
mod locator;
mod platform;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mglyph_compiler::{CompileOptions, Compiler, IconCatalog, FONT_ID, FONT_SIZE};
use mglyph_config::SourceFormat;
use mglyph_types::Diagnostics;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::locator::DirLocator;

#[derive(Debug, Parser)]
#[command(name = "mglyphc", version, about = "Compile matrix glyph configurations")]
struct Cli {
    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile a configuration into a controller manifest and font.
    Compile {
        /// Configuration file (.json or .toml).
        config: PathBuf,

        #[command(flatten)]
        resources: ResourceArgs,

        /// Platform manifest declaring sensors, switches and images.
        #[arg(long, value_name = "FILE")]
        platform: Option<PathBuf>,

        /// Output directory.
        #[arg(long, short, value_name = "DIR", default_value = "build")]
        out: PathBuf,

        /// Give widgets the glyphs implied by their source's unit and device class.
        #[arg(long)]
        device_class_defaults: bool,

        /// Font pixel size.
        #[arg(long, default_value_t = FONT_SIZE)]
        font_size: u16,

        /// Identifier the font is declared under.
        #[arg(long, default_value = FONT_ID)]
        font_id: String,
    },

    /// Validate a configuration without building anything.
    Check {
        /// Configuration file (.json or .toml).
        config: PathBuf,

        /// Print diagnostics as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the supported icons and their codepoints.
    Icons {
        #[command(flatten)]
        resources: ResourceArgs,
    },
}

#[derive(Debug, Args)]
struct ResourceArgs {
    /// Directory searched for mdi.meta.json and mdi.ttf; repeatable, first match wins.
    #[arg(long = "resources", short = 'r', value_name = "DIR", default_value = ".")]
    dirs: Vec<PathBuf>,
}

impl ResourceArgs {
    fn locator(&self) -> DirLocator {
        DirLocator::new(self.dirs.clone())
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Compile {
            config,
            resources,
            platform,
            out,
            device_class_defaults,
            font_size,
            font_id,
        } => {
            let options = CompileOptions {
                font_id,
                font_size,
                device_class_defaults,
                ..CompileOptions::default()
            };
            compile(&config, &resources, platform.as_deref(), &out, options)
        }
        Command::Check { config, json } => Ok(exit_code(check(&config, json)?)),
        Command::Icons { resources } => icons(&resources),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn read_config(path: &Path) -> Result<(String, SourceFormat)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading configuration {}", path.display()))?;
    let format = SourceFormat::from_path(path).unwrap_or(SourceFormat::Json);
    debug!(path = %path.display(), ?format, "read configuration");
    Ok((text, format))
}

fn compile(
    config: &Path,
    resources: &ResourceArgs,
    platform: Option<&Path>,
    out: &Path,
    options: CompileOptions,
) -> Result<ExitCode> {
    let (text, format) = read_config(config)?;
    let registry = platform::load_registry(platform)?;
    let locator = resources.locator();
    let compiler = Compiler::new(&locator).with_options(options);

    match compiler.compile_source(&text, format, registry) {
        Ok(compilation) => {
            report(&compilation.warnings);
            let artifacts = emit::write_artifacts(
                out,
                config,
                mglyph_compiler::source_hash(&text),
                &compilation,
            )?;
            println!("{}", artifacts.manifest.display());
            println!("{}", artifacts.font.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(diagnostics) => {
            report(&diagnostics);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Schema-check `config`; true when it has no errors.
fn check(config: &Path, json: bool) -> Result<bool> {
    let (text, format) = read_config(config)?;
    let diagnostics = mglyph_compiler::check(&text, format);
    if json {
        println!("{}", serde_json::to_string_pretty(&diagnostics)?);
    } else {
        report(&diagnostics);
    }
    Ok(!diagnostics.has_errors())
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn icons(resources: &ResourceArgs) -> Result<ExitCode> {
    let locator = resources.locator();
    let catalog = IconCatalog::load(&locator, mglyph_compiler::METADATA_RESOURCE)?;
    for (icon, codepoint) in catalog.iter() {
        println!("{:<18} {codepoint}", icon.as_str());
    }
    Ok(ExitCode::SUCCESS)
}

fn report(diagnostics: &Diagnostics) {
    if diagnostics.total_errors > 0 || diagnostics.total_warnings > 0 {
        eprint!("{diagnostics}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_arguments() {
        let cli = Cli::try_parse_from([
            "mglyphc",
            "-v",
            "compile",
            "home.toml",
            "-r",
            "assets",
            "-r",
            "/usr/share/mdi",
            "--platform",
            "platform.json",
            "--device-class-defaults",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        let Command::Compile {
            config,
            resources,
            platform,
            out,
            device_class_defaults,
            font_size,
            font_id,
        } = cli.command
        else {
            panic!("expected compile");
        };
        assert_eq!(config, PathBuf::from("home.toml"));
        assert_eq!(resources.dirs, [PathBuf::from("assets"), PathBuf::from("/usr/share/mdi")]);
        assert_eq!(platform, Some(PathBuf::from("platform.json")));
        assert_eq!(out, PathBuf::from("build"));
        assert!(device_class_defaults);
        assert_eq!(font_size, 8);
        assert_eq!(font_id, "matrix_glyphs_font");
    }

    #[test]
    fn resources_default_to_current_directory() {
        let cli = Cli::try_parse_from(["mglyphc", "icons"]).unwrap();
        let Command::Icons { resources } = cli.command else {
            panic!("expected icons");
        };
        assert_eq!(resources.dirs, [PathBuf::from(".")]);
    }

    #[test]
    fn check_reports_schema_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "groups": [ { "id": "g", "glyph": { "type": "mdi", "id": "rocket" }, "widgets": [] } ] }"#).unwrap();
        assert!(!check(&path, true).unwrap());

        let good = dir.path().join("good.toml");
        std::fs::write(&good, "groups = []\n").unwrap();
        assert!(check(&good, false).unwrap());
    }
}
