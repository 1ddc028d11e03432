//! yuno CLI - Project scaffolding for yunojs applications

use anyhow::Result;
use clap::{Parser, Subcommand};
use scaffold_core::init::InitOptions;
use scaffold_core::Engine;
use std::path::PathBuf;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "yuno")]
#[command(about = "CLI for scaffolding yunojs projects and modules")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project from a template
    Init(CliInitArgs),
    /// Manage project modules
    #[command(subcommand)]
    Module(ModuleCommand),
    /// Pack template directories into project archives (for development use)
    Pack(PackArgs),
}

#[derive(Subcommand, Debug)]
pub enum ModuleCommand {
    /// Scaffold a new module inside an existing project
    New(ModNewArgs),
}

#[derive(Parser, Debug)]
pub struct CliInitArgs {
    /// Template name to use
    #[arg(short, long)]
    pub template: Option<String>,

    /// Engine used to run the template installer
    #[arg(short, long, value_enum)]
    pub engine: Option<Engine>,

    /// Directory to install the project into
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Force the git transport for template downloads
    #[arg(long = "force-git")]
    pub force_git: bool,

    /// Local directory to use for templates instead of fetching from remote (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Additional flags forwarded to the template as options
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub options: Vec<String>,
}

impl From<CliInitArgs> for InitOptions {
    fn from(args: CliInitArgs) -> Self {
        InitOptions {
            template: args.template,
            engine: args.engine,
            dir: args.dir,
            force_git: args.force_git,
            template_dir: args.template_dir,
            passthrough: args.options,
        }
    }
}

#[derive(Parser, Debug)]
pub struct ModNewArgs {
    /// Module name (the module prefix is added when missing)
    pub module_name: String,

    /// Project root directory
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct PackArgs {
    /// Directory containing the template sources
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    match args.command {
        Some(Command::Init(init_args)) => {
            let result = scaffold_core::run_init(init_args.into(), CLI_VERSION).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        Some(Command::Module(ModuleCommand::New(mod_args))) => {
            scaffold_core::run_mod_new(mod_args.dir, &mod_args.module_name).await
        }
        Some(Command::Pack(pack_args)) => {
            let dir = pack_args
                .template_dir
                .unwrap_or_else(|| PathBuf::from("templates"));
            scaffold_core::archive::pack_templates(&dir).await
        }
        None => {
            // No subcommand provided, default to init (interactive mode)
            let result = scaffold_core::run_init(InitOptions::default(), CLI_VERSION).await;

            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}
