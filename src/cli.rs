use crate::engine::{Engine, Request, Summary};
use crate::error::{Result, Status};
use crate::extract::Tarball;
use crate::fetch::Origin;
use crate::logger::Logger;
use crate::settings::Settings;
use clap::error::ErrorKind;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// Start a new Blender add-on from the template repository.
///
/// The template is downloaded, every occurrence of its placeholder name is
/// replaced with ADDON_NAME (in file contents and in file and directory
/// names), and the result is written into the destination directory.
/// Nothing is written if any file would be overwritten, unless --force is
/// given.
#[derive(Parser, Debug, PartialEq, Clone)]
#[command(name = "blender-init")]
#[command(version)]
pub struct Options {
    /// Name of the new add-on, used as its package name
    pub addon_name: String,

    /// Overwrite existing files instead of aborting
    #[arg(short, long)]
    pub force: bool,

    /// Author to fill in wherever the template leaves a maintainer placeholder
    #[arg(short, long, value_name = "NAME")]
    pub maintainer: Option<String>,

    /// Template archive (.tar.gz) to use instead of the upstream one
    #[arg(short, long, value_name = "URL|FILE")]
    pub template: Option<String>,

    /// Directory to write the add-on into
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub dest: PathBuf,

    /// Only report errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// What we decide to do based on CLI arguments
#[derive(PartialEq, Debug)]
pub enum Behavior {
    Init(Options),
    /// Help, version or a usage error, already rendered.
    Message { text: String, status: Status },
}

/// Parse arguments, not including the program name.
pub fn parse<S>(args: impl Iterator<Item = S>) -> Behavior
where
    S: AsRef<str>,
{
    let argv = std::iter::once(env!("CARGO_PKG_NAME").to_owned())
        .chain(args.map(|a| a.as_ref().to_owned()));
    match Options::try_parse_from(argv) {
        Ok(options) => Behavior::Init(options),
        Err(e) => Behavior::Message {
            text: e.render().to_string(),
            status: match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Status::Success,
                _ => Status::Usage,
            },
        },
    }
}

pub fn execute(behavior: Behavior, log: &mut Logger) -> ExitCode {
    run(behavior, log).into()
}

fn run(behavior: Behavior, log: &mut Logger) -> Status {
    match behavior {
        Behavior::Message { text, status } => {
            let _ = match status {
                Status::Success => write!(log.output(), "{}", text),
                _ => write!(log.error(), "{}", text),
            };
            status
        }
        Behavior::Init(options) => match init(options, log) {
            Ok(_) => Status::Success,
            Err(e) => {
                let _ = write!(log.error(), "Error: {}\n", e);
                e.status()
            }
        },
    }
}

fn init(options: Options, log: &mut Logger) -> Result<Summary> {
    if options.quiet {
        log.quiet();
    }
    let engine = Engine::new(Settings::default());
    let source = options
        .template
        .unwrap_or_else(|| engine.settings().template_url.clone());
    let request = Request {
        name: options.addon_name,
        maintainer: options.maintainer,
        overwrite: options.force,
    };
    engine.run(
        &Tarball(Origin::parse(source)),
        &request,
        &options.dest,
        log,
    )
}
