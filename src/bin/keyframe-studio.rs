use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use keyframe_studio::{
    Channel, EditOp, Evaluator, Fps, FrameIndex, KeyframeEdit, KeyframeField, Project,
    ProjectSettings, ScreenshotId, TimelineCursor,
};

#[derive(Parser, Debug)]
#[command(name = "keyframe-studio", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty project file.
    New(NewArgs),
    /// Add a screenshot with the default transform and print its id.
    Upload(UploadArgs),
    /// Flip a screenshot's visibility.
    Toggle(ToggleArgs),
    /// Add, update or delete a keyframe on one channel.
    Keyframe(KeyframeArgs),
    /// Print the resolved transforms of visible screenshots as JSON.
    Eval(EvalArgs),
    /// Map a normalized scrub position to a frame.
    Scrub(ScrubArgs),
}

#[derive(Parser, Debug)]
struct NewArgs {
    /// Output project JSON.
    #[arg(long)]
    out: PathBuf,

    /// Timeline length in frames.
    #[arg(long)]
    duration: Option<u64>,

    /// Frames per second.
    #[arg(long)]
    fps: Option<u32>,
}

#[derive(Parser, Debug)]
struct UploadArgs {
    /// Project JSON, rewritten in place unless `--out` is given.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Image handle stored with the screenshot.
    #[arg(long)]
    image: String,

    /// Write the updated project here instead.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ToggleArgs {
    /// Project JSON, rewritten in place unless `--out` is given.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Screenshot id.
    #[arg(long)]
    id: String,

    /// Write the updated project here instead.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct KeyframeArgs {
    /// Project JSON, rewritten in place unless `--out` is given.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Screenshot id.
    #[arg(long)]
    id: String,

    /// Channel path, e.g. `position.x` or `scale`.
    #[arg(long)]
    channel: Channel,

    /// Write the updated project here instead.
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    op: KeyframeCmd,
}

#[derive(Subcommand, Debug)]
enum KeyframeCmd {
    /// Insert a keyframe holding the channel's last value.
    Add {
        /// Target frame.
        #[arg(long)]
        frame: u64,
    },
    /// Change the frame or value of an existing keyframe.
    Update {
        /// Positional keyframe index.
        #[arg(long)]
        index: usize,
        /// New frame.
        #[arg(long, conflicts_with = "value", required_unless_present = "value")]
        frame: Option<u64>,
        /// New value.
        #[arg(long, allow_negative_numbers = true)]
        value: Option<f64>,
    },
    /// Remove a keyframe.
    Delete {
        /// Positional keyframe index.
        #[arg(long)]
        index: usize,
    },
}

#[derive(Parser, Debug)]
struct EvalArgs {
    /// Project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame to evaluate; negative frames are allowed.
    #[arg(long, allow_negative_numbers = true)]
    frame: i64,

    /// Evaluate every frame up to and including this one.
    #[arg(long, allow_negative_numbers = true)]
    to: Option<i64>,
}

#[derive(Parser, Debug)]
struct ScrubArgs {
    /// Normalized position in `[0, 1]`.
    #[arg(long, allow_negative_numbers = true)]
    position: f64,

    /// Timeline length in frames.
    #[arg(long, required_unless_present = "in_path")]
    duration: Option<u64>,

    /// Take the duration from this project instead.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::New(args) => cmd_new(args),
        Command::Upload(args) => cmd_upload(args),
        Command::Toggle(args) => cmd_toggle(args),
        Command::Keyframe(args) => cmd_keyframe(args),
        Command::Eval(args) => cmd_eval(args),
        Command::Scrub(args) => cmd_scrub(args),
    }
}

fn read_project(path: &Path) -> anyhow::Result<Project> {
    let project = Project::from_path(path)?;
    project
        .validate()
        .with_context(|| format!("validate project '{}'", path.display()))?;
    Ok(project)
}

fn write_project(project: &Project, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, project.to_json_pretty()?)
        .with_context(|| format!("write project '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_new(args: NewArgs) -> anyhow::Result<()> {
    let mut settings = ProjectSettings::default();
    if let Some(d) = args.duration {
        settings.duration = FrameIndex(d);
    }
    if let Some(fps) = args.fps {
        settings.fps = Fps::new(fps, 1)?;
    }
    settings.validate()?;
    write_project(&Project::new(settings), &args.out)
}

fn cmd_upload(args: UploadArgs) -> anyhow::Result<()> {
    let mut project = read_project(&args.in_path)?;
    let id = project.add_screenshot(args.image)?;
    println!("{id}");
    write_project(&project, args.out.as_deref().unwrap_or(args.in_path.as_path()))
}

fn cmd_toggle(args: ToggleArgs) -> anyhow::Result<()> {
    let mut project = read_project(&args.in_path)?;
    let visible = project.toggle_visibility(&ScreenshotId(args.id))?;
    println!("{}", if visible { "visible" } else { "hidden" });
    write_project(&project, args.out.as_deref().unwrap_or(args.in_path.as_path()))
}

fn cmd_keyframe(args: KeyframeArgs) -> anyhow::Result<()> {
    let mut project = read_project(&args.in_path)?;
    let op = match args.op {
        KeyframeCmd::Add { frame } => EditOp::Add {
            frame: FrameIndex(frame),
        },
        KeyframeCmd::Update {
            index,
            frame,
            value,
        } => {
            let field = match (frame, value) {
                (Some(f), _) => KeyframeField::Frame(FrameIndex(f)),
                (None, Some(v)) => KeyframeField::Value(v),
                (None, None) => anyhow::bail!("update needs --frame or --value"),
            };
            EditOp::Update { index, field }
        }
        KeyframeCmd::Delete { index } => EditOp::Delete { index },
    };

    let edit = KeyframeEdit {
        id: ScreenshotId(args.id),
        channel: args.channel,
        op,
    };
    let outcome = project.apply_edit(&edit)?;
    println!("{}", serde_json::to_string(&outcome)?);
    write_project(&project, args.out.as_deref().unwrap_or(args.in_path.as_path()))
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let project = read_project(&args.in_path)?;
    match args.to {
        None => {
            let g = Evaluator::eval_frame(&project, args.frame);
            println!("{}", serde_json::to_string_pretty(&g)?);
        }
        Some(to) => {
            if to < args.frame {
                anyhow::bail!(
                    "eval range is empty: --to {to} is before --frame {}",
                    args.frame
                );
            }
            let frames: Vec<_> = (args.frame..=to)
                .map(|f| Evaluator::eval_frame(&project, f))
                .collect();
            println!("{}", serde_json::to_string_pretty(&frames)?);
        }
    }
    Ok(())
}

fn cmd_scrub(args: ScrubArgs) -> anyhow::Result<()> {
    let duration = match (&args.in_path, args.duration) {
        (Some(path), _) => read_project(path)?.settings.duration,
        (None, Some(d)) => FrameIndex(d),
        (None, None) => anyhow::bail!("scrub needs --duration or --in"),
    };
    let mut cursor = TimelineCursor::new(duration);
    cursor.scrub(args.position);
    println!("{}", cursor.frame().0);
    eprintln!("{}", cursor.label());
    Ok(())
}
