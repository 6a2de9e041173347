//! Scripted level editing session.
//!
//! Runs a fixed sequence of edits against a level, printing the level and
//! its history after each step.
//!
//! ```bash
//! RUST_LOG=trace cargo run -p voider-demos --bin level_editor -- --redo-grouping exhaustive
//! ```

use clap::Parser;
use voider_core::{InvokerConfig, RedoGrouping};
use voider_demos::{Corner, LevelEditor};

/// Redo grouping selection for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
enum CliRedoGrouping {
    /// One redo replays what one undo removed.
    #[default]
    Mirror,
    /// One redo replays the whole redo stack.
    Exhaustive,
}

impl From<CliRedoGrouping> for RedoGrouping {
    fn from(cli: CliRedoGrouping) -> Self {
        match cli {
            CliRedoGrouping::Mirror => RedoGrouping::Mirror,
            CliRedoGrouping::Exhaustive => RedoGrouping::Exhaustive,
        }
    }
}

/// Voider level editor demo.
#[derive(Parser, Debug)]
#[command(name = "level_editor", about = "Scripted Voider level editing session", version)]
struct Args {
    /// How far a single redo replays.
    #[arg(long, default_value = "mirror", value_enum)]
    redo_grouping: CliRedoGrouping,

    /// Maximum number of undo entries kept.
    #[arg(long)]
    max_undo: Option<usize>,
}

impl From<Args> for InvokerConfig {
    fn from(args: Args) -> Self {
        let config = InvokerConfig::default().with_redo_grouping(args.redo_grouping.into());
        match args.max_undo {
            Some(max_undo) => config.with_max_undo(max_undo),
            None => config,
        }
    }
}

fn report(editor: &LevelEditor, step: &str) {
    let level = editor.level();
    let invoker = editor.invoker();
    println!("== {step}");
    println!(
        "   speed {:.1}, {} corner(s): {:?}",
        level.speed(),
        level.corners().len(),
        level
            .corners()
            .iter()
            .map(|c| (c.x, c.y))
            .collect::<Vec<_>>()
    );
    println!(
        "   undo: {:?}",
        invoker.undo_descriptions().collect::<Vec<_>>()
    );
    println!(
        "   redo: {:?}",
        invoker.redo_descriptions().collect::<Vec<_>>()
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Voider level editor demo v{}", voider_demos::VERSION);
    let config: InvokerConfig = args.into();
    log::info!("History config: {config:?}");

    let mut editor = LevelEditor::new(config);
    report(&editor, "empty level");

    for speed in [16.0, 18.0, 21.5, 24.0] {
        editor.set_speed(speed);
    }
    report(&editor, "dragged the speed slider");

    editor.add_corners(&[
        Corner::new(0.0, 0.0),
        Corner::new(20.0, 0.0),
        Corner::new(20.0, 12.0),
        Corner::new(0.0, 12.0),
    ]);
    report(&editor, "drew the border");

    if !editor.add_corner(1, Corner::new(0.2, 0.1)) {
        report(&editor, "rejected a corner too close to its neighbour");
    }

    for x in [22.0, 24.0, 26.0] {
        editor.drag_corner(2, Corner::new(x, 12.0));
    }
    report(&editor, "dragged a corner");

    editor.begin_tool("remove");
    editor.remove_corner(3);
    editor.remove_corner(0);
    report(&editor, "removed two corners");
    let undone = editor.cancel_tool("remove");
    report(&editor, &format!("cancelled the remove tool ({undone} entries)"));

    while editor.undo() > 0 {}
    report(&editor, "undid everything");

    let redone = editor.redo();
    report(&editor, &format!("one redo ({redone} entries)"));
}
