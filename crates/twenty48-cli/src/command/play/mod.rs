use std::path::PathBuf;

use twenty48_engine::TileSeed;

use self::screen::PlayScreen;

mod screen;

const DEFAULT_RECORD_DIR: &str = "./data/recordings/";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for tile spawning, as 32 hex digits (random if omitted)
    #[clap(long)]
    seed: Option<TileSeed>,
    /// Save the game recording to a file when the session ends
    #[clap(long)]
    save_recording: bool,
    /// Directory to save recording files
    #[clap(long, default_value = DEFAULT_RECORD_DIR)]
    record_dir: PathBuf,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            save_recording: false,
            record_dir: PathBuf::from(DEFAULT_RECORD_DIR),
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        save_recording,
        record_dir,
    } = arg;

    let mut screen = PlayScreen::new(*seed);

    ratatui::run(|terminal| screen.run(terminal))?;

    if *save_recording {
        let path = screen.into_history().save(record_dir)?;
        eprintln!("Recording saved to {}", path.display());
    }

    Ok(())
}
