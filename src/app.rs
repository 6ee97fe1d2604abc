use crate::assets::load_shark_frames;
use crate::config::{load_settings, project_paths, save_settings_atomic, Args, Settings};
use crate::input::{command_for, Command, InputSource, Keyboard};
use crate::palette::Backdrop;
use crate::scene::Scene;
use crate::sound::SoundBoard;
use crate::term::{env_var, resolve_size, Session, TerminalGeometry};
use anyhow::Context;
use clap::Parser;
use rand::{rngs::SmallRng, SeedableRng};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub(crate) fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut app = App::init(args)?;
    let outcome = app.run();
    app.finish()?;
    outcome
}

struct App {
    settings: Settings,
    settings_path: Option<PathBuf>,
    scene: Scene,
    sound: SoundBoard,
    keyboard: Keyboard,
    session: Option<Session>,
    shutdown: Arc<AtomicBool>,
}

impl App {
    fn init(args: Args) -> anyhow::Result<Self> {
        let paths = project_paths();
        let settings_path = args
            .settings
            .clone()
            .or_else(|| paths.as_ref().ok().map(|p| p.settings_path.clone()));
        let log_path = args
            .log_file
            .clone()
            .or_else(|| paths.as_ref().ok().map(|p| p.log_path.clone()));
        if let Some(path) = &log_path {
            init_logging(path);
        }
        if let Err(e) = &paths {
            warn!(error = %e, "no project directories, settings will not persist");
        }

        let mut settings = settings_path
            .as_deref()
            .map(load_settings)
            .unwrap_or_default();
        settings.apply_args(&args);

        let shark_frames = load_shark_frames(&settings.shark_asset_path());

        let mut sound = SoundBoard::detect();
        if settings.sound {
            sound.toggle();
        }

        let shutdown = Arc::new(AtomicBool::new(false));
        {
            let flag = Arc::clone(&shutdown);
            ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
                .context("installing the interrupt handler")?;
        }

        let rng = match settings.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let bounds = resolve_size(&TerminalGeometry, env_var, settings.sim.default_size);
        let backdrop = if settings.light {
            Backdrop::Day
        } else {
            Backdrop::Night
        };
        info!(
            seed = ?settings.seed,
            width = bounds.width,
            height = bounds.height,
            sound = sound.available(),
            "starting aquarium"
        );
        let scene = Scene::new(settings.sim.clone(), bounds, backdrop, rng, shark_frames);

        let session = Session::begin()?;

        Ok(Self {
            settings,
            settings_path: if args.no_save { None } else { settings_path },
            scene,
            sound,
            keyboard: Keyboard::default(),
            session: Some(session),
            shutdown,
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let frame_dt = Duration::from_secs_f32(self.settings.sim.frame_interval.max(0.001));
        let poll_every = u64::from(self.settings.sim.resize_poll_ticks.max(1));
        let mut frames: u64 = 0;

        loop {
            let started = Instant::now();
            if self.shutdown.load(Ordering::SeqCst) {
                info!("interrupted");
                break;
            }

            if frames % poll_every == 0 {
                let bounds =
                    resolve_size(&TerminalGeometry, env_var, self.settings.sim.default_size);
                self.scene.resize(bounds);
            }

            if let Some(cmd) = self.keyboard.poll()?.and_then(command_for) {
                match cmd {
                    Command::Quit => break,
                    Command::ToggleSound => self.sound.toggle(),
                    other => self.scene.apply(other),
                }
            }

            self.scene.tick();
            for cue in self.scene.drain_cues() {
                self.sound.play(cue);
            }

            let text = self.scene.compose().to_ansi(self.scene.background())?;
            if let Some(session) = self.session.as_mut() {
                session.present(&text)?;
            }

            frames += 1;
            spin_sleep(frame_dt, started);
        }
        Ok(())
    }

    /// Restores the terminal, says goodbye and writes preferences back.
    fn finish(&mut self) -> anyhow::Result<()> {
        self.sound.stop();
        self.session = None;
        println!("Thanks for visiting the aquarium!");

        self.settings.light = self.scene.backdrop().is_light();
        self.settings.sound = self.sound.is_on();
        if let Some(path) = &self.settings_path {
            save_settings_atomic(path, &self.settings)?;
            info!(path = %path.display(), "settings saved");
        }
        Ok(())
    }
}

/// Logs go to a file; stdout belongs to the renderer. Failing to open the
/// file just means no logs.
fn init_logging(path: &Path) {
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reeftank=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn spin_sleep(target: Duration, now: Instant) {
    let end = now + target;
    loop {
        let t = Instant::now();
        if t >= end {
            break;
        }
        let left = end - t;
        if left > Duration::from_millis(2) {
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}
