use anyhow::{Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "reeftank", about = "An ASCII aquarium for your terminal")]
pub(crate) struct Args {
    /// Seed for the scene generator (random when omitted).
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Start with the light (day) backdrop.
    #[arg(long)]
    pub(crate) light: bool,
    /// Start with sound cues enabled.
    #[arg(long)]
    pub(crate) sound: bool,
    /// Text file holding the shark animation frames.
    #[arg(long, value_name = "PATH")]
    pub(crate) shark_asset: Option<PathBuf>,
    /// Settings file to read (and write back on exit).
    #[arg(long, value_name = "PATH")]
    pub(crate) settings: Option<PathBuf>,
    /// Where to write the log; stdout is the render surface.
    #[arg(long, value_name = "PATH")]
    pub(crate) log_file: Option<PathBuf>,
    /// Do not write settings back on exit.
    #[arg(long)]
    pub(crate) no_save: bool,
}

/// Inclusive float range `(lo, hi)`.
pub(crate) type Span = (f32, f32);
/// Inclusive count range `(lo, hi)`.
pub(crate) type Count = (u32, u32);

/// Every tuning constant of the simulation. Built once, then only lent out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct SimConfig {
    /// Seconds per tick; every timer counts down by this amount.
    pub(crate) frame_interval: f32,
    pub(crate) default_size: (u16, u16),
    pub(crate) resize_poll_ticks: u32,

    pub(crate) fish_count: Count,
    pub(crate) fish_speed: Span,
    pub(crate) fast_fish_speed: Span,
    pub(crate) fast_fish_chance: f32,
    pub(crate) startle_multiplier: Span,
    pub(crate) startle_duration: f32,
    pub(crate) startle_radius: f32,

    pub(crate) puffer_chance: f32,
    pub(crate) puffer_speed: Span,
    pub(crate) puffer_hold: f32,
    pub(crate) puffer_frame_interval: f32,
    pub(crate) puffer_swim_interval: f32,
    pub(crate) puffer_bob_amplitude: Span,
    pub(crate) puffer_bob_frequency: Span,

    pub(crate) seahorse_chance: f32,
    pub(crate) seahorse_speed: Span,
    pub(crate) seahorse_frame_interval: f32,
    pub(crate) seahorse_wave_amplitude: Span,
    pub(crate) seahorse_wave_frequency: Span,
    pub(crate) baby_chance: f32,
    pub(crate) baby_count: Count,
    pub(crate) baby_follow_distance: f32,
    pub(crate) baby_speed: Span,
    pub(crate) baby_wave_amplitude: Span,
    pub(crate) baby_startle_duration: f32,
    pub(crate) baby_startle_multiplier: Span,

    pub(crate) school_count: Count,
    pub(crate) school_size: Count,
    pub(crate) school_width: Span,
    pub(crate) school_height: Span,
    pub(crate) school_speed: Span,
    pub(crate) school_startle_multiplier: Span,
    pub(crate) school_startle_duration: f32,

    pub(crate) eel_chance: f32,
    pub(crate) eel_segments: Count,
    pub(crate) eel_speed: Span,
    pub(crate) eel_spacing: f32,
    pub(crate) eel_startle_multiplier: Span,
    pub(crate) eel_startle_duration: f32,

    pub(crate) shark_chance: f32,
    pub(crate) shark_delay_ticks: Count,
    pub(crate) shark_speed: Span,
    pub(crate) shark_startle_radius: f32,

    pub(crate) food_sink_speed: f32,
    pub(crate) food_lifetime: f32,
    pub(crate) food_notice_delay: f32,
    pub(crate) food_notice_radius: f32,
    pub(crate) food_seek_multiplier: f32,
    pub(crate) food_particles: Count,

    pub(crate) bubble_count: Count,
    pub(crate) bubble_speed: Span,
    pub(crate) burst_count: Count,
    pub(crate) burst_spread: f32,
    pub(crate) click_bubble_speed: Span,
    pub(crate) click_bubble_lifetime: Span,

    pub(crate) jellyfish_count: Count,
    pub(crate) jelly_speed: Span,
    pub(crate) jelly_frame_rate: Span,

    pub(crate) crab_chance: Span,
    pub(crate) crab_idle: Span,
    pub(crate) crab_walk: Span,
    pub(crate) crab_speed: Span,
    pub(crate) crab_frame_interval: f32,

    pub(crate) seaweed_count: Count,
    pub(crate) seaweed_height: Count,
    pub(crate) seaweed_sway_speed: f32,

    pub(crate) decoration_chance: f32,
    pub(crate) decoration_max: u32,
    pub(crate) decoration_attempts: u32,
    pub(crate) chest_open_radius: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            frame_interval: 0.1,
            default_size: (120, 30),
            resize_poll_ticks: 10,

            fish_count: (25, 50),
            fish_speed: (0.5, 1.0),
            fast_fish_speed: (2.5, 4.5),
            fast_fish_chance: 0.08,
            startle_multiplier: (8.0, 11.0),
            startle_duration: 1.2,
            startle_radius: 30.0,

            puffer_chance: 0.3,
            puffer_speed: (0.4, 0.7),
            puffer_hold: 10.0,
            puffer_frame_interval: 0.6,
            puffer_swim_interval: 0.15,
            puffer_bob_amplitude: (4.0, 6.0),
            puffer_bob_frequency: (0.01, 0.04),

            seahorse_chance: 0.25,
            seahorse_speed: (0.2, 0.5),
            seahorse_frame_interval: 0.3,
            seahorse_wave_amplitude: (1.5, 2.5),
            seahorse_wave_frequency: (0.05, 0.15),
            baby_chance: 0.7,
            baby_count: (1, 3),
            baby_follow_distance: 6.0,
            baby_speed: (0.3, 0.6),
            baby_wave_amplitude: (0.5, 1.0),
            baby_startle_duration: 0.8,
            baby_startle_multiplier: (3.0, 4.0),

            school_count: (0, 3),
            school_size: (15, 25),
            school_width: (6.0, 10.0),
            school_height: (4.0, 7.0),
            school_speed: (0.3, 0.8),
            school_startle_multiplier: (10.0, 14.0),
            school_startle_duration: 1.3,

            eel_chance: 0.25,
            eel_segments: (50, 75),
            eel_speed: (0.5, 1.0),
            eel_spacing: 1.0,
            eel_startle_multiplier: (3.0, 5.0),
            eel_startle_duration: 2.0,

            shark_chance: 0.35,
            shark_delay_ticks: (50, 300),
            shark_speed: (0.5, 1.0),
            shark_startle_radius: 28.0,

            food_sink_speed: 0.5,
            food_lifetime: 4.0,
            food_notice_delay: 1.1,
            food_notice_radius: 200.0,
            food_seek_multiplier: 3.0,
            food_particles: (15, 20),

            bubble_count: (15, 25),
            bubble_speed: (0.1, 0.5),
            burst_count: (30, 40),
            burst_spread: 8.0,
            click_bubble_speed: (0.4, 1.2),
            click_bubble_lifetime: (4.0, 8.0),

            jellyfish_count: (0, 6),
            jelly_speed: (0.1, 0.4),
            jelly_frame_rate: (0.1, 0.5),

            crab_chance: (0.3, 0.8),
            crab_idle: (3.0, 8.0),
            crab_walk: (1.0, 3.0),
            crab_speed: (0.5, 1.2),
            crab_frame_interval: 0.2,

            seaweed_count: (8, 18),
            seaweed_height: (2, 11),
            seaweed_sway_speed: 0.3,

            decoration_chance: 0.6,
            decoration_max: 4,
            decoration_attempts: 50,
            chest_open_radius: 20.0,
        }
    }
}

/// Preferences that survive between runs. Scene contents are never saved.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    /// Only ever comes from `--seed`; a seed is a one-run choice.
    #[serde(skip)]
    pub(crate) seed: Option<u64>,
    pub(crate) light: bool,
    pub(crate) sound: bool,
    pub(crate) shark_asset: Option<PathBuf>,
    pub(crate) sim: SimConfig,
}

impl Settings {
    /// Command-line flags win over whatever the file said.
    pub(crate) fn apply_args(&mut self, args: &Args) {
        if args.seed.is_some() {
            self.seed = args.seed;
        }
        if args.light {
            self.light = true;
        }
        if args.sound {
            self.sound = true;
        }
        if let Some(p) = &args.shark_asset {
            self.shark_asset = Some(p.clone());
        }
    }

    pub(crate) fn shark_asset_path(&self) -> PathBuf {
        self.shark_asset
            .clone()
            .unwrap_or_else(|| PathBuf::from("mockups.txt"))
    }
}

pub(crate) struct Paths {
    pub(crate) settings_path: PathBuf,
    pub(crate) log_path: PathBuf,
}

pub(crate) fn project_paths() -> Result<Paths> {
    let proj = ProjectDirs::from("com", "reeftank", "Reeftank")
        .context("could not resolve project directories")?;
    let dir = proj.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir).ok();
    Ok(Paths {
        settings_path: dir.join("settings.json"),
        log_path: dir.join("reeftank.log"),
    })
}

pub(crate) fn load_settings(path: &Path) -> Settings {
    let Ok(s) = fs::read_to_string(path) else {
        return Settings::default();
    };
    match serde_json::from_str::<Settings>(&s) {
        Ok(v) => v,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
            Settings::default()
        }
    }
}

pub(crate) fn save_settings_atomic(path: &Path, s: &Settings) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(s)?;
    fs::write(&tmp, data).with_context(|| format!("writing {}", tmp.display()))?;
    if path.exists() {
        let _ = fs::remove_file(path);
    }
    fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}
