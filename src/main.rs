mod app;
mod art;
mod assets;
mod config;
mod entity;
mod input;
mod palette;
mod render;
mod scene;
mod sound;
mod term;

use anyhow::Result;

fn main() -> Result<()> {
    app::run()
}
