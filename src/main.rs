use clap::Parser;
use log::error;

mod app;
mod camera;
mod colour;
mod command_encoder;
mod config;
mod error;
mod frame;
mod gpu;
mod input;
mod pacer;
mod parameter;
mod render_target;
mod screen;
mod uniforms;
mod var;

fn main() {
    env_logger::init();

    let config = config::Config::parse();
    if let Err(error) = app::run(config) {
        error!("{}", error);
        std::process::exit(1);
    }
}
