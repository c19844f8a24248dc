use clap::{Parser, ValueEnum};

/// Which shader, and which uniform contract, to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Fixed Julia constant; the shader applies the aspect ratio itself.
    Basic,
    /// Tunable Julia constant with a colour gradient; projection is folded into the camera basis.
    Julia,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "wgpu-julia",
    about = "Fly through a ray-marched quaternion Julia set",
    version
)]
pub struct Config {
    #[arg(long, value_enum, default_value_t = Variant::Julia)]
    pub variant: Variant,

    /// Movement speed in world units per second.
    #[arg(long, default_value_t = 5.0)]
    pub speed: f32,

    /// Radians of turn per unit of mouse motion per second.
    #[arg(long, default_value_t = 0.5, allow_negative_numbers = true)]
    pub look_sensitivity: f32,

    /// Change of a Julia constant component per second of key hold.
    #[arg(long, default_value_t = 1.0)]
    pub parameter_rate: f32,

    /// Vertical field of view in degrees, strictly between 0 and 180.
    #[arg(long, default_value_t = 60.0, allow_negative_numbers = true, value_parser = parse_fov)]
    pub fov: f32,

    #[arg(long, default_value_t = 60)]
    pub fps: u32,
}

/// At 0° or 180° the projection scale `tan(fov / 2)` is zero or unbounded.
fn parse_fov(arg: &str) -> Result<f32, String> {
    let fov: f32 = arg.parse().map_err(|error| format!("{error}"))?;
    if fov > 0.0 && fov < 180.0 {
        Ok(fov)
    } else {
        Err(format!("{fov} is not between 0 and 180 degrees"))
    }
}

impl Config {
    pub fn fov_radians(&self) -> f32 {
        self.fov.to_radians()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: Variant::Julia,
            speed: 5.0,
            look_sensitivity: 0.5,
            parameter_rate: 1.0,
            fov: 60.0,
            fps: 60,
        }
    }
}
