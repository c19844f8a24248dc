/*!
The per-frame control loop.

Each frame runs in a fixed order:

1. Apply a pending resize: reallocate the render target and recompute the aspect ratio.
2. Drain relative mouse motion into the camera's yaw and pitch.
3. Move the camera for the held movement keys.
4. Adjust the Julia constant for the held parameter keys.
5. Upload the frame uniforms.
6. Clear the render target and draw it to the screen through the shader.

A close request stops the loop before step 1 of the next frame.
*/

use log::{debug, trace};

use crate::{
    camera::Camera,
    colour::Gradient,
    config::{Config, Variant},
    error::Error,
    input::Input,
    parameter::JuliaParameter,
    screen, uniforms,
};

/// What the frame loop needs from the GPU side.
pub trait Renderer {
    /// Release the render target and allocate one of `size`.
    fn resize(&mut self, size: screen::Size);

    /// Called once, at startup.
    fn upload_gradient(&mut self, gradient: &Gradient);

    fn upload_frame(&mut self, frame: &uniforms::Frame);

    /// Clear the render target to black and draw it through the fractal shader.
    fn draw(&mut self) -> Result<(), Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Closing,
}

/// Everything the loop mutates. Owned by [`FrameLoop`] alone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct State {
    pub camera: Camera,
    pub parameter: JuliaParameter,
    pub size: screen::Size,
    pub aspect_ratio: f32,
}

pub struct FrameLoop<R> {
    renderer: R,
    config: Config,
    state: State,
    pending_resize: Option<screen::Size>,
    status: Status,
}

impl<R: Renderer> FrameLoop<R> {
    pub fn new(mut renderer: R, config: Config, size: screen::Size) -> Self {
        if config.variant == Variant::Julia {
            renderer.upload_gradient(&Gradient::default());
        }

        Self {
            renderer,
            config,
            state: State {
                camera: Camera::default(),
                parameter: JuliaParameter::default(),
                size,
                aspect_ratio: size.aspect_ratio(),
            },
            pending_resize: None,
            status: Status::Running,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    #[cfg(test)]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Record a resize. Only the latest one is applied, at the start of the next frame.
    pub fn resize(&mut self, size: screen::Size) {
        self.pending_resize = Some(size);
    }

    pub fn request_close(&mut self) {
        self.status = Status::Closing;
    }

    pub fn frame(&mut self, input: &mut Input, delta_time: f32) -> Result<Status, Error> {
        if self.status == Status::Closing {
            return Ok(Status::Closing);
        }

        if let Some(size) = self.pending_resize.take() {
            self.state.size = size;
            if !size.is_empty() {
                debug!("reallocating render target at {}x{}", size.width, size.height);
                self.renderer.resize(size);
                self.state.aspect_ratio = size.aspect_ratio();
            }
        }

        let mouse_delta = input.take_mouse_delta();
        // Minimised: nothing can be allocated or presented. Motion is still drained so
        // the view does not jump on restore.
        if self.state.size.is_empty() {
            return Ok(Status::Running);
        }

        let camera = &mut self.state.camera;
        camera.look(mouse_delta, delta_time, self.config.look_sensitivity);
        let basis = camera.basis();
        camera.fly(&basis, input.movement(), self.config.speed * delta_time);

        let basis = match self.config.variant {
            Variant::Basic => basis,
            Variant::Julia => {
                self.state.parameter.adjust(
                    input.adjustments(),
                    self.config.parameter_rate * delta_time,
                );
                basis.with_projection(self.config.fov_radians(), self.state.aspect_ratio)
            }
        };

        trace!(
            "camera at {:?} yaw {} pitch {}, c = {:?}",
            camera.position,
            camera.yaw,
            camera.pitch,
            self.state.parameter.0
        );

        self.renderer.upload_frame(&uniforms::Frame::new(
            camera.position,
            &basis,
            self.state.aspect_ratio,
            self.state.parameter.0,
        ));
        self.renderer.draw()?;

        Ok(self.status)
    }

    /// Give the renderer back so the caller controls when GPU resources are released.
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
