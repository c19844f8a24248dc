use std::time::Instant;

use log::{debug, error, info, trace, warn};
use winit::{
    event::{DeviceEvent, Event, KeyboardInput, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{CursorGrabMode, Window, WindowBuilder},
};

use crate::{
    config::Config,
    error::Error,
    frame::{FrameLoop, Status},
    gpu::GpuRenderer,
    input::Input,
    pacer::FramePacer,
    screen,
};

/// How the cursor is held while the window has focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Grab {
    /// The platform pins the cursor in place.
    Locked,
    /// Confined, or not grabbed at all. Warped back to the centre after every frame.
    Warped,
    /// Focus is elsewhere. The cursor belongs to the user.
    Released,
}

/// Hidden, grabbed cursor. Motion is read from raw device events, so warping back to
/// the centre only matters when the platform cannot lock the cursor in place.
struct Pointer {
    grab: Grab,
}

impl Pointer {
    fn capture(window: &Window) -> Self {
        window.set_cursor_visible(false);

        let grab = match window.set_cursor_grab(CursorGrabMode::Locked) {
            Ok(()) => Grab::Locked,
            Err(locked_error) => {
                debug!("cannot lock cursor ({}), confining it instead", locked_error);
                if let Err(confined_error) = window.set_cursor_grab(CursorGrabMode::Confined) {
                    warn!("cannot grab cursor: {}", confined_error);
                }
                Grab::Warped
            }
        };

        let pointer = Self { grab };
        pointer.recenter(window);
        pointer
    }

    fn release(&mut self, window: &Window) {
        if let Err(error) = window.set_cursor_grab(CursorGrabMode::None) {
            debug!("cannot release cursor: {}", error);
        }
        window.set_cursor_visible(true);
        self.grab = Grab::Released;
    }

    fn needs_warp(&self) -> bool {
        self.grab == Grab::Warped
    }

    fn recenter(&self, window: &Window) {
        if !self.needs_warp() {
            return;
        }
        let center = screen::Size::from(window.inner_size()).center();
        if let Err(error) = window.set_cursor_position(center) {
            trace!("cannot warp cursor: {}", error);
        }
    }
}

pub fn run(config: Config) -> Result<(), Error> {
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Julia")
        .with_resizable(true)
        .build(&event_loop)?;

    let renderer = GpuRenderer::new(&window, config.variant)?;
    let mut pointer = Pointer::capture(&window);
    let mut pacer = FramePacer::new(config.fps, Instant::now());
    let mut frame_loop = Some(FrameLoop::new(
        renderer,
        config,
        screen::Size::from(window.inner_size()),
    ));
    let mut input = Input::new();

    info!("running; WASD to move, mouse to look, T/Y U/I O/P H/J to change c");

    event_loop.run(move |event, _, control_flow| {
        if let Event::LoopDestroyed = event {
            // Release the shader and render target before the window goes away.
            drop(frame_loop.take().map(FrameLoop::into_renderer));
            debug!("closing window");
            return;
        }

        let Some(frame_loop) = frame_loop.as_mut() else {
            return;
        };

        match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    info!(
                        "close requested with camera at {:?}",
                        frame_loop.state().camera.position
                    );
                    frame_loop.request_close();
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    frame_loop.resize(size.into());
                }
                WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                    frame_loop.resize((*new_inner_size).into());
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            virtual_keycode: Some(key),
                            state,
                            ..
                        },
                    ..
                } => {
                    input.key(key, state);
                }
                WindowEvent::Focused(true) => {
                    pointer = Pointer::capture(&window);
                }
                WindowEvent::Focused(false) => {
                    pointer.release(&window);
                    input.reset();
                }
                _ => {}
            },
            Event::DeviceEvent {
                event: DeviceEvent::MouseMotion { delta: (dx, dy) },
                ..
            } if pointer.grab != Grab::Released => {
                input.mouse_motion(dx, dy);
            }
            Event::MainEventsCleared => {
                if pacer.is_due(Instant::now()) {
                    window.request_redraw();
                }
                if !matches!(*control_flow, ControlFlow::ExitWithCode(_)) {
                    *control_flow = ControlFlow::WaitUntil(pacer.deadline());
                }
            }
            Event::RedrawRequested(window_id) if window_id == window.id() => {
                let delta_time = pacer.tick(Instant::now());
                match frame_loop.frame(&mut input, delta_time) {
                    Ok(Status::Running) => pointer.recenter(&window),
                    Ok(Status::Closing) => *control_flow = ControlFlow::Exit,
                    Err(error) => {
                        error!("{}", error);
                        *control_flow = ControlFlow::ExitWithCode(1);
                    }
                }
            }
            _ => {}
        }
    })
}
