use crate::{WINDOW_POSITION, video::State};
use ppmview_std::{Canvas, Error, PPMVIEW_STYLIZED, RgbaBuf, Session};
use ppmview_wgpu::wgpu;
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow},
    window::{Window, WindowId},
};

/// The raster plus the window it is shown in.
///
/// Presenting uploads the finished frame and asks the window for a repaint.
struct WindowCanvas<'a> {
    raster: &'a mut RgbaBuf,
    state: &'a State,
}

impl Canvas for WindowCanvas<'_> {
    fn clear(&mut self) {
        self.raster.clear();
    }

    fn set_color(&mut self, r: f32, g: f32, b: f32) {
        self.raster.set_color(r, g, b);
    }

    fn draw_point(&mut self, x: u32, y: u32) {
        self.raster.draw_point(x, y);
    }

    fn present(&mut self) {
        self.raster.present();
        self.state.update_texture(self.raster.pixel_data());
        self.state.window().request_redraw();
    }
}

/// Tracks whether the window is hidden.
///
/// Some platforms report hiding and showing through `Occluded`, others
/// (Windows minimise) only through a zero sized `Resized` followed by the
/// real size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Visibility {
    hidden: bool,
}

impl Visibility {
    /// Returns `true` when the window was hidden and is visible again.
    fn occluded(&mut self, occluded: bool) -> bool {
        self.set_hidden(occluded)
    }

    /// Returns `true` when a minimised window got its size back.
    fn resized(&mut self, size: PhysicalSize<u32>) -> bool {
        self.set_hidden(size.width == 0 || size.height == 0)
    }

    fn set_hidden(&mut self, hidden: bool) -> bool {
        let restored = self.hidden && !hidden;
        self.hidden = hidden;
        restored
    }
}

pub struct App {
    error: Option<Error>,
    raster: RgbaBuf,
    session: Session,
    visibility: Visibility,
    // NOTE: carries the `Window`, thus it should be dropped after everything else.
    state: Option<State>,
}

impl App {
    pub fn new(session: Session) -> Self {
        let header = session.header();
        let raster = RgbaBuf::new(header.width(), header.height());

        Self {
            error: None,
            raster,
            session,
            visibility: Visibility::default(),
            state: None,
        }
    }

    /// The error that stopped the event loop, if any.
    pub fn finish(self) -> Result<(), Error> {
        self.error.map_or(Ok(()), Err)
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: Error) {
        tracing::error!(%err, "stopping");
        self.error.get_or_insert(err);
        self.session.terminate();
        event_loop.exit();
    }

    /// Decodes the image again from the replay anchor and shows it.
    fn redraw_pass(&mut self) {
        if let Some(state) = self.state.as_ref() {
            let mut canvas = WindowCanvas {
                raster: &mut self.raster,
                state,
            };
            self.session.render(&mut canvas);
        }
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<State, Error> {
        let header = self.session.header();
        let (x, y) = WINDOW_POSITION;

        let attributes = Window::default_attributes()
            .with_title(PPMVIEW_STYLIZED)
            .with_inner_size(PhysicalSize {
                width: header.width(),
                height: header.height(),
            })
            .with_position(PhysicalPosition::new(x, y))
            .with_resizable(false)
            .with_active(true);

        let window = event_loop
            .create_window(attributes)
            .map_err(|err| Error::subsystem("could not create window", err))?;

        pollster::block_on(State::new(window, header.width(), header.height()))
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match self.create_window(event_loop) {
            Ok(state) => {
                self.state = Some(state);
                event_loop.set_control_flow(ControlFlow::Wait);
                self.redraw_pass();
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn suspended(&mut self, _: &ActiveEventLoop) {
        self.state = None;
    }

    fn exiting(&mut self, _: &ActiveEventLoop) {
        self.session.terminate();
        self.state = None;
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.session.terminate();
                event_loop.exit();
            }
            WindowEvent::Occluded(occluded) => {
                tracing::debug!(occluded, "visibility changed");
                if self.visibility.occluded(occluded) {
                    self.redraw_pass();
                }
            }
            WindowEvent::Resized(size) => {
                let restored = self.visibility.resized(size);

                if size.width != 0
                    && size.height != 0
                    && let Some(state) = self.state.as_mut()
                {
                    state.resize(size);
                }

                if restored {
                    tracing::debug!(?size, "restored from minimised");
                    self.redraw_pass();
                }
            }
            WindowEvent::RedrawRequested => {
                use wgpu::SurfaceError::{Lost, Other, OutOfMemory, Outdated, Timeout};

                let Some(state) = self.state.as_mut() else {
                    return;
                };

                match state.render() {
                    Ok(()) => {}
                    Err(Lost | Outdated) => {
                        state.on_lost();
                        state.window().request_redraw();
                    }
                    Err(err @ OutOfMemory) => {
                        self.fail(event_loop, Error::subsystem("rendering failed", err));
                    }
                    Err(err @ (Timeout | Other)) => tracing::warn!(%err, "surface error"),
                }
            }
            _ => (),
        }
    }
}
