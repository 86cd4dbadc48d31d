mod app;
mod video;

use app::App;
use ppmview_std::{Cli, Error};
use winit::event_loop::EventLoop;

const WINDOW_POSITION: (i32, i32) = (128, 128);

fn main() -> anyhow::Result<()> {
    ppmview_std::logging::init();

    let args = Cli::from_args()?;

    let event_loop = EventLoop::new()
        .map_err(|err| Error::subsystem("unable to initialise the windowing system", err))?;

    let session = ppmview_std::open_session(args.file())?;
    let mut app = App::new(session);

    event_loop
        .run_app(&mut app)
        .map_err(|err| Error::subsystem("event loop terminated abnormally", err))?;

    app.finish()?;

    Ok(())
}
