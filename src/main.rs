mod font;
mod graphics;
mod input;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use flickergrid::config::DEFAULT_CONFIG_PATH;
use flickergrid::{Config, Engine};

use crate::font::FontRenderer;
use crate::graphics::GraphicsRenderer;
use crate::input::InputHandler;

/// Logs a startup error and terminates. Broken resources or config are not
/// something the frame loop can recover from.
fn fatal(err: &dyn std::error::Error) -> ! {
    log::error!("{}", err);
    eprintln!("flickergrid: {}", err);
    std::process::exit(1);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = Config::load_or_default(&config_path).unwrap_or_else(|err| fatal(&err));
    let mut engine = Engine::new(&config).unwrap_or_else(|err| fatal(&err));

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(config.title.as_str())
        .with_inner_size(winit::dpi::LogicalSize::new(config.window_width, config.window_height))
        .with_resizable(false)
        .build(&event_loop)?;

    let font = FontRenderer::find(config.font_path.as_deref());
    let mut graphics = GraphicsRenderer::new(
        &window,
        config.window_width,
        config.window_height,
        config.tile_size,
        &config.title,
        font,
    )?;
    let mut input_handler = InputHandler::new();

    let frame_time = Duration::from_secs_f64(1.0 / f64::from(config.target_fps));
    let mut next_frame = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::WaitUntil(next_frame);

        match event {
            Event::WindowEvent { event, .. } => match event {
                // Escape is a menu key; only the window's close button quits.
                WindowEvent::CloseRequested => {
                    log::info!("Close requested, shutting down");
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    graphics.resize(size.width, size.height);
                }
                WindowEvent::KeyboardInput { input, .. } => {
                    input_handler.handle_keyboard_input(&input);
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                let now = Instant::now();
                if now < next_frame {
                    return;
                }
                next_frame += frame_time;
                if next_frame < now {
                    // fell behind, don't try to catch up
                    next_frame = now + frame_time;
                }

                engine.frame(&input_handler.take_pressed());
                graphics.render(&engine);
                if let Err(err) = graphics.present() {
                    log::error!("Render error: {}", err);
                    *control_flow = ControlFlow::Exit;
                    return;
                }
                *control_flow = ControlFlow::WaitUntil(next_frame);
            }
            _ => {}
        }
    });
}
