// main.rs — 360° 全景看房：窗口、事件循环与会话管理

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // 在 Release 模式下隐藏控制台窗口

mod camera;
mod cli;
mod error;
mod fonts;
mod fullscreen;
mod i18n;
mod input;
mod loader;
mod mesh;
mod overlay;
mod panorama;
mod renderer;
mod session;
mod ui;

use crate::i18n::tr;
use anyhow::Context as _;
use clap::Parser;
use fullscreen::FullscreenState;
use input::InputTracker;
use loader::{DefaultFetcher, ImageFetcher};
use renderer::Renderer;
use session::{end_for_remount, ViewerSession};

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::{Fullscreen, Window, WindowBuilder},
};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Args::parse();
    i18n::init(args.lang.clone());

    let event_loop = EventLoop::new();
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(tr("app.title"))
            .with_inner_size(LogicalSize::new(1280, 720))
            .build(&event_loop)
            .context("failed to create window")?,
    );

    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;
    let fetcher: Arc<dyn ImageFetcher> = Arc::new(DefaultFetcher);
    let fallback = args.fallback.clone();

    let mut session = Some(mount(&mut renderer, args.initial_source(), &fallback, &fetcher));
    let mut input = InputTracker::default();
    let mut fullscreen = FullscreenState::new(window.fullscreen().is_some());

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, window_id } if window_id == window.id() => {
                // 先让 egui 处理事件
                let response = renderer.egui_state.on_event(&renderer.egui_ctx, &event);

                let mut open: Option<String> = None;
                match &event {
                    WindowEvent::CloseRequested => {
                        *control_flow = ControlFlow::Exit;
                    }

                    WindowEvent::Resized(new_size) => {
                        renderer.resize(*new_size);
                        fullscreen.sync(window.fullscreen().is_some());
                    }

                    WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                        renderer.resize(**new_inner_size);
                    }

                    WindowEvent::KeyboardInput {
                        input:
                            KeyboardInput {
                                state: ElementState::Pressed,
                                virtual_keycode: Some(key),
                                ..
                            },
                        ..
                    } if !response.consumed => match key {
                        VirtualKeyCode::O => {
                            open = ui::pick_panorama_file().map(|p| p.to_string_lossy().into_owned());
                        }
                        VirtualKeyCode::F11 => {
                            request_fullscreen(&window, fullscreen.toggle_request());
                        }
                        VirtualKeyCode::Escape if fullscreen.is_fullscreen() => {
                            request_fullscreen(&window, false);
                        }
                        VirtualKeyCode::R => {
                            if let Some(s) = session.as_mut() {
                                s.viewer.reset();
                            }
                        }
                        VirtualKeyCode::H => {
                            if let Some(s) = session.as_mut() {
                                s.help.toggle();
                            }
                        }
                        _ => {}
                    },

                    WindowEvent::DroppedFile(path) => {
                        open = Some(path.to_string_lossy().into_owned());
                    }

                    _ => {}
                }

                // 指针事件只路由给当前挂载的会话
                if let Some(s) = session.as_mut() {
                    if let Some(viewer_input) =
                        input.translate(&event, window.scale_factor(), response.consumed)
                    {
                        s.handle_input(viewer_input);
                    }
                }

                if let Some(source) = open {
                    remount(&mut session, &mut input, &mut renderer, &source, &fallback, &fetcher);
                    window.request_redraw();
                }
            }

            Event::RedrawRequested(_) => {
                fullscreen.sync(window.fullscreen().is_some());

                if let Some(s) = session.as_mut() {
                    if let Some(image) = s.poll_load() {
                        renderer.bind_panorama(image.pixels);
                    }
                    let orientation = s.frame(Instant::now());
                    renderer.update_camera(orientation, s.viewer.fov);
                }

                let mut actions = ui::UiActions::default();
                let is_fullscreen = fullscreen.is_fullscreen();
                let render_result = renderer.render_with_ui(&window, |ctx| {
                    if let Some(s) = session.as_ref() {
                        actions = ui::draw_ui(ctx, s, is_fullscreen);
                    }
                });

                match render_result {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => renderer.resize(renderer.size),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("GPU out of memory, exiting");
                        *control_flow = ControlFlow::Exit;
                    }
                    Err(e) => log::error!("render error: {:?}", e),
                }

                if let Some(s) = session.as_mut() {
                    if actions.reset {
                        s.viewer.reset();
                    }
                    if actions.toggle_help {
                        s.help.toggle();
                    }
                    if actions.dismiss_error {
                        s.load.dismiss_error();
                    }
                }
                if actions.toggle_fullscreen {
                    request_fullscreen(&window, fullscreen.toggle_request());
                }
                if let Some(lang) = actions.language {
                    i18n::init(lang);
                    window.set_title(&tr("app.title"));
                }
                if let Some(path) = actions.open_image {
                    remount(
                        &mut session,
                        &mut input,
                        &mut renderer,
                        &path.to_string_lossy(),
                        &fallback,
                        &fetcher,
                    );
                }
                if actions.exit {
                    *control_flow = ControlFlow::Exit;
                }
            }

            Event::MainEventsCleared => {
                window.request_redraw();
            }

            Event::LoopDestroyed => {
                session.take();
                renderer.unmount_scene();
            }

            _ => {}
        }
    });
}

fn mount(
    renderer: &mut Renderer,
    source: &str,
    fallback: &str,
    fetcher: &Arc<dyn ImageFetcher>,
) -> ViewerSession {
    renderer.mount_scene();
    ViewerSession::mount(source, fallback, fetcher.clone(), Instant::now())
}

/// Tears the current viewer down completely before mounting `source`.
fn remount(
    session: &mut Option<ViewerSession>,
    input: &mut InputTracker,
    renderer: &mut Renderer,
    source: &str,
    fallback: &str,
    fetcher: &Arc<dyn ImageFetcher>,
) {
    if !end_for_remount(session, input, source, || renderer.unmount_scene()) {
        return;
    }
    if !source.contains("://") && !Path::new(source).exists() {
        log::warn!("{} does not exist; the fallback will be shown", source);
    }

    *session = Some(mount(renderer, source, fallback, fetcher));
}

/// Asks the platform for a fullscreen state. The advisory flag only follows
/// once the platform reports the change.
fn request_fullscreen(window: &Window, on: bool) {
    log::debug!("requesting fullscreen = {}", on);
    window.set_fullscreen(on.then_some(Fullscreen::Borderless(None)));
}
