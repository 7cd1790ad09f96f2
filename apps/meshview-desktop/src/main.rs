use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use glam::Vec3;
use meshview_camera::{OrientationCamera, Projection};
use meshview_common::{Color, MeshId, Transform, ViewerConfig};
use meshview_input::{Action, MoveKey, local_delta};
use meshview_mesh::{MeshData, load_obj};
use meshview_render_wgpu::WgpuRenderer;
use meshview_scene::{Paint, Scene, SceneObject};
use meshview_tools::{FpsCounter, SceneInspector};
use meshview_ui::{ColorMixer, ToggleButton};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "meshview-desktop", about = "Mesh viewer desktop application")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Viewer configuration file (YAML)
    #[arg(long, default_value = "meshview.yaml")]
    config: PathBuf,

    /// OBJ meshes to load; a demo cube is shown when none are given
    meshes: Vec<PathBuf>,

    /// Texture image applied to the loaded meshes
    #[arg(long)]
    texture: Option<PathBuf>,
}

/// Application state.
struct AppState {
    scene: Scene,
    camera: OrientationCamera,
    projection: Projection,
    background: Color,
    fps: FpsCounter,
    selected: Option<MeshId>,
    show_inspector: bool,
    edit_background: bool,
    tint_mixer: ColorMixer,
    background_mixer: ColorMixer,
    // Input state
    keys_held: HashSet<KeyCode>,
    mouse_captured: bool,
    last_frame: Instant,
    // Paint edits whose GPU buffers must be re-uploaded
    repaint_queue: Vec<MeshId>,
}

impl AppState {
    fn new(config: &ViewerConfig, scene: Scene) -> Self {
        let mut camera = OrientationCamera::default();
        camera.speed = config.move_speed;
        camera.sensitivity = config.sensitivity;

        let projection = Projection {
            fov_degrees: config.fov_degrees,
            near: config.near,
            far: config.far,
            ..Projection::default()
        };

        Self {
            scene,
            camera,
            projection,
            background: config.background,
            fps: FpsCounter::new(),
            selected: None,
            show_inspector: true,
            edit_background: false,
            tint_mixer: ColorMixer::from_color(Color::WHITE),
            background_mixer: ColorMixer::from_color(config.background),
            keys_held: HashSet::new(),
            mouse_captured: false,
            last_frame: Instant::now(),
            repaint_queue: Vec::new(),
        }
    }

    /// Per-frame camera movement: held keys -> one local-space delta.
    fn update(&mut self, dt: f32) {
        let held = self.keys_held.iter().filter_map(|key| move_key(*key));
        let boost = self.keys_held.contains(&KeyCode::ShiftLeft);
        let delta = local_delta(held, dt, self.camera.speed, boost);
        if delta != Vec3::ZERO {
            self.camera.move_local(delta.x, delta.y, delta.z);
        }
    }

    fn apply(&mut self, action: Action, event_loop: &ActiveEventLoop) {
        match action {
            Action::MoveLocal(delta) => {
                self.camera.move_local(delta.x, delta.y, delta.z);
            }
            Action::Look { dx, dy } => {
                self.camera.look(dx, dy);
            }
            Action::ToggleInspector => {
                self.show_inspector = !self.show_inspector;
            }
            Action::Quit => {
                event_loop.exit();
            }
            Action::Noop => {}
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool, event_loop: &ActiveEventLoop) {
        if pressed {
            self.keys_held.insert(key);
        } else {
            self.keys_held.remove(&key);
        }

        if !pressed {
            return;
        }

        match key {
            KeyCode::KeyF => self.frame_selected(),
            KeyCode::Delete | KeyCode::Backspace => self.remove_selected(),
            _ => {
                let action = ui_action(key);
                self.apply(action, event_loop);
            }
        }
    }

    /// Point the camera at the selected object's mesh center.
    fn frame_selected(&mut self) {
        let Some(id) = self.selected else {
            return;
        };
        let Some(object) = self.scene.get(id) else {
            return;
        };
        let center = match object.mesh.center() {
            Ok(center) => center,
            Err(e) => {
                tracing::warn!("cannot frame {}: {e}", object.name);
                return;
            }
        };
        let target = object.transform.position + center;
        if let Err(e) = self.camera.look_at(target) {
            tracing::warn!("cannot frame {}: {e}", object.name);
        }
    }

    fn remove_selected(&mut self) {
        if let Some(id) = self.selected {
            match self.scene.remove(id) {
                Ok(object) => {
                    tracing::info!("removed {}", object.name);
                    self.selected = None;
                }
                Err(e) => tracing::warn!("{e}"),
            }
        }
    }

    fn select(&mut self, id: MeshId) {
        self.selected = Some(id);
        // Reload the mixer from the newly selected object's paint.
        if let Some(object) = self.scene.get(id) {
            if let Paint::Solid(color) = object.paint {
                self.tint_mixer = ColorMixer::from_color(color);
            }
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_inspector {
            return;
        }

        let summary = SceneInspector::summary(&self.scene);

        egui::SidePanel::left("inspector")
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.heading("Mesh Viewer");
                ui.separator();
                ui.label(format!("FPS: {:.0}", self.fps.fps()));
                ui.label(format!(
                    "Objects: {}  Vertices: {}  Faces: {}",
                    summary.object_count, summary.total_vertices, summary.total_faces
                ));
                ui.label(format!(
                    "Camera: ({:.1}, {:.1}, {:.1})  yaw {:.0}  pitch {:.0}",
                    self.camera.position.x,
                    self.camera.position.y,
                    self.camera.position.z,
                    self.camera.yaw(),
                    self.camera.pitch()
                ));
                ui.separator();

                ui.heading("Objects");
                let ids = SceneInspector::list(&self.scene);
                for id in ids {
                    let Some(info) = SceneInspector::inspect(&self.scene, id) else {
                        continue;
                    };
                    let is_selected = self.selected == Some(id);
                    let label = format!(
                        "{} ({} verts, {} faces)",
                        info.name, info.vertex_count, info.face_count
                    );
                    if ui.selectable_label(is_selected, label).clicked() {
                        self.select(id);
                    }
                }

                if let Some(id) = self.selected {
                    ui.separator();
                    ui.heading("Selected");
                    ui.horizontal(|ui| {
                        if ui.button("Frame (F)").clicked() {
                            self.frame_selected();
                        }
                        if ui.button("Remove (Del)").clicked() {
                            self.remove_selected();
                        }
                    });

                    let is_solid = matches!(
                        self.scene.get(id).map(|o| &o.paint),
                        Some(Paint::Solid(_))
                    );
                    if is_solid {
                        ui.label("Tint:");
                        if let Some(color) = self.tint_mixer.show(ui) {
                            if let Some(object) = self.scene.get_mut(id) {
                                object.paint = Paint::Solid(color);
                                self.repaint_queue.push(id);
                            }
                        }
                    }
                }

                ui.separator();
                ui.add(ToggleButton::new("Edit background", &mut self.edit_background));
                if self.edit_background {
                    if let Some(color) = self.background_mixer.show(ui) {
                        self.background = color;
                    }
                }

                ui.separator();
                ui.small("F1: Toggle Inspector | RMB: Look | WASD: Move");
            });
    }
}

/// Movement key bindings.
fn move_key(key: KeyCode) -> Option<MoveKey> {
    match key {
        KeyCode::KeyW => Some(MoveKey::Forward),
        KeyCode::KeyS => Some(MoveKey::Back),
        KeyCode::KeyA => Some(MoveKey::Left),
        KeyCode::KeyD => Some(MoveKey::Right),
        KeyCode::Space => Some(MoveKey::Up),
        KeyCode::ControlLeft => Some(MoveKey::Down),
        _ => None,
    }
}

/// Non-movement key bindings.
fn ui_action(key: KeyCode) -> Action {
    match key {
        KeyCode::F1 => Action::ToggleInspector,
        KeyCode::Escape => Action::Quit,
        _ => Action::Noop,
    }
}

struct GpuApp {
    state: AppState,
    window_size: (u32, u32),
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<WgpuRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl GpuApp {
    fn new(state: AppState, window_size: (u32, u32)) -> Self {
        Self {
            state,
            window_size,
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Mesh Viewer")
            .with_inner_size(PhysicalSize::new(self.window_size.0, self.window_size.1));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("meshview_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.state.projection.resize(size.width, size.height);

        let renderer = WgpuRenderer::new(&device, surface_format, size.width, size.height);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(egui_winit) = &mut self.egui_winit {
            let response = egui_winit.on_window_event(self.window.as_ref().unwrap(), &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    self.state.projection.resize(config.width, config.height);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed, event_loop);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state: btn_state,
                ..
            } => {
                self.state.mouse_captured = btn_state == ElementState::Pressed;
                if let Some(window) = &self.window {
                    let _ = window.set_cursor_visible(!self.state.mouse_captured);
                }
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.state.last_frame).as_secs_f32().min(0.1);
                self.state.last_frame = now;
                self.state.update(dt);
                self.state.fps.tick(now);

                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
                        return;
                    }
                    Err(e) => {
                        tracing::error!("surface error: {e}");
                        return;
                    }
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                if let Some(renderer) = &mut self.renderer {
                    for id in self.state.repaint_queue.drain(..) {
                        renderer.invalidate(id);
                    }
                    if let Err(e) = renderer.render(
                        device,
                        queue,
                        &view,
                        &self.state.camera,
                        &self.state.projection,
                        &self.state.scene,
                        self.state.selected,
                        self.state.background,
                    ) {
                        tracing::error!("render failed: {e}");
                        event_loop.exit();
                        return;
                    }
                }

                let raw_input = self
                    .egui_winit
                    .as_mut()
                    .unwrap()
                    .take_egui_input(self.window.as_ref().unwrap());
                let full_output = self.egui_ctx.run(raw_input, |ctx| {
                    self.state.draw_ui(ctx);
                });

                self.egui_winit.as_mut().unwrap().handle_platform_output(
                    self.window.as_ref().unwrap(),
                    full_output.platform_output,
                );

                let paint_jobs = self
                    .egui_ctx
                    .tessellate(full_output.shapes, full_output.pixels_per_point);

                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [
                        self.config.as_ref().unwrap().width,
                        self.config.as_ref().unwrap().height,
                    ],
                    pixels_per_point: full_output.pixels_per_point,
                };

                {
                    let egui_renderer = self.egui_renderer.as_mut().unwrap();
                    for (id, image_delta) in &full_output.textures_delta.set {
                        egui_renderer.update_texture(device, queue, *id, image_delta);
                    }
                    let mut encoder =
                        device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("egui_encoder"),
                        });
                    egui_renderer.update_buffers(
                        device,
                        queue,
                        &mut encoder,
                        &paint_jobs,
                        &screen_descriptor,
                    );
                    {
                        let mut pass = encoder
                            .begin_render_pass(&wgpu::RenderPassDescriptor {
                                label: Some("egui_pass"),
                                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                    view: &view,
                                    resolve_target: None,
                                    ops: wgpu::Operations {
                                        load: wgpu::LoadOp::Load,
                                        store: wgpu::StoreOp::Store,
                                    },
                                })],
                                depth_stencil_attachment: None,
                                ..Default::default()
                            })
                            .forget_lifetime();
                        egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
                    }
                    queue.submit(std::iter::once(encoder.finish()));
                    for id in &full_output.textures_delta.free {
                        egui_renderer.free_texture(id);
                    }
                }

                output.present();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.state.mouse_captured {
                // Mouse up means look up.
                let action = Action::Look {
                    dx: delta.0 as f32,
                    dy: -(delta.1 as f32),
                };
                self.state.apply(action, event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Load the requested meshes into a scene, laid out in a row. With no meshes
/// given, show the built-in demo cube.
fn build_scene(cli: &Cli) -> Result<Scene> {
    if let Some(texture) = &cli.texture {
        anyhow::ensure!(
            texture.exists(),
            "texture not found: {}",
            texture.display()
        );
    }

    let paint_for = |index: usize| -> Paint {
        match &cli.texture {
            Some(path) => Paint::Textured(path.clone()),
            // Alternate tints so untextured objects are told apart.
            None if index % 2 == 0 => Paint::Solid(Color {
                r: 180,
                g: 180,
                b: 190,
            }),
            None => Paint::Solid(Color {
                r: 120,
                g: 160,
                b: 220,
            }),
        }
    };

    let mut scene = Scene::new();
    if cli.meshes.is_empty() {
        scene.add(SceneObject::new(MeshData::unit_cube()).painted(paint_for(0)));
        return Ok(scene);
    }

    for (index, path) in cli.meshes.iter().enumerate() {
        let mesh = load_obj(path)?;
        let object = SceneObject::new(mesh)
            .at(Transform::from_position(Vec3::new(index as f32 * 3.0, 0.0, 0.0)))
            .painted(paint_for(index));
        scene.add(object);
    }
    Ok(scene)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("meshview-desktop starting");

    let config = ViewerConfig::load(&cli.config)?;
    let scene = build_scene(&cli)?;
    let state = AppState::new(&config, scene);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state, (config.window_width, config.window_height));
    event_loop.run_app(&mut app)?;

    Ok(())
}
