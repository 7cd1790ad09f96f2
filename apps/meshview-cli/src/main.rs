use clap::{Parser, Subcommand};
use glam::Vec3;
use meshview_camera::OrientationCamera;
use meshview_mesh::load_obj;
use meshview_render::{DebugTextRenderer, RenderView, Renderer};
use meshview_scene::{Scene, SceneObject};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "meshview-cli", about = "CLI tool for meshview operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate info for the workspace
    Info,
    /// Parse a mesh file and summarize it
    Probe {
        /// OBJ file to read
        obj: PathBuf,
        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the camera basis vectors for a given orientation
    Basis {
        /// Yaw in degrees
        #[arg(long, default_value_t = 0.0)]
        yaw: f32,
        /// Pitch in degrees (clamped inside -90..90)
        #[arg(long, default_value_t = 0.0)]
        pitch: f32,
    },
}

#[derive(Serialize)]
struct MeshSummary {
    name: String,
    vertices: usize,
    uvs: usize,
    faces: usize,
    triangles: usize,
    bounds: Option<([f32; 3], [f32; 3])>,
    center: Option<[f32; 3]>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("meshview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", meshview_common::crate_info());
            println!("camera: {}", meshview_camera::crate_info());
            println!("mesh: {}", meshview_mesh::crate_info());
            println!("scene: {}", meshview_scene::crate_info());
            println!("input: {}", meshview_input::crate_info());
            println!("render: {}", meshview_render::crate_info());
            println!("tools: {}", meshview_tools::crate_info());
        }
        Commands::Probe { obj, json } => {
            let mesh = load_obj(&obj)?;

            if json {
                let summary = MeshSummary {
                    name: mesh.name.clone(),
                    vertices: mesh.vertex_count(),
                    uvs: mesh.uvs.len(),
                    faces: mesh.face_count(),
                    triangles: mesh.triangles().len(),
                    bounds: mesh.bounds().map(|(min, max)| (min.to_array(), max.to_array())),
                    center: mesh.center().ok().map(|c| c.to_array()),
                };
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                let mut scene = Scene::new();
                scene.add(SceneObject::new(mesh));

                let camera = OrientationCamera::default();
                let view = RenderView::from_camera(&camera, 60.0);
                print!("{}", DebugTextRenderer::new().render(&scene, &view));
            }
        }
        Commands::Basis { yaw, pitch } => {
            let camera = OrientationCamera::new(Vec3::ZERO, yaw, pitch);
            let b = camera.basis();

            println!("yaw={} pitch={} (clamped)", camera.yaw(), camera.pitch());
            println!("front = ({:+.6}, {:+.6}, {:+.6})", b.front.x, b.front.y, b.front.z);
            println!("right = ({:+.6}, {:+.6}, {:+.6})", b.right.x, b.right.y, b.right.z);
            println!("up    = ({:+.6}, {:+.6}, {:+.6})", b.up.x, b.up.y, b.up.z);
            println!(
                "lengths: |front|={:.6} |right|={:.6} |up|={:.6}",
                b.front.length(),
                b.right.length(),
                b.up.length()
            );
            println!(
                "orthogonality: f.r={:+.2e} f.u={:+.2e} r.u={:+.2e}",
                b.front.dot(b.right),
                b.front.dot(b.up),
                b.right.dot(b.up)
            );
        }
    }

    Ok(())
}
