//! Three Scene Export CLI
//!
//! Export scene snapshot files to the Three.js Object Scene Format.

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use three_scene_export::{export_to_directory, ExportSettings, Revision, Scene};

#[derive(Parser)]
#[command(name = "three-scene-export")]
#[command(author, version, about = "Export scene snapshots to Three.js JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a scene snapshot to a JSON document plus textures
    Export {
        /// Input scene snapshot (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Target directory for the document and texture files
        #[arg(short, long)]
        output: PathBuf,

        /// Name of the written document file
        #[arg(long, default_value = "scene.json")]
        json_name: String,

        /// Target Three.js revision
        #[arg(long, value_enum, default_value = "r72")]
        revision: RevisionArg,

        /// Decimal places for rounded transforms and vertices
        #[arg(long, default_value = "4")]
        decimal_places: u32,

        /// Skip camera nodes
        #[arg(long)]
        no_cameras: bool,

        /// Skip collider descriptions
        #[arg(long)]
        no_colliders: bool,

        /// Skip texture file copying
        #[arg(long)]
        no_textures: bool,

        /// Skip baked lightmaps
        #[arg(long)]
        no_lightmaps: bool,

        /// Skip light nodes
        #[arg(long)]
        no_lights: bool,

        /// Skip the synthetic ambient light
        #[arg(long)]
        no_ambient_light: bool,

        /// Skip script metadata
        #[arg(long)]
        no_scripts: bool,

        /// Include inactive nodes
        #[arg(long)]
        include_inactive: bool,

        /// Brightness constant for RGBM lightmap decoding
        #[arg(long, default_value = "5.0")]
        lightmap_contrast: f32,
    },

    /// Show information about a scene snapshot
    Info {
        /// Input scene snapshot (JSON)
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum RevisionArg {
    /// Revision 71 (string-named sampler constants)
    R71,
    /// Revision 72 and above (numeric sampler codes)
    R72,
}

impl From<RevisionArg> for Revision {
    fn from(arg: RevisionArg) -> Self {
        match arg {
            RevisionArg::R71 => Revision::R71,
            RevisionArg::R72 => Revision::R72Plus,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            input,
            output,
            json_name,
            revision,
            decimal_places,
            no_cameras,
            no_colliders,
            no_textures,
            no_lightmaps,
            no_lights,
            no_ambient_light,
            no_scripts,
            include_inactive,
            lightmap_contrast,
        } => {
            let settings = ExportSettings {
                decimal_places,
                revision: revision.into(),
                export_cameras: !no_cameras,
                export_colliders: !no_colliders,
                export_textures: !no_textures,
                export_lightmaps: !no_lightmaps,
                export_lights: !no_lights,
                export_ambient_light: !no_ambient_light,
                export_scripts: !no_scripts,
                include_inactive,
                lightmap_contrast,
            };
            export(&input, &output, &json_name, &settings)?;
        }
        Commands::Info { input } => {
            show_scene_info(&input)?;
        }
    }

    Ok(())
}

fn load_scene(path: &PathBuf) -> Result<Scene, Box<dyn std::error::Error>> {
    println!("Loading scene snapshot from {:?}...", path);
    let json = fs::read_to_string(path)?;
    let scene: Scene = serde_json::from_str(&json)?;
    println!(
        "  {} nodes, {} meshes, {} materials, {} textures",
        scene.nodes.len(),
        scene.meshes.len(),
        scene.materials.len(),
        scene.textures.len()
    );
    Ok(scene)
}

fn export(
    input: &PathBuf,
    output: &PathBuf,
    json_name: &str,
    settings: &ExportSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    let scene = load_scene(input)?;

    let path = export_to_directory(&scene, settings, output, json_name)?;
    println!("Exported document to {:?}", path);
    if settings.export_textures {
        println!("  Textures copied to {:?}", output);
    }

    Ok(())
}

fn show_scene_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let scene = load_scene(input)?;

    let active = scene.nodes.iter().filter(|n| n.active).count();
    let with_mesh = scene.nodes.iter().filter(|n| n.mesh.is_some()).count();
    let cameras = scene.nodes.iter().filter(|n| n.camera.is_some()).count();
    let lights = scene.nodes.iter().filter(|n| n.light.is_some()).count();
    let colliders = scene.nodes.iter().filter(|n| n.collider.is_some()).count();
    let scripts = scene.nodes.iter().filter(|n| n.script.is_some()).count();

    println!("\nScene Info:");
    println!("  Active nodes: {}/{}", active, scene.nodes.len());
    println!("  Mesh nodes: {}", with_mesh);
    println!("  Cameras: {}", cameras);
    println!("  Lights: {}", lights);
    println!("  Colliders: {}", colliders);
    println!("  Scripts: {}", scripts);
    println!("  Lightmaps: {}", scene.lightmaps.len());

    Ok(())
}
