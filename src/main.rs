use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use vignette::app::VignetteApp;
use vignette::catalog::SceneCatalog;
use vignette::config::ViewerConfig;
use vignette::gfx::rendering::HeadlessBackend;
use vignette::scene_manager::SceneManager;

/// Living-room vignette viewer
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Catalog key of the scene to open; defaults to the first scene
    #[arg(short, long)]
    scene: Option<String>,

    /// RON scene catalog to use instead of the built-in one
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// RON viewer configuration
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the catalog and exit
    #[arg(long)]
    list: bool,

    /// Print the effective configuration as RON and exit
    #[arg(long)]
    print_config: bool,

    /// Run without a window, logging what would be drawn
    #[arg(long)]
    headless: bool,

    /// Frames to step in headless mode
    #[arg(long, default_value_t = 1)]
    frames: u32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ViewerConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ViewerConfig::default(),
    };
    let catalog = match &args.catalog {
        Some(path) => SceneCatalog::load(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => SceneCatalog::builtin(),
    };

    if args.print_config {
        println!("{}", config.to_ron_string().context("serializing config")?);
        return Ok(());
    }

    if args.list {
        for (key, scene) in catalog.iter() {
            println!("{key}\t{}\t{} objects", scene.title, scene.objects.len());
        }
        return Ok(());
    }

    let scene = catalog
        .resolve_key(args.scene.as_deref())
        .context("catalog has no scenes")?
        .to_owned();

    if args.headless {
        return run_headless(&config, &catalog, &scene, args.frames);
    }

    log::info!("starting vignette on scene {scene}");
    VignetteApp::new(config, catalog, scene)
        .run()
        .context("viewer exited with an error")
}

fn run_headless(config: &ViewerConfig, catalog: &SceneCatalog, key: &str, frames: u32) -> Result<()> {
    let description = catalog
        .get(key)
        .with_context(|| format!("scene {key} is not in the catalog"))?;

    let backend = HeadlessBackend::new(config.window.width, config.window.height);
    let mut manager = SceneManager::new(backend, config);
    manager.load_scene(description);

    for _ in 0..frames {
        manager.animate().context("rendering headless frame")?;
    }

    let caption = manager.caption();
    log::info!("{}: {}", caption.title, caption.description);
    for (name, object) in manager.objects() {
        log::info!("  {name} ({}) size {:?} audio {:?}", object.kind, object.size, object.audio);
    }
    let listener = manager.listener();
    for emitter in manager.graph().audio_emitters() {
        log::info!(
            "  audio {:?} '{}' at {:.2} from the listener",
            emitter.audio.cue.kind,
            emitter.audio.cue.src,
            listener.distance_to(emitter.position)
        );
    }
    log::info!(
        "{} frames, last frame {:?}",
        manager.backend().frames(),
        manager.backend().last_frame()
    );
    Ok(())
}
