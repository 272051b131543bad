mod cli;
mod scenes;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use lumen_core::Scene;
use lumen_render::{error_heatmap, rmse, save_image, ImageBuffer, RenderSession};
use serde::Serialize;

use cli::{build_integrator, Cli, Command, ConvergenceArgs, Estimator, IntegratorKind, RenderArgs, SceneArgs};

/// Progress bar resolution (ticks per full render).
const PROGRESS_TICKS: u64 = 1000;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Render(args) => run_render(&args),
        Command::Convergence(args) => run_convergence(&args),
    }
}

fn build_scene(args: &SceneArgs) -> Result<Scene> {
    scenes::sphere_scene(args.width, args.height, args.fov, args.env_map.as_deref())
}

/// Render with a terminal progress bar.
fn render_with_bar(session: &RenderSession<'_>) -> Result<ImageBuffer> {
    let bar = ProgressBar::new(PROGRESS_TICKS);
    bar.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {percent:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_message(session.filename());

    let image = session.render_with_progress(&|fraction: f32| {
        bar.set_position((fraction * PROGRESS_TICKS as f32) as u64);
    });
    bar.finish_and_clear();

    Ok(image?)
}

fn output_path(out_dir: &Path, stem: &str, extension: &str) -> PathBuf {
    out_dir.join(format!("{}.{}", stem, extension))
}

fn run_render(args: &RenderArgs) -> Result<()> {
    let scene = build_scene(&args.scene)?;
    let integrator = build_integrator(args.integrator, args.samples, args.max_depth, &args.scene)?;

    let mut session = RenderSession::new(args.scene.name.clone(), integrator)
        .with_experiment(args.experiment.clone())
        .with_config(args.scene.render_config());
    session.add_scene(&scene)?;

    let start = Instant::now();
    let image = render_with_bar(&session)?;
    log::info!("Rendering time: {:.2}s", start.elapsed().as_secs_f32());

    fs::create_dir_all(&args.scene.out_dir)
        .with_context(|| format!("Failed to create {}", args.scene.out_dir.display()))?;
    let path = output_path(&args.scene.out_dir, &session.filename(), args.format.extension());
    save_image(&image, &path).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

#[derive(Serialize)]
struct ConvergenceEntry {
    samples: usize,
    rmse: f32,
    seconds: f32,
    image: String,
    heatmap: String,
}

#[derive(Serialize)]
struct ConvergenceReport {
    estimator: Estimator,
    reference_samples: usize,
    reference_image: String,
    width: u32,
    height: u32,
    seed: u64,
    entries: Vec<ConvergenceEntry>,
}

fn run_convergence(args: &ConvergenceArgs) -> Result<()> {
    let scene = build_scene(&args.scene)?;
    let out_dir = &args.scene.out_dir;
    fs::create_dir_all(out_dir).with_context(|| format!("Failed to create {}", out_dir.display()))?;

    // Independent noise for the reference so errors are not correlated
    let reference_config = args.scene.render_config().with_seed(args.scene.seed.wrapping_add(1));
    let mut reference_session = RenderSession::new(
        args.scene.name.clone(),
        build_integrator(IntegratorKind::Cmc, args.reference, 0.0, &args.scene)?,
    )
    .with_config(reference_config);
    reference_session.add_scene(&scene)?;

    let reference = render_with_bar(&reference_session)?;
    let reference_path = output_path(out_dir, &reference_session.filename(), "png");
    save_image(&reference, &reference_path)?;

    let mut entries = Vec::with_capacity(args.samples.len());
    for &n in &args.samples {
        let integrator = build_integrator(args.estimator.into(), n, 0.0, &args.scene)?;
        let mut session = RenderSession::new(args.scene.name.clone(), integrator)
            .with_config(args.scene.render_config());
        session.add_scene(&scene)?;

        let start = Instant::now();
        let image = render_with_bar(&session)?;
        let seconds = start.elapsed().as_secs_f32();

        let image_path = output_path(out_dir, &session.filename(), "png");
        save_image(&image, &image_path)?;

        let error = rmse(&reference, &image)?;
        let heatmap_path = output_path(out_dir, &format!("error_{}_samples", n), "png");
        error_heatmap(&error)
            .save(&heatmap_path)
            .with_context(|| format!("Failed to write {}", heatmap_path.display()))?;

        log::info!("n = {}, error = {:.4}, time = {:.2}s", n, error.overall, seconds);
        entries.push(ConvergenceEntry {
            samples: n,
            rmse: error.overall,
            seconds,
            image: image_path.display().to_string(),
            heatmap: heatmap_path.display().to_string(),
        });
    }

    let report = ConvergenceReport {
        estimator: args.estimator,
        reference_samples: args.reference,
        reference_image: reference_path.display().to_string(),
        width: args.scene.width,
        height: args.scene.height,
        seed: args.scene.seed,
        entries,
    };
    let report_path = out_dir.join("convergence.json");
    let file = fs::File::create(&report_path)
        .with_context(|| format!("Failed to create {}", report_path.display()))?;
    serde_json::to_writer_pretty(file, &report)?;
    log::info!("Wrote {}", report_path.display());

    Ok(())
}
