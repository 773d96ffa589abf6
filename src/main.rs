use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use offscreen_gui::cli::Cli;
use offscreen_gui::core::{GpuContext, GuiSession, RemoteEvent};
use offscreen_gui::demo::DemoPanel;
use offscreen_gui::sink::ImageFileSink;
use offscreen_gui::traits::{FrameSink, Gui};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.session_config().context("Failed to load session config")?;

    let gpu = GpuContext::new_blocking().context("Failed to create headless GPU context")?;
    let mut session = GuiSession::new(gpu, &config, DemoPanel::default())
        .context("Failed to create GUI session")?;
    let mut sink = ImageFileSink::new(&cli.output, cli.format)
        .with_context(|| format!("Failed to prepare {}", cli.output.display()))?;

    if let Some(path) = &cli.events {
        replay_events(&mut session, &mut sink, path)?;
    }

    for _ in 0..cli.frames {
        render_to(&mut session, &mut sink)?;
    }

    log::info!(
        "Wrote {} frames to {}",
        sink.written().len(),
        sink.dir().display()
    );
    session.close();

    Ok(())
}

/// Apply each event line, rendering whenever one asks for a redraw
fn replay_events<G: Gui>(
    session: &mut GuiSession<G>,
    sink: &mut ImageFileSink,
    path: &Path,
) -> Result<()> {
    let file =
        File::open(path).with_context(|| format!("Failed to open events {}", path.display()))?;

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }

        let event = match RemoteEvent::from_json(&line) {
            Ok(event) => event,
            Err(err) => {
                log::warn!("Skipping event on line {}: {}", index + 1, err);
                continue;
            }
        };

        session
            .handle_event(&event)
            .with_context(|| format!("Failed to apply event on line {}", index + 1))?;

        if session.take_redraw_request() {
            render_to(session, sink)?;
        }
    }

    Ok(())
}

fn render_to<G: Gui>(session: &mut GuiSession<G>, sink: &mut ImageFileSink) -> Result<()> {
    let frame = session.render_frame().context("Failed to render frame")?;
    sink.present(&frame)
        .with_context(|| format!("Failed to write frame {}", frame.number))
}
