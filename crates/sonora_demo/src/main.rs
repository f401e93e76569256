//! Sonora demo host
//!
//! Binds an equalizer controller to an in-process software session, drives it
//! the way a UI would, and renders a test tone through the live equalizer.
//!
//! Usage: `sonora-demo [session-config.json]`
//! Log level follows `RUST_LOG` (default `sonora=debug`).

use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use sonora_core::{EqualizerController, EqualizerEvent, SessionConfig, SoftwareSession};
use sonora_engine::LiveEqualizer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const FRAMES_PER_BUFFER: usize = 512;

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sonora=debug")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(&path)?,
        None => SessionConfig::default(),
    };
    let sample_rate = config.sample_rate as f32;

    let (session, mut live) =
        SoftwareSession::new(config).context("Failed to create playback session")?;
    let mut controller = EqualizerController::new(&session);
    let events = controller.subscribe();

    if !controller.is_bound() {
        warn!("Session has no equalizer; nothing to demonstrate");
        return Ok(());
    }

    for index in 0..controller.band_count() {
        info!("Band {}: {} Hz", index, controller.band_frequency(index));
    }
    for index in 0..controller.preset_count() as i32 {
        info!("Preset {}: {}", index, controller.preset_name_at(index));
    }

    let tone_hz = controller.band_frequency(controller.band_count() / 2);
    info!(
        "Probe tone at {} Hz, flat: peak {:.3}",
        tone_hz,
        render_peak(&mut live, tone_hz, sample_rate)
    );

    let preset = (0..controller.preset_count() as i32)
        .find(|&i| controller.preset_name_at(i) == "Bass Boost")
        .unwrap_or(0);
    controller.load_from_preset(preset)?;
    for event in events.try_iter() {
        if event == EqualizerEvent::PresetLoaded {
            info!("Preset loaded, gains now {:?}", controller.amplifications());
        }
    }

    let tone_band = controller.band_count() / 2;
    controller.set_amplification_for_band_at(9.0, tone_band)?;
    controller.set_preamplification(-3.0)?;
    info!(
        "Band {} boosted: peak {:.3}",
        tone_band,
        render_peak(&mut live, tone_hz, sample_rate)
    );

    controller.set_enabled(false)?;
    info!("Bypassed: peak {:.3}", render_peak(&mut live, tone_hz, sample_rate));

    if let Some(snapshot) = controller.snapshot() {
        info!("Final state: {}", serde_json::to_string(&snapshot)?);
    }
    Ok(())
}

fn load_config(path: &str) -> Result<SessionConfig> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse session config {}", path))?;
    info!("Session config loaded from {}", path);
    Ok(config)
}

/// Render a quarter-second sine through the live equalizer, return the output peak
fn render_peak(live: &mut LiveEqualizer, freq: f32, sample_rate: f32) -> f32 {
    let total_frames = (sample_rate / 4.0) as usize;
    let mut buffer = vec![0.0_f32; FRAMES_PER_BUFFER * 2];
    let mut peak = 0.0_f32;
    let mut frame = 0;

    while frame < total_frames {
        for pair in buffer.chunks_exact_mut(2) {
            let t = frame as f32 / sample_rate;
            let sample = (2.0 * std::f32::consts::PI * freq * t).sin() * 0.25;
            pair[0] = sample;
            pair[1] = sample;
            frame += 1;
        }
        live.process_interleaved(&mut buffer);
        // Ignore the first buffer while the filters settle
        if frame > FRAMES_PER_BUFFER {
            peak = buffer.iter().fold(peak, |acc, s| acc.max(s.abs()));
        }
    }
    peak
}
