use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use plotters::prelude::*;
use wav_maker::pipeline::{parse_score, peak, TimelineMixer};
use wav_maker::{RenderConfig, RenderError};

/// Plot the mixed waveform of a score as an SVG
#[derive(Parser)]
#[command(name = "plot-score")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the score file
    input: PathBuf,

    /// Output SVG path
    output: PathBuf,

    /// Start of the plotted window in seconds
    #[arg(long, default_value_t = 0.0)]
    start: f64,

    /// Length of the plotted window in seconds (whole score if omitted)
    #[arg(long)]
    seconds: Option<f64>,
}

fn window(samples: &[f64], sample_rate: u32, start: f64, seconds: Option<f64>) -> (usize, usize) {
    let rate = sample_rate as f64;
    let from = ((start.max(0.0) * rate) as usize).min(samples.len());
    let to = match seconds {
        Some(s) => (from + (s.max(0.0) * rate) as usize).min(samples.len()),
        None => samples.len(),
    };
    (from, to)
}

fn create_plot(
    args: &Args,
    samples: &[f64],
    sample_rate: u32,
    bpm: f64,
) -> anyhow::Result<()> {
    let root = SVGBackend::new(&args.output, (1000, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let (from, to) = window(samples, sample_rate, args.start, args.seconds);
    let rate = sample_rate as f64;
    let t0 = from as f64 / rate;
    let t1 = (to as f64 / rate).max(t0 + 1.0 / rate);

    let visible = &samples[from..to];
    // Leave room above full scale so clipping regions are visible
    let y_max = peak(visible).max(1.0) * 1.1;

    let title = format!(
        "{}: {} BPM, {:.3}s-{:.3}s",
        args.input.display(),
        bpm,
        t0,
        t1
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(&title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(t0..t1, -y_max..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Time (s)")
        .y_desc("Amplitude")
        .x_labels(10)
        .y_labels(10)
        .draw()?;

    chart.draw_series(LineSeries::new(
        visible
            .iter()
            .enumerate()
            .map(|(i, &s)| ((from + i) as f64 / rate, s)),
        BLUE.stroke_width(1),
    ))?;

    // Full-scale limits
    for limit in [1.0, -1.0] {
        chart.draw_series(LineSeries::new([(t0, limit), (t1, limit)], RED.stroke_width(1)))?;
    }

    root.present()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let content = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let score = parse_score(&content)?;

    let config = RenderConfig::default();
    let mixer = TimelineMixer::from_config(&config);
    let frames = mixer.length(&score).context("score is too long to plot")?;
    let max_frames = config.max_frames();
    if frames > max_frames {
        return Err(RenderError::TooLong { frames, max_frames }.into());
    }
    let samples = mixer.mix(&score).context("score is too long to plot")?;

    println!("Score Plot");
    println!("==========");
    println!("  Notes: {}", score.events.len());
    println!("  Tempo: {} BPM", score.bpm);
    println!("  Duration: {:.3}s ({} samples)", score.duration_seconds(), samples.len());
    println!("  Peak: {:.3}", peak(&samples));

    create_plot(&args, &samples, config.sample_rate, score.bpm)?;

    println!();
    println!("Output: {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_bounds() {
        let samples = vec![0.0; 1000];
        assert_eq!(window(&samples, 100, 0.0, None), (0, 1000));
        assert_eq!(window(&samples, 100, 2.0, Some(1.5)), (200, 350));
        assert_eq!(window(&samples, 100, 9.0, Some(5.0)), (900, 1000));
        assert_eq!(window(&samples, 100, 20.0, None), (1000, 1000));
        assert_eq!(window(&samples, 100, -1.0, None), (0, 1000));
    }
}
