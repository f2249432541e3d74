use anyhow::{Context, Result};
use orbvision_core::{BOARD_COLS, BOARD_ROWS};
use orbvision_cv::{BoardDetector, DetectorConfig, Strategy};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let screenshot = args
        .next()
        .context("usage: orbvision <screenshot> [reference-dir] [lookup-table]")?;

    let mut config = DetectorConfig::default();
    if let Some(dir) = args.next() {
        config.reference_dir = dir.into();
    }
    if let Some(path) = args.next() {
        config.lookup_table_path = path.into();
    }

    let detector = BoardDetector::new(config).context("failed to load reference data")?;

    let strategy = if detector.references().is_empty() {
        println!("No reference images available, using the pixel lookup table");
        Strategy::PixelLookup
    } else {
        Strategy::Similarity
    };

    let board = detector
        .detect_from_file(&screenshot, strategy)
        .with_context(|| format!("failed to extract a board from {screenshot}"))?;

    println!("{board}");

    if strategy == Strategy::Similarity {
        let cell_count = (BOARD_ROWS * BOARD_COLS) as f64;
        let avg: f64 = board.iter().map(|cell| cell.score).sum::<f64>() / cell_count;
        println!("Average match distance: {avg:.3}");
    }

    Ok(())
}
