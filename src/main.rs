use mosquito_lens_rs::image_pipeline::{FrameWorker, HighlightConfig, HighlightPipeline, RawFrame, Raster};
use mosquito_lens_rs::logger;

use std::time::Duration;
use tracing::{info, warn};

const FRAME_WIDTH: usize = 640;
const FRAME_HEIGHT: usize = 480;
const FRAME_COUNT: usize = 60;
const FRAME_INTERVAL: Duration = Duration::from_millis(33);
const SENSOR_ROTATION: i32 = 90;

/// Test-pattern camera: a lit-from-the-left background with a few small dark
/// specks drifting across it.
fn synthetic_frame(index: usize) -> RawFrame {
    let mut luma = vec![0u8; FRAME_WIDTH * FRAME_HEIGHT];
    for y in 0..FRAME_HEIGHT {
        for x in 0..FRAME_WIDTH {
            let falloff = (x * 120 / FRAME_WIDTH) as u8;
            luma[y * FRAME_WIDTH + x] = 230 - falloff;
        }
    }

    let specks = [(40, 60, 3), (200, 300, 5), (500, 120, 4)];
    for (i, &(sx, sy, radius)) in specks.iter().enumerate() {
        let cx = (sx + index * (i + 2)) % FRAME_WIDTH;
        let cy = (sy + index * (i + 1)) % FRAME_HEIGHT;
        for y in cy.saturating_sub(radius)..(cy + radius).min(FRAME_HEIGHT) {
            for x in cx.saturating_sub(radius)..(cx + radius).min(FRAME_WIDTH) {
                luma[y * FRAME_WIDTH + x] = 25;
            }
        }
    }

    RawFrame::from_luma(FRAME_WIDTH, FRAME_HEIGHT, luma, SENSOR_ROTATION)
}

/// Pixels painted by the highlight gradient. Backdrop pixels are always
/// `(g, g, b)` with `b >= g`.
fn highlighted_pixels(raster: &Raster) -> usize {
    raster
        .data
        .chunks_exact(Raster::CHANNELS)
        .filter(|px| !(px[0] == px[1] && px[2] >= px[0]))
        .count()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting mosquito lens...");

    let config = HighlightConfig::builder()
        .block_size_ratio(12)
        .threshold(9)
        .build();
    let pipeline = HighlightPipeline::new(config)?;

    info!("Highlight pipeline initialized");
    info!("Block size ratio: {}", pipeline.config().block_size_ratio);
    info!("Threshold: {}", pipeline.config().threshold);
    info!("Window sum: {:?}", pipeline.config().window_sum);

    let (tx, mut rx) = tokio::sync::mpsc::channel::<Raster>(1);
    let (submitter, worker) = FrameWorker::spawn(pipeline, tx);

    let display = tokio::spawn(async move {
        let mut shown = 0usize;
        while let Some(raster) = rx.recv().await {
            shown += 1;
            info!(
                width = raster.width,
                height = raster.height,
                highlighted = highlighted_pixels(&raster),
                "Frame displayed"
            );
        }
        shown
    });

    let mut ticker = tokio::time::interval(FRAME_INTERVAL);
    for index in 0..FRAME_COUNT {
        ticker.tick().await;
        if let Err(e) = submitter.submit(synthetic_frame(index)) {
            warn!("Capture stopped: {}", e);
            break;
        }
    }
    submitter.close();

    let stats = worker.join().await?;
    let shown = display.await?;
    info!(
        processed = stats.processed,
        failed = stats.failed,
        dropped = stats.dropped,
        shown,
        "Capture finished"
    );

    Ok(())
}
