use std::fs;

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::info;

use crate::book::{BookData, DetectionSource, Metadata, Page, PanelRecord};
use crate::cli::{Cli, DetectArgs, DirectionArg, InspectArgs};
use crate::detector::{Detector, DetectorConfig};
use crate::order::Direction;
use crate::reader::{DirPageSource, PageSource, ZipPageSource};

fn is_archive(path: &std::path::Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()).as_deref(),
        Some("zip") | Some("cbz")
    )
}

pub fn detect(cli: &Cli, args: &DetectArgs) -> Result<()> {
    if cli.verbose > 0 {
        info!(input = %args.input.display(), output = %args.output.display(), "[detect] starting");
    }

    let direction = match args.direction {
        DirectionArg::Ltr => Direction::Ltr,
        DirectionArg::Rtl => Direction::Rtl,
    };

    let pipeline = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => crate::image_pipeline::PipelineConfig::default(),
    };

    let config = DetectorConfig {
        pipeline,
        direction,
        ..DetectorConfig::default()
    };
    let detector = Detector::new(config).context("invalid detector configuration")?;

    let mut source: Box<dyn PageSource> = if is_archive(&args.input) {
        Box::new(ZipPageSource::new(&args.input))
    } else {
        Box::new(DirPageSource::new(&args.input))
    };
    let pages = source.pages().context("failed to read page source")?;

    let results: Vec<Page> = pages
        .into_par_iter()
        .map(|(index, image)| {
            let (w, h) = image.dimensions();
            let result = detector.detect(&image);
            let panels: Vec<PanelRecord> = result
                .panels
                .iter()
                .enumerate()
                .map(|(i, p)| PanelRecord {
                    id: format!("p-{i}"),
                    bbox: [p.bbox.0, p.bbox.1, p.bbox.2 - p.bbox.0, p.bbox.3 - p.bbox.1],
                    confidence: p.confidence,
                })
                .collect();
            let order = result.order.iter().map(|&i| format!("p-{i}")).collect();

            Page {
                index,
                size: [w, h],
                panels,
                order,
                order_confidence: Some(result.confidence),
                source: DetectionSource::Cv,
                user_override: false,
                gutters: result.gutters.map(|(gx, gy)| [gx, gy]),
                processing_time: Some(result.processing_time),
            }
        })
        .collect();

    let mut results = results;
    results.sort_by_key(|p| p.index);

    let book = BookData::new(
        results,
        Metadata {
            reading_direction: direction,
            created: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        },
    );

    let file = fs::File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    serde_json::to_writer_pretty(file, &book).context("failed to write book")?;

    if cli.verbose > 0 {
        info!(pages = book.pages.len(), "[detect] wrote book");
    }

    Ok(())
}

pub fn inspect(_cli: &Cli, args: &InspectArgs) -> Result<()> {
    let text = fs::read_to_string(&args.book)
        .with_context(|| format!("failed to read book {}", args.book.display()))?;
    let book: BookData = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse book {}", args.book.display()))?;

    let page = book.page(args.page)?;

    println!("page {} ({}x{})", page.index, page.size[0], page.size[1]);
    for panel in &page.panels {
        println!(
            "  {} bbox=({},{},{},{}) confidence={:.2}",
            panel.id, panel.bbox[0], panel.bbox[1], panel.bbox[2], panel.bbox[3], panel.confidence
        );
    }
    println!("  order: {}", page.order.join(" -> "));

    Ok(())
}
