use clap::{Parser, Subcommand};
use rust_ean::detector::{BoundsResolver, SequenceDetector};
use rust_ean::models::Pattern;
use rust_ean::tools::{load_rgb, luminosity_stats, render_payload, save_png, scanline_stats};
use rust_ean::utils::grayscale::image_row;
use rust_ean::{Ean13, PixelFormat, Preprocessor, ScanConfig, Scanner, Symbology};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "eantool", version, about = "EAN-13 barcode CLI tools")]
struct Cli {
    /// Print pipeline logs (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode an EAN-13 symbol from an image
    Decode {
        #[arg(long)]
        image: PathBuf,
        /// Rows to try, middle row first
        #[arg(long)]
        rows: Option<usize>,
        /// Fixed binarization threshold instead of Otsu
        #[arg(long)]
        threshold: Option<u8>,
    },
    /// Render a 12-digit payload to a PNG
    Encode {
        digits: String,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value_t = 4)]
        bar_width: u32,
        #[arg(long, default_value_t = 120)]
        height: u32,
        /// Blank modules on each side
        #[arg(long, default_value_t = 9)]
        quiet_zone: u32,
    },
    /// Print preprocessing and guard detection details for one row
    Inspect {
        #[arg(long)]
        image: PathBuf,
        /// Row to inspect (defaults to the middle row)
        #[arg(long)]
        row: Option<usize>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();

    let ok = match cli.command {
        Command::Decode {
            image,
            rows,
            threshold,
        } => decode_cmd(&image, rows, threshold),
        Command::Encode {
            digits,
            output,
            bar_width,
            height,
            quiet_zone,
        } => encode_cmd(&digits, &output, bar_width, height, quiet_zone),
        Command::Inspect { image, row } => inspect_cmd(&image, row),
    };

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn decode_cmd(image: &Path, rows: Option<usize>, threshold: Option<u8>) -> bool {
    let (pixels, width, height) = match load_rgb(image) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Failed to load image {}: {}", image.display(), err);
            return false;
        }
    };

    let mut config = ScanConfig::default();
    if let Some(rows) = rows {
        config = config.with_scan_rows(rows);
    }
    if let Some(threshold) = threshold {
        config = config.with_fixed_threshold(threshold);
    }

    let mut scanner = Scanner::with_config(config);
    let start = Instant::now();
    let found = scanner.scan_image(&pixels, width, height, PixelFormat::Rgb);
    let elapsed = start.elapsed();

    println!("Image: {} ({}x{})", image.display(), width, height);
    if let Some(tel) = scanner.last_telemetry() {
        println!(
            "Guards: {} begin, {} end; bounds accepted={} tried={}; outcome={:?}",
            tel.begin_candidates, tel.end_candidates, tel.bounds_accepted, tel.bounds_tried, tel.outcome
        );
    }

    match found {
        Some(barcode) => {
            println!(
                "{}: {} (row {}, pixels {}..{}) in {:.2?}",
                barcode.format,
                barcode.digits,
                barcode.row,
                barcode.bounds.start_pixel,
                barcode.bounds.stop_pixel,
                elapsed
            );
            true
        }
        None => {
            println!("No barcode found ({:.2?})", elapsed);
            false
        }
    }
}

fn encode_cmd(digits: &str, output: &Path, bar_width: u32, height: u32, quiet_zone: u32) -> bool {
    let img = match render_payload(&Ean13, digits, bar_width, height, quiet_zone) {
        Ok(img) => img,
        Err(err) => {
            eprintln!("Failed to encode {}: {}", digits, err);
            return false;
        }
    };

    if let Err(err) = save_png(&img, output) {
        eprintln!("Failed to write {}: {}", output.display(), err);
        return false;
    }

    println!(
        "Wrote {}{} to {} ({}x{})",
        digits,
        rust_ean::symbology::ean13::checksum(&digit_values(digits)),
        output.display(),
        img.width(),
        img.height()
    );
    true
}

fn digit_values(digits: &str) -> Vec<u8> {
    digits.bytes().map(|b| b - b'0').collect()
}

fn inspect_cmd(image: &Path, row: Option<usize>) -> bool {
    let (pixels, width, height) = match load_rgb(image) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Failed to load image {}: {}", image.display(), err);
            return false;
        }
    };

    let y = row.unwrap_or(height / 2);
    let Some(pixel_row) = image_row(&pixels, width, y, PixelFormat::Rgb) else {
        eprintln!("Row {} is outside the image ({} rows)", y, height);
        return false;
    };

    println!("Image: {} ({}x{}), row {}", image.display(), width, height, y);

    let config = ScanConfig::default();
    let analysis =
        Preprocessor::with_fixed_threshold(config.fixed_threshold).analyze(pixel_row, PixelFormat::Rgb);
    let lum = luminosity_stats(&analysis.luminosity);
    println!(
        "Luminosity range: {}-{}, average: {}, histogram peak: {}",
        lum.min,
        lum.max,
        lum.avg,
        analysis.histogram.peak()
    );

    let stats = scanline_stats(&analysis.scanline);
    println!(
        "Threshold {:.1}: marks={} total={} mark_ratio={:.2}% runs={}",
        analysis.threshold,
        stats.mark_pixels,
        stats.total_pixels,
        stats.mark_ratio * 100.0,
        stats.runs
    );

    let symbology = Ean13;
    let begin_pattern: Pattern = symbology.begin_pattern();
    let end_pattern: Pattern = symbology.end_pattern();
    let begin =
        SequenceDetector::find_sequences(&analysis.scanline, &begin_pattern, config.sequence_tolerance);
    let end = SequenceDetector::find_sequences(&analysis.scanline, &end_pattern, config.sequence_tolerance);
    println!("Found {} begin / {} end guard candidates", begin.len(), end.len());

    let bounds = BoundsResolver::new(&begin_pattern, &end_pattern, symbology.total_bits())
        .with_cutoff(config.bounds_cutoff)
        .resolve_bounds(&begin, &end);
    println!("Accepted {} bounds", bounds.len());
    for (i, b) in bounds.iter().take(10).enumerate() {
        let decoded = symbology
            .decode(&analysis.scanline.runs_in(b.start_pixel, b.stop_pixel))
            .unwrap_or_else(|err| format!("<{err}>"));
        println!(
            "  Bounds {}: pixels {}..{} score={:.2}% -> {}",
            i, b.start_pixel, b.stop_pixel, b.score, decoded
        );
    }
    true
}
