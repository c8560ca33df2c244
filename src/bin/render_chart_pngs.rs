#[cfg(feature = "cairo-backend")]
use linechart_rs::api::{ChartView, ChartViewConfig, RenderOutcome, parse_charts_json};
#[cfg(feature = "cairo-backend")]
use linechart_rs::core::{Normalize, Viewport};
#[cfg(feature = "cairo-backend")]
use linechart_rs::interaction::ZoomGesture;
#[cfg(feature = "cairo-backend")]
use std::fs::{self, File};
#[cfg(feature = "cairo-backend")]
use std::path::PathBuf;

#[cfg(feature = "cairo-backend")]
const DEFAULT_OUTPUT_DIR: &str = "target/chart_pngs";

#[cfg(feature = "cairo-backend")]
#[derive(Debug)]
struct CliArgs {
    input_path: PathBuf,
    output_dir: PathBuf,
    config_path: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
    zoom: Option<f64>,
}

#[cfg(feature = "cairo-backend")]
fn main() {
    let _ = linechart_rs::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cairo-backend"))]
fn main() {
    eprintln!("this tool requires feature `cairo-backend`");
    std::process::exit(1);
}

#[cfg(feature = "cairo-backend")]
fn run() -> Result<(), String> {
    use linechart_rs::render::CairoRenderer;

    let args = parse_args()?;
    let payload = fs::read_to_string(&args.input_path).map_err(|err| {
        format!(
            "failed to read charts `{}`: {err}",
            args.input_path.display()
        )
    })?;
    let charts = parse_charts_json(&payload).map_err(|err| err.to_string())?;

    let mut config = match &args.config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read config `{}`: {err}", path.display()))?;
            ChartViewConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => ChartViewConfig::default(),
    };
    let viewport = Viewport::new(
        args.width.unwrap_or(config.viewport.width),
        args.height.unwrap_or(config.viewport.height),
    );
    config = config.with_viewport(viewport);

    let width = i32::try_from(viewport.width)
        .map_err(|_| "viewport width overflows i32".to_owned())?;
    let height = i32::try_from(viewport.height)
        .map_err(|_| "viewport height overflows i32".to_owned())?;

    fs::create_dir_all(&args.output_dir).map_err(|err| {
        format!(
            "failed to create output dir `{}`: {err}",
            args.output_dir.display()
        )
    })?;

    for (index, raw_chart) in charts.iter().enumerate() {
        let renderer = CairoRenderer::new(width, height)
            .map_err(|err| format!("chart #{index} renderer init failed: {err}"))?;
        let mut view = ChartView::new(renderer, config.clone()).map_err(|err| err.to_string())?;

        let mut outcome = view
            .set_chart(Some(raw_chart.normalize()))
            .map_err(|err| format!("chart #{index} render failed: {err}"))?;
        if let Some(scale) = args.zoom {
            let plot_area = view.plot_area();
            view.apply_gesture(ZoomGesture::ScaleTo {
                scale,
                anchor_x: (plot_area.left + plot_area.right) / 2.0,
            })
            .map_err(|err| format!("chart #{index} zoom failed: {err}"))?;
            outcome = view.last_outcome().unwrap_or(outcome);
        }

        let output_path = args
            .output_dir
            .join(format!("{index:02}_{}.png", file_slug(&raw_chart.title)));
        let mut file = File::create(&output_path)
            .map_err(|err| format!("failed to create png `{}`: {err}", output_path.display()))?;
        view.renderer()
            .write_png(&mut file)
            .map_err(|err| format!("failed to write png `{}`: {err}", output_path.display()))?;

        let summary = match outcome {
            RenderOutcome::Chart { series_drawn } => format!("{series_drawn} series"),
            RenderOutcome::Fallback(reason) => format!("fallback {reason:?}"),
        };
        println!(
            "rendered `{}` [{summary}] -> {}",
            raw_chart.title,
            output_path.display()
        );
    }

    println!("done: rendered {} chart png(s)", charts.len());
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn parse_args() -> Result<CliArgs, String> {
    let mut input_path: Option<PathBuf> = None;
    let mut output_dir = PathBuf::from(DEFAULT_OUTPUT_DIR);
    let mut config_path: Option<PathBuf> = None;
    let mut width: Option<u32> = None;
    let mut height: Option<u32> = None;
    let mut zoom: Option<f64> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input_path = Some(PathBuf::from(value));
            }
            "--output-dir" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output-dir".to_owned())?;
                output_dir = PathBuf::from(value);
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config_path = Some(PathBuf::from(value));
            }
            "--width" => width = Some(parse_value(&mut args, "--width")?),
            "--height" => height = Some(parse_value(&mut args, "--height")?),
            "--zoom" => zoom = Some(parse_value(&mut args, "--zoom")?),
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    let input_path =
        input_path.ok_or_else(|| format!("missing --input\n\n{}", usage_message()))?;
    Ok(CliArgs {
        input_path,
        output_dir,
        config_path,
        width,
        height,
        zoom,
    })
}

#[cfg(feature = "cairo-backend")]
fn parse_value<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<T, String> {
    let value = args
        .next()
        .ok_or_else(|| format!("missing value for {flag}"))?;
    value
        .parse()
        .map_err(|_| format!("invalid value `{value}` for {flag}"))
}

#[cfg(feature = "cairo-backend")]
fn file_slug(title: &str) -> String {
    let slug: String = title
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if slug.is_empty() {
        "chart".to_owned()
    } else {
        slug
    }
}

#[cfg(feature = "cairo-backend")]
fn print_usage() {
    println!("{}", usage_message());
}

#[cfg(feature = "cairo-backend")]
fn usage_message() -> String {
    format!(
        "Usage: cargo run --features cairo-backend --bin render_chart_pngs -- --input <path> [options]\n\nOptions:\n  --input <path>        Charts JSON payload (array of {{title, data}})\n  --output-dir <path>   Output directory (default: {DEFAULT_OUTPUT_DIR})\n  --config <path>       Chart view config JSON\n  --width <px>          Override viewport width\n  --height <px>         Override viewport height\n  --zoom <scale>        Zoom scale applied around the plot center\n  -h, --help            Show this message"
    )
}
