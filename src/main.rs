use clap::{Parser, Subcommand};
use coverpage::{config, export, naming, output, persist, record, render, scale};
use std::fs;
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "coverpage")]
#[command(about = "Generate academic assignment cover pages")]
#[command(long_about = "\
Generate academic assignment cover pages

A single JSON record is the data source. It holds the institution, course,
people, and presentation choices; every output is derived from it.

Outputs:

  html    Standalone preview document, optionally scaled to fit a container
  image   PNG or JPEG raster at the configured export scale (needs the
          'browser' build feature for the headless-Chromium rasterizer)
  docx    OOXML word-processing document

Record structure (cover-page.json):

  {
    \"universityName\": \"Global Academic University\",
    \"courseTitle\": \"Advanced Algorithms\",
    \"courseCode\": \"CS-402\",
    \"reportTitle\": \"Quantum Computing Analysis\",
    \"students\": [{ \"name\": \"John Doe\", \"studentId\": \"CSE-2023-085\" }],
    \"template\": \"FORMAL\",
    \"pageSize\": \"A4\",
    ...
  }

Missing fields take defaults and unknown keys are ignored, so partial
records are fine. Exports are named cover-page-<title-slug>.<ext>.

Run 'coverpage gen-config' to generate a documented coverpage.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Record file
    #[arg(long, default_value = "cover-page.json", global = true)]
    record: PathBuf,

    /// Directory containing coverpage.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a fresh record with seed values
    New {
        /// Overwrite an existing record file
        #[arg(long)]
        force: bool,
    },
    /// Validate the record and print a content summary
    Check,
    /// Render the HTML preview document
    Html {
        /// Container width in pixels; scales the preview to fit
        #[arg(long)]
        container_width: Option<f64>,
    },
    /// Export an OOXML word-processing document
    Docx,
    /// Export a raster image
    Image {
        /// Output format
        #[arg(long, value_enum, default_value_t = FormatArg::Png)]
        format: FormatArg,
    },
    /// Print a stock coverpage.toml with all options documented
    GenConfig,
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum FormatArg {
    Png,
    Jpg,
}

impl From<FormatArg> for export::image::ImageFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => export::image::ImageFormat::Png,
            FormatArg::Jpg => export::image::ImageFormat::Jpeg,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::New { force } => {
            if cli.record.exists() && !force {
                return Err(format!(
                    "{} already exists (pass --force to overwrite)",
                    cli.record.display()
                )
                .into());
            }
            let record = record::CoverRecord::default();
            persist::save_record(&cli.record, &record)?;
            println!("==> Wrote {}", cli.record.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.record.display());
            let record = persist::load_record(&cli.record)?;
            output::print_check_output(&record);
            println!("==> Record is valid");
        }
        Command::Html { container_width } => {
            let config = config::load_config(&cli.config_dir)?;
            let record = persist::load_record(&cli.record)?;
            let zoom = match container_width {
                Some(width) => scale::fit_scale(
                    record.page_size,
                    width,
                    config.preview.padding_px,
                    config.preview.limits(),
                ),
                None => 1.0,
            };
            let html = render::render_preview(&record, zoom);
            let path = output_path(&config, &record, "html");
            fs::write(&path, &html)?;
            output::print_export_output("html", &path, html.len());
        }
        Command::Docx => {
            let config = config::load_config(&cli.config_dir)?;
            let record = persist::load_record(&cli.record)?;
            let bytes = export::docx::render_docx(&record)?;
            let path = output_path(&config, &record, "docx");
            fs::write(&path, &bytes)?;
            output::print_export_output("docx", &path, bytes.len());
        }
        Command::Image { format } => {
            let config = config::load_config(&cli.config_dir)?;
            let record = persist::load_record(&cli.record)?;
            let format: export::image::ImageFormat = format.into();
            let options = export::image::ExportOptions {
                scale: config.export.scale,
                jpeg_quality: config.export.jpeg_quality,
            };
            let bytes = rasterize(&record, format, options)?;
            let path = output_path(&config, &record, format.extension());
            fs::write(&path, &bytes)?;
            output::print_export_output("image", &path, bytes.len());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Destination for an export: configured output dir + conventional filename.
fn output_path(config: &config::ToolConfig, record: &record::CoverRecord, ext: &str) -> PathBuf {
    PathBuf::from(&config.export.output_dir)
        .join(naming::export_file_name(&record.report_title, ext))
}

#[cfg(feature = "browser")]
fn rasterize(
    record: &record::CoverRecord,
    format: export::image::ImageFormat,
    options: export::image::ExportOptions,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut surface = export::image::ChromeSurface::launch()?;
    let mut zoom = scale::Zoom::default();
    Ok(export::image::export_image(
        &mut surface,
        record,
        &mut zoom,
        format,
        options,
    )?)
}

#[cfg(not(feature = "browser"))]
fn rasterize(
    _record: &record::CoverRecord,
    _format: export::image::ImageFormat,
    _options: export::image::ExportOptions,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    Err("image export needs the headless-Chromium rasterizer; \
         rebuild with --features browser"
        .into())
}
