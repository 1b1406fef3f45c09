use clap::{Parser, Subcommand};
use focal_crop::crop::{CropJob, CropPipeline};
use focal_crop::imaging::{FocusPoint, PreferredSize};
use focal_crop::{config, logging, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "focal-crop")]
#[command(about = "Crop and resize an image around a focus point")]
#[command(long_about = "\
Crop and resize an image around a focus point

The crop window takes the aspect ratio of the requested size and spans the
full source width (landscape outputs) or height (portrait and square
outputs). The focus point keeps its relative position inside the window, so a
subject two thirds of the way down the photo stays two thirds of the way down
the result.

Example:

  focal-crop crop in.jpg out.jpg --focus 1000,1100 --size 1900x200 --quality 80

Run 'focal-crop gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Config file (missing file means defaults)
    #[arg(long, default_value = "focal-crop.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct CropArgs {
    /// Source image
    input: PathBuf,

    /// Destination image; format follows the extension
    output: PathBuf,

    /// Focus point in source pixels, as X,Y
    #[arg(long)]
    focus: FocusPoint,

    /// Output size in pixels, as WIDTHxHEIGHT
    #[arg(long)]
    size: PreferredSize,

    /// Output quality 0-100 (overrides the config file)
    #[arg(long, allow_negative_numbers = true)]
    quality: Option<i64>,

    /// Codec backend (overrides the config file)
    #[arg(long)]
    backend: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Crop one image around its focus point
    Crop(CropArgs),
    /// Print a stock config file with all options documented
    GenConfig,
    /// List the codec backends compiled in
    Backends,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Crop(args) => {
            let mut crop_config = config::load_config(&cli.config)?;
            if let Some(quality) = args.quality {
                crop_config.set_quality(quality)?;
            }
            if let Some(backend) = &args.backend {
                crop_config.set_backend(backend)?;
            }

            let pipeline = CropPipeline::new(crop_config);
            let report = pipeline.run(&CropJob {
                input: args.input,
                output: args.output,
                focus: args.focus,
                size: args.size,
            })?;

            if args.json {
                println!("{}", output::crop_report_json(&report)?);
            } else {
                for line in output::format_crop_report(&report) {
                    println!("{}", line);
                }
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Backends => {
            for line in output::format_backends() {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
