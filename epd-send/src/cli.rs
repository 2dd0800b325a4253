//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "epd-send",
    version,
    about = "Send an image to a specified IP address."
)]
pub struct Cli {
    /// The IP address (or host[:port]) to send the image to
    pub ip: String,

    /// The path to the image file, or a URL
    pub image: String,

    /// Fit the image to the display size (letterbox) instead of cropping
    #[arg(long)]
    pub fit: bool,

    /// Map pixels to the nearest color without dithering
    #[arg(long)]
    pub no_dither: bool,

    /// Write the quantized image to this PNG file before sending
    #[arg(long, value_name = "PNG")]
    pub preview: Option<PathBuf>,

    /// Prepare and encode the image but do not contact the display
    #[arg(long)]
    pub dry_run: bool,
}
