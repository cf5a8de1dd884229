use imageto_ico_core::size::default_sizes;
use imageto_ico_core::supported_input_formats;

use super::format_sizes;

pub fn run() {
    let formats: Vec<&str> = supported_input_formats().iter().map(|f| f.as_str()).collect();

    println!("Supported input formats:");
    println!("  {}", formats.join(", "));
    println!("\nDefault icon sizes:");
    println!("  {}", format_sizes(&default_sizes()));
    println!("\nFrame encodings:");
    println!("  png (default), bmp");
    println!("\nUsage examples:");
    println!("  imageto-ico convert image.png");
    println!("  imageto-ico convert image.png output.ico -s 16,32,48");
    println!("  imageto-ico batch *.png -o icons");
    println!("  imageto-ico inspect output.ico");
}
