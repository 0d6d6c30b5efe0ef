use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Panel size the logo is fitted into
const PANEL_WIDTH: u32 = 400;
const PANEL_HEIGHT: u32 = 300;

/// Convert PNG image to a black plane bitmap at build time
///
/// The output uses the panel's black RAM polarity: a set bit is white, a cleared bit black.
fn convert_image_to_binary(
    input_path: &str,
    output_path: &str,
    target_width: u32,
    target_height: u32,
    threshold: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed={}", input_path);

    // Check if input file exists
    if !Path::new(input_path).exists() {
        // Create empty file so build doesn't fail
        let mut file = File::create(output_path)?;
        file.write_all(&[])?;
        return Ok(());
    }

    println!("cargo:warning=Converting image: {}", input_path);

    let img = image::open(input_path)?;

    // Calculate aspect-ratio-preserving dimensions
    let orig_ratio = img.width() as f32 / img.height() as f32;
    let target_ratio = target_width as f32 / target_height as f32;

    let (new_width, new_height) = if orig_ratio > target_ratio {
        // Image is wider than target - fit to width
        (target_width, (target_width as f32 / orig_ratio) as u32)
    } else {
        // Image is taller than target - fit to height
        ((target_height as f32 * orig_ratio) as u32, target_height)
    };

    let gray = img
        .resize(new_width, new_height, image::imageops::FilterType::Lanczos3)
        .to_luma8();
    // resize may round one pixel away from the requested size
    let (new_width, new_height) = gray.dimensions();

    let bytes_per_row = target_width.div_ceil(8);
    let total_bytes = (bytes_per_row * target_height) as usize;
    // Start all white, dark pixels clear their bit
    let mut buffer = vec![0xFFu8; total_bytes];

    // Calculate centering offsets
    let offset_x = (target_width - new_width) / 2;
    let offset_y = (target_height - new_height) / 2;

    for y in 0..new_height {
        for x in 0..new_width {
            if gray.get_pixel(x, y)[0] < threshold {
                let px = x + offset_x;
                let py = y + offset_y;
                let byte_index = (py * bytes_per_row + px / 8) as usize;
                buffer[byte_index] &= !(0x80 >> (px % 8));
            }
        }
    }

    let mut file = File::create(output_path)?;
    file.write_all(&buffer)?;

    println!(
        "cargo:warning=Logo converted to {} bytes: {}",
        buffer.len(),
        output_path
    );
    Ok(())
}

fn main() {
    // ESP-IDF link arguments are only needed for the firmware
    if env::var_os("CARGO_FEATURE_ESP32").is_some() {
        embuild::espidf::sysenv::output();
    }

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR for build scripts");
    let logo_output = format!("{}/logo.bin", out_dir);

    if let Err(e) = convert_image_to_binary(
        "logo.png",
        &logo_output,
        PANEL_WIDTH,
        PANEL_HEIGHT,
        128, // threshold (0-255, 128 = middle gray)
    ) {
        println!("cargo:warning=Failed to convert logo.png: {}", e);
    }

    println!("cargo:rerun-if-changed=logo.png");
}
