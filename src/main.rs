use embedded_graphics::mono_font::iso_8859_15::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::{prelude::*, text::Text};

use esp_idf_svc::hal::delay::Delay;
use esp_idf_svc::hal::gpio;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::prelude::*;
use esp_idf_svc::hal::spi;

use gdeh042z96::{Display4in2, Gdeh042z96, TriColor, BUFFER_LEN};

// Include the pre-converted logo image binary data (generated at build time)
const LOGO_IMAGE: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/logo.bin"));

/// Full refreshes take a few seconds, anything past this means the panel is not answering
const BUSY_TIMEOUT_MS: u32 = 30_000;

const PARTIAL_ROUNDS: u32 = 5;

// https://docs.esp-rs.org/esp-idf-svc/esp_idf_svc/
fn main() -> anyhow::Result<()> {
    // It is necessary to call this function once. Otherwise some patches to the runtime
    // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
    esp_idf_svc::sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    esp_idf_svc::log::EspLogger::initialize_default();

    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    log::info!("Configuring SPI for the panel");
    let spi = spi::SpiDeviceDriver::new_single(
        peripherals.spi2,
        pins.gpio12,                    // SCK
        pins.gpio11,                    // MOSI
        Option::<gpio::AnyIOPin>::None, // The panel is write only
        Some(pins.gpio45),              // CS
        &spi::SpiDriverConfig::new(),
        &spi::SpiConfig::new().baudrate(4.MHz().into()),
    )?;

    let delay = Delay::default();

    let mut epd = Gdeh042z96::new(
        spi,
        gpio::PinDriver::input(pins.gpio48)?,  // BUSY
        gpio::PinDriver::output(pins.gpio46)?, // DC
        gpio::PinDriver::output(pins.gpio47)?, // RST
        delay,
    )
    .with_busy_timeout(BUSY_TIMEOUT_MS);

    epd.init()?;
    epd.clear()?;

    let mut display = Display4in2::new();
    let title = MonoTextStyle::new(&FONT_10X20, TriColor::Black);
    let label = MonoTextStyle::new(&FONT_6X10, TriColor::Black);

    Rectangle::new(Point::new(0, 0), Size::new(400, 40))
        .into_styled(PrimitiveStyle::with_fill(TriColor::Chromatic))
        .draw(&mut display)?;
    Text::new("GDEH042Z96", Point::new(10, 26), MonoTextStyle::new(&FONT_10X20, TriColor::White))
        .draw(&mut display)?;
    Text::new("black / white / red", Point::new(10, 70), title).draw(&mut display)?;
    Rectangle::new(Point::new(10, 90), Size::new(380, 100))
        .into_styled(PrimitiveStyle::with_stroke(TriColor::Black, 2))
        .draw(&mut display)?;

    log::info!("Sending full frame");
    epd.display(Some(display.black_buffer()), Some(display.red_buffer()))?;
    delay.delay_ms(2000);

    // Partial refreshes only touch the black plane, the red header stays
    let counter_area = Rectangle::new(Point::new(20, 110), Size::new(360, 60));
    for round in 1..=PARTIAL_ROUNDS {
        counter_area
            .into_styled(PrimitiveStyle::with_fill(TriColor::White))
            .draw(&mut display)?;
        let text = format!("partial refresh {}/{}", round, PARTIAL_ROUNDS);
        Text::new(&text, Point::new(30, 145), title).draw(&mut display)?;
        Text::new("red plane untouched", Point::new(30, 162), label).draw(&mut display)?;

        log::info!("Partial refresh {}", round);
        epd.display_partial(Some(display.black_buffer()))?;
        delay.delay_ms(1000);
    }

    if LOGO_IMAGE.len() == BUFFER_LEN {
        log::info!("Showing logo");
        epd.display(Some(LOGO_IMAGE), None)?;
        delay.delay_ms(5000);
    } else {
        log::warn!("Logo image not available (logo.png not found at build time)");
    }

    epd.sleep()?;
    log::info!("Panel asleep");

    Ok(())
}
