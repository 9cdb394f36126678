use std::env::var;
use dotenv::dotenv;
use embedded_hal::delay::DelayNs;
use log::{debug, info};
use sysinfo::System;
use hdlcd_driver::delay::ThreadSleep;
use hdlcd_driver::expander::{LinuxExpanderBus, parse_address};
use hdlcd_driver::lcd::hd44780::driver::{ExpanderHD44780Driver, HD44780Driver};
use hdlcd_driver::lcd::hd44780::timing::TimingProfile;
use hdlcd_driver::BusResult;

/// Shows the test banner, leaves it up long enough to be seen on a display that just powered up,
/// then blanks the display again.
fn show_banner(lcd: &mut impl HD44780Driver, delay: &mut impl DelayNs) -> BusResult<()> {
    lcd.print("Test!*")?;
    for _ in 0..5 {
        lcd.send_char(b'u')?;
    }

    delay.delay_ms(TimingProfile::INIT_STABILIZE_MS);

    lcd.clear()?;
    lcd.home()
}

fn main() -> eyre::Result<()> {
    dotenv().ok();
    pretty_env_logger::init();

    const UNKNOWN_STR: &str = "???";

    info!(
        "Hello, {}!",
        System::name().as_deref().unwrap_or(UNKNOWN_STR)
    );
    info!(
        "System ver {} kernel ver {}",
        System::long_os_version().as_deref().unwrap_or(UNKNOWN_STR),
        System::kernel_version().as_deref().unwrap_or(UNKNOWN_STR),
    );
    let host_name = System::host_name();
    info!(
        "Hostname {}",
        host_name.as_deref().unwrap_or(UNKNOWN_STR)
    );
    info!("Architecture {}", System::cpu_arch());

    let bus_no: u8 = var("HDLCD_I2C_BUS")?.parse()?;
    let address = parse_address(&var("HDLCD_I2C_ADDRESS")?)?;

    let bus = LinuxExpanderBus::new(bus_no, address)?;
    let mut delay = ThreadSleep;
    let mut lcd = ExpanderHD44780Driver::attach(bus, delay)?;
    debug!("{:?} attached.", lcd);

    show_banner(&mut lcd, &mut delay)?;

    lcd.print(host_name.as_deref().unwrap_or(UNKNOWN_STR))?;
    delay.delay_ms(2000);

    lcd.detach();
    info!("Self-test done.");

    Ok(())
}
