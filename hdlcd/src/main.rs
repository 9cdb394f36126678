mod config;

use std::env::var;
use std::io::{self, BufRead};
use dotenv::dotenv;
use embedded_hal::delay::DelayNs;
use log::{debug, error, info, warn};
use hdlcd_driver::ExpanderBus;
use hdlcd_driver::delay::ThreadSleep;
use hdlcd_driver::expander::{LinuxExpanderBus, parse_address};
use hdlcd_driver::lcd::hd44780::driver::{ExpanderHD44780Driver, HD44780Driver};
use crate::config::Config;

/// Whether writing `written` bytes of `line` left visible text out. The trailing newline doesn't
/// count, it's never shown.
fn is_truncated(line: &[u8], written: usize) -> bool {
    let visible = line.strip_suffix(b"\n").unwrap_or(line);
    written < visible.len()
}

/// Shows the greeting, then every line of `input` as one write: the display is cleared and the
/// line shown from the start.
///
/// Failed writes are logged and skipped; a failing `input` or greeting ends forwarding.
fn forward(
    lcd: &mut impl HD44780Driver,
    config: &Config,
    mut input: impl BufRead,
) -> eyre::Result<()> {
    if let Some(greeting) = &config.greeting {
        lcd.write_text(greeting.as_bytes(), config.max_write_len)?;
    }

    let mut line = Vec::new();
    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }

        match lcd.write_text(&line, config.max_write_len) {
            Ok(written) if is_truncated(&line, written) => {
                warn!("Line truncated to {} of {} bytes", written, line.len());
            }
            Ok(_) => {}
            Err(err) => error!("Write failed: {}", err),
        }
    }

    info!("End of input.");
    Ok(())
}

/// Forwards `input` and detaches the display however forwarding ended.
fn run<B: ExpanderBus, D: DelayNs>(
    mut lcd: ExpanderHD44780Driver<B, D>,
    config: &Config,
    input: impl BufRead,
) -> eyre::Result<()> {
    let result = forward(&mut lcd, config, input);
    if let Err(err) = &result {
        error!("Forwarding stopped: {}", err);
    }
    info!("Detaching.");
    lcd.detach();
    result
}

fn main() -> eyre::Result<()> {
    // Initialize environment and logger
    dotenv().ok();
    pretty_env_logger::init();

    info!("hdlcd starting...");

    // Get the expander location from env
    let bus_no: u8 = var("HDLCD_I2C_BUS")?.parse()?;
    let address = parse_address(&var("HDLCD_I2C_ADDRESS")?)?;

    info!("LCD @ /dev/i2c-{}, address {:#04x}", bus_no, address);

    debug!("Trying to load config...");
    let config = if let Some(config) = Config::try_load() {
        info!("Config loaded.");
        config
    } else {
        info!("Config not found. Using default");
        let config = Config::default();
        config.save()?;
        info!("Default config saved.");
        config
    };
    config.validate()?;
    debug!("{:?}", config);

    debug!("Initializing LCD driver...");
    let bus = LinuxExpanderBus::new(bus_no, address)?;
    let lcd = ExpanderHD44780Driver::attach(bus, ThreadSleep)?;
    debug!("{:?} initialized.", lcd);

    info!("hdlcd initialized, forwarding stdin.");
    run(lcd, &config, io::stdin().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use hdlcd_driver::{BusError, BusResult};
    use std::io::{BufReader, Read};

    const BACKLIGHT: u8 = 0b0000_1000;

    #[derive(Debug, Default)]
    struct RecordingBus {
        sent: Vec<u8>,
    }

    impl ExpanderBus for RecordingBus {
        fn transmit(&mut self, byte: u8) -> BusResult<()> {
            self.sent.push(byte);
            Ok(())
        }
    }

    /// Yields `data`, then fails.
    struct BrokenInput<'a> {
        data: &'a [u8],
    }

    impl Read for BrokenInput<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::from(io::ErrorKind::BrokenPipe));
            }
            let n = self.data.len().min(buf.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn newline_alone_is_not_truncation() {
        let line = b"0123456789abcdef\n";
        assert!(!is_truncated(line, 16));
        assert!(!is_truncated(b"hi", 2));
        assert!(is_truncated(b"0123456789abcdefg\n", 16));
        assert!(is_truncated(b"0123456789abcdefg", 16));
    }

    #[test]
    fn input_error_still_detaches() {
        let mut bus = RecordingBus::default();
        let lcd = ExpanderHD44780Driver::attach(&mut bus, NoopDelay).unwrap();

        let input = BufReader::new(BrokenInput { data: b"ok\nhalf" });
        let result = run(lcd, &Config::default(), input);

        assert!(result.is_err());
        // Detach ends on the backlight going off
        let last = *bus.sent.last().unwrap();
        assert_eq!(last & BACKLIGHT, 0);
    }

    #[test]
    fn end_of_input_detaches() {
        let mut bus = RecordingBus::default();
        let lcd = ExpanderHD44780Driver::attach(&mut bus, NoopDelay).unwrap();
        let config = Config {
            greeting: Some("hello".to_string()),
            ..Config::default()
        };

        run(lcd, &config, &b"a\nb\n"[..]).unwrap();

        // init, backlight, greeting, two lines, then clear + home + backlight off
        let writes = 5 * 6 + 1 + (2 + 5) * 6 + 2 * (2 + 1) * 6 + 2 * 6 + 1;
        assert_eq!(bus.sent.len(), writes);
        assert_eq!(bus.sent.last().unwrap() & BACKLIGHT, 0);
    }

    #[test]
    fn failed_write_is_skipped() {
        #[derive(Debug)]
        struct DeadDisplay;

        impl HD44780Driver for DeadDisplay {
            fn init(&mut self) -> BusResult<()> {
                Ok(())
            }
            fn send_command(&mut self, _command: u8) -> BusResult<()> {
                Err(BusError::NoAcknowledge)
            }
            fn send_char(&mut self, _data: u8) -> BusResult<()> {
                Err(BusError::NoAcknowledge)
            }
            fn set_backlight(&mut self, _on: bool) -> BusResult<()> {
                Err(BusError::NoAcknowledge)
            }
        }

        assert!(forward(&mut DeadDisplay, &Config::default(), &b"a\nb\n"[..]).is_ok());
    }
}
