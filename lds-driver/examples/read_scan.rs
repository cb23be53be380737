use clap::Parser;
use lds_driver::{run_driver, DriverConfig, UnfilledSlot};
use std::path::PathBuf;

/// Reads scans from the LDS, prints the rotation speed and appends every scan to a record file.
#[derive(Parser)]
#[command(name = "LiDAR data receiver.", disable_version_flag = true)]
struct Args {
    /// The device path to a serial port
    port: String,
    /// File the scans are appended to
    #[arg(short, long, default_value = "lidar_data.bin")]
    output: PathBuf,
    /// Baud rate of the serial port
    #[arg(short, long, default_value_t = lds_driver::DEFAULT_BAUD_RATE)]
    baud_rate: u32,
    /// Record angles without a reading as NaN instead of 0.0
    #[arg(long)]
    nan: bool,
    /// Stop after this many scans
    #[arg(short = 'n', long)]
    max_scans: Option<usize>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let fill = if args.nan {
        UnfilledSlot::Nan
    } else {
        UnfilledSlot::Zero
    };
    let config = DriverConfig {
        baud_rate: args.baud_rate,
        ..DriverConfig::default()
    }
    .with_fill(fill)
    .with_record_path(&args.output);

    let (driver_threads, scan_rx) = match run_driver(&args.port, config) {
        Ok(t) => t,
        Err(e) => {
            log::error!("Failed to start the driver on \"{}\": {}", args.port, e);
            std::process::exit(1);
        }
    };

    let mut n_scans = 0;
    while let Ok(received) = scan_rx.recv() {
        let scan = match received {
            Ok(scan) => scan,
            Err(e) => {
                log::error!("LDS driver stopped: {}", e);
                break;
            }
        };
        println!("RPMS: {}", scan.rpm);
        n_scans += 1;
        if args.max_scans.is_some_and(|max| n_scans >= max) {
            break;
        }
    }

    drop(driver_threads);
}
