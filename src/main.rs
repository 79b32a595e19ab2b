use log::{info, warn};
use smhi_report::{
    format_decimal, CancellationToken, Collector, EntryStatus, NoRainfallData, RainfallOutcome,
    ReportError, ScanEntry, ScanOutcome, SmhiClient, SystemClock, WeatherReport, WeatherSource,
};
use std::sync::Arc;
use std::{env, io, thread};
use tokio::sync::oneshot;

const DEFAULT_CITY: &str = "Lund";

#[tokio::main]
async fn main() -> Result<(), ReportError> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info,reqwest=warn,hyper=warn"),
    )
    .init();

    let city = env::args().nth(1).unwrap_or_else(|| DEFAULT_CITY.to_string());
    let max_concurrency = env::var("SMHI_MAX_CONCURRENCY")
        .ok()
        .and_then(|raw| match raw.parse::<usize>() {
            Ok(limit) => Some(limit),
            Err(e) => {
                warn!("Ignoring SMHI_MAX_CONCURRENCY={}: {}", raw, e);
                None
            }
        });

    let client = SmhiClient::builder()
        .maybe_base_url(env::var("SMHI_BASE_URL").ok())
        .build()?;
    info!("Using SMHI API at {}", client.base_url());

    let report = WeatherReport::builder()
        .source(Arc::new(client))
        .clock(SystemClock)
        .collector(Collector::builder().maybe_max_concurrency(max_concurrency).build())
        .build();

    print_average_temperature(&report).await?;
    println!();
    print_rainfall(&report, &city).await?;
    println!();
    print_temperature_scan(&report).await?;

    Ok(())
}

async fn print_average_temperature<S>(
    report: &WeatherReport<S, SystemClock>,
) -> Result<(), ReportError>
where
    S: WeatherSource + 'static,
{
    let summary = report.average_temperature().await?;
    match summary.average {
        Some(average) => println!(
            "The average temperature in Sweden for the last hours was {} degrees",
            format_decimal(average)
        ),
        None => println!("No valid temperature data available."),
    }
    if summary.skipped() > 0 {
        println!(
            "{} stations had no recent temperature data (404 or null).",
            summary.skipped()
        );
    }
    Ok(())
}

async fn print_rainfall<S>(
    report: &WeatherReport<S, SystemClock>,
    city: &str,
) -> Result<(), ReportError>
where
    S: WeatherSource + 'static,
{
    let rainfall = match report.rainfall_for_city(city).await {
        Ok(rainfall) => rainfall,
        Err(ReportError::NoStationForCity { city }) => {
            println!("No station found for {}.", city);
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    println!(
        "{} Station ID: {}, Name: {}",
        city,
        rainfall.station.id,
        rainfall.station.display_name()
    );

    match rainfall.outcome {
        RainfallOutcome::Totals(totals) => {
            for month in &totals.monthly_totals {
                println!("Rainfall in {}: {} mm", month.month, format_decimal(month.total));
            }
            println!(
                "\nBetween {} and {} the total rainfall in {} was {} millimeters",
                totals.from_date,
                totals.to_date,
                city,
                format_decimal(totals.grand_total)
            );
        }
        RainfallOutcome::NoData(NoRainfallData::SeriesMissing) => {
            println!("No rainfall data available for {}.", city)
        }
        RainfallOutcome::NoData(NoRainfallData::NoValidPoints) => {
            println!("No valid rainfall measurements available for {}.", city)
        }
        RainfallOutcome::NoData(NoRainfallData::FetchFailed(message)) => {
            println!("Failed to fetch rainfall data for {}: {}", city, message)
        }
    }
    Ok(())
}

async fn print_temperature_scan<S>(
    report: &WeatherReport<S, SystemClock>,
) -> Result<(), ReportError>
where
    S: WeatherSource + 'static,
{
    let token = CancellationToken::new();
    let trigger = tokio::spawn(cancel_on_input(token.clone()));

    println!("Press Enter or Ctrl-C to cancel...\n");
    let scan = report.scan_temperatures(&token, print_entry).await;
    trigger.abort();
    let scan = scan?;

    match scan.outcome {
        ScanOutcome::Completed => println!("\nTemperature display completed."),
        ScanOutcome::Cancelled(_) => println!("\nOperation cancelled by user."),
    }
    info!(
        "Displayed {} stations in {} ms",
        scan.processed, scan.elapsed_millis
    );
    Ok(())
}

fn print_entry(entry: ScanEntry) {
    let name = entry.station.display_name();
    match (entry.status, entry.value) {
        (EntryStatus::Value, Some(value)) => println!("{}: {}", name, format_decimal(value)),
        (EntryStatus::Failed, _) => println!("{}: Failed to fetch data", name),
        _ => println!("{}:", name),
    }
}

/// Cancels `token` on the first line typed on stdin, or on Ctrl-C.
///
/// Stdin is read on a plain thread: a pending blocking read would otherwise
/// hold up runtime shutdown once the scan is over.
async fn cancel_on_input(token: CancellationToken) {
    let (line_tx, line_rx) = oneshot::channel();
    thread::spawn(move || {
        let mut line = String::new();
        if matches!(io::stdin().read_line(&mut line), Ok(n) if n > 0) {
            let _ = line_tx.send(());
        }
    });

    tokio::select! {
        Ok(()) = line_rx => {}
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                warn!("Unable to listen for Ctrl-C: {}", e);
                return;
            }
        }
    }
    info!("Cancellation requested");
    token.cancel();
}
