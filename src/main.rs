use adif_stream::{AdifError, AdifReader};
use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <adif_file>", args[0]);
        eprintln!("  Read an ADIF log file and display its records");
        process::exit(1);
    }

    let filename = &args[1];

    if let Err(e) = run(filename) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(filename: &str) -> Result<(), AdifError> {
    let content = fs::read_to_string(filename)?;
    let mut reader = AdifReader::new(content.as_bytes());

    println!("=== ADIF File: {} ===", filename);
    println!();

    // A header is free text, invisible to the field scanner, so sniff for
    // the marker before deciding to skip one.
    if content.to_uppercase().contains("<EOH>") {
        let header = reader.skip_header()?;
        if !header.trim().is_empty() {
            println!("Header:");
            for line in header.lines().take(5) {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    println!("  {}", trimmed);
                }
            }
            println!();
        }
    }

    println!(
        "{:<12} {:<10} {:<6} {:<10} {:<8} {:<6} {:<6}",
        "Call", "Date", "Time", "Freq", "Band", "Mode", "RST"
    );
    println!("{}", "-".repeat(70));

    let mut count = 0usize;
    while let Some(record) = reader.next_record()? {
        count += 1;

        let call = record.call().unwrap_or("-");
        let date = record
            .qso_date()
            .map(format_date)
            .unwrap_or_else(|| "-".to_string());
        let time = record
            .time_on()
            .map(format_time)
            .unwrap_or_else(|| "-".to_string());
        let freq = record.freq().unwrap_or("-");
        let band = record.band().unwrap_or("-");
        let mode = record.mode().unwrap_or("-");
        let rst = record.rst_sent().unwrap_or("-");

        println!(
            "{:<12} {:<10} {:<6} {:<10} {:<8} {:<6} {:<6}",
            truncate(call, 12),
            date,
            time,
            truncate(freq, 10),
            truncate(band, 8),
            truncate(mode, 6),
            truncate(rst, 6)
        );
    }

    println!();
    println!("Total: {} QSO(s)", count);

    Ok(())
}

fn format_date(date: &str) -> String {
    if date.len() == 8 {
        format!("{}-{}-{}", &date[0..4], &date[4..6], &date[6..8])
    } else {
        date.to_string()
    }
}

fn format_time(time: &str) -> String {
    if time.len() >= 4 {
        format!("{}:{}", &time[0..2], &time[2..4])
    } else {
        time.to_string()
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
