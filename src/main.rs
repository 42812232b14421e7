//! # chatpage CLI
//!
//! Command-line interface for the chatpage library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatpage::ChatpageError;
use chatpage::cli::Args;
use chatpage::pipeline::SiteBuilder;

fn main() {
    let args = <Args as ClapParser>::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_directive())),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ChatpageError> {
    let total_start = Instant::now();
    let config = args.to_config()?;

    println!("📦 chatpage v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", config.export_dir.display());
    println!("💾 Output:  {}", config.output_dir.display());
    println!("📄 Chunks:  {} messages", config.chunk_size);
    if !config.title_overrides.is_empty() {
        println!("🏷️  Titles:  {} overrides", config.title_overrides.len());
    }
    if !config.copy_media {
        println!("⏭️  Skipping media (--no-media)");
    }
    println!();

    println!("⏳ Building site...");
    let report = SiteBuilder::new(config.clone()).build()?;
    let total_time = total_start.elapsed();

    println!();
    println!("✅ Done! Site written to {}", config.output_dir.display());

    println!();
    println!("📊 Summary:");
    println!("   Chats:     {}", report.manifest.total_chats);
    println!("   Messages:  {}", report.manifest.total_messages);
    if !report.skipped_chats.is_empty() {
        println!("   Skipped:   {}", report.skipped_chats.join(", "));
    }
    if config.copy_media {
        println!("   Media:     {} files", report.media_files);
    }

    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());
    let msgs_per_sec = report.parsed_messages as f64 / total_time.as_secs_f64();
    println!("   Throughput:  {:.0} messages/sec", msgs_per_sec);

    Ok(())
}
