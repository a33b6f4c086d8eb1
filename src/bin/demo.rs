use clap::{App, Arg, SubCommand};
use log::info;
use monet::{
    error::MonetError,
    topics::Iso,
    Publisher, Result, Subscriber, TopicRegistry,
};
use std::{
    sync::{Arc, Mutex},
    thread,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

fn main() -> Result<()> {
    env_logger::init();

    let matches = App::new("monet-demo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Monet topic registry demo driver")
        .subcommand(
            SubCommand::with_name("scenario")
                .about("Walk through advertise/publish/copy on the iso topic"),
        )
        .subcommand(
            SubCommand::with_name("threads")
                .about("Run a publisher thread and a subscriber thread")
                .arg(
                    Arg::with_name("iterations")
                        .short("n")
                        .long("iterations")
                        .value_name("COUNT")
                        .help("Number of publish/copy rounds")
                        .default_value("20")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("interval")
                        .short("i")
                        .long("interval-ms")
                        .value_name("MILLIS")
                        .help("Delay between rounds in milliseconds")
                        .default_value("500")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("info")
                .about("Show version and build information"),
        )
        .get_matches();

    match matches.subcommand() {
        ("scenario", Some(_)) => run_scenario(),
        ("threads", Some(thread_matches)) => {
            let iterations: usize = thread_matches
                .value_of("iterations")
                .unwrap()
                .parse()
                .map_err(|_| MonetError::invalid_parameter("iterations", "Invalid count"))?;
            let interval: u64 = thread_matches
                .value_of("interval")
                .unwrap()
                .parse()
                .map_err(|_| MonetError::invalid_parameter("interval", "Invalid interval"))?;

            run_threads(iterations, Duration::from_millis(interval))
        }
        ("info", Some(_)) => show_info(),
        _ => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn run_scenario() -> Result<()> {
    let registry = TopicRegistry::global();

    let mut sub_iso = Subscriber::<Iso>::new(registry.clone());
    println!("Topic advertised? (no) {}", yes_no(sub_iso.advertised()));

    let mut pub_iso = Publisher::<Iso>::new(registry.clone());
    println!("Topic advertised? (yes) {}", yes_no(sub_iso.advertised()));
    println!(
        "Is this publisher advertising the topic? (yes) {}",
        yes_no(pub_iso.advertised())
    );

    let mut pub_iso2 = Publisher::<Iso>::new(registry.clone());
    pub_iso2.unadvertise();
    println!(
        "Is the second publisher advertising the topic? (no) {}",
        yes_no(pub_iso2.advertised())
    );
    println!("Topic advertised? (yes) {}", yes_no(sub_iso.advertised()));
    println!("Topic updated? (no) {}", yes_no(sub_iso.updated()));

    let sent = Iso::new(now_secs(), 5);
    pub_iso.publish(&sent);

    // Publishing through a handle that dropped its advertisement re-advertises
    pub_iso2.set(sent);
    pub_iso2.update();
    println!(
        "Is the second publisher advertising again? (yes) {}",
        yes_no(pub_iso2.advertised())
    );

    println!("Published timestamp = {}", sent.timestamp);
    println!("Published val = {}", sent.iso);
    println!("Topic updated? (yes) {}", yes_no(sub_iso.updated()));

    let mut received = Iso::default();
    sub_iso.copy_into(&mut received);
    println!("Received timestamp = {}", received.timestamp);
    println!("Received val = {}", received.iso);
    println!("Topic updated? (no) {}", yes_no(sub_iso.updated()));

    pub_iso.unadvertise();
    pub_iso2.unadvertise();
    println!(
        "Is the first publisher advertising the topic? (no) {}",
        yes_no(pub_iso.advertised())
    );
    println!("Topic advertised? (no) {}", yes_no(sub_iso.advertised()));

    let stats = registry.stats().snapshot();
    info!("scenario finished: {:?}", stats);

    if received != sent {
        return Err(MonetError::copy_failure(
            "iso",
            std::mem::size_of::<Iso>(),
            0,
        ));
    }

    Ok(())
}

fn run_threads(iterations: usize, interval: Duration) -> Result<()> {
    let registry = TopicRegistry::global();
    let print_lock = Arc::new(Mutex::new(()));

    let sub_registry = registry.clone();
    let sub_print = print_lock.clone();
    let subscriber = thread::spawn(move || {
        println!("Subscriber thread started");
        let mut sub_iso = Subscriber::<Iso>::new(sub_registry);
        let mut received = Iso::default();

        for _ in 0..iterations {
            let fresh = sub_iso.updated();
            if sub_iso.copy_into(&mut received) {
                let _guard = sub_print.lock().unwrap_or_else(|p| p.into_inner());
                println!(
                    "Received timestamp = {} val = {} (generation {}, fresh: {})",
                    received.timestamp,
                    received.iso,
                    sub_iso.last_generation(),
                    yes_no(fresh)
                );
            }
            thread::sleep(interval);
        }
    });

    let pub_registry = registry.clone();
    let pub_print = print_lock.clone();
    let publisher = thread::spawn(move || {
        println!("Publisher thread started");
        let mut pub_iso = Publisher::<Iso>::new(pub_registry);
        let mut record = Iso::new(0xEC, 1);

        for _ in 0..iterations {
            record.iso = record.iso.wrapping_add(1);
            record.timestamp = now_secs();

            let published = pub_iso.publish(&record);
            {
                let _guard = pub_print.lock().unwrap_or_else(|p| p.into_inner());
                println!(
                    "Published timestamp = {} val = {} ({})",
                    record.timestamp,
                    record.iso,
                    if published { "ok" } else { "rejected" }
                );
            }
            thread::sleep(interval);
        }
    });

    subscriber
        .join()
        .map_err(|_| MonetError::invalid_parameter("subscriber", "thread panicked"))?;
    publisher
        .join()
        .map_err(|_| MonetError::invalid_parameter("publisher", "thread panicked"))?;

    let stats = registry.stats();
    println!("\nResults:");
    println!("  Publishes: {}", stats.snapshot().publishes);
    println!("  Copies: {}", stats.snapshot().copies);
    println!("  Rejected: {}", stats.snapshot().rejected);
    println!("  Copy hit ratio: {:.2}", stats.copy_hit_ratio());

    Ok(())
}

fn show_info() -> Result<()> {
    println!("Monet Topic Registry");
    println!("Version: {}", monet::VERSION);

    println!("\nFeatures:");
    #[cfg(feature = "c-api")]
    println!("  ✓ C API for foreign function interface");

    println!("\nCapabilities:");
    println!("  - Named fixed-size topics, one live value each");
    println!("  - Reference-counted advertisement");
    println!("  - Generation-based change detection");
    println!("  - Per-topic locking");

    Ok(())
}
