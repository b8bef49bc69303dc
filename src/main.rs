//! segclock - CLI Entry Point
//!
//! Commands:
//! - `segclock run` - Simulate the clock for a number of seconds
//! - `segclock frames` - Dump display frames for one refresh cycle
//! - `segclock script <file>` - Run a stimulus script
//! - `segclock watch` - Interactive front panel
//! - `segclock config` - Print or save the default configuration
//! - `segclock test` - Built-in self-test

use clap::{Parser, Subcommand};
use segclock::{Button, ButtonInputs, Clock, ClockConfig};

#[derive(Parser)]
#[command(name = "segclock")]
#[command(version = "0.1.0")]
#[command(about = "Cycle-accurate simulation of a seven-segment digital clock")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by every simulating command.
#[derive(clap::Args, Clone)]
struct ClockArgs {
    /// JSON config file (defaults to the 100 MHz board)
    #[arg(short, long)]
    config: Option<String>,
    /// Use the 600 Hz simulation timing instead of the board clock
    #[arg(long, conflicts_with = "config")]
    sim: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the clock for a number of simulated seconds
    Run {
        #[command(flatten)]
        clock: ClockArgs,
        /// Seconds of simulated time
        #[arg(short, long, default_value = "61")]
        seconds: u64,
        /// Minute button presses applied before running
        #[arg(long, default_value = "0")]
        minutes: u32,
        /// Hour button presses applied before running
        #[arg(long, default_value = "0")]
        hours: u32,
        /// Print the full register state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Dump the display pads for one full refresh
    Frames {
        #[command(flatten)]
        clock: ClockArgs,
        /// Seconds to run before dumping
        #[arg(short, long, default_value = "0")]
        seconds: u64,
    },
    /// Run a stimulus script
    Script {
        /// Path to the script file
        path: String,
        #[command(flatten)]
        clock: ClockArgs,
    },
    /// Interactive front panel
    Watch {
        #[command(flatten)]
        clock: ClockArgs,
    },
    /// Print the default configuration, or save it to a file
    Config {
        /// Output file
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Run the built-in self-test
    Test,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run { clock, seconds, minutes, hours, json }) => {
            run_clock(&clock, seconds, minutes, hours, json);
        }
        Some(Commands::Frames { clock, seconds }) => {
            dump_frames(&clock, seconds);
        }
        Some(Commands::Script { path, clock }) => {
            run_script_file(&path, &clock);
        }
        Some(Commands::Watch { clock }) => {
            watch(&clock);
        }
        Some(Commands::Config { output }) => {
            write_config(output);
        }
        Some(Commands::Test) => {
            run_self_test();
        }
        None => {
            println!("segclock v0.1.0");
            println!("A cycle-accurate seven-segment digital clock");
            println!();
            println!("Use --help for available commands");
            println!();
            demo_clock();
        }
    }
}

fn build_clock(args: &ClockArgs) -> Clock {
    let config = match (&args.config, args.sim) {
        (Some(path), _) => match ClockConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        (None, true) => ClockConfig::simulation(),
        (None, false) => ClockConfig::default(),
    };
    
    match Clock::new(config) {
        Ok(clock) => clock,
        Err(e) => {
            eprintln!("❌ Invalid config: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_clock(args: &ClockArgs, seconds: u64, minutes: u32, hours: u32, json: bool) {
    let mut clock = build_clock(args);
    
    for _ in 0..minutes {
        clock.press(Button::Minutes, 4);
    }
    for _ in 0..hours {
        clock.press(Button::Hours, 4);
    }
    clock.advance_seconds(seconds, ButtonInputs::IDLE);
    
    if json {
        match clock.to_json() {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("❌ Failed to encode state: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }
    
    let frame = clock.frame();
    println!("━━━ Result ━━━");
    println!("Cycles:   {}", clock.cycles());
    println!("Time:     {}", clock.time());
    println!("Digits:   {:?}", clock.digits());
    println!("Active:   digit {} = {}", frame.index, frame.value);
    println!("cs:       {:06b}", frame.cs);
    println!("abcdefg:  {:07b}", frame.segments);
}

fn dump_frames(args: &ClockArgs, seconds: u64) {
    let mut clock = build_clock(args);
    clock.advance_seconds(seconds, ButtonInputs::IDLE);
    
    let period = clock.display().period();
    println!("━━━ Frames at {} ({} cycles per digit) ━━━", clock.time(), period);
    println!("{:>12}  {:>5}  {:>6}  {:>7}  value", "cycle", "digit", "cs", "abcdefg");
    
    let start = clock.cycles();
    let mut last = None;
    for (n, frame) in clock.frames().take(period as usize * 6).enumerate() {
        // One line per digit slot.
        if last == Some(frame.index) {
            continue;
        }
        last = Some(frame.index);
        println!(
            "{:>12}  {:>5}  {:06b}  {:07b}  {}",
            start + n as u64, frame.index, frame.cs, frame.segments, frame.value
        );
    }
}

fn run_script_file(path: &str, args: &ClockArgs) {
    use segclock::{load_script, run_script};
    
    println!("📜 Running: {}", path);
    
    let script = match load_script(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    
    if script.is_empty() {
        eprintln!("❌ No commands to execute");
        std::process::exit(1);
    }
    
    let mut clock = build_clock(args);
    match run_script(&mut clock, &script) {
        Ok(report) => {
            println!("✓ {} commands, {} expectations passed", report.commands, report.expectations);
            println!("  Cycles: {}", report.cycles);
            println!("  Time:   {}", report.final_time);
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "tui")]
fn watch(args: &ClockArgs) {
    let clock = build_clock(args);
    if let Err(e) = segclock::run_front_panel(clock) {
        eprintln!("❌ Front panel error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "tui"))]
fn watch(_args: &ClockArgs) {
    eprintln!("❌ Built without the `tui` feature");
    std::process::exit(1);
}

fn write_config(output: Option<String>) {
    let config = ClockConfig::default();
    match output {
        Some(path) => {
            if let Err(e) = config.save(&path) {
                eprintln!("❌ Failed to save config: {}", e);
                std::process::exit(1);
            }
            println!("✓ Saved to {}", path);
        }
        None => match config.to_json() {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        },
    }
}

fn demo_clock() {
    use segclock::encode_digit;
    
    println!("━━━ Seven-Segment Clock Demo ━━━");
    println!();
    
    let mut clock = Clock::new(ClockConfig::simulation())
        .expect("simulation config is valid");
    println!("Reset:           {}", clock.time());
    
    clock.advance_ticks(61, ButtonInputs::IDLE);
    println!("After 61 ticks:  {}", clock.time());
    
    clock.press(Button::Hours, 4);
    println!("Hour button:     {}", clock.time());
    
    println!();
    println!("Segment patterns (abcdefg, a = bit 0):");
    for d in 0..10u8 {
        println!("  {} = {:07b}", d, encode_digit(d));
    }
    println!();
    
    println!("✓ Clock core working!");
}

fn run_self_test() {
    use segclock::{to_bcd, decode_segments, encode_digit, TimeOfDay};
    
    println!("━━━ segclock Self-Test ━━━");
    println!();
    
    let mut passed = 0;
    let mut failed = 0;
    
    let mut check = |name: &str, ok: bool| {
        if ok {
            println!("{}... ✓", name);
            passed += 1;
        } else {
            println!("{}... ✗", name);
            failed += 1;
        }
    };
    
    check(
        "BCD over 0..60",
        (0..60u8).all(|v| to_bcd(v).value() == v && to_bcd(v).tens <= 5),
    );
    
    check(
        "Segment table round-trip",
        (0..16u8).all(|d| decode_segments(encode_digit(d)) == Some(d)),
    );
    
    let sim = || Clock::new(ClockConfig::simulation()).expect("simulation config is valid");
    
    let mut clock = sim();
    clock.advance_ticks(60, ButtonInputs::IDLE);
    check("Sixty ticks carry a minute", clock.time() == TimeOfDay::new(0, 1, 0));
    
    let mut clock = sim();
    clock.advance_ticks(24 * 3600, ButtonInputs::IDLE);
    check("Full day returns to midnight", clock.time() == TimeOfDay::MIDNIGHT);
    
    let mut clock = sim();
    check("Single press single pulse", clock.press(Button::Minutes, 50) == 1);
    
    let mut stepped = sim();
    let mut skipped = sim();
    stepped.run(5_000, ButtonInputs::IDLE);
    skipped.fast_forward(5_000, ButtonInputs::IDLE);
    check(
        "Fast-forward matches stepping",
        matches!((stepped.to_json(), skipped.to_json()), (Ok(a), Ok(b)) if a == b),
    );
    
    let mut clock = sim();
    let period = clock.display().period() as usize;
    let mut order = Vec::new();
    for frame in clock.frames().take(period * 6) {
        if order.last() != Some(&frame.index) {
            order.push(frame.index);
        }
    }
    check("Display round-robin", order == [0, 1, 2, 3, 4, 5]);
    
    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Results: {} passed, {} failed", passed, failed);
    
    if failed == 0 {
        println!("✓ All tests passed!");
    } else {
        std::process::exit(1);
    }
}
