//! Demonstrations of the progress indicators.

use std::thread;
use std::time::{Duration, Instant};

use termkit::format::{human_duration, human_size, pluralize};
use termkit::progress::{self, StageProgress};

use crate::cli::{DemoArgs, DemoCommand};

pub fn run(cmd: DemoCommand) {
    match cmd {
        DemoCommand::Spinner(args) => spinner(args),
        DemoCommand::Bar(args) => bar(args),
        DemoCommand::Stages(args) => stages(args),
    }
}

fn step_delay(args: DemoArgs) -> Duration {
    Duration::from_millis(args.delay_ms)
}

fn spinner(args: DemoArgs) {
    let started = Instant::now();
    let spinner = progress::spinner("Connecting...");
    for i in 1..=args.steps {
        thread::sleep(step_delay(args));
        spinner.update_message(&format!("Working on step {i}/{}", args.steps));
    }

    let elapsed = human_duration(started.elapsed());
    if args.fail {
        spinner.error(&format!("Gave up after {elapsed}"));
    } else {
        spinner.success(&format!(
            "Finished {} in {elapsed}",
            pluralize(args.steps as i64, "step", "steps")
        ));
    }
}

fn bar(args: DemoArgs) {
    const CHUNK: u64 = 256 * 1024;

    let total = args.steps.saturating_mul(CHUNK);
    let bar = progress::bar(args.steps, "Downloading");
    for _ in 0..args.steps {
        thread::sleep(step_delay(args));
        bar.add(1);
    }

    if args.fail {
        bar.error("Download interrupted");
    } else {
        bar.success(&format!("Downloaded {}", human_size(total)));
    }
}

fn stages(args: DemoArgs) {
    let names = ["Fetching", "Verifying", "Extracting", "Installing"];
    let mut stages = StageProgress::new(names.len());

    for (i, name) in names.iter().enumerate() {
        if *name == "Verifying" {
            stages.skip(name);
            continue;
        }

        let spinner = stages.next(name);
        for _ in 0..args.steps {
            thread::sleep(step_delay(args) / 2);
        }

        if args.fail && i == names.len() - 1 {
            spinner.error(&format!("{name} failed"));
        } else {
            spinner.success(&format!("{name} done"));
        }
    }

    log::info!("Completed {}/{} stages", stages.current(), stages.total());
}
