use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use vitrine_engine::logging::{LoggingConfig, init_logging};
use vitrine_ui::content::RevealPolicy;
use vitrine_ui::prelude::*;

const BUNDLED_PAGE: &str = include_str!("../content/portfolio.vpage");

/// Scrolls a page document top to bottom in simulated time and reports
/// which elements revealed when.
#[derive(Parser, Debug)]
#[command(name = "vitrine-studio", version)]
struct Args {
    /// Page document to load. Defaults to the bundled portfolio.
    #[arg(long)]
    page: Option<PathBuf>,
    #[arg(long, default_value_t = 1280.0)]
    width: f32,
    #[arg(long, default_value_t = 720.0)]
    height: f32,
    /// Pixels scrolled per step.
    #[arg(long, default_value_t = 240.0)]
    step: f32,
    /// Frames simulated (at 60 Hz) after every step.
    #[arg(long, default_value_t = 30)]
    frames_per_step: u32,
    /// Section ids to jump to before the scroll pass, in order.
    #[arg(long = "navigate", value_name = "ID")]
    navigate: Vec<String>,
    /// Simulate a host without intersection reporting.
    #[arg(long)]
    no_observer: bool,
    /// Log filter, e.g. "debug" or "vitrine_ui=trace".
    #[arg(long)]
    log: Option<String>,
}

/// A page plus the simulated clock driving it.
struct Session {
    page: Page,
    clock: FrameClock,
    frames_per_step: u32,
}

impl Session {
    const DT: Duration = Duration::from_nanos(16_666_667);

    fn run(&mut self) {
        for _ in 0..self.frames_per_step {
            let time = self.clock.advance(Self::DT);
            let frame = self.page.frame(&time);
            for key in &frame.revealed {
                log::info!("{:>7.2}s  y={:>6.0}  revealed {key}", frame.time.as_secs_f32(), frame.scroll_y);
            }
        }
    }

    fn send(&mut self, event: PageEvent) -> EventResult {
        let result = self.page.handle(event, &mut LogOutbound);
        self.run();
        result
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut logging = LoggingConfig::default();
    if let Some(filter) = &args.log {
        logging = logging.with_filter(filter.clone());
    }
    init_logging(logging);

    let viewport = Viewport::new(args.width, args.height);
    if !viewport.is_valid() {
        bail!("viewport {}x{} is not drawable", args.width, args.height);
    }
    if !(args.step.is_finite() && args.step > 0.0) {
        bail!("--step must be a positive number of pixels");
    }

    let source = match &args.page {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => BUNDLED_PAGE.to_string(),
    };
    let origin = args.page.as_ref().map_or("bundled portfolio".into(), |p| p.display().to_string());
    let portfolio = Portfolio::from_source(&source).with_context(|| format!("failed to load {origin}"))?;

    let watcher = if args.no_observer { WatcherKind::Unavailable } else { WatcherKind::Geometry };
    let page = Page::with_watcher(portfolio, viewport, watcher);
    log::info!(
        "{:?}: {} sections, {:.0}px document in a {}x{} viewport",
        page.title(),
        page.sections().len(),
        page.layout().height,
        args.width,
        args.height
    );

    let mut session = Session { page, clock: FrameClock::new(), frames_per_step: args.frames_per_step.max(1) };
    session.page.mount(Duration::ZERO);
    for section in session.page.sections() {
        for (key, _) in section.timeline() {
            log::info!("   0.00s  y=     0  revealed {key} on mount");
        }
    }
    session.run();

    for target in &args.navigate {
        if !session.send(PageEvent::Navigate { target: target.clone() }).is_consumed() {
            log::warn!("skipped --navigate {target}");
        }
    }

    loop {
        let before = session.page.scroll_y();
        session.send(PageEvent::Scroll { delta: args.step });
        if session.page.scroll_y() <= before {
            break;
        }
    }
    session.send(PageEvent::back_to_top());

    print_summary(&session.page);
    session.page.unmount();
    Ok(())
}

fn print_summary(page: &Page) {
    println!();
    println!("  {:<18} {:<8} {:>8} {:>10} {:>10}", "section", "reveal", "revealed", "first", "complete");
    println!("  {}", "─".repeat(58));
    for section in page.sections() {
        let content = section.content();
        let policy = match content.reveal.policy {
            RevealPolicy::Items => "items",
            RevealPolicy::Section => "section",
            RevealPolicy::Mount => "mount",
        };
        let timeline = section.timeline();
        let first = timeline.first().map(|(_, t)| *t);
        let complete = section.is_complete().then(|| timeline.last().map(|(_, t)| *t)).flatten();
        println!(
            "  {:<18} {:<8} {:>8} {:>10} {:>10}",
            section.id(),
            policy,
            format!("{}/{}", section.revealed_items(), content.items.len()),
            seconds(first),
            seconds(complete)
        );
    }
    println!();
}

fn seconds(t: Option<Duration>) -> String {
    t.map_or_else(|| "-".to_string(), |t| format!("{:.2}s", t.as_secs_f32()))
}
