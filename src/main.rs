use std::cell::RefCell;
use std::fs::File;
use std::io::{self, BufReader};
use std::rc::Rc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use whichkey::cli::CliArgs;
use whichkey::config::AppConfig;
use whichkey::executor::{DryRunExecutor, ShellExecutor};
use whichkey::focus::CommandInspector;
use whichkey::keymap::{build_menu, load_keymap, Executor, Menu, Resolver, ResolverConfig};
use whichkey::render::TerminalRenderer;
use whichkey::runtime::{Driver, IdleTimer};

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    args.apply_to(&mut config);
    Ok(config)
}

fn build_resolver(config: &AppConfig, resolver_config: ResolverConfig, root: Menu) -> Resolver {
    let executor: Box<dyn Executor> = if config.dry_run {
        Box::new(DryRunExecutor::stdout())
    } else {
        Box::new(ShellExecutor)
    };

    let mut resolver = Resolver::new(resolver_config, root, executor);
    if let Some(command) = &config.focus_command {
        resolver = resolver.with_focus_inspector(CommandInspector::new(command));
    }
    resolver.add_inhibit_rules(config.inhibit.clone());

    let renderer = Rc::new(RefCell::new(TerminalRenderer::new(io::stdout())));
    let show = Rc::clone(&renderer);
    resolver.add_show(move |display| show.borrow_mut().show(display));
    let update = Rc::clone(&renderer);
    resolver.add_update(move |menu| update.borrow_mut().update(&menu.snapshot()));

    resolver
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    whichkey::tracing::init();

    // Everything that can fail at setup happens before the first event is read
    let config = load_config(&args).context("Failed to load config")?;
    let resolver_config = config.resolver_config()?;
    let registrations = load_keymap(args.keymap.as_deref()).context("Failed to load keymap")?;
    let root = build_menu(resolver_config.leader, registrations)?;

    if args.dump_menu {
        println!("{}", serde_json::to_string_pretty(&root)?);
        return Ok(());
    }

    let mut driver = Driver::new(build_resolver(&config, resolver_config, root));
    if let Some(timeout) = config.auto_close() {
        driver = driver.with_idle_timer(IdleTimer::new(timeout, Instant::now()));
    }

    let delivered = match &args.events {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            driver.run(BufReader::new(file))?
        }
        None => driver.run(BufReader::new(io::stdin()))?,
    };
    tracing::info!("Processed {} key events", delivered);

    Ok(())
}
