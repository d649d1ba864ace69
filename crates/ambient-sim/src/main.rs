//! Headless run of one mounted region with a synthetic frame clock.
//!
//! ambient-sim [composition] [viewport-width] [--reduced-motion] [--low-power]
//!             [--intensity low|medium|high] [--static] [--fps N] [--seconds N]

use ambient_core::{
    Backgrounds, CapabilityProbe, EnvironmentSignals, MountOptions, RegionHandle, StaticSignals,
};
use anyhow::Context;
use instant::Instant;
use std::time::Duration;

struct Args {
    composition: String,
    signals: EnvironmentSignals,
    intensity: Option<String>,
    animated: Option<bool>,
    fps: f64,
    seconds: f64,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        composition: "hero".to_string(),
        signals: EnvironmentSignals::default(),
        intensity: None,
        animated: None,
        fps: 60.0,
        seconds: 5.0,
    };
    let mut positional = 0;
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--reduced-motion" => args.signals.prefers_reduced_motion = true,
            "--low-power" => args.signals.low_power = Some(true),
            "--static" => args.animated = Some(false),
            "--intensity" => {
                args.intensity = Some(it.next().context("--intensity needs a value")?)
            }
            "--fps" => {
                args.fps = it
                    .next()
                    .context("--fps needs a value")?
                    .parse()
                    .context("--fps must be a number")?
            }
            "--seconds" => {
                args.seconds = it
                    .next()
                    .context("--seconds needs a value")?
                    .parse()
                    .context("--seconds must be a number")?
            }
            _ if positional == 0 => {
                args.composition = arg.clone();
                positional += 1;
            }
            _ if positional == 1 => {
                args.signals.viewport_width = arg
                    .parse()
                    .with_context(|| format!("bad viewport width `{}`", arg))?;
                positional += 1;
            }
            other => anyhow::bail!("unexpected argument `{}`", other),
        }
    }
    if !args.fps.is_finite() || args.fps <= 0.0 {
        anyhow::bail!("--fps must be positive");
    }
    Ok(args)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();
    let args = parse_args()?;

    let tier = CapabilityProbe::new(StaticSignals(args.signals)).probe();
    log::info!(
        "[sim] width={} tier={:?} budget={} motion={}",
        args.signals.viewport_width,
        tier.level,
        tier.particle_budget(),
        tier.allows_motion()
    );

    let mut backgrounds = Backgrounds::new(tier);
    let region = RegionHandle(1);
    let options = MountOptions::from_host(args.intensity.as_deref(), args.animated);
    backgrounds.mount_background(region, &args.composition, options);

    let mut now = Instant::now();
    backgrounds.on_proximity_enter(region);
    backgrounds.confirm_visible(region, now);
    if let Some(c) = backgrounds.get(region) {
        log::info!(
            "[sim] `{}` {:?} intensity={} animated={} primitives={} particles={}/{}",
            c.resolved().id,
            c.phase(),
            c.intensity().id(),
            c.is_animated(),
            c.primitives().len(),
            c.pool().active_count(),
            c.pool().capacity()
        );
    }

    let step = Duration::from_secs_f64(1.0 / args.fps);
    let frames = (args.seconds * args.fps).ceil() as u64;
    for _ in 0..frames {
        now += step;
        let outcome = backgrounds.frame(region, now);
        if let Some(s) = outcome.sample {
            log::info!("[sim] window: {} frames, {:.1} fps", s.frame_count, s.fps);
        }
        if outcome.degraded {
            if let Some(c) = backgrounds.get(region) {
                log::info!(
                    "[sim] degraded: intensity={} particles={} primitives={}",
                    c.intensity().id(),
                    c.pool().active_count(),
                    c.primitives().len()
                );
            }
        }
        if !outcome.rearm {
            log::info!("[sim] loop not re-armed; static scene");
            break;
        }
    }

    backgrounds.on_proximity_exit(region);
    if let Some(c) = backgrounds.get(region) {
        log::info!(
            "[sim] after exit: {:?} particles={} degraded={}",
            c.phase(),
            c.pool().active_count(),
            c.is_degraded()
        );
    }
    let torn = backgrounds
        .unmount_background(region)
        .context("region vanished before unmount")?;
    log::info!("[sim] unmounted: {:?}", torn.phase());
    Ok(())
}
