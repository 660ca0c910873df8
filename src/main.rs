//! Host simulator for the watchface.
//!
//! Runs the face on the std executor with simulated device services: a
//! wall clock seeded from the build-time epoch, a battery that drains and
//! recharges, and a Bluetooth link that drops now and then. Tasks talk
//! through signals and a single-threaded executor dispatches one handler
//! at a time, matching the callback model of the real watch.

use embassy_executor::Spawner;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embassy_time::{Duration, Instant, Ticker, Timer};
use log::{debug, info};

use chrono::{DateTime, NaiveDateTime, Timelike};

use tileface::{
    framebuffer::{Framebuffer, HEIGHT, WIDTH},
    haptics::Pulse,
    shuffle::Lcg,
    ui::{BatteryInfo, Config, TileFace},
};

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

// Communication channels
static BATTERY: Signal<CriticalSectionRawMutex, BatteryInfo> = Signal::new();
static BLUETOOTH: Signal<CriticalSectionRawMutex, bool> = Signal::new();
static NOTIFY: Signal<CriticalSectionRawMutex, Pulse> = Signal::new();
static TIME: Signal<CriticalSectionRawMutex, NaiveDateTime> = Signal::new();

/// Current local wall-clock time: build-time epoch plus uptime plus offset.
fn wall_clock(utc_offset: i32) -> NaiveDateTime {
    let secs = UTC_TIME + Instant::now().as_secs() as i64 + i64::from(utc_offset);
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.naive_utc())
        .unwrap_or(NaiveDateTime::UNIX_EPOCH)
}

/// Publish the wall-clock time once per second.
#[embassy_executor::task(pool_size = 1)]
async fn update_time(utc_offset: i32) {
    let mut tick = Ticker::every(Duration::from_secs(1));
    loop {
        TIME.signal(wall_clock(utc_offset));

        // Re-schedule the timer interrupt
        tick.next().await;
    }
}

/// Drain and recharge the simulated battery.
#[embassy_executor::task(pool_size = 1)]
async fn simulate_battery(mut info: BatteryInfo) {
    loop {
        Timer::after(Duration::from_secs(30)).await;

        if info.charging {
            info.percent = (info.percent + 5).min(100);
            if info.percent == 100 {
                info.charging = false;
            }
        } else {
            info.percent = info.percent.saturating_sub(1);
            if info.percent <= 15 {
                info.charging = true;
            }
        }
        BATTERY.signal(info);
    }
}

/// Drop and restore the simulated Bluetooth link now and then.
#[embassy_executor::task(pool_size = 1)]
async fn simulate_bluetooth() {
    let mut rng = Lcg::new(Instant::now().as_micros() as u32 | 1);
    let mut connected = true;
    loop {
        Timer::after(Duration::from_secs(45)).await;

        if rng.next_below(4) == 0 {
            connected = !connected;
            BLUETOOTH.signal(connected);
        }
    }
}

/// Fire vibration patterns queued by the face. The simulated motor just
/// logs each buzz with the pattern's timing.
#[embassy_executor::task(pool_size = 1)]
async fn notify() {
    loop {
        let pulse = NOTIFY.wait().await;
        for _ in 0..pulse.times() {
            info!("bzzz ({}ms)", pulse.length_ms());
            Timer::after(Duration::from_millis(u64::from(pulse.length_ms()))).await;
        }
    }
}

/// Consume device events and keep the face current.
#[embassy_executor::task(pool_size = 1)]
async fn update_face(mut face: TileFace) {
    let mut frame = Framebuffer::new();
    let mut shown = None;
    let mut tick = Ticker::every(Duration::from_secs(1));
    loop {
        let mut dirty = false;

        if BATTERY.signaled() {
            let status = BATTERY.wait().await;
            info!(
                "battery status: {} ({})",
                status.percent,
                if status.charging {
                    "charging"
                } else {
                    "discharging"
                }
            );
            face.handle_battery(status);
            dirty = true;
        }

        if BLUETOOTH.signaled() {
            let connected = BLUETOOTH.wait().await;
            if let Some(pulse) = face.handle_bluetooth(connected) {
                NOTIFY.signal(pulse);
            }
            dirty = true;
        }

        if TIME.signaled() {
            let now = TIME.wait().await;
            let minute = (now.hour(), now.minute());
            if shown != Some(minute) {
                shown = Some(minute);
                face.handle_minute_tick(now);
                dirty = true;
            }
        }

        if dirty {
            frame.clear();
            let _ = face.draw(&mut frame);
            dump(&frame);
        }

        // Re-schedule the timer interrupt in 1s
        tick.next().await;
    }
}

/// Dump the framebuffer to the console at debug level.
fn dump(frame: &Framebuffer) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    for y in 0..HEIGHT {
        let mut line = String::with_capacity(WIDTH as usize);
        for x in 0..WIDTH {
            line.push(if frame.pixel(x, y) { '#' } else { ' ' });
        }
        debug!("{}", line);
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    env_logger::init();
    info!("Initializing");

    let config = Config::default();

    // Initial device state, polled once; push events take over afterwards
    let battery = BatteryInfo {
        percent: 80,
        charging: false,
    };
    let connected = true;

    let mut face = TileFace::new(config, Instant::now().as_micros() as u32 | 1);
    face.load(wall_clock(config.utc_offset), battery, connected);

    info!("Initialization finished");

    // Schedule tasks
    spawner.spawn(update_time(config.utc_offset)).unwrap();
    spawner.spawn(simulate_battery(battery)).unwrap();
    spawner.spawn(simulate_bluetooth()).unwrap();
    spawner.spawn(notify()).unwrap();
    spawner.spawn(update_face(face)).unwrap();
}
