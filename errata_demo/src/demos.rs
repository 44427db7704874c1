//! The demo programs.

use std::net::SocketAddr;
use std::panic::catch_unwind;
use std::thread;

use errata::{Annotated, Fault, Meta, global};
use thiserror::Error;
use tracing::{info, warn as log_warn};

/// Failures of the arithmetic check used by the warn and callback demos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
enum CalcError {
    #[error("not mod 2")]
    NotModTwo,
    #[error("input too big")]
    TooBig,
}

// ─── basic ──────────────────────────────────────────────────────────

fn resolve(url: &str) -> Result<SocketAddr, Annotated> {
    let host = url.trim_start_matches("http://").trim_end_matches('/');
    host.parse::<SocketAddr>()
        .map_err(|e| errata::error(e, &[]).kv("host", host))
}

fn fetch(url: &str) -> Result<SocketAddr, Annotated> {
    resolve(url).map_err(|e| errata::error(e, &["get website"]))
}

/// Three workers fail the same way and echo independently.
pub fn basic() {
    let workers: Vec<_> = (0..3)
        .map(|num| {
            thread::spawn(move || match fetch("http://example.commmm/") {
                Ok(addr) => info!("{} success: {}", num, addr),
                Err(e) => {
                    global::echo(e);
                    log_warn!("{} get failed", num);
                }
            })
        })
        .collect();

    for worker in workers {
        if worker.join().is_err() {
            log_warn!("worker exited abnormally");
        }
    }
}

// ─── warn ───────────────────────────────────────────────────────────

fn is_mod_two(i: u32) -> Result<(), CalcError> {
    if i > 5 {
        return Err(CalcError::TooBig);
    }
    if i % 2 != 0 {
        return Err(CalcError::NotModTwo);
    }
    Ok(())
}

/// Odd inputs echo as warnings, large inputs as errors.
pub fn warn() {
    for i in 0..7 {
        info!("input {}", i);
        match is_mod_two(i) {
            Ok(()) => {}
            Err(e @ CalcError::NotModTwo) => {
                global::echo(errata::warn(e, &[]));
            }
            Err(e) => {
                global::echo(errata::error(e, &[]));
            }
        }
    }
}

// ─── panic ──────────────────────────────────────────────────────────

fn boom() {
    std::panic::panic_any("EXPLOOOOOSION!".to_string())
}

fn panic_text(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// A recovered panic reported with the stack at the point of echo.
pub fn panic() {
    if let Err(payload) = catch_unwind(boom) {
        let cause = std::io::Error::other(panic_text(payload.as_ref()));
        global::echo(errata::panic(cause, &[]));
    }
}

// ─── callbacks ──────────────────────────────────────────────────────

fn check(i: u32) -> Result<(), Annotated> {
    if i > 7 {
        std::panic::panic_any("EXPLOOOOSION!".to_string());
    }
    if i > 5 {
        return Err(errata::error(CalcError::TooBig, &["check input"]).kvs(&["avoid", "problem"]));
    }
    if i % 2 != 0 {
        return Err(errata::warn(CalcError::NotModTwo, &["i can haz"]).kvs(&["try", "moar"]));
    }
    Ok(())
}

fn calc(i: u32) -> Result<(), Annotated> {
    check(i).map_err(|e| {
        errata::error(e, &[])
            .kv("val", i)
            .kvs(&["math", "fun"])
    })
}

fn meta_json(meta: &Meta) -> String {
    serde_json::to_string(meta).unwrap_or_default()
}

fn on_warn(meta: &Meta, fault: &Fault) {
    info!("warn callback: {} {}", fault, meta_json(meta));
}

fn on_error(meta: &Meta, fault: &Fault) {
    info!("error callback: {} {}", fault, meta_json(meta));
}

fn on_panic(meta: &Meta, _fault: &Fault) {
    info!("panic callback: {}", meta_json(meta));
    // Recovered by the reporter; echo still returns normally.
    let empty: Vec<u32> = Vec::new();
    info!("unreachable: {}", empty[10]);
}

/// Every severity with its own callback, including a panicking one.
pub fn callbacks() {
    global::set_callback_warn(on_warn);
    global::set_callback_error(on_error);
    global::set_callback_panic(on_panic);

    for i in 0..10 {
        info!("input {}", i);
        match catch_unwind(|| calc(i)) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                global::echo(e);
            }
            Err(payload) => {
                let cause = std::io::Error::other(panic_text(payload.as_ref()));
                let node = errata::panic(cause, &["all bets are off"]).kvs(&["evasive", "maneuver"]);
                global::echo(node);
            }
        }
    }
    info!("finished");
}
