//! Scenario 1: a single authentication attempt.
//!
//! One user authenticates against one bound sensor. The backend emits the
//! four protocol messages of the challenge/response exchange:
//!
//!   M1  user    → gateway   authentication request (did, sensor id)
//!   M2  gateway → sensor    challenge (nonce, current sid)
//!   M3  sensor  → gateway   response (proof over the nonce)
//!   M4  gateway → user      result (ok, rotated sid)
//!
//! The polling window reproduces what the original client observes: the
//! log set starts cleared, then grows as the exchange proceeds — and the
//! concurrent handler logs M2 *before* M1, so the raw snapshot arrives out
//! of both wall-clock and protocol order. The reconstruction engine is
//! what puts M1 back in front.

use serde_json::json;
use uuid::Uuid;

use crate::script::{message, now_epoch, ReplayScript};

/// The user's endpoint label.
pub const USER: &str = "did:web:alice";

/// The gateway's endpoint label.
pub const GATEWAY: &str = "gateway";

/// The sensor's endpoint label as logged: `sensor:` + base64("sensor-1").
pub const SENSOR: &str = "sensor:c2Vuc29yLTE=";

/// Record one authentication attempt as a replay script.
pub fn script() -> ReplayScript {
    let session = Uuid::new_v4().to_string();
    let sid = format!("sid-{}", &session[..8]);
    let rotated_sid = format!("sid-{}", &session[9..13]);
    let nonce = format!("n-{}", &session[24..32]);
    let base = now_epoch();

    let m1 = message(
        "M1",
        Some(&session),
        1,
        base + 0.08,
        USER,
        GATEWAY,
        &[
            ("did", json!(USER)),
            ("sensorId", json!("sensor-1")),
        ],
    );
    let m2 = message(
        "M2",
        Some(&session),
        2,
        base + 0.06,
        GATEWAY,
        SENSOR,
        &[("nonce", json!(nonce)), ("sid", json!(sid))],
    );
    let m3 = message(
        "M3",
        Some(&session),
        3,
        base + 0.21,
        SENSOR,
        GATEWAY,
        &[
            ("nonce", json!(nonce)),
            ("proof", json!(format!("prf-{}", &session[..6]))),
        ],
    );
    let m4 = message(
        "M4",
        Some(&session),
        4,
        base + 0.34,
        GATEWAY,
        USER,
        &[("ok", json!(true)), ("newSid", json!(rotated_sid))],
    );

    ReplayScript {
        polls: vec![
            // Logs cleared when the attempt starts.
            vec![],
            // Concurrent handling: M2 hits the log before M1.
            vec![m2.clone(), m1.clone()],
            vec![m2.clone(), m1.clone(), m3.clone()],
            vec![m2, m1, m3, m4],
        ],
    }
}
