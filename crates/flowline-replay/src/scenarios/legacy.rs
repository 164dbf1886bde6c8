//! Scenario 3: legacy logs with no session correlation.
//!
//! Older gateway builds logged the exchange without a sessionId, and some
//! records without a seq. All such events share the synthetic default
//! session: the timeline renders them as one block with no session marker,
//! ordered by phase rank and then by what ordering data each record still
//! carries.

use serde_json::json;

use crate::script::{message, now_epoch, ReplayScript};

/// Record a legacy (unkeyed) exchange as a replay script.
pub fn script() -> ReplayScript {
    let base = now_epoch();

    let m1 = message(
        "M1",
        None,
        1,
        base + 0.10,
        "did:web:carol",
        "gateway",
        &[("sensorId", json!("sensor-1"))],
    );
    // The legacy build forgot the seq on M2.
    let mut m2 = message(
        "M2",
        None,
        0,
        base + 0.22,
        "gateway",
        "sensor:c2Vuc29yLTE=",
        &[("nonce", json!("n-legacy"))],
    );
    m2.seq = None;
    let m3 = message(
        "M3",
        None,
        3,
        base + 0.35,
        "sensor:c2Vuc29yLTE=",
        "gateway",
        &[("proof", json!("prf-legacy"))],
    );
    let m4 = message(
        "M4",
        None,
        4,
        base + 0.47,
        "gateway",
        "did:web:carol",
        &[("ok", json!(false)), ("reason", json!("proof mismatch"))],
    );

    ReplayScript {
        polls: vec![
            vec![m1.clone(), m2.clone()],
            vec![m1, m2, m3, m4],
        ],
    }
}
