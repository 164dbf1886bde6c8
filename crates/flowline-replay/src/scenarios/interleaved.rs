//! Scenario 2: two concurrent authentication attempts.
//!
//! Alice and Bob authenticate against different sensors at the same time,
//! so their messages interleave in the shared log — and because the
//! gateway handles them on separate workers, wall-clock timestamps cross
//! between the two exchanges. One diagnostic record with an
//! out-of-vocabulary tag rides along, the way the backend occasionally
//! annotates an exchange.
//!
//! What the reconstruction must get right here:
//!   - the two sessions separate cleanly, each under its own marker
//!   - markers appear in first-seen order, not timestamp order
//!   - the diagnostic record sorts after M1–M4 within its session

use serde_json::json;
use uuid::Uuid;

use crate::script::{message, now_epoch, ReplayScript};

/// Record two interleaved authentication attempts as a replay script.
pub fn script() -> ReplayScript {
    let alice = Uuid::new_v4().to_string();
    let bob = Uuid::new_v4().to_string();
    let base = now_epoch();

    // "c2Vuc29yLTI=" is base64 for "sensor-2".
    let sensor_1 = "sensor:c2Vuc29yLTE=";
    let sensor_2 = "sensor:c2Vuc29yLTI=";

    let a1 = message(
        "M1",
        Some(&alice),
        1,
        base + 0.05,
        "did:web:alice",
        "gateway",
        &[("sensorId", json!("sensor-1"))],
    );
    let a2 = message(
        "M2",
        Some(&alice),
        2,
        base + 0.40,
        "gateway",
        sensor_1,
        &[("nonce", json!(format!("n-{}", &alice[..8])))],
    );
    let a3 = message(
        "M3",
        Some(&alice),
        3,
        base + 0.55,
        sensor_1,
        "gateway",
        &[("proof", json!(format!("prf-{}", &alice[..6])))],
    );
    let a4 = message(
        "M4",
        Some(&alice),
        4,
        base + 0.70,
        "gateway",
        "did:web:alice",
        &[("ok", json!(true))],
    );

    // Bob's exchange starts later but his worker runs ahead: his M2 is
    // stamped before Alice's.
    let b1 = message(
        "M1",
        Some(&bob),
        1,
        base + 0.12,
        "did:web:bob",
        "gateway",
        &[("sensorId", json!("sensor-2"))],
    );
    let b2 = message(
        "M2",
        Some(&bob),
        2,
        base + 0.18,
        "gateway",
        sensor_2,
        &[("nonce", json!(format!("n-{}", &bob[..8])))],
    );
    let b3 = message(
        "M3",
        Some(&bob),
        3,
        base + 0.62,
        sensor_2,
        "gateway",
        &[("proof", json!(format!("prf-{}", &bob[..6])))],
    );
    let b4 = message(
        "M4",
        Some(&bob),
        4,
        base + 0.81,
        "gateway",
        "did:web:bob",
        &[("ok", json!(true))],
    );

    // Diagnostic annotation with a tag outside the M1–M4 vocabulary.
    let note = message(
        "NOTE",
        Some(&bob),
        5,
        base + 0.20,
        "gateway",
        "",
        &[("info", json!("sensor clock skew detected"))],
    );

    ReplayScript {
        polls: vec![
            // Bob's M2 reaches the log before Alice's M1.
            vec![b2.clone(), a1.clone(), b1.clone()],
            vec![
                b2.clone(),
                a1.clone(),
                b1.clone(),
                note.clone(),
                a2.clone(),
                b3.clone(),
            ],
            vec![b2, a1, b1, note, a2, b3, a3, b4, a4],
        ],
    }
}
