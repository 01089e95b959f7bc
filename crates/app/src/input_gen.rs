//! Sample input generation.
//!
//! When no input file is specified, we simulate a two-heater temperature
//! control lab sampled once per second and serialize the log. Temperature
//! logs are what this tool is usually fed: a small alphabet (digits,
//! separators) with skewed frequencies, so the compression is visible.
//!
//! # Model
//!
//! - Each heater relaxes toward ambient with time constant `TAU_S` and
//!   heats at `HEATER_GAIN` °C/s at full power; a fraction of each
//!   heater's output leaks into the other sensor
//! - Both heaters run ON/OFF control with hysteresis around setpoints that
//!   alternate every 12 simulated hours (25/30 °C and 23/28 °C)
//! - Sensors add a little uniform noise and report two decimals

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::config::SampleFormat;

const TAU_S: f64 = 240.0;
const HEATER_GAIN: f64 = 0.2;
const CROSS_COUPLING: f64 = 0.15;
const SENSOR_NOISE: f64 = 0.05;
const SETPOINT_PERIOD_S: u64 = 12 * 3600;

/// Longest log we generate: one week of one-second rows.
pub const MAX_SAMPLE_SECONDS: u64 = 7 * 86_400;

/// Parameters of the generated log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSpec {
    pub seed: u64,
    /// Number of one-second rows
    pub seconds: u64,
    /// ON/OFF hysteresis in °C
    pub deadband: f64,
}

/// One row of the log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    #[serde(rename = "Time (s)")]
    pub time_s: u64,
    #[serde(rename = "T1")]
    pub t1: f64,
    #[serde(rename = "T2")]
    pub t2: f64,
    #[serde(rename = "Q1")]
    pub q1: u8,
    #[serde(rename = "Q2")]
    pub q2: u8,
    #[serde(rename = "SP1")]
    pub sp1: u8,
    #[serde(rename = "SP2")]
    pub sp2: u8,
}

/// ON/OFF controller with hysteresis.
///
/// Full power below `setpoint - deadband`, off above `setpoint + deadband`,
/// otherwise keep the previous output.
pub fn onoff_control(temp: f64, setpoint: f64, deadband: f64, last: u8) -> u8 {
    if temp < setpoint - deadband {
        100
    } else if temp > setpoint + deadband {
        0
    } else {
        last
    }
}

/// Setpoints for heater 1 and 2 at time `t`.
fn setpoints(t: u64) -> (u8, u8) {
    let high = ((t / SETPOINT_PERIOD_S) % 2) as u8;
    (25 + 5 * high, 23 + 5 * high)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Simulate the lab for `spec.seconds` seconds.
///
/// Callers bound `spec.seconds` by `MAX_SAMPLE_SECONDS`; the row buffer is
/// never pre-sized beyond it.
pub fn simulate(spec: &SampleSpec) -> Vec<Sample> {
    let mut rng = ChaCha8Rng::seed_from_u64(spec.seed);
    let ambient: f64 = rng.gen_range(21.0..24.0);

    let (mut t1, mut t2) = (ambient, ambient);
    let (mut q1, mut q2) = (0u8, 0u8);
    let mut rows = Vec::with_capacity(spec.seconds.min(MAX_SAMPLE_SECONDS) as usize);

    for time_s in 0..spec.seconds {
        let m1 = round2(t1 + rng.gen_range(-SENSOR_NOISE..=SENSOR_NOISE));
        let m2 = round2(t2 + rng.gen_range(-SENSOR_NOISE..=SENSOR_NOISE));

        let (sp1, sp2) = setpoints(time_s);
        q1 = onoff_control(m1, sp1 as f64, spec.deadband, q1);
        q2 = onoff_control(m2, sp2 as f64, spec.deadband, q2);

        rows.push(Sample {
            time_s,
            t1: m1,
            t2: m2,
            q1,
            q2,
            sp1,
            sp2,
        });

        let p1 = q1 as f64 / 100.0;
        let p2 = q2 as f64 / 100.0;
        t1 += (ambient - t1) / TAU_S + HEATER_GAIN * (p1 + CROSS_COUPLING * p2);
        t2 += (ambient - t2) / TAU_S + HEATER_GAIN * (p2 + CROSS_COUPLING * p1);
    }

    rows
}

/// Serialize rows as CSV with a header line.
pub fn to_csv(rows: &[Sample]) -> Vec<u8> {
    let mut out = Vec::with_capacity(rows.len() * 32 + 32);
    out.extend_from_slice(b"Time (s),T1,T2,Q1,Q2,SP1,SP2\n");
    for row in rows {
        let line = format!(
            "{},{:.2},{:.2},{},{},{},{}\n",
            row.time_s, row.t1, row.t2, row.q1, row.q2, row.sp1, row.sp2
        );
        out.extend_from_slice(line.as_bytes());
    }
    out
}

/// Serialize rows as a pretty-printed JSON array.
pub fn to_json(rows: &[Sample]) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec_pretty(rows)
}

/// Generate sample data in the requested format.
pub fn generate_sample_data(spec: &SampleSpec, format: SampleFormat) -> serde_json::Result<Vec<u8>> {
    let rows = simulate(spec);
    match format {
        SampleFormat::Csv => Ok(to_csv(&rows)),
        SampleFormat::Json => to_json(&rows),
    }
}
