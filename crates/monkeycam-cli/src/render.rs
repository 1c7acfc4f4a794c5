//! Plain-text rendering of detection results and service status.

use std::fmt::Write;

use monkeycam_core::{CameraFeed, DetectionOutcome, DetectionReport, Season, ServiceStatus};

const SITE_URL: &str = "http://www.jigokudani-yaenkoen.co.jp";

/// Home screen text for the given season.
pub fn home(season: Season) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "This app helps in knowing if monkeys have been sighted recently at\n\
         Jigokudani Yaen-Koen at a glance."
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Official website: {}", SITE_URL);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Winter Season and Summer Season have different opening times:"
    );
    for s in [Season::Winter, Season::Summer] {
        let marker = if s == season { " (current)" } else { "" };
        let _ = writeln!(out, "  - {}{}", s.opening_hours(), marker);
    }
    out
}

/// Availability lines shown at startup and by `monkeycam status`.
pub fn status(status: &ServiceStatus) -> String {
    let mut out = String::new();

    let camera = match status.camera {
        Some(CameraFeed::Primary) => "The live camera is up.",
        Some(CameraFeed::Secondary) => {
            "Only the video camera is up at the moment, detection is disabled."
        }
        None => "The cameras are down at the moment, please try again later.",
    };
    let _ = writeln!(out, "{}", camera);

    if status.model_ready {
        let _ = writeln!(out, "{} successfully connected!", status.model);
    } else {
        let reason = status.model_error.as_deref().unwrap_or("not connected");
        let _ = writeln!(out, "{} unavailable: {}", status.model, reason);
    }

    let _ = write!(
        out,
        "Detection: {}",
        if status.detection_enabled() {
            "enabled"
        } else {
            "disabled"
        }
    );
    out
}

/// Full text for one detection run: warnings, then the result.
pub fn outcome(outcome: &DetectionOutcome) -> String {
    let mut out = String::new();
    for warning in outcome.warnings() {
        let _ = writeln!(out, "warning: {}", warning);
    }

    match outcome {
        DetectionOutcome::TryLater { slot, .. } => {
            let _ = write!(
                out,
                "Nothing was published for {}, please try again later.",
                slot
            );
        }
        DetectionOutcome::NoPhotoYet { .. } => {
            let _ = write!(
                out,
                "Please try again later, there is no photo available yet."
            );
        }
        DetectionOutcome::Detected(report) => out.push_str(&detected(report)),
    }
    out
}

fn detected(report: &DetectionReport) -> String {
    let mut out = String::new();
    if report.image_count == 1 {
        let _ = writeln!(out, "Correctly fetched the image.");
    }
    let _ = writeln!(out, "{}", report.verdict.message());
    let _ = writeln!(out);
    let _ = writeln!(out, "Photo: {}", report.image_url);
    let _ = write!(out, "Model answers: {}", report.council.tally);
    out
}
