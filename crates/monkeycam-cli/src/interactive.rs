//! Interactive menu loop.
//!
//! Probes the camera and model once, then lets the user move between the
//! home screen and the two detection screens until they quit.

use dialoguer::Select;
use tracing::debug;

use monkeycam_core::{
    probe_services, AppState, Detector, MonkeycamConfig, Season, TimeSlot, View,
};

use crate::render;

/// One line of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuEntry {
    Open(View),
    Quit,
}

/// Main menu lines. Detection screens are marked when they cannot run.
fn menu_entries(detection_enabled: bool) -> Vec<(String, MenuEntry)> {
    let mut entries: Vec<(String, MenuEntry)> = [View::Home, View::Today, View::Yesterday]
        .into_iter()
        .map(|view| {
            let label = if view.is_detection() && !detection_enabled {
                format!("{} (unavailable)", view)
            } else {
                view.to_string()
            };
            (label, MenuEntry::Open(view))
        })
        .collect();
    entries.push(("Quit".to_string(), MenuEntry::Quit));
    entries
}

/// Slot picker lines: "no selection" first, then the season's slots.
fn slot_choices(season: Season, default_slot: TimeSlot) -> Vec<(String, Option<TimeSlot>)> {
    std::iter::once((format!("No selection ({})", default_slot), None))
        .chain(
            season
                .slots()
                .into_iter()
                .map(|slot| (slot.to_string(), Some(slot))),
        )
        .collect()
}

/// Runs the menu loop until the user quits or presses Esc.
pub async fn run(config: MonkeycamConfig) -> anyhow::Result<()> {
    println!("Welcome to a Jigokudani Yaen-Koen monkey detector!");
    println!();

    let (status, classifier) = probe_services(&config).await?;
    println!("{}", render::status(&status));

    let detector = match &classifier {
        Some(classifier) if status.detection_enabled() => {
            Some(Detector::new(config.clone(), classifier)?)
        }
        _ => None,
    };

    let season = Season::current();
    let mut state = AppState::new();
    println!();
    println!("{}", render::home(season));

    loop {
        let entries = menu_entries(detector.is_some());
        let labels: Vec<&str> = entries.iter().map(|(label, _)| label.as_str()).collect();
        let Some(index) = Select::new()
            .with_prompt("Where to?")
            .items(&labels)
            .default(0)
            .interact_opt()?
        else {
            break;
        };

        let view = match entries[index].1 {
            MenuEntry::Quit => break,
            MenuEntry::Open(view) => view,
        };
        state.navigate(view);
        debug!("Navigated to {:?}", state.view);

        if !state.view.is_detection() {
            println!("{}", render::home(season));
            continue;
        }

        let Some(detector) = &detector else {
            println!("Detection is unavailable until the camera and model are both up.");
            continue;
        };

        let choices = slot_choices(season, detector.config().site.default_slot);
        let labels: Vec<&str> = choices.iter().map(|(label, _)| label.as_str()).collect();
        let Some(index) = Select::new()
            .with_prompt("Select the timeslot")
            .items(&labels)
            .default(0)
            .interact_opt()?
        else {
            continue;
        };
        state.select_slot(choices[index].1);

        let Some((day, slot)) = state.detection_request() else {
            continue;
        };

        println!("Analyzing the photo...");
        match detector.detect(day, slot).await {
            Ok(outcome) => println!("{}", render::outcome(&outcome)),
            Err(e) => println!("error: {}", e),
        }
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_marks_disabled_detection() {
        let entries = menu_entries(false);
        let labels: Vec<&str> = entries.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Homepage",
                "Detect for today (unavailable)",
                "Detect for yesterday (unavailable)",
                "Quit"
            ]
        );
    }

    #[test]
    fn test_menu_enabled() {
        let entries = menu_entries(true);
        assert_eq!(entries[1], ("Detect for today".to_string(), MenuEntry::Open(View::Today)));
        assert_eq!(entries[3].1, MenuEntry::Quit);
    }

    #[test]
    fn test_winter_slot_choices() {
        let choices = slot_choices(Season::Winter, TimeSlot::Am9);
        assert_eq!(choices.len(), 9);
        assert_eq!(choices[0], ("No selection (9am)".to_string(), None));
        assert_eq!(choices[1].1, Some(TimeSlot::Am9));
        assert_eq!(choices[8].1, Some(TimeSlot::Pm4));
    }

    #[test]
    fn test_summer_slot_choices() {
        let choices = slot_choices(Season::Summer, TimeSlot::Am9);
        assert_eq!(choices.len(), 11);
        assert_eq!(choices[1].1, Some(TimeSlot::Am8));
        assert_eq!(choices[10].1, Some(TimeSlot::Pm5));
    }
}
