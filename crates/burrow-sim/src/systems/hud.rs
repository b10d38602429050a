//! HUD text intents.

use burrow_core::enums::HudSlot;
use burrow_core::events::PresentationIntent;

pub fn score_text(score: u32) -> PresentationIntent {
    PresentationIntent::SetText {
        slot: HudSlot::Score,
        text: format!("Score: {score}"),
    }
}

pub fn timer_text(secs: u32) -> PresentationIntent {
    PresentationIntent::SetText {
        slot: HudSlot::Timer,
        text: format!("Time: {secs}"),
    }
}

pub fn final_score_text(score: u32) -> PresentationIntent {
    PresentationIntent::SetText {
        slot: HudSlot::FinalScore,
        text: format!("Score: {score}"),
    }
}
