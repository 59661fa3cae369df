//! Market cycle playbook content.
//!
//! Static educational copy for each cycle phase: how it feels, the common
//! mistakes, and the better behaviors. Keyed by the classifier's position so
//! the overview can show the playbook for the detected phase.

use crate::sentiment::MarketPosition;

#[derive(Debug, Clone, Copy)]
pub struct CyclePlaybook {
    pub title: &'static str,
    pub feel: &'static str,
    pub mistakes: [&'static str; 3],
    pub better: [&'static str; 3],
    pub example: &'static str,
}

const CAPITULATION: CyclePlaybook = CyclePlaybook {
    title: "Capitulation",
    feel: "Fear dominates. Confidence collapses. Most participants believe the asset is broken.",
    mistakes: [
        "Selling purely to reduce emotional pain",
        "Abandoning long-term thesis due to short-term volatility",
        "Obsessively checking price for reassurance",
    ],
    better: [
        "Reduce noise consumption",
        "Follow predefined allocation rules",
        "Accept discomfort as part of long-term investing",
    ],
    example: "Historically, deep drawdowns punished emotional exits more than patient discipline.",
};

const ACCUMULATION: CyclePlaybook = CyclePlaybook {
    title: "Accumulation",
    feel: "Interest fades. Volatility compresses. Attention disappears.",
    mistakes: [
        "Waiting for the perfect entry",
        "Over-optimizing timing",
        "Losing conviction due to boredom",
    ],
    better: [
        "Maintain steady contributions",
        "Focus on allocation over price",
        "Treat boredom as reduced speculation",
    ],
    example: "Long accumulation phases historically rewarded consistency more than precision.",
};

const EXPANSION: CyclePlaybook = CyclePlaybook {
    title: "Expansion",
    feel: "Confidence returns. Participation increases steadily.",
    mistakes: [
        "Increasing size because price is rising",
        "Confusing momentum with reduced risk",
        "Relaxing discipline due to gains",
    ],
    better: [
        "Respect position limits",
        "Separate long-term from speculative capital",
        "Prepare mentally for volatility",
    ],
    example: "Expansion phases rewarded discipline, but punished emotional overexposure.",
};

const EUPHORIA: CyclePlaybook = CyclePlaybook {
    title: "Euphoria",
    feel: "Certainty replaces caution. Narratives dominate.",
    mistakes: [
        "Believing upside is unlimited",
        "Increasing leverage",
        "Ignoring risk management",
    ],
    better: [
        "Reassess risk tolerance",
        "Consider partial profit-taking if aligned with plan",
        "Accept missing the exact top",
    ],
    example: "Historically, euphoria punished aggression more than inactivity.",
};

/// Playbook for a cycle phase.
pub fn playbook(position: MarketPosition) -> &'static CyclePlaybook {
    match position {
        MarketPosition::Capitulation => &CAPITULATION,
        MarketPosition::Accumulation => &ACCUMULATION,
        MarketPosition::Expansion => &EXPANSION,
        MarketPosition::Euphoria => &EUPHORIA,
    }
}
