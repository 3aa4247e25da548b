//! Normalize raw model output into a clean command
//!
//! The pipeline is an ordered list of rules. Each rule pairs a predicate
//! with a transform and sees only the previous rule's output. A pass runs
//! every rule once; passes repeat until the text stops changing, so the
//! result is always a fixed point.

/// Markdown code fence
pub const FENCE: &str = "```";

/// Language tag models put right after an opening fence
pub const LANGUAGE_TAG: &str = "bash";

/// Prefix the model uses to flag a risky command
pub const DANGER_MARKER: &str = "WARNING: ";

/// Output of the sanitization pipeline
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SanitizedCommand {
    pub command: String,
    /// The model prefixed the command with the danger marker
    pub dangerous: bool,
}

/// Text flowing through one pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stage {
    pub text: String,
    /// A leading fence was removed earlier in this pass
    pub fence_opened: bool,
    pub dangerous: bool,
}

impl Stage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// A single sanitization step
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&Stage) -> bool,
    pub apply: fn(Stage) -> Stage,
}

impl Rule {
    /// Run the transform if the predicate holds
    pub fn run(&self, stage: Stage) -> Stage {
        if (self.applies)(&stage) {
            (self.apply)(stage)
        } else {
            stage
        }
    }
}

/// Rules in application order
pub const RULES: &[Rule] = &[
    Rule {
        name: "strip-fences",
        applies: has_fence,
        apply: strip_fences,
    },
    Rule {
        name: "strip-language-tag",
        applies: has_language_tag,
        apply: strip_language_tag,
    },
    Rule {
        name: "strip-danger-marker",
        applies: has_danger_marker,
        apply: strip_danger_marker,
    },
    Rule {
        name: "trim",
        applies: has_surrounding_whitespace,
        apply: trim,
    },
];

fn has_fence(stage: &Stage) -> bool {
    stage.text.starts_with(FENCE) || stage.text.ends_with(FENCE)
}

fn strip_fences(mut stage: Stage) -> Stage {
    let text = stage.text.as_str();
    let opened = text.starts_with(FENCE);
    let closed = text.ends_with(FENCE);

    // A lone "```" both starts and ends with a fence but holds only one
    let stripped = if opened && closed && text.len() >= 2 * FENCE.len() {
        &text[FENCE.len()..text.len() - FENCE.len()]
    } else {
        let text = text.strip_prefix(FENCE).unwrap_or(text);
        text.strip_suffix(FENCE).unwrap_or(text)
    };

    stage.text = stripped.to_string();
    stage.fence_opened = opened;
    stage
}

fn has_language_tag(stage: &Stage) -> bool {
    stage.fence_opened && stage.text.starts_with(LANGUAGE_TAG)
}

fn strip_language_tag(mut stage: Stage) -> Stage {
    stage.text = stage.text[LANGUAGE_TAG.len()..].to_string();
    stage
}

fn has_danger_marker(stage: &Stage) -> bool {
    stage.text.starts_with(DANGER_MARKER)
}

fn strip_danger_marker(mut stage: Stage) -> Stage {
    stage.text = stage.text[DANGER_MARKER.len()..].to_string();
    stage.dangerous = true;
    stage
}

fn has_surrounding_whitespace(stage: &Stage) -> bool {
    stage.text.trim().len() != stage.text.len()
}

fn trim(mut stage: Stage) -> Stage {
    stage.text = stage.text.trim().to_string();
    stage
}

/// Run every rule once over `raw`
pub fn sanitize_once(raw: &str) -> SanitizedCommand {
    let stage = RULES
        .iter()
        .fold(Stage::new(raw), |stage, rule| rule.run(stage));

    SanitizedCommand {
        command: stage.text,
        dangerous: stage.dangerous,
    }
}

/// Sanitize raw model output
///
/// Repeats passes until the text is stable. Every pass that changes the
/// text shortens it, so this terminates.
pub fn sanitize(raw: &str) -> SanitizedCommand {
    let mut current = raw.to_string();
    let mut dangerous = false;

    loop {
        let pass = sanitize_once(&current);
        dangerous |= pass.dangerous;
        if pass.command == current {
            return SanitizedCommand {
                command: current,
                dangerous,
            };
        }
        current = pass.command;
    }
}
