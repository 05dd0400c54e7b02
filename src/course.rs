// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Course catalog
//!
//! The fixed list of research-methods modules a student can chat through,
//! with the starter message and input hint each one opens with.

/// Audit module key for the prompt-writing and literature-notes page
pub const RESEARCH_WORKFLOW_KEY: &str = "AI Research Workflow";

/// One tutoring module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseModule {
    /// History and audit key
    pub key: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Placeholder shown in the input box
    pub prompt_hint: &'static str,
    /// Assistant message shown on first entry
    pub starter: &'static str,
}

static MODULES: [CourseModule; 7] = [
    CourseModule {
        key: "Scientific Method",
        title: "Module 1 - Scientific Method",
        subtitle: "What makes a claim *scientific* in political inquiry?",
        prompt_hint: "Describe your phenomenon, theory, and a testable implication…",
        starter: "**Goal:** Articulate a political phenomenon, a theory, and a testable implication.\n\n\
                  **Coach promises:** I’ll ask for clarity on mechanisms, scope conditions, and falsifiability.",
    },
    CourseModule {
        key: "Hypothesis Design",
        title: "Module 2 - Hypothesis Design",
        subtitle: "Turn ideas into testable causal claims.",
        prompt_hint: "Write your one-sentence hypothesis and explain why it is causal…",
        starter: "**Goal:** Draft a precise, directional, falsifiable hypothesis.\n\n\
                  **Coach prompts:** Identify IV→DV direction, mechanism, and rival explanations.",
    },
    CourseModule {
        key: "Variable Measurement",
        title: "Module 3 - Variable Measurement",
        subtitle: "Operationalize concepts into data.",
        prompt_hint: "Name your IV and DV and propose specific measurements…",
        starter: "**Goal:** Define IV and DV and propose concrete measurements.\n\n\
                  **Coach prompts:** Levels of measurement, reliability, validity, bias, and proxies.",
    },
    CourseModule {
        key: "Sampling & Inference",
        title: "Module 4 - Sampling and Inference",
        subtitle: "From conceptual logic to basic statistical tests",
        prompt_hint: "Ask about sampling error, hypothesis tests, or p-values…",
        starter: "Let's discuss how sampling error leads to uncertainty, and how t-tests \
                  quantify whether observed differences are likely due to chance.",
    },
    CourseModule {
        key: "Regression Logic",
        title: "Module 5 - Regression Logic (Interpretation Only)",
        subtitle: "What coefficients mean conceptually; no computation here.",
        prompt_hint: "Explain how you’d interpret a positive, significant coefficient on your IV…",
        starter: "**Goal:** Practice interpretation of coefficients, SEs, p-values, and model fit.\n\n\
                  **Coach prompts:** Omitted variable bias, sign/direction, magnitude vs significance.",
    },
    CourseModule {
        key: "Writing & Reporting",
        title: "Module 6 - Writing & Reporting",
        subtitle: "Clear, honest claims without overreach.",
        prompt_hint: "Draft a 3-sentence results paragraph and list one limitation…",
        starter: "**Goal:** Draft a short, sober results paragraph (hypothetical).\n\n\
                  **Coach prompts:** Scope conditions, limitations, effect sizes, and policy relevance.",
    },
    CourseModule {
        key: "Reflection Log",
        title: "Module 7 - Reflection Log",
        subtitle: "Document ethical use and learning gains.",
        prompt_hint: "Write 3–5 bullets about how AI changed your understanding…",
        starter: "**Goal:** Reflect on AI’s role in your learning.\n\n\
                  **Coach prompts:** What did you verify? How did prompts evolve? \
                  What will you do differently next time?",
    },
];

/// All chat modules in course order
pub fn modules() -> &'static [CourseModule] {
    &MODULES
}

/// Look a module up by key (case-insensitive) or by its 1-based number
pub fn find(query: &str) -> Option<&'static CourseModule> {
    let query = query.trim();
    if let Ok(number) = query.parse::<usize>() {
        return number.checked_sub(1).and_then(|index| MODULES.get(index));
    }
    MODULES
        .iter()
        .find(|module| module.key.eq_ignore_ascii_case(query))
}

/// The module a chat starts in when none is named
pub fn first() -> &'static CourseModule {
    &MODULES[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<&str> = modules().iter().map(|m| m.key).collect();
        assert_eq!(keys.len(), modules().len());
        assert!(!keys.contains(RESEARCH_WORKFLOW_KEY));
    }

    #[test]
    fn test_every_module_has_a_starter() {
        for module in modules() {
            assert!(!module.starter.trim().is_empty(), "{}", module.key);
            assert!(!module.prompt_hint.is_empty(), "{}", module.key);
        }
    }

    #[test]
    fn test_find_by_key_and_number() {
        assert_eq!(find("regression logic").map(|m| m.key), Some("Regression Logic"));
        assert_eq!(find(" 2 ").map(|m| m.key), Some("Hypothesis Design"));
        assert_eq!(find("7").map(|m| m.key), Some("Reflection Log"));
        assert!(find("0").is_none());
        assert!(find("8").is_none());
        assert!(find("Astrology").is_none());
    }

    #[test]
    fn test_starter_line_continuations() {
        let starter = find("Scientific Method").unwrap().starter;
        assert!(starter.contains("implication.\n\n**Coach promises:**"));
        assert_eq!(first().key, "Scientific Method");
    }
}
